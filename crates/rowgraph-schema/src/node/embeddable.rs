use crate::node::PropertyDefinition;
use serde::{Deserialize, Serialize};

///
/// EmbeddableDefinition
///
/// Value object stored inline in its owner's table.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EmbeddableDefinition {
    pub property_name: String,
    pub qualified_name: String,

    #[serde(default)]
    pub nullable: bool,

    pub properties: Vec<PropertyDefinition>,
}

impl EmbeddableDefinition {
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.properties
            .iter()
            .map(|prop| prop.column_name.as_str())
            .collect()
    }
}
