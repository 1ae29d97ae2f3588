use crate::{
    node::IdDefinition,
    types::{AssociationKind, Type},
};
use serde::{Deserialize, Serialize};

///
/// AssociationDefinition
///
/// Relationship from `source` to `target`. The owning side (`mapped`) holds
/// the foreign key; the inverse side names the owner through `mapped_by`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AssociationDefinition {
    pub name: String,
    pub source: Type,
    pub target: Type,
    pub kind: AssociationKind,

    #[serde(default = "default_mapped")]
    pub mapped: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_by: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub join_columns: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_table: Option<String>,

    #[serde(default)]
    pub nullable: bool,

    /// Target identifier, captured once the target id is resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<IdDefinition>,

    /// Owner id whose column doubles as this join column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_id: Option<String>,
}

const fn default_mapped() -> bool {
    true
}

impl AssociationDefinition {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        source: Type,
        target: Type,
        kind: AssociationKind,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            target,
            kind,
            mapped: true,
            mapped_by: None,
            join_columns: Vec::new(),
            join_table: None,
            nullable: false,
            target_id: None,
            shared_id: None,
        }
    }

    #[must_use]
    pub fn is_self_referential(&self) -> bool {
        self.source == self.target
    }

    /// Inverse side of a bidirectional pair.
    #[must_use]
    pub const fn is_inverse(&self) -> bool {
        self.mapped_by.is_some()
    }

    /// Source and target foreign-key columns of a many-to-many join table.
    #[must_use]
    pub fn join_table_columns(&self) -> (String, String) {
        let source = self.source.lower_camel_name();

        if self.is_self_referential() {
            (format!("{source}_source_id"), format!("{source}_target_id"))
        } else {
            let target = self.target.lower_camel_name();

            (format!("{source}_id"), format!("{target}_id"))
        }
    }

    /// Name of the target id, once captured.
    #[must_use]
    pub fn target_id_prop_name(&self) -> Option<&str> {
        self.target_id.as_ref().map(|id| id.name.as_str())
    }

    /// Target id column names, empty until the id is captured.
    #[must_use]
    pub fn target_id_columns(&self) -> Vec<&str> {
        self.target_id
            .as_ref()
            .map(IdDefinition::column_names)
            .unwrap_or_default()
    }
}
