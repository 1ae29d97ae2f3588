use crate::{node::PropertyDefinition, types::Type};
use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

///
/// IdDefinition
///
/// Identifier of an entity. Simple ids carry a single property; embedded
/// (composite) ids carry one property per field of the embeddable key type.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct IdDefinition {
    pub name: String,
    pub ty: Type,

    /// Qualified embeddable type name of a composite id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,

    pub properties: Vec<PropertyDefinition>,

    #[serde(default)]
    pub generated_value: bool,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default)]
    pub embedded: bool,

    /// Association whose join column doubles as this key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_assoc: Option<String>,
}

impl IdDefinition {
    /// Single-column id backed by `property`.
    #[must_use]
    pub fn simple(property: PropertyDefinition, generated_value: bool) -> Self {
        Self {
            name: property.name.clone(),
            ty: property.ty.clone(),
            qualified_name: None,
            nullable: property.nullable,
            properties: vec![property],
            generated_value,
            embedded: false,
            shared_assoc: None,
        }
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.properties
            .iter()
            .map(|prop| prop.column_name.as_str())
            .collect()
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.iter().find(|prop| prop.name == name)
    }

    /// Flattened field name of one id property: embedded ids prefix the key
    /// type, e.g. `recordIdType`.
    #[must_use]
    pub fn prop_name(&self, prop: &PropertyDefinition) -> String {
        if self.embedded {
            format!(
                "{}{}",
                self.ty.lower_camel_name(),
                prop.name.to_case(Case::Pascal)
            )
        } else {
            self.name.to_case(Case::Camel)
        }
    }

    #[must_use]
    pub fn props_as_args(&self) -> String {
        self.properties
            .iter()
            .map(|prop| self.prop_name(prop))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Primitive;

    #[test]
    fn embedded_prop_names_are_prefixed_with_key_type() {
        let id = IdDefinition {
            name: "id".into(),
            ty: Type::parse("audit.RecordId"),
            qualified_name: Some("audit.RecordId".into()),
            properties: vec![
                PropertyDefinition::new("id", "id", Primitive::Text.ty()),
                PropertyDefinition::new("type", "type", Primitive::Text.ty()),
            ],
            generated_value: false,
            nullable: false,
            embedded: true,
            shared_assoc: None,
        };

        assert_eq!(id.props_as_args(), "recordIdId, recordIdType");
        assert_eq!(id.column_names(), vec!["id", "type"]);
    }

    #[test]
    fn simple_id_uses_its_own_name() {
        let id = IdDefinition::simple(
            PropertyDefinition::new("customerId", "customer_id", Primitive::Int64.ty()),
            true,
        );

        assert_eq!(id.props_as_args(), "customerId");
        assert!(id.generated_value);
        assert!(!id.embedded);
    }
}
