use crate::types::{Primitive, TableNaming, Type};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid type '{ty}' in '{field}': expected a qualified name such as 'app.Money'")]
    InvalidType { field: &'static str, ty: String },

    #[error("failed to parse build config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// BuildConfig
///
/// Knobs of the entity graph build. Every field has a default, so an empty
/// document is a valid config.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Table name derived for entities without an explicit table.
    pub table_naming: TableNaming,

    /// Qualified types accepted as ids on top of the builtin set.
    pub extra_id_types: Vec<String>,

    /// Qualified types accepted as properties on top of the builtin set.
    pub extra_property_types: Vec<String>,
}

impl BuildConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(src)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_qualified("extra_id_types", &self.extra_id_types)?;
        check_qualified("extra_property_types", &self.extra_property_types)?;

        Ok(())
    }

    #[must_use]
    pub fn supports_id_type(&self, ty: &Type) -> bool {
        Primitive::from_type(ty).is_some_and(Primitive::supports_id)
            || contains_type(&self.extra_id_types, ty)
    }

    /// Every builtin scalar is a valid property type.
    #[must_use]
    pub fn supports_property_type(&self, ty: &Type) -> bool {
        Primitive::from_type(ty).is_some() || contains_type(&self.extra_property_types, ty)
    }
}

fn contains_type(list: &[String], ty: &Type) -> bool {
    let qualified = ty.qualified_name();

    list.iter().any(|entry| *entry == qualified)
}

fn check_qualified(field: &'static str, list: &[String]) -> Result<(), ConfigError> {
    match list.iter().find(|entry| !Type::parse(entry).is_qualified()) {
        Some(entry) => Err(ConfigError::InvalidType {
            field,
            ty: entry.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = BuildConfig::from_toml_str("").expect("empty config should parse");

        assert_eq!(config, BuildConfig::default());
        assert_eq!(config.table_naming, TableNaming::LowerCamel);
    }

    #[test]
    fn extras_extend_supported_sets() {
        let config = BuildConfig::from_toml_str(
            r#"
            table_naming = "snake"
            extra_id_types = ["app.Ulid"]
            extra_property_types = ["app.Money"]
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.table_naming, TableNaming::Snake);
        assert!(config.supports_id_type(&Type::parse("app.Ulid")));
        assert!(config.supports_property_type(&Type::parse("app.Money")));
        assert!(!config.supports_id_type(&Type::parse("app.Money")));
        assert!(!config.supports_id_type(&Primitive::Bool.ty()));
        assert!(config.supports_property_type(&Primitive::Bool.ty()));
    }

    #[test]
    fn unqualified_extra_is_rejected() {
        let err = BuildConfig::from_toml_str(r#"extra_id_types = ["Ulid"]"#)
            .expect_err("bare names are not qualified");

        assert!(matches!(
            err,
            ConfigError::InvalidType {
                field: "extra_id_types",
                ..
            }
        ));
    }

    #[test]
    fn unknown_keys_fail_to_parse() {
        let err = BuildConfig::from_toml_str("naming = 1").expect_err("unknown key");

        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
