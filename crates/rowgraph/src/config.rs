use rowgraph_core::hydrate::HydrationStrategy;
use rowgraph_schema::config::{BuildConfig, ConfigError};
use serde::{Deserialize, Serialize};

///
/// Config
///
/// `[schema]` holds the graph build knobs, `[hydration]` the strategy.
/// Both sections are optional.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub schema: BuildConfig,
    pub hydration: HydrationConfig,
}

impl Config {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(src)?;
        config.schema.validate()?;

        Ok(config)
    }
}

///
/// HydrationConfig
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HydrationConfig {
    pub strategy: HydrationStrategy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowgraph_schema::types::TableNaming;

    #[test]
    fn empty_document_is_the_default() {
        let config = Config::from_toml_str("").expect("empty config should parse");

        assert_eq!(config, Config::default());
        assert_eq!(config.hydration.strategy, HydrationStrategy::Copied);
    }

    #[test]
    fn both_sections_are_read() {
        let config = Config::from_toml_str(
            r#"
            [schema]
            table_naming = "snake"
            extra_id_types = ["app.OrderNo"]

            [hydration]
            strategy = "real"
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.schema.table_naming, TableNaming::Snake);
        assert_eq!(config.schema.extra_id_types, vec!["app.OrderNo"]);
        assert_eq!(config.hydration.strategy, HydrationStrategy::Real);
    }

    #[test]
    fn schema_section_is_validated() {
        let err = Config::from_toml_str("[schema]\nextra_property_types = [\"Money\"]")
            .expect_err("unqualified extra type should be rejected");

        assert!(matches!(err, ConfigError::InvalidType { .. }));
    }

    #[test]
    fn unknown_sections_are_rejected() {
        let err = Config::from_toml_str("[cache]\nsize = 3").expect_err("unknown section");

        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
