//! Sources of raw declarations.
//!
//! How declarations are extracted (annotations, struct tags, reflection) is
//! opaque to the builder; it only sees a [`SchemaSupplier`].

use crate::decl::SchemaDeclarations;
use thiserror::Error as ThisError;

///
/// SupplierError
///

#[derive(Debug, ThisError)]
pub enum SupplierError {
    #[error("failed to parse schema declarations: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// SchemaSupplier
///

pub trait SchemaSupplier {
    fn declarations(&self) -> Result<SchemaDeclarations, SupplierError>;
}

///
/// StaticSupplier
/// hands out declarations assembled in memory
///

#[derive(Clone, Debug, Default)]
pub struct StaticSupplier {
    declarations: SchemaDeclarations,
}

impl StaticSupplier {
    #[must_use]
    pub const fn new(declarations: SchemaDeclarations) -> Self {
        Self { declarations }
    }
}

impl SchemaSupplier for StaticSupplier {
    fn declarations(&self) -> Result<SchemaDeclarations, SupplierError> {
        Ok(self.declarations.clone())
    }
}

///
/// TomlSupplier
///
/// Declarations written as a TOML document with `[[entities]]`,
/// `[[embeddables]]` and `[[converters]]` tables.
///

#[derive(Clone, Debug)]
pub struct TomlSupplier {
    source: String,
}

impl TomlSupplier {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl SchemaSupplier for TomlSupplier {
    fn declarations(&self) -> Result<SchemaDeclarations, SupplierError> {
        let declarations: SchemaDeclarations = toml::from_str(&self.source)?;
        tracing::debug!(
            entities = declarations.entities.len(),
            embeddables = declarations.embeddables.len(),
            converters = declarations.converters.len(),
            "parsed toml declarations"
        );

        Ok(declarations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AssociationKind, EnumEncoding, Type};

    const SHOP: &str = r#"
        [[entities]]
        ty = "shop.Customer"
        id = { kind = "single", generated = true, property = { name = "id", ty = "core.Int64" } }
        properties = [
            { name = "name", ty = "core.Text" },
            { name = "tier", ty = "shop.Tier", enumerated = "string" },
        ]
        associations = [
            { name = "phones", kind = "one_to_many", target = "shop.Phone", mapped_by = "customer" },
        ]

        [[entities]]
        ty = "shop.Phone"
        id = { kind = "single", property = { name = "id", ty = "core.Int64" } }
        properties = [{ name = "number", ty = "core.Text" }]
        associations = [
            { name = "customer", kind = "many_to_one", target = "shop.Customer", join_columns = ["customer_id"] },
        ]
    "#;

    #[test]
    fn toml_supplier_reads_entities() {
        let decls = TomlSupplier::new(SHOP)
            .declarations()
            .expect("declarations should parse");

        assert_eq!(decls.entities.len(), 2);

        let customer = &decls.entities[0];
        assert_eq!(customer.ty, Type::parse("shop.Customer"));
        assert_eq!(customer.properties[1].enumerated, Some(EnumEncoding::String));
        assert_eq!(customer.associations[0].kind, AssociationKind::OneToMany);
        assert_eq!(customer.associations[0].mapped_by.as_deref(), Some("customer"));

        let phone = &decls.entities[1];
        assert_eq!(phone.associations[0].join_columns, vec!["customer_id"]);
    }

    #[test]
    fn toml_supplier_reports_parse_errors() {
        let err = TomlSupplier::new("[[entities]]\nty = 3")
            .declarations()
            .expect_err("ty must be a string or table");

        assert!(matches!(err, SupplierError::Parse(_)));
    }

    #[test]
    fn static_supplier_returns_its_declarations() {
        let decls = SchemaDeclarations::new();
        let supplier = StaticSupplier::new(decls.clone());

        assert_eq!(supplier.declarations().ok(), Some(decls));
    }
}
