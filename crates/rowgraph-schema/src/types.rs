use crate::{DEFAULT_NAMESPACE, PRIMITIVE_NAMESPACE};
use convert_case::{Case, Casing};
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Type
///
/// Qualified entity, value or scalar type. Used as the identity key for
/// every entity in the graph.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(from = "TypeRepr")]
pub struct Type {
    pub namespace: String,
    pub name: String,

    /// Underlying type when this type is a transparent alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<Box<Self>>,
}

impl Type {
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            alias_of: None,
        }
    }

    /// Split a qualified name at its last dot; bare names land in the
    /// default namespace.
    #[must_use]
    pub fn parse(qualified: &str) -> Self {
        match qualified.rsplit_once('.') {
            Some((namespace, name)) => Self::new(namespace, name),
            None => Self::new(DEFAULT_NAMESPACE, qualified),
        }
    }

    #[must_use]
    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(PRIMITIVE_NAMESPACE, primitive.to_string())
    }

    #[must_use]
    pub fn with_alias_of(self, aliased: Self) -> Self {
        Self {
            alias_of: Some(Box::new(aliased)),
            ..self
        }
    }

    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Simple name with a lower-case first word, e.g. `OrderLine` -> `orderLine`.
    #[must_use]
    pub fn lower_camel_name(&self) -> String {
        self.name.to_case(Case::Camel)
    }

    #[must_use]
    pub fn snake_name(&self) -> String {
        self.name.to_case(Case::Snake)
    }

    #[must_use]
    pub fn is_qualified(&self) -> bool {
        !self.namespace.is_empty() && self.namespace != DEFAULT_NAMESPACE && !self.name.is_empty()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

// Accepts either a qualified string ("shop.Customer") or the full struct form.
#[derive(Deserialize)]
#[serde(untagged)]
enum TypeRepr {
    Qualified(String),
    Full {
        namespace: String,
        name: String,
        #[serde(default)]
        alias_of: Option<Box<Type>>,
    },
}

impl From<TypeRepr> for Type {
    fn from(repr: TypeRepr) -> Self {
        match repr {
            TypeRepr::Qualified(qualified) => Self::parse(&qualified),
            TypeRepr::Full {
                namespace,
                name,
                alias_of,
            } => Self {
                namespace,
                name,
                alias_of,
            },
        }
    }
}

///
/// Primitive
///
/// Builtin scalar types understood without a converter.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum Primitive {
    Bool,
    Date,
    DateTime,
    Decimal,
    Float32,
    Float64,
    Int16,
    Int32,
    Int64,
    Text,
    Timestamp,
    Uuid,
    ZonedDateTime,
}

impl Primitive {
    #[must_use]
    pub fn from_type(ty: &Type) -> Option<Self> {
        if ty.namespace == PRIMITIVE_NAMESPACE {
            ty.name.parse().ok()
        } else {
            None
        }
    }

    /// Scalars allowed as (part of) an entity identifier.
    #[must_use]
    pub const fn supports_id(self) -> bool {
        matches!(
            self,
            Self::Int16 | Self::Int32 | Self::Int64 | Self::Text | Self::Uuid
        )
    }

    #[must_use]
    pub fn ty(self) -> Type {
        Type::primitive(self)
    }
}

///
/// AssociationKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum AssociationKind {
    ManyToMany,
    ManyToOne,
    OneToMany,
    OneToOne,
}

impl AssociationKind {
    /// Associations resolved to at most one instance.
    #[must_use]
    pub const fn is_single_valued(self) -> bool {
        matches!(self, Self::ManyToOne | Self::OneToOne)
    }

    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::ManyToMany | Self::OneToMany)
    }
}

///
/// EnumEncoding
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumEncoding {
    /// Stored as the variant position.
    Ordinal,
    /// Stored as the variant name.
    String,
}

///
/// TableNaming
/// default table name derived from the simple type name
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableNaming {
    #[default]
    LowerCamel,
    Snake,
}

impl TableNaming {
    #[must_use]
    pub fn table_name(self, ty: &Type) -> String {
        match self {
            Self::LowerCamel => ty.lower_camel_name(),
            Self::Snake => ty.snake_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_at_last_dot() {
        let ty = Type::parse("shop.orders.OrderLine");

        assert_eq!(ty.namespace, "shop.orders");
        assert_eq!(ty.name, "OrderLine");
        assert_eq!(ty.to_string(), "shop.orders.OrderLine");
    }

    #[test]
    fn bare_names_use_default_namespace() {
        let ty = Type::parse("Customer");

        assert_eq!(ty.namespace, DEFAULT_NAMESPACE);
        assert!(!ty.is_qualified());
    }

    #[test]
    fn primitive_round_trips_through_type() {
        let ty = Primitive::Int64.ty();

        assert_eq!(ty.qualified_name(), "core.Int64");
        assert_eq!(Primitive::from_type(&ty), Some(Primitive::Int64));
        assert_eq!(Primitive::from_type(&Type::new("shop", "Int64")), None);
    }

    #[test]
    fn table_naming_follows_case_policy() {
        let ty = Type::parse("shop.OrderLine");

        assert_eq!(TableNaming::LowerCamel.table_name(&ty), "orderLine");
        assert_eq!(TableNaming::Snake.table_name(&ty), "order_line");
    }

    #[test]
    fn type_deserializes_from_qualified_string() {
        #[derive(Deserialize)]
        struct Holder {
            ty: Type,
        }

        let holder: Holder = toml::from_str(r#"ty = "shop.Customer""#).expect("parse type");

        assert_eq!(holder.ty, Type::parse("shop.Customer"));
    }
}
