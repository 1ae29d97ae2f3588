use crate::types::{EnumEncoding, Type};
use serde::{Deserialize, Serialize};

///
/// PropertyDefinition
///
/// One column-backed field of an entity, an embedded value or a composite id.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyDefinition {
    pub name: String,
    pub column_name: String,
    pub nullable: bool,
    pub ty: Type,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converter: Option<ConverterDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enumerated: Option<EnumeratedDefinition>,

    /// Join column that coincides with this (key) column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_column: Option<String>,
}

impl PropertyDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, column_name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            column_name: column_name.into(),
            nullable: false,
            ty,
            converter: None,
            enumerated: None,
            shared_column: None,
        }
    }

    #[must_use]
    pub fn with_shared_column(self, column: impl Into<String>) -> Self {
        Self {
            shared_column: Some(column.into()),
            ..self
        }
    }

    #[must_use]
    pub const fn has_converter(&self) -> bool {
        self.converter.is_some()
    }

    #[must_use]
    pub const fn is_enumerated(&self) -> bool {
        self.enumerated.is_some()
    }

    /// Value mapping is handled by a converter or an enum encoding, so the
    /// declared type needs no builtin column support.
    #[must_use]
    pub const fn is_custom_mapped(&self) -> bool {
        self.has_converter() || self.is_enumerated()
    }
}

///
/// ConverterDefinition
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ConverterDefinition {
    pub name: String,

    /// Database-facing type produced by the converter.
    pub target_type: Type,

    /// Converter is a stateless singleton rather than a constructed instance.
    #[serde(default)]
    pub is_object: bool,
}

///
/// EnumeratedDefinition
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EnumeratedDefinition {
    pub encoding: EnumEncoding,
}
