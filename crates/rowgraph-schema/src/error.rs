use crate::types::Type;
use std::fmt;
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Fatal structural problem raised by a declaration processor.
/// The declarative input is inconsistent and cannot be partially repaired.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum SchemaError {
    #[error("association '{association}' of entity '{entity}' targets '{target}', which is not a mapped entity")]
    AssociationTargetNotFound {
        entity: Type,
        association: String,
        target: Type,
    },

    #[error("converter '{converter}' used by '{entity}.{property}' declares no database column type")]
    ConverterTypeNotFound {
        entity: Type,
        property: String,
        converter: Type,
    },

    #[error("embeddable type '{embeddable}' used by '{entity}.{property}' is not declared")]
    EmbeddableTypeNotFound {
        entity: Type,
        property: String,
        embeddable: Type,
    },

    #[error("type '{ty}' is not mapped as an entity")]
    EntityNotMapped { ty: Type },

    #[error("generated value on '{entity}.{id}' requires a single non-embedded id column")]
    GeneratedValueWithoutId { entity: Type, id: String },

    #[error("entity '{entity}' id type '{ty}' is unsupported, use a property converter instead")]
    IdTypeNotSupported { entity: Type, ty: Type },

    #[error("no id field specified for entity '{entity}'")]
    MissingId { entity: Type },

    #[error("entity '{entity}' has unsupported type '{ty}' on property '{property}'")]
    PropertyTypeNotSupported {
        entity: Type,
        property: String,
        ty: Type,
    },
}

///
/// ValidationError
///
/// One rule violation found on a finished (or pre-processing) graph.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum ValidationError {
    #[error("association '{association}' of entity '{entity}' targets unmapped type '{target}'")]
    AssociationTargetNotFound {
        entity: Type,
        association: String,
        target: Type,
    },

    #[error("entity '{entity}' is declared more than once")]
    DuplicateEntity { entity: Type },

    #[error("entity '{entity}' id type '{ty}' is unsupported, use a property converter instead")]
    IdTypeNotSupported { entity: Type, ty: Type },

    #[error("association '{association}' of entity '{entity}' is mapped by '{mapped_by}', which is not an owning association on '{target}'")]
    MappedByWithoutOwner {
        entity: Type,
        association: String,
        target: Type,
        mapped_by: String,
    },

    #[error("no id field specified for entity '{entity}'")]
    MissingId { entity: Type },

    #[error("nullable id field without a generated value specified for entity '{entity}'")]
    NullableIdWithoutGeneratedValue { entity: Type },

    #[error("entity '{entity}' has unsupported type '{ty}' on property '{property}'")]
    PropertyTypeNotSupported {
        entity: Type,
        property: String,
        ty: Type,
    },

    #[error("validator '{validator}' failed on entity '{entity}': {source}")]
    ValidatorFailed {
        validator: &'static str,
        entity: Type,
        source: SchemaError,
    },
}

impl ValidationError {
    /// Entity the violation was reported against.
    #[must_use]
    pub const fn entity(&self) -> &Type {
        match self {
            Self::AssociationTargetNotFound { entity, .. }
            | Self::DuplicateEntity { entity }
            | Self::IdTypeNotSupported { entity, .. }
            | Self::MappedByWithoutOwner { entity, .. }
            | Self::MissingId { entity }
            | Self::NullableIdWithoutGeneratedValue { entity }
            | Self::PropertyTypeNotSupported { entity, .. }
            | Self::ValidatorFailed { entity, .. } => entity,
        }
    }
}

///
/// ValidationErrors
///
/// Aggregate of every violation found in one build attempt.
/// Validation never stops at the first entry.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }

    /// `Ok(())` when nothing was collected.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s)", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n  - {err}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
