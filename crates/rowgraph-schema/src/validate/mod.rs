//! Batch validation of declarations and finished entity graphs.
//!
//! Validators never stop at the first violation. A validator that fails
//! internally becomes one more entry instead of aborting the batch.

mod association;
mod id;
mod property;

pub use association::AssociationValidator;
pub use id::{IdPresenceValidator, IdTypeValidator};
pub use property::PropertyTypeValidator;

use crate::{
    config::BuildConfig,
    decl::SchemaDeclarations,
    error::{SchemaError, ValidationError, ValidationErrors},
    node::{EntityDefinition, EntityGraphs},
    types::Type,
};
use std::collections::BTreeSet;

///
/// Validation
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Validation {
    Valid,
    Invalid(Vec<ValidationError>),
}

impl Validation {
    /// `Valid` when `errors` is empty.
    #[must_use]
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }
}

///
/// ValidationContext
///

#[derive(Clone, Copy, Debug)]
pub struct ValidationContext<'a> {
    pub graphs: &'a EntityGraphs,
    pub config: &'a BuildConfig,
}

///
/// EntityValidator
///

pub trait EntityValidator {
    fn name(&self) -> &'static str;

    fn validate(
        &self,
        entity: &EntityDefinition,
        ctx: &ValidationContext<'_>,
    ) -> Result<Validation, SchemaError>;
}

/// Builtin validators in execution order.
#[must_use]
pub fn default_validators() -> Vec<Box<dyn EntityValidator>> {
    vec![
        Box::new(IdPresenceValidator),
        Box::new(IdTypeValidator),
        Box::new(PropertyTypeValidator),
        Box::new(AssociationValidator),
    ]
}

/// Run every validator over every entity, collecting all entries.
#[must_use]
pub fn validate_graphs(
    graphs: &EntityGraphs,
    config: &BuildConfig,
    validators: &[Box<dyn EntityValidator>],
) -> ValidationErrors {
    let ctx = ValidationContext { graphs, config };
    let mut errs = ValidationErrors::new();

    for entity in graphs.entities() {
        for validator in validators {
            match validator.validate(entity, &ctx) {
                Ok(Validation::Valid) => {}
                Ok(Validation::Invalid(entries)) => errs.extend(entries),
                Err(source) => errs.add(ValidationError::ValidatorFailed {
                    validator: validator.name(),
                    entity: entity.ty.clone(),
                    source,
                }),
            }
        }
    }

    errs
}

/// Checks run on raw declarations before any graph exists.
#[must_use]
pub fn validate_declarations(decls: &SchemaDeclarations) -> ValidationErrors {
    let mut seen = BTreeSet::<&Type>::new();
    let mut reported = BTreeSet::<&Type>::new();
    let mut errs = ValidationErrors::new();

    for decl in &decls.entities {
        if !seen.insert(&decl.ty) && reported.insert(&decl.ty) {
            errs.add(ValidationError::DuplicateEntity {
                entity: decl.ty.clone(),
            });
        }
    }

    errs
}

// Whether `ty`, or any type it aliases, satisfies `supported`.
pub(crate) fn resolves_to(ty: &Type, supported: &impl Fn(&Type) -> bool) -> bool {
    supported(ty)
        || ty
            .alias_of
            .as_deref()
            .is_some_and(|aliased| resolves_to(aliased, supported))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::EntityDeclaration;

    struct Failing;

    impl EntityValidator for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn validate(
            &self,
            entity: &EntityDefinition,
            _ctx: &ValidationContext<'_>,
        ) -> Result<Validation, SchemaError> {
            Err(SchemaError::MissingId {
                entity: entity.ty.clone(),
            })
        }
    }

    #[test]
    fn failing_validator_becomes_an_entry() {
        let mut graphs = EntityGraphs::new();
        graphs.insert_entity(EntityDefinition::new(Type::parse("shop.A"), "a"));
        graphs.insert_entity(EntityDefinition::new(Type::parse("shop.B"), "b"));

        let validators: Vec<Box<dyn EntityValidator>> = vec![Box::new(Failing)];
        let errs = validate_graphs(&graphs, &BuildConfig::default(), &validators);

        assert_eq!(errs.len(), 2);
        assert!(errs.iter().all(|err| matches!(
            err,
            ValidationError::ValidatorFailed {
                validator: "failing",
                ..
            }
        )));
    }

    #[test]
    fn duplicate_entities_are_reported_once() {
        let decls = SchemaDeclarations::new()
            .entity(EntityDeclaration::new("shop.A"))
            .entity(EntityDeclaration::new("shop.A"))
            .entity(EntityDeclaration::new("shop.A"))
            .entity(EntityDeclaration::new("shop.B"));

        let errs = validate_declarations(&decls).into_vec();

        assert_eq!(
            errs,
            vec![ValidationError::DuplicateEntity {
                entity: Type::parse("shop.A")
            }]
        );
    }

    #[test]
    fn alias_resolution_follows_the_chain() {
        let money = Type::parse("app.Money")
            .with_alias_of(Type::parse("app.Amount").with_alias_of(Type::parse("core.Decimal")));
        let is_decimal = |ty: &Type| ty.qualified_name() == "core.Decimal";

        assert!(resolves_to(&money, &is_decimal));
        assert!(!resolves_to(&Type::parse("app.Money"), &is_decimal));
    }
}
