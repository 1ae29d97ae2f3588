use super::{EntityValidator, Validation, ValidationContext};
use crate::{
    error::{SchemaError, ValidationError},
    node::{AssociationDefinition, EntityDefinition},
};

///
/// AssociationValidator
///
/// Targets must be mapped, and a `mapped_by` must name an owning
/// association on the target that points back at this entity.
///

pub struct AssociationValidator;

impl EntityValidator for AssociationValidator {
    fn name(&self) -> &'static str {
        "association"
    }

    fn validate(
        &self,
        entity: &EntityDefinition,
        ctx: &ValidationContext<'_>,
    ) -> Result<Validation, SchemaError> {
        let mut errors = Vec::new();

        for assoc in &entity.associations {
            let Some(target) = ctx.graphs.entity(&assoc.target) else {
                errors.push(ValidationError::AssociationTargetNotFound {
                    entity: entity.ty.clone(),
                    association: assoc.name.clone(),
                    target: assoc.target.clone(),
                });
                continue;
            };

            if let Some(mapped_by) = &assoc.mapped_by
                && !has_owner(target, mapped_by, assoc)
            {
                errors.push(ValidationError::MappedByWithoutOwner {
                    entity: entity.ty.clone(),
                    association: assoc.name.clone(),
                    target: assoc.target.clone(),
                    mapped_by: mapped_by.clone(),
                });
            }
        }

        Ok(Validation::from_errors(errors))
    }
}

fn has_owner(target: &EntityDefinition, mapped_by: &str, inverse: &AssociationDefinition) -> bool {
    target.association(mapped_by).is_some_and(|owner| {
        owner.mapped && owner.mapped_by.is_none() && owner.target == inverse.source
    })
}
