use super::{EntityValidator, Validation, ValidationContext, resolves_to};
use crate::{
    error::{SchemaError, ValidationError},
    node::EntityDefinition,
    types::Type,
};

///
/// IdPresenceValidator
/// an id must exist, and may only be nullable when generated
///

pub struct IdPresenceValidator;

impl EntityValidator for IdPresenceValidator {
    fn name(&self) -> &'static str {
        "id_presence"
    }

    fn validate(
        &self,
        entity: &EntityDefinition,
        _ctx: &ValidationContext<'_>,
    ) -> Result<Validation, SchemaError> {
        let entity_ty = entity.ty.clone();

        let err = match &entity.id {
            None => Some(ValidationError::MissingId { entity: entity_ty }),
            Some(id) if id.nullable && !id.generated_value => {
                Some(ValidationError::NullableIdWithoutGeneratedValue { entity: entity_ty })
            }
            Some(_) => None,
        };

        Ok(Validation::from_errors(err.into_iter().collect()))
    }
}

///
/// IdTypeValidator
///
/// Id columns must use a supported id type unless a converter or enum
/// encoding maps them. Fails internally on an entity without an id.
///

pub struct IdTypeValidator;

impl EntityValidator for IdTypeValidator {
    fn name(&self) -> &'static str {
        "id_type"
    }

    fn validate(
        &self,
        entity: &EntityDefinition,
        ctx: &ValidationContext<'_>,
    ) -> Result<Validation, SchemaError> {
        let id = entity.id.as_ref().ok_or_else(|| SchemaError::MissingId {
            entity: entity.ty.clone(),
        })?;
        let supported = |ty: &Type| ctx.config.supports_id_type(ty);

        let errors = id
            .properties
            .iter()
            .filter(|prop| !prop.is_custom_mapped() && !resolves_to(&prop.ty, &supported))
            .map(|prop| ValidationError::IdTypeNotSupported {
                entity: entity.ty.clone(),
                ty: prop.ty.clone(),
            })
            .collect();

        Ok(Validation::from_errors(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::BuildConfig,
        node::{EntityGraphs, IdDefinition, PropertyDefinition},
        types::{Primitive, Type},
    };

    fn entity_with_id(ty: Type, nullable: bool, generated: bool) -> EntityDefinition {
        let mut prop = PropertyDefinition::new("id", "id", ty);
        prop.nullable = nullable;

        EntityDefinition::new(Type::parse("shop.Item"), "item")
            .with_id(IdDefinition::simple(prop, generated))
    }

    fn run(validator: &dyn EntityValidator, entity: &EntityDefinition) -> Result<Validation, SchemaError> {
        let graphs = EntityGraphs::new();
        let config = BuildConfig::default();
        let ctx = ValidationContext {
            graphs: &graphs,
            config: &config,
        };

        validator.validate(entity, &ctx)
    }

    #[test]
    fn nullable_id_requires_generated_value() {
        let bad = entity_with_id(Primitive::Int64.ty(), true, false);
        let good = entity_with_id(Primitive::Int64.ty(), true, true);

        assert_eq!(
            run(&IdPresenceValidator, &bad),
            Ok(Validation::Invalid(vec![
                ValidationError::NullableIdWithoutGeneratedValue {
                    entity: Type::parse("shop.Item")
                }
            ]))
        );
        assert_eq!(run(&IdPresenceValidator, &good), Ok(Validation::Valid));
    }

    #[test]
    fn unsupported_id_type_names_entity_and_type() {
        let entity = entity_with_id(Primitive::Float64.ty(), false, false);

        assert_eq!(
            run(&IdTypeValidator, &entity),
            Ok(Validation::Invalid(vec![ValidationError::IdTypeNotSupported {
                entity: Type::parse("shop.Item"),
                ty: Primitive::Float64.ty(),
            }]))
        );
    }

    #[test]
    fn aliased_id_type_is_accepted() {
        let alias = Type::parse("shop.Sku").with_alias_of(Primitive::Text.ty());
        let entity = entity_with_id(alias, false, false);

        assert_eq!(run(&IdTypeValidator, &entity), Ok(Validation::Valid));
    }

    #[test]
    fn missing_id_fails_internally() {
        let entity = EntityDefinition::new(Type::parse("shop.Item"), "item");

        assert!(matches!(
            run(&IdTypeValidator, &entity),
            Err(SchemaError::MissingId { .. })
        ));
    }
}
