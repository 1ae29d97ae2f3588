use super::{EntityValidator, Validation, ValidationContext, resolves_to};
use crate::{
    error::{SchemaError, ValidationError},
    node::EntityDefinition,
    types::Type,
};

///
/// PropertyTypeValidator
///
/// Plain and embedded columns must use a supported type, directly or
/// through an alias, unless a converter or enum encoding maps them.
///

pub struct PropertyTypeValidator;

impl EntityValidator for PropertyTypeValidator {
    fn name(&self) -> &'static str {
        "property_type"
    }

    fn validate(
        &self,
        entity: &EntityDefinition,
        ctx: &ValidationContext<'_>,
    ) -> Result<Validation, SchemaError> {
        let supported = |ty: &Type| ctx.config.supports_property_type(ty);

        let embedded = entity.embeddables.iter().flat_map(|emb| emb.properties.iter());
        let errors = entity
            .properties
            .iter()
            .chain(embedded)
            .filter(|prop| !prop.is_custom_mapped() && !resolves_to(&prop.ty, &supported))
            .map(|prop| ValidationError::PropertyTypeNotSupported {
                entity: entity.ty.clone(),
                property: prop.name.clone(),
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
        node::{
            ConverterDefinition, EntityGraphs, EnumeratedDefinition, PropertyDefinition,
        },
        types::{EnumEncoding, Primitive, Type},
    };

    fn validate(entity: &EntityDefinition, config: &BuildConfig) -> Validation {
        let graphs = EntityGraphs::new();
        let ctx = ValidationContext {
            graphs: &graphs,
            config,
        };

        PropertyTypeValidator
            .validate(entity, &ctx)
            .expect("property validation never fails internally")
    }

    #[test]
    fn every_unsupported_property_is_reported() {
        let entity = EntityDefinition::new(Type::parse("shop.Item"), "item")
            .with_property(PropertyDefinition::new("name", "name", Primitive::Text.ty()))
            .with_property(PropertyDefinition::new("price", "price", Type::parse("shop.Money")))
            .with_property(PropertyDefinition::new("tags", "tags", Type::parse("shop.Tags")));

        let Validation::Invalid(errors) = validate(&entity, &BuildConfig::default()) else {
            panic!("two properties are unsupported");
        };

        assert_eq!(errors.len(), 2);
        assert!(matches!(
            &errors[0],
            ValidationError::PropertyTypeNotSupported { property, .. } if property == "price"
        ));
    }

    #[test]
    fn converters_enums_and_extras_are_exempt() {
        let mut price = PropertyDefinition::new("price", "price", Type::parse("shop.Money"));
        price.converter = Some(ConverterDefinition {
            name: "shop.MoneyConverter".into(),
            target_type: Primitive::Decimal.ty(),
            is_object: true,
        });
        let mut tier = PropertyDefinition::new("tier", "tier", Type::parse("shop.Tier"));
        tier.enumerated = Some(EnumeratedDefinition {
            encoding: EnumEncoding::Ordinal,
        });
        let tags = PropertyDefinition::new("tags", "tags", Type::parse("shop.Tags"));

        let entity = EntityDefinition::new(Type::parse("shop.Item"), "item")
            .with_property(price)
            .with_property(tier)
            .with_property(tags);
        let config = BuildConfig {
            extra_property_types: vec!["shop.Tags".into()],
            ..BuildConfig::default()
        };

        assert_eq!(validate(&entity, &config), Validation::Valid);
    }
}
