use super::DeclarationProcessor;
use crate::{
    config::BuildConfig,
    decl::{AttributeOverride, IdDeclaration, PropertyDeclaration, SchemaDeclarations},
    error::SchemaError,
    node::{
        ConverterDefinition, EmbeddableDefinition, EntityGraphs, EnumeratedDefinition,
        IdDefinition, PropertyDefinition,
    },
    types::Type,
};

///
/// ColumnProcessor
///
/// Resolves ids, plain columns and embedded value objects.
///

pub(crate) struct ColumnProcessor;

impl DeclarationProcessor for ColumnProcessor {
    fn name(&self) -> &'static str {
        "column"
    }

    fn process(
        &self,
        graphs: &mut EntityGraphs,
        decls: &SchemaDeclarations,
        _config: &BuildConfig,
    ) -> Result<(), SchemaError> {
        for decl in &decls.entities {
            let owner = &decl.ty;

            let id = decl
                .id
                .as_ref()
                .map(|id| resolve_id(decls, owner, id))
                .transpose()?;

            let properties = decl
                .properties
                .iter()
                .map(|prop| resolve_property(decls, owner, prop, None))
                .collect::<Result<Vec<_>, _>>()?;

            let embeddables = decl
                .embedded
                .iter()
                .map(|embedded| {
                    let properties = resolve_embeddable_fields(
                        decls,
                        owner,
                        &embedded.property,
                        &embedded.embeddable,
                        &embedded.overrides,
                    )?;

                    Ok(EmbeddableDefinition {
                        property_name: embedded.property.clone(),
                        qualified_name: embedded.embeddable.qualified_name(),
                        nullable: embedded.nullable,
                        properties,
                    })
                })
                .collect::<Result<Vec<_>, SchemaError>>()?;

            graphs.update_entity(owner, |mut entity| {
                if let Some(id) = id {
                    entity = entity.with_id(id);
                }
                let entity = properties.into_iter().fold(entity, |e, p| e.with_property(p));

                Ok(embeddables
                    .into_iter()
                    .fold(entity, |e, emb| e.with_embeddable(emb)))
            })?;
        }

        Ok(())
    }
}

fn resolve_id(
    decls: &SchemaDeclarations,
    owner: &Type,
    decl: &IdDeclaration,
) -> Result<IdDefinition, SchemaError> {
    match decl {
        IdDeclaration::Single {
            property,
            generated,
        } => {
            let prop = resolve_property(decls, owner, property, None)?;

            Ok(IdDefinition::simple(prop, *generated))
        }

        IdDeclaration::Embedded {
            name,
            embeddable,
            nullable,
            generated,
            overrides,
        } => {
            // a generator needs exactly one plain column
            if *generated {
                return Err(SchemaError::GeneratedValueWithoutId {
                    entity: owner.clone(),
                    id: name.clone(),
                });
            }

            let properties = resolve_embeddable_fields(decls, owner, name, embeddable, overrides)?;

            Ok(IdDefinition {
                name: name.clone(),
                ty: embeddable.clone(),
                qualified_name: Some(embeddable.qualified_name()),
                properties,
                generated_value: false,
                nullable: *nullable,
                embedded: true,
                shared_assoc: None,
            })
        }
    }
}

fn resolve_embeddable_fields(
    decls: &SchemaDeclarations,
    owner: &Type,
    property: &str,
    embeddable: &Type,
    overrides: &[AttributeOverride],
) -> Result<Vec<PropertyDefinition>, SchemaError> {
    let decl =
        decls
            .find_embeddable(embeddable)
            .ok_or_else(|| SchemaError::EmbeddableTypeNotFound {
                entity: owner.clone(),
                property: property.to_string(),
                embeddable: embeddable.clone(),
            })?;

    decl.fields
        .iter()
        .map(|field| {
            let column = overrides
                .iter()
                .find(|o| o.name == field.name)
                .map(|o| o.column.as_str());

            resolve_property(decls, owner, field, column)
        })
        .collect()
}

fn resolve_property(
    decls: &SchemaDeclarations,
    owner: &Type,
    decl: &PropertyDeclaration,
    column_override: Option<&str>,
) -> Result<PropertyDefinition, SchemaError> {
    let column = column_override.unwrap_or_else(|| decl.column_name());

    let converter = decl
        .converter
        .as_ref()
        .map(|converter| resolve_converter(decls, owner, &decl.name, converter))
        .transpose()?;

    Ok(PropertyDefinition {
        name: decl.name.clone(),
        column_name: column.to_string(),
        nullable: decl.nullable,
        ty: decl.ty.clone(),
        converter,
        enumerated: decl
            .enumerated
            .map(|encoding| EnumeratedDefinition { encoding }),
        shared_column: None,
    })
}

fn resolve_converter(
    decls: &SchemaDeclarations,
    owner: &Type,
    property: &str,
    converter: &Type,
) -> Result<ConverterDefinition, SchemaError> {
    let not_found = || SchemaError::ConverterTypeNotFound {
        entity: owner.clone(),
        property: property.to_string(),
        converter: converter.clone(),
    };

    let decl = decls.find_converter(converter).ok_or_else(not_found)?;
    let target_type = decl.database_column.clone().ok_or_else(not_found)?;

    Ok(ConverterDefinition {
        name: converter.qualified_name(),
        target_type,
        is_object: decl.is_object,
    })
}
