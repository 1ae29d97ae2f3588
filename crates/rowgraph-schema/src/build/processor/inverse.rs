use super::DeclarationProcessor;
use crate::{
    config::BuildConfig,
    decl::SchemaDeclarations,
    error::SchemaError,
    node::{AssociationDefinition, EntityGraphs},
    types::AssociationKind,
};

///
/// InverseAssociationProcessor
///
/// For every one-to-many whose target has no single-valued association
/// back to the source, adds an unmapped many-to-one on the target named
/// after the source type.
///

pub(crate) struct InverseAssociationProcessor;

impl DeclarationProcessor for InverseAssociationProcessor {
    fn name(&self) -> &'static str {
        "inverse_association"
    }

    fn process(
        &self,
        graphs: &mut EntityGraphs,
        _decls: &SchemaDeclarations,
        _config: &BuildConfig,
    ) -> Result<(), SchemaError> {
        let one_to_many: Vec<AssociationDefinition> = graphs
            .entities()
            .flat_map(|entity| entity.associations_of(&[AssociationKind::OneToMany]))
            .cloned()
            .collect();

        for o2m in one_to_many {
            let target = graphs.require_entity(&o2m.target)?;
            let name = o2m.source.lower_camel_name();

            let has_inverse = target
                .associations_of(&[AssociationKind::ManyToOne, AssociationKind::OneToOne])
                .any(|assoc| assoc.target == o2m.source);
            if has_inverse || target.association(&name).is_some() {
                continue;
            }

            let mut inverse = AssociationDefinition::new(
                name,
                o2m.target.clone(),
                o2m.source.clone(),
                AssociationKind::ManyToOne,
            );
            inverse.mapped = false;
            inverse.nullable = true;
            inverse.join_columns.clone_from(&o2m.join_columns);
            inverse.target_id = Some(graphs.entity_id(&o2m.source)?.clone());

            tracing::debug!(
                entity = %o2m.target,
                association = %inverse.name,
                source = %o2m.source,
                "synthesized inverse many-to-one"
            );

            graphs.update_entity(&o2m.target, |entity| Ok(entity.with_association(inverse)))?;
        }

        Ok(())
    }
}
