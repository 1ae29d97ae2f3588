use super::{DeclarationProcessor, associations_of_kind, foreign_key_columns, resolve_association};
use crate::{
    config::BuildConfig, decl::SchemaDeclarations, error::SchemaError, node::EntityGraphs,
    types::AssociationKind,
};

///
/// OneToManyProcessor
///
/// The foreign key lives on the target table. Without an override it is
/// copied from the target's `mapped_by` association, or defaults to
/// `<lowerCamel(source)>_<sourceIdName>`.
///

pub(crate) struct OneToManyProcessor;

impl DeclarationProcessor for OneToManyProcessor {
    fn name(&self) -> &'static str {
        "one_to_many"
    }

    fn process(
        &self,
        graphs: &mut EntityGraphs,
        decls: &SchemaDeclarations,
        _config: &BuildConfig,
    ) -> Result<(), SchemaError> {
        for (owner, decl) in associations_of_kind(decls, AssociationKind::OneToMany) {
            graphs.require_entity(&owner.ty)?;

            let mut assoc = resolve_association(graphs, owner, decl)?;
            assoc.mapped = decl.mapped_by.is_none();

            let inverse_columns = decl
                .mapped_by
                .as_deref()
                .and_then(|name| graphs.entity(&decl.target)?.association(name))
                .map(|inverse| inverse.join_columns.clone())
                .filter(|columns| !columns.is_empty());

            assoc.join_columns = if !decl.join_columns.is_empty() {
                decl.join_columns.clone()
            } else if let Some(columns) = inverse_columns {
                columns
            } else {
                let source_id = graphs.entity_id(&owner.ty)?;

                foreign_key_columns(&owner.ty.lower_camel_name(), source_id)
            };

            graphs.update_entity(&owner.ty, |entity| Ok(entity.with_association(assoc)))?;
        }

        Ok(())
    }
}
