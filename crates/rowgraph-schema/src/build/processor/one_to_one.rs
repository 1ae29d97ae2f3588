use super::{
    DeclarationProcessor, associations_of_kind, attach_single_valued, foreign_key_columns,
    resolve_association,
};
use crate::{
    config::BuildConfig, decl::SchemaDeclarations, error::SchemaError, node::EntityGraphs,
    types::AssociationKind,
};

///
/// OneToOneProcessor
///
/// The owning side gets join columns and shared-key detection. A side
/// declared with `mapped_by` is the inverse side and holds no column.
///

pub(crate) struct OneToOneProcessor;

impl DeclarationProcessor for OneToOneProcessor {
    fn name(&self) -> &'static str {
        "one_to_one"
    }

    fn process(
        &self,
        graphs: &mut EntityGraphs,
        decls: &SchemaDeclarations,
        _config: &BuildConfig,
    ) -> Result<(), SchemaError> {
        for (owner, decl) in associations_of_kind(decls, AssociationKind::OneToOne) {
            graphs.require_entity(&owner.ty)?;

            let mut assoc = resolve_association(graphs, owner, decl)?;

            if assoc.is_inverse() {
                assoc.mapped = false;
                graphs.update_entity(&owner.ty, |entity| Ok(entity.with_association(assoc)))?;
                continue;
            }

            assoc.join_columns = if decl.join_columns.is_empty() {
                assoc
                    .target_id
                    .as_ref()
                    .map(|id| foreign_key_columns(&decl.name, id))
                    .unwrap_or_default()
            } else {
                decl.join_columns.clone()
            };

            attach_single_valued(graphs, assoc)?;
        }

        Ok(())
    }
}
