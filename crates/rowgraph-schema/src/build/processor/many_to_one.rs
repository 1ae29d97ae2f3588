use super::{
    DeclarationProcessor, associations_of_kind, attach_single_valued, foreign_key_columns,
    resolve_association,
};
use crate::{
    config::BuildConfig, decl::SchemaDeclarations, error::SchemaError, node::EntityGraphs,
    types::AssociationKind,
};

///
/// ManyToOneProcessor
///

pub(crate) struct ManyToOneProcessor;

impl DeclarationProcessor for ManyToOneProcessor {
    fn name(&self) -> &'static str {
        "many_to_one"
    }

    fn process(
        &self,
        graphs: &mut EntityGraphs,
        decls: &SchemaDeclarations,
        _config: &BuildConfig,
    ) -> Result<(), SchemaError> {
        for (owner, decl) in associations_of_kind(decls, AssociationKind::ManyToOne) {
            graphs.require_entity(&owner.ty)?;

            let mut assoc = resolve_association(graphs, owner, decl)?;
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
