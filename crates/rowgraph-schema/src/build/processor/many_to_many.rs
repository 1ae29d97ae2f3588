use super::{DeclarationProcessor, associations_of_kind, resolve_association};
use crate::{
    config::BuildConfig,
    decl::{AssociationDeclaration, SchemaDeclarations},
    error::SchemaError,
    node::{AssociationDefinition, EntityGraphs},
    types::{AssociationKind, Type},
};

///
/// ManyToManyProcessor
///
/// Join columns are stored as `[source_fk, target_fk]` on the join table.
/// An inverse side (`mapped_by`) reuses the owner's join table with the
/// columns swapped.
///

pub(crate) struct ManyToManyProcessor;

impl DeclarationProcessor for ManyToManyProcessor {
    fn name(&self) -> &'static str {
        "many_to_many"
    }

    fn process(
        &self,
        graphs: &mut EntityGraphs,
        decls: &SchemaDeclarations,
        _config: &BuildConfig,
    ) -> Result<(), SchemaError> {
        for (owner, decl) in associations_of_kind(decls, AssociationKind::ManyToMany) {
            let source_table = graphs.require_entity(&owner.ty)?.table.clone();
            let mut assoc = resolve_association(graphs, owner, decl)?;

            let (join_table, join_columns) = if let Some(mapped_by) = &decl.mapped_by {
                let target_table = graphs.require_entity(&decl.target)?.table.clone();
                let (table, mut columns) = join_layout(
                    owning_declaration(decls, decl, mapped_by),
                    &target_table,
                    mapped_by,
                    &decl.target,
                    &owner.ty,
                );
                columns.reverse();
                assoc.mapped = false;

                (table, columns)
            } else {
                join_layout(Some(decl), &source_table, &decl.name, &owner.ty, &decl.target)
            };

            assoc.join_table = Some(join_table);
            assoc.join_columns = join_columns;

            graphs.update_entity(&owner.ty, |entity| Ok(entity.with_association(assoc)))?;
        }

        Ok(())
    }
}

// Owning many-to-many declaration on the target named by `mapped_by`.
fn owning_declaration<'a>(
    decls: &'a SchemaDeclarations,
    inverse: &AssociationDeclaration,
    mapped_by: &str,
) -> Option<&'a AssociationDeclaration> {
    decls
        .entities
        .iter()
        .find(|entity| entity.ty == inverse.target)?
        .associations
        .iter()
        .find(|assoc| assoc.name == mapped_by && assoc.kind == AssociationKind::ManyToMany)
}

// Join table and `[source_fk, target_fk]` as seen from the owning side.
fn join_layout(
    owning: Option<&AssociationDeclaration>,
    owner_table: &str,
    assoc_name: &str,
    source: &Type,
    target: &Type,
) -> (String, Vec<String>) {
    let table = owning
        .and_then(|decl| decl.join_table.clone())
        .unwrap_or_else(|| format!("{owner_table}_{assoc_name}"));

    let columns = match owning {
        Some(decl) if decl.join_columns.len() == 2 => decl.join_columns.clone(),
        _ => {
            let (source_fk, target_fk) = AssociationDefinition::new(
                assoc_name,
                source.clone(),
                target.clone(),
                AssociationKind::ManyToMany,
            )
            .join_table_columns();

            vec![source_fk, target_fk]
        }
    };

    (table, columns)
}
