//! Declaration processors, run in a fixed order by the builder.
//!
//! Each later stage reads identifier information published by an earlier
//! one: an association cannot capture its target id before the column
//! stage has resolved that id.

mod column;
mod inverse;
mod many_to_many;
mod many_to_one;
mod one_to_many;
mod one_to_one;

use crate::{
    config::BuildConfig,
    decl::{AssociationDeclaration, EntityDeclaration, SchemaDeclarations},
    error::SchemaError,
    node::{AssociationDefinition, EntityDefinition, EntityGraphs, IdDefinition},
    types::AssociationKind,
};

pub(crate) use column::ColumnProcessor;
pub(crate) use inverse::InverseAssociationProcessor;
pub(crate) use many_to_many::ManyToManyProcessor;
pub(crate) use many_to_one::ManyToOneProcessor;
pub(crate) use one_to_many::OneToManyProcessor;
pub(crate) use one_to_one::OneToOneProcessor;

///
/// DeclarationProcessor
///

pub(crate) trait DeclarationProcessor {
    fn name(&self) -> &'static str;

    fn process(
        &self,
        graphs: &mut EntityGraphs,
        decls: &SchemaDeclarations,
        config: &BuildConfig,
    ) -> Result<(), SchemaError>;
}

/// Processors in execution order.
pub(crate) const PIPELINE: &[&dyn DeclarationProcessor] = &[
    &ColumnProcessor,
    &ManyToOneProcessor,
    &ManyToManyProcessor,
    &OneToOneProcessor,
    &OneToManyProcessor,
    &InverseAssociationProcessor,
];

/// Association declarations of one kind, paired with their owner.
pub(super) fn associations_of_kind(
    decls: &SchemaDeclarations,
    kind: AssociationKind,
) -> impl Iterator<Item = (&EntityDeclaration, &AssociationDeclaration)> {
    decls.entities.iter().flat_map(move |entity| {
        entity
            .associations
            .iter()
            .filter(move |assoc| assoc.kind == kind)
            .map(move |assoc| (entity, assoc))
    })
}

/// Skeleton association carrying the captured target id.
pub(super) fn resolve_association(
    graphs: &EntityGraphs,
    owner: &EntityDeclaration,
    decl: &AssociationDeclaration,
) -> Result<AssociationDefinition, SchemaError> {
    let target_id = graphs.entity_id(&decl.target)?.clone();

    let mut assoc = AssociationDefinition::new(
        decl.name.clone(),
        owner.ty.clone(),
        decl.target.clone(),
        decl.kind,
    );
    assoc.nullable = decl.nullable;
    assoc.mapped_by.clone_from(&decl.mapped_by);
    assoc.target_id = Some(target_id);

    Ok(assoc)
}

/// Default foreign-key columns pointing at `id`, one per id property.
pub(super) fn foreign_key_columns(prefix: &str, id: &IdDefinition) -> Vec<String> {
    id.properties
        .iter()
        .map(|prop| format!("{prefix}_{}", prop.name))
        .collect()
}

/// Link the owner id and `assoc` when an id column is also a join column.
///
/// Returns the owner with its id annotated and the association with
/// `shared_id` set; both are unchanged when no column coincides.
pub(super) fn link_shared_key(
    mut entity: EntityDefinition,
    mut assoc: AssociationDefinition,
) -> (EntityDefinition, AssociationDefinition) {
    let Some(id) = entity.id.as_mut() else {
        return (entity, assoc);
    };

    let mut shared = false;
    for prop in &mut id.properties {
        if assoc.join_columns.contains(&prop.column_name) {
            prop.shared_column = Some(prop.column_name.clone());
            shared = true;
        }
    }

    if shared {
        id.shared_assoc = Some(assoc.name.clone());
        assoc.shared_id = Some(id.name.clone());

        tracing::debug!(
            entity = %entity.ty,
            association = %assoc.name,
            "id shares its column with a join column"
        );
    }

    (entity, assoc)
}

/// Add a resolved owning-side single-valued association to its owner.
pub(super) fn attach_single_valued(
    graphs: &mut EntityGraphs,
    assoc: AssociationDefinition,
) -> Result<(), SchemaError> {
    let owner = assoc.source.clone();

    graphs.update_entity(&owner, |entity| {
        let (entity, assoc) = link_shared_key(entity, assoc);

        Ok(entity.with_association(assoc))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        node::PropertyDefinition,
        types::{Primitive, Type},
    };

    #[test]
    fn shared_key_links_id_and_association() {
        let employee = Type::parse("hr.Employee");
        let passport = Type::parse("hr.Passport");

        let entity = EntityDefinition::new(passport.clone(), "passport").with_id(
            IdDefinition::simple(
                PropertyDefinition::new("employeeId", "employee_id", Primitive::Int64.ty()),
                false,
            ),
        );
        let mut assoc =
            AssociationDefinition::new("employee", passport, employee, AssociationKind::OneToOne);
        assoc.join_columns = vec!["employee_id".into()];

        let (entity, assoc) = link_shared_key(entity, assoc);
        let id = entity.id.expect("id should survive linking");

        assert_eq!(id.shared_assoc.as_deref(), Some("employee"));
        assert_eq!(
            id.properties[0].shared_column.as_deref(),
            Some("employee_id")
        );
        assert_eq!(assoc.shared_id.as_deref(), Some("employeeId"));
    }

    #[test]
    fn unrelated_join_column_is_not_shared() {
        let phone = Type::parse("shop.Phone");
        let entity = EntityDefinition::new(phone.clone(), "phone").with_id(IdDefinition::simple(
            PropertyDefinition::new("id", "id", Primitive::Int64.ty()),
            true,
        ));
        let mut assoc = AssociationDefinition::new(
            "customer",
            phone,
            Type::parse("shop.Customer"),
            AssociationKind::ManyToOne,
        );
        assoc.join_columns = vec!["customer_id".into()];

        let (entity, assoc) = link_shared_key(entity, assoc);

        assert!(entity.id.is_some_and(|id| id.shared_assoc.is_none()));
        assert!(assoc.shared_id.is_none());
    }
}
