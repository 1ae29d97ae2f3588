use crate::{
    error::SchemaError,
    node::{EntityDefinition, IdDefinition},
    types::Type,
};
use derive_more::{Deref, DerefMut, IntoIterator};
use std::collections::{BTreeMap, BTreeSet};

///
/// EntityGraph
///
/// Entities of one namespace, keyed by type.
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Eq, IntoIterator, PartialEq)]
pub struct EntityGraph(#[into_iterator(owned, ref)] BTreeMap<Type, EntityDefinition>);

impl EntityGraph {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Visit every entity in type order.
    pub fn traverse(&self, mut visit: impl FnMut(&EntityDefinition)) {
        for entity in self.0.values() {
            visit(entity);
        }
    }

    #[must_use]
    pub fn all_association_targets(&self) -> BTreeSet<Type> {
        self.0
            .values()
            .flat_map(|entity| entity.associations.iter())
            .map(|assoc| assoc.target.clone())
            .collect()
    }
}

///
/// EntityGraphs
///
/// Every entity graph, keyed by namespace.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct EntityGraphs(#[into_iterator(owned, ref)] BTreeMap<String, EntityGraph>);

impl EntityGraphs {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn entity(&self, ty: &Type) -> Option<&EntityDefinition> {
        self.0.get(&ty.namespace)?.get(ty)
    }

    /// Entity of `ty`, failing when the type was never declared.
    pub fn require_entity(&self, ty: &Type) -> Result<&EntityDefinition, SchemaError> {
        self.entity(ty)
            .ok_or_else(|| SchemaError::EntityNotMapped { ty: ty.clone() })
    }

    /// Resolved id of `ty`.
    pub fn entity_id(&self, ty: &Type) -> Result<&IdDefinition, SchemaError> {
        self.require_entity(ty)?
            .id
            .as_ref()
            .ok_or_else(|| SchemaError::MissingId { entity: ty.clone() })
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityDefinition> {
        self.0.values().flat_map(|graph| graph.values())
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.0.values().map(|graph| graph.len()).sum()
    }

    #[must_use]
    pub fn contains(&self, ty: &Type) -> bool {
        self.entity(ty).is_some()
    }

    /// Insert or replace the entity keyed by its own type.
    pub fn insert_entity(&mut self, entity: EntityDefinition) {
        self.0
            .entry(entity.ty.namespace.clone())
            .or_default()
            .insert(entity.ty.clone(), entity);
    }

    /// Replace the entity of `ty` with the result of `update`.
    ///
    /// The update receives a copy, so a failing update leaves the graph
    /// untouched.
    pub fn update_entity<F>(&mut self, ty: &Type, update: F) -> Result<(), SchemaError>
    where
        F: FnOnce(EntityDefinition) -> Result<EntityDefinition, SchemaError>,
    {
        let current = self.require_entity(ty)?.clone();
        let updated = update(current)?;
        self.insert_entity(updated);

        Ok(())
    }

    #[must_use]
    pub fn all_association_targets(&self) -> BTreeSet<Type> {
        self.0
            .values()
            .flat_map(EntityGraph::all_association_targets)
            .collect()
    }
}
