//! Row hydration: one traversal skeleton, two merge policies.
//!
//! Per entity type the hydrator runs a base pass (one instance per distinct
//! root id), a single-valued pass, a collection pass and a finalization
//! through the [`MergePolicy`]. A type that is already being hydrated higher
//! up the call serves its in-progress base instances instead of recursing,
//! which bounds self references and cyclic type graphs to one level.

mod copied;
mod policy;
mod real;


pub use copied::CopiedReferences;
pub use policy::{MergePolicy, Resolved, ResolvedList, ResolvedSingle};
pub use real::RealReferences;

use crate::{
    error::HydrationError,
    key::Key,
    model::{BaseRecord, Entity, Node, NodeId, ObjectGraph},
    row::Row,
    value::Value,
};
use rowgraph_schema::{
    node::{AssociationDefinition, EntityDefinition, EntityGraphs},
    types::{AssociationKind, Type},
    visit::reachable,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// HydrationStrategy
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HydrationStrategy {
    /// Owned trees, required joins enforced.
    #[default]
    Copied,

    /// Shared arena, instance identity preserved.
    Real,
}

///
/// RealHydration
///

#[derive(Clone, Debug, Default)]
pub struct RealHydration {
    pub graph: ObjectGraph,
    pub roots: BTreeMap<Key, NodeId>,
}

impl RealHydration {
    #[must_use]
    pub fn root(&self, key: &Key) -> Option<&Node> {
        self.graph.get(*self.roots.get(key)?)
    }
}

///
/// Hydrated
///

#[derive(Clone, Debug)]
pub enum Hydrated {
    Copied(BTreeMap<Key, Entity>),
    Real(RealHydration),
}

impl Hydrated {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Copied(roots) => roots.len(),
            Self::Real(real) => real.roots.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Root ids in key order.
    #[must_use]
    pub fn keys(&self) -> Vec<Key> {
        match self {
            Self::Copied(roots) => roots.keys().cloned().collect(),
            Self::Real(real) => real.roots.keys().cloned().collect(),
        }
    }

    /// Base field of a root, whatever the strategy.
    #[must_use]
    pub fn field(&self, key: &Key, name: &str) -> Option<&Value> {
        match self {
            Self::Copied(roots) => roots.get(key)?.field(name),
            Self::Real(real) => real.root(key)?.field(name),
        }
    }
}

/// Hydrate `root` instances from `rows` with the given strategy.
pub fn hydrate(
    strategy: HydrationStrategy,
    graphs: &EntityGraphs,
    root: &Type,
    rows: &[Row],
) -> Result<Hydrated, HydrationError> {
    match strategy {
        HydrationStrategy::Copied => hydrate_copied(graphs, root, rows).map(Hydrated::Copied),
        HydrationStrategy::Real => hydrate_real(graphs, root, rows).map(Hydrated::Real),
    }
}

pub fn hydrate_copied(
    graphs: &EntityGraphs,
    root: &Type,
    rows: &[Row],
) -> Result<BTreeMap<Key, Entity>, HydrationError> {
    let (roots, _) = Hydrator::new(graphs, rows, CopiedReferences).run(root)?;

    Ok(roots)
}

pub fn hydrate_real(
    graphs: &EntityGraphs,
    root: &Type,
    rows: &[Row],
) -> Result<RealHydration, HydrationError> {
    let (roots, policy) = Hydrator::new(graphs, rows, RealReferences::new()).run(root)?;

    Ok(RealHydration {
        graph: policy.into_graph(),
        roots,
    })
}

///
/// Hydrator
///
/// One hydration call over one row slice. Results are memoized per type
/// for the duration of the call.
///

pub struct Hydrator<'a, P: MergePolicy> {
    graphs: &'a EntityGraphs,
    rows: &'a [Row],
    policy: P,
    in_progress: BTreeMap<Type, BTreeMap<Key, P::Handle>>,
    finished: BTreeMap<Type, BTreeMap<Key, P::Handle>>,
}

impl<'a, P: MergePolicy> Hydrator<'a, P> {
    #[must_use]
    pub const fn new(graphs: &'a EntityGraphs, rows: &'a [Row], policy: P) -> Self {
        Self {
            graphs,
            rows,
            policy,
            in_progress: BTreeMap::new(),
            finished: BTreeMap::new(),
        }
    }

    /// Hydrate `root`, returning its instances and the spent policy.
    pub fn run(mut self, root: &Type) -> Result<(BTreeMap<Key, P::Handle>, P), HydrationError> {
        self.check_reachable(root)?;

        let roots = self.hydrate_type(root)?;
        tracing::debug!(
            root = %root,
            rows = self.rows.len(),
            instances = roots.len(),
            "hydration finished"
        );

        Ok((roots, self.policy))
    }

    // Every type the traversal can reach must be mapped and have an id.
    fn check_reachable(&self, root: &Type) -> Result<(), HydrationError> {
        let types = reachable(self.graphs, root);
        if types.is_empty() {
            return Err(HydrationError::EntityNotMapped { ty: root.clone() });
        }

        for ty in &types {
            id_columns(self.entity(ty)?)?;
        }

        Ok(())
    }

    fn entity(&self, ty: &Type) -> Result<&'a EntityDefinition, HydrationError> {
        self.graphs
            .entity(ty)
            .ok_or_else(|| HydrationError::EntityNotMapped { ty: ty.clone() })
    }

    // Instances of `ty` to link against: in-progress bases when `ty` is
    // already being hydrated, otherwise a full (memoized) hydration.
    fn foreign_table(&mut self, ty: &Type) -> Result<BTreeMap<Key, P::Handle>, HydrationError> {
        match self.in_progress.get(ty) {
            Some(bases) => Ok(bases.clone()),
            None => self.hydrate_type(ty),
        }
    }

    fn hydrate_type(&mut self, ty: &Type) -> Result<BTreeMap<Key, P::Handle>, HydrationError> {
        if let Some(done) = self.finished.get(ty) {
            return Ok(done.clone());
        }

        let entity = self.entity(ty)?;
        let table = entity.table.as_str();
        let root_columns = id_columns(entity)?;
        let rows = self.rows;

        // Phase 1: one base instance per distinct root id.
        let mut bases = BTreeMap::new();
        for row in rows {
            let Some(key) = row.key(table, &root_columns) else {
                continue;
            };
            if !bases.contains_key(&key) {
                let handle = self.policy.create(BaseRecord::read(entity, row, key.clone()));
                bases.insert(key, handle);
            }
        }
        self.in_progress.insert(ty.clone(), bases.clone());

        let mut resolved: BTreeMap<Key, Resolved<P::Handle>> =
            bases.keys().map(|key| (key.clone(), Resolved::default())).collect();

        // Phase 2: single-valued associations.
        for assoc in entity.associations.iter().filter(|a| has_single_slot(a)) {
            let mut found = self.resolve_single(entity, &root_columns, assoc)?;

            for (key, res) in &mut resolved {
                res.singles.push(ResolvedSingle {
                    association: assoc.name.clone(),
                    nullable: assoc.nullable,
                    target: found.remove(key),
                });
            }
        }

        // Phase 3: collections, grouped per root and deduplicated.
        for assoc in entity.associations.iter().filter(|a| a.kind.is_collection()) {
            let mut grouped = self.resolve_list(entity, &root_columns, assoc)?;

            if let (AssociationKind::OneToMany, Some(slot)) = (assoc.kind, &assoc.mapped_by) {
                for (owner, children) in &mut grouped {
                    let Some(parent) = bases.get(owner) else {
                        continue;
                    };
                    *children = std::mem::take(children)
                        .into_iter()
                        .map(|child| self.policy.back_reference(child, slot, parent))
                        .collect();
                }
            }

            for (key, res) in &mut resolved {
                res.lists.push(ResolvedList {
                    association: assoc.name.clone(),
                    targets: grouped.remove(key).unwrap_or_default(),
                });
            }
        }

        // Phase 4: finalize through the policy.
        self.in_progress.remove(ty);

        let mut finished = BTreeMap::new();
        for (key, base) in bases {
            let res = resolved.remove(&key).unwrap_or_default();
            let handle = self.policy.finish(entity, base, res)?;
            finished.insert(key, handle);
        }

        tracing::trace!(entity = %ty, instances = finished.len(), "hydrated entity type");
        self.finished.insert(ty.clone(), finished.clone());

        Ok(finished)
    }

    // Target per root id for one single-valued association. The owning side
    // reads the foreign key from the root table, the inverse side reads the
    // target's own id.
    fn resolve_single(
        &mut self,
        entity: &EntityDefinition,
        root_columns: &[&str],
        assoc: &AssociationDefinition,
    ) -> Result<BTreeMap<Key, P::Handle>, HydrationError> {
        let target = self.entity(&assoc.target)?;
        let target_columns = id_columns(target)?;
        let foreign = self.foreign_table(&assoc.target)?;

        let mut found = BTreeMap::new();
        for row in self.rows {
            let Some(root) = row.key(&entity.table, root_columns) else {
                continue;
            };
            let fk = if assoc.mapped {
                row.key(&entity.table, &assoc.join_columns)
            } else {
                row.key(&target.table, &target_columns)
            };

            if let Some(handle) = fk.and_then(|fk| foreign.get(&fk)) {
                found.entry(root).or_insert_with(|| handle.clone());
            }
        }

        Ok(found)
    }

    // Targets per owner id for one collection, in first-seen order.
    fn resolve_list(
        &mut self,
        entity: &EntityDefinition,
        root_columns: &[&str],
        assoc: &AssociationDefinition,
    ) -> Result<BTreeMap<Key, Vec<P::Handle>>, HydrationError> {
        let target = self.entity(&assoc.target)?;
        let target_columns = id_columns(target)?;
        let foreign = self.foreign_table(&assoc.target)?;
        let table = entity.table.as_str();

        let mut grouped: BTreeMap<Key, Vec<Key>> = BTreeMap::new();
        for row in self.rows {
            let (owner, child) = match assoc.kind {
                // a self-referencing row is the child, grouped by its parent key
                AssociationKind::OneToMany if assoc.is_self_referential() => (
                    row.key(table, &assoc.join_columns),
                    row.key(table, root_columns),
                ),
                AssociationKind::OneToMany => (
                    row.key(table, root_columns),
                    row.key(&target.table, &target_columns),
                ),
                AssociationKind::ManyToMany => (
                    row.key(table, root_columns),
                    join_table_target(row, assoc),
                ),
                AssociationKind::ManyToOne | AssociationKind::OneToOne => continue,
            };
            let (Some(owner), Some(child)) = (owner, child) else {
                continue;
            };

            let children = grouped.entry(owner).or_default();
            if !children.contains(&child) {
                children.push(child);
            }
        }

        Ok(grouped
            .into_iter()
            .map(|(owner, keys)| {
                let handles = keys
                    .iter()
                    .filter_map(|key| foreign.get(key).cloned())
                    .collect();

                (owner, handles)
            })
            .collect())
    }
}

// Id column names of `entity`, failing when it has no id.
fn id_columns(entity: &EntityDefinition) -> Result<Vec<&str>, HydrationError> {
    let columns = entity.id_columns();
    if columns.is_empty() {
        return Err(HydrationError::MissingId {
            entity: entity.ty.clone(),
        });
    }

    Ok(columns)
}

// Synthesized inverse associations are metadata only.
const fn has_single_slot(assoc: &AssociationDefinition) -> bool {
    assoc.kind.is_single_valued() && (assoc.mapped || assoc.mapped_by.is_some())
}

// Target id of a many-to-many row, read from the join table's target column.
fn join_table_target(row: &Row, assoc: &AssociationDefinition) -> Option<Key> {
    let join_table = assoc.join_table.as_deref()?;
    let (_, target_columns) = assoc.join_columns.split_first()?;

    row.key(join_table, target_columns)
}
