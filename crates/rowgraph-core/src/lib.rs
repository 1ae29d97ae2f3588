//! Row hydration for rowgraph: values, keys and flat rows in, deduplicated
//! and linked entity instances out.
//!
//! Two strategies share one traversal: copy semantics produce owned
//! [`Entity`](model::Entity) trees, real-reference semantics produce one
//! shared [`ObjectGraph`](model::ObjectGraph) arena.

pub mod error;
pub mod hydrate;
pub mod key;
pub mod model;
pub mod row;
pub mod value;

#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        error::HydrationError,
        hydrate::{
            Hydrated, HydrationStrategy, RealHydration, hydrate, hydrate_copied, hydrate_real,
        },
        key::Key,
        model::{Entity, Node, NodeId, ObjectGraph, Slot},
        row::Row,
        value::Value,
    };
}
