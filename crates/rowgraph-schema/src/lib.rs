//! Declarative entity schema for rowgraph: the type/identity model, the
//! declaration processors, the entity graph builder and its validator.
//!
//! A [`SchemaSupplier`](supplier::SchemaSupplier) provides raw declarations,
//! [`EntityGraphBuilder`](build::EntityGraphBuilder) enriches them into
//! [`EntityGraphs`](node::EntityGraphs), and downstream consumers (emitters,
//! the row hydrator) only ever read the finished graph.

pub mod build;
pub mod config;
pub mod decl;
pub mod emit;
pub mod error;
pub mod node;
pub mod supplier;
pub mod types;
pub mod validate;
pub mod visit;

#[cfg(test)]
pub(crate) mod test_fixtures;

/// Namespace used for entities declared without a qualified name.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Namespace holding the builtin scalar types.
pub const PRIMITIVE_NAMESPACE: &str = "core";

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::{EntityGraphBuilder, build_entity_graphs},
        config::BuildConfig,
        decl::*,
        error::{SchemaError, ValidationError, ValidationErrors},
        node::*,
        types::{AssociationKind, EnumEncoding, Primitive, TableNaming, Type},
        visit::reachable,
    };
    pub use serde::{Deserialize, Serialize};
}
