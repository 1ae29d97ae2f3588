//! Type/identity model of a built entity graph.
//!
//! Every node is a plain value. Processors never mutate a published node in
//! place: they produce an enriched copy through the `with_*` helpers and
//! swap it into the graph map.

mod association;
mod embeddable;
mod entity;
mod graph;
mod id;
mod property;

pub use association::AssociationDefinition;
pub use embeddable::EmbeddableDefinition;
pub use entity::EntityDefinition;
pub use graph::{EntityGraph, EntityGraphs};
pub use id::IdDefinition;
pub use property::{ConverterDefinition, EnumeratedDefinition, PropertyDefinition};
