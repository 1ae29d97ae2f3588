//! ## Crate layout
//! - `schema`: declarations, the entity graph builder, validators and emitters.
//! - `core`: values, keys, rows and the row hydrator.
//! - `config`: one TOML document configuring both.
//! - `mapping`: a built schema paired with a hydration strategy.
//!
//! The `prelude` module covers the usual path from declarations to hydrated
//! instances.

pub use rowgraph_core as core;
pub use rowgraph_schema as schema;

pub mod config;
pub mod mapping;

use crate::{
    core::error::HydrationError,
    schema::{build::BuildError, config::ConfigError, supplier::SupplierError},
};
use thiserror::Error as ThisError;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error,
        config::{Config, HydrationConfig},
        core::prelude::*,
        mapping::Mapping,
        schema::{
            build::EntityGraphBuilder,
            config::BuildConfig,
            node::{EntityDefinition, EntityGraphs},
            supplier::{SchemaSupplier, StaticSupplier, TomlSupplier},
            types::Type,
        },
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum Error {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Hydration(#[from] HydrationError),

    #[error(transparent)]
    Supplier(#[from] SupplierError),
}
