mod processor;


use crate::{
    config::BuildConfig,
    decl::SchemaDeclarations,
    error::{SchemaError, ValidationErrors},
    node::{EntityDefinition, EntityGraphs},
    supplier::{SchemaSupplier, SupplierError},
    validate::{self, EntityValidator},
};
use processor::PIPELINE;
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum BuildError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Supplier(#[from] SupplierError),

    #[error("entity graph validation failed: {0}")]
    Validation(ValidationErrors),
}

///
/// EntityGraphBuilder
///
/// Turns declarations into validated entity graphs: skeletons first, then
/// every declaration processor in order, then the validators.
///

pub struct EntityGraphBuilder {
    config: BuildConfig,
    validators: Vec<Box<dyn EntityValidator>>,
}

impl Default for EntityGraphBuilder {
    fn default() -> Self {
        Self::new(BuildConfig::default())
    }
}

impl EntityGraphBuilder {
    #[must_use]
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            validators: validate::default_validators(),
        }
    }

    /// Run an extra validator after the builtin ones.
    #[must_use]
    pub fn with_validator(mut self, validator: impl EntityValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    #[must_use]
    pub const fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn build_from(&self, supplier: &dyn SchemaSupplier) -> Result<EntityGraphs, BuildError> {
        let decls = supplier.declarations()?;

        self.build(&decls)
    }

    pub fn build(&self, decls: &SchemaDeclarations) -> Result<EntityGraphs, BuildError> {
        tracing::debug!(entities = decls.entities.len(), "building entity graphs");

        // Phase 1: reject declarations that cannot form a graph.
        validate::validate_declarations(decls)
            .result()
            .map_err(|errs| {
                tracing::warn!(errors = errs.len(), "declaration validation failed");
                BuildError::Validation(errs)
            })?;

        // Phase 2: skeletons.
        let mut graphs = self.skeletons(decls);

        // Phase 3: enrichment, strictly in pipeline order.
        for processor in PIPELINE {
            tracing::debug!(processor = processor.name(), "running declaration processor");

            processor
                .process(&mut graphs, decls, &self.config)
                .inspect_err(|err| {
                    tracing::warn!(processor = processor.name(), error = %err, "declaration processor failed");
                })?;
        }
        order_associations(&mut graphs, decls)?;

        // Phase 4: batch validation over the finished graph.
        validate::validate_graphs(&graphs, &self.config, &self.validators)
            .result()
            .map_err(|errs| {
                tracing::warn!(errors = errs.len(), "entity graph validation failed");
                BuildError::Validation(errs)
            })?;

        tracing::debug!(
            namespaces = graphs.len(),
            entities = graphs.entity_count(),
            "entity graphs built"
        );

        Ok(graphs)
    }

    fn skeletons(&self, decls: &SchemaDeclarations) -> EntityGraphs {
        let mut graphs = EntityGraphs::new();

        for decl in &decls.entities {
            let table = decl
                .table
                .clone()
                .unwrap_or_else(|| self.config.table_naming.table_name(&decl.ty));

            graphs.insert_entity(EntityDefinition::new(decl.ty.clone(), table));
        }

        graphs
    }
}

/// Build with the default config and validators.
pub fn build_entity_graphs(decls: &SchemaDeclarations) -> Result<EntityGraphs, BuildError> {
    EntityGraphBuilder::default().build(decls)
}

// Processors append associations kind by kind; restore declaration order,
// with synthesized associations last.
fn order_associations(
    graphs: &mut EntityGraphs,
    decls: &SchemaDeclarations,
) -> Result<(), SchemaError> {
    for decl in &decls.entities {
        let position = |name: &str| {
            decl.associations
                .iter()
                .position(|assoc| assoc.name == name)
                .unwrap_or(usize::MAX)
        };

        graphs.update_entity(&decl.ty, |mut entity| {
            entity
                .associations
                .sort_by_key(|assoc| position(&assoc.name));

            Ok(entity)
        })?;
    }

    Ok(())
}
