use crate::{Error, config::Config};
use rowgraph_core::{
    hydrate::{Hydrated, HydrationStrategy, hydrate},
    row::Row,
};
use rowgraph_schema::{
    build::EntityGraphBuilder, node::EntityGraphs, supplier::SchemaSupplier, types::Type,
};

///
/// Mapping
///
/// Built entity graphs together with the hydration strategy to apply to
/// them. Immutable once built, so one mapping can serve any number of
/// hydration calls.
///

#[derive(Clone, Debug)]
pub struct Mapping {
    graphs: EntityGraphs,
    strategy: HydrationStrategy,
}

impl Mapping {
    /// Build the graphs of `supplier` under `config`.
    pub fn build(config: &Config, supplier: &dyn SchemaSupplier) -> Result<Self, Error> {
        let graphs = EntityGraphBuilder::new(config.schema.clone()).build_from(supplier)?;
        tracing::debug!(
            entities = graphs.entity_count(),
            strategy = ?config.hydration.strategy,
            "mapping ready"
        );

        Ok(Self {
            graphs,
            strategy: config.hydration.strategy,
        })
    }

    #[must_use]
    pub const fn from_graphs(graphs: EntityGraphs, strategy: HydrationStrategy) -> Self {
        Self { graphs, strategy }
    }

    #[must_use]
    pub const fn graphs(&self) -> &EntityGraphs {
        &self.graphs
    }

    #[must_use]
    pub const fn strategy(&self) -> HydrationStrategy {
        self.strategy
    }

    /// Hydrate `root` instances from `rows` with the configured strategy.
    pub fn hydrate(&self, root: &Type, rows: &[Row]) -> Result<Hydrated, Error> {
        Ok(hydrate(self.strategy, &self.graphs, root, rows)?)
    }
}
