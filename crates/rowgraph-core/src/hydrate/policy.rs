use crate::{error::HydrationError, model::BaseRecord};
use rowgraph_schema::node::EntityDefinition;

///
/// MergePolicy
///
/// How the shared traversal turns base records and resolved associations
/// into instances. Handles are what association slots link to.
///

pub trait MergePolicy {
    type Handle: Clone;

    /// Materialize an instance with base fields only.
    fn create(&mut self, base: BaseRecord) -> Self::Handle;

    /// Point the single-valued `slot` of `child` at `parent`.
    fn back_reference(
        &mut self,
        child: Self::Handle,
        slot: &str,
        parent: &Self::Handle,
    ) -> Self::Handle;

    /// Combine a base instance with every association resolved for it.
    fn finish(
        &mut self,
        entity: &EntityDefinition,
        base: Self::Handle,
        resolved: Resolved<Self::Handle>,
    ) -> Result<Self::Handle, HydrationError>;
}

///
/// Resolved
///
/// Association values gathered for one root id, in association order.
///

#[derive(Clone, Debug)]
pub struct Resolved<H> {
    pub singles: Vec<ResolvedSingle<H>>,
    pub lists: Vec<ResolvedList<H>>,
}

impl<H> Default for Resolved<H> {
    fn default() -> Self {
        Self {
            singles: Vec::new(),
            lists: Vec::new(),
        }
    }
}

///
/// ResolvedSingle
///

#[derive(Clone, Debug)]
pub struct ResolvedSingle<H> {
    pub association: String,
    pub nullable: bool,
    pub target: Option<H>,
}

///
/// ResolvedList
///

#[derive(Clone, Debug)]
pub struct ResolvedList<H> {
    pub association: String,
    pub targets: Vec<H>,
}
