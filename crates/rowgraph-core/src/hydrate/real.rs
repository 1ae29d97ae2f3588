use crate::{
    error::HydrationError,
    hydrate::policy::{MergePolicy, Resolved},
    model::{BaseRecord, Node, NodeId, ObjectGraph, Slot},
};
use rowgraph_schema::node::EntityDefinition;
use std::collections::BTreeMap;

///
/// RealReferences
///
/// Instances live in one `ObjectGraph` and are linked by `NodeId`, so an
/// instance referenced from several places is the same node. Unresolved
/// single-valued slots keep their previous value; collection slots are
/// appended to in place.
///

#[derive(Clone, Debug, Default)]
pub struct RealReferences {
    graph: ObjectGraph,
}

impl RealReferences {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            graph: ObjectGraph::new(),
        }
    }

    #[must_use]
    pub fn into_graph(self) -> ObjectGraph {
        self.graph
    }
}

impl MergePolicy for RealReferences {
    type Handle = NodeId;

    fn create(&mut self, base: BaseRecord) -> NodeId {
        self.graph.insert(Node {
            ty: base.ty,
            id: base.id,
            fields: base.fields,
            slots: BTreeMap::new(),
        })
    }

    fn back_reference(&mut self, child: NodeId, slot: &str, parent: &NodeId) -> NodeId {
        if let Some(node) = self.graph.get_mut(child) {
            node.slots.insert(slot.to_string(), Slot::One(Some(*parent)));
        }

        child
    }

    fn finish(
        &mut self,
        _entity: &EntityDefinition,
        base: NodeId,
        resolved: Resolved<NodeId>,
    ) -> Result<NodeId, HydrationError> {
        let Some(node) = self.graph.get_mut(base) else {
            return Ok(base);
        };

        for single in resolved.singles {
            match single.target {
                Some(target) => {
                    node.slots
                        .insert(single.association, Slot::One(Some(target)));
                }
                None => {
                    node.slots
                        .entry(single.association)
                        .or_insert(Slot::One(None));
                }
            }
        }

        for list in resolved.lists {
            let slot = node
                .slots
                .entry(list.association)
                .or_insert_with(|| Slot::Many(Vec::new()));

            if let Slot::Many(links) = slot {
                for target in list.targets {
                    if !links.contains(&target) {
                        links.push(target);
                    }
                }
            }
        }

        Ok(base)
    }
}
