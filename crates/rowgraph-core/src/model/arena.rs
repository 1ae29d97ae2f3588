use crate::{key::Key, model::Slot, value::Value};
use derive_more::Display;
use rowgraph_schema::types::Type;
use serde::Serialize;
use std::collections::BTreeMap;

///
/// NodeId
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[display("#{_0}")]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

///
/// Node
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub ty: Type,
    pub id: Key,
    pub fields: BTreeMap<String, Value>,
    pub slots: BTreeMap<String, Slot<NodeId>>,
}

impl Node {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn one(&self, name: &str) -> Option<NodeId> {
        self.slots.get(name).and_then(Slot::one).copied()
    }

    #[must_use]
    pub fn many(&self, name: &str) -> &[NodeId] {
        match self.slots.get(name) {
            Some(slot) => slot.many(),
            None => &[],
        }
    }
}

///
/// ObjectGraph
///
/// Arena of instances with real references. Nodes are never removed, so a
/// `NodeId` stays valid for the lifetime of its graph.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ObjectGraph {
    nodes: Vec<Node>,
}

impl ObjectGraph {
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn insert(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);

        NodeId(self.nodes.len() - 1)
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Target node of a single-valued slot.
    #[must_use]
    pub fn one(&self, id: NodeId, slot: &str) -> Option<&Node> {
        self.get(self.get(id)?.one(slot)?)
    }

    /// Target nodes of a collection slot.
    pub fn many(&self, id: NodeId, slot: &str) -> impl Iterator<Item = &Node> {
        self.get(id)
            .map(|node| node.many(slot))
            .unwrap_or_default()
            .iter()
            .filter_map(|target| self.get(*target))
    }
}
