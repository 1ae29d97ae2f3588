use crate::{key::Key, model::Slot, value::Value};
use rowgraph_schema::types::Type;
use serde::Serialize;
use std::collections::BTreeMap;

///
/// Entity
///
/// Owned instance produced by copy semantics. An instance reached through a
/// self reference or a cycle is a base copy and carries no slots.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Entity {
    pub ty: Type,
    pub id: Key,
    pub fields: BTreeMap<String, Value>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub slots: BTreeMap<String, Slot<Self>>,
}

impl Entity {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&Slot<Self>> {
        self.slots.get(name)
    }

    /// Target of a single-valued slot.
    #[must_use]
    pub fn one(&self, name: &str) -> Option<&Self> {
        self.slot(name).and_then(Slot::one)
    }

    /// Targets of a collection slot, empty when unset.
    #[must_use]
    pub fn many(&self, name: &str) -> &[Self] {
        match self.slot(name) {
            Some(slot) => slot.many(),
            None => &[],
        }
    }

    /// Ids of a collection slot, in slot order.
    #[must_use]
    pub fn many_ids(&self, name: &str) -> Vec<Key> {
        self.many(name).iter().map(|e| e.id.clone()).collect()
    }
}
