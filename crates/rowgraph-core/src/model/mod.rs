//! Hydrated instance models.
//!
//! [`Entity`] is an owned tree produced by copy semantics. [`ObjectGraph`]
//! is the arena produced by real-reference semantics, where every instance
//! is a [`Node`] addressed by a [`NodeId`] and shared wherever it is
//! referenced.

mod arena;
mod base;
mod entity;

pub use arena::{Node, NodeId, ObjectGraph};
pub use base::BaseRecord;
pub use entity::Entity;

use serde::Serialize;

///
/// Slot
///
/// Association value of one instance: single-valued slots hold at most one
/// link, collection slots hold links in first-seen order.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Slot<L> {
    One(Option<L>),
    Many(Vec<L>),
}

impl<L> Slot<L> {
    #[must_use]
    pub const fn one(&self) -> Option<&L> {
        match self {
            Self::One(link) => link.as_ref(),
            Self::Many(_) => None,
        }
    }

    #[must_use]
    pub fn many(&self) -> &[L] {
        match self {
            Self::One(_) => &[],
            Self::Many(links) => links,
        }
    }
}
