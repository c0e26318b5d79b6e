//! Positioned output of the layout engine.
//!
//! The layout engine turns a [`Person`](crate::family::Person) tree into two
//! flat lists handed to a renderer:
//!
//! - [`Node`]s: one per person box and one per marriage junction.
//! - [`Link`]s: connector descriptors, one variant per connector direction.
//!
//! Both serialize to the JSON shape renderers consume (`{id, x, y, isPerson,
//! ...}` for nodes, `{direction, ...}` for links).

mod link;
mod node;

pub use link::Link;
pub use node::{Node, NodeId, NodeKind};
