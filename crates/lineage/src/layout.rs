//! Family tree layout engine.
//!
//! This module turns a nested [`Person`](lineage_core::family::Person) tree into
//! absolute coordinates for every person box, every marriage junction and
//! every connector segment.
//!
//! # Pipeline Position
//!
//! ```text
//! JSON input
//!     ↓ parse
//! Person tree
//!     ↓ layout (this module)
//! TreeLayout (nodes + links)
//!     ↓ export
//! SVG / JSON
//! ```
//!
//! # Algorithm
//!
//! [`Engine::layout_tree`] recurses depth-first, children before their parent.
//! Every child subtree is first laid out around a provisional center `x = 0`,
//! then the parent reserves a slot for it (`width`), and the whole subtree
//! is rebased into its final slot (`positioning`). Only then are the
//! parent's own nodes (`nodes`) and connectors (`links`) created. A single
//! depth-first pass therefore produces final coordinates without a second
//! top-down sweep.
//!
//! # Submodules
//!
//! - `width` - Reserved horizontal footprint of each child subtree
//! - `positioning` - Horizontal placement and rebasing of child subtrees
//! - `nodes` - Person, partner and marriage junction nodes of one generation
//! - `links` - Marriage links, direct child links and platform buses
//! - `engine` - The recursive orchestrator
//! - `facade` - Memoised layout that recomputes only when its inputs change

mod engine;
mod facade;
mod links;
mod nodes;
mod positioning;
mod width;

pub use engine::{Engine, SubtreeLayout};
pub use facade::LayoutFacade;

use serde::Serialize;

use lineage_core::{
    diagram::{Link, Node, NodeKind},
    geometry::{Bounds, Size},
};

/// The complete, positioned family diagram.
///
/// Serializes to `{ "nodes": [...], "links": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TreeLayout {
    nodes: Vec<Node>,
    links: Vec<Link>,
    #[serde(skip)]
    bounds: Option<Bounds>,
}

impl TreeLayout {
    /// Creates a layout and computes the bounds of its drawn nodes.
    ///
    /// Person boxes are `width x box_height` around their position; marriage
    /// junctions count as points.
    pub fn new(nodes: Vec<Node>, links: Vec<Link>, box_height: f32) -> Self {
        let bounds = nodes
            .iter()
            .map(|node| {
                let size = match node.kind() {
                    NodeKind::Person { width, .. } => Size::new(*width, box_height),
                    NodeKind::Marriage => Size::default(),
                };
                node.position().to_bounds(size)
            })
            .reduce(|acc, bounds| acc.merge(&bounds));

        Self {
            nodes,
            links,
            bounds,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Bounds of all drawn nodes, `None` for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}
