//! SVG export of family trees.
//!
//! Draws every link as a `<line>`, then every person as a rounded box with
//! the name in its center, then every marriage junction as a small dot. Links
//! go first so boxes cover the ends of the lines meeting them.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use lineage_core::{
    apply_stroke,
    diagram::{Link, Node, NodeId, NodeKind},
    geometry::{Bounds, Insets, Point, Size},
};

use super::{Error, Exporter};
use crate::{config::StyleConfig, layout::TreeLayout};

/// Builder for [`Svg`] exporters.
///
/// # Examples
///
/// ```
/// # use lineage::config::{LayoutConfig, StyleConfig};
/// # use lineage::export::svg::SvgBuilder;
/// let svg = SvgBuilder::new()
///     .with_style(&StyleConfig::default())
///     .with_box_height(LayoutConfig::default().box_height())
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SvgBuilder {
    style: StyleConfig,
    box_height: f32,
}

impl Default for SvgBuilder {
    fn default() -> Self {
        Self {
            style: StyleConfig::default(),
            box_height: 88.0,
        }
    }
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the colors, strokes and fonts used for drawing.
    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Sets the height of person boxes. Widths come from the nodes.
    pub fn with_box_height(mut self, height: f32) -> Self {
        self.box_height = height;
        self
    }

    /// Builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the box height or the margin is negative
    /// or not finite.
    pub fn build(self) -> Result<Svg, Error> {
        if !self.box_height.is_finite() || self.box_height < 0.0 {
            return Err(Error::Render(format!(
                "invalid person box height: {}",
                self.box_height
            )));
        }
        let margin = self.style.margin();
        if !margin.is_finite() || margin < 0.0 {
            return Err(Error::Render(format!("invalid document margin: {margin}")));
        }

        Ok(Svg {
            style: self.style,
            box_height: self.box_height,
        })
    }
}

/// SVG exporter. Create it with [`SvgBuilder`].
#[derive(Debug, Clone)]
pub struct Svg {
    style: StyleConfig,
    box_height: f32,
}

impl Svg {
    /// Renders the complete layout to an SVG document.
    pub fn render_document(&self, layout: &TreeLayout) -> Document {
        let content_bounds = layout.bounds().unwrap_or_default();
        let padding = Insets::uniform(self.style.margin());
        let svg_size = self.calculate_svg_dimensions(content_bounds.to_size(), padding);

        let doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());
        let doc = self.add_background(doc, svg_size);

        let origin = content_bounds.add_padding(padding).min_point();
        let mut main_group = svg_element::Group::new().set(
            "transform",
            format!("translate({}, {})", -origin.x(), -origin.y()),
        );

        let positions = position_index(layout.nodes());

        let mut links_group = svg_element::Group::new().set("class", "links");
        for link in layout.links() {
            if let Some(line) = self.render_link(link, &positions) {
                links_group = links_group.add(line);
            }
        }
        main_group = main_group.add(links_group);

        let mut nodes_group = svg_element::Group::new().set("class", "nodes");
        for node in layout.nodes() {
            nodes_group = match node.kind() {
                NodeKind::Person { record, width } => {
                    nodes_group.add(self.render_person(node, record.name(), *width))
                }
                NodeKind::Marriage => nodes_group.add(self.render_marriage(node)),
            };
        }

        doc.add(main_group.add(nodes_group))
    }

    /// Document size: the content plus the margin on every side.
    fn calculate_svg_dimensions(&self, content_size: Size, padding: Insets) -> Size {
        let size = content_size.add_padding(padding);
        debug!("Final SVG dimensions: {}x{}", size.width(), size.height());
        size
    }

    fn add_background(&self, doc: Document, size: Size) -> Document {
        let Some(color) = self.style.background_color() else {
            return doc;
        };

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", size.width())
            .set("height", size.height())
            .set("fill", &color)
            .set("fill-opacity", color.alpha());
        doc.add(background)
    }

    /// Resolves the end points of a link.
    ///
    /// Links into a child stop at the top edge of the child's box. Returns
    /// `None` when a link names a node that is missing from `positions`.
    fn link_endpoints(
        &self,
        link: &Link,
        positions: &HashMap<NodeId, Point>,
    ) -> Option<(Point, Point)> {
        let half_height = self.box_height / 2.0;
        let lookup = |id: &NodeId| {
            let position = positions.get(id).copied();
            if position.is_none() {
                warn!(id:% = id, direction = link.direction(); "Link refers to an unknown or ambiguous node");
            }
            position
        };

        match link {
            Link::Marriage { from, to } => Some((lookup(from)?, lookup(to)?)),
            Link::MarriageToChild { from, to } | Link::PersonToChild { from, to } => {
                let child = lookup(to)?;
                Some((
                    lookup(from)?,
                    Point::new(child.x(), child.y() - half_height),
                ))
            }
            Link::MarriageToPlatform { x, y1, y2, .. } => {
                Some((Point::new(*x, *y1), Point::new(*x, *y2)))
            }
            Link::Platform { x1, x2, y } => Some((Point::new(*x1, *y), Point::new(*x2, *y))),
            Link::PlatformToChild { x, y1, y2, .. } => {
                Some((Point::new(*x, *y1), Point::new(*x, *y2 - half_height)))
            }
        }
    }

    fn render_link(
        &self,
        link: &Link,
        positions: &HashMap<NodeId, Point>,
    ) -> Option<svg_element::Line> {
        let (start, end) = self.link_endpoints(link, positions)?;

        let line = svg_element::Line::new()
            .set("x1", start.x())
            .set("y1", start.y())
            .set("x2", end.x())
            .set("y2", end.y())
            .set("class", link.direction());
        Some(apply_stroke!(line, self.style.connector_stroke()))
    }

    fn render_person(&self, node: &Node, name: Option<&str>, width: f32) -> svg_element::Group {
        let bounds = Bounds::new_from_center(node.position(), Size::new(width, self.box_height));
        let fill = self.style.person_fill();

        let rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", self.style.corner_radius())
            .set("fill", &fill)
            .set("fill-opacity", fill.alpha());
        let rect = apply_stroke!(rect, self.style.person_stroke());

        let mut group = svg_element::Group::new()
            .set("class", "person")
            .set("data-id", node.id().to_string())
            .add(rect);

        if let Some(name) = name.filter(|name| !name.is_empty()) {
            let text_color = self.style.text_color();
            let text = svg_element::Text::new("")
                .set("x", node.x())
                .set("y", node.y())
                .set("text-anchor", "middle")
                .set("dominant-baseline", "central")
                .set("font-family", self.style.font_family())
                .set("font-size", self.style.font_size())
                .set("fill", &text_color)
                .set("fill-opacity", text_color.alpha())
                .add(SvgText::new(name));
            group = group.add(text);
        }

        group
    }

    fn render_marriage(&self, node: &Node) -> svg_element::Circle {
        let fill = self.style.marriage_fill();
        svg_element::Circle::new()
            .set("class", "marriage")
            .set("data-id", node.id().to_string())
            .set("cx", node.x())
            .set("cy", node.y())
            .set("r", self.style.marriage_radius())
            .set("fill", &fill)
            .set("fill-opacity", fill.alpha())
    }
}

/// Positions by node id.
///
/// People without ids share one id, and so can their marriages. Ids naming
/// more than one node are left out so links to them are skipped instead of
/// ending at an arbitrary box.
fn position_index(nodes: &[Node]) -> HashMap<NodeId, Point> {
    let mut positions = HashMap::with_capacity(nodes.len());
    let mut ambiguous = HashSet::new();
    for node in nodes {
        if positions.insert(node.id(), node.position()).is_some() {
            ambiguous.insert(node.id());
        }
    }
    for id in &ambiguous {
        warn!(id:% = id; "Several nodes share an id");
        positions.remove(id);
    }
    positions
}

impl Exporter for Svg {
    fn export_layout(&mut self, layout: &TreeLayout) -> Result<String, Error> {
        let doc = self.render_document(layout);
        debug!("SVG document rendered");
        Ok(doc.to_string())
    }
}
