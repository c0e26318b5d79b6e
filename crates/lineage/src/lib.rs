//! Lineage - A layout engine for genealogical family trees.
//!
//! Turns a nested family (a person, an optional partner, recursively nested
//! children) into positioned person boxes, marriage junctions and connector
//! segments, and renders them as SVG or JSON.

pub mod config;
pub mod export;
pub mod layout;

mod error;

pub use lineage_core::{color, diagram, draw, family, geometry};

pub use error::LineageError;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use family::Person;
use layout::{Engine, TreeLayout};

/// Builder for parsing, laying out and rendering family trees.
///
/// # Examples
///
/// ```
/// use lineage::{TreeBuilder, config::AppConfig};
///
/// let source = r#"{
///     "id": 1,
///     "name": "Olena",
///     "husband": { "id": 2, "name": "Taras" },
///     "children": [{ "id": 3, "name": "Ivan" }, { "id": 4, "name": "Maria" }]
/// }"#;
///
/// let builder = TreeBuilder::new(AppConfig::default());
/// let root = builder.parse(source).expect("Failed to parse");
/// let layout = builder.layout(&root, 800.0);
/// assert_eq!(layout.nodes().len(), 5);
///
/// let svg = builder.render_svg(&layout).expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Default)]
pub struct TreeBuilder {
    config: AppConfig,
}

impl TreeBuilder {
    /// Create a new tree builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a JSON family tree.
    ///
    /// The input is either the root person object or an array whose first
    /// element is the root person.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::Parse`] if the input is not valid JSON, does
    /// not have the shape of a person, or is an empty array.
    pub fn parse(&self, source: &str) -> Result<Person, LineageError> {
        info!("Parsing family tree");

        let parsed = if source.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<Person>>(source).and_then(|people| {
                people.into_iter().next().ok_or_else(|| {
                    serde::de::Error::custom("expected at least one person in the array")
                })
            })
        } else {
            serde_json::from_str::<Person>(source)
        };
        let root = parsed.map_err(|err| LineageError::new_parse_error(err, source))?;

        debug!(
            root:? = root.id(),
            people = root.descendant_count(),
            generations = root.depth();
            "Family tree parsed successfully"
        );
        trace!(root:?; "Parsed family tree");

        Ok(root)
    }

    /// Lay out a family tree centered in a viewport of the given width.
    ///
    /// Layout never fails; a root without an id (or with id 0) yields an empty layout.
    pub fn layout(&self, root: &Person, viewport_width: f32) -> TreeLayout {
        Engine::from_config(self.config.layout()).layout(root, viewport_width)
    }

    /// Render a layout to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::Export`] if the style configuration cannot be
    /// rendered.
    pub fn render_svg(&self, layout: &TreeLayout) -> Result<String, LineageError> {
        let mut svg_exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .with_box_height(self.config.layout().box_height())
            .build()?;

        let svg = svg_exporter.export_layout(layout)?;
        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Render a layout to a pretty-printed JSON string of its nodes and links.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::Export`] if serialization fails.
    pub fn render_json(&self, layout: &TreeLayout) -> Result<String, LineageError> {
        let json = export::json::Json::new()
            .with_pretty(true)
            .export_layout(layout)?;
        info!("JSON rendered successfully");
        Ok(json)
    }
}
