//! Configuration types for Lineage layout and rendering.
//!
//! All types implement [`serde::Deserialize`] and every field is optional, so
//! a configuration file only needs to name what it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Box dimensions and spacing used by the layout engine.
//! - [`StyleConfig`] - Colors, strokes and fonts used by the SVG exporter.
//!
//! # Example
//!
//! ```
//! # use lineage::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().box_width(), 170.0);
//! assert_eq!(config.layout().root_y(), 180.0);
//! assert!(config.style().background_color().is_none());
//! ```

use serde::Deserialize;

use lineage_core::{color::Color, draw::StrokeDefinition};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Dimensions and spacing of the family tree layout.
///
/// | Key | Default | Meaning |
/// |-----|---------|---------|
/// | `box_width` | 170 | Width of a person box (partners use the same width) |
/// | `box_height` | 88 | Height of a person box (rendering only) |
/// | `vertical_gap` | 140 | Distance between two generations |
/// | `pair_gap` | 60 | Horizontal gap reserved between partners |
/// | `min_child_gap` | 60 | Minimum gap between sibling subtrees |
/// | `platform_padding` | 60 | Extra bus width under a lone partnered child |
/// | `root_y` | 180 | Y coordinate of the apex generation |
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    box_width: f32,
    box_height: f32,
    vertical_gap: f32,
    pair_gap: f32,
    min_child_gap: f32,
    platform_padding: f32,
    root_y: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_width: 170.0,
            box_height: 88.0,
            vertical_gap: 140.0,
            pair_gap: 60.0,
            min_child_gap: 60.0,
            platform_padding: 60.0,
            root_y: 180.0,
        }
    }
}

impl LayoutConfig {
    pub fn box_width(&self) -> f32 {
        self.box_width
    }

    pub fn box_height(&self) -> f32 {
        self.box_height
    }

    pub fn vertical_gap(&self) -> f32 {
        self.vertical_gap
    }

    pub fn pair_gap(&self) -> f32 {
        self.pair_gap
    }

    pub fn min_child_gap(&self) -> f32 {
        self.min_child_gap
    }

    pub fn platform_padding(&self) -> f32 {
        self.platform_padding
    }

    pub fn root_y(&self) -> f32 {
        self.root_y
    }

    /// Sets the person box width.
    pub fn with_box_width(mut self, width: f32) -> Self {
        self.box_width = width;
        self
    }

    /// Sets the person box height.
    pub fn with_box_height(mut self, height: f32) -> Self {
        self.box_height = height;
        self
    }

    /// Sets the distance between generations.
    pub fn with_vertical_gap(mut self, gap: f32) -> Self {
        self.vertical_gap = gap;
        self
    }

    /// Sets the gap between partners.
    pub fn with_pair_gap(mut self, gap: f32) -> Self {
        self.pair_gap = gap;
        self
    }

    /// Sets the minimum gap between sibling subtrees.
    pub fn with_min_child_gap(mut self, gap: f32) -> Self {
        self.min_child_gap = gap;
        self
    }

    /// Sets the extra bus width under a lone partnered child.
    pub fn with_platform_padding(mut self, padding: f32) -> Self {
        self.platform_padding = padding;
        self
    }

    /// Sets the y coordinate of the apex generation.
    pub fn with_root_y(mut self, y: f32) -> Self {
        self.root_y = y;
        self
    }
}

/// Visual styling configuration for rendered family trees.
///
/// Colors are validated while the configuration is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<Color>,
    person_fill: Color,
    person_stroke: StrokeDefinition,
    corner_radius: f32,
    marriage_fill: Color,
    marriage_radius: f32,
    connector_stroke: StrokeDefinition,
    text_color: Color,
    font_family: String,
    font_size: f32,
    margin: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            person_fill: Color::new("#fdf6e3").expect("valid CSS color"),
            person_stroke: StrokeDefinition::solid(
                Color::new("#586e75").expect("valid CSS color"),
                1.5,
            ),
            corner_radius: 8.0,
            marriage_fill: Color::new("#586e75").expect("valid CSS color"),
            marriage_radius: 5.0,
            connector_stroke: StrokeDefinition::solid(
                Color::new("#93a1a1").expect("valid CSS color"),
                2.0,
            ),
            text_color: Color::default(),
            font_family: "sans-serif".to_string(),
            font_size: 14.0,
            margin: 50.0,
        }
    }
}

impl StyleConfig {
    /// Returns the background [`Color`], or `None` for a transparent document.
    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    /// Sets the background color (builder style).
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn person_fill(&self) -> Color {
        self.person_fill
    }

    pub fn person_stroke(&self) -> &StrokeDefinition {
        &self.person_stroke
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn marriage_fill(&self) -> Color {
        self.marriage_fill
    }

    pub fn marriage_radius(&self) -> f32 {
        self.marriage_radius
    }

    pub fn connector_stroke(&self) -> &StrokeDefinition {
        &self.connector_stroke
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Margin around the node bounds in the exported document.
    pub fn margin(&self) -> f32 {
        self.margin
    }
}
