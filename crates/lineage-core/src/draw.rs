//! Visual definitions shared by renderers.
//!
//! - [`StrokeDefinition`]: color, width and dash pattern of connector lines and box borders
//! - [`apply_stroke!`](crate::apply_stroke!): applies a stroke to an SVG element

mod stroke;

pub use stroke::{StrokeCap, StrokeDefinition, StrokeStyle};
