//! JSON export of the node and link lists.
//!
//! The document is the layout as a renderer consumes it:
//!
//! ```text
//! {
//!   "nodes": [{ "id": 1, "x": 400.0, "y": 180.0, "isPerson": true, "rectW": 170.0, "name": "..." }],
//!   "links": [{ "direction": "platform", "x1": 285.0, "x2": 515.0, "y": 250.0 }]
//! }
//! ```

use log::debug;

use super::{Error, Exporter};
use crate::layout::TreeLayout;

/// Serializes layouts with `serde_json`.
#[derive(Debug, Clone, Default)]
pub struct Json {
    pretty: bool,
}

impl Json {
    /// Creates a compact JSON exporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables indented output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Exporter for Json {
    fn export_layout(&mut self, layout: &TreeLayout) -> Result<String, Error> {
        let result = if self.pretty {
            serde_json::to_string_pretty(layout)
        } else {
            serde_json::to_string(layout)
        };

        let content = result.map_err(|err| Error::Render(err.to_string()))?;
        debug!(bytes = content.len(), pretty = self.pretty; "JSON document rendered");
        Ok(content)
    }
}
