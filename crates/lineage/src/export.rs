//! Export of laid-out family trees.
//!
//! This module provides the [`Exporter`] trait that turns a [`TreeLayout`]
//! into an output format. It is the final stage of the Lineage pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! JSON input
//!     ↓ parse
//! Person tree
//!     ↓ layout
//! TreeLayout (nodes + links)
//!     ↓ export (this module)
//! SVG / JSON document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG drawing via [`svg::SvgBuilder`] and [`svg::Svg`]
//! - [`json`] - The raw node and link lists via [`json::Json`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`LineageError::Export`] at the crate
//! boundary.
//!
//! [`LineageError::Export`]: crate::LineageError::Export

pub mod json;
pub mod svg;

use std::{fs, path::Path};

use log::{error, info};

use crate::layout::TreeLayout;

/// Abstraction for export backends.
pub trait Exporter {
    /// Renders `layout` to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format.
    fn export_layout(&mut self, layout: &TreeLayout) -> Result<String, Error>;

    /// Renders `layout` and writes the result to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if rendering fails, or [`Error::Io`] if the
    /// file cannot be written.
    fn export_to_file(&mut self, layout: &TreeLayout, path: &Path) -> Result<(), Error> {
        let content = self.export_layout(layout)?;

        info!(path:? = path; "Writing output file");
        fs::write(path, content).map_err(|err| {
            error!(path:? = path, err:err; "Failed to write output file");
            Error::Io(err)
        })
    }
}

/// Errors that can occur during export.
///
/// This type is converted into [`LineageError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`LineageError::Export`]: crate::LineageError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
