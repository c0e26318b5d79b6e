//! Command-line argument definitions for the Lineage CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output format,
//! the viewport the tree is centered in, configuration file selection, and
//! logging verbosity.

use std::path::Path;

use clap::{Parser, ValueEnum};

/// Output document formats.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// A drawing of the tree
    Svg,
    /// The positioned node and link lists
    Json,
}

/// Command-line arguments for the Lineage family tree tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input JSON family tree
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Output format; inferred from the output file extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Width of the viewport the tree is centered in
    #[arg(long, default_value_t = 1200.0)]
    pub viewport_width: f32,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Returns the requested format, falling back to the output extension.
    ///
    /// A `.json` output is written as JSON, anything else as SVG.
    pub fn output_format(&self) -> OutputFormat {
        if let Some(format) = self.format {
            return format;
        }

        match Path::new(&self.output)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Svg,
        }
    }
}
