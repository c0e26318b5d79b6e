//! CLI logic for the Lineage family tree tool.
//!
//! Reads a JSON family tree, lays it out and writes it as SVG or JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::fs;

use log::info;

use lineage::{LineageError, TreeBuilder};

/// Run the Lineage CLI application
///
/// This function processes the input file through the Lineage pipeline
/// and writes the resulting document to the output file.
///
/// # Errors
///
/// Returns `LineageError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Input decoding errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), LineageError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing family tree"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = TreeBuilder::new(app_config);
    let root = builder.parse(&source)?;
    let layout = builder.layout(&root, args.viewport_width);

    let format = args.output_format();
    let output = match format {
        OutputFormat::Svg => builder.render_svg(&layout)?,
        OutputFormat::Json => builder.render_json(&layout)?,
    };

    fs::write(&args.output, output)?;

    info!(output_file = args.output, format:?; "Family tree exported successfully");

    Ok(())
}
