//! keychain inspect command - summarize an STL file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use solid_mesh::export::read_stl;

use crate::{output, Cli, OutputFormat};

#[derive(Serialize)]
struct StlInfo {
    path: String,
    triangles: usize,
    vertices: usize,
    min: [f64; 3],
    max: [f64; 3],
    dimensions: [f64; 3],
}

pub fn run(input: &Path, cli: &Cli) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read {:?}", input))?;
    let summary =
        read_stl(&bytes).with_context(|| format!("Failed to parse STL from {:?}", input))?;

    let dims = summary.max - summary.min;
    let info = StlInfo {
        path: input.display().to_string(),
        triangles: summary.triangle_count,
        vertices: summary.vertex_count,
        min: summary.min.to_array(),
        max: summary.max.to_array(),
        dimensions: dims.to_array(),
    };

    match cli.format {
        OutputFormat::Json => output::print(&info, cli.format, cli.quiet),
        OutputFormat::Text => {
            if !cli.quiet {
                println!("{}", "STL Information".bold().underline());
                println!("  {}: {}", "File".cyan(), info.path);
                println!("  {}: {}", "Triangles".cyan(), info.triangles);
                println!("  {}: {}", "Vertices".cyan(), info.vertices);
                println!(
                    "  {}: {:.2} x {:.2} x {:.2} mm",
                    "Dimensions".cyan(),
                    info.dimensions[0],
                    info.dimensions[1],
                    info.dimensions[2]
                );
            }
        }
    }

    Ok(())
}
