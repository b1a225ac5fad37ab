//! keychain generate command - image in, STL out.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use keychain_gen::{GenerationOptions, Generator, GeneratorSettings};
use solid_mesh::export::StlFormat;
use tracing::debug;

use crate::{output, Cli, OutputFormat};

#[derive(Args)]
pub struct GenerateArgs {
    /// Input image (PNG or JPEG)
    input: PathBuf,

    /// Output STL path (defaults to the input name with .stl)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base plate thickness in mm
    #[arg(long, short, default_value = "3.0")]
    thickness: f64,

    /// Cut a key ring hole
    #[arg(long)]
    hole: bool,

    /// Hole X position, percent of the model width
    #[arg(long)]
    hole_x: Option<f64>,

    /// Hole Y position, percent of the model depth
    #[arg(long)]
    hole_y: Option<f64>,

    /// Raised text (accepted, not yet rendered)
    #[arg(long)]
    text: Option<String>,

    /// Write binary STL instead of ASCII
    #[arg(long)]
    binary: bool,

    /// JSON file with generator settings (thresholds, hole segments, ...)
    #[arg(long)]
    settings: Option<PathBuf>,
}

impl GenerateArgs {
    /// Generation options from the flags. A hole position implies `--hole`.
    pub fn options(&self) -> GenerationOptions {
        let mut options = GenerationOptions::new(self.thickness);
        options.has_hole = self.hole || self.hole_x.is_some() || self.hole_y.is_some();
        options.hole_x = self.hole_x;
        options.hole_y = self.hole_y;
        options.text = self.text.clone();
        options
    }

    /// Where the STL goes.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("stl"))
    }

    fn settings(&self) -> Result<GeneratorSettings> {
        let mut settings = match &self.settings {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read settings from {:?}", path))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("Invalid settings in {:?}", path))?
            }
            None => GeneratorSettings::default(),
        };
        if self.binary {
            settings.stl_format = StlFormat::Binary;
        }
        Ok(settings)
    }
}

pub fn run(args: &GenerateArgs, cli: &Cli) -> Result<()> {
    let image = fs::read(&args.input)
        .with_context(|| format!("Failed to read image from {:?}", args.input))?;

    let generator = Generator::new(args.settings()?)?;
    let model = generator.generate(&image, &args.options())?;

    let output_path = args.output_path();
    write_output(&output_path, &model.stl)?;
    debug!(path = %output_path.display(), bytes = model.stl.len(), "STL written");

    match cli.format {
        OutputFormat::Json => output::print(&model.report, cli.format, cli.quiet),
        OutputFormat::Text => {
            if cli.quiet {
                return Ok(());
            }
            let report = &model.report;
            println!("{}", "Keychain Generated".bold().underline());
            println!("  {}: {}", "Output".cyan(), output_path.display());
            println!(
                "  {}: {:.2} x {:.2} x {:.2} mm",
                "Plate".cyan(),
                report.plate_size[0],
                report.plate_size[1],
                args.thickness
            );
            println!("  {}: {}", "Decorations".cyan(), report.decorations);
            println!("  {}: {}", "Triangles".cyan(), report.triangle_count);
            if let Some(stats) = &report.hole {
                println!(
                    "  {}: {} wall triangles, {} triangles removed",
                    "Hole".cyan(),
                    stats.wall_triangles,
                    stats.removed_triangles
                );
            }
            println!("  {}: {} bytes", "Size".cyan(), model.stl.len());
            for note in &report.notes {
                println!("  {}: {}", "Note".yellow(), note);
            }
        }
    }

    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write STL to {:?}", path))
}
