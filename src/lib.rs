//! Pairview: paired RGB/IR sample viewer.
//!
//! Pairview renders the RGB and infrared images of a sample side by side,
//! with the VOC bounding boxes of each image drawn on top and colored by
//! object class.
//!
//! # Modules
//!
//! - [`annotation`]: Object records and the VOC XML reader/writer
//! - [`render`]: Bounding-box overlays and two-panel figures
//! - [`sample`]: Sample ids, file naming and sample discovery
//! - [`plot`]: Rendering a sample from its four files
//! - [`config`]: The viewer configuration file
//! - [`validation`]: Annotation checks and reports
//! - [`error`]: Error types for pairview operations

pub mod annotation;
pub mod color;
pub mod config;
pub mod error;
pub mod plot;
pub mod render;
pub mod sample;
pub mod validation;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

pub use error::PairviewError;

use crate::config::Config;
use crate::plot::{PairPlotter, SampleRenderer};
use crate::render::figure::Layout;
use crate::sample::SampleId;

/// The pairview CLI application.
#[derive(Parser)]
#[command(name = "pairview")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (JSON). Defaults to ./config.json when it exists.
    #[arg(long, global = true, env = "PAIRVIEW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Render the RGB and IR images of a sample with their boxes.
    Plot(PlotArgs),
    /// List the samples found in an image directory.
    List(ListArgs),
    /// Print the objects of a VOC annotation file.
    Objects(ObjectsArgs),
    /// Check a VOC annotation file for suspicious boxes and classes.
    Check(CheckArgs),
}

/// Arguments for the plot subcommand.
#[derive(clap::Args)]
struct PlotArgs {
    /// Sample ID.
    #[arg(long = "img-id", visible_alias = "img_id", conflicts_with = "file")]
    img_id: Option<SampleId>,

    /// Take the sample ID from this file name (first run of digits).
    #[arg(long)]
    file: Option<PathBuf>,

    /// RGB image path.
    #[arg(long = "rgb-img-path", visible_alias = "rgb_img_path")]
    rgb_img_path: Option<PathBuf>,

    /// RGB annotation path.
    #[arg(long = "rgb-anno-path", visible_alias = "rgb_anno_path")]
    rgb_anno_path: Option<PathBuf>,

    /// IR image path.
    #[arg(long = "ir-img-path", visible_alias = "ir_img_path")]
    ir_img_path: Option<PathBuf>,

    /// IR annotation path.
    #[arg(long = "ir-anno-path", visible_alias = "ir_anno_path")]
    ir_anno_path: Option<PathBuf>,

    /// Panel arrangement ('side-by-side' or 'stacked').
    #[arg(long)]
    layout: Option<Layout>,

    /// Where to write the rendered figure (format follows the extension).
    #[arg(long, short, default_value = "pairview.png")]
    output: PathBuf,
}

/// Arguments for the list subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// Directory to scan (defaults to the configured RGB image path).
    dir: Option<PathBuf>,

    /// How deep to descend into subdirectories.
    #[arg(long, default_value_t = 1)]
    max_depth: usize,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the objects subcommand.
#[derive(clap::Args)]
struct ObjectsArgs {
    /// VOC XML annotation file.
    input: PathBuf,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the check subcommand.
#[derive(clap::Args)]
struct CheckArgs {
    /// VOC XML annotation file.
    input: PathBuf,

    /// Image the annotation belongs to, for bounds checks.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the pairview CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), PairviewError> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Plot(args)) => run_plot(config_path, args),
        Some(Commands::List(args)) => run_list(config_path, args),
        Some(Commands::Objects(args)) => run_objects(args),
        Some(Commands::Check(args)) => run_check(config_path, args),
        None => {
            println!("pairview {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Paired RGB/IR sample viewer.");
            println!();
            println!("Run 'pairview --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the plot subcommand.
fn run_plot(config_path: Option<&Path>, args: PlotArgs) -> Result<(), PairviewError> {
    let mut config = Config::load(config_path)?;

    let roots = &mut config.roots;
    for (dir, flag) in [
        (&mut roots.rgb_img_dir, args.rgb_img_path),
        (&mut roots.rgb_anno_dir, args.rgb_anno_path),
        (&mut roots.ir_img_dir, args.ir_img_path),
        (&mut roots.ir_anno_dir, args.ir_anno_path),
    ] {
        if let Some(path) = flag {
            *dir = path;
        }
    }

    let id = match (args.img_id, args.file) {
        (Some(id), _) => id,
        (None, Some(file)) => sample::extract_sample_id(&file)?,
        (None, None) => config.img_id.clone(),
    };
    let layout = args.layout.unwrap_or(config.layout);

    let plotter = PairPlotter::from_config(&config);
    let figure = plotter.render_sample(&id)?;
    figure.save(&args.output, layout)?;

    println!(
        "Rendered sample {} ({} RGB box(es), {} IR box(es)) to {}",
        id,
        figure.rgb.overlay.len(),
        figure.ir.overlay.len(),
        args.output.display()
    );
    Ok(())
}

/// Execute the list subcommand.
fn run_list(config_path: Option<&Path>, args: ListArgs) -> Result<(), PairviewError> {
    let dir = match args.dir {
        Some(dir) => dir,
        None => Config::load(config_path)?.roots.rgb_img_dir,
    };
    let samples = sample::discover_samples(&dir, args.max_depth)?;

    match args.output.as_str() {
        "json" => println!("{}", to_json(&samples)?),
        "text" => {
            for found in &samples {
                println!("{}\t{}", found.id, found.path.display());
            }
        }
        other => return Err(unsupported_output(other)),
    }
    Ok(())
}

/// Execute the objects subcommand.
fn run_objects(args: ObjectsArgs) -> Result<(), PairviewError> {
    let annotation = annotation::io_voc_xml::read_voc_annotation(&args.input)?;

    match args.output.as_str() {
        "json" => println!("{}", to_json(&annotation)?),
        "text" => {
            println!(
                "{} object(s) in {}",
                annotation.objects.len(),
                args.input.display()
            );
            for (index, object) in annotation.objects.iter().enumerate() {
                let bbox = &object.bbox;
                println!(
                    "  {}: {} difficult={} bbox=({}, {}, {}, {})",
                    index,
                    object.class_name,
                    u8::from(object.difficult),
                    bbox.xmin,
                    bbox.ymin,
                    bbox.xmax,
                    bbox.ymax
                );
            }
        }
        other => return Err(unsupported_output(other)),
    }
    Ok(())
}

/// Execute the check subcommand.
fn run_check(config_path: Option<&Path>, args: CheckArgs) -> Result<(), PairviewError> {
    let config = Config::load(config_path)?;
    let annotation = annotation::io_voc_xml::read_voc_annotation(&args.input)?;
    let image_size = args
        .image
        .as_deref()
        .map(validation::probe_image_size)
        .transpose()?;

    let opts = validation::CheckOptions {
        strict: args.strict,
    };
    let report = validation::check_annotation(&annotation, &config.colormap, image_size);

    match args.output.as_str() {
        "json" => {
            #[derive(Serialize)]
            struct JsonReport<'a> {
                error_count: usize,
                warning_count: usize,
                issues: &'a [validation::CheckIssue],
            }
            let json = JsonReport {
                error_count: report.error_count(),
                warning_count: report.warning_count(),
                issues: &report.issues,
            };
            println!("{}", to_json(&json)?);
        }
        "text" => print!("{}", report),
        other => return Err(unsupported_output(other)),
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (opts.strict && has_warnings) {
        Err(PairviewError::CheckFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, PairviewError> {
    serde_json::to_string_pretty(value).map_err(PairviewError::JsonOutput)
}

fn unsupported_output(format: &str) -> PairviewError {
    PairviewError::UnsupportedFormat(format!("output '{}' (supported: text, json)", format))
}
