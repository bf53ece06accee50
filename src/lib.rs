//! voc2yolo: convert Pascal VOC detection datasets into the YOLO layout.
//!
//! A VOC dataset (`Annotations/`, `JPEGImages/`, `ImageSets/Main/`,
//! `labels.txt`) is turned into `train/`, `val/` and `test/` directories of
//! images with matching normalized label files, plus a YAML manifest for the
//! trainer.
//!
//! # Modules
//!
//! - [`geometry`]: pixel-corner to normalized center/size conversion
//! - [`voc`]: VOC layout, class list, image sets and XML annotations
//! - [`yolo`]: label files and the dataset manifest
//! - [`split`]: train/val/test split resolution
//! - [`materialize`]: writing the split directories
//! - [`conversion`]: the end-to-end pipeline and its report
//! - [`error`]: error types for voc2yolo operations

pub mod conversion;
pub mod error;
pub mod geometry;
pub mod materialize;
pub mod split;
pub mod voc;
pub mod yolo;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};

pub use conversion::{convert_voc_to_yolo, ConversionReport, ConvertOptions};
pub use error::Voc2YoloError;

/// Convert a VOC dataset (with the standard directory structure) to a YOLO dataset.
#[derive(Parser, Debug)]
#[command(name = "voc2yolo")]
#[command(version, about)]
struct Cli {
    /// Directory of the VOC dataset.
    #[arg(value_name = "DATASET_DIR")]
    dataset_dir: PathBuf,

    /// Output directory (defaults to the dataset directory).
    #[arg(long, env = "VOC2YOLO_OUTPUT")]
    output: Option<PathBuf>,

    /// Use the historical index-based split boundaries (fallback test split stays empty).
    #[arg(long)]
    legacy_split_boundary: bool,

    /// Write label values with a fixed number of decimals.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(0..=17))]
    precision: Option<u8>,

    /// Format of the final conversion report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Run the voc2yolo CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), Voc2YoloError> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let dataset_dir = resolve_path(&cli.dataset_dir)?;
    let output = cli.output.as_deref().map(resolve_path).transpose()?;

    let opts = ConvertOptions {
        output,
        boundary_mode: if cli.legacy_split_boundary {
            split::BoundaryMode::Legacy
        } else {
            split::BoundaryMode::Position
        },
        precision: cli.precision.map(usize::from),
    };

    let report = convert_voc_to_yolo(&dataset_dir, &opts)?;

    match cli.report {
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report).map_err(Voc2YoloError::ReportWrite)?;
            println!("{json}");
        }
        ReportFormat::Text => print!("{report}"),
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_filter = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .format_timestamp(None)
    .try_init();
}

/// Expand a leading `~` and make the path absolute.
fn resolve_path(path: &Path) -> Result<PathBuf, Voc2YoloError> {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    };

    std::path::absolute(&expanded).map_err(Voc2YoloError::io_at(expanded))
}
