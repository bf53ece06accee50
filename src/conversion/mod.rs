//! VOC to YOLO conversion pipeline.
//!
//! Every check that can fail without touching the disk (layout, class list,
//! image set lists) runs before the output split directories are cleared.

pub mod report;

pub use report::{
    ConversionIssue, ConversionIssueCode, ConversionReport, ConversionSeverity, SplitCounts,
};

use std::path::{Path, PathBuf};

use crate::error::Voc2YoloError;
use crate::materialize::{materialize, prepare_split_dirs};
use crate::split::{resolve_split, BoundaryMode, Split, SplitStrategy};
use crate::voc::{ClassList, ImageSets, VocLayout};
use crate::yolo::write_manifest;

/// Options for one conversion run.
#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    /// Output root; `None` writes next to the VOC tree in the dataset root.
    pub output: Option<PathBuf>,
    pub boundary_mode: BoundaryMode,
    /// Fixed number of decimals for label values; `None` for shortest form.
    pub precision: Option<usize>,
}

/// Convert the VOC dataset at `source` into the YOLO layout.
pub fn convert_voc_to_yolo(
    source: &Path,
    opts: &ConvertOptions,
) -> Result<ConversionReport, Voc2YoloError> {
    let layout = VocLayout::discover(source)?;
    let classes = ClassList::read(&layout.labels_file)?;
    let sets = ImageSets::scan(&layout.image_sets_dir)?;
    let assignment = resolve_split(&sets, opts.boundary_mode)?;

    let output_root = opts.output.clone().unwrap_or_else(|| source.to_path_buf());
    let mut report = ConversionReport::new(source, &output_root, assignment.strategy.clone());
    report.boundary_mode = opts.boundary_mode;
    add_policy_notes(&mut report, &assignment.strategy, opts.boundary_mode);

    prepare_split_dirs(&output_root)?;
    materialize(
        &assignment,
        &layout,
        &output_root,
        &classes,
        opts.precision,
        &mut report,
    )?;

    for split in Split::ALL {
        if report.split(split).converted == 0 {
            report.add(ConversionIssue::info(
                ConversionIssueCode::EmptySplit,
                format!("{split} split is empty"),
            ));
        }
    }

    let manifest = write_manifest(&output_root, &classes)?;
    log::info!(
        "Finished converting dataset, make sure to update the {} file if you change the dataset location!",
        manifest
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    );
    report.manifest = Some(manifest);

    Ok(report)
}

fn add_policy_notes(report: &mut ConversionReport, strategy: &SplitStrategy, mode: BoundaryMode) {
    if let SplitStrategy::Synthesized { source } = strategy {
        report.add(ConversionIssue::info(
            ConversionIssueCode::FallbackImageSet,
            format!(
                "no train/val/test or test/trainval lists found; split {source} (first list in name order) 75/18/7"
            ),
        ));
    }

    if mode == BoundaryMode::Legacy {
        report.add(ConversionIssue::info(
            ConversionIssueCode::LegacySplitBoundary,
            "legacy split boundaries: 0-based index comparisons, fallback test split left empty",
        ));
    }
}
