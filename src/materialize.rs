//! Writing the YOLO split directories.

use std::fs;
use std::path::{Path, PathBuf};

use crate::conversion::{ConversionIssue, ConversionIssueCode, ConversionReport};
use crate::error::Voc2YoloError;
use crate::split::{Split, SplitAssignment};
use crate::voc::{ClassList, VocLayout};
use crate::yolo::transcode_annotation;

/// Delete and recreate `<output>/{train,val,test}`.
///
/// Nothing else under `output_root` is touched.
pub fn prepare_split_dirs(output_root: &Path) -> Result<(), Voc2YoloError> {
    fs::create_dir_all(output_root).map_err(Voc2YoloError::io_at(output_root))?;

    for split in Split::ALL {
        let dir = output_root.join(split.dir_name());
        if dir.exists() {
            log::debug!("Removing previous {}", dir.display());
            fs::remove_dir_all(&dir).map_err(Voc2YoloError::io_at(&dir))?;
        }
        fs::create_dir(&dir).map_err(Voc2YoloError::io_at(&dir))?;
    }

    Ok(())
}

/// Copy each assigned image into its split directory and write its label.
///
/// Ids whose annotation or image cannot be found are skipped with a warning
/// and recorded in `report`. Malformed annotations abort the run.
pub fn materialize(
    assignment: &SplitAssignment,
    layout: &VocLayout,
    output_root: &Path,
    classes: &ClassList,
    precision: Option<usize>,
    report: &mut ConversionReport,
) -> Result<(), Voc2YoloError> {
    for split in Split::ALL {
        report.split_mut(split).assigned = assignment.ids(split).len();
    }

    for (split, id) in assignment.entries() {
        let split_dir = output_root.join(split.dir_name());

        let sources = match resolve_sources(layout, id) {
            Ok(sources) => sources,
            Err((code, missing)) => {
                log::warn!("Could not find {}", missing.display());
                report.add(ConversionIssue::warning(
                    code,
                    format!("{split}/{id}: could not find {}", missing.display()),
                ));
                report.split_mut(split).skipped += 1;
                continue;
            }
        };

        let image_name = sources
            .image
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("{id}.jpg")));
        let image_dest = split_dir.join(image_name);
        fs::copy(&sources.image, &image_dest).map_err(Voc2YoloError::io_at(&sources.image))?;

        let label_path = split_dir.join(format!("{id}.txt"));
        let stats = transcode_annotation(&sources.annotation, &label_path, classes, precision)?;
        log::trace!("{split}/{id}: {} of {} object(s) kept", stats.kept, stats.objects);

        report.labels.merge(stats);
        report.split_mut(split).converted += 1;
    }

    Ok(())
}

struct SourceFiles {
    annotation: PathBuf,
    image: PathBuf,
}

fn resolve_sources(
    layout: &VocLayout,
    id: &str,
) -> Result<SourceFiles, (ConversionIssueCode, PathBuf)> {
    let annotation = layout.annotation_path(id);
    if !annotation.is_file() {
        return Err((ConversionIssueCode::MissingAnnotation, annotation));
    }

    let image = layout
        .image_path(id)
        .map_err(|missing| (ConversionIssueCode::MissingImage, missing))?;

    Ok(SourceFiles { annotation, image })
}
