//! VOC annotation to YOLO label file transcoding.
//!
//! One label line per kept object:
//!
//! ```text
//! <class_id> <x_center> <y_center> <width> <height>
//! ```
//!
//! Objects whose class is not in the class list, and objects flagged
//! difficult, are dropped. An image with no kept objects still gets an
//! (empty) label file.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::error::Voc2YoloError;
use crate::geometry::{to_yolo_box, GeometryError};
use crate::voc::{read_annotation, ClassList, VocAnnotation};

/// Why a kept object could not be written as a label line.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LabelError {
    /// The object's `<bndbox>` is missing or has an unusable corner.
    #[error("{0}")]
    Box(String),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Per-image object counts from one transcoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LabelStats {
    /// `<object>` entries in the annotation.
    pub objects: usize,
    /// Objects written as label lines.
    pub kept: usize,
    /// Objects dropped for the difficult flag.
    pub difficult: usize,
    /// Objects dropped because their class is not listed.
    pub unknown_class: usize,
}

impl LabelStats {
    pub fn merge(&mut self, other: LabelStats) {
        self.objects += other.objects;
        self.kept += other.kept;
        self.difficult += other.difficult;
        self.unknown_class += other.unknown_class;
    }
}

/// Read `annotation_path` and write its YOLO label file to `label_path`.
///
/// `precision` is forwarded to [`YoloBox::write_fields`](crate::geometry::YoloBox::write_fields).
pub fn transcode_annotation(
    annotation_path: &Path,
    label_path: &Path,
    classes: &ClassList,
    precision: Option<usize>,
) -> Result<LabelStats, Voc2YoloError> {
    let annotation = read_annotation(annotation_path)?;
    let (content, stats) =
        to_label_string(&annotation, classes, precision).map_err(|err| match err {
            LabelError::Box(message) => Voc2YoloError::AnnotationParse {
                path: annotation_path.to_path_buf(),
                message,
            },
            LabelError::Geometry(source) => Voc2YoloError::Geometry {
                path: annotation_path.to_path_buf(),
                source,
            },
        })?;

    fs::write(label_path, content).map_err(Voc2YoloError::io_at(label_path))?;
    Ok(stats)
}

/// Render the label file contents for one parsed annotation.
///
/// Box corners are parsed only for objects that pass the class and
/// difficult filters.
pub fn to_label_string(
    annotation: &VocAnnotation,
    classes: &ClassList,
    precision: Option<usize>,
) -> Result<(String, LabelStats), LabelError> {
    let mut out = String::new();
    let mut stats = LabelStats {
        objects: annotation.objects.len(),
        ..Default::default()
    };

    for object in &annotation.objects {
        let Some(class_id) = classes.id_of(&object.name) else {
            stats.unknown_class += 1;
            continue;
        };
        if object.is_difficult() {
            stats.difficult += 1;
            continue;
        }

        let bbox = object.bbox().map_err(LabelError::Box)?;
        let yolo = to_yolo_box(annotation.size, bbox)?;

        write!(out, "{class_id} ").expect("write to string");
        yolo.write_fields(&mut out, precision)
            .expect("write to string");
        out.push('\n');
        stats.kept += 1;
    }

    Ok((out, stats))
}
