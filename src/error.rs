use std::path::PathBuf;
use thiserror::Error;

use crate::geometry::GeometryError;

/// The main error type for voc2yolo operations.
#[derive(Debug, Error)]
pub enum Voc2YoloError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO error at {path}: {source}")]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid VOC dataset at {path}: {}", problems.join("; "))]
    LayoutInvalid {
        path: PathBuf,
        problems: Vec<String>,
    },

    #[error("Need at least one image set list in {path}")]
    NoImageSets { path: PathBuf },

    #[error("Invalid class list {path}: {message}")]
    ClassListInvalid { path: PathBuf, message: String },

    #[error("Failed to parse VOC annotation {path}: {message}")]
    AnnotationParse { path: PathBuf, message: String },

    #[error("Cannot convert boxes in {path}: {source}")]
    Geometry {
        path: PathBuf,
        #[source]
        source: GeometryError,
    },

    #[error("Failed to write manifest {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize conversion report: {0}")]
    ReportWrite(#[source] serde_json::Error),
}

impl Voc2YoloError {
    /// Wrap an I/O error with the path it happened at.
    pub(crate) fn io_at(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Voc2YoloError::IoAt { path, source }
    }
}
