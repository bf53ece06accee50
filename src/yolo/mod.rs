//! YOLO output side: per-image label files and the dataset manifest.

pub mod label;
pub mod manifest;

pub use label::{transcode_annotation, LabelError, LabelStats};
pub use manifest::{manifest_path, write_manifest, Manifest};
