//! VOC dataset root discovery and validation.

use std::path::{Path, PathBuf};

use crate::error::Voc2YoloError;

const ANNOTATIONS_DIR: &str = "Annotations";
const IMAGES_DIR: &str = "JPEGImages";
const IMAGE_SETS_DIR: &str = "ImageSets";
const IMAGE_SETS_MAIN_DIR: &str = "Main";
const LABELS_FILE: &str = "labels.txt";

/// The validated input paths of a VOC dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocLayout {
    pub root: PathBuf,
    pub annotations_dir: PathBuf,
    pub images_dir: PathBuf,
    pub image_sets_dir: PathBuf,
    pub labels_file: PathBuf,
}

impl VocLayout {
    /// Check that `root` holds every input the conversion needs.
    ///
    /// All missing pieces are reported together in one
    /// [`Voc2YoloError::LayoutInvalid`], before anything is written.
    pub fn discover(root: &Path) -> Result<Self, Voc2YoloError> {
        if !root.is_dir() {
            return Err(Voc2YoloError::LayoutInvalid {
                path: root.to_path_buf(),
                problems: vec!["dataset directory does not exist".to_string()],
            });
        }

        let layout = Self {
            root: root.to_path_buf(),
            annotations_dir: root.join(ANNOTATIONS_DIR),
            images_dir: root.join(IMAGES_DIR),
            image_sets_dir: root.join(IMAGE_SETS_DIR).join(IMAGE_SETS_MAIN_DIR),
            labels_file: root.join(LABELS_FILE),
        };

        let mut problems = Vec::new();
        if !layout.annotations_dir.is_dir() {
            problems.push(format!("missing {ANNOTATIONS_DIR}/ directory"));
        }
        if !root.join(IMAGE_SETS_DIR).is_dir() {
            problems.push(format!("missing {IMAGE_SETS_DIR}/ directory"));
        }
        if !layout.images_dir.is_dir() {
            problems.push(format!("missing {IMAGES_DIR}/ directory"));
        }
        if !layout.image_sets_dir.is_dir() {
            problems.push(format!(
                "missing {} directory",
                layout.image_sets_dir.display()
            ));
        }
        if !layout.labels_file.is_file() {
            problems.push(format!("missing {LABELS_FILE} file"));
        }

        if problems.is_empty() {
            Ok(layout)
        } else {
            Err(Voc2YoloError::LayoutInvalid {
                path: root.to_path_buf(),
                problems,
            })
        }
    }

    /// `Annotations/<id>.xml`
    pub fn annotation_path(&self, id: &str) -> PathBuf {
        self.annotations_dir.join(format!("{id}.xml"))
    }

    /// `JPEGImages/<id>.jpg`, falling back to `<id>.JPG`.
    ///
    /// Returns the last candidate tried as the error so callers can name it.
    pub fn image_path(&self, id: &str) -> Result<PathBuf, PathBuf> {
        let lower = self.images_dir.join(format!("{id}.jpg"));
        if lower.is_file() {
            return Ok(lower);
        }
        let upper = self.images_dir.join(format!("{id}.JPG"));
        if upper.is_file() {
            return Ok(upper);
        }
        Err(upper)
    }
}
