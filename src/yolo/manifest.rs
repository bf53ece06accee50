//! Dataset manifest for YOLO trainers.
//!
//! Written to `<output>/<output-dir-name>.yaml`:
//!
//! ```yaml
//! path: /abs/output
//! train: train
//! val: val
//! test: test
//! nc: 2
//! names:
//! - cat
//! - dog
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Voc2YoloError;
use crate::split::Split;
use crate::voc::ClassList;

const MANIFEST_EXTENSION: &str = "yaml";
const FALLBACK_MANIFEST_STEM: &str = "dataset";

/// The dataset descriptor consumed by YOLO training tools.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub path: PathBuf,
    pub train: String,
    pub val: String,
    pub test: String,
    pub nc: usize,
    pub names: Vec<String>,
}

impl Manifest {
    pub fn new(output_root: &Path, classes: &ClassList) -> Self {
        Self {
            path: output_root.to_path_buf(),
            train: Split::Train.dir_name().to_string(),
            val: Split::Val.dir_name().to_string(),
            test: Split::Test.dir_name().to_string(),
            nc: classes.len(),
            names: classes.names().to_vec(),
        }
    }
}

/// Where the manifest for `output_root` lives.
pub fn manifest_path(output_root: &Path) -> PathBuf {
    let stem = output_root
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_MANIFEST_STEM);
    output_root.join(format!("{stem}.{MANIFEST_EXTENSION}"))
}

/// Write the manifest, replacing any existing one. Returns its path.
pub fn write_manifest(output_root: &Path, classes: &ClassList) -> Result<PathBuf, Voc2YoloError> {
    let manifest = Manifest::new(output_root, classes);
    let path = manifest_path(output_root);

    let yaml = serde_yaml::to_string(&manifest).map_err(|source| Voc2YoloError::ManifestWrite {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, yaml).map_err(Voc2YoloError::io_at(&path))?;

    Ok(path)
}
