//! Image set lists under `ImageSets/Main/`.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Voc2YoloError;

const IMAGE_SET_EXTENSION: &str = "txt";
const MEMBERSHIP_FLAGS: [&str; 3] = ["-1", "0", "1"];

/// The image set list files found in `ImageSets/Main/`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageSets {
    dir: PathBuf,
    /// File names, sorted lexicographically.
    files: Vec<String>,
}

impl ImageSets {
    /// List the `*.txt` files directly inside `dir`, sorted by file name.
    pub fn scan(dir: &Path) -> Result<Self, Voc2YoloError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| Voc2YoloError::IoAt {
                path: dir.to_path_buf(),
                source: source.into(),
            })?;

            if !entry.file_type().is_file() || !has_list_extension(entry.path()) {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                files.push(name.to_string());
            }
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            files,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.files.iter().any(|name| name == file_name)
    }

    /// Lexicographically first list file.
    pub fn first(&self) -> Option<&str> {
        self.files.first().map(String::as_str)
    }

    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Read the identifiers of one list file, in file order.
    pub fn read_ids(&self, file_name: &str) -> Result<Vec<String>, Voc2YoloError> {
        read_id_list(&self.path_of(file_name))
    }
}

/// Read an image set list: one identifier per line, blanks skipped.
///
/// A line is the identifier after trimming. Per-class lists carry a
/// trailing `-1`/`0`/`1` membership flag, which is dropped.
pub fn read_id_list(path: &Path) -> Result<Vec<String>, Voc2YoloError> {
    let data = fs::read_to_string(path).map_err(Voc2YoloError::io_at(path))?;
    Ok(parse_id_list(&data))
}

fn parse_id_list(data: &str) -> Vec<String> {
    data.lines().filter_map(parse_id_line).map(ToOwned::to_owned).collect()
}

fn parse_id_line(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match line.rsplit_once(char::is_whitespace) {
        Some((id, flag)) if MEMBERSHIP_FLAGS.contains(&flag) => Some(id.trim_end()),
        _ => Some(line),
    }
}

fn has_list_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(IMAGE_SET_EXTENSION))
        .unwrap_or(false)
}
