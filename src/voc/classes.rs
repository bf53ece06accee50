//! The ordered class list from `labels.txt`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::Voc2YoloError;

/// Ordered, distinct class names. A class id is its position in the list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassList {
    names: Vec<String>,
}

impl ClassList {
    /// Build a class list, rejecting duplicate names.
    pub fn new(names: Vec<String>) -> Result<Self, String> {
        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(format!("duplicate class name '{name}'"));
            }
        }
        Ok(Self { names })
    }

    /// Read `labels.txt`: one class name per line, order-significant.
    ///
    /// Lines are trimmed and trailing blank lines are ignored. A blank line
    /// between names would silently shift every later class id, so it is an
    /// error.
    pub fn read(path: &Path) -> Result<Self, Voc2YoloError> {
        let data = fs::read_to_string(path).map_err(Voc2YoloError::io_at(path))?;
        Self::parse(&data).map_err(|message| Voc2YoloError::ClassListInvalid {
            path: path.to_path_buf(),
            message,
        })
    }

    fn parse(data: &str) -> Result<Self, String> {
        let lines: Vec<&str> = data.lines().map(str::trim).collect();
        let used = lines
            .iter()
            .rposition(|line| !line.is_empty())
            .map_or(0, |last| last + 1);

        let mut names = Vec::with_capacity(used);
        for (line_idx, line) in lines[..used].iter().enumerate() {
            if line.is_empty() {
                return Err(format!("line {} is empty", line_idx + 1));
            }
            names.push((*line).to_string());
        }

        Self::new(names)
    }

    /// Fuzz-only entrypoint for `labels.txt` parsing.
    #[cfg(feature = "fuzzing")]
    pub fn fuzz_parse(data: &str) -> Result<(), String> {
        let _ = Self::parse(data)?;
        Ok(())
    }

    /// Zero-based class id of `name`, if it is listed.
    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|candidate| candidate == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
