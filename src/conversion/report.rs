//! Conversion report types for tracking skipped images and policy decisions.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::split::{BoundaryMode, Split, SplitStrategy};
use crate::yolo::LabelStats;

/// A report generated by one VOC to YOLO conversion run.
#[derive(Clone, Debug, Serialize)]
pub struct ConversionReport {
    /// VOC dataset root.
    pub source: PathBuf,
    /// YOLO output root.
    pub output: PathBuf,
    /// Which image set lists produced the split.
    pub strategy: SplitStrategy,
    pub boundary_mode: BoundaryMode,
    /// Per-split counts, in train/val/test order.
    pub splits: Vec<SplitCounts>,
    /// Object totals over every written label file.
    pub labels: LabelStats,
    /// Manifest path, once written.
    pub manifest: Option<PathBuf>,
    pub issues: Vec<ConversionIssue>,
}

impl ConversionReport {
    pub fn new(
        source: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        strategy: SplitStrategy,
    ) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            strategy,
            boundary_mode: BoundaryMode::default(),
            splits: Split::ALL.into_iter().map(SplitCounts::new).collect(),
            labels: LabelStats::default(),
            manifest: None,
            issues: Vec::new(),
        }
    }

    pub fn add(&mut self, issue: ConversionIssue) {
        self.issues.push(issue);
    }

    pub fn split(&self, split: Split) -> &SplitCounts {
        self.splits
            .iter()
            .find(|counts| counts.split == split)
            .expect("report tracks every split")
    }

    pub fn split_mut(&mut self, split: Split) -> &mut SplitCounts {
        self.splits
            .iter_mut()
            .find(|counts| counts.split == split)
            .expect("report tracks every split")
    }

    /// Images copied (with their label files) across all splits.
    pub fn converted(&self) -> usize {
        self.splits.iter().map(|counts| counts.converted).sum()
    }

    /// Ids skipped for a missing annotation or image.
    pub fn skipped(&self) -> usize {
        self.splits.iter().map(|counts| counts.skipped).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Warning)
            .count()
    }

    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Info)
            .count()
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Converted {} -> {}",
            self.source.display(),
            self.output.display()
        )?;
        writeln!(f, "  split strategy: {}", self.strategy)?;

        for counts in &self.splits {
            writeln!(
                f,
                "  {}: {} image(s) converted, {} skipped ({} listed)",
                counts.split, counts.converted, counts.skipped, counts.assigned
            )?;
        }

        writeln!(
            f,
            "  objects: {} written, {} difficult dropped, {} unknown class dropped",
            self.labels.kept, self.labels.difficult, self.labels.unknown_class
        )?;

        if let Some(manifest) = &self.manifest {
            writeln!(f, "  manifest: {}", manifest.display())?;
        }

        let warnings = self.warning_count();
        if warnings > 0 {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", warnings)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ConversionSeverity::Warning)
            {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        let infos = self.info_count();
        if infos > 0 {
            writeln!(f)?;
            writeln!(f, "Notes ({}):", infos)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ConversionSeverity::Info)
            {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        Ok(())
    }
}

/// Counts for one output split.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SplitCounts {
    pub split: Split,
    /// Ids the split resolver assigned.
    pub assigned: usize,
    /// Ids with an image copied and a label file written.
    pub converted: usize,
    /// Ids skipped for a missing annotation or image.
    pub skipped: usize,
}

impl SplitCounts {
    pub fn new(split: Split) -> Self {
        Self {
            split,
            assigned: 0,
            converted: 0,
            skipped: 0,
        }
    }
}

/// A single issue recorded during conversion.
#[derive(Clone, Debug, Serialize)]
pub struct ConversionIssue {
    pub severity: ConversionSeverity,
    pub code: ConversionIssueCode,
    pub message: String,
}

impl ConversionIssue {
    pub fn warning(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn info(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Info,
            code,
            message: message.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionSeverity {
    /// Something listed could not be converted.
    Warning,
    /// A policy decision; nothing was lost.
    Info,
}

/// Stable issue codes for programmatic consumption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionIssueCode {
    /// `Annotations/<id>.xml` does not exist.
    MissingAnnotation,
    /// Neither `JPEGImages/<id>.jpg` nor `<id>.JPG` exists.
    MissingImage,
    /// The split was synthesized from the first list file found.
    FallbackImageSet,
    /// Historical boundary comparisons were requested.
    LegacySplitBoundary,
    /// A split received no ids.
    EmptySplit,
}
