//! Train/val/test split resolution from VOC image set lists.
//!
//! Strategies, in priority order:
//!
//! 1. `train.txt`, `val.txt` and `test.txt` all exist: used as-is.
//! 2. `test.txt` and `trainval.txt` exist: `test.txt` as-is, `trainval.txt`
//!    split 90/10 by position into train/val.
//! 3. Otherwise the lexicographically first list file is split 75/18/7 by
//!    position into train/test/val.
//!
//! No list at all is an error.

use std::fmt;

use serde::Serialize;

use crate::error::Voc2YoloError;
use crate::voc::ImageSets;

const TRAIN_LIST: &str = "train.txt";
const VAL_LIST: &str = "val.txt";
const TEST_LIST: &str = "test.txt";
const TRAINVAL_LIST: &str = "trainval.txt";

const TRAINVAL_TRAIN_FRACTION: f64 = 0.9;
const FALLBACK_TRAIN_FRACTION: f64 = 0.75;
const FALLBACK_TEST_FRACTION: f64 = 0.93;

/// One of the three output splits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Val, Split::Test];

    /// Output directory name, also recorded in the manifest.
    pub fn dir_name(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// How partition boundaries are compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// The 1-based position `p` of an id is compared against `fraction * N`.
    #[default]
    Position,
    /// Historical comparisons: 0-based index against `fraction * N`, and the
    /// fallback test boundary against the raw constant `0.93`. Under this mode
    /// the fallback test split is always empty.
    Legacy,
}

/// Which strategy produced an assignment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SplitStrategy {
    /// `train.txt`, `val.txt` and `test.txt` used verbatim.
    Explicit,
    /// `test.txt` verbatim; `trainval.txt` split into train/val.
    TrainvalHoldout,
    /// One list split into train/test/val.
    Synthesized { source: String },
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitStrategy::Explicit => write!(f, "explicit train/val/test lists"),
            SplitStrategy::TrainvalHoldout => {
                write!(f, "test list + trainval split 90/10")
            }
            SplitStrategy::Synthesized { source } => {
                write!(f, "{source} split 75/18/7")
            }
        }
    }
}

/// Image ids per split, in list order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitAssignment {
    pub strategy: SplitStrategy,
    pub train: Vec<String>,
    pub val: Vec<String>,
    pub test: Vec<String>,
}

impl SplitAssignment {
    pub fn ids(&self, split: Split) -> &[String] {
        match split {
            Split::Train => &self.train,
            Split::Val => &self.val,
            Split::Test => &self.test,
        }
    }

    /// Every `(split, id)` pair, split by split.
    pub fn entries(&self) -> impl Iterator<Item = (Split, &str)> + '_ {
        Split::ALL
            .into_iter()
            .flat_map(move |split| self.ids(split).iter().map(move |id| (split, id.as_str())))
    }
}

/// Pick a strategy from the available lists and read the assignment.
pub fn resolve_split(
    sets: &ImageSets,
    mode: BoundaryMode,
) -> Result<SplitAssignment, Voc2YoloError> {
    if sets.contains(TEST_LIST) && sets.contains(TRAIN_LIST) && sets.contains(VAL_LIST) {
        log::info!("Found test, train and val");
        return Ok(SplitAssignment {
            strategy: SplitStrategy::Explicit,
            train: sets.read_ids(TRAIN_LIST)?,
            val: sets.read_ids(VAL_LIST)?,
            test: sets.read_ids(TEST_LIST)?,
        });
    }

    if sets.contains(TEST_LIST) && sets.contains(TRAINVAL_LIST) {
        log::info!("Found test and trainval, splitting trainval into train and val with 90/10");
        let test = sets.read_ids(TEST_LIST)?;
        let (train, val) = partition_trainval(sets.read_ids(TRAINVAL_LIST)?, mode);
        return Ok(SplitAssignment {
            strategy: SplitStrategy::TrainvalHoldout,
            train,
            val,
            test,
        });
    }

    let Some(source) = sets.first() else {
        return Err(Voc2YoloError::NoImageSets {
            path: sets.dir().to_path_buf(),
        });
    };

    log::info!("Did not find the right image sets, creating own division 75/18/7");
    log::info!("Using {} as image set", sets.path_of(source).display());
    let (train, test, val) = partition_fallback(sets.read_ids(source)?, mode);

    Ok(SplitAssignment {
        strategy: SplitStrategy::Synthesized {
            source: source.to_string(),
        },
        train,
        val,
        test,
    })
}

/// Split `trainval` ids into `(train, val)`: the first 90% go to train.
pub fn partition_trainval(ids: Vec<String>, mode: BoundaryMode) -> (Vec<String>, Vec<String>) {
    let total = ids.len();
    let mut train = Vec::new();
    let mut val = Vec::new();

    for (index, id) in ids.into_iter().enumerate() {
        if within(index, total, TRAINVAL_TRAIN_FRACTION, mode) {
            train.push(id);
        } else {
            val.push(id);
        }
    }

    (train, val)
}

/// Split one list into `(train, test, val)`: 75% train, up to 93% test, rest val.
pub fn partition_fallback(
    ids: Vec<String>,
    mode: BoundaryMode,
) -> (Vec<String>, Vec<String>, Vec<String>) {
    let total = ids.len();
    let mut train = Vec::new();
    let mut test = Vec::new();
    let mut val = Vec::new();

    for (index, id) in ids.into_iter().enumerate() {
        if within(index, total, FALLBACK_TRAIN_FRACTION, mode) {
            train.push(id);
        } else if within_test(index, total, mode) {
            test.push(id);
        } else {
            val.push(id);
        }
    }

    (train, test, val)
}

fn within(index: usize, total: usize, fraction: f64, mode: BoundaryMode) -> bool {
    let bound = fraction * total as f64;
    match mode {
        BoundaryMode::Position => (index + 1) as f64 <= bound,
        BoundaryMode::Legacy => index as f64 <= bound,
    }
}

fn within_test(index: usize, total: usize, mode: BoundaryMode) -> bool {
    match mode {
        BoundaryMode::Position => within(index, total, FALLBACK_TEST_FRACTION, mode),
        BoundaryMode::Legacy => index as f64 <= FALLBACK_TEST_FRACTION,
    }
}
