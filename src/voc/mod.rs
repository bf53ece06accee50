//! Pascal VOC input side: dataset layout, class list, image sets and
//! per-image XML annotations.
//!
//! The expected source tree:
//!
//! ```text
//! <root>/
//!   Annotations/<id>.xml
//!   JPEGImages/<id>.jpg | <id>.JPG
//!   ImageSets/Main/*.txt
//!   labels.txt
//! ```

pub mod annotation;
pub mod classes;
pub mod image_sets;
pub mod layout;

pub use annotation::{read_annotation, RawBndBox, VocAnnotation, VocObject};
pub use classes::ClassList;
pub use image_sets::ImageSets;
pub use layout::VocLayout;
