//! Fuzz target for VOC annotation XML parsing.
//!
//! Run with:
//!   cargo +nightly fuzz run voc_annotation_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use voc2yolo::voc::annotation::parse_annotation_slice;

fuzz_target!(|data: &[u8]| {
    // 10MB is far beyond any real annotation file.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = parse_annotation_slice(data);
});
