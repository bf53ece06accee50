//! Fuzz target for `labels.txt` parsing.
//!
//! Run with:
//!   cargo +nightly fuzz run class_list_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use voc2yolo::voc::ClassList;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = ClassList::fuzz_parse(text);
    }
});
