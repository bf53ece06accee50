#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use voc2yolo::geometry::{ImageSize, VocBox};
use voc2yolo::voc::{ClassList, RawBndBox, VocAnnotation, VocObject};

pub const CLASS_POOL: [&str; 6] = ["person", "car", "dog", "cat", "bicycle", "bus"];

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_image_size() -> impl Strategy<Value = ImageSize> {
    (1u32..=4096, 1u32..=4096).prop_map(|(w, h)| ImageSize::new(w, h))
}

/// Boxes inside (or slightly past) the image, corners possibly swapped.
pub fn arb_voc_box(size: ImageSize) -> impl Strategy<Value = VocBox> {
    let max_x = f64::from(size.width) + 1.0;
    let max_y = f64::from(size.height) + 1.0;
    (0.0..max_x, 0.0..max_x, 0.0..max_y, 0.0..max_y)
        .prop_map(|(xmin, xmax, ymin, ymax)| VocBox::new(xmin, xmax, ymin, ymax))
}

/// A class list drawn from the first 1..=4 pool names.
pub fn arb_class_list() -> impl Strategy<Value = ClassList> {
    (1usize..=4).prop_map(|n| {
        ClassList::new(CLASS_POOL[..n].iter().map(|name| name.to_string()).collect())
            .expect("pool names are distinct")
    })
}

/// Annotations whose objects use any pool name, so some are not listed.
pub fn arb_annotation(max_objects: usize) -> impl Strategy<Value = VocAnnotation> {
    arb_image_size().prop_flat_map(move |size| {
        let object = (
            0usize..CLASS_POOL.len(),
            prop_oneof![4 => Just(0i64), 1 => Just(1i64)],
            arb_voc_box(size),
        )
            .prop_map(|(class_idx, difficult, bbox)| VocObject {
                name: CLASS_POOL[class_idx].to_string(),
                difficult,
                bndbox: Some(RawBndBox::from(bbox)),
            });

        proptest::collection::vec(object, 0..=max_objects)
            .prop_map(move |objects| VocAnnotation { size, objects })
    })
}
