#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Bytes standing in for a JPEG; the converter copies images without decoding.
pub const FAKE_JPEG: &[u8] = b"\xff\xd8\xff\xe0fake-jpeg\xff\xd9";

/// One `<object>` entry for [`annotation_xml`].
pub struct Obj<'a> {
    pub name: &'a str,
    pub difficult: u8,
    /// `(xmin, xmax, ymin, ymax)`
    pub bbox: (f64, f64, f64, f64),
}

pub fn obj(name: &str, difficult: u8, bbox: (f64, f64, f64, f64)) -> Obj<'_> {
    Obj {
        name,
        difficult,
        bbox,
    }
}

pub fn annotation_xml(width: u32, height: u32, objects: &[Obj<'_>]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<annotation>\n");
    xml.push_str("  <folder>JPEGImages</folder>\n");
    xml.push_str(&format!(
        "  <size>\n    <width>{width}</width>\n    <height>{height}</height>\n    <depth>3</depth>\n  </size>\n"
    ));
    for object in objects {
        let (xmin, xmax, ymin, ymax) = object.bbox;
        xml.push_str(&format!(
            "  <object>\n    <name>{}</name>\n    <difficult>{}</difficult>\n    <bndbox>\n      <xmin>{xmin}</xmin>\n      <ymin>{ymin}</ymin>\n      <xmax>{xmax}</xmax>\n      <ymax>{ymax}</ymax>\n    </bndbox>\n  </object>\n",
            object.name, object.difficult
        ));
    }
    xml.push_str("</annotation>\n");
    xml
}

/// A VOC dataset tree under a temp directory.
pub struct VocFixture {
    pub root: PathBuf,
}

impl VocFixture {
    pub fn new(root: &Path, classes: &[&str]) -> Self {
        fs::create_dir_all(root.join("Annotations")).expect("create annotations dir");
        fs::create_dir_all(root.join("JPEGImages")).expect("create images dir");
        fs::create_dir_all(root.join("ImageSets/Main")).expect("create image sets dir");

        let mut labels = classes.join("\n");
        labels.push('\n');
        fs::write(root.join("labels.txt"), labels).expect("write labels.txt");

        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn annotation(&self, id: &str, width: u32, height: u32, objects: &[Obj<'_>]) -> &Self {
        fs::write(
            self.root.join(format!("Annotations/{id}.xml")),
            annotation_xml(width, height, objects),
        )
        .expect("write annotation");
        self
    }

    pub fn image(&self, id: &str, ext: &str) -> &Self {
        fs::write(self.root.join(format!("JPEGImages/{id}.{ext}")), FAKE_JPEG)
            .expect("write image");
        self
    }

    /// Annotation with one `cat` box plus its `.jpg` image.
    pub fn sample(&self, id: &str) -> &Self {
        self.annotation(id, 100, 100, &[obj("cat", 0, (10.0, 30.0, 10.0, 30.0))])
            .image(id, "jpg")
    }

    pub fn image_set(&self, name: &str, ids: &[&str]) -> &Self {
        let mut content = ids.join("\n");
        content.push('\n');
        fs::write(self.root.join("ImageSets/Main").join(name), content)
            .expect("write image set");
        self
    }
}

/// Parse a label file into `(class_id, [x, y, w, h])` rows.
pub fn read_label(path: &Path) -> Vec<(usize, [f64; 4])> {
    fs::read_to_string(path)
        .expect("read label file")
        .lines()
        .map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            assert_eq!(tokens.len(), 5, "label line '{line}'");
            let class_id = tokens[0].parse().expect("class id");
            let mut values = [0.0; 4];
            for (slot, token) in values.iter_mut().zip(&tokens[1..]) {
                *slot = token.parse().expect("float value");
            }
            (class_id, values)
        })
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Sorted file names directly inside `dir`.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
