//! Pascal VOC per-image XML annotation records.
//!
//! Only the fields the YOLO conversion needs are read: `<size>` and, for each
//! `<object>`, its `<name>`, `<difficult>` flag and `<bndbox>` corners.
//!
//! Corner values are kept as text and only parsed with [`VocObject::bbox`],
//! so objects that end up filtered out never need a usable box.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Node;

use crate::error::Voc2YoloError;
use crate::geometry::{ImageSize, VocBox};

/// One parsed `Annotations/<id>.xml` file.
#[derive(Clone, Debug, PartialEq)]
pub struct VocAnnotation {
    pub size: ImageSize,
    pub objects: Vec<VocObject>,
}

/// One `<object>` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct VocObject {
    pub name: String,
    /// Raw `<difficult>` value; `0` when the element is absent.
    pub difficult: i64,
    /// `None` when the object has no `<bndbox>` element.
    pub bndbox: Option<RawBndBox>,
}

impl VocObject {
    /// Difficult objects are excluded from training labels.
    pub fn is_difficult(&self) -> bool {
        self.difficult == 1
    }

    /// Parse the `<bndbox>` corners.
    ///
    /// The error is a message naming the missing or invalid element.
    pub fn bbox(&self) -> Result<VocBox, String> {
        self.bndbox
            .as_ref()
            .ok_or_else(|| "missing <bndbox> in <object>".to_string())?
            .parse()
    }
}

/// Unparsed `<bndbox>` corner text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawBndBox {
    pub xmin: Option<String>,
    pub xmax: Option<String>,
    pub ymin: Option<String>,
    pub ymax: Option<String>,
}

impl RawBndBox {
    pub fn parse(&self) -> Result<VocBox, String> {
        Ok(VocBox::new(
            parse_corner(self.xmin.as_deref(), "xmin")?,
            parse_corner(self.xmax.as_deref(), "xmax")?,
            parse_corner(self.ymin.as_deref(), "ymin")?,
            parse_corner(self.ymax.as_deref(), "ymax")?,
        ))
    }
}

impl From<VocBox> for RawBndBox {
    fn from(bbox: VocBox) -> Self {
        Self {
            xmin: Some(bbox.xmin.to_string()),
            xmax: Some(bbox.xmax.to_string()),
            ymin: Some(bbox.ymin.to_string()),
            ymax: Some(bbox.ymax.to_string()),
        }
    }
}

fn parse_corner(raw: Option<&str>, tag: &str) -> Result<f64, String> {
    let raw = raw.ok_or_else(|| format!("missing <{tag}> in <bndbox>"))?;
    raw.parse::<f64>().map_err(|_| {
        format!("invalid <{tag}> value '{raw}' in <bndbox>; expected floating-point number")
    })
}

/// Read and parse an annotation file.
pub fn read_annotation(path: &Path) -> Result<VocAnnotation, Voc2YoloError> {
    let xml = fs::read_to_string(path).map_err(Voc2YoloError::io_at(path))?;
    parse_annotation_str(&xml, path)
}

/// Parse annotation XML from bytes.
///
/// The input must be valid UTF-8. Errors name `<memory>` as their path.
pub fn parse_annotation_slice(bytes: &[u8]) -> Result<VocAnnotation, Voc2YoloError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| Voc2YoloError::AnnotationParse {
        path: PathBuf::from("<memory>"),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    parse_annotation_str(xml, Path::new("<memory>"))
}

/// Parse annotation XML. `path` is only used in error messages.
pub fn parse_annotation_str(xml: &str, path: &Path) -> Result<VocAnnotation, Voc2YoloError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|source| Voc2YoloError::AnnotationParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let annotation = document.root_element();
    if annotation.tag_name().name() != "annotation" {
        return Err(Voc2YoloError::AnnotationParse {
            path: path.to_path_buf(),
            message: "missing <annotation> root element".to_string(),
        });
    }

    let size = required_child_element(annotation, "size", path, "<annotation>")?;
    let width = parse_required::<u32>(size, "width", path, "<size>", "u32")?;
    let height = parse_required::<u32>(size, "height", path, "<size>", "u32")?;

    let mut objects = Vec::new();
    for object in annotation
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
    {
        let name = required_child_text(object, "name", path, "<object>")?;
        let difficult = match optional_child_text(object, "difficult") {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| Voc2YoloError::AnnotationParse {
                    path: path.to_path_buf(),
                    message: format!(
                        "invalid <difficult> value '{raw}' in <object>; expected integer"
                    ),
                })?,
            None => 0,
        };

        let bndbox = child_element(object, "bndbox").map(|bndbox| RawBndBox {
            xmin: optional_child_text(bndbox, "xmin"),
            xmax: optional_child_text(bndbox, "xmax"),
            ymin: optional_child_text(bndbox, "ymin"),
            ymax: optional_child_text(bndbox, "ymax"),
        });

        objects.push(VocObject {
            name,
            difficult,
            bndbox,
        });
    }

    Ok(VocAnnotation {
        size: ImageSize::new(width, height),
        objects,
    })
}

fn required_child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<Node<'a, 'input>, Voc2YoloError> {
    child_element(node, tag).ok_or_else(|| Voc2YoloError::AnnotationParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn required_child_text(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<String, Voc2YoloError> {
    optional_child_text(node, tag).ok_or_else(|| Voc2YoloError::AnnotationParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn parse_required<T: std::str::FromStr>(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
    expected: &str,
) -> Result<T, Voc2YoloError> {
    let raw = required_child_text(node, tag, path, context)?;
    raw.parse::<T>().map_err(|_| Voc2YoloError::AnnotationParse {
        path: path.to_path_buf(),
        message: format!("invalid <{tag}> value '{raw}' in {context}; expected {expected}"),
    })
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn optional_child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<annotation>
  <folder>VOC2007</folder>
  <filename>000001.jpg</filename>
  <size>
    <width>353</width>
    <height>500</height>
    <depth>3</depth>
  </size>
  <object>
    <name>dog</name>
    <pose>Left</pose>
    <truncated>1</truncated>
    <difficult>0</difficult>
    <bndbox>
      <xmin>48</xmin>
      <ymin>240</ymin>
      <xmax>195</xmax>
      <ymax>371</ymax>
    </bndbox>
  </object>
  <object>
    <name>person</name>
    <difficult>1</difficult>
    <bndbox>
      <xmin>8.5</xmin>
      <ymin>12</ymin>
      <xmax>352</xmax>
      <ymax>498</ymax>
    </bndbox>
  </object>
</annotation>"#;

    #[test]
    fn parse_extracts_size_and_objects() {
        let parsed = parse_annotation_str(SAMPLE, Path::new("000001.xml")).expect("parse xml");

        assert_eq!(parsed.size, ImageSize::new(353, 500));
        assert_eq!(parsed.objects.len(), 2);

        assert_eq!(parsed.objects[0].name, "dog");
        assert!(!parsed.objects[0].is_difficult());
        assert_eq!(
            parsed.objects[0].bbox(),
            Ok(VocBox::new(48.0, 195.0, 240.0, 371.0))
        );

        assert_eq!(parsed.objects[1].name, "person");
        assert!(parsed.objects[1].is_difficult());
        assert_eq!(parsed.objects[1].bbox().map(|bbox| bbox.xmin), Ok(8.5));
    }

    #[test]
    fn missing_difficult_defaults_to_zero() {
        let xml = r#"<annotation>
  <size><width>10</width><height>10</height></size>
  <object>
    <name>cat</name>
    <bndbox><xmin>1</xmin><ymin>1</ymin><xmax>5</xmax><ymax>5</ymax></bndbox>
  </object>
</annotation>"#;

        let parsed = parse_annotation_str(xml, Path::new("a.xml")).expect("parse xml");
        assert_eq!(parsed.objects[0].difficult, 0);
    }

    #[test]
    fn missing_size_is_an_error() {
        let xml = "<annotation><object><name>cat</name></object></annotation>";
        let err = parse_annotation_str(xml, Path::new("a.xml")).unwrap_err();
        assert!(err.to_string().contains("missing <size>"));
    }

    #[test]
    fn box_corners_are_only_checked_on_request() {
        let xml = r#"<annotation>
  <size><width>10</width><height>10</height></size>
  <object>
    <name>cat</name>
    <bndbox><xmin>1</xmin><ymin>1</ymin><xmax>5</xmax></bndbox>
  </object>
  <object>
    <name>ignored_region</name>
    <difficult>0</difficult>
  </object>
  <object>
    <name>dog</name>
    <bndbox><xmin>1</xmin><ymin>one</ymin><xmax>5</xmax><ymax>5</ymax></bndbox>
  </object>
</annotation>"#;

        let parsed = parse_annotation_str(xml, Path::new("a.xml")).expect("parse xml");
        assert_eq!(parsed.objects.len(), 3);

        let err = parsed.objects[0].bbox().unwrap_err();
        assert!(err.contains("missing <ymax>"));

        assert_eq!(parsed.objects[1].bndbox, None);
        assert_eq!(
            parsed.objects[1].bbox().unwrap_err(),
            "missing <bndbox> in <object>"
        );

        let err = parsed.objects[2].bbox().unwrap_err();
        assert!(err.contains("invalid <ymin> value 'one'"));
    }

    #[test]
    fn objects_are_found_at_any_depth() {
        let xml = r#"<annotation>
  <size><width>10</width><height>10</height></size>
  <objects>
    <object>
      <name>cat</name>
      <bndbox><xmin>1</xmin><ymin>1</ymin><xmax>5</xmax><ymax>5</ymax></bndbox>
    </object>
  </objects>
  <object>
    <name>dog</name>
    <bndbox><xmin>2</xmin><ymin>2</ymin><xmax>6</xmax><ymax>6</ymax></bndbox>
  </object>
</annotation>"#;

        let parsed = parse_annotation_str(xml, Path::new("a.xml")).expect("parse xml");
        let names: Vec<&str> = parsed.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["cat", "dog"]);
    }

    #[test]
    fn raw_box_round_trips_through_text() {
        let bbox = VocBox::new(8.5, 352.0, 12.0, 498.25);
        assert_eq!(RawBndBox::from(bbox).parse(), Ok(bbox));
    }

    #[test]
    fn non_integer_width_is_an_error() {
        let xml = "<annotation><size><width>10.5</width><height>10</height></size></annotation>";
        let err = parse_annotation_str(xml, Path::new("a.xml")).unwrap_err();
        assert!(matches!(err, Voc2YoloError::AnnotationParse { .. }));
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let err = parse_annotation_slice(b"<annotation><size>").unwrap_err();
        assert!(matches!(err, Voc2YoloError::AnnotationParse { .. }));

        let err = parse_annotation_slice(&[0xff, 0xfe]).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }
}
