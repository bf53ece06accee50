//! Pixel-corner to YOLO box conversion.
//!
//! VOC stores boxes as absolute pixel corners; YOLO wants the box center and
//! size as fractions of the image dimensions. The conversion keeps the
//! historical Darknet `- 1` shift on the center, so centers come out one
//! pixel up and to the left and values may land slightly outside `[0, 1]`.

use std::fmt;

use thiserror::Error;

/// Image dimensions in pixels, as read from the annotation's `<size>` block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// An absolute pixel box in VOC field order: `xmin, xmax, ymin, ymax`.
///
/// The corners are not required to be ordered or inside the image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VocBox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl VocBox {
    #[inline]
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }
}

/// A normalized YOLO box: center x/y and width/height relative to the image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YoloBox {
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl YoloBox {
    /// Write the four values space-separated.
    ///
    /// `precision` fixes the number of decimals; `None` uses the shortest
    /// representation that round-trips.
    pub fn write_fields(&self, out: &mut impl fmt::Write, precision: Option<usize>) -> fmt::Result {
        let values = [self.x_center, self.y_center, self.width, self.height];
        for (idx, value) in values.iter().enumerate() {
            if idx > 0 {
                out.write_char(' ')?;
            }
            match precision {
                Some(digits) => write!(out, "{:.*}", digits, value)?,
                None => write!(out, "{}", value)?,
            }
        }
        Ok(())
    }
}

/// Conversion failures. Only degenerate image sizes can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("image size {width}x{height} has a zero dimension")]
    ZeroDimension { width: u32, height: u32 },
}

/// Convert a pixel-corner box into a normalized YOLO box.
///
/// ```
/// use voc2yolo::geometry::{to_yolo_box, ImageSize, VocBox};
///
/// let yolo = to_yolo_box(ImageSize::new(200, 100), VocBox::new(50.0, 150.0, 20.0, 80.0)).unwrap();
/// assert!((yolo.x_center - 0.495).abs() < 1e-12);
/// assert!((yolo.height - 0.6).abs() < 1e-12);
/// ```
pub fn to_yolo_box(size: ImageSize, bbox: VocBox) -> Result<YoloBox, GeometryError> {
    if size.width == 0 || size.height == 0 {
        return Err(GeometryError::ZeroDimension {
            width: size.width,
            height: size.height,
        });
    }

    let image_w = f64::from(size.width);
    let image_h = f64::from(size.height);

    let x_center = (bbox.xmin + bbox.xmax) / 2.0 - 1.0;
    let y_center = (bbox.ymin + bbox.ymax) / 2.0 - 1.0;
    let width = bbox.xmax - bbox.xmin;
    let height = bbox.ymax - bbox.ymin;

    Ok(YoloBox {
        x_center: x_center / image_w,
        y_center: y_center / image_h,
        width: width / image_w,
        height: height / image_h,
    })
}
