//! Integer bounding boxes in VOC XYXY order.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in pixel XYXY format (xmin, ymin, xmax, ymax).
///
/// VOC annotations store integer corners, so coordinates are kept as `i64`
/// exactly as read from the file.
///
/// Note: This type does NOT enforce that min <= max. Malformed boxes stay
/// representable so that checks can report them and the renderer can draw
/// them as-is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BBox {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl BBox {
    /// Creates a new bounding box from explicit corners.
    #[inline]
    pub fn from_xyxy(xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Returns the width of the bounding box.
    ///
    /// May be negative if the box is malformed (xmax < xmin). Saturates at
    /// the `i64` range.
    #[inline]
    pub fn width(&self) -> i64 {
        self.xmax.saturating_sub(self.xmin)
    }

    /// Returns the height of the bounding box.
    ///
    /// May be negative if the box is malformed (ymax < ymin). Saturates at
    /// the `i64` range.
    #[inline]
    pub fn height(&self) -> i64 {
        self.ymax.saturating_sub(self.ymin)
    }

    /// Returns the area of the bounding box, saturating at the `i64` range.
    ///
    /// May be negative if the box is malformed.
    #[inline]
    pub fn area(&self) -> i64 {
        self.width().saturating_mul(self.height())
    }

    /// Returns true if the box has no extent along at least one axis.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.xmin == self.xmax || self.ymin == self.ymax
    }

    /// Returns true if the box is properly ordered (min <= max for both axes).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.xmin <= self.xmax && self.ymin <= self.ymax
    }

    /// Returns true if the box lies entirely within an image of the given size.
    pub fn is_within(&self, image_width: u32, image_height: u32) -> bool {
        let (w, h) = (i64::from(image_width), i64::from(image_height));
        self.xmin.min(self.xmax) >= 0
            && self.ymin.min(self.ymax) >= 0
            && self.xmin.max(self.xmax) <= w
            && self.ymin.max(self.ymax) <= h
    }

    /// Converts to XYWH format (x, y, width, height) with the origin at (xmin, ymin).
    ///
    /// Width and height saturate like [`BBox::width`]; use the corners when the
    /// exact far edge matters.
    #[inline]
    pub fn to_xywh(&self) -> (i64, i64, i64, i64) {
        (self.xmin, self.ymin, self.width(), self.height())
    }
}
