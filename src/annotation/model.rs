//! Annotation records as read from a single VOC XML file.

use serde::{Deserialize, Serialize};

use super::bbox::BBox;

/// One annotated object: class name, difficulty flag and bounding box.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Object class, e.g. `person`. Used as the colormap key.
    pub class_name: String,

    /// The VOC `difficult` flag.
    pub difficult: bool,

    /// Bounding box in pixel coordinates.
    pub bbox: BBox,
}

impl ObjectRecord {
    /// Creates a new non-difficult record.
    pub fn new(class_name: impl Into<String>, bbox: BBox) -> Self {
        Self {
            class_name: class_name.into(),
            difficult: false,
            bbox,
        }
    }

    /// Returns the record with the `difficult` flag set to `difficult`.
    pub fn with_difficult(mut self, difficult: bool) -> Self {
        self.difficult = difficult;
        self
    }
}

/// Image size as declared in an annotation's `<size>` element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

/// A parsed VOC annotation document.
///
/// Only `objects` is required for rendering; `filename` and `size` are kept
/// when the file declares them so that checks can compare boxes against the
/// image bounds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,

    /// Objects in document order.
    pub objects: Vec<ObjectRecord>,
}

impl VocAnnotation {
    /// Creates an annotation holding only objects.
    pub fn from_objects(objects: Vec<ObjectRecord>) -> Self {
        Self {
            filename: None,
            size: None,
            objects,
        }
    }
}
