//! Annotation records and the VOC XML format they are stored in.
//!
//! Each RGB or IR image has one VOC-style XML file next to it (in a
//! separate annotation directory). Parsing produces [`ObjectRecord`]s in
//! document order; the order matters because later boxes are drawn on top
//! of earlier ones.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use pairview::annotation::{io_voc_xml::parse_voc_str, BBox};
//!
//! let xml = "<annotation><object><name>person</name><difficult>0</difficult>\
//!            <bndbox><xmin>10</xmin><ymin>20</ymin><xmax>50</xmax><ymax>80</ymax></bndbox>\
//!            </object></annotation>";
//! let annotation = parse_voc_str(xml, Path::new("IR_37.xml")).unwrap();
//! assert_eq!(annotation.objects[0].bbox, BBox::from_xyxy(10, 20, 50, 80));
//! ```

mod bbox;
pub mod io_voc_xml;
mod model;

pub use bbox::BBox;
pub use model::{ImageSize, ObjectRecord, VocAnnotation};
