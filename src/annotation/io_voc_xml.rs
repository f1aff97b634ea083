//! Pascal VOC XML reader and writer.
//!
//! Reads the per-image annotation files that accompany each RGB and IR
//! sample. Only the pieces needed for overlays are interpreted: the
//! `<object>` records with their `<name>`, `<difficult>` and `<bndbox>`,
//! plus the optional `<filename>` and `<size>` header.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use roxmltree::Node;

use super::model::{ImageSize, ObjectRecord, VocAnnotation};
use super::BBox;
use crate::error::PairviewError;

/// Read a VOC annotation file.
///
/// The file must be UTF-8; any other encoding is a parse error.
pub fn read_voc_annotation(path: &Path) -> Result<VocAnnotation, PairviewError> {
    let bytes = fs::read(path).map_err(|source| PairviewError::AnnotationRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_voc_bytes(&bytes, path)
}

/// Read only the object records of a VOC annotation file, in document order.
pub fn read_objects(path: &Path) -> Result<Vec<ObjectRecord>, PairviewError> {
    read_voc_annotation(path).map(|annotation| annotation.objects)
}

/// Write an annotation as a VOC XML file.
pub fn write_voc_annotation(path: &Path, annotation: &VocAnnotation) -> Result<(), PairviewError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(PairviewError::Io)?;
    }
    fs::write(path, to_voc_xml_string(annotation)).map_err(PairviewError::Io)
}

/// Parse VOC XML from bytes.
///
/// The input must be valid UTF-8. Primarily useful for fuzzing parse behavior
/// in-memory.
pub fn from_voc_xml_slice(bytes: &[u8]) -> Result<VocAnnotation, PairviewError> {
    parse_voc_bytes(bytes, Path::new("<memory>"))
}

fn parse_voc_bytes(bytes: &[u8], path: &Path) -> Result<VocAnnotation, PairviewError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| PairviewError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    parse_voc_str(xml, path)
}

/// Parse VOC XML from a string; `path` is only used for error messages.
pub fn parse_voc_str(xml: &str, path: &Path) -> Result<VocAnnotation, PairviewError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|source| PairviewError::VocXmlParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let root = document.root_element();

    let filename = optional_child_text(root, "filename");
    let size = child_element(root, "size")
        .map(|size| parse_size(size, path))
        .transpose()?;

    let mut objects = Vec::new();
    for object in root
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
    {
        objects.push(parse_object(object, path)?);
    }

    Ok(VocAnnotation {
        filename,
        size,
        objects,
    })
}

fn parse_object(object: Node<'_, '_>, path: &Path) -> Result<ObjectRecord, PairviewError> {
    let name = required_child_element(object, "name", path, "<object>")?;
    let class_name = name.text().unwrap_or_default().to_string();

    let difficult = parse_required_int(object, "difficult", path, "<object>")? != 0;

    let bndbox = required_child_element(object, "bndbox", path, "<object>")?;
    let bbox = BBox::from_xyxy(
        parse_required_int(bndbox, "xmin", path, "<bndbox>")?,
        parse_required_int(bndbox, "ymin", path, "<bndbox>")?,
        parse_required_int(bndbox, "xmax", path, "<bndbox>")?,
        parse_required_int(bndbox, "ymax", path, "<bndbox>")?,
    );

    Ok(ObjectRecord {
        class_name,
        difficult,
        bbox,
    })
}

fn parse_size(size: Node<'_, '_>, path: &Path) -> Result<ImageSize, PairviewError> {
    let width = parse_required_u32(size, "width", path, "<size>")?;
    let height = parse_required_u32(size, "height", path, "<size>")?;
    let depth = optional_child_text(size, "depth")
        .map(|raw| {
            raw.parse::<u32>().map_err(|_| PairviewError::VocXmlParse {
                path: path.to_path_buf(),
                message: format!("invalid <depth> value '{raw}' in <size>; expected u32"),
            })
        })
        .transpose()?;

    Ok(ImageSize {
        width,
        height,
        depth,
    })
}

fn required_child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<Node<'a, 'input>, PairviewError> {
    child_element(node, tag).ok_or_else(|| PairviewError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn required_child_text(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<String, PairviewError> {
    optional_child_text(node, tag).ok_or_else(|| PairviewError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn parse_required_int(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<i64, PairviewError> {
    let raw = required_child_text(node, tag, path, context)?;
    raw.parse::<i64>().map_err(|_| PairviewError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("invalid <{tag}> value '{raw}' in {context}; expected integer"),
    })
}

fn parse_required_u32(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<u32, PairviewError> {
    let raw = required_child_text(node, tag, path, context)?;
    raw.parse::<u32>().map_err(|_| PairviewError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("invalid <{tag}> value '{raw}' in {context}; expected u32"),
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

/// Serialize an annotation as VOC XML.
pub fn to_voc_xml_string(annotation: &VocAnnotation) -> String {
    let mut xml = String::new();

    // Writing into a String cannot fail.
    let _ = write_voc_xml(&mut xml, annotation);
    xml
}

fn write_voc_xml(xml: &mut String, annotation: &VocAnnotation) -> std::fmt::Result {
    writeln!(xml, "<?xml version=\"1.0\" encoding=\"utf-8\"?>")?;
    writeln!(xml, "<annotation>")?;

    if let Some(filename) = &annotation.filename {
        writeln!(xml, "  <filename>{}</filename>", xml_escape(filename))?;
    }

    if let Some(size) = &annotation.size {
        writeln!(xml, "  <size>")?;
        writeln!(xml, "    <width>{}</width>", size.width)?;
        writeln!(xml, "    <height>{}</height>", size.height)?;
        if let Some(depth) = size.depth {
            writeln!(xml, "    <depth>{}</depth>", depth)?;
        }
        writeln!(xml, "  </size>")?;
    }

    for object in &annotation.objects {
        writeln!(xml, "  <object>")?;
        writeln!(xml, "    <name>{}</name>", xml_escape(&object.class_name))?;
        writeln!(xml, "    <difficult>{}</difficult>", u8::from(object.difficult))?;
        writeln!(xml, "    <bndbox>")?;
        writeln!(xml, "      <xmin>{}</xmin>", object.bbox.xmin)?;
        writeln!(xml, "      <ymin>{}</ymin>", object.bbox.ymin)?;
        writeln!(xml, "      <xmax>{}</xmax>", object.bbox.xmax)?;
        writeln!(xml, "      <ymax>{}</ymax>", object.bbox.ymax)?;
        writeln!(xml, "    </bndbox>")?;
        writeln!(xml, "  </object>")?;
    }

    writeln!(xml, "</annotation>")
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const TWO_OBJECTS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<annotation>
  <filename>IR_37.jpg</filename>
  <size>
    <width>640</width>
    <height>512</height>
    <depth>3</depth>
  </size>
  <object>
    <name>person</name>
    <pose>Unspecified</pose>
    <difficult>0</difficult>
    <bndbox>
      <xmin>10</xmin>
      <ymin>20</ymin>
      <xmax>50</xmax>
      <ymax>80</ymax>
    </bndbox>
  </object>
  <object>
    <name>car</name>
    <difficult>1</difficult>
    <bndbox>
      <xmin>100</xmin>
      <ymin>120</ymin>
      <xmax>300</xmax>
      <ymax>240</ymax>
    </bndbox>
  </object>
</annotation>"#;

    #[test]
    fn parse_extracts_objects_in_document_order() {
        let parsed = parse_voc_str(TWO_OBJECTS, Path::new("IR_37.xml")).expect("parse xml");

        assert_eq!(parsed.filename.as_deref(), Some("IR_37.jpg"));
        assert_eq!(
            parsed.size,
            Some(ImageSize {
                width: 640,
                height: 512,
                depth: Some(3)
            })
        );
        assert_eq!(
            parsed.objects,
            vec![
                ObjectRecord::new("person", BBox::from_xyxy(10, 20, 50, 80)),
                ObjectRecord::new("car", BBox::from_xyxy(100, 120, 300, 240)).with_difficult(true),
            ]
        );
    }

    #[test]
    fn parse_accepts_any_root_and_missing_header() {
        let xml = "<doc><object><name>dog</name><difficult>0</difficult>\
                   <bndbox><xmin>1</xmin><ymin>2</ymin><xmax>3</xmax><ymax>4</ymax></bndbox>\
                   </object></doc>";
        let parsed = parse_voc_str(xml, Path::new("dog.xml")).expect("parse xml");
        assert_eq!(parsed.filename, None);
        assert_eq!(parsed.size, None);
        assert_eq!(parsed.objects.len(), 1);
        assert_eq!(parsed.objects[0].bbox, BBox::from_xyxy(1, 2, 3, 4));
    }

    #[test]
    fn parse_ignores_nested_objects() {
        let xml = "<annotation><part><object><name>x</name></object></part></annotation>";
        let parsed = parse_voc_str(xml, Path::new("nested.xml")).expect("parse xml");
        assert!(parsed.objects.is_empty());
    }

    #[test]
    fn parse_treats_nonzero_difficult_as_set() {
        let xml = "<annotation><object><name>a</name><difficult> 2 </difficult>\
                   <bndbox><xmin>0</xmin><ymin>0</ymin><xmax>1</xmax><ymax>1</ymax></bndbox>\
                   </object></annotation>";
        let parsed = parse_voc_str(xml, Path::new("d.xml")).expect("parse xml");
        assert!(parsed.objects[0].difficult);
    }

    #[test]
    fn parse_rejects_missing_difficult() {
        let xml = "<annotation><object><name>a</name>\
                   <bndbox><xmin>0</xmin><ymin>0</ymin><xmax>1</xmax><ymax>1</ymax></bndbox>\
                   </object></annotation>";
        let err = parse_voc_str(xml, Path::new("d.xml")).unwrap_err();
        assert!(err.to_string().contains("missing <difficult> in <object>"));
    }

    #[test]
    fn parse_rejects_missing_coordinate() {
        let xml = "<annotation><object><name>a</name><difficult>0</difficult>\
                   <bndbox><xmin>0</xmin><ymin>0</ymin><xmax>1</xmax></bndbox>\
                   </object></annotation>";
        let err = parse_voc_str(xml, Path::new("d.xml")).unwrap_err();
        assert!(err.to_string().contains("missing <ymax> in <bndbox>"));
    }

    #[test]
    fn parse_rejects_fractional_coordinates() {
        let xml = "<annotation><object><name>a</name><difficult>0</difficult>\
                   <bndbox><xmin>0.5</xmin><ymin>0</ymin><xmax>1</xmax><ymax>1</ymax></bndbox>\
                   </object></annotation>";
        let err = parse_voc_str(xml, Path::new("d.xml")).unwrap_err();
        assert!(err.to_string().contains("expected integer"));
    }

    #[test]
    fn parse_rejects_malformed_xml() {
        let err = parse_voc_str("<annotation><object>", Path::new("bad.xml")).unwrap_err();
        assert!(matches!(err, PairviewError::VocXmlParse { .. }));
    }

    #[test]
    fn read_missing_file_reports_path() {
        let err = read_objects(Path::new("definitely/not/here.xml")).unwrap_err();
        match err {
            PairviewError::AnnotationRead { path, .. } => {
                assert_eq!(path, PathBuf::from("definitely/not/here.xml"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn read_non_utf8_file_is_a_parse_error() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("latin1.xml");
        let mut bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><annotation><object><name>Stra".to_vec();
        bytes.push(0xDF);
        bytes.extend_from_slice(b"e</name></object></annotation>");
        std::fs::write(&path, bytes).expect("write xml");

        let err = read_objects(&path).unwrap_err();
        match err {
            PairviewError::VocXmlParse { path: err_path, message } => {
                assert_eq!(err_path, path);
                assert!(message.contains("not valid UTF-8"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_keeps_class_name_text_verbatim() {
        let xml = "<annotation><object><name>person </name><difficult>0</difficult>\
                   <bndbox><xmin>0</xmin><ymin>0</ymin><xmax>1</xmax><ymax>1</ymax></bndbox>\
                   </object></annotation>";
        let parsed = parse_voc_str(xml, Path::new("n.xml")).expect("parse xml");
        assert_eq!(parsed.objects[0].class_name, "person ");
    }

    #[test]
    fn parse_accepts_extreme_coordinates() {
        let xml = format!(
            "<annotation><object><name>a</name><difficult>0</difficult>\
             <bndbox><xmin>{}</xmin><ymin>0</ymin><xmax>{}</xmax><ymax>5000000000</ymax></bndbox>\
             </object></annotation>",
            i64::MIN,
            i64::MAX
        );
        let parsed = parse_voc_str(&xml, Path::new("big.xml")).expect("parse xml");
        assert_eq!(
            parsed.objects[0].bbox,
            BBox::from_xyxy(i64::MIN, 0, i64::MAX, 5_000_000_000)
        );
    }

    #[test]
    fn serialized_names_are_escaped() {
        let annotation = VocAnnotation::from_objects(vec![ObjectRecord::new(
            "a&b<c>",
            BBox::from_xyxy(1, 2, 3, 4),
        )]);
        let xml = to_voc_xml_string(&annotation);
        assert!(xml.contains("<name>a&amp;b&lt;c&gt;</name>"));

        let parsed = parse_voc_str(&xml, Path::new("escaped.xml")).expect("parse xml");
        assert_eq!(parsed, annotation);
    }
}
