#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use pairview::sample::SampleRoots;

/// `(class_name, difficult, [xmin, ymin, xmax, ymax])`
pub type Obj<'a> = (&'a str, bool, [i64; 4]);

pub fn voc_xml(objects: &[Obj<'_>]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<annotation>\n");
    for (name, difficult, [xmin, ymin, xmax, ymax]) in objects {
        xml.push_str(&format!(
            "  <object>\n    <name>{name}</name>\n    <pose>Unspecified</pose>\n    \
             <truncated>0</truncated>\n    <difficult>{}</difficult>\n    <bndbox>\n      \
             <xmin>{xmin}</xmin>\n      <ymin>{ymin}</ymin>\n      <xmax>{xmax}</xmax>\n      \
             <ymax>{ymax}</ymax>\n    </bndbox>\n  </object>\n",
            u8::from(*difficult)
        ));
    }
    xml.push_str("</annotation>\n");
    xml
}

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, contents).expect("write file");
}

pub fn write_image(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    RgbImage::from_pixel(width, height, Rgb(rgb))
        .save(path)
        .expect("write image");
}

/// Lays out `rgb/{images,annotations}` and `ir/{images,annotations}` under
/// `root` and returns the matching roots.
pub fn sample_roots(root: &Path) -> SampleRoots {
    SampleRoots {
        rgb_img_dir: root.join("rgb/images"),
        rgb_anno_dir: root.join("rgb/annotations"),
        ir_img_dir: root.join("ir/images"),
        ir_anno_dir: root.join("ir/annotations"),
    }
}

/// Writes one black sample with the default `IR_{id}` naming.
pub fn write_sample(root: &Path, id: &str, rgb: &[Obj<'_>], ir: &[Obj<'_>]) -> SampleRoots {
    let roots = sample_roots(root);
    write_image(
        &roots.rgb_img_dir.join(format!("IR_{id}.jpg")),
        64,
        48,
        [0, 0, 0],
    );
    write_file(
        &roots.rgb_anno_dir.join(format!("IR_{id}.xml")),
        &voc_xml(rgb),
    );
    write_image(
        &roots.ir_img_dir.join(format!("IR_{id}HongWai.jpg")),
        32,
        32,
        [0, 0, 0],
    );
    write_file(
        &roots.ir_anno_dir.join(format!("IR_{id}HongWai.xml")),
        &voc_xml(ir),
    );
    roots
}

/// Writes a config file pointing at `roots`.
pub fn write_config(path: &Path, roots: &SampleRoots, img_id: &str) -> PathBuf {
    let json = serde_json::json!({
        "colormap": {"person": "red", "car": "blue", "default": "lime"},
        "img_id": img_id,
        "rgb_img_path": roots.rgb_img_dir,
        "rgb_anno_path": roots.rgb_anno_dir,
        "ir_img_path": roots.ir_img_dir,
        "ir_anno_path": roots.ir_anno_dir,
    });
    write_file(path, &json.to_string());
    path.to_path_buf()
}
