//! Fuzz target for VOC XML parsing.
//!
//! Feeds arbitrary bytes to the annotation parser, checking for panics
//! or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pairview::annotation::io_voc_xml::from_voc_xml_slice;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(annotation) = from_voc_xml_slice(data) {
        let _ = pairview::render::build_overlay(
            &annotation.objects,
            &pairview::color::ColorMap::default(),
        );
    }
});
