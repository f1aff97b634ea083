//! Annotation checks.
//!
//! Rendering never rejects a record, so this is where suspicious data gets
//! reported:
//! - Geometric validity (ordered corners, non-zero extent, inside the image)
//! - Data quality (non-empty class names)
//! - Display coverage (classes that fall back to the default color)

mod report;

pub use report::{CheckIssue, CheckReport, IssueCode, IssueContext, Severity};

use std::path::Path;

use image::error::{DecodingError, ImageFormatHint};

use crate::annotation::{ObjectRecord, VocAnnotation};
use crate::color::ColorMap;
use crate::error::PairviewError;

/// Options for check behavior.
#[derive(Clone, Debug, Default)]
pub struct CheckOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Checks an annotation and returns a report of all issues found.
///
/// `image_size` is `(width, height)`; without it, the annotation's own
/// `<size>` is used, and bounds are not checked when neither is known.
pub fn check_annotation(
    annotation: &VocAnnotation,
    colormap: &ColorMap,
    image_size: Option<(u32, u32)>,
) -> CheckReport {
    let mut report = CheckReport::new();
    let bounds =
        image_size.or_else(|| annotation.size.map(|size| (size.width, size.height)));

    for (index, object) in annotation.objects.iter().enumerate() {
        check_object(index, object, colormap, bounds, &mut report);
    }

    report
}

fn check_object(
    index: usize,
    object: &ObjectRecord,
    colormap: &ColorMap,
    bounds: Option<(u32, u32)>,
    report: &mut CheckReport,
) {
    let context = || IssueContext {
        index,
        class_name: object.class_name.clone(),
    };
    let bbox = &object.bbox;

    if !bbox.is_ordered() {
        report.add(CheckIssue::error(
            IssueCode::InvalidBBoxOrdering,
            format!(
                "Box corners out of order: ({}, {}) to ({}, {})",
                bbox.xmin, bbox.ymin, bbox.xmax, bbox.ymax
            ),
            context(),
        ));
    } else if bbox.is_degenerate() {
        report.add(CheckIssue::warning(
            IssueCode::ZeroAreaBBox,
            format!("Box has zero extent ({}x{})", bbox.width(), bbox.height()),
            context(),
        ));
    }

    if let Some((width, height)) = bounds {
        if !bbox.is_within(width, height) {
            report.add(CheckIssue::warning(
                IssueCode::BBoxOutOfBounds,
                format!(
                    "Box ({}, {}) to ({}, {}) extends outside the {}x{} image",
                    bbox.xmin, bbox.ymin, bbox.xmax, bbox.ymax, width, height
                ),
                context(),
            ));
        }
    }

    if object.class_name.is_empty() {
        report.add(CheckIssue::warning(
            IssueCode::EmptyClassName,
            "Empty class name",
            context(),
        ));
    } else if !colormap.contains(&object.class_name) {
        report.add(CheckIssue::warning(
            IssueCode::DefaultColorFallback,
            format!(
                "Class '{}' is not in the colormap; drawn with the default color {}",
                object.class_name,
                colormap.default_color()
            ),
            context(),
        ));
    }
}

/// Reads `(width, height)` from an image header without decoding pixels.
pub fn probe_image_size(path: &Path) -> Result<(u32, u32), PairviewError> {
    let size = imagesize::size(path).map_err(|err| PairviewError::ImageDecode {
        path: path.to_path_buf(),
        source: match err {
            imagesize::ImageError::IoError(io) => image::ImageError::IoError(io),
            other => image::ImageError::Decoding(DecodingError::new(
                ImageFormatHint::PathExtension(path.to_path_buf()),
                other,
            )),
        },
    })?;
    Ok((size.width as u32, size.height as u32))
}
