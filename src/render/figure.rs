//! Two-panel figures: the RGB and IR renderings of one sample.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use image::{imageops, DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};

use super::Overlay;
use crate::color::Color;
use crate::error::PairviewError;
use crate::sample::{Modality, SampleId};

/// Blank space between the two panels, in pixels.
pub const PANEL_GUTTER: u32 = 8;

/// How the two panels are arranged in the composed figure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// RGB on the left, IR on the right.
    #[default]
    SideBySide,
    /// RGB on top, IR below.
    Stacked,
}

impl FromStr for Layout {
    type Err = PairviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "side-by-side" | "horizontal" => Ok(Layout::SideBySide),
            "stacked" | "vertical" => Ok(Layout::Stacked),
            other => Err(PairviewError::UnsupportedFormat(format!(
                "layout '{}' (supported: side-by-side, stacked)",
                other
            ))),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::SideBySide => write!(f, "side-by-side"),
            Layout::Stacked => write!(f, "stacked"),
        }
    }
}

/// One modality of a sample: the image with its overlay already drawn.
#[derive(Clone, Debug)]
pub struct Panel {
    pub modality: Modality,
    pub surface: RgbaImage,
    pub overlay: Overlay,
}

/// Both rendered panels of a sample.
#[derive(Clone, Debug)]
pub struct PairFigure {
    pub id: SampleId,
    pub rgb: Panel,
    pub ir: Panel,
}

impl PairFigure {
    /// Composes both panels into one image on a white background.
    pub fn compose(&self, layout: Layout) -> RgbaImage {
        let (rgb_w, rgb_h) = self.rgb.surface.dimensions();
        let (ir_w, ir_h) = self.ir.surface.dimensions();

        let (width, height, ir_x, ir_y) = match layout {
            Layout::SideBySide => (
                rgb_w + PANEL_GUTTER + ir_w,
                rgb_h.max(ir_h),
                i64::from(rgb_w + PANEL_GUTTER),
                0,
            ),
            Layout::Stacked => (
                rgb_w.max(ir_w),
                rgb_h + PANEL_GUTTER + ir_h,
                0,
                i64::from(rgb_h + PANEL_GUTTER),
            ),
        };

        let mut canvas = RgbaImage::from_pixel(width, height, Color::WHITE.to_rgba());
        imageops::overlay(&mut canvas, &self.rgb.surface, 0, 0);
        imageops::overlay(&mut canvas, &self.ir.surface, ir_x, ir_y);
        canvas
    }

    /// Composes the figure and writes it to `path`; the format follows the
    /// file extension.
    pub fn save(&self, path: &Path, layout: Layout) -> Result<(), PairviewError> {
        let composed = self.compose(layout);
        // The JPEG encoder has no alpha channel.
        let result = if has_jpeg_extension(path) {
            DynamicImage::ImageRgba8(composed).to_rgb8().save(path)
        } else {
            composed.save(path)
        };
        result.map_err(|source| PairviewError::ImageWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn has_jpeg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}
