//! Bounding-box overlays.
//!
//! An [`Overlay`] is the batch of rectangles for one image: one unfilled
//! [`RectPatch`] per object record, colored by class. The whole batch is
//! rasterized into a single transparent layer and blended onto the surface
//! once, at a fixed alpha.

pub mod figure;

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use serde::Serialize;

use crate::annotation::{BBox, ObjectRecord};
use crate::color::{Color, ColorMap};

/// Stroke settings shared by every rectangle of an overlay.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OverlayStyle {
    /// Opacity of the edges, in `0.0..=1.0`.
    pub alpha: f32,
    /// Edge width in pixels.
    pub line_width: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            alpha: 0.7,
            line_width: 2,
        }
    }
}

/// One rectangle to draw: box corners and edge color.
///
/// Corners are kept as read. An unordered box is drawn as-is, spanning from
/// `(xmin, ymin)` toward `(xmax, ymax)` like a rectangle with a negative extent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RectPatch {
    pub class_name: String,
    pub bbox: BBox,
    pub color: Color,
}

impl RectPatch {
    /// Origin `(xmin, ymin)` with the signed width and height.
    pub fn to_xywh(&self) -> (i64, i64, i64, i64) {
        self.bbox.to_xywh()
    }

    /// Returns `(left, top, right, bottom)` with left <= right and top <= bottom.
    pub fn edges(&self) -> (i64, i64, i64, i64) {
        let b = &self.bbox;
        (
            b.xmin.min(b.xmax),
            b.ymin.min(b.ymax),
            b.xmin.max(b.xmax),
            b.ymin.max(b.ymax),
        )
    }
}

/// A batch of rectangles drawn together onto one surface.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Overlay {
    pub patches: Vec<RectPatch>,
    pub style: OverlayStyle,
}

/// Builds the overlay for `records`, one patch per record in record order.
///
/// A class missing from `colormap` gets the colormap's default color.
pub fn build_overlay(records: &[ObjectRecord], colormap: &ColorMap) -> Overlay {
    let patches = records
        .iter()
        .map(|record| {
            if !record.bbox.is_ordered() {
                log::warn!(
                    "drawing unordered box {:?} for class '{}' as-is",
                    record.bbox,
                    record.class_name
                );
            }
            RectPatch {
                class_name: record.class_name.clone(),
                bbox: record.bbox,
                color: colormap.color_for(&record.class_name),
            }
        })
        .collect();

    Overlay {
        patches,
        style: OverlayStyle::default(),
    }
}

/// Builds the overlay for `records` and draws it onto `surface`.
pub fn draw_rect(surface: &mut RgbaImage, records: &[ObjectRecord], colormap: &ColorMap) -> Overlay {
    let overlay = build_overlay(records, colormap);
    overlay.draw(surface);
    overlay
}

impl Overlay {
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Draws every patch onto `surface` as one blended layer.
    ///
    /// Edges are rasterized opaque into a transparent layer, later patches
    /// over earlier ones, and the layer is then blended onto the surface at
    /// `style.alpha`. Interiors are left untouched.
    pub fn draw(&self, surface: &mut RgbaImage) {
        if self.patches.is_empty() || self.style.line_width == 0 {
            return;
        }

        let (width, height) = surface.dimensions();
        let mut layer = RgbaImage::new(width, height);
        for patch in &self.patches {
            stroke_patch(&mut layer, patch, self.style.line_width);
        }
        blend_layer(surface, &layer, self.style.alpha);
    }
}

/// Rasterizes the outline of `patch` as `line_width` concentric one-pixel
/// rings centered on the rectangle outline.
fn stroke_patch(layer: &mut RgbaImage, patch: &RectPatch, line_width: u32) {
    let (img_w, img_h) = layer.dimensions();
    let margin = i64::from(line_width) + 1;

    // Clamping to just outside the layer keeps the visible pixels unchanged
    // while bounding the work for huge boxes.
    let clamp_x = |v: i64| v.clamp(-margin, i64::from(img_w) + margin);
    let clamp_y = |v: i64| v.clamp(-margin, i64::from(img_h) + margin);

    let (left, top, right, bottom) = patch.edges();
    let (left, right) = (clamp_x(left), clamp_x(right));
    let (top, bottom) = (clamp_y(top), clamp_y(bottom));

    let color = patch.color.to_rgba();
    let first = -(i64::from(line_width) / 2);
    for ring in 0..i64::from(line_width) {
        let offset = first + ring;
        let ring_w = right - left - 2 * offset;
        let ring_h = bottom - top - 2 * offset;
        if ring_w <= 0 || ring_h <= 0 {
            continue;
        }
        let rect = Rect::at((left + offset) as i32, (top + offset) as i32)
            .of_size(ring_w as u32, ring_h as u32);
        draw_hollow_rect_mut(layer, rect, color);
    }
}

/// Blends every opaque layer pixel onto `surface` with the given opacity.
fn blend_layer(surface: &mut RgbaImage, layer: &RgbaImage, alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    for (dst, src) in surface.pixels_mut().zip(layer.pixels()) {
        if src[3] == 0 {
            continue;
        }
        *dst = mix(*dst, *src, alpha);
    }
}

fn mix(dst: Rgba<u8>, src: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let channel = |d: u8, s: u8| (f32::from(s) * alpha + f32::from(d) * (1.0 - alpha)).round() as u8;
    let out_alpha = (f32::from(u8::MAX) * alpha + f32::from(dst[3]) * (1.0 - alpha)).round() as u8;
    Rgba([
        channel(dst[0], src[0]),
        channel(dst[1], src[1]),
        channel(dst[2], src[2]),
        out_alpha,
    ])
}
