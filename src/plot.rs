//! Rendering a sample: both modalities, image plus overlay.
//!
//! Front ends (CLI, tests, a future browser) only talk to
//! [`SampleRenderer`]; they never resolve paths or parse annotations
//! themselves.

use std::path::Path;

use image::RgbaImage;

use crate::annotation::io_voc_xml::read_objects;
use crate::color::ColorMap;
use crate::config::Config;
use crate::error::PairviewError;
use crate::render::figure::{PairFigure, Panel};
use crate::render::draw_rect;
use crate::sample::{Modality, ModalityPaths, NamingScheme, SampleId, SampleRoots};

/// Anything that can turn a sample id into a rendered figure.
pub trait SampleRenderer {
    fn render_sample(&self, id: &SampleId) -> Result<PairFigure, PairviewError>;
}

/// Renders samples from four directory roots with a naming scheme and colormap.
pub struct PairPlotter {
    roots: SampleRoots,
    naming: Box<dyn NamingScheme>,
    colormap: ColorMap,
}

impl PairPlotter {
    pub fn new(roots: SampleRoots, naming: Box<dyn NamingScheme>, colormap: ColorMap) -> Self {
        Self {
            roots,
            naming,
            colormap,
        }
    }

    /// Builds a plotter from the configured roots, naming and colormap.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.roots.clone(),
            Box::new(config.naming.clone()),
            config.colormap.clone(),
        )
    }

    /// Loads, annotates and returns one modality of a sample.
    pub fn render_modality(
        &self,
        modality: Modality,
        id: &SampleId,
    ) -> Result<Panel, PairviewError> {
        let ModalityPaths { image, annotation } =
            self.roots.resolve_modality(self.naming.as_ref(), modality, id);
        log::debug!(
            "sample {} {}: image {}, annotation {}",
            id,
            modality,
            image.display(),
            annotation.display()
        );

        let mut surface = load_image(&image)?;
        let records = read_objects(&annotation)?;
        let overlay = draw_rect(&mut surface, &records, &self.colormap);

        Ok(Panel {
            modality,
            surface,
            overlay,
        })
    }
}

impl SampleRenderer for PairPlotter {
    fn render_sample(&self, id: &SampleId) -> Result<PairFigure, PairviewError> {
        let rgb = self.render_modality(Modality::Rgb, id)?;
        let ir = self.render_modality(Modality::Ir, id)?;
        log::info!(
            "rendered sample {}: {} RGB box(es), {} IR box(es)",
            id,
            rgb.overlay.len(),
            ir.overlay.len()
        );

        Ok(PairFigure {
            id: id.clone(),
            rgb,
            ir,
        })
    }
}

/// Decodes an image file into an RGBA drawing surface.
pub fn load_image(path: &Path) -> Result<RgbaImage, PairviewError> {
    image::open(path)
        .map(|decoded| decoded.to_rgba8())
        .map_err(|source| PairviewError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })
}
