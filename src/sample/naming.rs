//! File naming conventions for sample files.

use serde::{Deserialize, Serialize};

use super::{Modality, SampleId};

/// Maps a sample id to the file names of its image and annotation.
///
/// Directory roots are applied separately (see [`SampleRoots`](super::SampleRoots)),
/// so an implementation only decides the final path component.
pub trait NamingScheme {
    fn image_file_name(&self, modality: Modality, id: &SampleId) -> String;
    fn annotation_file_name(&self, modality: Modality, id: &SampleId) -> String;
}

/// Placeholder replaced by the sample id in [`TemplateNaming`] templates.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Naming scheme built from four `{id}` templates.
///
/// The default reproduces the dataset convention: RGB files are
/// `IR_{id}.jpg` / `IR_{id}.xml` and IR files are `IR_{id}HongWai.jpg` /
/// `IR_{id}HongWai.xml`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateNaming {
    pub rgb_image: String,
    pub rgb_annotation: String,
    pub ir_image: String,
    pub ir_annotation: String,
}

impl Default for TemplateNaming {
    fn default() -> Self {
        Self {
            rgb_image: "IR_{id}.jpg".to_string(),
            rgb_annotation: "IR_{id}.xml".to_string(),
            ir_image: "IR_{id}HongWai.jpg".to_string(),
            ir_annotation: "IR_{id}HongWai.xml".to_string(),
        }
    }
}

impl NamingScheme for TemplateNaming {
    fn image_file_name(&self, modality: Modality, id: &SampleId) -> String {
        let template = match modality {
            Modality::Rgb => &self.rgb_image,
            Modality::Ir => &self.ir_image,
        };
        template.replace(ID_PLACEHOLDER, id.as_str())
    }

    fn annotation_file_name(&self, modality: Modality, id: &SampleId) -> String {
        let template = match modality {
            Modality::Rgb => &self.rgb_annotation,
            Modality::Ir => &self.ir_annotation,
        };
        template.replace(ID_PLACEHOLDER, id.as_str())
    }
}
