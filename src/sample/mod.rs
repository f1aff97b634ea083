//! Sample identification and path resolution.
//!
//! A sample is one scene captured in both modalities. It is identified by a
//! numeric id embedded in its file names (`IR_37.jpg`, `IR_37HongWai.jpg`),
//! and resolves to four files spread over four directory roots.

mod naming;

pub use naming::{NamingScheme, TemplateNaming};

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::PairviewError;

/// The two imaging modalities of a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Visible-spectrum image.
    Rgb,
    /// Infrared image.
    Ir,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::Rgb => write!(f, "RGB"),
            Modality::Ir => write!(f, "IR"),
        }
    }
}

/// A sample id: a non-empty run of ASCII digits.
///
/// Kept as text so that leading zeros survive path resolution.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SampleId(String);

impl SampleId {
    pub fn new(raw: impl Into<String>) -> Result<Self, PairviewError> {
        let raw = raw.into();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PairviewError::InvalidSampleId(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SampleId {
    type Err = PairviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl TryFrom<String> for SampleId {
    type Error = PairviewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SampleId> for String {
    fn from(id: SampleId) -> Self {
        id.0
    }
}

impl From<u64> for SampleId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn digit_run() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("valid digit regex"))
}

/// Extracts the sample id from a file path: the first run of digits in the
/// final path component.
///
/// `data/rgb/IR_37HongWai.jpg` yields `37`. Directory names are ignored, so
/// `set2/IR_x.jpg` has no id.
pub fn extract_sample_id(path: &Path) -> Result<SampleId, PairviewError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    digit_run()
        .find(&file_name)
        .map(|m| SampleId(m.as_str().to_string()))
        .ok_or(PairviewError::SampleIdNotFound { file_name })
}

/// The four directory roots a sample is resolved against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleRoots {
    pub rgb_img_dir: PathBuf,
    pub rgb_anno_dir: PathBuf,
    pub ir_img_dir: PathBuf,
    pub ir_anno_dir: PathBuf,
}

impl SampleRoots {
    /// Returns the image and annotation directories of one modality.
    pub fn dirs(&self, modality: Modality) -> (&Path, &Path) {
        match modality {
            Modality::Rgb => (&self.rgb_img_dir, &self.rgb_anno_dir),
            Modality::Ir => (&self.ir_img_dir, &self.ir_anno_dir),
        }
    }

    /// Resolves the files of one modality of a sample.
    pub fn resolve_modality(
        &self,
        naming: &dyn NamingScheme,
        modality: Modality,
        id: &SampleId,
    ) -> ModalityPaths {
        let (img_dir, anno_dir) = self.dirs(modality);
        ModalityPaths {
            image: img_dir.join(naming.image_file_name(modality, id)),
            annotation: anno_dir.join(naming.annotation_file_name(modality, id)),
        }
    }

    /// Resolves all four files of a sample.
    pub fn resolve(&self, naming: &dyn NamingScheme, id: &SampleId) -> SamplePaths {
        SamplePaths {
            rgb: self.resolve_modality(naming, Modality::Rgb, id),
            ir: self.resolve_modality(naming, Modality::Ir, id),
        }
    }
}

/// Image and annotation file of one modality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalityPaths {
    pub image: PathBuf,
    pub annotation: PathBuf,
}

/// All files of a sample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SamplePaths {
    pub rgb: ModalityPaths,
    pub ir: ModalityPaths,
}

/// A file found while browsing a directory, with the id extracted from its name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiscoveredSample {
    pub id: SampleId,
    pub path: PathBuf,
}

/// Walks `dir` and returns every file whose name carries a sample id.
///
/// Files without a digit run are skipped. Results are sorted by path so the
/// listing is stable across platforms.
pub fn discover_samples(
    dir: &Path,
    max_depth: usize,
) -> Result<Vec<DiscoveredSample>, PairviewError> {
    if !dir.is_dir() {
        return Err(PairviewError::SampleDiscovery {
            path: dir.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut samples = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).min_depth(1).max_depth(max_depth) {
        let entry = entry.map_err(|source| PairviewError::SampleDiscovery {
            path: dir.to_path_buf(),
            message: source.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        match extract_sample_id(entry.path()) {
            Ok(id) => samples.push(DiscoveredSample {
                id,
                path: entry.into_path(),
            }),
            Err(_) => log::debug!("skipping {}: no sample id", entry.path().display()),
        }
    }

    samples.sort_by(|left, right| left.path.cmp(&right.path));
    Ok(samples)
}
