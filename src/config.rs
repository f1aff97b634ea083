//! Viewer configuration.
//!
//! Loaded once from a JSON file and then passed around by reference. Every
//! key is optional; missing keys fall back to built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::color::ColorMap;
use crate::error::PairviewError;
use crate::render::figure::Layout;
use crate::sample::{SampleId, SampleRoots, TemplateNaming};

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";
const DEFAULT_DIR: &str = ".";
const DEFAULT_SAMPLE_ID: u64 = 0;

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    colormap: Option<ColorMap>,
    img_id: Option<RawSampleId>,
    rgb_img_path: Option<PathBuf>,
    rgb_anno_path: Option<PathBuf>,
    ir_img_path: Option<PathBuf>,
    ir_anno_path: Option<PathBuf>,
    layout: Option<Layout>,
    naming: Option<TemplateNaming>,
}

/// `img_id` is written either as a JSON number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSampleId {
    Number(u64),
    Text(SampleId),
}

impl From<RawSampleId> for SampleId {
    fn from(raw: RawSampleId) -> Self {
        match raw {
            RawSampleId::Number(n) => SampleId::from(n),
            RawSampleId::Text(id) => id,
        }
    }
}

/// Resolved viewer configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub colormap: ColorMap,
    pub img_id: SampleId,
    pub roots: SampleRoots,
    pub layout: Layout,
    pub naming: TemplateNaming,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file(ConfigFile::default())
    }
}

impl Config {
    /// Loads configuration from `path`.
    ///
    /// With `None`, [`DEFAULT_CONFIG_PATH`] is tried and built-in defaults
    /// are used when it does not exist. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, PairviewError> {
        match path {
            Some(path) => Self::from_path(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Self::from_path(default_path)
                } else {
                    log::debug!(
                        "{} not found; using built-in defaults",
                        default_path.display()
                    );
                    Ok(Self::default())
                }
            }
        }
    }

    /// Reads and parses a config file.
    pub fn from_path(path: &Path) -> Result<Self, PairviewError> {
        let raw = fs::read_to_string(path).map_err(|source| PairviewError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile =
            serde_json::from_str(&raw).map_err(|source| PairviewError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("loaded config from {}", path.display());
        Ok(Self::from_file(file))
    }

    /// Fuzz-only entrypoint for config JSON parsing.
    #[cfg(feature = "fuzzing")]
    pub fn fuzz_parse(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let file: ConfigFile = serde_json::from_slice(bytes)?;
        Ok(Self::from_file(file))
    }

    fn from_file(file: ConfigFile) -> Self {
        let dir = |value: Option<PathBuf>| value.unwrap_or_else(|| PathBuf::from(DEFAULT_DIR));

        Self {
            colormap: file.colormap.unwrap_or_default(),
            img_id: file
                .img_id
                .map(SampleId::from)
                .unwrap_or_else(|| SampleId::from(DEFAULT_SAMPLE_ID)),
            roots: SampleRoots {
                rgb_img_dir: dir(file.rgb_img_path),
                rgb_anno_dir: dir(file.rgb_anno_path),
                ir_img_dir: dir(file.ir_img_path),
                ir_anno_dir: dir(file.ir_anno_path),
            },
            layout: file.layout.unwrap_or_default(),
            naming: file.naming.unwrap_or_default(),
        }
    }
}
