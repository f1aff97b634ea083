use std::path::PathBuf;
use thiserror::Error;

use crate::validation::CheckReport;

/// The main error type for pairview operations.
#[derive(Debug, Error)]
pub enum PairviewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read annotation {path}: {source}")]
    AnnotationRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse VOC XML from {path}: {message}")]
    VocXmlParse { path: PathBuf, message: String },

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("No sample id (digit sequence) found in file name '{file_name}'")]
    SampleIdNotFound { file_name: String },

    #[error("Invalid sample id '{0}': expected a non-empty sequence of digits")]
    InvalidSampleId(String),

    #[error("Failed to scan {path} for samples: {message}")]
    SampleDiscovery { path: PathBuf, message: String },

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Colormap is missing the mandatory 'default' entry")]
    ColorMapMissingDefault,

    #[error("Invalid color '{0}' (expected #rrggbb, #rgb, or a color name)")]
    InvalidColor(String),

    #[error("Annotation check failed with {error_count} error(s) and {warning_count} warning(s)")]
    CheckFailed {
        error_count: usize,
        warning_count: usize,
        report: CheckReport,
    },

    #[error("Failed to serialize JSON output: {0}")]
    JsonOutput(#[source] serde_json::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
