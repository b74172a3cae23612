//! # Error Handling
//!
//! One error type for the library, [`KitError`], built with `thiserror`.
//! Lower layers keep their own focused errors ([`RleError`] for the codec,
//! [`ScaleError`] for resizing) and convert into `KitError` with `?`.
//!
//! Every error reports a short `category()` and, where there is an obvious
//! next step for the user, a `recovery_suggestion()`. The binary prints both.
//!
//! ```rust
//! use rlekit::error::{KitError, classify};
//!
//! let err = KitError::config("scale", "0", "must be greater than 0");
//! assert_eq!(err.category(), "config");
//! assert!(classify::is_fatal(&err));
//! ```

use std::path::{Path, PathBuf};

use rlekit_scale::ScaleError;
use thiserror::Error;

use crate::channels::Channel;
use crate::codec::RleError;

/// Result alias used throughout the library.
pub type KitResult<T> = Result<T, KitError>;

#[derive(Error, Debug)]
pub enum KitError {
    /// Configuration validation errors
    #[error("Configuration error in '{field}': {reason} (value: {value})")]
    Config {
        field: String,
        value: String,
        reason: String,
    },

    /// The image file could not be opened or decoded
    #[error("Failed to load image '{}': {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image file could not be encoded or written
    #[error("Failed to save image '{}': {source}", path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Plain I/O failures outside image decoding
    #[error("I/O error during {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed run-length data
    #[error("Malformed encoding: {0}")]
    Codec(#[from] RleError),

    /// Resize failures
    #[error("Scaling failed: {0}")]
    Scale(#[from] ScaleError),

    /// A channel did not survive the round trip
    #[error("{channel} channel differs after decode (first difference at sample {first_diff})")]
    Mismatch { channel: Channel, first_diff: usize },

    /// Pixel planes that cannot form an image
    #[error("Invalid image geometry: {0}")]
    Geometry(String),

    /// Report serialization failures
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl KitError {
    /// Create a configuration error
    pub fn config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an image load error for `path`
    pub fn image_load(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        Self::ImageLoad {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an image save error for `path`
    pub fn image_save(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        Self::ImageSave {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Get the error category as a string
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::ImageLoad { .. } => "image_load",
            Self::ImageSave { .. } => "image_save",
            Self::Io { .. } => "io",
            Self::Codec(_) => "codec",
            Self::Scale(_) => "scale",
            Self::Mismatch { .. } => "mismatch",
            Self::Geometry(_) => "geometry",
            Self::Json(_) => "json",
        }
    }

    /// True when the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ImageLoad {
                source: image::ImageError::IoError(e),
                ..
            } => e.kind() == std::io::ErrorKind::NotFound,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Trait for errors that provide recovery suggestions
pub trait HasRecoverySuggestion {
    /// Get recovery suggestion for this error
    fn recovery_suggestion(&self) -> Option<&'static str>;
}

impl HasRecoverySuggestion for KitError {
    fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            _ if self.is_not_found() => Some("Check the input path; relative paths resolve from the working directory"),
            Self::ImageLoad { .. } => Some("Make sure the file is a bitmap/PNG/JPEG the image decoder supports"),
            Self::Config { .. } => Some("Run with --help to see accepted values"),
            Self::ImageSave { .. } => Some("Check that the output directory exists and is writable"),
            Self::Io { .. } => Some("Check that the path is writable and not an existing file"),
            Self::Scale(ScaleError::InvalidFactor(_)) => Some("Use a scale factor in (0, 16]"),
            _ => None,
        }
    }
}

/// Error classification utilities
pub mod classify {
    use super::*;

    /// Check if an error is fatal for a whole run (as opposed to a single input)
    pub fn is_fatal(error: &KitError) -> bool {
        matches!(
            error,
            KitError::Config { .. } | KitError::Codec(_) | KitError::Mismatch { .. }
        )
    }

    /// Check if an error is tied to one input file and a batch could skip it
    pub fn is_per_input(error: &KitError) -> bool {
        matches!(
            error,
            KitError::ImageLoad { .. } | KitError::ImageSave { .. }
        )
    }
}
