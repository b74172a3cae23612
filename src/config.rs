//! # Configuration Module
//!
//! Configuration structures and validation for the two pipelines. The CLI
//! builds these from its arguments; library users build them directly.
//!
//! ## Configuration Parameters
//!
//! | Parameter | Type | Range | Description |
//! |-----------|------|-------|-------------|
//! | `input` | `PathBuf` | non-empty | Image checked by the round trip |
//! | `inputs` | `Vec<PathBuf>` | 1+ entries | Images in the downsampling report |
//! | `scale` | `f64` | (0, 16] | Linear scale factor for both axes |
//! | `filter` | `ResampleFilter` | nearest/bilinear/lanczos3 | Resampling filter |
//! | `save_dir` | `Option<PathBuf>` | any dir path | Where resized images are written |
//! | `skip_failed` | `bool` | - | Skip unreadable inputs instead of aborting |
//!
//! ## Examples
//!
//! ```rust
//! use rlekit::config::DownsampleConfig;
//!
//! let config = DownsampleConfig::default();
//! assert_eq!(config.inputs.len(), 9);
//! assert!(config.validate().is_ok());
//! ```

use std::path::{Path, PathBuf};

use rlekit_scale::plan::{MAX_FACTOR, ResampleFilter, ScaleFactor};

/// Default bitmap checked by `rlekit roundtrip`.
pub const DEFAULT_ROUNDTRIP_INPUT: &str = "image.bmp";
/// Default asset directory for the downsampling batch.
pub const DEFAULT_ASSET_DIR: &str = "../asset";
/// Default file name prefix for the downsampling batch.
pub const DEFAULT_PREFIX: &str = "pisang";
/// Default number of files in the downsampling batch.
pub const DEFAULT_COUNT: usize = 9;
/// Default scale factor.
pub const DEFAULT_SCALE: f64 = 0.5;

/// Configuration for the RLE round-trip check.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTripConfig {
    /// Image to load. Any format the `image` crate decodes is accepted.
    pub input: PathBuf,
}

impl Default for RoundTripConfig {
    /// Checks `image.bmp` in the working directory.
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_ROUNDTRIP_INPUT),
        }
    }
}

impl RoundTripConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.input.as_os_str().is_empty() {
            return Err("Input path must not be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration for the downsampling report.
#[derive(Debug, Clone, PartialEq)]
pub struct DownsampleConfig {
    /// Images to process, in report order.
    pub inputs: Vec<PathBuf>,

    /// Linear scale factor applied to width and height.
    ///
    /// Output dimensions are floored. Must be finite, greater than 0 and at
    /// most 16.
    pub scale: f64,

    /// Resampling filter. Nearest-neighbor unless overridden.
    pub filter: ResampleFilter,

    /// Optional directory that receives each resized image as PNG.
    ///
    /// Created, with its parents, when missing.
    pub save_dir: Option<PathBuf>,

    /// Skip inputs that fail to load or save instead of aborting the batch.
    pub skip_failed: bool,
}

impl Default for DownsampleConfig {
    /// The fixed nine-image batch `../asset/pisang0.jpg` .. `pisang8.jpg`,
    /// halved with nearest-neighbor.
    fn default() -> Self {
        Self {
            inputs: Self::default_batch(DEFAULT_ASSET_DIR, DEFAULT_PREFIX, DEFAULT_COUNT),
            scale: DEFAULT_SCALE,
            filter: ResampleFilter::Nearest,
            save_dir: None,
            skip_failed: false,
        }
    }
}

impl DownsampleConfig {
    /// Creates a new configuration with the specified parameters.
    pub fn new(
        inputs: Vec<PathBuf>,
        scale: f64,
        filter: ResampleFilter,
        save_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            inputs,
            scale,
            filter,
            save_dir,
            skip_failed: false,
        }
    }

    /// Sets whether per-input failures are skipped.
    pub fn with_skip_failed(mut self, skip_failed: bool) -> Self {
        self.skip_failed = skip_failed;
        self
    }

    /// Builds `<asset_dir>/<prefix><i>.jpg` for `i` in `0..count`.
    pub fn default_batch(asset_dir: impl AsRef<Path>, prefix: &str, count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|i| asset_dir.as_ref().join(format!("{prefix}{i}.jpg")))
            .collect()
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.inputs.is_empty() {
            return Err("At least one input image is required".to_string());
        }
        if let Some(empty) = self.inputs.iter().position(|p| p.as_os_str().is_empty()) {
            return Err(format!("Input path #{empty} is empty"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 || self.scale > MAX_FACTOR {
            return Err(format!(
                "Scale must be greater than 0 and at most {MAX_FACTOR}, got {}",
                self.scale
            ));
        }
        if self.save_dir.as_ref().is_some_and(|d| d.as_os_str().is_empty()) {
            return Err("Save directory path must not be empty".to_string());
        }
        Ok(())
    }

    /// The validated scale factor.
    pub fn factor(&self) -> Result<ScaleFactor, rlekit_scale::ScaleError> {
        ScaleFactor::new(self.scale)
    }
}
