// SPDX-License-Identifier: MIT
//! # Scale Factors and Plan Computation
//!
//! A [`ScalePlan`] captures everything the resize step needs: the source size,
//! the factor that was applied and the computed output size. Plans are cheap
//! to build, so callers build one per image.

use crate::cpu::ScaleError;

/// Upper bound on the factor. Anything beyond this is almost certainly a typo
/// and would allocate enormous output buffers.
pub const MAX_FACTOR: f64 = 16.0;

/// Represents a 2D size with width and height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    /// Number of pixels covered by this size.
    pub fn pixels(self) -> usize {
        (self.w as usize) * (self.h as usize)
    }
}

/// A validated linear scale factor, applied identically to both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// Validate and wrap a raw factor.
    ///
    /// Rejects NaN, infinities, zero, negatives and factors above [`MAX_FACTOR`].
    pub fn new(factor: f64) -> Result<Self, ScaleError> {
        if !factor.is_finite() || factor <= 0.0 || factor > MAX_FACTOR {
            return Err(ScaleError::InvalidFactor(factor));
        }
        Ok(Self(factor))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// True when the factor shrinks the image.
    pub fn is_downscale(self) -> bool {
        self.0 < 1.0
    }
}

impl Default for ScaleFactor {
    /// Half resolution on both axes.
    fn default() -> Self {
        Self(0.5)
    }
}

/// Resampling filter used by the CPU scaler.
///
/// Nearest-neighbor is the reference behaviour; the convolution filters are
/// offered for comparison runs only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ResampleFilter {
    /// Copy the nearest source pixel, no blending.
    #[default]
    #[value(name = "nearest")]
    Nearest,
    /// Bilinear convolution.
    #[value(name = "bilinear")]
    Bilinear,
    /// Lanczos3 convolution.
    #[value(name = "lanczos3")]
    Lanczos3,
}

impl ResampleFilter {
    /// Map to the `fast_image_resize` algorithm selector.
    pub fn to_alg(self) -> fast_image_resize::ResizeAlg {
        use fast_image_resize::{FilterType, ResizeAlg};
        match self {
            ResampleFilter::Nearest => ResizeAlg::Nearest,
            ResampleFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            ResampleFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}

/// Complete scaling plan computed from input parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePlan {
    /// Original input dimensions
    pub input: Size,
    /// Factor used for planning
    pub factor: ScaleFactor,
    /// Final computed output dimensions
    pub out: Size,
}

impl ScalePlan {
    /// Byte length of a tightly packed RGB8 output buffer.
    pub fn out_len_rgb8(&self) -> usize {
        self.out.pixels() * 3
    }

    /// True when the output has the same dimensions as the input.
    pub fn is_identity(&self) -> bool {
        self.input == self.out
    }
}

/// Compute the output size for `input` scaled by `factor`.
///
/// Each axis is `floor(len * factor)`, never less than 1.
pub fn build_plan(input: Size, factor: ScaleFactor) -> ScalePlan {
    ScalePlan {
        input,
        factor,
        out: Size {
            w: scaled_axis(input.w, factor.get()),
            h: scaled_axis(input.h, factor.get()),
        },
    }
}

fn scaled_axis(len: u32, factor: f64) -> u32 {
    ((len as f64 * factor).floor() as u32).max(1)
}
