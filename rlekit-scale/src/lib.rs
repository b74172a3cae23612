// SPDX-License-Identifier: MIT
//! # rlekit-scale: Factor-Based Image Downsampling
//!
//! This crate resizes 8-bit RGB pixel buffers by a single linear scale
//! factor applied to both axes. The default resampling filter is
//! nearest-neighbor, so every destination pixel is a copy of one source pixel
//! and no new sample values are introduced.
//!
//! ## Key Components
//!
//! - [`plan`]: Scale factor validation and output size computation
//! - [`cpu`]: CPU resize built on `fast_image_resize`
//!
//! ## Rounding
//!
//! Output dimensions are `floor(w * factor) x floor(h * factor)`, clamped to at
//! least one pixel per axis. A 0.5 factor therefore halves even dimensions
//! exactly and drops the last row/column of odd ones.
//!
//! ## Usage Example
//!
//! ```rust
//! use rlekit_scale::cpu::scale_rgb8;
//! use rlekit_scale::plan::{build_plan, ResampleFilter, ScaleFactor, Size};
//!
//! let input = Size { w: 4, h: 2 };
//! let plan = build_plan(input, ScaleFactor::new(0.5).unwrap());
//! assert_eq!((plan.out.w, plan.out.h), (2, 1));
//!
//! let src = vec![7u8; 4 * 2 * 3];
//! let mut dst = vec![0u8; plan.out_len_rgb8()];
//! let mut resizer = fast_image_resize::Resizer::new();
//! scale_rgb8(&mut resizer, &src, input, &plan, ResampleFilter::Nearest, &mut dst).unwrap();
//! assert!(dst.iter().all(|&b| b == 7));
//! ```

pub mod cpu;
pub mod plan;

pub use cpu::ScaleError;
