//! # rlekit
//!
//! Two small image tools sharing one crate:
//!
//! - **RLE round trip**: run-length encode every color channel of an image,
//!   serialize it to a binary frame, decode it again and verify nothing was
//!   lost.
//! - **Downsampling report**: resize a batch of images by a fixed factor with
//!   nearest-neighbor interpolation and tabulate raw size before/after.
//!
//! ## Architecture
//!
//! - `codec`: run-length kernels and the binary frame format
//! - `channels`: image loading and per-channel planes
//! - `roundtrip`: the encode/decode verification pipeline
//! - `downsample`: the resize report pipeline (scaling lives in `rlekit-scale`)
//! - `table`: text and JSON rendering of the report
//! - `config`: validated configuration for both pipelines
//! - `error`: the library error type
//!
//! ## Example
//!
//! ```rust
//! use rlekit::codec::rle;
//!
//! let runs = rle::encode(&[0u8, 0, 0, 5, 5, 2]);
//! assert_eq!(runs.len(), 3);
//! assert_eq!(rle::decode(&runs).unwrap(), vec![0, 0, 0, 5, 5, 2]);
//! ```

pub mod channels;
pub mod codec;
pub mod config;
pub mod downsample;
pub mod error;
pub mod roundtrip;
pub mod table;

/// Re-export error types for convenience
pub use error::{HasRecoverySuggestion, KitError, KitResult};

/// Re-export the scaling crate so callers need a single dependency
pub use rlekit_scale;
