//! Common test utilities shared by the integration tests.
//!
//! Synthetic images are written into a `TempDir` so tests never depend on
//! asset files being present.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use tempfile::TempDir;

/// Standard test sizes
pub const SMALL: (u32, u32) = (16, 12);
pub const ODD: (u32, u32) = (15, 9);

/// Horizontal bands of solid color, long runs in every channel.
pub fn banded(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |_, y| {
        let band = ((y / 3) % 5) as u8;
        Rgb([band * 50, 255 - band * 50, 128])
    })
}

/// Per-pixel noise-like pattern, runs of length 1 almost everywhere.
pub fn noisy(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let v = x.wrapping_mul(73).wrapping_add(y.wrapping_mul(151)) as u8;
        Rgb([v, v.wrapping_add(17), v.wrapping_mul(3)])
    })
}

/// Save `img` as `name` inside `dir` and return the full path.
pub fn write_image(dir: &TempDir, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.path().join(name);
    img.save(&path).expect("failed to write test image");
    path
}

/// Write `count` images named `<prefix><i>.<ext>` with growing sizes.
pub fn write_batch(dir: &Path, prefix: &str, ext: &str, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let side = 8 + 2 * i as u32;
            let path = dir.join(format!("{prefix}{i}.{ext}"));
            banded(side, side).save(&path).expect("failed to write batch image");
            path
        })
        .collect()
}
