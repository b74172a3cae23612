//! # Downsampling Report
//!
//! Resizes each configured image by a fixed factor and records how the raw
//! pixel buffer size changes. Sizes are decoded buffer sizes (`w * h * 3` for
//! 8-bit RGB), not file sizes, so the ratio reflects only the resize.

use std::path::Path;

use fast_image_resize::Resizer;
use image::RgbImage;
use rlekit_scale::cpu::scale_rgb8;
use rlekit_scale::plan::{ResampleFilter, ScaleFactor, Size, build_plan};
use serde::Serialize;

use crate::channels;
use crate::config::DownsampleConfig;
use crate::error::{KitError, KitResult, classify};

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// File name of the source image.
    pub name: String,
    /// Raw RGB buffer size of the source, in bytes.
    pub original_bytes: usize,
    /// Raw RGB buffer size after resizing, in bytes.
    pub resized_bytes: usize,
    /// `resized_bytes / original_bytes`.
    pub ratio: f64,
}

impl ReportRow {
    pub fn original_kb(&self) -> f64 {
        self.original_bytes as f64 / 1024.0
    }

    pub fn resized_kb(&self) -> f64 {
        self.resized_bytes as f64 / 1024.0
    }
}

/// Resize `img` by `factor` with the given filter.
///
/// When the planned size equals the input size the image is returned as is.
pub fn downsample_image(
    resizer: &mut Resizer,
    img: &RgbImage,
    factor: ScaleFactor,
    filter: ResampleFilter,
) -> KitResult<RgbImage> {
    let input = Size {
        w: img.width(),
        h: img.height(),
    };
    let plan = build_plan(input, factor);
    if plan.is_identity() {
        log::debug!("{}x{} unchanged at factor {}", input.w, input.h, factor.get());
        return Ok(img.clone());
    }

    let mut dst = vec![0u8; plan.out_len_rgb8()];
    scale_rgb8(resizer, img.as_raw(), input, &plan, filter, &mut dst)?;

    RgbImage::from_raw(plan.out.w, plan.out.h, dst).ok_or_else(|| {
        KitError::Geometry(format!(
            "resized buffer does not fit {}x{}",
            plan.out.w, plan.out.h
        ))
    })
}

/// Build a report row comparing `original` and `resized`.
pub fn report_row(name: impl Into<String>, original: &RgbImage, resized: &RgbImage) -> ReportRow {
    let original_bytes = original.as_raw().len();
    let resized_bytes = resized.as_raw().len();
    let ratio = if original_bytes == 0 {
        0.0
    } else {
        resized_bytes as f64 / original_bytes as f64
    };
    ReportRow {
        name: name.into(),
        original_bytes,
        resized_bytes,
        ratio,
    }
}

/// Process every configured input in order and return the report rows.
///
/// The first failing input aborts the batch, unless `skip_failed` is set and
/// the failure belongs to that input alone (unreadable or unwritable image).
pub fn run(config: &DownsampleConfig) -> KitResult<Vec<ReportRow>> {
    config.validate().map_err(|reason| {
        KitError::config(
            "downsample",
            format!("scale={} inputs={}", config.scale, config.inputs.len()),
            reason,
        )
    })?;
    let factor = config.factor()?;

    log::info!(
        "downsampling {} image(s) by {} ({:?})",
        config.inputs.len(),
        factor.get(),
        config.filter
    );
    if !factor.is_downscale() {
        log::warn!("scale factor {} does not shrink the images", factor.get());
    }

    if let Some(dir) = &config.save_dir {
        std::fs::create_dir_all(dir).map_err(|e| {
            KitError::io(format!("creating save directory {}", dir.display()), e)
        })?;
    }

    let mut resizer = Resizer::new();
    let mut rows = Vec::with_capacity(config.inputs.len());
    for path in &config.inputs {
        match process_one(&mut resizer, path, factor, config) {
            Ok(row) => rows.push(row),
            Err(err) if config.skip_failed && classify::is_per_input(&err) => {
                log::warn!("skipping {}: {err}", path.display());
            }
            Err(err) => return Err(err),
        }
    }
    Ok(rows)
}

fn process_one(
    resizer: &mut Resizer,
    path: &Path,
    factor: ScaleFactor,
    config: &DownsampleConfig,
) -> KitResult<ReportRow> {
    let img = channels::load_rgb(path)?;
    let resized = downsample_image(resizer, &img, factor, config.filter)?;

    if let Some(dir) = &config.save_dir {
        save_resized(&resized, &dir.join(resized_file_name(path)))?;
    }

    let row = report_row(display_name(path), &img, &resized);
    log::debug!(
        "{}: {}x{} -> {}x{} ratio {:.2}",
        row.name,
        img.width(),
        img.height(),
        resized.width(),
        resized.height(),
        row.ratio
    );
    Ok(row)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `photo.jpg` -> `photo_resized.png`
fn resized_file_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    format!("{stem}_resized.png")
}

fn save_resized(img: &RgbImage, path: &Path) -> KitResult<()> {
    img.save(path).map_err(|e| KitError::image_save(path, e))?;
    log::debug!("saved {}", path.display());
    Ok(())
}
