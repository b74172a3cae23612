// SPDX-License-Identifier: MIT
// CPU scaler built on fast_image_resize.
// RGB8 in, RGB8 out, direct write into caller-provided dst buffer.

use fast_image_resize as fir;
use fir::images::{TypedImage, TypedImageRef};
use fir::pixels::U8x3;
use fir::{ResizeOptions, Resizer};
use thiserror::Error;

use crate::plan::{ResampleFilter, ScalePlan, Size};

#[derive(Debug, Error)]
pub enum ScaleError {
    #[error("Scale factor must be finite, positive and at most 16, got {0}")]
    InvalidFactor(f64),
    #[error("Input image has no pixels ({0}x{1})")]
    EmptyInput(u32, u32),
    #[error("Output buffer too small: need {need} bytes, got {got}")]
    BufferTooSmall { need: usize, got: usize },
    #[error("Plan was built for {planned:?} but input is {actual:?}")]
    PlanMismatch { planned: Size, actual: Size },
    #[error("Fast image resize error: {0}")]
    Fir(#[from] fir::ResizeError),
    #[error("Image buffer error: {0}")]
    ImageBuf(#[from] fir::ImageBufferError),
}

/// Resize a tightly packed RGB8 buffer according to `plan`.
/// `dst` must hold at least `plan.out_len_rgb8()` bytes; only that prefix is written.
pub fn scale_rgb8(
    resizer: &mut Resizer,
    src_rgb: &[u8],
    src: Size,
    plan: &ScalePlan,
    filter: ResampleFilter,
    dst: &mut [u8],
) -> Result<(), ScaleError> {
    check_inputs(src, plan, dst.len(), plan.out_len_rgb8())?;

    let src_view = TypedImageRef::<U8x3>::from_buffer(src.w, src.h, src_rgb)?;
    let mut dst_image =
        TypedImage::<U8x3>::from_buffer(plan.out.w, plan.out.h, &mut dst[..plan.out_len_rgb8()])?;

    let opts = ResizeOptions::new().resize_alg(filter.to_alg());
    resizer.resize_typed::<U8x3>(&src_view, &mut dst_image, &opts)?;
    Ok(())
}

#[inline]
fn check_inputs(src: Size, plan: &ScalePlan, dst_len: usize, need: usize) -> Result<(), ScaleError> {
    if src.w == 0 || src.h == 0 {
        return Err(ScaleError::EmptyInput(src.w, src.h));
    }
    if src != plan.input {
        return Err(ScaleError::PlanMismatch {
            planned: plan.input,
            actual: src,
        });
    }
    if dst_len < need {
        return Err(ScaleError::BufferTooSmall { need, got: dst_len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{build_plan, ScaleFactor};

    /// 2x2 blocks of a single color each, so any nearest pick inside a block
    /// yields the block color.
    fn block_image(blocks_w: u32, blocks_h: u32) -> (Vec<u8>, Size) {
        let size = Size {
            w: blocks_w * 2,
            h: blocks_h * 2,
        };
        let mut data = Vec::with_capacity(size.pixels() * 3);
        for y in 0..size.h {
            for x in 0..size.w {
                let (bx, by) = (x / 2, y / 2);
                data.extend_from_slice(&[(bx * 40) as u8, (by * 40) as u8, 200]);
            }
        }
        (data, size)
    }

    #[test]
    fn test_nearest_half_keeps_block_colors() {
        let (src, size) = block_image(4, 3);
        let plan = build_plan(size, ScaleFactor::new(0.5).unwrap());
        let mut dst = vec![0u8; plan.out_len_rgb8()];
        let mut resizer = Resizer::new();

        scale_rgb8(&mut resizer, &src, size, &plan, ResampleFilter::Nearest, &mut dst).unwrap();

        assert_eq!(plan.out, Size { w: 4, h: 3 });
        for by in 0..3u32 {
            for bx in 0..4u32 {
                let i = ((by * 4 + bx) * 3) as usize;
                assert_eq!(&dst[i..i + 3], &[(bx * 40) as u8, (by * 40) as u8, 200]);
            }
        }
    }

    #[test]
    fn test_buffer_too_small() {
        let (src, size) = block_image(2, 2);
        let plan = build_plan(size, ScaleFactor::new(0.5).unwrap());
        let mut dst = vec![0u8; plan.out_len_rgb8() - 1];
        let mut resizer = Resizer::new();

        let err = scale_rgb8(&mut resizer, &src, size, &plan, ResampleFilter::Nearest, &mut dst)
            .unwrap_err();
        assert!(matches!(err, ScaleError::BufferTooSmall { .. }));
    }

    #[test]
    fn test_plan_mismatch() {
        let (src, size) = block_image(2, 2);
        let plan = build_plan(Size { w: 8, h: 8 }, ScaleFactor::new(0.5).unwrap());
        let mut dst = vec![0u8; plan.out_len_rgb8()];
        let mut resizer = Resizer::new();

        let err = scale_rgb8(&mut resizer, &src, size, &plan, ResampleFilter::Nearest, &mut dst)
            .unwrap_err();
        assert!(matches!(err, ScaleError::PlanMismatch { .. }));
    }

    #[test]
    fn test_short_source_buffer_is_rejected() {
        let size = Size { w: 4, h: 4 };
        let src = vec![0u8; 10];
        let plan = build_plan(size, ScaleFactor::new(0.5).unwrap());
        let mut dst = vec![0u8; plan.out_len_rgb8()];
        let mut resizer = Resizer::new();

        let err = scale_rgb8(&mut resizer, &src, size, &plan, ResampleFilter::Nearest, &mut dst)
            .unwrap_err();
        assert!(matches!(err, ScaleError::ImageBuf(_)));
    }
}
