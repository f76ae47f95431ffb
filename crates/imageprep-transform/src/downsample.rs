//! Bounded-memory scale-down of oversized pixel buffers.
//!
//! The source is processed in full-width row bands so peak memory stays at
//! one band plus the accumulating destination, independent of source
//! height. Container decoders emit full-width rows anyway, so partial-width
//! tiling would gain nothing.

use imageprep_core::{
    default_byte_budget, has_alpha, ColorSpace, PixelBuffer, PixelFormat, Result,
    BYTES_PER_PIXEL,
};
use tracing::{debug, warn};

use crate::resample::resample_band;

/// Extra destination pixels resampled at each band boundary so adjacent
/// bands blend instead of seaming.
const SEAM_OVERLAP_DEST_PIXELS: f64 = 2.0;

/// Whether a buffer exceeds the byte budget and needs scaling down.
///
/// A `budget_bytes` of 0 means "use the process-wide default budget".
/// A zero-area source never scales down.
pub fn should_scale_down(buffer: &PixelBuffer, budget_bytes: u64) -> bool {
    let budget = resolve_budget(budget_bytes);
    let src_pixels = buffer.pixel_count();
    if src_pixels == 0 {
        return false;
    }
    budget / BYTES_PER_PIXEL < src_pixels
}

/// Scale a buffer down to fit the byte budget, in bounded memory.
///
/// Always returns a valid buffer: the scaled result, or the original
/// unchanged when no scaling is needed or any allocation fails along the
/// way. Downsampling is advisory; the degraded-but-valid original beats no
/// image at all.
pub fn downsample(src: PixelBuffer, budget_bytes: u64) -> PixelBuffer {
    let budget = resolve_budget(budget_bytes);
    if !should_scale_down(&src, budget) {
        return src;
    }
    match scale_down(&src, budget) {
        Ok(scaled) => {
            debug!(
                "downsampled {}x{} -> {}x{} within {budget} bytes",
                src.width(),
                src.height(),
                scaled.width(),
                scaled.height(),
            );
            scaled
        }
        Err(err) => {
            warn!("downsample failed, keeping original: {err}");
            src
        }
    }
}

#[inline]
fn resolve_budget(budget_bytes: u64) -> u64 {
    if budget_bytes == 0 {
        default_byte_budget()
    } else {
        budget_bytes
    }
}

fn scale_down(src: &PixelBuffer, budget: u64) -> Result<PixelBuffer> {
    let dest_total_pixels = (budget / BYTES_PER_PIXEL).max(1);
    let image_scale = (dest_total_pixels as f64 / src.pixel_count() as f64).sqrt();
    let dest_w = ((src.width() as f64 * image_scale).round() as u32).max(1);
    let dest_h = ((src.height() as f64 * image_scale).round() as u32).max(1);

    let dst_format = if has_alpha(Some(src)) {
        PixelFormat::CANONICAL_ALPHA
    } else {
        PixelFormat::CANONICAL_OPAQUE
    };
    let mut dst = PixelBuffer::new(dest_w, dest_h, dst_format, ColorSpace::Srgb)?;

    // A third of the destination pixel budget per band: one source band,
    // the destination, and one working copy collectively stay in budget.
    let band_pixel_budget = (dest_total_pixels / 3).max(1);
    let band_height = (((band_pixel_budget / src.width() as u64).max(1)) as u32).min(src.height());
    let overlap_rows = (SEAM_OVERLAP_DEST_PIXELS / image_scale).ceil() as u32;

    let band_count = src.height().div_ceil(band_height);
    for band_index in 0..band_count {
        let band_y0 = band_index * band_height;
        let band_y1 = (band_y0 + band_height).min(src.height());
        // Extend past the nominal band end by the seam overlap; the final
        // band is trimmed to the exact remaining height.
        let rows = (band_y1 - band_y0 + overlap_rows).min(src.height() - band_y0);
        let band = src.crop_rows(band_y0, rows)?;

        let dest_y0 = (band_y0 as f64 * image_scale).floor() as u32;
        let dest_y1 = if band_index + 1 == band_count {
            dest_h
        } else {
            (band_y1 as f64 * image_scale).floor() as u32
        };
        resample_band(&band, band_y0, &mut dst, dest_y0..dest_y1, image_scale);
    }

    Ok(dst)
}
