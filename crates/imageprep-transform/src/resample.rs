//! Box-filter resampling of source row bands into a scaled destination.

use imageprep_core::PixelBuffer;

use crate::canonical::{load_components, premultiply, store_components};

/// Resample one source band into a range of destination rows.
///
/// `band` holds source rows starting at global row `band_y0`; `dest_rows`
/// are the destination rows this band is responsible for. Each destination
/// pixel averages the source pixels its footprint covers, clamped to the
/// rows actually present in the band (the caller's seam overlap keeps the
/// clamp off-screen).
pub(crate) fn resample_band(
    band: &PixelBuffer,
    band_y0: u32,
    dst: &mut PixelBuffer,
    dest_rows: std::ops::Range<u32>,
    scale: f64,
) {
    let src_offsets = band.format().channel_offsets();
    let src_has_alpha = band.format().has_alpha();
    let src_premultiplied = band.format().is_premultiplied();
    let dst_offsets = dst.format().channel_offsets();
    let dst_has_alpha = dst.format().has_alpha();

    let band_end = band_y0 + band.height();
    let src_w = band.width();

    // Column footprints are identical for every destination row.
    let col_spans: Vec<(u32, u32)> = (0..dst.width())
        .map(|dx| span(dx, scale, src_w))
        .collect();

    for dy in dest_rows {
        let (sy0, sy1) = row_span(dy, scale, band_y0, band_end);
        for (dx, &(sx0, sx1)) in col_spans.iter().enumerate() {
            let mut sums = [0u64; 4];
            let mut count = 0u64;
            for sy in sy0..sy1 {
                let row = band.row(sy - band_y0);
                for sx in sx0..sx1 {
                    let px = &row[sx as usize * 4..sx as usize * 4 + 4];
                    let [r, g, b, a] = load_components(px, src_offsets, src_has_alpha);
                    // Average in premultiplied space so partially transparent
                    // pixels do not bleed their color at full strength.
                    let (r, g, b) = if dst_has_alpha && !src_premultiplied {
                        (premultiply(r, a), premultiply(g, a), premultiply(b, a))
                    } else {
                        (r, g, b)
                    };
                    sums[0] += r as u64;
                    sums[1] += g as u64;
                    sums[2] += b as u64;
                    sums[3] += a as u64;
                    count += 1;
                }
            }
            let rgba = [
                ((sums[0] + count / 2) / count) as u8,
                ((sums[1] + count / 2) / count) as u8,
                ((sums[2] + count / 2) / count) as u8,
                ((sums[3] + count / 2) / count) as u8,
            ];
            store_components(dst.pixel_mut(dx as u32, dy), dst_offsets, dst_has_alpha, rgba);
        }
    }
}

/// Source column span covered by destination column `dx`, clamped to width.
fn span(dx: u32, scale: f64, src_w: u32) -> (u32, u32) {
    let sx0 = ((dx as f64 / scale).floor() as u32).min(src_w - 1);
    let sx1 = (((dx + 1) as f64 / scale).ceil() as u32).clamp(sx0 + 1, src_w);
    (sx0, sx1)
}

/// Source row span for destination row `dy`, clamped to the band.
fn row_span(dy: u32, scale: f64, band_y0: u32, band_end: u32) -> (u32, u32) {
    let sy0 = ((dy as f64 / scale).floor() as u32).clamp(band_y0, band_end - 1);
    let sy1 = (((dy + 1) as f64 / scale).ceil() as u32).clamp(sy0 + 1, band_end);
    (sy0, sy1)
}
