//! Canonical decoding into the fixed display-ready pixel layout.
//!
//! Source buffers arrive from decoders in whatever layout the container
//! produced. Rendering them once into the canonical format (premultiplied
//! alpha first, host word order, device color space, upright) makes every
//! later blit a straight memory copy.

use imageprep_core::{
    has_alpha, map_pixel, ChannelOffsets, ColorSpace, ImageKind, Orientation, PixelBuffer,
    PixelFormat,
};
use tracing::{debug, warn};

/// Decode policy gate.
///
/// Decoding is skipped for absent input, for buffers already in canonical
/// form with upright orientation, and for animated or vector images, where
/// re-rendering is wasted work or semantically wrong.
pub fn should_decode(
    buffer: Option<&PixelBuffer>,
    kind: ImageKind,
    orientation: Orientation,
) -> bool {
    let Some(buf) = buffer else {
        return false;
    };
    if matches!(kind, ImageKind::Animated | ImageKind::Vector) {
        return false;
    }
    !(buf.is_canonical() && orientation.is_identity())
}

/// Re-render a source buffer into the canonical layout, upright.
///
/// The destination layout follows the alpha classification of the source:
/// premultiplied-first when transparency is present, skip-first otherwise.
/// Returns `None` when the destination cannot be allocated; the caller
/// falls back to the original buffer, so failure here is never fatal.
pub fn decode(src: &PixelBuffer, orientation: Orientation) -> Option<PixelBuffer> {
    let (dst_w, dst_h) = orientation.oriented_size(src.width(), src.height());
    let dst_format = if has_alpha(Some(src)) {
        PixelFormat::CANONICAL_ALPHA
    } else {
        PixelFormat::CANONICAL_OPAQUE
    };
    let mut dst = match PixelBuffer::new(dst_w, dst_h, dst_format, ColorSpace::Srgb) {
        Ok(buf) => buf,
        Err(err) => {
            warn!("canonical decode: allocating {dst_w}x{dst_h} failed: {err}");
            return None;
        }
    };
    render_oriented(src, &mut dst, orientation);
    debug!(
        "canonical decode: {}x{} {:?} -> {}x{} {:?}",
        src.width(),
        src.height(),
        src.format().alpha,
        dst_w,
        dst_h,
        dst_format.alpha,
    );
    Some(dst)
}

/// Policy wrapper: decode when the gate allows it, otherwise hand back the
/// input by identity (a move, never a copy). Decode failure also returns
/// the original, keeping the pipeline degraded-but-alive.
pub fn decode_or_keep(src: PixelBuffer, kind: ImageKind, orientation: Orientation) -> PixelBuffer {
    if !should_decode(Some(&src), kind, orientation) {
        return src;
    }
    match decode(&src, orientation) {
        Some(decoded) => decoded,
        None => src,
    }
}

/// Multiply a color component by alpha, rounding to nearest.
#[inline]
pub(crate) fn premultiply(component: u8, alpha: u8) -> u8 {
    ((component as u32 * alpha as u32 + 127) / 255) as u8
}

/// Read one pixel's components as (r, g, b, a), alpha 255 for opaque layouts.
#[inline]
pub(crate) fn load_components(px: &[u8], offsets: ChannelOffsets, has_alpha: bool) -> [u8; 4] {
    let a = if has_alpha { px[offsets.a] } else { 255 };
    [px[offsets.r], px[offsets.g], px[offsets.b], a]
}

/// Write (r, g, b, a) into a destination pixel, padding with 0xFF when the
/// destination layout carries no alpha.
#[inline]
pub(crate) fn store_components(
    out: &mut [u8],
    offsets: ChannelOffsets,
    dst_has_alpha: bool,
    rgba: [u8; 4],
) {
    out[offsets.r] = rgba[0];
    out[offsets.g] = rgba[1];
    out[offsets.b] = rgba[2];
    out[offsets.a] = if dst_has_alpha { rgba[3] } else { 0xFF };
}

fn render_oriented(src: &PixelBuffer, dst: &mut PixelBuffer, orientation: Orientation) {
    let src_offsets = src.format().channel_offsets();
    let dst_offsets = dst.format().channel_offsets();
    let src_has_alpha = src.format().has_alpha();
    let src_premultiplied = src.format().is_premultiplied();
    let dst_has_alpha = dst.format().has_alpha();
    let (w, h) = (src.width(), src.height());

    for y in 0..h {
        let src_row = src.row(y);
        for x in 0..w {
            let px = &src_row[x as usize * 4..x as usize * 4 + 4];
            let [r, g, b, a] = load_components(px, src_offsets, src_has_alpha);
            let rgba = if dst_has_alpha && !src_premultiplied {
                [premultiply(r, a), premultiply(g, a), premultiply(b, a), a]
            } else {
                [r, g, b, a]
            };
            let (dx, dy) = map_pixel(orientation, x, y, w, h);
            store_components(dst.pixel_mut(dx, dy), dst_offsets, dst_has_alpha, rgba);
        }
    }
}
