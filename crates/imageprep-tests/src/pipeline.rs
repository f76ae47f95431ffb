//! Integration tests for the still-image pipeline.
//!
//! Exercises orientation, canonical decode, and the tiled downsampler
//! together, the way an image-loading system drives them.

use imageprep_core::{
    has_alpha, map_pixel, ColorSpace, ImageKind, Orientation, PixelBuffer, PixelFormat,
    BYTES_PER_PIXEL,
};
use imageprep_transform::{decode, decode_or_keep, downsample, should_decode, should_scale_down};

// ── Helpers ────────────────────────────────────────────────────

fn oriented_source(w: u32, h: u32) -> PixelBuffer {
    // Distinct pixel values so transforms are position-checkable.
    let mut buf = PixelBuffer::new(w, h, PixelFormat::RGBA, ColorSpace::Srgb).unwrap();
    for y in 0..h {
        let row = buf.row_mut(y);
        for x in 0..w {
            let i = x as usize * 4;
            row[i] = x as u8;
            row[i + 1] = y as u8;
            row[i + 2] = 7;
            row[i + 3] = 255;
        }
    }
    buf
}

// ── Decode then downsample ─────────────────────────────────────

#[test]
fn decode_then_downsample_preserves_canonical_form() {
    let src = oriented_source(64, 48);
    let decoded = decode_or_keep(src, ImageKind::Still, Orientation::Right);
    assert_eq!((decoded.width(), decoded.height()), (48, 64));
    assert!(decoded.is_canonical());

    let budget = 24 * 32 * BYTES_PER_PIXEL;
    assert!(should_scale_down(&decoded, budget));
    let scaled = downsample(decoded, budget);
    assert!(scaled.is_canonical());
    assert!(scaled.byte_size() <= budget + scaled.width() as u64 * BYTES_PER_PIXEL);
}

#[test]
fn every_orientation_lands_source_pixels_where_the_map_says() {
    let (w, h) = (6u32, 4u32);
    let src = oriented_source(w, h);
    for orientation in Orientation::ALL {
        let decoded = decode(&src, orientation).unwrap();
        let offs = decoded.format().channel_offsets();
        for y in 0..h {
            for x in 0..w {
                let (dx, dy) = map_pixel(orientation, x, y, w, h);
                let px = decoded.pixel(dx, dy);
                assert_eq!(
                    (px[offs.r], px[offs.g]),
                    (x as u8, y as u8),
                    "{orientation:?}: source ({x},{y}) misplaced"
                );
            }
        }
    }
}

#[test]
fn decoded_output_is_stable_under_second_decode() {
    let src = oriented_source(16, 16);
    let decoded = decode_or_keep(src, ImageKind::Still, Orientation::Up);
    assert!(decoded.is_canonical());
    assert!(!should_decode(
        Some(&decoded),
        ImageKind::Still,
        Orientation::Up
    ));
    let ptr = decoded.data().as_ptr();
    let again = decode_or_keep(decoded, ImageKind::Still, Orientation::Up);
    assert_eq!(again.data().as_ptr(), ptr);
}

#[test]
fn opaque_pipeline_stays_opaque() {
    let src = PixelBuffer::new(
        80,
        80,
        PixelFormat {
            alpha: imageprep_core::AlphaLayout::NoneSkipLast,
            byte_order: imageprep_core::ByteOrder::Default,
        },
        ColorSpace::Srgb,
    )
    .unwrap();
    assert!(!has_alpha(Some(&src)));

    let decoded = decode_or_keep(src, ImageKind::Still, Orientation::Up);
    assert_eq!(decoded.format(), PixelFormat::CANONICAL_OPAQUE);

    let scaled = downsample(decoded, 40 * 40 * BYTES_PER_PIXEL);
    assert_eq!(scaled.format(), PixelFormat::CANONICAL_OPAQUE);
}

#[test]
fn downsample_with_explicit_budget_ignores_process_default() {
    // An explicit budget smaller than any tier default must still trigger.
    let src = PixelBuffer::test_pattern(128, 128);
    let budget = 32 * 32 * BYTES_PER_PIXEL;
    let out = downsample(src, budget);
    assert!(out.pixel_count() <= 32 * 32 + out.width() as u64);
}
