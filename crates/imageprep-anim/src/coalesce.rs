//! GCD timing quantization between per-frame durations and flat sequences.
//!
//! Platform animation objects store one image per equal time step and a
//! single overall duration. Collapsing frames to that model expands each
//! frame into `duration / gcd` repeats; expanding back coalesces runs of
//! identical images into frames with summed durations.

use imageprep_core::{FrameDuration, SharedPixelBuffer, UNSPECIFIED_FRAME_DURATION};
use num_integer::Integer;
use std::sync::Arc;
use tracing::debug;

use crate::sequence::Frame;

/// How "same image" is decided when coalescing a flat sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Pointer identity of the shared buffer. Matches platform behavior,
    /// where repeated steps reference the same image object.
    #[default]
    Identity,
    /// Dimensions, format, and pixel bytes. Merges visually identical
    /// buffers that were decoded separately.
    PixelEquality,
}

/// A flat, equal-step image sequence with one overall play duration.
#[derive(Debug, Clone)]
pub struct CollapsedSequence {
    /// One image per time step; repeated entries share the same buffer.
    pub images: Vec<SharedPixelBuffer>,
    /// Duration of the whole sequence, the sum of the input durations.
    pub total_duration: FrameDuration,
}

/// Quantize frame durations to their millisecond GCD and expand each frame
/// into that many equal steps.
///
/// With durations `[100ms, 200ms, 100ms]` the GCD is 100ms and the output
/// holds 4 images with a 400ms total. A GCD of 0 (no frames, or every
/// duration zero) degenerates to one step per frame.
pub fn collapse_to_sequence(frames: &[Frame]) -> CollapsedSequence {
    let durations_ms: Vec<i64> = frames.iter().map(|f| f.duration.to_millis()).collect();
    let gcd_ms = durations_ms.iter().fold(0i64, |acc, &ms| acc.gcd(&ms));

    let mut images = Vec::new();
    let mut total_ms = 0i64;
    for (frame, &ms) in frames.iter().zip(&durations_ms) {
        let repeats = if gcd_ms > 0 { ms / gcd_ms } else { 1 };
        for _ in 0..repeats {
            images.push(Arc::clone(&frame.buffer));
        }
        total_ms += ms;
    }
    debug!(
        "collapsed {} frames into {} steps (gcd {gcd_ms}ms)",
        frames.len(),
        images.len(),
    );
    CollapsedSequence {
        images,
        total_duration: FrameDuration::from_millis(total_ms),
    }
}

/// Coalesce a flat image sequence back into frames with durations.
///
/// Each step lasts `total_duration / len`; when no duration is available
/// (or it is zero, meaning unspecified) every step defaults to 100ms.
/// Consecutive same images merge into one frame whose duration covers the
/// whole run; the first element always starts the first run.
pub fn expand_from_sequence(
    images: &[SharedPixelBuffer],
    total_duration: Option<FrameDuration>,
    policy: DedupPolicy,
) -> Vec<Frame> {
    if images.is_empty() {
        return Vec::new();
    }
    let avg = match total_duration {
        Some(total) if !total.is_zero() => total / images.len() as i64,
        _ => UNSPECIFIED_FRAME_DURATION,
    };

    let mut frames = Vec::new();
    let mut run_image = &images[0];
    let mut run_len = 1i64;
    for image in &images[1..] {
        if same_image(run_image, image, policy) {
            run_len += 1;
        } else {
            frames.push(Frame::new(Arc::clone(run_image), avg * run_len));
            run_image = image;
            run_len = 1;
        }
    }
    frames.push(Frame::new(Arc::clone(run_image), avg * run_len));
    frames
}

fn same_image(a: &SharedPixelBuffer, b: &SharedPixelBuffer, policy: DedupPolicy) -> bool {
    match policy {
        DedupPolicy::Identity => Arc::ptr_eq(a, b),
        DedupPolicy::PixelEquality => {
            a.width() == b.width()
                && a.height() == b.height()
                && a.format() == b.format()
                && a.data() == b.data()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageprep_core::PixelBuffer;

    fn image() -> SharedPixelBuffer {
        Arc::new(PixelBuffer::test_pattern(2, 2))
    }

    fn frames_with_millis(durations: &[i64]) -> Vec<Frame> {
        durations
            .iter()
            .map(|&ms| Frame::new(image(), FrameDuration::from_millis(ms)))
            .collect()
    }

    #[test]
    fn collapse_expands_by_gcd() {
        let frames = frames_with_millis(&[100, 200, 100]);
        let collapsed = collapse_to_sequence(&frames);

        assert_eq!(collapsed.images.len(), 4);
        assert_eq!(collapsed.total_duration.to_millis(), 400);
        // f0, f1, f1, f2
        assert!(Arc::ptr_eq(&collapsed.images[0], &frames[0].buffer));
        assert!(Arc::ptr_eq(&collapsed.images[1], &frames[1].buffer));
        assert!(Arc::ptr_eq(&collapsed.images[2], &frames[1].buffer));
        assert!(Arc::ptr_eq(&collapsed.images[3], &frames[2].buffer));
    }

    #[test]
    fn collapse_reconstructs_total_from_gcd_steps() {
        let frames = frames_with_millis(&[120, 180, 60]);
        let collapsed = collapse_to_sequence(&frames);
        // gcd 60: 2 + 3 + 1 steps of 60ms each.
        assert_eq!(collapsed.images.len(), 6);
        assert_eq!(
            collapsed.images.len() as i64 * 60,
            collapsed.total_duration.to_millis()
        );
    }

    #[test]
    fn collapse_all_zero_durations_uses_one_step_per_frame() {
        let frames = frames_with_millis(&[0, 0, 0]);
        let collapsed = collapse_to_sequence(&frames);
        assert_eq!(collapsed.images.len(), 3);
        assert!(collapsed.total_duration.is_zero());
    }

    #[test]
    fn collapse_empty_input() {
        let collapsed = collapse_to_sequence(&[]);
        assert!(collapsed.images.is_empty());
        assert!(collapsed.total_duration.is_zero());
    }

    #[test]
    fn expand_coalesces_identical_runs() {
        let a = image();
        let b = image();
        let mut steps = vec![Arc::clone(&a); 5];
        steps.push(Arc::clone(&b));

        let frames = expand_from_sequence(
            &steps,
            Some(FrameDuration::from_millis(600)),
            DedupPolicy::Identity,
        );
        assert_eq!(frames.len(), 2);
        assert!(Arc::ptr_eq(&frames[0].buffer, &a));
        assert_eq!(frames[0].duration.to_millis(), 500);
        assert!(Arc::ptr_eq(&frames[1].buffer, &b));
        assert_eq!(frames[1].duration.to_millis(), 100);
    }

    #[test]
    fn expand_without_total_defaults_to_100ms() {
        let steps = vec![image(), image(), image()];
        let frames = expand_from_sequence(&steps, None, DedupPolicy::Identity);
        // Three distinct allocations: no coalescing under identity.
        assert_eq!(frames.len(), 3);
        for frame in &frames {
            assert_eq!(frame.duration.to_millis(), 100);
        }
    }

    #[test]
    fn expand_single_element_covers_full_duration() {
        let steps = vec![image()];
        let frames = expand_from_sequence(
            &steps,
            Some(FrameDuration::from_millis(250)),
            DedupPolicy::Identity,
        );
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].duration.to_millis(), 250);
    }

    #[test]
    fn expand_empty_sequence_yields_no_frames() {
        let frames = expand_from_sequence(&[], Some(FrameDuration::from_millis(100)), DedupPolicy::Identity);
        assert!(frames.is_empty());
    }

    #[test]
    fn pixel_equality_merges_distinct_allocations() {
        // Same pixels, different Arcs: identity keeps them apart,
        // value equality merges them.
        let steps = vec![image(), image()];
        let by_identity = expand_from_sequence(
            &steps,
            Some(FrameDuration::from_millis(200)),
            DedupPolicy::Identity,
        );
        assert_eq!(by_identity.len(), 2);

        let by_value = expand_from_sequence(
            &steps,
            Some(FrameDuration::from_millis(200)),
            DedupPolicy::PixelEquality,
        );
        assert_eq!(by_value.len(), 1);
        assert_eq!(by_value[0].duration.to_millis(), 200);
    }

    #[test]
    fn collapse_expand_round_trip() {
        let frames = frames_with_millis(&[100, 200, 100]);
        let collapsed = collapse_to_sequence(&frames);
        let restored = expand_from_sequence(
            &collapsed.images,
            Some(collapsed.total_duration),
            DedupPolicy::Identity,
        );
        assert_eq!(restored.len(), 3);
        for (original, round_tripped) in frames.iter().zip(&restored) {
            assert!(Arc::ptr_eq(&original.buffer, &round_tripped.buffer));
            assert_eq!(
                original.duration.to_millis(),
                round_tripped.duration.to_millis()
            );
        }
    }
}
