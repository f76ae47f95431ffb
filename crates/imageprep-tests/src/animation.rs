//! Integration tests for animated sequences across crates.

use std::sync::Arc;

use imageprep_anim::{
    collapse_to_sequence, expand_from_sequence, AnimatedSequence, DedupPolicy, Frame,
};
use imageprep_core::{FrameDuration, Orientation, PixelBuffer, PixelFormat};

fn frame(ms: i64) -> Frame {
    Frame::new(
        Arc::new(PixelBuffer::test_pattern(8, 8)),
        FrameDuration::from_millis(ms),
    )
}

#[test]
fn decode_then_collapse_preserves_timing() {
    let seq = AnimatedSequence::from_frames([frame(40), frame(80), frame(40)], 0);
    let decoded = seq.decode_frames(Orientation::Up);
    for f in &decoded.frames {
        assert_eq!(f.buffer.format(), PixelFormat::CANONICAL_ALPHA);
    }

    let collapsed = collapse_to_sequence(&decoded.frames);
    // gcd 40ms: 1 + 2 + 1 steps.
    assert_eq!(collapsed.images.len(), 4);
    assert_eq!(collapsed.total_duration.to_millis(), 160);
}

#[test]
fn platform_round_trip_with_rotated_frames() {
    let seq = AnimatedSequence::from_frames([frame(100), frame(100), frame(200)], 2);
    let decoded = seq.decode_frames(Orientation::Left);
    for f in &decoded.frames {
        assert_eq!((f.buffer.width(), f.buffer.height()), (8, 8));
        assert!(f.buffer.is_canonical());
    }

    let collapsed = collapse_to_sequence(&decoded.frames);
    let restored = expand_from_sequence(
        &collapsed.images,
        Some(collapsed.total_duration),
        DedupPolicy::Identity,
    );
    assert_eq!(restored.len(), 3);
    let total: FrameDuration = restored.iter().map(|f| f.duration).sum();
    assert_eq!(total.to_millis(), 400);
}

#[test]
fn sequence_loop_count_is_carried_not_interpreted() {
    let mut seq = AnimatedSequence::new(0);
    assert_eq!(seq.loop_count, 0, "0 means loop forever");
    seq.push(frame(100));
    let seq = seq.decode_frames(Orientation::Up);
    assert_eq!(seq.loop_count, 0);
    assert_eq!(seq.frame_count(), 1);
}
