//! Animated image sequences as explicit, immutable frame lists.

use imageprep_core::{FrameDuration, ImageKind, Orientation, SharedPixelBuffer};
use imageprep_transform::{decode, should_decode};
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::debug;

/// One animation frame: a shared pixel buffer plus its display duration.
///
/// A zero duration means "unspecified"; negative durations are a broken
/// caller contract and are not validated here.
#[derive(Debug, Clone)]
pub struct Frame {
    pub buffer: SharedPixelBuffer,
    pub duration: FrameDuration,
}

impl Frame {
    pub fn new(buffer: SharedPixelBuffer, duration: FrameDuration) -> Self {
        Self { buffer, duration }
    }
}

/// An ordered list of frames in presentation order, plus a loop count.
///
/// Assembled once by a decoder or by [`crate::expand_from_sequence`] and
/// consumed by value; there is no shared playback cursor.
#[derive(Debug, Clone, Default)]
pub struct AnimatedSequence {
    /// Frames in presentation order. Inline storage covers the common
    /// single-frame case without a heap allocation.
    pub frames: SmallVec<[Frame; 1]>,
    /// Number of times the animation repeats; 0 means loop forever.
    pub loop_count: u32,
}

impl AnimatedSequence {
    pub fn new(loop_count: u32) -> Self {
        Self {
            frames: SmallVec::new(),
            loop_count,
        }
    }

    pub fn from_frames(frames: impl IntoIterator<Item = Frame>, loop_count: u32) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            loop_count,
        }
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total play duration of one loop.
    pub fn total_duration(&self) -> FrameDuration {
        self.frames.iter().map(|f| f.duration).sum()
    }

    /// Canonically decode every frame buffer, resolution by resolution.
    ///
    /// Frames whose buffers are already canonical, or whose decode fails,
    /// keep their original buffer. Each frame is treated as a still image
    /// here; the animated-input decode gate applies to whole images, not to
    /// the frames this sequence has already been split into.
    pub fn decode_frames(mut self, orientation: Orientation) -> Self {
        let mut decoded = 0usize;
        for frame in self.frames.iter_mut() {
            if !should_decode(Some(&frame.buffer), ImageKind::Still, orientation) {
                continue;
            }
            if let Some(buf) = decode(&frame.buffer, orientation) {
                frame.buffer = Arc::new(buf);
                decoded += 1;
            }
        }
        debug!("decoded {decoded}/{} animation frames", self.frames.len());
        self
    }
}
