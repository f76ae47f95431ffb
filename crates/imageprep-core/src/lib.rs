//! ImagePrep Core - Foundation types for bitmap normalization
//!
//! This crate provides the fundamental types used throughout ImagePrep:
//! - Pixel buffers, layouts, and alpha classification
//! - Orientation tags and the transforms that make images upright
//! - The process-wide destination byte budget
//! - Exact frame timing for animated sequences

pub mod budget;
pub mod error;
pub mod geometry;
pub mod orientation;
pub mod pixel;
pub mod timing;

pub use budget::{
    default_byte_budget, device_tier, set_default_byte_budget, set_device_tier, DeviceTier,
    BYTES_PER_PIXEL,
};
pub use error::{ImagePrepError, Result};
pub use geometry::Transform2D;
pub use orientation::{map_pixel, transform_for, Orientation};
pub use pixel::{
    has_alpha, AlphaLayout, ByteOrder, ChannelOffsets, ColorSpace, ImageKind, PixelBuffer,
    PixelFormat, SharedPixelBuffer,
};
pub use timing::{FrameDuration, UNSPECIFIED_FRAME_DURATION};
