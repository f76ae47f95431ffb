//! ImagePrep Transform - display-ready transformation passes
//!
//! Two independent paths over decoded pixel buffers:
//! - canonical decode: re-render an arbitrary source layout into the fixed
//!   display-ready format and upright orientation
//! - tiled downsample: shrink an oversized buffer to a byte budget in
//!   bounded memory using row-banded resampling
//!
//! Both paths are synchronous and allocation-scoped; a failed pass never
//! leaks intermediates and never takes down the caller's pipeline.

pub mod canonical;
pub mod downsample;
mod resample;

pub use canonical::{decode, decode_or_keep, should_decode};
pub use downsample::{downsample, should_scale_down};
