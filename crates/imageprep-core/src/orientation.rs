//! Image orientation tags and the transforms that make them upright.
//!
//! An orientation describes how a decoded buffer must be rotated and/or
//! mirrored to display correctly. `Left`/`Right` families swap width and
//! height relative to the stored buffer.

use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

use crate::geometry::Transform2D;

/// The 8 possible image orientations.
///
/// Exactly one applies per image. `Up` is the identity; mirrored variants
/// apply a horizontal flip after the rotation of their base variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Up,
    Down,
    Left,
    Right,
    UpMirrored,
    DownMirrored,
    LeftMirrored,
    RightMirrored,
}

impl Orientation {
    /// All 8 orientations, EXIF tag order.
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::UpMirrored,
        Self::Down,
        Self::DownMirrored,
        Self::LeftMirrored,
        Self::Left,
        Self::RightMirrored,
        Self::Right,
    ];

    /// Create from an EXIF orientation tag (1-8). `None` for other values.
    pub fn from_exif(value: u8) -> Option<Self> {
        if (1..=8).contains(&value) {
            Some(Self::ALL[(value - 1) as usize])
        } else {
            None
        }
    }

    /// Convert to the EXIF orientation tag (1-8).
    pub fn to_exif(self) -> u8 {
        Self::ALL
            .iter()
            .position(|&o| o == self)
            .map(|i| (i + 1) as u8)
            .unwrap_or(1)
    }

    /// Whether this is the identity orientation.
    #[inline]
    pub fn is_identity(self) -> bool {
        self == Self::Up
    }

    /// Whether a horizontal mirror follows the rotation.
    #[inline]
    pub fn mirrored(self) -> bool {
        matches!(
            self,
            Self::UpMirrored | Self::DownMirrored | Self::LeftMirrored | Self::RightMirrored
        )
    }

    /// Whether upright display swaps width and height.
    #[inline]
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            Self::Left | Self::Right | Self::LeftMirrored | Self::RightMirrored
        )
    }

    /// Upright (display) dimensions for a stored `w` x `h` buffer.
    #[inline]
    pub fn oriented_size(self, w: u32, h: u32) -> (u32, u32) {
        if self.swaps_axes() {
            (h, w)
        } else {
            (w, h)
        }
    }

    /// The orientation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            other => other,
        }
    }
}

/// Build the affine transform that renders a stored buffer upright onto a
/// canvas of the given size.
///
/// `canvas_w`/`canvas_h` must already reflect the axis swap implied by the
/// `Left`/`Right` families (see [`Orientation::oriented_size`]). The result
/// is applied while rendering into a fresh destination, never in place.
pub fn transform_for(orientation: Orientation, canvas_w: u32, canvas_h: u32) -> Transform2D {
    let (w, h) = (canvas_w as f32, canvas_h as f32);
    let rotated = match orientation {
        Orientation::Up | Orientation::UpMirrored => Transform2D::IDENTITY,
        Orientation::Down | Orientation::DownMirrored => {
            Transform2D::rotate(PI).then(Transform2D::translate(w, h))
        }
        Orientation::Left | Orientation::LeftMirrored => {
            Transform2D::rotate(FRAC_PI_2).then(Transform2D::translate(w, 0.0))
        }
        Orientation::Right | Orientation::RightMirrored => {
            Transform2D::rotate(-FRAC_PI_2).then(Transform2D::translate(0.0, h))
        }
    };
    if orientation.mirrored() {
        // Horizontal flip across the post-rotation canvas width.
        rotated.then(Transform2D::scale(-1.0, 1.0).then(Transform2D::translate(w, 0.0)))
    } else {
        rotated
    }
}

/// Exact integer pixel map from stored coordinates to upright coordinates.
///
/// `w`/`h` are the stored buffer dimensions. Agrees with [`transform_for`]
/// applied to pixel centers for every orientation.
#[inline]
pub fn map_pixel(orientation: Orientation, x: u32, y: u32, w: u32, h: u32) -> (u32, u32) {
    match orientation {
        Orientation::Up => (x, y),
        Orientation::UpMirrored => (w - 1 - x, y),
        Orientation::Down => (w - 1 - x, h - 1 - y),
        Orientation::DownMirrored => (x, h - 1 - y),
        Orientation::Left => (h - 1 - y, x),
        Orientation::LeftMirrored => (y, x),
        Orientation::Right => (y, w - 1 - x),
        Orientation::RightMirrored => (h - 1 - y, w - 1 - x),
    }
}
