//! Geometric primitives for 2D transformations.

use glam::{Affine2, Vec2};

/// 2D affine transformation over `glam::Affine2`.
///
/// Composition reads left to right: `a.then(b)` applies `a` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    inner: Affine2,
}

impl Transform2D {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        inner: Affine2::IDENTITY,
    };

    /// Create a translation transform.
    #[inline]
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            inner: Affine2::from_translation(Vec2::new(x, y)),
        }
    }

    /// Create a scale transform.
    #[inline]
    pub fn scale(x: f32, y: f32) -> Self {
        Self {
            inner: Affine2::from_scale(Vec2::new(x, y)),
        }
    }

    /// Create a rotation transform (radians, counter-clockwise).
    #[inline]
    pub fn rotate(angle: f32) -> Self {
        Self {
            inner: Affine2::from_angle(angle),
        }
    }

    /// Apply `self` first, then `other`.
    #[inline]
    pub fn then(self, other: Self) -> Self {
        Self {
            inner: other.inner * self.inner,
        }
    }

    /// Transform a point.
    #[inline]
    pub fn transform_point(self, point: Vec2) -> Vec2 {
        self.inner.transform_point2(point)
    }

    /// Get the inverse transform.
    #[inline]
    pub fn inverse(self) -> Self {
        Self {
            inner: self.inner.inverse(),
        }
    }

    /// The underlying affine matrix.
    #[inline]
    pub fn to_affine(self) -> Affine2 {
        self.inner
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}
