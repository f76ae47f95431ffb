//! Pixel buffer types for decoded bitmap data in CPU memory.
//!
//! Every buffer is 8 bits per component and 4 bytes per pixel; layouts
//! without alpha keep a padding byte so rows stay word-addressable.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{ImagePrepError, Result};

/// Where the alpha byte sits in a 4-byte pixel, if anywhere.
///
/// The `None*` variants carry no usable transparency; `NoneSkipFirst` and
/// `NoneSkipLast` reserve a padding byte in the alpha position, and plain
/// `None` is treated as trailing padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AlphaLayout {
    /// No alpha channel.
    None,
    /// No alpha; the first byte position is padding.
    NoneSkipFirst,
    /// No alpha; the last byte position is padding.
    NoneSkipLast,
    /// Straight alpha in the last position.
    #[default]
    Last,
    /// Straight alpha in the first position.
    First,
    /// Premultiplied alpha in the last position.
    PremultipliedLast,
    /// Premultiplied alpha in the first position.
    PremultipliedFirst,
}

impl AlphaLayout {
    /// Whether pixels in this layout carry usable transparency.
    #[inline]
    pub fn has_alpha(self) -> bool {
        !matches!(
            self,
            AlphaLayout::None | AlphaLayout::NoneSkipFirst | AlphaLayout::NoneSkipLast
        )
    }

    /// Whether color components are premultiplied by alpha.
    #[inline]
    pub fn is_premultiplied(self) -> bool {
        matches!(
            self,
            AlphaLayout::PremultipliedFirst | AlphaLayout::PremultipliedLast
        )
    }

    /// Whether the alpha (or padding) byte leads the pixel in component order.
    #[inline]
    fn alpha_first(self) -> bool {
        matches!(
            self,
            AlphaLayout::First | AlphaLayout::PremultipliedFirst | AlphaLayout::NoneSkipFirst
        )
    }
}

/// Byte order of the 4-byte pixel word in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Components stored in the order the layout names them.
    #[default]
    Default,
    /// The pixel is a 32-bit little-endian word; byte order is reversed.
    Little32,
}

/// Color space identifier. Carried with buffers, never converted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorSpace {
    /// 8-bit device color space; the canonical target.
    #[default]
    Srgb,
    DisplayP3,
    LinearRgb,
}

/// What kind of image a buffer was decoded from. Drives decode policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageKind {
    #[default]
    Still,
    Animated,
    Vector,
}

/// Byte offsets of each component within a 4-byte pixel.
///
/// `a` is the alpha byte, or the padding byte for the skip layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelOffsets {
    pub r: usize,
    pub g: usize,
    pub b: usize,
    pub a: usize,
}

/// Pixel format: alpha layout plus byte order. Bit depth is fixed at
/// 8 bits per component, 4 bytes per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelFormat {
    pub alpha: AlphaLayout,
    pub byte_order: ByteOrder,
}

impl PixelFormat {
    /// Canonical layout for buffers with transparency: premultiplied alpha
    /// first, 32-bit host word order (BGRA bytes on little-endian).
    pub const CANONICAL_ALPHA: Self = Self {
        alpha: AlphaLayout::PremultipliedFirst,
        byte_order: ByteOrder::Little32,
    };

    /// Canonical layout for opaque buffers. The rendering primitive has no
    /// true no-alpha 32-bit format, so the alpha position becomes padding.
    pub const CANONICAL_OPAQUE: Self = Self {
        alpha: AlphaLayout::NoneSkipFirst,
        byte_order: ByteOrder::Little32,
    };

    /// Plain RGBA byte order, the common decoder output.
    pub const RGBA: Self = Self {
        alpha: AlphaLayout::Last,
        byte_order: ByteOrder::Default,
    };

    #[inline]
    pub fn has_alpha(self) -> bool {
        self.alpha.has_alpha()
    }

    #[inline]
    pub fn is_premultiplied(self) -> bool {
        self.alpha.is_premultiplied()
    }

    /// Bytes per pixel. Constant for every supported layout.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        4
    }

    /// Whether this is one of the two canonical display-ready layouts.
    #[inline]
    pub fn is_canonical(self) -> bool {
        self == Self::CANONICAL_ALPHA || self == Self::CANONICAL_OPAQUE
    }

    /// Byte offsets of R, G, B, and the alpha/padding slot.
    pub fn channel_offsets(self) -> ChannelOffsets {
        let component_order = if self.alpha.alpha_first() {
            // A R G B in component order
            ChannelOffsets { a: 0, r: 1, g: 2, b: 3 }
        } else {
            // R G B A in component order
            ChannelOffsets { r: 0, g: 1, b: 2, a: 3 }
        };
        match self.byte_order {
            ByteOrder::Default => component_order,
            ByteOrder::Little32 => ChannelOffsets {
                r: 3 - component_order.r,
                g: 3 - component_order.g,
                b: 3 - component_order.b,
                a: 3 - component_order.a,
            },
        }
    }
}

/// A decoded bitmap in CPU memory.
///
/// Exclusively owned: every function that produces a `PixelBuffer` returns
/// ownership to the caller. Rows may be padded; `stride` is the byte
/// distance between row starts.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    color_space: ColorSpace,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer.
    ///
    /// Stride is aligned to 64 bytes for SIMD-friendly row access. Fails on
    /// zero dimensions or when the byte size overflows addressable memory.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        color_space: ColorSpace,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ImagePrepError::InvalidDimensions { width, height });
        }
        let min_stride = (width as usize)
            .checked_mul(format.bytes_per_pixel())
            .ok_or_else(|| ImagePrepError::AllocationFailed(format!("{width}x{height}")))?;
        let stride = min_stride
            .checked_add(63)
            .ok_or_else(|| ImagePrepError::AllocationFailed(format!("{width}x{height}")))?
            & !63;
        let size = stride
            .checked_mul(height as usize)
            .ok_or_else(|| ImagePrepError::AllocationFailed(format!("{width}x{height}")))?;
        Ok(Self {
            width,
            height,
            stride,
            format,
            color_space,
            data: vec![0u8; size],
        })
    }

    /// Wrap packed pixel bytes (stride = width * 4) produced by a decoder.
    pub fn from_pixels(
        width: u32,
        height: u32,
        format: PixelFormat,
        color_space: ColorSpace,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ImagePrepError::InvalidDimensions { width, height });
        }
        let stride = width as usize * format.bytes_per_pixel();
        let expected = stride * height as usize;
        if pixels.len() != expected {
            return Err(ImagePrepError::SizeMismatch {
                expected,
                got: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            format,
            color_space,
            data: pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes between row starts; at least `width * 4`.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Pixel count as a widening multiply; never overflows.
    #[inline]
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Nominal byte size (`width * height * 4`), ignoring row padding.
    #[inline]
    pub fn byte_size(&self) -> u64 {
        self.pixel_count() * self.format.bytes_per_pixel() as u64
    }

    /// The packed pixel bytes of one row, excluding stride padding.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize * self.format.bytes_per_pixel()]
    }

    /// Mutable packed pixel bytes of one row.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride;
        let len = self.width as usize * self.format.bytes_per_pixel();
        &mut self.data[start..start + len]
    }

    /// The 4 bytes of one pixel.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = y as usize * self.stride + x as usize * self.format.bytes_per_pixel();
        &self.data[start..start + self.format.bytes_per_pixel()]
    }

    /// Mutable bytes of one pixel.
    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let bpp = self.format.bytes_per_pixel();
        let start = y as usize * self.stride + x as usize * bpp;
        &mut self.data[start..start + bpp]
    }

    /// Whether this buffer is already in display-ready form.
    #[inline]
    pub fn is_canonical(&self) -> bool {
        self.format.is_canonical() && self.color_space == ColorSpace::Srgb
    }

    /// Copy a horizontal band of rows into a new buffer of the same format.
    pub fn crop_rows(&self, start: u32, height: u32) -> Result<Self> {
        let end = start
            .checked_add(height)
            .filter(|&end| end <= self.height)
            .ok_or(ImagePrepError::RowRange {
                start,
                end: start.saturating_add(height),
                height: self.height,
            })?;
        let mut band = Self::new(self.width, height, self.format, self.color_space)?;
        for (band_y, src_y) in (start..end).enumerate() {
            band.row_mut(band_y as u32).copy_from_slice(self.row(src_y));
        }
        Ok(band)
    }

    /// Create a test pattern buffer (color bars) in plain RGBA.
    pub fn test_pattern(width: u32, height: u32) -> Self {
        let mut buf = Self::new(width, height, PixelFormat::RGBA, ColorSpace::Srgb)
            .expect("test pattern dimensions");
        let colors: [[u8; 4]; 8] = [
            [255, 255, 255, 255], // White
            [255, 255, 0, 255],   // Yellow
            [0, 255, 255, 255],   // Cyan
            [0, 255, 0, 255],     // Green
            [255, 0, 255, 255],   // Magenta
            [255, 0, 0, 255],     // Red
            [0, 0, 255, 255],     // Blue
            [0, 0, 0, 255],       // Black
        ];
        for y in 0..height {
            let row = buf.row_mut(y);
            for x in 0..width {
                let bar = (x * 8 / width) as usize;
                let i = x as usize * 4;
                row[i..i + 4].copy_from_slice(&colors[bar]);
            }
        }
        buf
    }
}

/// Alpha classifier: whether a buffer carries usable transparency.
///
/// Absent input reports `false`; otherwise the answer depends only on the
/// buffer's alpha layout, so premultiplied variants report `true`.
#[inline]
pub fn has_alpha(buffer: Option<&PixelBuffer>) -> bool {
    buffer.is_some_and(|buf| buf.format.has_alpha())
}

/// Arc-wrapped pixel buffer for shared ownership across animation frames.
pub type SharedPixelBuffer = Arc<PixelBuffer>;
