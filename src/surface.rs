// src/surface.rs

//! `PixelSurface` - a fixed-size, CPU-addressable pixel buffer.
//!
//! Pixels are packed 32-bit ARGB (`0xAARRGGBB`), stored top-down in
//! row-major order with no padding between rows (stride = width * 4 bytes).
//! A surface owns its backing memory exclusively; release happens exactly
//! once, in `Drop`, by construction.

use crate::error::SurfaceError;
use log::trace;

/// A fixed-size buffer of packed ARGB pixels, presentable through a
/// `DisplayDriver`.
///
/// Width and height are immutable after creation and the backing buffer
/// length is always `width * height`.
#[derive(Debug)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Box<[u32]>,
}

impl PixelSurface {
    /// Allocates a zero-filled surface of `width * height` pixels.
    ///
    /// # Errors
    ///
    /// Returns `SurfaceError::Allocation` if either dimension is zero or the
    /// pixel count does not fit in memory arithmetic.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::Allocation {
                width,
                height,
                reason: "zero dimension".to_string(),
            });
        }

        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| SurfaceError::Allocation {
                width,
                height,
                reason: "pixel count overflow".to_string(),
            })?;

        trace!("Allocating {}x{} pixel surface ({} cells)", width, height, count);
        let pixels = vec![0u32; count].into_boxed_slice();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total cell count, `width * height`.
    #[inline]
    pub fn size(&self) -> usize {
        self.pixels.len()
    }

    /// Overwrites every cell with `value`. O(width * height).
    pub fn fill(&mut self, value: u32) {
        self.pixels.fill(value);
    }

    /// Read access to the packed pixel cells, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Write access to the packed pixel cells, row-major.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// The surface contents as raw bytes for presentation.
    ///
    /// Layout matches the presentation contract: 4 bytes per pixel, native
    /// u32 byte order, top-down rows, stride = width * 4.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and any bit pattern is a valid u8. The
        // slice covers exactly the pixel buffer.
        unsafe {
            std::slice::from_raw_parts(
                self.pixels.as_ptr() as *const u8,
                self.pixels.len() * std::mem::size_of::<u32>(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_is_zero_filled_and_sized() {
        let surface = PixelSurface::new(4, 3).expect("4x3 surface");
        assert_eq!(surface.size(), 12);
        assert_eq!(surface.width(), 4);
        assert_eq!(surface.height(), 3);
        assert!(surface.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn zero_dimension_is_an_allocation_error() {
        assert!(PixelSurface::new(0, 10).is_err());
        assert!(PixelSurface::new(10, 0).is_err());
    }

    #[test]
    fn fill_overwrites_every_cell() {
        let mut surface = PixelSurface::new(8, 8).expect("8x8 surface");
        surface.fill(0xFF00FF00);
        assert!(surface.pixels().iter().all(|&p| p == 0xFF00FF00));
    }

    #[test]
    fn byte_view_covers_the_whole_buffer() {
        let surface = PixelSurface::new(5, 2).expect("5x2 surface");
        assert_eq!(surface.as_bytes().len(), 5 * 2 * 4);
    }
}
