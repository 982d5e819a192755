// src/framebuffer.rs

//! `FrameBufferPair` - the front/back surface pair and its swap protocol.
//!
//! The pair is the single owner of both surfaces, so destroying one while
//! leaking the other is unrepresentable: `Drop` releases both. `swap` is the
//! only mutation of the role assignment, and the front surface is read-only
//! to producers by API construction.

use crate::error::SurfaceError;
use crate::surface::PixelSurface;
use log::trace;

/// Owns two same-sized pixel surfaces labeled front (being presented) and
/// back (being written).
///
/// Invariant: front and back always refer to two distinct surfaces; a swap
/// exchanges the labels in O(1) without copying pixel data.
#[derive(Debug)]
pub struct FrameBufferPair {
    front: PixelSurface,
    back: PixelSurface,
}

impl FrameBufferPair {
    /// Allocates both surfaces at `width * height`.
    ///
    /// If the second allocation fails, the first surface is dropped before
    /// this returns, so a partial pair never leaks.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let front = PixelSurface::new(width, height)?;
        // `front` drops on this error path; nothing leaks.
        let back = PixelSurface::new(width, height)?;
        trace!("Frame buffer pair created at {}x{}", width, height);
        Ok(Self { front, back })
    }

    /// Exchanges the front/back role labels. O(1), no pixel copy.
    ///
    /// Must only be called from the thread that owns the event loop; the
    /// single-thread model is what makes this safe without locking.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Overwrites every cell of the back surface with `value`.
    /// The front surface is untouched.
    pub fn clear_back(&mut self, value: u32) {
        self.back.fill(value);
    }

    /// Writes one pixel into the back surface.
    ///
    /// Out-of-range coordinates are a programmer error, not a runtime
    /// condition.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the surface.
    pub fn write_back(&mut self, x: u32, y: u32, color: u32) {
        let width = self.back.width();
        let height = self.back.height();
        assert!(
            x < width && y < height,
            "pixel write out of range: ({}, {}) on {}x{} surface",
            x,
            y,
            width,
            height
        );
        self.back.pixels_mut()[(y * width + x) as usize] = color;
    }

    /// The surface currently being presented. Read-only to producers.
    #[inline]
    pub fn front(&self) -> &PixelSurface {
        &self.front
    }

    /// The surface currently being written by frame-content production.
    #[inline]
    pub fn back_mut(&mut self) -> &mut PixelSurface {
        &mut self.back
    }

    /// Cell count shared by both surfaces.
    #[inline]
    pub fn size(&self) -> usize {
        self.front.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surfaces_are_distinct_and_swap_is_an_involution() {
        let mut pair = FrameBufferPair::new(4, 4).expect("4x4 pair");
        pair.write_back(1, 1, 0xAB);

        // Front and back must never alias: the write is invisible on front.
        assert_eq!(pair.front().pixels()[5], 0);

        pair.swap();
        assert_eq!(pair.front().pixels()[5], 0xAB);

        pair.swap();
        assert_eq!(pair.front().pixels()[5], 0);
        assert_eq!(pair.back_mut().pixels()[5], 0xAB);
    }

    #[test]
    fn clear_back_leaves_front_untouched() {
        let mut pair = FrameBufferPair::new(3, 3).expect("3x3 pair");
        pair.clear_back(0x11);
        pair.swap();
        pair.clear_back(0x22);

        assert!(pair.front().pixels().iter().all(|&p| p == 0x11));
        pair.swap();
        assert!(pair.front().pixels().iter().all(|&p| p == 0x22));
    }

    #[test]
    fn write_back_sets_exactly_one_cell() {
        let mut pair = FrameBufferPair::new(4, 2).expect("4x2 pair");
        pair.write_back(2, 1, 0xFFFFFFFF);
        pair.swap();

        let pixels = pair.front().pixels();
        for (i, &p) in pixels.iter().enumerate() {
            if i == 1 * 4 + 2 {
                assert_eq!(p, 0xFFFFFFFF);
            } else {
                assert_eq!(p, 0, "neighbor cell {} corrupted", i);
            }
        }
    }

    #[test]
    #[should_panic(expected = "pixel write out of range")]
    fn write_back_out_of_range_panics() {
        let mut pair = FrameBufferPair::new(4, 4).expect("4x4 pair");
        pair.write_back(4, 0, 0x1);
    }

    #[test]
    fn failed_allocation_does_not_leak_a_partial_pair() {
        // On any error path `new` drops whatever was already built, so a
        // second-surface failure releases the first surface before
        // returning. Zero-dimension failure exercises the error path
        // deterministically.
        assert!(FrameBufferPair::new(0, 64).is_err());
    }
}
