// src/producer.rs

//! Frame-content production.
//!
//! A `FrameProducer` writes one frame's worth of content into the back
//! buffer. It runs once per loop iteration, outside the event-driven path,
//! and is intentionally not synchronized with the tick: it may run many
//! times per tick, and a partially written frame may be cleared by the next
//! swap. On the single owning thread this is a sequencing quirk, not a data
//! race.

use crate::surface::PixelSurface;

/// Pluggable per-frame content generator. The placeholder gradient is one
/// implementation; anything that fills a surface can replace it.
pub trait FrameProducer {
    /// Writes content into the back surface.
    fn fill(&mut self, back: &mut PixelSurface);
}

/// The placeholder payload: a horizontal grayscale ramp, opaque alpha.
#[derive(Debug, Default)]
pub struct GradientProducer;

impl GradientProducer {
    pub fn new() -> Self {
        Self
    }
}

impl FrameProducer for GradientProducer {
    fn fill(&mut self, back: &mut PixelSurface) {
        let width = back.width();
        let height = back.height();
        let pixels = back.pixels_mut();

        for y in 0..height {
            let row = (y * width) as usize;
            for x in 0..width {
                let gradient = x * 255 / width;
                let color = 0xFF00_0000 | (gradient << 16) | (gradient << 8) | gradient;
                pixels[row + x as usize] = color;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_ramps_left_to_right() {
        let mut surface = PixelSurface::new(256, 2).expect("256x2 surface");
        GradientProducer::new().fill(&mut surface);

        let pixels = surface.pixels();
        // Leftmost column is black, rightmost is near-white, all opaque.
        assert_eq!(pixels[0], 0xFF000000);
        assert_eq!(pixels[255], 0xFFFEFEFE);
        // 255 * 255 / 256 = 254
        assert!(pixels.iter().all(|&p| p >> 24 == 0xFF));
        // Rows are identical.
        assert_eq!(&pixels[..256], &pixels[256..]);
    }

    #[test]
    fn gradient_is_monotonic_across_a_row() {
        let mut surface = PixelSurface::new(640, 1).expect("640x1 surface");
        GradientProducer::new().fill(&mut surface);

        let row = surface.pixels();
        for pair in row.windows(2) {
            assert!((pair[0] & 0xFF) <= (pair[1] & 0xFF));
        }
    }
}
