// src/renderer.rs

//! The `Renderer` - frame lifecycle orchestration.
//!
//! Owns the front/back buffer pair and drives one swap+clear+repaint cycle
//! per tick. The tick ordering is the core contract: swap first, then clear
//! the new back buffer, then request a repaint. The presented surface is
//! therefore always a fully written frame from the previous cycle, never a
//! partially written one.
//!
//! Lifecycle: `create` moves an absent renderer to `Ready`; the first tick
//! moves it to `Running`; a close event marks it `Closing`; `destroy`
//! disarms the tick, releases the buffers, and leaves it `Destroyed`.

use crate::display::driver::DisplayDriver;
use crate::error::RendererError;
use crate::framebuffer::FrameBufferPair;
use crate::scheduler::TickScheduler;
use crate::surface::PixelSurface;
use anyhow::Result;
use log::{debug, info, trace, warn};
use std::time::Duration;

/// Renderer lifecycle states. The Uninitialized state is the absence of a
/// `Renderer` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererState {
    /// Buffers allocated, tick armed, no tick handled yet.
    Ready,
    /// At least one tick handled.
    Running,
    /// Close received; awaiting `destroy`.
    Closing,
    /// Torn down. All handlers are no-ops.
    Destroyed,
}

/// Orchestrates the buffer pair, the periodic tick, and present requests.
pub struct Renderer {
    buffers: Option<FrameBufferPair>,
    fps: f32,
    state: RendererState,
}

impl Renderer {
    /// Tick interval for a frame rate: `1000 / fps` truncated to whole
    /// milliseconds, with a 1 ms floor to match host timer resolution.
    pub fn tick_interval(fps: f32) -> Duration {
        let millis = (1000.0 / fps) as u64;
        Duration::from_millis(millis.max(1))
    }

    /// Allocates both surfaces at the display's client size and arms the
    /// periodic tick.
    ///
    /// On failure no tick is armed and nothing is leaked.
    pub fn create(
        width: u32,
        height: u32,
        fps: f32,
        scheduler: &mut dyn TickScheduler,
    ) -> Result<Self, RendererError> {
        if !(fps > 0.0) {
            return Err(RendererError::InvalidFrameRate(fps));
        }

        let buffers = FrameBufferPair::new(width, height).map_err(RendererError::Init)?;

        let interval = Self::tick_interval(fps);
        scheduler.arm(interval);
        info!(
            "Renderer ready: {}x{} double-buffered ({} cells per surface), tick every {:?} ({} fps)",
            width,
            height,
            buffers.size(),
            interval,
            fps
        );

        Ok(Self {
            buffers: Some(buffers),
            fps,
            state: RendererState::Ready,
        })
    }

    #[inline]
    pub fn state(&self) -> RendererState {
        self.state
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Producer access to the back buffer. `None` once destroyed.
    pub fn back_mut(&mut self) -> Option<&mut PixelSurface> {
        self.buffers.as_mut().map(|b| b.back_mut())
    }

    /// Handles one tick: swap, clear the new back buffer, request a repaint.
    ///
    /// The repaint request is asynchronous; the actual paint arrives later
    /// as a `RedrawRequested` event. Ticks after close are dropped.
    pub fn on_tick(&mut self, driver: &mut dyn DisplayDriver) -> Result<()> {
        match self.state {
            RendererState::Ready | RendererState::Running => {}
            RendererState::Closing | RendererState::Destroyed => {
                warn!("Tick after close dropped (state {:?})", self.state);
                return Ok(());
            }
        }

        let buffers = match self.buffers.as_mut() {
            Some(buffers) => buffers,
            None => return Ok(()),
        };

        // The just-filled back buffer becomes the new front; the stale front
        // becomes the new back and is cleared for the next frame.
        buffers.swap();
        buffers.clear_back(0);
        driver.request_redraw()?;

        trace!("Tick handled: swapped, cleared, repaint requested");
        self.state = RendererState::Running;
        Ok(())
    }

    /// Handles a paint event: blits the current front surface verbatim.
    ///
    /// May arrive independently of ticks (expose/restore). Tolerates an
    /// unbound presentation target and a destroyed renderer.
    pub fn on_paint(&mut self, driver: &mut dyn DisplayDriver) -> Result<()> {
        let buffers = match self.buffers.as_ref() {
            Some(buffers) => buffers,
            None => {
                trace!("Paint with no buffers; ignored");
                return Ok(());
            }
        };

        driver.present(buffers.front())?;
        trace!("Paint handled: front buffer presented");
        Ok(())
    }

    /// Marks the renderer for teardown. The event loop follows up with
    /// `destroy`.
    pub fn on_close(&mut self) {
        match self.state {
            RendererState::Ready | RendererState::Running => {
                info!("Close requested; renderer closing");
                self.state = RendererState::Closing;
            }
            RendererState::Closing | RendererState::Destroyed => {}
        }
    }

    #[inline]
    pub fn is_closing(&self) -> bool {
        self.state == RendererState::Closing
    }

    /// Tears down: disarms the tick first (so no tick can fire against freed
    /// buffers), then releases both surfaces. Idempotent.
    pub fn destroy(&mut self, scheduler: &mut dyn TickScheduler) {
        if self.state == RendererState::Destroyed {
            return;
        }

        scheduler.disarm();
        // Dropping the pair releases both surfaces together.
        self.buffers = None;
        self.state = RendererState::Destroyed;
        debug!("Renderer destroyed: tick disarmed, buffers released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::driver::{DisplayDriver, DriverConfig};
    use crate::display::drivers::HeadlessDisplayDriver;
    use crate::display::events::DisplayEvent;
    use crate::scheduler::ManualScheduler;
    use test_log::test;

    fn test_driver(width: u32, height: u32) -> HeadlessDisplayDriver {
        HeadlessDisplayDriver::new(&DriverConfig {
            title: "test".to_string(),
            class: "test".to_string(),
            width,
            height,
        })
        .expect("headless driver")
    }

    #[test]
    fn create_arms_the_tick_at_the_frame_interval() {
        let mut scheduler = ManualScheduler::new();
        let renderer = Renderer::create(640, 360, 60.0, &mut scheduler).expect("renderer");

        assert_eq!(renderer.state(), RendererState::Ready);
        assert_eq!(renderer.fps(), 60.0);
        // 1000 / 60 rounds down to 16 ms.
        assert_eq!(scheduler.armed_interval(), Some(Duration::from_millis(16)));
    }

    #[test]
    fn failed_create_arms_no_tick() {
        let mut scheduler = ManualScheduler::new();
        assert!(Renderer::create(0, 360, 60.0, &mut scheduler).is_err());
        assert!(!scheduler.is_armed());

        assert!(Renderer::create(640, 360, 0.0, &mut scheduler).is_err());
        assert!(!scheduler.is_armed());
    }

    #[test]
    fn tick_swaps_clears_and_requests_exactly_one_redraw() {
        let mut scheduler = ManualScheduler::new();
        let mut driver = test_driver(4, 4);
        let mut renderer = Renderer::create(4, 4, 60.0, &mut scheduler).expect("renderer");

        // Produce a recognizable frame into the back buffer.
        renderer.back_mut().expect("back buffer").fill(0xFFAA5500);

        renderer.on_tick(&mut driver).expect("tick");
        assert_eq!(renderer.state(), RendererState::Running);
        assert_eq!(driver.redraw_requests(), 1);

        // The produced frame is now the front; the new back is cleared.
        renderer.on_paint(&mut driver).expect("paint");
        assert!(driver.presented()[0].iter().all(|&p| p == 0xFFAA5500));
        assert!(renderer
            .back_mut()
            .expect("back buffer")
            .pixels()
            .iter()
            .all(|&p| p == 0));
    }

    #[test]
    fn presented_frame_is_always_the_previous_cycles_content() {
        let mut scheduler = ManualScheduler::new();
        let mut driver = test_driver(2, 2);
        let mut renderer = Renderer::create(2, 2, 60.0, &mut scheduler).expect("renderer");

        renderer.back_mut().expect("back").fill(0x1);
        renderer.on_tick(&mut driver).expect("tick 1");
        // Content written after the tick belongs to the *next* frame.
        renderer.back_mut().expect("back").fill(0x2);

        renderer.on_paint(&mut driver).expect("paint 1");
        assert!(driver.presented()[0].iter().all(|&p| p == 0x1));

        renderer.on_tick(&mut driver).expect("tick 2");
        renderer.on_paint(&mut driver).expect("paint 2");
        assert!(driver.presented()[1].iter().all(|&p| p == 0x2));
    }

    #[test]
    fn close_before_any_tick_destroys_cleanly() {
        let mut scheduler = ManualScheduler::new();
        let mut driver = test_driver(4, 4);
        let mut renderer = Renderer::create(4, 4, 60.0, &mut scheduler).expect("renderer");

        renderer.on_close();
        assert!(renderer.is_closing());
        renderer.destroy(&mut scheduler);
        assert_eq!(renderer.state(), RendererState::Destroyed);
        assert!(!scheduler.is_armed());

        // A tick landing after destroy must not fire a dangling callback.
        scheduler.fire();
        assert!(!scheduler.poll_tick());
        renderer.on_tick(&mut driver).expect("dropped tick");
        assert_eq!(driver.redraw_requests(), 0);
    }

    #[test]
    fn destroy_is_idempotent() {
        let mut scheduler = ManualScheduler::new();
        let mut renderer = Renderer::create(4, 4, 60.0, &mut scheduler).expect("renderer");
        renderer.destroy(&mut scheduler);
        renderer.destroy(&mut scheduler);
        assert_eq!(renderer.state(), RendererState::Destroyed);
    }

    #[test]
    fn paint_after_destroy_is_a_no_op() {
        let mut scheduler = ManualScheduler::new();
        let mut driver = test_driver(4, 4);
        let mut renderer = Renderer::create(4, 4, 60.0, &mut scheduler).expect("renderer");

        renderer.destroy(&mut scheduler);
        renderer.on_paint(&mut driver).expect("paint");
        assert!(driver.presented().is_empty());
    }

    #[test]
    fn headless_redraw_request_comes_back_as_a_paint_event() {
        let mut scheduler = ManualScheduler::new();
        let mut driver = test_driver(4, 4);
        let mut renderer = Renderer::create(4, 4, 60.0, &mut scheduler).expect("renderer");

        renderer.on_tick(&mut driver).expect("tick");
        let events = driver.poll_events().expect("events");
        assert_eq!(events, vec![DisplayEvent::RedrawRequested]);
    }

    #[test]
    fn tick_interval_scales_with_fps() {
        assert_eq!(Renderer::tick_interval(60.0), Duration::from_millis(16));
        assert_eq!(Renderer::tick_interval(30.0), Duration::from_millis(33));
        assert_eq!(Renderer::tick_interval(1.0), Duration::from_millis(1000));
        // High frame rates clamp at the 1 ms timer floor.
        assert_eq!(Renderer::tick_interval(2000.0), Duration::from_millis(1));
    }
}
