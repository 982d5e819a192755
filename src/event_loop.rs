// src/event_loop.rs

//! The main event loop.
//!
//! Owns the display driver, the tick scheduler, and the renderer, and passes
//! explicit `&mut` context into every handler - there is no global lookup
//! from window handle to application state.
//!
//! Each cycle: run the frame producer into the back buffer, dispatch pending
//! display events, then poll the scheduler and handle a due tick. The
//! producer runs every cycle regardless of the tick, so content production
//! is intentionally decoupled from the presentation cadence. That sharing of
//! the back buffer is safe only because everything here runs on one thread;
//! moving production off-thread would require treating the back buffer as a
//! single-writer resource behind a lock or a handoff queue.

use crate::display::driver::DisplayDriver;
use crate::display::events::DisplayEvent;
use crate::producer::FrameProducer;
use crate::renderer::Renderer;
use crate::scheduler::TickScheduler;
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::time::Duration;

/// Outcome of one loop cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Running,
    Shutdown,
}

/// Single-threaded, cooperative event loop.
pub struct EventLoop<D: DisplayDriver, S: TickScheduler> {
    driver: D,
    scheduler: S,
    renderer: Option<Renderer>,
    idle_sleep: Duration,
}

impl<D: DisplayDriver, S: TickScheduler> EventLoop<D, S> {
    pub fn new(driver: D, scheduler: S, idle_sleep: Duration) -> Self {
        Self {
            driver,
            scheduler,
            renderer: None,
            idle_sleep,
        }
    }

    /// Creates the renderer at the driver's client size and pumps cycles
    /// until close completes teardown.
    pub fn run(&mut self, fps: f32, producer: &mut dyn FrameProducer) -> Result<()> {
        let (width, height) = self.driver.client_size();
        let renderer = Renderer::create(width, height, fps, &mut self.scheduler)
            .context("Failed to create renderer")?;
        self.renderer = Some(renderer);

        info!("Entering event loop");
        loop {
            match self.cycle(producer)? {
                LoopStatus::Running => {
                    if !self.idle_sleep.is_zero() {
                        std::thread::sleep(self.idle_sleep);
                    }
                }
                LoopStatus::Shutdown => {
                    info!("Event loop shut down cleanly");
                    return Ok(());
                }
            }
        }
    }

    /// One loop iteration: produce, dispatch events, tick, teardown check.
    pub fn cycle(&mut self, producer: &mut dyn FrameProducer) -> Result<LoopStatus> {
        // Frame-content production: writes the back buffer outside the
        // event-driven path, as often as the loop iterates.
        if let Some(renderer) = self.renderer.as_mut() {
            if !renderer.is_closing() {
                if let Some(back) = renderer.back_mut() {
                    producer.fill(back);
                }
            }
        }

        let events = self
            .driver
            .poll_events()
            .context("Failed to poll display events")?;
        for event in events {
            self.handle_event(event)?;
        }

        if self.scheduler.poll_tick() {
            if let Some(renderer) = self.renderer.as_mut() {
                renderer
                    .on_tick(&mut self.driver)
                    .context("Tick handler failed")?;
            }
        }

        if self
            .renderer
            .as_ref()
            .is_some_and(|renderer| renderer.is_closing())
        {
            self.teardown();
            return Ok(LoopStatus::Shutdown);
        }

        Ok(LoopStatus::Running)
    }

    fn handle_event(&mut self, event: DisplayEvent) -> Result<()> {
        match event {
            DisplayEvent::RedrawRequested => {
                // Paint before the renderer exists is a no-op by contract.
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer
                        .on_paint(&mut self.driver)
                        .context("Paint handler failed")?;
                } else {
                    debug!("Paint event before renderer creation; ignored");
                }
            }
            DisplayEvent::CloseRequested => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.on_close();
                } else {
                    debug!("Close event before renderer creation; shutting down");
                    self.teardown();
                }
            }
        }
        Ok(())
    }

    /// Ordered teardown: tick disarm, then buffer release, then window
    /// release. Release failures are reported and teardown continues.
    fn teardown(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.destroy(&mut self.scheduler);
        }
        if let Err(e) = self.driver.cleanup() {
            error!("Display cleanup failed (continuing): {}", e);
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn renderer(&self) -> Option<&Renderer> {
        self.renderer.as_ref()
    }
}
