// src/display/drivers/headless.rs

//! Headless display driver.
//!
//! Accepts presents without a display server and plays back scripted
//! events. The renderer tests drive their paint/close scenarios through
//! this driver; it also serves as a smoke-test target where no X server is
//! available.

use crate::display::driver::{DisplayDriver, DriverConfig};
use crate::display::events::DisplayEvent;
use crate::error::DisplayError;
use crate::surface::PixelSurface;
use anyhow::Result;
use log::{info, trace};
use std::collections::VecDeque;

pub struct HeadlessDisplayDriver {
    width: u32,
    height: u32,
    /// Events handed out by the next `poll_events` call.
    queued_events: VecDeque<DisplayEvent>,
    /// Pixel copies of every presented frame, oldest first.
    presented: Vec<Vec<u32>>,
    redraw_requests: u32,
    cleaned_up: bool,
}

impl HeadlessDisplayDriver {
    /// Queues an event for the next `poll_events` call.
    pub fn push_event(&mut self, event: DisplayEvent) {
        self.queued_events.push_back(event);
    }

    /// Frames presented so far, oldest first.
    pub fn presented(&self) -> &[Vec<u32>] {
        &self.presented
    }

    /// Number of redraws requested so far.
    pub fn redraw_requests(&self) -> u32 {
        self.redraw_requests
    }

    pub fn is_cleaned_up(&self) -> bool {
        self.cleaned_up
    }
}

impl DisplayDriver for HeadlessDisplayDriver {
    fn new(config: &DriverConfig) -> Result<Self, DisplayError> {
        info!(
            "HeadlessDisplayDriver: {}x{} '{}'",
            config.width, config.height, config.title
        );
        Ok(Self {
            width: config.width,
            height: config.height,
            queued_events: VecDeque::new(),
            presented: Vec::new(),
            redraw_requests: 0,
            cleaned_up: false,
        })
    }

    fn poll_events(&mut self) -> Result<Vec<DisplayEvent>> {
        Ok(self.queued_events.drain(..).collect())
    }

    fn request_redraw(&mut self) -> Result<()> {
        self.redraw_requests += 1;
        // Mirror the host behavior: a redraw request comes back as a paint.
        self.queued_events.push_back(DisplayEvent::RedrawRequested);
        Ok(())
    }

    fn present(&mut self, frame: &PixelSurface) -> Result<(), DisplayError> {
        trace!(
            "HeadlessDisplayDriver: present {}x{}",
            frame.width(),
            frame.height()
        );
        self.presented.push(frame.pixels().to_vec());
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        info!("HeadlessDisplayDriver: set_title '{}'", title);
    }

    fn client_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn cleanup(&mut self) -> Result<(), DisplayError> {
        self.cleaned_up = true;
        Ok(())
    }
}
