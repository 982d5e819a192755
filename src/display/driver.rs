// src/display/driver.rs

//! `DisplayDriver` trait - the minimal platform contract for presentation.
//!
//! A driver owns one native window and exposes exactly what the core needs:
//! event delivery, an asynchronous redraw request, a frame blit, title, and
//! idempotent cleanup. The core must not assume more than this.
//!
//! ## Lifecycle
//! 1. `new(&DriverConfig)` - create and map the window.
//! 2. Event/present loop - `poll_events`, `request_redraw`, `present`.
//! 3. `cleanup()` - release host resources; also invoked from `Drop`.

use crate::display::events::DisplayEvent;
use crate::error::DisplayError;
use crate::surface::PixelSurface;
use anyhow::Result;

/// Window parameters handed to a driver at creation.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Window title.
    pub title: String,
    /// Window class / application identity.
    pub class: String,
    /// Client area width in pixels.
    pub width: u32,
    /// Client area height in pixels.
    pub height: u32,
}

/// Platform-specific display driver.
///
/// All methods are called from the single thread that owns the event loop.
pub trait DisplayDriver {
    /// Creates the native window and makes it visible.
    fn new(config: &DriverConfig) -> Result<Self, DisplayError>
    where
        Self: Sized;

    /// Translates pending native events into `DisplayEvent`s. Never blocks.
    fn poll_events(&mut self) -> Result<Vec<DisplayEvent>>;

    /// Asks the host to deliver a `RedrawRequested` event soon.
    /// Asynchronous: does not wait for the paint to occur.
    fn request_redraw(&mut self) -> Result<()>;

    /// Blits `frame` verbatim to the window's drawing surface.
    ///
    /// Must tolerate being called before the window is fully bound for
    /// presentation (no-op in that case).
    fn present(&mut self, frame: &PixelSurface) -> Result<(), DisplayError>;

    /// Sets the window title. Failures are logged, not propagated.
    fn set_title(&mut self, title: &str);

    /// Current client area size in pixels, `(width, height)`.
    fn client_size(&self) -> (u32, u32);

    /// Releases host resources. Idempotent; release failures are reported
    /// so teardown of remaining resources can continue.
    fn cleanup(&mut self) -> Result<(), DisplayError>;
}
