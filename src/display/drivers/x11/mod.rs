// src/display/drivers/x11/mod.rs

//! X11 display driver.
//!
//! Composes the X11 submodules into the `DisplayDriver` contract:
//! - `connection`: the X server connection, closed exactly once.
//! - `window`: window creation, WM close protocol, redraw requests.
//! - `event`: translation of Expose / WM_DELETE_WINDOW into display events.
//! - `present`: `XPutImage` blit of a pixel surface.

pub mod connection;
pub mod event;
pub mod present;
pub mod window;

use crate::display::driver::{DisplayDriver, DriverConfig};
use crate::display::events::DisplayEvent;
use crate::error::DisplayError;
use crate::surface::PixelSurface;
use anyhow::Result;
use connection::Connection;
use log::{error, info, warn};
use window::Window;

/// `DisplayDriver` implementation over Xlib.
pub struct X11DisplayDriver {
    connection: Connection,
    window: Window,
}

impl DisplayDriver for X11DisplayDriver {
    fn new(config: &DriverConfig) -> Result<Self, DisplayError> {
        info!("Initializing X11 display driver");

        let connection = Connection::new()?;
        // Window::new failing here is fine: Connection's Drop closes the
        // display, so startup failure tears down what exists.
        let window = Window::new(&connection, config)?;

        info!("X11 display driver ready, window id {}", window.id());
        Ok(Self { connection, window })
    }

    fn poll_events(&mut self) -> Result<Vec<DisplayEvent>> {
        event::poll_pending_events(&self.connection, &self.window)
    }

    fn request_redraw(&mut self) -> Result<()> {
        self.window.request_redraw(&self.connection);
        Ok(())
    }

    fn present(&mut self, frame: &PixelSurface) -> Result<(), DisplayError> {
        present::blit(&self.connection, &self.window, frame)
    }

    fn set_title(&mut self, title: &str) {
        if let Err(e) = self.window.set_title(&self.connection, title) {
            error!("Failed to set window title: {}", e);
        }
    }

    fn client_size(&self) -> (u32, u32) {
        self.window.size()
    }

    fn cleanup(&mut self) -> Result<(), DisplayError> {
        info!("X11 display driver cleanup");
        // Window first, then the connection it lives on.
        self.window.cleanup(&self.connection);
        self.connection.cleanup()
    }
}

impl Drop for X11DisplayDriver {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            warn!("X11 driver cleanup during drop: {}", e);
        }
    }
}
