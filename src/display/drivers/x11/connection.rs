// src/display/drivers/x11/connection.rs

//! Connection to the X server, closed exactly once.

use crate::error::DisplayError;
use log::{debug, info, warn};
use std::ptr;

use libc::c_int;
use x11::xlib;

/// Owns the Xlib `Display` pointer plus the default screen resources the
/// driver needs. The connection is closed when this is dropped, or earlier
/// via `cleanup`; both paths are idempotent.
#[derive(Debug)]
pub struct Connection {
    display: *mut xlib::Display,
    screen: c_int,
    visual: *mut xlib::Visual,
    depth: c_int,
}

impl Connection {
    /// Opens a connection to the server named by `DISPLAY`.
    pub fn new() -> Result<Self, DisplayError> {
        let display = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if display.is_null() {
            return Err(DisplayError::init(
                "XOpenDisplay",
                "cannot open display; is DISPLAY set and the X server running?",
            ));
        }

        // SAFETY: display is non-null and owned by us until cleanup/drop.
        let (screen, visual, depth) = unsafe {
            let screen = xlib::XDefaultScreen(display);
            let visual = xlib::XDefaultVisual(display, screen);
            let depth = xlib::XDefaultDepth(display, screen);
            (screen, visual, depth)
        };

        if visual.is_null() {
            unsafe { xlib::XCloseDisplay(display) };
            return Err(DisplayError::init(
                "XDefaultVisual",
                format!("no default visual for screen {}", screen),
            ));
        }

        debug!(
            "X11 connection open: screen {}, depth {}, display {:p}",
            screen, depth, display
        );
        Ok(Self {
            display,
            screen,
            visual,
            depth,
        })
    }

    /// Raw display pointer. Valid until `cleanup` or drop.
    #[inline]
    pub fn display(&self) -> *mut xlib::Display {
        self.display
    }

    #[inline]
    pub fn screen(&self) -> c_int {
        self.screen
    }

    #[inline]
    pub fn visual(&self) -> *mut xlib::Visual {
        self.visual
    }

    #[inline]
    pub fn depth(&self) -> c_int {
        self.depth
    }

    pub fn is_open(&self) -> bool {
        !self.display.is_null()
    }

    /// Flushes the Xlib command buffer.
    pub fn flush(&self) {
        if !self.display.is_null() {
            // SAFETY: display is a valid open connection.
            unsafe { xlib::XFlush(self.display) };
        }
    }

    /// Closes the connection. Idempotent; a server-side close failure is
    /// surfaced as a `Release` error so teardown can log and continue.
    pub fn cleanup(&mut self) -> Result<(), DisplayError> {
        if self.display.is_null() {
            return Ok(());
        }

        info!("Closing X11 display connection {:p}", self.display);
        // SAFETY: display is non-null; after this call it is never used again.
        let status = unsafe { xlib::XCloseDisplay(self.display) };
        self.display = ptr::null_mut();
        self.visual = ptr::null_mut();

        if status != 0 {
            return Err(DisplayError::release(
                "XCloseDisplay",
                format!("returned status {}", status),
            ));
        }
        Ok(())
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            warn!("Connection drop: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Constructing a Connection needs a live X server, so these tests cover
    // the state logic on a synthetic instance only.

    fn closed_connection() -> Connection {
        Connection {
            display: ptr::null_mut(),
            screen: 0,
            visual: ptr::null_mut(),
            depth: 24,
        }
    }

    #[test]
    fn cleanup_is_idempotent_on_a_closed_connection() {
        let mut conn = closed_connection();
        assert!(!conn.is_open());
        assert!(conn.cleanup().is_ok());
        assert!(conn.cleanup().is_ok());
    }

    #[test]
    fn flush_on_a_closed_connection_is_a_no_op() {
        let conn = closed_connection();
        conn.flush();
    }
}
