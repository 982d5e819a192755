// src/display/drivers/x11/present.rs

//! Frame presentation: blitting a pixel surface to the window.

use super::connection::Connection;
use super::window::Window;
use crate::error::DisplayError;
use crate::surface::PixelSurface;
use log::trace;
use std::ptr;

use libc::c_char;
use x11::xlib;

/// Blits `frame` to the window via a temporary `XImage` over the surface
/// bytes. No pixel copy happens on our side; `XPutImage` reads straight from
/// the surface memory.
pub fn blit(
    connection: &Connection,
    window: &Window,
    frame: &PixelSurface,
) -> Result<(), DisplayError> {
    let display = connection.display();
    if display.is_null() || window.id() == 0 {
        // Presentation target not bound (yet, or anymore): tolerated no-op.
        trace!("Blit skipped: no bound presentation target");
        return Ok(());
    }

    trace!("Blitting {}x{} frame", frame.width(), frame.height());

    // SAFETY: Xlib FFI over a valid connection/window. The XImage borrows
    // the surface bytes; its data pointer is detached before XDestroyImage
    // so Xlib never frees memory it does not own.
    unsafe {
        let image = xlib::XCreateImage(
            display,
            connection.visual(),
            connection.depth() as u32,
            xlib::ZPixmap,
            0,
            frame.as_bytes().as_ptr() as *mut c_char,
            frame.width(),
            frame.height(),
            32, // bitmap pad
            0,  // bytes per line, computed from width
        );

        if image.is_null() {
            return Err(DisplayError::presentation(
                "XCreateImage",
                format!("returned null for {}x{} frame", frame.width(), frame.height()),
            ));
        }

        let gc = xlib::XDefaultGC(display, connection.screen());
        xlib::XPutImage(
            display,
            window.id(),
            gc,
            image,
            0,
            0,
            0,
            0,
            frame.width(),
            frame.height(),
        );

        (*image).data = ptr::null_mut();
        xlib::XDestroyImage(image);
    }

    connection.flush();
    Ok(())
}
