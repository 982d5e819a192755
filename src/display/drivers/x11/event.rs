// src/display/drivers/x11/event.rs

//! Translation of pending X events into `DisplayEvent`s.

use super::connection::Connection;
use super::window::Window;
use crate::display::events::DisplayEvent;
use anyhow::Result;
use log::trace;
use std::mem;

use x11::xlib;

/// Drains the X event queue, translating the events the core consumes.
///
/// Only two native events matter here: `Expose` becomes `RedrawRequested`
/// (coalesced - only the final event of an expose series is forwarded), and
/// a `WM_DELETE_WINDOW` client message becomes `CloseRequested`. Everything
/// else is dropped.
pub fn poll_pending_events(
    connection: &Connection,
    window: &Window,
) -> Result<Vec<DisplayEvent>> {
    let mut events = Vec::new();
    let display = connection.display();
    if display.is_null() {
        return Ok(events);
    }

    // SAFETY: XPending/XNextEvent with a valid open display; the loop bound
    // guarantees XNextEvent never blocks.
    while unsafe { xlib::XPending(display) } > 0 {
        let mut xevent: xlib::XEvent = unsafe { mem::zeroed() };
        unsafe { xlib::XNextEvent(display, &mut xevent) };

        // SAFETY: type_ is the common discriminant of the XEvent union.
        let event_type = unsafe { xevent.type_ };

        match event_type {
            xlib::Expose => {
                // SAFETY: discriminant confirmed Expose.
                let expose = unsafe { xevent.expose };
                if expose.window == window.id() && expose.count == 0 {
                    trace!("XEvent: Expose on window {}", expose.window);
                    events.push(DisplayEvent::RedrawRequested);
                }
            }
            xlib::ClientMessage => {
                // SAFETY: discriminant confirmed ClientMessage.
                let message = unsafe { xevent.client_message };
                if message.window == window.id()
                    && window.wm_delete_window() != 0
                    && message.data.get_long(0) as xlib::Atom == window.wm_delete_window()
                {
                    trace!("XEvent: WM_DELETE_WINDOW on window {}", message.window);
                    events.push(DisplayEvent::CloseRequested);
                }
            }
            _ => {
                trace!("XEvent: ignored type {}", event_type);
            }
        }
    }

    Ok(events)
}
