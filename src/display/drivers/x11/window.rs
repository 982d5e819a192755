// src/display/drivers/x11/window.rs

//! X11 window creation, WM protocol setup, and redraw requests.

use super::connection::Connection;
use crate::display::driver::DriverConfig;
use crate::error::DisplayError;
use log::{debug, info, warn};
use std::ffi::CString;
use std::mem;

use libc::{c_char, c_uint};
use x11::xlib;

/// One native X11 window plus the atoms needed for the close protocol.
///
/// The window is destroyed by `cleanup`, which the owning driver calls
/// before the connection closes; `cleanup` is idempotent.
#[derive(Debug)]
pub struct Window {
    id: xlib::Window,
    wm_delete_window: xlib::Atom,
    width: u32,
    height: u32,
}

impl Window {
    /// Creates, configures, and maps a window per `config`.
    pub fn new(connection: &Connection, config: &DriverConfig) -> Result<Self, DisplayError> {
        info!(
            "Creating X11 window {}x{} '{}'",
            config.width, config.height, config.title
        );
        let display = connection.display();
        let screen = connection.screen();

        // SAFETY: Xlib FFI with a valid open connection. The window id is
        // checked before use.
        let id = unsafe {
            let root = xlib::XRootWindow(display, screen);
            let black = xlib::XBlackPixel(display, screen);

            let mut attributes: xlib::XSetWindowAttributes = mem::zeroed();
            attributes.background_pixel = black;
            attributes.border_pixel = black;
            // Expose drives the paint handshake; StructureNotify is needed
            // for DestroyNotify during teardown.
            attributes.event_mask = xlib::ExposureMask | xlib::StructureNotifyMask;

            xlib::XCreateWindow(
                display,
                root,
                0,
                0,
                config.width as c_uint,
                config.height as c_uint,
                0, // border width
                connection.depth(),
                xlib::InputOutput as c_uint,
                connection.visual(),
                xlib::CWBackPixel | xlib::CWBorderPixel | xlib::CWEventMask,
                &mut attributes,
            )
        };

        if id == 0 {
            return Err(DisplayError::init("XCreateWindow", "returned window id 0"));
        }
        debug!("X11 window created, id {}", id);

        let mut window = Self {
            id,
            wm_delete_window: 0,
            width: config.width,
            height: config.height,
        };
        window.setup_protocols(connection, config)?;

        // SAFETY: valid display and window id; mapping makes it visible.
        unsafe {
            xlib::XMapWindow(display, id);
        }
        connection.flush();

        Ok(window)
    }

    /// Registers WM_DELETE_WINDOW, sets the class hint and the title.
    fn setup_protocols(
        &mut self,
        connection: &Connection,
        config: &DriverConfig,
    ) -> Result<(), DisplayError> {
        let display = connection.display();

        // SAFETY: Xlib FFI with valid display/window; CStrings live past the
        // calls that borrow them.
        unsafe {
            self.wm_delete_window = xlib::XInternAtom(
                display,
                b"WM_DELETE_WINDOW\0".as_ptr() as *const c_char,
                xlib::False,
            );
            if self.wm_delete_window != 0 {
                xlib::XSetWMProtocols(display, self.id, [self.wm_delete_window].as_mut_ptr(), 1);
            } else {
                warn!("WM_DELETE_WINDOW atom unavailable; close button may not deliver Close");
            }

            let class = CString::new(config.class.clone())
                .map_err(|e| DisplayError::init("class hint", e.to_string()))?;
            let mut hint = xlib::XClassHint {
                res_name: class.as_ptr() as *mut c_char,
                res_class: class.as_ptr() as *mut c_char,
            };
            xlib::XSetClassHint(display, self.id, &mut hint);
        }

        self.set_title(connection, &config.title)?;
        Ok(())
    }

    #[inline]
    pub fn id(&self) -> xlib::Window {
        self.id
    }

    /// Client area size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// WM_DELETE_WINDOW atom, 0 if unavailable.
    pub fn wm_delete_window(&self) -> xlib::Atom {
        self.wm_delete_window
    }

    pub fn set_title(&self, connection: &Connection, title: &str) -> Result<(), DisplayError> {
        let c_title =
            CString::new(title).map_err(|e| DisplayError::init("window title", e.to_string()))?;
        // SAFETY: valid display/window; c_title outlives the call.
        unsafe {
            xlib::XStoreName(connection.display(), self.id, c_title.as_ptr() as *mut c_char);
        }
        connection.flush();
        Ok(())
    }

    /// Asks the server to generate an Expose for the whole window.
    ///
    /// This is the asynchronous repaint request: the paint itself arrives
    /// later as a `RedrawRequested` event.
    pub fn request_redraw(&self, connection: &Connection) {
        if self.id == 0 {
            return;
        }
        // SAFETY: valid display/window. Width/height 0 means whole window;
        // exposures=True queues the Expose event.
        unsafe {
            xlib::XClearArea(connection.display(), self.id, 0, 0, 0, 0, xlib::True);
        }
        connection.flush();
    }

    /// Destroys the window. Idempotent.
    pub fn cleanup(&mut self, connection: &Connection) {
        if self.id == 0 || !connection.is_open() {
            self.id = 0;
            return;
        }
        debug!("Destroying X11 window {}", self.id);
        // SAFETY: valid display and live window id; id is zeroed after so
        // the destroy happens once.
        unsafe {
            xlib::XDestroyWindow(connection.display(), self.id);
        }
        connection.flush();
        self.id = 0;
    }
}
