// src/display/mod.rs

//! Host display abstraction.
//!
//! - `DisplayDriver`: the minimal platform contract the renderer needs -
//!   present a frame, request a redraw, deliver paint/close events.
//! - `drivers`: concrete implementations (X11, headless).

pub mod driver;
pub mod drivers;
pub mod events;

pub use driver::{DisplayDriver, DriverConfig};
pub use events::DisplayEvent;
