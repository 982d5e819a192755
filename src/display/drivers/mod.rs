// src/display/drivers/mod.rs

//! Concrete display driver implementations.

pub mod headless;
pub mod x11;

pub use headless::HeadlessDisplayDriver;
pub use x11::X11DisplayDriver;
