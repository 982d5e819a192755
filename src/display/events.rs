// src/display/events.rs

//! Platform-agnostic display events.

/// Events a display driver delivers to the event loop.
///
/// Tick is deliberately absent: the frame cadence comes from the injected
/// `TickScheduler`, not from the window system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEvent {
    /// The host asked for the window to be redrawn (expose/restore, or a
    /// previously requested redraw arriving).
    RedrawRequested,

    /// The user asked to close the window. Terminal.
    CloseRequested,
}
