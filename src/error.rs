// src/error.rs

//! Error taxonomy for the display loop.
//!
//! Allocation and init failures abort startup; release failures during
//! teardown are logged and teardown continues (best-effort, not fail-fast).
//! Out-of-range pixel writes are a programmer error and are kept
//! unrepresentable as a runtime error value: `FrameBufferPair::write_back`
//! is a checked API that panics on misuse instead.

use thiserror::Error;

/// Failures while creating or sizing a pixel surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The requested surface could not be allocated as a presentable buffer.
    #[error("surface allocation failed: {reason} ({width}x{height})")]
    Allocation {
        width: u32,
        height: u32,
        reason: String,
    },
}

/// Failures reported by a display driver.
///
/// Each variant carries the failing operation and whatever detail the host
/// window system provided, so every failure path surfaces a debuggable
/// diagnostic.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Connecting to the host display or creating the window failed.
    #[error("display init failed during {operation}: {detail}")]
    Init { operation: String, detail: String },

    /// Blitting a frame to the window failed.
    #[error("presentation failed during {operation}: {detail}")]
    Presentation { operation: String, detail: String },

    /// Teardown failed to free a host resource.
    #[error("release failed during {operation}: {detail}")]
    Release { operation: String, detail: String },
}

impl DisplayError {
    pub fn init(operation: &str, detail: impl Into<String>) -> Self {
        DisplayError::Init {
            operation: operation.to_string(),
            detail: detail.into(),
        }
    }

    pub fn presentation(operation: &str, detail: impl Into<String>) -> Self {
        DisplayError::Presentation {
            operation: operation.to_string(),
            detail: detail.into(),
        }
    }

    pub fn release(operation: &str, detail: impl Into<String>) -> Self {
        DisplayError::Release {
            operation: operation.to_string(),
            detail: detail.into(),
        }
    }
}

/// Failures while setting up the renderer.
#[derive(Debug, Error)]
pub enum RendererError {
    /// Buffer pair allocation failed. No tick is armed when this is
    /// returned.
    #[error("renderer init failed: {0}")]
    Init(#[source] SurfaceError),

    /// The configured frame rate is not a positive number.
    #[error("renderer init failed: invalid frame rate {0}")]
    InvalidFrameRate(f32),
}
