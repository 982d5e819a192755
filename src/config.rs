// src/config.rs

//! Configuration for the display loop.
//!
//! Settings are grouped into sections and deserialized from an optional JSON
//! file named by the `BLITLOOP_CONFIG` environment variable. Every field has
//! a default, so a missing or partial file is fine; a malformed file logs a
//! warning and falls back to defaults rather than aborting startup.

use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Global configuration, loaded once on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load_or_default);

/// Complete configuration for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Window identity and geometry.
    pub window: WindowConfig,
    /// Frame cadence settings.
    pub renderer: RendererConfig,
    /// Main loop pacing.
    pub main_loop: LoopConfig,
}

/// Window identity and geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title shown by the window manager.
    pub title: String,
    /// Window class / application identity string.
    pub class: String,
    /// Client area width in pixels.
    pub width: u32,
    /// Client area height in pixels.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "blitloop".to_string(),
            class: "blitloop".to_string(),
            width: 640,
            height: 360,
        }
    }
}

/// Frame cadence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Target frame rate in frames per second. Must be > 0; the tick
    /// interval is `1000 / fps` milliseconds.
    pub fps: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig { fps: 60.0 }
    }
}

/// Main loop pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Sleep between loop iterations in milliseconds. 0 busy-spins like the
    /// raw message pump; the frame producer still runs every iteration.
    pub idle_sleep_ms: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        LoopConfig { idle_sleep_ms: 1 }
    }
}

impl Config {
    /// Loads configuration from the file named by `BLITLOOP_CONFIG`, or
    /// returns defaults when the variable is unset or the file is unusable.
    pub fn load_or_default() -> Self {
        let path = match std::env::var("BLITLOOP_CONFIG") {
            Ok(path) => path,
            Err(_) => return Config::default(),
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from {}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse config file {}: {}. Using defaults.",
                        path, e
                    );
                    Config::default()
                }
            },
            Err(e) => {
                warn!(
                    "Failed to read config file {}: {}. Using defaults.",
                    path, e
                );
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_window_contract() {
        let config = Config::default();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 360);
        assert_eq!(config.renderer.fps, 60.0);
    }

    #[test]
    fn partial_json_fills_missing_sections() {
        let config: Config =
            serde_json::from_str(r#"{"window": {"width": 800}}"#).expect("partial config");
        assert_eq!(config.window.width, 800);
        // Unspecified fields come from the section defaults.
        assert_eq!(config.window.height, 360);
        assert_eq!(config.renderer.fps, 60.0);
        assert_eq!(config.main_loop.idle_sleep_ms, 1);
    }
}
