// src/main.rs

// Declare modules
pub mod config;
pub mod display;
pub mod error;
pub mod event_loop;
pub mod framebuffer;
pub mod producer;
pub mod renderer;
pub mod scheduler;
pub mod surface;

use crate::{
    config::CONFIG,
    display::driver::{DisplayDriver, DriverConfig},
    display::drivers::{HeadlessDisplayDriver, X11DisplayDriver},
    event_loop::EventLoop,
    producer::GradientProducer,
    scheduler::{IntervalScheduler, TickScheduler},
};

use anyhow::Context;
use log::info;
use std::time::Duration;

fn run_with_driver<D: DisplayDriver, S: TickScheduler>(driver: D, scheduler: S) -> anyhow::Result<()> {
    let idle_sleep = Duration::from_millis(CONFIG.main_loop.idle_sleep_ms);
    let mut event_loop = EventLoop::new(driver, scheduler, idle_sleep);

    let mut producer = GradientProducer::new();
    event_loop
        .run(CONFIG.renderer.fps, &mut producer)
        .context("Event loop failed")
}

/// Main entry point.
///
/// Exits 0 on a clean close and 1 on any initialization failure (window
/// creation or buffer allocation), with the failing operation and host
/// error logged.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting blitloop...");

    let driver_config = DriverConfig {
        title: CONFIG.window.title.clone(),
        class: CONFIG.window.class.clone(),
        width: CONFIG.window.width,
        height: CONFIG.window.height,
    };
    info!(
        "Window config: {}x{} '{}', {} fps target",
        driver_config.width, driver_config.height, driver_config.title, CONFIG.renderer.fps
    );

    // BLITLOOP_DRIVER=headless runs without a display server (smoke testing
    // and CI); anything else gets the X11 window.
    let headless = std::env::var("BLITLOOP_DRIVER")
        .map(|v| v == "headless")
        .unwrap_or(false);

    if headless {
        let driver = HeadlessDisplayDriver::new(&driver_config)
            .context("Failed to initialize headless display driver")?;
        run_with_driver(driver, IntervalScheduler::new())?;
    } else {
        let driver =
            X11DisplayDriver::new(&driver_config).context("Failed to initialize display driver")?;
        run_with_driver(driver, IntervalScheduler::new())?;
    }

    info!("blitloop exited cleanly");
    Ok(())
}
