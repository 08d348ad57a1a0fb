//! Draws a small static tree with a star on top, once per display refresh.
//!
//! The same code runs in a native window and, built for `wasm32`, on a browser
//! canvas through WebGPU.

mod app;
pub mod config;
pub mod error;
pub mod gpu;
pub mod mesh;
pub mod pipeline;
mod platform;
pub mod renderer;
pub mod surface;
pub mod texture;

use anyhow::Context;
use winit::event_loop::EventLoop;

pub use app::Application;
pub use error::InitError;

/// Sets up logging, the window and the GPU, then runs the frame loop.
///
/// Without a usable device the failure is shown to the user (page text in the
/// browser, an error log on desktop) and returned. Nothing is retried.
pub async fn run() -> anyhow::Result<()> {
    platform::init_logging();

    let event_loop = EventLoop::new()
        .map_err(InitError::from)
        .context("failed to create event loop")?;
    let window = app::build_window(&event_loop).context("failed to create window")?;

    let application = match Application::new(window).await {
        Ok(application) => application,
        Err(err) => {
            if matches!(err, InitError::Unsupported) {
                platform::report_unsupported();
            }
            return Err(err).context("failed to initialise graphics");
        }
    };
    log::info!(
        "drawing {} vertices per frame",
        application.renderer().mesh().vertex_count()
    );

    application.run(event_loop).context("event loop failed")
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    if let Err(err) = run().await {
        log::error!("{:#}", err);
    }
}
