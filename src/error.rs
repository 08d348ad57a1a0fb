//! Startup failures.
//!
//! Only [`InitError::Unsupported`] is a recognized, user-facing failure. The rest
//! wrap host errors that surface while the window and surface are being set up.

use thiserror::Error;

use crate::config::UNSUPPORTED_MESSAGE;

#[derive(Error, Debug)]
pub enum InitError {
    /// No adapter, no device, or a surface that offers no formats.
    #[error("{}", UNSUPPORTED_MESSAGE)]
    Unsupported,

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Browser only: the page is missing something the canvas needs.
    #[error("DOM error: {0}")]
    Dom(String),
}
