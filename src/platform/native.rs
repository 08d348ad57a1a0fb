use winit::{
    dpi::{LogicalSize, PhysicalSize},
    window::{Window, WindowBuilder},
};

use crate::{
    config::{DEFAULT_LOG_FILTER, UNSUPPORTED_MESSAGE, WINDOW_SIZE, WINDOW_TITLE},
    error::InitError,
};

pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();
}

pub fn window_builder() -> WindowBuilder {
    WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_resizable(true)
        .with_inner_size(LogicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1))
}

/// wgpu reports a missing adapter on its own.
pub fn ensure_supported() -> Result<(), InitError> {
    Ok(())
}

pub fn create_surface(instance: &wgpu::Instance, window: &Window) -> Result<wgpu::Surface, InitError> {
    // --SAFETY--
    // The surface needs to live as long as the window that created it.
    // Callers keep the window alive for as long as the surface.
    Ok(unsafe { instance.create_surface(window) }?)
}

/// The native window is already on screen.
pub fn attach(_window: &Window) -> Result<(), InitError> {
    Ok(())
}

pub fn report_unsupported() {
    log::error!("{}", UNSUPPORTED_MESSAGE);
}

/// winit reports physical sizes that already include the scale factor.
pub fn backing_size(_window: &Window, reported: PhysicalSize<u32>) -> PhysicalSize<u32> {
    reported
}

pub fn current_size(window: &Window) -> PhysicalSize<u32> {
    window.inner_size()
}
