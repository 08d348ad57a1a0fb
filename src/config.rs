//! Fixed settings. Nothing here is read at runtime; `RUST_LOG` on desktop is the
//! only external knob.

/// Title of the desktop window.
pub const WINDOW_TITLE: &str = "Tree";

/// Initial desktop window size, in logical pixels.
pub const WINDOW_SIZE: (u32, u32) = (800, 800);

/// Id given to the canvas winit creates in the browser.
pub const CANVAS_ID: &str = "tree-canvas";

/// Near-transparent black.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.2,
};

/// Depth buffer clear value, the far plane.
pub const DEPTH_CLEAR: f32 = 1.0;

/// Text that replaces the page when no usable GPU device exists.
pub const UNSUPPORTED_MESSAGE: &str = "WebGPU not supported";

/// Default env_logger filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";
