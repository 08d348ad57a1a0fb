use wasm_bindgen::JsValue;
use web_sys::Element;
use web_sys::HtmlCanvasElement;
use winit::{
    dpi::PhysicalSize,
    platform::web::{WindowBuilderExtWebSys, WindowExtWebSys},
    window::{Window, WindowBuilder},
};

use crate::{
    config::{CANVAS_ID, UNSUPPORTED_MESSAGE, WINDOW_TITLE},
    error::InitError,
    surface,
};

pub fn init_logging() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// The canvas stays detached until a device has been acquired, so a failed
/// start never shows an empty drawing area.
pub fn window_builder() -> WindowBuilder {
    WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_append(false)
}

fn document() -> Result<web_sys::Document, InitError> {
    web_sys::window()
        .and_then(|win| win.document())
        .ok_or_else(|| InitError::Dom("no document".into()))
}

fn canvas(window: &Window) -> Result<HtmlCanvasElement, InitError> {
    window
        .canvas()
        .ok_or_else(|| InitError::Dom("window has no canvas".into()))
}

fn dom_error(err: JsValue) -> InitError {
    InitError::Dom(format!("{:?}", err))
}

/// Whether the page exposes `navigator.gpu` at all. Insecure contexts and
/// browsers without WebGPU leave it undefined.
pub fn webgpu_exposed() -> bool {
    web_sys::window()
        .and_then(|win| js_sys::Reflect::get(&win.navigator(), &JsValue::from_str("gpu")).ok())
        .map_or(false, |gpu| !gpu.is_undefined() && !gpu.is_null())
}

/// Checked before any wgpu call; wgpu assumes `navigator.gpu` is there.
pub fn ensure_supported() -> Result<(), InitError> {
    if webgpu_exposed() {
        Ok(())
    } else {
        log::error!("navigator.gpu is missing");
        Err(InitError::Unsupported)
    }
}

/// A canvas without a WebGPU context counts as an unsupported browser.
pub fn surface_from_canvas(
    instance: &wgpu::Instance,
    canvas: HtmlCanvasElement,
) -> Result<wgpu::Surface, InitError> {
    ensure_supported()?;
    instance.create_surface_from_canvas(canvas).map_err(|err| {
        log::error!("no WebGPU context on the canvas: {}", err);
        InitError::Unsupported
    })
}

/// Built from the canvas element itself, which works while it is still
/// detached from the page.
pub fn create_surface(instance: &wgpu::Instance, window: &Window) -> Result<wgpu::Surface, InitError> {
    surface_from_canvas(instance, canvas(window)?)
}

/// Puts the canvas in the page body and gives it its first backing size.
pub fn attach(window: &Window) -> Result<(), InitError> {
    let canvas = canvas(window)?;
    canvas.set_id(CANVAS_ID);

    let body = document()?
        .body()
        .ok_or_else(|| InitError::Dom("no body".into()))?;
    body.append_child(&canvas).map_err(dom_error)?;

    resize_canvas(&canvas);
    Ok(())
}

/// Replaces everything inside `root` with the unsupported message.
fn show_unsupported(root: &Element) {
    root.set_text_content(Some(UNSUPPORTED_MESSAGE));
}

/// Replaces the whole page with the message. Any canvas goes with it.
pub fn report_unsupported() {
    log::error!("{}", UNSUPPORTED_MESSAGE);
    match document().map(|doc| doc.body()) {
        Ok(Some(body)) => show_unsupported(&body),
        _ => log::error!("no page body to show the message in"),
    }
}

fn device_pixel_ratio() -> f64 {
    web_sys::window().map_or(1.0, |win| win.device_pixel_ratio())
}

/// Sets the canvas' `width`/`height` to its client size times the pixel ratio.
fn resize_canvas(canvas: &HtmlCanvasElement) -> PhysicalSize<u32> {
    let size = surface::backing_size(
        f64::from(canvas.client_width()),
        f64::from(canvas.client_height()),
        device_pixel_ratio(),
    );
    canvas.set_width(size.width);
    canvas.set_height(size.height);
    size
}

/// Recomputed from the DOM on every resize signal rather than taken from the
/// event, so the canvas always matches `clientSize × devicePixelRatio`.
pub fn backing_size(window: &Window, reported: PhysicalSize<u32>) -> PhysicalSize<u32> {
    match window.canvas() {
        Some(canvas) => resize_canvas(&canvas),
        None => reported,
    }
}

pub fn current_size(window: &Window) -> PhysicalSize<u32> {
    match window.canvas() {
        Some(canvas) => PhysicalSize::new(canvas.width(), canvas.height()),
        None => window.inner_size(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn element(tag: &str) -> Element {
        document().unwrap().create_element(tag).unwrap()
    }

    #[wasm_bindgen_test]
    fn detached_canvas_gives_a_surface_or_unsupported() {
        let canvas: HtmlCanvasElement = element("canvas").dyn_into().unwrap();
        assert!(canvas.parent_node().is_none());

        match surface_from_canvas(&crate::gpu::instance(), canvas) {
            Ok(_) => assert!(webgpu_exposed()),
            Err(err) => assert!(matches!(err, InitError::Unsupported), "got {}", err),
        }
    }

    #[wasm_bindgen_test]
    fn missing_navigator_gpu_is_unsupported() {
        if webgpu_exposed() {
            assert!(ensure_supported().is_ok());
        } else {
            assert!(matches!(ensure_supported(), Err(InitError::Unsupported)));
        }
    }

    #[wasm_bindgen_test]
    fn message_replaces_the_canvas() {
        let root = element("div");
        root.append_child(&element("canvas")).unwrap();

        show_unsupported(&root);

        assert_eq!(root.text_content().as_deref(), Some("WebGPU not supported"));
        assert!(root.query_selector("canvas").unwrap().is_none());
    }
}
