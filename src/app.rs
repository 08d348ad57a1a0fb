use winit::{
    dpi::PhysicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::Window,
};

use crate::{
    error::InitError,
    gpu,
    platform,
    renderer::{FrameOutcome, Renderer},
    surface::SurfaceState,
};

pub fn build_window(event_loop: &EventLoop<()>) -> Result<Window, InitError> {
    Ok(platform::window_builder().build(event_loop)?)
}

/// The window plus everything drawn into it.
pub struct Application {
    // declared before `window` so the surface is dropped first
    renderer: Renderer,
    window: Window,
}

impl Application {
    /// Device acquisition, surface configuration, geometry upload and pipeline
    /// build, in that order. The only await point of the program.
    pub async fn new(window: Window) -> Result<Application, InitError> {
        platform::ensure_supported()?;
        let instance = gpu::instance();

        // Application owns the window and drops the renderer, and with it the
        // surface, first
        let surface = platform::create_surface(&instance, &window)?;

        let gpu = gpu::acquire(&instance, Some(&surface)).await?;

        platform::attach(&window)?;
        let size = platform::current_size(&window);

        let surface = SurfaceState::new(surface, &gpu.adapter, &gpu.device, size)
            .ok_or(InitError::Unsupported)?;
        let renderer = Renderer::new(gpu, surface);

        Ok(Application { renderer, window })
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Hands control to winit. On desktop this returns once the window closes;
    /// in the browser the loop lives until the page goes away.
    pub fn run(mut self, event_loop: EventLoop<()>) -> Result<(), InitError> {
        event_loop.set_control_flow(ControlFlow::Wait);
        // first frame; every frame schedules the next one
        self.window.request_redraw();

        let handler = move |event: Event<()>, elwt: &EventLoopWindowTarget<()>| {
            self.handle_event(event, elwt)
        };

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn(handler);
        }
        #[cfg(not(target_arch = "wasm32"))]
        event_loop.run(handler)?;

        Ok(())
    }

    fn handle_event(&mut self, event: Event<()>, elwt: &EventLoopWindowTarget<()>) {
        let Event::WindowEvent { window_id, event } = event else {
            return;
        };
        if window_id != self.window.id() {
            return;
        }

        match event {
            #[cfg(not(target_arch = "wasm32"))]
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: winit::keyboard::Key::Named(winit::keyboard::NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => elwt.exit(),

            WindowEvent::Resized(physical_size) => self.resize(physical_size),

            WindowEvent::ScaleFactorChanged { .. } => self.resize(self.window.inner_size()),

            WindowEvent::RedrawRequested => {
                if self.renderer.render() == FrameOutcome::Fatal {
                    elwt.exit();
                    return;
                }
                self.window.request_redraw();
            }

            _ => (),
        }
    }

    fn resize(&mut self, reported: PhysicalSize<u32>) {
        let size = platform::backing_size(&self.window, reported);
        self.renderer.resize(size);
    }
}
