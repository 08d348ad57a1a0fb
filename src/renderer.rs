use crate::{
    config::{CLEAR_COLOR, DEPTH_CLEAR},
    gpu::Gpu,
    mesh::{Mesh, TREE_VERTICES},
    pipeline,
    surface::SurfaceState,
    texture::DepthTexture,
};
use winit::dpi::PhysicalSize;

/// What the event loop should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// Nothing drawn this tick; try again on the next one.
    Skipped,
    /// The device ran out of memory. Stop the loop.
    Fatal,
}

/// Counters for the frame loop.
#[derive(Debug)]
pub struct FrameStats {
    pub frames: u64,
    pub vertices_drawn: u64,
    started: instant::Instant,
}

impl FrameStats {
    const REPORT_EVERY: u64 = 600;

    pub fn new() -> Self {
        Self {
            frames: 0,
            vertices_drawn: 0,
            started: instant::Instant::now(),
        }
    }

    pub fn record(&mut self, vertices: std::ops::Range<u32>) {
        self.frames += 1;
        self.vertices_drawn += u64::from(vertices.end - vertices.start);

        if self.frames % Self::REPORT_EVERY == 0 {
            let secs = self.started.elapsed().as_secs_f64();
            log::debug!(
                "{} frames, {:.1} fps average",
                self.frames,
                self.frames as f64 / secs.max(f64::EPSILON)
            );
        }
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Vertices covered by the frame's one draw call: the whole mesh, every frame.
pub fn draw_range(mesh: &Mesh) -> std::ops::Range<u32> {
    0..mesh.vertex_count()
}

/// Records the single clear-and-draw pass into `encoder`.
pub fn encode_pass(
    encoder: &mut wgpu::CommandEncoder,
    target: &wgpu::TextureView,
    depth: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    mesh: &Mesh,
) {
    // begin_render_pass borrows the encoder mutably until the pass is dropped
    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Render Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(DEPTH_CLEAR),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        occlusion_query_set: None,
        timestamp_writes: None,
    });

    render_pass.set_pipeline(pipeline);
    render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
    render_pass.draw(draw_range(mesh), 0..1);
}

/// All GPU state for the scene, built once and kept for the life of the process.
pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: SurfaceState,
    pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
    depth_texture: DepthTexture,
    pub stats: FrameStats,
}

impl Renderer {
    pub fn new(gpu: Gpu, surface: SurfaceState) -> Renderer {
        let Gpu { device, queue, .. } = gpu;

        let mesh = Mesh::upload(&device, &TREE_VERTICES);
        let pipeline =
            pipeline::create_render_pipeline(&device, surface.format(), DepthTexture::DEPTH_FORMAT);
        let depth_texture = DepthTexture::for_surface(&device, &surface.config);

        Renderer {
            device,
            queue,
            surface,
            pipeline,
            mesh,
            depth_texture,
            stats: FrameStats::new(),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Resizes the surface and replaces the depth buffer to match. Zero-sized
    /// and unchanged requests are ignored.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if self.surface.resize(&self.device, new_size) {
            log::debug!("surface resized to {}x{}", new_size.width, new_size.height);
            self.depth_texture = DepthTexture::for_surface(&self.device, &self.surface.config);
        }
    }

    pub fn render(&mut self) -> FrameOutcome {
        match self.draw_frame() {
            Ok(()) => FrameOutcome::Presented,
            // Reconfigure the surface if lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                self.surface.reconfigure(&self.device);
                FrameOutcome::Skipped
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory");
                FrameOutcome::Fatal
            }
            // Timeout should be resolved by the next frame
            Err(err) => {
                log::warn!("skipping frame: {:?}", err);
                FrameOutcome::Skipped
            }
        }
    }

    fn draw_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        encode_pass(
            &mut encoder,
            &view,
            &self.depth_texture.view,
            &self.pipeline,
            &self.mesh,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        self.stats.record(draw_range(&self.mesh));
        Ok(())
    }
}
