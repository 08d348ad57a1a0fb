use crate::mesh::Vertex;

const SHADER_SOURCE: &str = include_str!("shader.wgsl");

/// Triangle list with culling off, so both windings of every triangle are drawn.
pub fn primitive_state() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        // Requires Features::DEPTH_CLIP_CONTROL
        unclipped_depth: false,
        // Requires Features::CONSERVATIVE_RASTERIZATION
        conservative: false,
    }
}

/// Strict "less" depth test with writes on: a fragment only lands if it is
/// nearer than what the frame already holds at that pixel.
pub fn depth_stencil_state(format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

pub fn create_render_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Tree Shader"),
        source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
    });

    // no bind groups, positions are already in clip space
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Render Pipeline Layout"),
        bind_group_layouts: &[],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Render Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: "vs_main",
            buffers: &[Vertex::desc()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: primitive_state(),
        depth_stencil: Some(depth_stencil_state(depth_format)),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_windings_are_visible() {
        let primitive = primitive_state();
        assert_eq!(primitive.cull_mode, None);
        assert_eq!(primitive.topology, wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(primitive.polygon_mode, wgpu::PolygonMode::Fill);
    }

    #[test]
    fn depth_test_is_strictly_less() {
        let depth = depth_stencil_state(wgpu::TextureFormat::Depth24Plus);
        assert_eq!(depth.depth_compare, wgpu::CompareFunction::Less);
        assert!(depth.depth_write_enabled);
        assert_eq!(depth.format, wgpu::TextureFormat::Depth24Plus);
        assert!(!depth.stencil.is_enabled());
    }

    #[test]
    fn shader_declares_both_entry_points() {
        assert!(SHADER_SOURCE.contains("fn vs_main("));
        assert!(SHADER_SOURCE.contains("fn fs_main("));
        assert!(SHADER_SOURCE.contains("@location(1) color: vec3<f32>"));
    }
}
