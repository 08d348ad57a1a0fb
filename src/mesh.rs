use wgpu::util::DeviceExt;

#[repr(C)] // 'C-like' layout so the buffer matches the shader's vertex inputs
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

const FOLIAGE_TIP: [f32; 3] = [0.0, 0.8, 0.0];
const FOLIAGE: [f32; 3] = [0.0, 0.6, 0.0];
const TRUNK: [f32; 3] = [0.6, 0.3, 0.0];
const STAR: [f32; 3] = [1.0, 1.0, 0.0];

const fn v(position: [f32; 3], color: [f32; 3]) -> Vertex {
    Vertex { position, color }
}

/// Five independent triangles: three foliage layers, the trunk and the star.
///
/// Depth grows towards the back, so the foliage (z = 0.0) covers the trunk
/// (z = 0.1) where they overlap.
pub const TREE_VERTICES: [Vertex; 15] = [
    // foliage, bottom layer
    v([0.0, 0.2, 0.0], FOLIAGE_TIP),
    v([0.5, -0.6, 0.0], FOLIAGE),
    v([-0.5, -0.6, 0.0], FOLIAGE),
    // foliage, middle layer
    v([0.0, 0.5, 0.0], FOLIAGE_TIP),
    v([0.4, -0.2, 0.0], FOLIAGE),
    v([-0.4, -0.2, 0.0], FOLIAGE),
    // foliage, top layer
    v([0.0, 0.7, 0.0], FOLIAGE_TIP),
    v([0.3, 0.2, 0.0], FOLIAGE),
    v([-0.3, 0.2, 0.0], FOLIAGE),
    // trunk
    v([0.0, -0.4, 0.1], TRUNK),
    v([0.3, -1.0, 0.1], TRUNK),
    v([-0.3, -1.0, 0.1], TRUNK),
    // star
    v([0.0, 0.8, 0.2], STAR),
    v([0.1, 0.7, 0.2], STAR),
    v([-0.1, 0.7, 0.2], STAR),
];

impl Vertex {
    pub const STRIDE: wgpu::BufferAddress = std::mem::size_of::<Vertex>() as wgpu::BufferAddress;

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute {
            offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        },
    ];

    /// Layout of one vertex buffer slot holding [`Vertex`] records.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Vertex data resident on the GPU. Written once at upload and never touched again.
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl Mesh {
    pub fn upload(device: &wgpu::Device, vertices: &[Vertex]) -> Mesh {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Tree Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        log::info!(
            "uploaded {} vertices ({} bytes)",
            vertices.len(),
            vertex_buffer.size()
        );

        Mesh {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn byte_len(&self) -> wgpu::BufferAddress {
        self.vertex_buffer.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_six_packed_floats() {
        assert_eq!(Vertex::STRIDE, 24);
        assert_eq!(std::mem::align_of::<Vertex>(), 4);
    }

    #[test]
    fn tree_fills_a_360_byte_buffer() {
        let bytes: &[u8] = bytemuck::cast_slice(&TREE_VERTICES);
        assert_eq!(TREE_VERTICES.len(), 15);
        assert_eq!(bytes.len(), 15 * 6 * 4);
    }

    #[test]
    fn layout_matches_shader_locations() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);

        let attrs: Vec<_> = layout
            .attributes
            .iter()
            .map(|a| (a.shader_location, a.offset, a.format))
            .collect();
        assert_eq!(
            attrs,
            vec![
                (0, 0, wgpu::VertexFormat::Float32x3),
                (1, 12, wgpu::VertexFormat::Float32x3),
            ]
        );
    }

    #[test]
    fn layers_are_ordered_front_to_back() {
        let depth = |range: std::ops::Range<usize>| -> Vec<f32> {
            TREE_VERTICES[range].iter().map(|v| v.position[2]).collect()
        };
        assert!(depth(0..9).iter().all(|&z| z == 0.0));
        assert!(depth(9..12).iter().all(|&z| z == 0.1));
        assert!(depth(12..15).iter().all(|&z| z == 0.2));
    }

    #[test]
    fn each_part_has_a_single_color_family() {
        assert!(TREE_VERTICES[..9]
            .iter()
            .all(|v| v.color == FOLIAGE || v.color == FOLIAGE_TIP));
        assert!(TREE_VERTICES[9..12].iter().all(|v| v.color == TRUNK));
        assert!(TREE_VERTICES[12..].iter().all(|v| v.color == STAR));
    }
}
