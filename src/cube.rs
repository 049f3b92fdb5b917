//! Static cube geometry: 36 vertices, one solid color per face.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

const fn v(x: f32, y: f32, z: f32, r: f32, g: f32, b: f32) -> CubeVertex {
    CubeVertex {
        position: [x, y, z],
        color: [r, g, b],
    }
}

impl CubeVertex {
    /// Unit cube centered on the origin, 6 faces × 2 triangles.
    pub const VERTICES: &'static [CubeVertex] = &[
        // Front (+Z), red
        v(-0.5, -0.5, 0.5, 1.0, 0.0, 0.0),
        v(0.5, -0.5, 0.5, 1.0, 0.0, 0.0),
        v(0.5, 0.5, 0.5, 1.0, 0.0, 0.0),
        v(0.5, 0.5, 0.5, 1.0, 0.0, 0.0),
        v(-0.5, 0.5, 0.5, 1.0, 0.0, 0.0),
        v(-0.5, -0.5, 0.5, 1.0, 0.0, 0.0),
        // Back (-Z), green
        v(-0.5, -0.5, -0.5, 0.0, 1.0, 0.0),
        v(-0.5, 0.5, -0.5, 0.0, 1.0, 0.0),
        v(0.5, 0.5, -0.5, 0.0, 1.0, 0.0),
        v(0.5, 0.5, -0.5, 0.0, 1.0, 0.0),
        v(0.5, -0.5, -0.5, 0.0, 1.0, 0.0),
        v(-0.5, -0.5, -0.5, 0.0, 1.0, 0.0),
        // Left (-X), blue
        v(-0.5, -0.5, -0.5, 0.0, 0.0, 1.0),
        v(-0.5, -0.5, 0.5, 0.0, 0.0, 1.0),
        v(-0.5, 0.5, 0.5, 0.0, 0.0, 1.0),
        v(-0.5, 0.5, 0.5, 0.0, 0.0, 1.0),
        v(-0.5, 0.5, -0.5, 0.0, 0.0, 1.0),
        v(-0.5, -0.5, -0.5, 0.0, 0.0, 1.0),
        // Right (+X), yellow
        v(0.5, -0.5, -0.5, 1.0, 1.0, 0.0),
        v(0.5, 0.5, -0.5, 1.0, 1.0, 0.0),
        v(0.5, 0.5, 0.5, 1.0, 1.0, 0.0),
        v(0.5, 0.5, 0.5, 1.0, 1.0, 0.0),
        v(0.5, -0.5, 0.5, 1.0, 1.0, 0.0),
        v(0.5, -0.5, -0.5, 1.0, 1.0, 0.0),
        // Top (+Y), cyan
        v(-0.5, 0.5, -0.5, 0.0, 1.0, 1.0),
        v(-0.5, 0.5, 0.5, 0.0, 1.0, 1.0),
        v(0.5, 0.5, 0.5, 0.0, 1.0, 1.0),
        v(0.5, 0.5, 0.5, 0.0, 1.0, 1.0),
        v(0.5, 0.5, -0.5, 0.0, 1.0, 1.0),
        v(-0.5, 0.5, -0.5, 0.0, 1.0, 1.0),
        // Bottom (-Y), magenta
        v(-0.5, -0.5, -0.5, 1.0, 0.0, 1.0),
        v(0.5, -0.5, -0.5, 1.0, 0.0, 1.0),
        v(0.5, -0.5, 0.5, 1.0, 0.0, 1.0),
        v(0.5, -0.5, 0.5, 1.0, 0.0, 1.0),
        v(-0.5, -0.5, 0.5, 1.0, 0.0, 1.0),
        v(-0.5, -0.5, -0.5, 1.0, 0.0, 1.0),
    ];

    /// Returns the vertex buffer layout.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
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
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_six_faces_of_two_triangles() {
        assert_eq!(CubeVertex::VERTICES.len(), 36);
    }

    #[test]
    fn each_face_has_a_single_color() {
        for face in CubeVertex::VERTICES.chunks(6) {
            let color = face[0].color;
            assert!(face.iter().all(|v| v.color == color));
        }
    }
}
