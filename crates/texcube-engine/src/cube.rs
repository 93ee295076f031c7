//! Cube geometry and its GPU buffers.
//!
//! ```text
//!      (-1,+1,+1)________________(+1,+1,+1)
//!               /|              /|
//!              / |             / |             Z
//!             /  |            /  |             |   Y
//! (-1,-1,+1) /___|___________/(+1,-1,+1)       |  /
//!            |   |___________|___|             | /
//!            |  /(-1,+1,-1)  |  /(+1,+1,-1)    |/_______ X
//!            | /             | /
//!            |/______________|/
//!       (-1,-1,-1)       (+1,-1,-1)
//! ```

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::math::Mat4;

/// Vertex layout: position then texture coordinate, 20 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub texcoord: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // texcoord
    ];

    pub const fn new(position: [f32; 3], texcoord: [f32; 2]) -> Self {
        Self { position, texcoord }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub const VERTICES_PER_FACE: usize = 4;
pub const FACE_COUNT: usize = 6;

/// 4 vertices per face so each face carries its own texture coordinates.
pub const CUBE_VERTICES: [Vertex; VERTICES_PER_FACE * FACE_COUNT] = [
    // bottom (z = -1)
    Vertex::new([-1.0, -1.0, -1.0], [0.0, 1.0]),
    Vertex::new([-1.0, 1.0, -1.0], [0.0, 0.0]),
    Vertex::new([1.0, 1.0, -1.0], [1.0, 0.0]),
    Vertex::new([1.0, -1.0, -1.0], [1.0, 1.0]),
    // front (y = -1)
    Vertex::new([-1.0, -1.0, -1.0], [0.0, 1.0]),
    Vertex::new([-1.0, -1.0, 1.0], [0.0, 0.0]),
    Vertex::new([1.0, -1.0, 1.0], [1.0, 0.0]),
    Vertex::new([1.0, -1.0, -1.0], [1.0, 1.0]),
    // right (x = +1)
    Vertex::new([1.0, -1.0, -1.0], [0.0, 1.0]),
    Vertex::new([1.0, -1.0, 1.0], [1.0, 1.0]),
    Vertex::new([1.0, 1.0, 1.0], [1.0, 0.0]),
    Vertex::new([1.0, 1.0, -1.0], [0.0, 0.0]),
    // back (y = +1)
    Vertex::new([1.0, 1.0, -1.0], [0.0, 1.0]),
    Vertex::new([1.0, 1.0, 1.0], [0.0, 0.0]),
    Vertex::new([-1.0, 1.0, 1.0], [1.0, 0.0]),
    Vertex::new([-1.0, 1.0, -1.0], [1.0, 1.0]),
    // left (x = -1)
    Vertex::new([-1.0, 1.0, -1.0], [1.0, 0.0]),
    Vertex::new([-1.0, 1.0, 1.0], [0.0, 0.0]),
    Vertex::new([-1.0, -1.0, 1.0], [0.0, 1.0]),
    Vertex::new([-1.0, -1.0, -1.0], [1.0, 1.0]),
    // top (z = +1)
    Vertex::new([-1.0, -1.0, 1.0], [1.0, 1.0]),
    Vertex::new([1.0, -1.0, 1.0], [0.0, 1.0]),
    Vertex::new([1.0, 1.0, 1.0], [0.0, 0.0]),
    Vertex::new([-1.0, 1.0, 1.0], [1.0, 0.0]),
];

/// Two clockwise (front-facing) triangles per face.
#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 36] = [
    2, 0, 1,    2, 3, 0,
    4, 6, 5,    4, 7, 6,
    8, 10, 9,   8, 11, 10,
    12, 14, 13, 12, 15, 14,
    16, 18, 17, 16, 19, 18,
    20, 21, 22, 20, 22, 23,
];

pub const INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;

/// Contents of the per-frame uniform buffer (`Constants` in the vertex shader).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Constants {
    pub world_view_proj: Mat4,
}

/// Immutable vertex / index buffers plus the dynamic uniform buffer.
pub struct CubeBuffers {
    pub vertices: wgpu::Buffer,
    pub indices: wgpu::Buffer,
    pub constants: wgpu::Buffer,
}

impl CubeBuffers {
    pub fn new(device: &wgpu::Device) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube vertex buffer"),
            contents: bytemuck::cast_slice(&CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube index buffer"),
            contents: bytemuck::cast_slice(&CUBE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        // CPU writes only; contents are replaced wholesale every frame.
        let constants = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniform buffer"),
            size: std::mem::size_of::<Constants>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            vertices,
            indices,
            constants,
        }
    }

    pub fn index_count(&self) -> u32 {
        CUBE_INDICES.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn pos(i: u32) -> Vec3 {
        Vec3::from_array(CUBE_VERTICES[i as usize].position)
    }

    fn face_normal(face: usize) -> Vec3 {
        // The cube is centred on the origin, so the face centre is the outward normal.
        let base = face * VERTICES_PER_FACE;
        (0..VERTICES_PER_FACE)
            .map(|k| pos((base + k) as u32))
            .fold(Vec3::zero(), |acc, p| acc + p)
            * (1.0 / VERTICES_PER_FACE as f32)
    }

    #[test]
    fn buffer_sizes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 20);
        assert_eq!(bytemuck::cast_slice::<Vertex, u8>(&CUBE_VERTICES).len(), 24 * 20);
        assert_eq!(std::mem::size_of::<Constants>(), 64);
    }

    #[test]
    fn indices_form_twelve_triangles_within_their_face() {
        let tris: Vec<_> = CUBE_INDICES.chunks_exact(3).collect();
        assert_eq!(tris.len(), 12);
        for (t, tri) in tris.iter().enumerate() {
            let face = t / 2;
            for &i in tri.iter() {
                assert_eq!(i as usize / VERTICES_PER_FACE, face, "triangle {t} leaves its face");
            }
        }
    }

    #[test]
    fn every_triangle_faces_outwards() {
        // In the left-handed space used here a right-hand cross product pointing
        // along the outward normal means clockwise when seen from outside.
        for (t, tri) in CUBE_INDICES.chunks_exact(3).enumerate() {
            let (a, b, c) = (pos(tri[0]), pos(tri[1]), pos(tri[2]));
            let n = (b - a).cross(c - a);
            let outward = face_normal(t / 2);
            assert!(n.dot(outward) > 0.0, "triangle {t} {tri:?} is back-facing");
        }
    }

    #[test]
    fn faces_are_axis_aligned_unit_planes() {
        for face in 0..FACE_COUNT {
            let n = face_normal(face);
            let len2 = n.dot(n);
            assert!((len2 - 1.0).abs() < 1e-6, "face {face} normal {n:?}");
        }
    }

    #[test]
    fn texcoords_cover_unit_square_per_face() {
        for face in CUBE_VERTICES.chunks_exact(VERTICES_PER_FACE) {
            let mut uv: Vec<_> = face.iter().map(|v| (v.texcoord[0] as i32, v.texcoord[1] as i32)).collect();
            uv.sort();
            assert_eq!(uv, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        }
    }
}
