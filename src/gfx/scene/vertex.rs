//! # Vertex Data Structures
//!
//! This module defines the packed vertex record produced by the geometry
//! generators and consumed by a rendering backend.

use cgmath::Vector3;

/// A 3D vertex with position, normal and texture coordinate data.
///
/// # Memory Layout
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout. Tightly packed, a vertex occupies 32 bytes: 12 for the position,
/// 12 for the normal and 8 for the texture coordinate.
///
/// # Examples
///
/// ```
/// use facet3d::gfx::scene::vertex::Vertex3D;
///
/// let vertex = Vertex3D {
///     position: [0.0, 1.0, 0.0],
///     normal: [0.0, 1.0, 0.0],
///     uv: [0.5, 0.5],
/// };
/// assert_eq!(std::mem::size_of_val(&vertex), 32);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
    /// Texture coordinate [u, v]
    pub uv: [f32; 2],
}

/// Describes one attribute of [`Vertex3D`] for a backend building its vertex layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub shader_location: u32,
    pub offset: usize,
    pub components: usize,
}

impl Vertex3D {
    /// Size of one packed vertex in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Vertex3D>();

    /// Attribute layout: position at location 0, normal at 1, uv at 2.
    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute {
            shader_location: 0,
            offset: 0,
            components: 3,
        },
        VertexAttribute {
            shader_location: 1,
            offset: std::mem::size_of::<[f32; 3]>(),
            components: 3,
        },
        VertexAttribute {
            shader_location: 2,
            offset: std::mem::size_of::<[f32; 6]>(),
            components: 2,
        },
    ];

    pub fn new(position: Vector3<f32>, normal: Vector3<f32>, uv: [f32; 2]) -> Self {
        Self {
            position: position.into(),
            normal: normal.into(),
            uv,
        }
    }

    pub fn position_vec(&self) -> Vector3<f32> {
        Vector3::from(self.position)
    }

    pub fn normal_vec(&self) -> Vector3<f32> {
        Vector3::from(self.normal)
    }
}
