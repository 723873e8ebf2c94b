//! # Procedural Geometry Generation
//!
//! This module generates meshes for common 3D primitive shapes from a single
//! bent-plane surface generator, and provides the composition utilities used to
//! merge several generated meshes into one asset.
//!
//! ## Supported Primitives
//!
//! - **Plane**: Flat grid of configurable size and density
//! - **Circle**: Triangle fan disk
//! - **Cube**: Six planes merged into one mesh
//! - **Cylinder**: Wrapped body grid plus two circle caps
//! - **Sphere**: Bent plane revolved about two axes
//! - **Torus**: Bent plane closed along both dimensions
//!
//! ## Usage
//!
//! ```rust
//! use facet3d::gfx::geometry::{generate_cube, generate_plane, generate_sphere};
//!
//! // Generate a unit cube
//! let cube = generate_cube(2);
//!
//! // Generate a sphere of radius 1 with 33 columns and 17 rows
//! let sphere = generate_sphere(1.0, 33, 17);
//!
//! // Generate a 10x10 plane with 5x5 vertices
//! let plane = generate_plane(10.0, 10.0, 5, 5);
//! assert_eq!(plane.vertex_count(), 25);
//! ```

pub mod bent_plane;
pub mod composer;
pub mod primitives;

pub use bent_plane::{append_bent_plane, generate_bent_plane, BendParams};
pub use composer::{append, recalculate_normals, rotate, set_unique_material, translate};
pub use primitives::*;

use cgmath::{InnerSpace, Vector3};

use crate::error::{GeometryError, Result};
use crate::gfx::resources::material::{Material, SolidTexture};
use crate::gfx::scene::bounds::BoundingBox;
use crate::gfx::scene::vertex::Vertex3D;

/// A contiguous range of the index buffer drawn with one material and texture.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderGroup {
    pub material: Material,
    pub texture: SolidTexture,
    /// First index of the range
    pub offset: u32,
    /// Number of indices in the range
    pub count: u32,
}

/// Generated geometry ready for upload by a rendering backend.
///
/// Vertices keep generation order and are addressed by index. The index buffer
/// holds triangles (its length is a multiple of 3). Each render group describes
/// one sub-range of the index buffer; storing groups as one list keeps the
/// per-group material, texture, offset and count arrays the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex3D>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
    pub groups: Vec<RenderGroup>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this mesh
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = Vector3<f32>> + '_ {
        self.vertices.iter().map(Vertex3D::position_vec)
    }

    /// Per-group materials, parallel to [`Mesh::textures`], [`Mesh::indices_offsets`]
    /// and [`Mesh::indices_counts`]
    pub fn materials(&self) -> Vec<&Material> {
        self.groups.iter().map(|g| &g.material).collect()
    }

    pub fn textures(&self) -> Vec<SolidTexture> {
        self.groups.iter().map(|g| g.texture).collect()
    }

    pub fn indices_offsets(&self) -> Vec<u32> {
        self.groups.iter().map(|g| g.offset).collect()
    }

    pub fn indices_counts(&self) -> Vec<u32> {
        self.groups.iter().map(|g| g.count).collect()
    }

    /// Packed vertex buffer, 32 bytes per vertex
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Packed u32 index buffer
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Local-space bounds of all vertex positions. An empty mesh has a zero box.
    pub fn extents(&self) -> BoundingBox {
        BoundingBox::from_points(self.positions())
    }

    /// Largest distance from the local origin to any vertex
    pub fn max_vertex_distance(&self) -> f32 {
        self.positions()
            .map(|p| p.magnitude())
            .fold(0.0, f32::max)
    }

    /// Check the structural invariants a renderer relies on.
    ///
    /// Generated meshes always pass; this is meant for meshes built elsewhere.
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(GeometryError::IndexCountNotTriangles {
                count: self.indices.len(),
            });
        }

        for (group_idx, group) in self.groups.iter().enumerate() {
            let start = group.offset as usize;
            let end = start + group.count as usize;
            if end > self.indices.len() {
                return Err(GeometryError::GroupOutOfRange {
                    group: group_idx,
                    offset: group.offset,
                    count: group.count,
                    index_count: self.indices.len(),
                });
            }

            if let Some(&index) = self.indices[start..end]
                .iter()
                .find(|&&i| i as usize >= self.vertices.len())
            {
                return Err(GeometryError::IndexOutOfRange {
                    group: group_idx,
                    index,
                    vertex_count: self.vertices.len(),
                });
            }
        }

        if let Some(vertex) = self.vertices.iter().position(|v| {
            v.position
                .iter()
                .chain(v.normal.iter())
                .any(|c| !c.is_finite())
        }) {
            return Err(GeometryError::NonFiniteVertex { vertex });
        }

        Ok(())
    }
}
