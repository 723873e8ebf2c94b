//! # Mesh Composition
//!
//! In-place edits used to assemble several generated meshes into one asset:
//! rigid placement (rotate, translate), merging with re-based indices, collapsing
//! render groups, and rebuilding smooth normals.

use cgmath::{Euler, InnerSpace, Matrix3, Rad, Vector3, Zero};

use super::{Mesh, RenderGroup};
use crate::gfx::resources::material::{Material, SolidTexture};

/// Rotate every vertex position and normal by the given Euler angles (radians,
/// applied about X, then Y, then Z).
pub fn rotate(mesh: &mut Mesh, euler_angles: Vector3<f32>) {
    let rotation = Matrix3::from(Euler {
        x: Rad(euler_angles.x),
        y: Rad(euler_angles.y),
        z: Rad(euler_angles.z),
    });

    for vertex in &mut mesh.vertices {
        vertex.position = (rotation * vertex.position_vec()).into();
        vertex.normal = (rotation * vertex.normal_vec()).into();
    }
}

/// Offset every vertex position. Normals are unchanged.
pub fn translate(mesh: &mut Mesh, offset: Vector3<f32>) {
    for vertex in &mut mesh.vertices {
        vertex.position = (vertex.position_vec() + offset).into();
    }
}

/// Append `from` to `to`.
///
/// Indices of `from` are re-based by the vertex count `to` had before the call,
/// and its render group offsets by the index count `to` had before the call.
pub fn append(to: &mut Mesh, from: &Mesh) {
    let vertex_base = to.vertices.len() as u32;
    let index_base = to.indices.len() as u32;

    to.vertices.extend_from_slice(&from.vertices);
    to.indices.extend(from.indices.iter().map(|&i| i + vertex_base));
    to.groups.extend(from.groups.iter().map(|group| RenderGroup {
        offset: group.offset + index_base,
        ..group.clone()
    }));
}

/// Replace all render groups with a single one spanning the whole index buffer
pub fn set_unique_material(mesh: &mut Mesh, material: Material, texture: SolidTexture) {
    mesh.groups = vec![RenderGroup {
        material,
        texture,
        offset: 0,
        count: mesh.indices.len() as u32,
    }];
}

/// Rebuild vertex normals as the normalized sum of the unit face normals of
/// every incident triangle. Each face counts equally regardless of its area.
///
/// Vertices touched only by degenerate triangles (or by none) keep their
/// previous normal.
pub fn recalculate_normals(mesh: &mut Mesh) {
    let mut sums = vec![Vector3::zero(); mesh.vertices.len()];

    for triangle in mesh.indices.chunks_exact(3) {
        let i0 = triangle[0] as usize;
        let i1 = triangle[1] as usize;
        let i2 = triangle[2] as usize;

        let v0 = mesh.vertices[i0].position_vec();
        let v1 = mesh.vertices[i1].position_vec();
        let v2 = mesh.vertices[i2].position_vec();

        let face_normal = (v1 - v0).cross(v2 - v0);
        if face_normal.magnitude2() <= f32::EPSILON * f32::EPSILON {
            continue;
        }
        let face_normal = face_normal.normalize();

        for &vertex_idx in &[i0, i1, i2] {
            sums[vertex_idx] += face_normal;
        }
    }

    for (vertex, sum) in mesh.vertices.iter_mut().zip(sums) {
        if sum.magnitude2() > f32::EPSILON * f32::EPSILON {
            vertex.normal = sum.normalize().into();
        }
    }
}
