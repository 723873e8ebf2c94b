//! # Bent Plane Surface Generator
//!
//! Every curved primitive in this crate is a rectangular vertex grid whose
//! dimensions are optionally bent into circular arcs. The patch lies in the XZ
//! plane (width along X, height along Z) with its flat normal along +Y.
//!
//! Three bends are available:
//!
//! - `angle_width` curves the width into an arc of radius `width / angle_width`
//!   around an axis parallel to Z.
//! - `angle_height` curves the height into an arc of radius `height / angle_height`
//!   around an axis parallel to X. Together with a full width bend this yields a
//!   torus.
//! - `angle_radius` revolves the height about the width bend's axis: each row's
//!   ring radius follows a meridian of radius `height / |angle_radius|`, so a full
//!   width bend plus `angle_radius = 2π` yields a sphere.
//!
//! Curved patches are re-centred so their bounds stay centred on the local origin.
//! A bend of exactly 2π leaves the first and last column (or row) at the same
//! position; request `sides + 1` vertices to close such a seam.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use cgmath::{InnerSpace, Vector3};
use log::{debug, warn};

use super::{Mesh, RenderGroup};
use crate::gfx::resources::material::{Material, SolidTexture};
use crate::gfx::scene::vertex::Vertex3D;

/// Fewest vertices along any grid dimension
pub const MIN_VERTS: u32 = 2;
/// Fewest vertices along a dimension bent through a full revolution
pub const MIN_VERTS_REVOLUTION: u32 = 3;

const FULL_TURN_EPSILON: f32 = 1e-4;

/// Parameters of a bent plane patch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendParams {
    pub width: f32,
    pub height: f32,
    /// RGBA colour of the patch's material and texture
    pub color: [f32; 4],
    pub angle_width: f32,
    pub angle_height: f32,
    pub angle_radius: f32,
    pub num_verts_width: u32,
    pub num_verts_height: u32,
}

impl Default for BendParams {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            color: [0.8, 0.8, 0.8, 1.0],
            angle_width: 0.0,
            angle_height: 0.0,
            angle_radius: 0.0,
            num_verts_width: MIN_VERTS,
            num_verts_height: MIN_VERTS,
        }
    }
}

impl BendParams {
    /// Flat patch of the given size and density
    pub fn new(width: f32, height: f32, num_verts_width: u32, num_verts_height: u32) -> Self {
        Self {
            width,
            height,
            num_verts_width,
            num_verts_height,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_angle_width(mut self, angle: f32) -> Self {
        self.angle_width = angle;
        self
    }

    pub fn with_angle_height(mut self, angle: f32) -> Self {
        self.angle_height = angle;
        self
    }

    pub fn with_angle_radius(mut self, angle: f32) -> Self {
        self.angle_radius = angle;
        self
    }

    /// Returns a copy with vertex counts raised to their minimums and sizes made
    /// non-negative.
    pub fn clamped(&self) -> Self {
        let mut params = *self;

        let min_width = if is_full_turn(self.angle_width) {
            MIN_VERTS_REVOLUTION
        } else {
            MIN_VERTS
        };
        let min_height = if is_full_turn(self.angle_height) || is_full_turn(self.angle_radius) {
            MIN_VERTS_REVOLUTION
        } else {
            MIN_VERTS
        };

        if params.num_verts_width < min_width {
            warn!(
                "bent plane: num_verts_width {} raised to {}",
                params.num_verts_width, min_width
            );
            params.num_verts_width = min_width;
        }
        if params.num_verts_height < min_height {
            warn!(
                "bent plane: num_verts_height {} raised to {}",
                params.num_verts_height, min_height
            );
            params.num_verts_height = min_height;
        }
        if params.width < 0.0 || params.height < 0.0 {
            warn!(
                "bent plane: negative size {}x{} replaced by its magnitude",
                params.width, params.height
            );
            params.width = params.width.abs();
            params.height = params.height.abs();
        }

        params
    }
}

fn is_full_turn(angle: f32) -> bool {
    angle.abs() >= TAU - FULL_TURN_EPSILON
}

/// A dimension of length `length` curved through `angle` radians.
#[derive(Debug, Clone, Copy)]
struct Bend {
    angle: f32,
    radius: f32,
    /// Shift that centres the arc's bounds on the origin
    offset: f32,
}

impl Bend {
    fn new(length: f32, angle: f32) -> Option<Self> {
        if angle == 0.0 {
            return None;
        }
        let radius = length / angle;
        Some(Self {
            angle,
            radius,
            offset: radius * (1.0 + ((PI + angle) * 0.5).sin()) * 0.5,
        })
    }
}

/// Placement of one grid row before the height bend
struct RowProfile {
    /// Scale applied to the row's width coordinates
    ring_scale: f32,
    /// Position along the height axis
    z: f32,
    /// (sin, cos) of the meridian angle when the row sits on a revolution
    meridian: Option<(f32, f32)>,
}

fn row_profile(params: &BendParams, meridian_radius: Option<f32>, s: f32) -> RowProfile {
    match meridian_radius {
        Some(radius) => {
            let psi = FRAC_PI_2 + params.angle_radius.abs() * (s - 0.5) * 0.5;
            let (sin_psi, cos_psi) = psi.sin_cos();
            RowProfile {
                ring_scale: sin_psi,
                z: -radius * cos_psi,
                meridian: Some((sin_psi, cos_psi)),
            }
        }
        None => RowProfile {
            ring_scale: 1.0,
            z: params.height * (s - 0.5),
            meridian: None,
        },
    }
}

fn normalize_or_up(v: Vector3<f32>) -> Vector3<f32> {
    if v.magnitude2() > f32::EPSILON * f32::EPSILON {
        v.normalize()
    } else {
        Vector3::unit_y()
    }
}

/// Append a bent plane patch to `mesh`.
///
/// The new vertices and indices follow whatever the mesh already holds; the
/// mesh's render groups are then replaced by a single group covering the whole
/// index buffer, using a default material and a 1x1 texture in the patch colour.
pub fn append_bent_plane(mesh: &mut Mesh, params: &BendParams) {
    let params = params.clamped();
    let nw = params.num_verts_width;
    let nh = params.num_verts_height;
    let edges_w = nw - 1;
    let edges_h = nh - 1;
    let base = mesh.vertices.len() as u32;

    let width_bend = Bend::new(params.width, params.angle_width);
    let height_bend = Bend::new(params.height, params.angle_height);
    let meridian_radius =
        (params.angle_radius != 0.0).then(|| params.height / params.angle_radius.abs());

    mesh.vertices.reserve((nw * nh) as usize);
    for i in 0..nh {
        let s = i as f32 / edges_h as f32;
        let row = row_profile(&params, meridian_radius, s);

        for j in 0..nw {
            let t = j as f32 / edges_w as f32;

            // Point and normal of the (possibly curved) row, in the XY plane
            let (x, y, ring_normal) = match width_bend {
                Some(bend) => {
                    let (sin_phi, cos_phi) = (bend.angle * (t - 0.5)).sin_cos();
                    (
                        row.ring_scale * bend.radius * sin_phi,
                        row.ring_scale * bend.radius * cos_phi - bend.offset,
                        (sin_phi, cos_phi),
                    )
                }
                None => (row.ring_scale * params.width * (t - 0.5), 0.0, (0.0, 1.0)),
            };

            let normal = match (row.meridian, width_bend, meridian_radius) {
                (Some((sin_psi, cos_psi)), Some(bend), Some(radius)) => normalize_or_up(
                    Vector3::new(
                        sin_psi * ring_normal.0 * radius,
                        sin_psi * ring_normal.1 * radius,
                        -cos_psi * bend.radius.abs(),
                    ),
                ),
                _ => Vector3::new(ring_normal.0, ring_normal.1, 0.0),
            };

            let (position, normal) = match height_bend {
                Some(bend) => {
                    let theta = if bend.radius != 0.0 { row.z / bend.radius } else { 0.0 };
                    let (sin_theta, cos_theta) = theta.sin_cos();
                    let reach = bend.radius + y;
                    (
                        Vector3::new(x, reach * cos_theta - bend.offset, reach * sin_theta),
                        Vector3::new(
                            normal.x,
                            normal.y * cos_theta - normal.z * sin_theta,
                            normal.y * sin_theta + normal.z * cos_theta,
                        ),
                    )
                }
                None => (Vector3::new(x, y, row.z), normal),
            };

            mesh.vertices.push(Vertex3D::new(position, normal, [t, s]));
        }
    }

    mesh.indices.reserve((6 * edges_w * edges_h) as usize);
    for i in 0..edges_h {
        for j in 0..edges_w {
            let v00 = base + i * nw + j;
            let v01 = v00 + 1;
            let v10 = v00 + nw;
            let v11 = v10 + 1;

            // Counter-clockwise seen from the normal side
            mesh.indices.extend_from_slice(&[v00, v10, v01, v01, v10, v11]);
        }
    }

    let [r, g, b, a] = params.color;
    mesh.groups = vec![RenderGroup {
        material: Material::default().with_color(r, g, b).with_alpha(a),
        texture: SolidTexture::from_color(params.color),
        offset: 0,
        count: mesh.indices.len() as u32,
    }];

    debug!(
        "bent plane {}x{} (angles {:.3}/{:.3}/{:.3}): {} vertices, {} triangles",
        nw,
        nh,
        params.angle_width,
        params.angle_height,
        params.angle_radius,
        nw * nh,
        edges_w * edges_h * 2
    );
}

/// Generate a standalone bent plane patch
pub fn generate_bent_plane(params: &BendParams) -> Mesh {
    let mut mesh = Mesh::new();
    append_bent_plane(&mut mesh, params);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn assert_centred(mesh: &Mesh) {
        let extents = mesh.extents();
        for axis in 0..3 {
            assert!(
                approx_eq(extents.min[axis], -extents.max[axis]),
                "axis {} not centred: {:?}",
                axis,
                extents
            );
        }
    }

    fn assert_unit_normals(mesh: &Mesh) {
        for vertex in &mesh.vertices {
            assert!(approx_eq(vertex.normal_vec().magnitude(), 1.0));
        }
    }

    fn assert_winding_follows_normals(mesh: &Mesh) {
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
            let face =
                (b.position_vec() - a.position_vec()).cross(c.position_vec() - a.position_vec());
            let normals = a.normal_vec() + b.normal_vec() + c.normal_vec();
            assert!(face.dot(normals) > 0.0, "triangle {:?} winds against its normals", tri);
        }
    }

    #[test]
    fn test_flat_patch_lies_in_plane() {
        let mesh = generate_bent_plane(&BendParams::new(3.0, 2.0, 4, 5));

        for vertex in &mesh.vertices {
            assert_eq!(vertex.position[1], 0.0);
            assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
        }
        let extents = mesh.extents();
        assert!(approx_eq(extents.min.x, -1.5) && approx_eq(extents.max.x, 1.5));
        assert!(approx_eq(extents.min.z, -1.0) && approx_eq(extents.max.z, 1.0));
    }

    #[test]
    fn test_grid_size_law() {
        for nw in 2..6 {
            for nh in 2..6 {
                let mesh = generate_bent_plane(&BendParams::new(1.0, 1.0, nw, nh));
                assert_eq!(mesh.vertex_count(), (nw * nh) as usize);
                assert_eq!(mesh.indices.len(), (6 * (nw - 1) * (nh - 1)) as usize);
                assert!(mesh
                    .indices
                    .iter()
                    .all(|&i| (i as usize) < mesh.vertex_count()));
            }
        }
    }

    #[test]
    fn test_vertex_counts_are_clamped() {
        let mesh = generate_bent_plane(&BendParams::new(1.0, 1.0, 0, 1));
        assert_eq!(mesh.vertex_count(), 4);

        let ring = generate_bent_plane(&BendParams::new(1.0, 1.0, 2, 2).with_angle_width(TAU));
        assert_eq!(ring.vertex_count(), 6);
    }

    #[test]
    fn test_flat_winding_faces_normal() {
        let mesh = generate_bent_plane(&BendParams::new(2.0, 2.0, 3, 3));
        for tri in mesh.indices.chunks(3) {
            let a = mesh.vertices[tri[0] as usize].position_vec();
            let b = mesh.vertices[tri[1] as usize].position_vec();
            let c = mesh.vertices[tri[2] as usize].position_vec();
            assert!((b - a).cross(c - a).y > 0.0);
        }
    }

    #[test]
    fn test_width_bend_is_centred_arc() {
        let angle = FRAC_PI_2;
        let width = 2.0;
        let mesh = generate_bent_plane(&BendParams::new(width, 1.0, 9, 2).with_angle_width(angle));
        let radius = width / angle;

        // Every vertex keeps the arc radius from the bend axis
        let axis_y = -radius * (1.0 + (angle * 0.5).cos()) * 0.5;
        for vertex in &mesh.vertices {
            let dx = vertex.position[0];
            let dy = vertex.position[1] - axis_y;
            assert!(approx_eq((dx * dx + dy * dy).sqrt(), radius));
            let n = vertex.normal_vec();
            assert!(approx_eq(n.magnitude(), 1.0));
        }

        let extents = mesh.extents();
        assert!(approx_eq(extents.min.y, -extents.max.y));
        assert!(approx_eq(extents.min.x, -extents.max.x));
    }

    #[test]
    fn test_full_turn_closes_seam() {
        let mesh = generate_bent_plane(&BendParams::new(TAU, 1.0, 9, 2).with_angle_width(TAU));
        let first = mesh.vertices[0].position;
        let last = mesh.vertices[8].position;
        for axis in 0..3 {
            assert!(approx_eq(first[axis], last[axis]));
        }
    }

    #[test]
    fn test_patch_has_single_render_group() {
        let params = BendParams::new(1.0, 1.0, 3, 3).with_color([1.0, 0.0, 0.0, 1.0]);
        let mesh = generate_bent_plane(&params);
        assert_eq!(mesh.groups.len(), 1);
        assert_eq!(mesh.indices_offsets(), vec![0]);
        assert_eq!(mesh.indices_counts(), vec![mesh.indices.len() as u32]);
        assert_eq!(mesh.textures()[0].rgba, [255, 0, 0, 255]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_partial_height_bend_is_centred() {
        let angle = FRAC_PI_2;
        let height = 2.0;
        let mesh =
            generate_bent_plane(&BendParams::new(1.0, height, 3, 9).with_angle_height(angle));

        assert_centred(&mesh);
        assert_unit_normals(&mesh);
        assert_winding_follows_normals(&mesh);

        // The sagitta is split evenly above and below the origin
        let radius = height / angle;
        let sagitta = radius * (1.0 - (angle * 0.5).cos());
        assert!(approx_eq(mesh.extents().max.y, sagitta * 0.5));
        // Middle row bulges towards the normal side
        assert!(mesh.vertices[13].position[1] > mesh.vertices[1].position[1]);
    }

    #[test]
    fn test_negative_width_bend_curves_away_from_normal() {
        let mesh =
            generate_bent_plane(&BendParams::new(2.0, 1.0, 9, 3).with_angle_width(-FRAC_PI_2));

        assert_centred(&mesh);
        assert_unit_normals(&mesh);
        assert_winding_follows_normals(&mesh);
        assert!(mesh.vertices[4].position[1] < mesh.vertices[0].position[1]);
        assert_eq!(mesh.vertices[4].normal, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_negative_height_bend_curves_away_from_normal() {
        let mesh =
            generate_bent_plane(&BendParams::new(1.0, 2.0, 3, 9).with_angle_height(-FRAC_PI_2));

        assert_centred(&mesh);
        assert_unit_normals(&mesh);
        assert_winding_follows_normals(&mesh);
        assert!(mesh.vertices[13].position[1] < mesh.vertices[1].position[1]);
    }

    #[test]
    fn test_partial_revolution_without_width_bend() {
        let mesh =
            generate_bent_plane(&BendParams::new(2.0, 1.0, 5, 7).with_angle_radius(FRAC_PI_2));

        assert_centred(&mesh);
        assert_unit_normals(&mesh);
        assert_winding_follows_normals(&mesh);

        // Rows shrink towards the ends of the meridian
        let extents = mesh.extents();
        assert!(approx_eq(extents.max.x, 1.0));
        assert!(mesh.vertices[4].position[0] < extents.max.x);
    }

    #[test]
    fn test_partial_revolution_is_spherical_zone() {
        let params = BendParams::new(TAU, PI, 17, 5)
            .with_angle_width(TAU)
            .with_angle_radius(PI);
        let mesh = generate_bent_plane(&params);

        assert_centred(&mesh);
        assert_unit_normals(&mesh);
        assert_winding_follows_normals(&mesh);

        // Unit sphere band between polar angles π/4 and 3π/4
        let rim = (PI * 0.25).cos();
        for vertex in &mesh.vertices {
            let p = vertex.position_vec();
            assert!(approx_eq(p.magnitude(), 1.0));
            assert!(p.z.abs() <= rim + EPSILON);
            assert!((vertex.normal_vec() - p).magnitude() < 1e-3);
        }
        assert!(approx_eq(mesh.extents().max.z, rim));
    }
}
