//! # Primitive Shape Generation
//!
//! This module contains functions to generate common 3D primitive shapes.
//! Plane, sphere and torus are fixed parameterizations of the bent plane
//! generator; circle is a triangle fan; cube and cylinder are composed from
//! smaller meshes. All shapes are generated with unit normals and texture
//! coordinates, and carry a single render group.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use cgmath::Vector3;
use log::debug;

use super::bent_plane::{generate_bent_plane, BendParams, MIN_VERTS, MIN_VERTS_REVOLUTION};
use super::composer::{append, rotate, set_unique_material, translate};
use super::Mesh;
use crate::gfx::resources::material::{Material, SolidTexture};
use crate::gfx::scene::vertex::Vertex3D;

/// Generate a flat plane in the XZ plane, centred at the origin, facing +Y
///
/// # Arguments
/// * `width` - Width of the plane (X direction)
/// * `height` - Height of the plane (Z direction)
/// * `num_verts_width` - Vertices along the width (at least 2)
/// * `num_verts_height` - Vertices along the height (at least 2)
pub fn generate_plane(
    width: f32,
    height: f32,
    num_verts_width: u32,
    num_verts_height: u32,
) -> Mesh {
    generate_bent_plane(&BendParams::new(width, height, num_verts_width, num_verts_height))
}

/// Generate a disk in the XZ plane facing +Y
///
/// The mesh is a fan: vertex 0 is the centre, followed by `num_verts_side` rim
/// vertices at `radius * (cos θ, 0, sin θ)` for `θ = 2πi / num_verts_side`.
pub fn generate_circle(radius: f32, num_verts_side: u32) -> Mesh {
    let sides = num_verts_side.max(MIN_VERTS_REVOLUTION);
    let mut mesh = Mesh::new();

    mesh.vertices.push(Vertex3D::new(
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::unit_y(),
        [0.5, 0.5],
    ));

    for i in 0..sides {
        let (sin_a, cos_a) = (TAU * i as f32 / sides as f32).sin_cos();
        mesh.vertices.push(Vertex3D::new(
            Vector3::new(radius * cos_a, 0.0, radius * sin_a),
            Vector3::unit_y(),
            [0.5 + 0.5 * cos_a, 0.5 + 0.5 * sin_a],
        ));
    }

    // Counter-clockwise seen from +Y; the last triangle wraps to the first rim vertex
    for i in 0..sides {
        let current = 1 + i;
        let next = 1 + (i + 1) % sides;
        mesh.indices.extend_from_slice(&[0, next, current]);
    }

    set_unique_material(&mut mesh, Material::default(), SolidTexture::default());
    debug!("circle: {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());
    mesh
}

/// Generate a closed cylinder along the Y axis
///
/// # Arguments
/// * `radius` - Radius of the cylinder
/// * `height` - Height of the cylinder; it spans `-height/2..height/2` in Y
/// * `num_verts_cap` - Vertices around the circumference
/// * `num_verts_height` - Rings along the body
///
/// The body wraps its last column back to column 0 rather than duplicating a
/// seam column.
pub fn generate_cylinder(
    radius: f32,
    height: f32,
    num_verts_cap: u32,
    num_verts_height: u32,
) -> Mesh {
    let sides = num_verts_cap.max(MIN_VERTS_REVOLUTION);
    let rings = num_verts_height.max(MIN_VERTS);
    let half_height = height * 0.5;

    let mut mesh = Mesh::new();
    for i in 0..rings {
        let v = i as f32 / (rings - 1) as f32;
        let y = -half_height + height * v;

        for j in 0..sides {
            let u = j as f32 / sides as f32;
            let (sin_a, cos_a) = (TAU * u).sin_cos();
            mesh.vertices.push(Vertex3D::new(
                Vector3::new(radius * cos_a, y, radius * sin_a),
                Vector3::new(cos_a, 0.0, sin_a),
                [u, v],
            ));
        }
    }

    for i in 0..rings - 1 {
        for j in 0..sides {
            let next = (j + 1) % sides;
            let v00 = i * sides + j;
            let v01 = i * sides + next;
            let v10 = v00 + sides;
            let v11 = v01 + sides;
            mesh.indices.extend_from_slice(&[v00, v10, v01, v01, v10, v11]);
        }
    }

    let mut top = generate_circle(radius, sides);
    translate(&mut top, Vector3::new(0.0, half_height, 0.0));

    let mut bottom = generate_circle(radius, sides);
    rotate(&mut bottom, Vector3::new(PI, 0.0, 0.0));
    translate(&mut bottom, Vector3::new(0.0, -half_height, 0.0));

    append(&mut mesh, &top);
    append(&mut mesh, &bottom);
    set_unique_material(&mut mesh, Material::default(), SolidTexture::default());

    debug!("cylinder: {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());
    mesh
}

/// Generate a sphere centred at the origin with its poles on the Y axis
///
/// `num_verts_width` counts vertices around each ring including the seam
/// duplicate, so `sides + 1` closes a ring of `sides` quads.
pub fn generate_sphere(radius: f32, num_verts_width: u32, num_verts_height: u32) -> Mesh {
    let circumference = TAU * radius;
    let params = BendParams::new(circumference, circumference, num_verts_width, num_verts_height)
        .with_angle_width(TAU)
        .with_angle_radius(TAU);

    let mut mesh = generate_bent_plane(&params);
    rotate(&mut mesh, Vector3::new(-FRAC_PI_2, 0.0, 0.0));

    debug!("sphere: {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());
    mesh
}

/// Generate a torus centred at the origin, lying in the XZ plane
///
/// # Arguments
/// * `outer_radius` - Distance from the centre to the outer edge
/// * `inner_radius` - Distance from the centre to the hole's edge
/// * `num_verts_width` - Vertices around the tube (including the seam duplicate)
/// * `num_verts_height` - Vertices around the ring (including the seam duplicate)
pub fn generate_torus(
    outer_radius: f32,
    inner_radius: f32,
    num_verts_width: u32,
    num_verts_height: u32,
) -> Mesh {
    let tube_radius = (outer_radius - inner_radius).abs() * 0.5;
    let ring_radius = (outer_radius + inner_radius).abs() * 0.5;
    let params = BendParams::new(
        TAU * tube_radius,
        TAU * ring_radius,
        num_verts_width,
        num_verts_height,
    )
    .with_angle_width(TAU)
    .with_angle_height(TAU);

    // The generator sweeps the ring about X; turn that axis onto Y
    let mut mesh = generate_bent_plane(&params);
    rotate(&mut mesh, Vector3::new(0.0, 0.0, FRAC_PI_2));

    debug!("torus: {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());
    mesh
}

/// Generate a unit cube centred at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes, built from six
/// planes of `num_verts_side` x `num_verts_side` vertices each.
pub fn generate_cube(num_verts_side: u32) -> Mesh {
    // (rotation turning +Y onto the face normal, face offset)
    let faces = [
        (Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.5, 0.0)),
        (Vector3::new(PI, 0.0, 0.0), Vector3::new(0.0, -0.5, 0.0)),
        (Vector3::new(0.0, 0.0, -FRAC_PI_2), Vector3::new(0.5, 0.0, 0.0)),
        (Vector3::new(0.0, 0.0, FRAC_PI_2), Vector3::new(-0.5, 0.0, 0.0)),
        (Vector3::new(FRAC_PI_2, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.5)),
        (Vector3::new(-FRAC_PI_2, 0.0, 0.0), Vector3::new(0.0, 0.0, -0.5)),
    ];

    let mut mesh = Mesh::new();
    for (rotation, offset) in faces {
        let mut face = generate_plane(1.0, 1.0, num_verts_side, num_verts_side);
        rotate(&mut face, rotation);
        translate(&mut face, offset);
        append(&mut mesh, &face);
    }
    set_unique_material(&mut mesh, Material::default(), SolidTexture::default());

    debug!("cube: {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn assert_outward_winding(mesh: &Mesh) {
        for tri in mesh.indices.chunks(3) {
            let a = mesh.vertices[tri[0] as usize];
            let b = mesh.vertices[tri[1] as usize];
            let c = mesh.vertices[tri[2] as usize];
            let face =
                (b.position_vec() - a.position_vec()).cross(c.position_vec() - a.position_vec());
            if face.magnitude2() < 1e-10 {
                continue;
            }
            let normal = a.normal_vec() + b.normal_vec() + c.normal_vec();
            assert!(face.dot(normal) > 0.0, "triangle {:?} winds against its normals", tri);
        }
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(10.0, 4.0, 2, 2);
        assert_eq!(plane.vertex_count(), 4);
        assert_eq!(plane.triangle_count(), 2);

        let mut corners: Vec<(f32, f32)> = plane
            .vertices
            .iter()
            .map(|v| (v.position[0], v.position[2]))
            .collect();
        corners.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(corners, vec![(-5.0, -2.0), (-5.0, 2.0), (5.0, -2.0), (5.0, 2.0)]);
    }

    #[test]
    fn test_circle_generation() {
        let circle = generate_circle(2.0, 4);
        assert_eq!(circle.vertex_count(), 5);
        assert_eq!(circle.indices.len(), 12);

        let rim0 = circle.vertices[1].position;
        let rim2 = circle.vertices[3].position;
        assert!(approx_eq(rim0[0], 2.0) && approx_eq(rim0[1], 0.0) && approx_eq(rim0[2], 0.0));
        assert!(approx_eq(rim2[0], -2.0) && approx_eq(rim2[1], 0.0) && approx_eq(rim2[2], 0.0));

        // Last triangle wraps back to the first rim vertex
        assert_eq!(&circle.indices[9..12], &[0, 1, 4]);
        assert_outward_winding(&circle);
    }

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube(2);
        assert_eq!(cube.vertex_count(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.groups.len(), 1);

        for vertex in &cube.vertices {
            let p = vertex.position_vec();
            assert!(p.x.abs() <= 0.5 + EPSILON);
            assert!(p.y.abs() <= 0.5 + EPSILON);
            assert!(p.z.abs() <= 0.5 + EPSILON);
            assert!(p.dot(vertex.normal_vec()) > 0.0);
        }
        assert_outward_winding(&cube);
    }

    #[test]
    fn test_cylinder_generation() {
        let cylinder = generate_cylinder(1.0, 2.0, 8, 3);
        // Body rings plus two fans
        assert_eq!(cylinder.vertex_count(), 8 * 3 + 2 * 9);
        assert_eq!(cylinder.indices.len(), 6 * 8 * 2 + 2 * 3 * 8);
        assert!(cylinder.validate().is_ok());

        let extents = cylinder.extents();
        assert!(approx_eq(extents.min.y, -1.0) && approx_eq(extents.max.y, 1.0));
        assert_outward_winding(&cylinder);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(2.0, 17, 9);
        assert_eq!(sphere.vertex_count(), 17 * 9);
        assert_eq!(sphere.indices.len(), 6 * 16 * 8);

        for vertex in &sphere.vertices {
            let p = vertex.position_vec();
            assert!(approx_eq(p.magnitude(), 2.0));
            assert!(approx_eq(vertex.normal_vec().magnitude(), 1.0));
            assert!(p.normalize().dot(vertex.normal_vec()) > 1.0 - EPSILON);
        }

        let extents = sphere.extents();
        assert!(approx_eq(extents.min.y, -2.0) && approx_eq(extents.max.y, 2.0));
        assert_outward_winding(&sphere);
    }

    #[test]
    fn test_torus_generation() {
        let torus = generate_torus(3.0, 1.0, 13, 25);
        assert_eq!(torus.vertex_count(), 13 * 25);

        // Tube radius 1 around a ring of radius 2 in the XZ plane
        for vertex in &torus.vertices {
            let p = vertex.position_vec();
            let ring_distance = (p.x * p.x + p.z * p.z).sqrt();
            let tube_distance = ((ring_distance - 2.0).powi(2) + p.y * p.y).sqrt();
            assert!(approx_eq(tube_distance, 1.0));
        }

        let extents = torus.extents();
        assert!(approx_eq(extents.max.x, 3.0) && approx_eq(extents.max.y, 1.0));
        assert_outward_winding(&torus);
    }
}
