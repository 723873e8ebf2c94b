//! Shape report
//!
//! Builds every primitive, validates it, attaches a transform node and logs the
//! resulting buffers and bounding volumes.
//!
//! Run with `RUST_LOG=debug` to also see the generators' own logging.

use std::f32::consts::FRAC_PI_4;

use anyhow::{Context, Result};
use cgmath::{Deg, Quaternion, Rotation3, Vector3};
use log::info;

use facet3d::prelude::*;

fn as_array(v: Vector3<f32>) -> [f32; 3] {
    v.into()
}

fn report(name: &str, mesh: &Mesh) -> Result<()> {
    mesh.validate()
        .with_context(|| format!("generated {} mesh is malformed", name))?;

    let mut node = TransformNode::from_mesh(mesh);
    node.set_position(Vector3::new(1.0, 2.0, -3.0));
    node.rotate(Quaternion::from_angle_y(Deg(30.0)));
    node.scale(Vector3::new(2.0, 1.0, 0.5));

    let oobb = node.oobb();
    let aabb = node.aabb();
    let sphere = node.bounding_sphere();

    info!(
        "{:<8} {:>6} vertices {:>6} triangles {:>7} bytes | oobb {:?}..{:?} | aabb {:?}..{:?} \
         | radius {:.3}",
        name,
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.vertex_bytes().len() + mesh.index_bytes().len(),
        as_array(oobb.min),
        as_array(oobb.max),
        as_array(aabb.min),
        as_array(aabb.max),
        sphere.radius
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let shapes = [
        ("plane", generate_plane(10.0, 4.0, 6, 3)),
        ("circle", generate_circle(2.0, 24)),
        ("cube", generate_cube(3)),
        ("cylinder", generate_cylinder(1.0, 3.0, 24, 4)),
        ("sphere", generate_sphere(1.5, 33, 17)),
        ("torus", generate_torus(2.0, 1.0, 25, 49)),
    ];

    for (name, mesh) in &shapes {
        report(name, mesh)?;
    }

    // A spot light volume pointed at the origin
    let mut light = TransformNode::new(ShapeKind::ConeExtent {
        cutoff: FRAC_PI_4,
        range: 8.0,
    });
    light.set_position(Vector3::new(0.0, 6.0, 6.0));
    light.look_at(Vector3::new(0.0, 0.0, 0.0));
    let aabb = light.aabb();
    info!(
        "spot     aabb {:?}..{:?} | radius {:.3}",
        as_array(aabb.min),
        as_array(aabb.max),
        light.bounding_sphere().radius
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_accepts_every_primitive() {
        assert_eq!(as_array(Vector3::new(1.0, -2.0, 3.5)), [1.0, -2.0, 3.5]);
        report("cube", &generate_cube(2)).unwrap();
        report("torus", &generate_torus(2.0, 1.0, 9, 17)).unwrap();
    }
}
