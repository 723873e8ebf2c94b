//! # Facet3D Prelude
//!
//! This module provides a convenient way to import commonly used types and
//! functions from the crate.
//!
//! ## Usage
//!
//! ```rust
//! use facet3d::prelude::*;
//!
//! let mut cube = generate_cube(2);
//! translate(&mut cube, Vector3::new(0.0, 1.0, 0.0));
//!
//! let mut node = TransformNode::from_mesh(&cube);
//! node.move_by(Vector3::new(1.0, 0.0, 0.0));
//! let aabb: BoundingBox = node.aabb();
//! assert!(aabb.contains(Vector3::new(1.0, 1.0, 0.0)));
//! ```

// Re-export geometry generation and composition
pub use crate::gfx::geometry::{
    append, append_bent_plane, generate_circle, generate_cube, generate_cylinder,
    generate_plane, generate_sphere, generate_torus, recalculate_normals, rotate,
    set_unique_material, translate, BendParams, Mesh, RenderGroup,
};

// Re-export scene object types
pub use crate::gfx::scene::{
    BoundingBox, BoundingSphere, CacheState, DirtyFlags, Pose, ShapeKind, TransformNode,
    Vertex3D,
};

// Re-export resources and errors
pub use crate::error::{GeometryError, Result};
pub use crate::gfx::resources::{Material, SolidTexture};

// Re-export math types used throughout the API
pub use cgmath::{Matrix4, Quaternion, Vector3};
