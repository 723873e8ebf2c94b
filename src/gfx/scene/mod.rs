//! # Scene Object Module
//!
//! Per-object spatial state consumed by a renderer each frame: the packed
//! vertex record, bounding volumes, and the cached [`TransformNode`].
//!
//! ## Key Components
//!
//! - [`TransformNode`] - Pose of one scene object with lazily derived matrices and volumes
//! - [`ShapeKind`] - How a node's local extent is computed (mesh bounds, light cone, light sphere)
//! - [`BoundingBox`] / [`BoundingSphere`] - OOBB, AABB and sphere volumes
//! - [`Vertex3D`] - Packed position, normal and texture coordinate
//!
//! ## Usage
//!
//! ```
//! use cgmath::Vector3;
//! use facet3d::gfx::geometry::generate_cube;
//! use facet3d::gfx::scene::TransformNode;
//!
//! let cube = generate_cube(2);
//! let mut node = TransformNode::from_mesh(&cube);
//! node.set_scale_factor(Vector3::new(2.0, 2.0, 2.0));
//! let aabb = node.aabb();
//! assert!((aabb.max.x - 1.0).abs() < 1e-5);
//! assert!((aabb.min.z + 1.0).abs() < 1e-5);
//! ```

pub mod bounds;
pub mod transform;
pub mod vertex;

// Re-export main types
pub use bounds::{BoundingBox, BoundingSphere};
pub use transform::{CacheState, DirtyFlags, Pose, ShapeKind, TransformNode};
pub use vertex::Vertex3D;
