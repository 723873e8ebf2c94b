//! # Graphics Module
//!
//! This module contains the geometry and scene-object functionality of the
//! Facet3D crate. It produces data for a rendering backend but performs no
//! rendering itself.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - Bent plane generator, primitive shapes, mesh composition
//! - **Scene Objects** ([`scene`]) - Transform nodes, bounding volumes, vertex format
//! - **Resources** ([`resources`]) - Material and texture descriptors
//!
//! ## Data Flow
//!
//! A primitive generator fills a [`Mesh`]; the composer optionally merges several
//! meshes into one asset; the asset's extents feed a [`TransformNode`] that the
//! renderer queries every frame for matrices and bounding volumes.
//!
//! [`Mesh`]: geometry::Mesh
//! [`TransformNode`]: scene::TransformNode

pub mod geometry;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use geometry::Mesh;
pub use scene::TransformNode;
