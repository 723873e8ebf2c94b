// src/lib.rs
//! Facet3D
//!
//! Scene-object geometry layer: a bent-plane surface generator, the primitive
//! shapes built on it, mesh composition utilities, and transform nodes that
//! cache model/view matrices and bounding volumes.

pub mod error;
pub mod gfx;
pub mod prelude;

// Re-export main types for convenience
pub use error::{GeometryError, Result};
pub use gfx::geometry::Mesh;
pub use gfx::scene::TransformNode;
