// src/gfx/resources/mod.rs
//! Material resources
//!
//! CPU-side material and texture descriptors attached to mesh render groups.

pub mod material;

// Re-export main types
pub use material::{Material, SolidTexture};
