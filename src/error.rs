//! Error types for mesh validation.
//!
//! Generation and composition never fail. Validation exists for meshes that
//! arrive from outside the crate (a loader, a file cache) and must be checked
//! before they are composed or attached to a transform node.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("index buffer length {count} is not a multiple of 3")]
    IndexCountNotTriangles { count: usize },

    #[error("render group {group} references vertex {index} of a {vertex_count}-vertex mesh")]
    IndexOutOfRange {
        group: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("render group {group} spans {offset}..{offset}+{count}, beyond {index_count} indices")]
    GroupOutOfRange {
        group: usize,
        offset: u32,
        count: u32,
        index_count: usize,
    },

    #[error("vertex {vertex} has a non-finite position or normal")]
    NonFiniteVertex { vertex: usize },
}

pub type Result<T> = std::result::Result<T, GeometryError>;
