//! Data module: vertex map, boundary store and dense field storage
#![warn(missing_docs)]

pub mod boundary_store;
pub mod matrix;
pub mod storage;
pub mod vertex_map;

pub use crate::debug_invariants::DebugInvariants;

pub use boundary_store::{BoundaryStore, FieldDecl, FieldKey};
pub use matrix::Matrix;
pub use storage::{Storage, VecStorage};
pub use vertex_map::{VertexIndex, VertexMap};
