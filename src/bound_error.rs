//! BoundVarError: Unified error type for adjoint-bound public APIs
//!
//! Access to a point that is not a boundary vertex is *not* an error anywhere
//! in this crate; it is a value-level outcome (ignored write, zero read).
//! The variants below cover contract violations reported by the fallible
//! `try_*` helpers and the lifecycle checks around allocation.

use thiserror::Error;

/// Unified error type for adjoint-bound operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoundVarError {
    /// A global point index outside `0..n_point`.
    #[error("point {point} out of range (domain has {n_point} points)")]
    PointOutOfRange { point: usize, n_point: usize },
    /// A column outside the per-point dimensionality of a field.
    #[error("column {column} out of range for `{field}` ({columns} columns)")]
    ColumnOutOfRange {
        field: &'static str,
        column: usize,
        columns: usize,
    },
    /// The problem layout failed validation.
    #[error("invalid variable layout: {0}")]
    InvalidLayout(&'static str),
    /// An initial-value slice does not have `n_var` entries.
    #[error("initial value `{name}` has {found} entries, expected {expected}")]
    InitialValueLength {
        name: &'static str,
        expected: usize,
        found: usize,
    },
    /// A boundary field that the store was not declared with.
    #[error("boundary field `{0}` is not declared in this store")]
    UnknownBoundaryField(&'static str),
    /// Boundary storage was already allocated; data is left untouched.
    #[error("boundary variables already allocated for {n_vertex} vertices")]
    BoundaryAlreadyAllocated { n_vertex: usize },
    /// The number of vertices does not fit in the local index type.
    #[error("{n_vertex} vertices do not fit in a `{index_type}` local index")]
    LocalIndexOverflow {
        n_vertex: usize,
        index_type: &'static str,
    },
    /// The vertex map failed an internal consistency check.
    #[error("vertex map corrupt at point {point}: {reason}")]
    VertexMapCorrupt { point: usize, reason: &'static str },
    /// A dense buffer does not match its declared shape.
    #[error("storage shape mismatch: expected {expected} elements, found {found}")]
    StorageShapeMismatch { expected: usize, found: usize },
}
