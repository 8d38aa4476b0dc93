#![cfg_attr(docsrs, feature(doc_cfg))]
//! # adjoint-bound
//!
//! adjoint-bound stores per-point state of a discrete-adjoint structural (FEA)
//! solver where some fields exist only on boundary points. Interior points pay
//! for a membership flag and a compact index; boundary points get dense,
//! row-per-vertex storage; callers keep addressing everything by global point
//! index.
//!
//! ## Features
//! - [`VertexMap`](data::vertex_map::VertexMap): boundary membership over a
//!   dense point domain with an explicit build (freeze) step that numbers the
//!   vertices compactly.
//! - [`BoundaryStore`](data::boundary_store::BoundaryStore): fields allocated
//!   only once the vertex set is final, with guarded accessors that ignore
//!   writes to, and read zero from, non-vertex points.
//! - [`DiscAdjFeaVariable`](variables::DiscAdjFeaVariable) and
//!   [`DiscAdjFeaBoundVariable`](variables::DiscAdjFeaBoundVariable) behind the
//!   common [`AdjointFeaVariables`](variables::AdjointFeaVariables) interface.
//!
//! ## Lifecycle
//!
//! 1. Construct the container; base fields are allocated for every point.
//! 2. Mark boundary points with `set_is_vertex` (any order, last write wins).
//! 3. Call `allocate_boundary_variables` exactly once. A second call returns
//!    [`BoundVarError::BoundaryAlreadyAllocated`](bound_error::BoundVarError)
//!    and leaves the stored data alone.
//! 4. The vertex set is frozen from here on: `set_is_vertex` calls that would
//!    change a flag are logged and ignored.
//!
//! ## Cargo features
//! - `check-invariants`: validate the vertex map after every build in release
//!   builds too (logged, or fatal with `strict-invariants`).
//! - `strict-boundary-access`: in debug builds, panic on writes to non-vertex
//!   points instead of ignoring them.
//!
//! ## Concurrency
//!
//! Marking and allocation take `&mut self`. Once allocated, containers are
//! `Send + Sync` and may be read from many threads through shared
//! references; writes need exclusive access.

pub mod bound_error;
pub mod data;
pub mod debug_invariants;
pub mod variables;

pub use debug_invariants::DebugInvariants;

/// Floating-point type of all stored field values.
pub type Real = f64;

static_assertions::assert_impl_all!(variables::DiscAdjFeaBoundVariable: Send, Sync);
static_assertions::assert_impl_all!(data::VertexMap: Send, Sync);

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::Real;
    pub use crate::bound_error::BoundVarError;
    pub use crate::data::boundary_store::{BoundaryStore, FieldDecl, FieldKey};
    pub use crate::data::matrix::Matrix;
    pub use crate::data::vertex_map::{VertexIndex, VertexMap};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::variables::{
        AdjointFeaVariables, BoundaryField, DiscAdjFeaBoundVariable, DiscAdjFeaVariable,
        PointField, VariableLayout,
    };
}
