//! Adjoint FEA per-point variable containers.
#![warn(missing_docs)]

pub mod fea;
pub mod fea_bound;
pub mod fields;
pub mod layout;
pub mod traits;

pub use fea::DiscAdjFeaVariable;
pub use fea_bound::DiscAdjFeaBoundVariable;
pub use fields::{BoundaryField, PointField};
pub use layout::VariableLayout;
pub use traits::AdjointFeaVariables;
