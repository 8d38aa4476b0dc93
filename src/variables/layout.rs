//! Problem layout shared by every per-point variable container.

use serde::{Deserialize, Serialize};

use crate::bound_error::BoundVarError;

/// Size and time-dependence of an adjoint FEA problem.
///
/// Usually deserialised from the solver configuration:
///
/// ```rust
/// # fn try_main() -> Result<(), Box<dyn std::error::Error>> {
/// use adjoint_bound::variables::VariableLayout;
/// let layout: VariableLayout =
///     serde_json::from_str(r#"{ "n_point": 8, "n_dim": 2, "n_var": 2 }"#)?;
/// layout.validate()?;
/// assert!(!layout.unsteady);
/// # Ok(())
/// # }
/// # try_main().unwrap();
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableLayout {
    /// Number of points in the domain.
    pub n_point: usize,
    /// Spatial dimension (2 or 3).
    pub n_dim: usize,
    /// Number of solution components per point.
    pub n_var: usize,
    /// Whether velocity/acceleration adjoints are carried.
    #[serde(default)]
    pub unsteady: bool,
}

impl VariableLayout {
    /// Build and validate a layout.
    pub fn new(
        n_point: usize,
        n_dim: usize,
        n_var: usize,
        unsteady: bool,
    ) -> Result<Self, BoundVarError> {
        let layout = Self {
            n_point,
            n_dim,
            n_var,
            unsteady,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Check the layout describes a usable problem.
    pub fn validate(&self) -> Result<(), BoundVarError> {
        if self.n_point == 0 {
            return Err(BoundVarError::InvalidLayout("n_point must be positive"));
        }
        if !matches!(self.n_dim, 2 | 3) {
            return Err(BoundVarError::InvalidLayout("n_dim must be 2 or 3"));
        }
        if self.n_var == 0 {
            return Err(BoundVarError::InvalidLayout("n_var must be positive"));
        }
        Ok(())
    }
}
