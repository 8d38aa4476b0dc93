//! Accessor interface shared by adjoint FEA variable containers.
//!
//! Solvers talk to point variables only through [`AdjointFeaVariables`]. The
//! boundary accessors have interior defaults (writes ignored, reads zero,
//! no point is a vertex), so a container without boundary storage satisfies
//! the whole interface and callers can sweep the domain uniformly.

use crate::Real;
use crate::bound_error::BoundVarError;
use crate::variables::fields::PointField;
use crate::variables::layout::VariableLayout;

/// Per-point state of a discrete-adjoint structural solver.
pub trait AdjointFeaVariables {
    /// Layout the container was built for.
    fn layout(&self) -> &VariableLayout;

    /// Value of `field` at `(point, column)`; zero for fields the problem
    /// does not carry.
    fn get(&self, field: PointField, point: usize, column: usize) -> Real;

    /// Store `value` for `field` at `(point, column)`; ignored for fields the
    /// problem does not carry.
    fn set(&mut self, field: PointField, point: usize, column: usize, value: Real);

    /// Number of points in the domain.
    fn n_point(&self) -> usize {
        self.layout().n_point
    }

    /// Adjoint displacement component `var` at `point`.
    fn solution(&self, point: usize, var: usize) -> Real {
        self.get(PointField::Solution, point, var)
    }

    /// Geometric sensitivity component `dim` at `point`.
    fn sensitivity(&self, point: usize, dim: usize) -> Real {
        self.get(PointField::Sensitivity, point, dim)
    }

    /// Set the geometric sensitivity component `dim` at `point`.
    fn set_sensitivity(&mut self, point: usize, dim: usize, value: Real) {
        self.set(PointField::Sensitivity, point, dim, value);
    }

    /// Whether `point` lies on the boundary.
    fn is_vertex(&self, _point: usize) -> bool {
        false
    }

    /// Record whether `point` lies on the boundary.
    ///
    /// Changes made after [`allocate_boundary_variables`] are ignored.
    ///
    /// [`allocate_boundary_variables`]: Self::allocate_boundary_variables
    fn set_is_vertex(&mut self, _point: usize, _is_vertex: bool) {}

    /// Allocate boundary-only storage for the points marked so far.
    ///
    /// Returns the number of boundary vertices.
    fn allocate_boundary_variables(&mut self) -> Result<usize, BoundVarError> {
        Ok(0)
    }

    /// Adjoint of the flow traction, component `dim`, at `point`.
    fn flow_traction_sensitivity(&self, _point: usize, _dim: usize) -> Real {
        0.0
    }

    /// Set the adjoint of the flow traction, component `dim`, at `point`.
    fn set_flow_traction_sensitivity(&mut self, _point: usize, _dim: usize, _value: Real) {}

    /// External source term on the displacement adjoint at `point`.
    fn source_term_disp_adjoint(&self, _point: usize, _dim: usize) -> Real {
        0.0
    }

    /// Set the external source term on the displacement adjoint at `point`.
    fn set_source_term_disp_adjoint(&mut self, _point: usize, _dim: usize, _value: Real) {}
}
