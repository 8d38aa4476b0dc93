//! DiscAdjFeaBoundVariable: adjoint FEA variables with boundary-only fields.
//!
//! Wraps a [`DiscAdjFeaVariable`] and adds a [`BoundaryStore`] holding the
//! flow-traction sensitivity and the external displacement-adjoint source
//! term. Construction is two-phase:
//!
//! 1. [`new`](DiscAdjFeaBoundVariable::new) allocates the base fields for the
//!    whole domain; no boundary storage exists yet.
//! 2. After geometry code has marked the boundary with
//!    [`set_is_vertex`](AdjointFeaVariables::set_is_vertex),
//!    [`allocate_boundary_variables`](AdjointFeaVariables::allocate_boundary_variables)
//!    numbers the vertices and allocates one row per vertex. The vertex set
//!    is frozen from then on; later re-marks are ignored.
//!
//! ```rust
//! # fn try_main() -> Result<(), adjoint_bound::bound_error::BoundVarError> {
//! use adjoint_bound::prelude::*;
//!
//! let layout = VariableLayout::new(10, 2, 2, false)?;
//! let mut vars = DiscAdjFeaBoundVariable::new(&[0.0; 2], &[], &[], layout)?;
//! for p in [2, 5, 7] {
//!     vars.set_is_vertex(p, true);
//! }
//! assert_eq!(vars.allocate_boundary_variables()?, 3);
//!
//! vars.set_flow_traction_sensitivity(5, 0, 3.14);
//! vars.set_flow_traction_sensitivity(3, 0, 9.9); // interior: ignored
//! assert_eq!(vars.flow_traction_sensitivity(5, 0), 3.14);
//! assert_eq!(vars.flow_traction_sensitivity(3, 0), 0.0);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "strict-boundary-access"))]
//! # try_main().unwrap();
//! ```

use crate::Real;
use crate::bound_error::BoundVarError;
use crate::data::boundary_store::BoundaryStore;
use crate::data::vertex_map::VertexMap;
use crate::variables::fea::DiscAdjFeaVariable;
use crate::variables::fields::{BoundaryField, PointField};
use crate::variables::layout::VariableLayout;
use crate::variables::traits::AdjointFeaVariables;

/// Adjoint FEA variables plus boundary-only sensitivities.
#[derive(Clone, Debug)]
pub struct DiscAdjFeaBoundVariable {
    base: DiscAdjFeaVariable,
    boundary: BoundaryStore<BoundaryField, Real>,
}

impl DiscAdjFeaBoundVariable {
    /// Allocate the base fields; boundary fields wait for
    /// [`allocate_boundary_variables`](AdjointFeaVariables::allocate_boundary_variables).
    ///
    /// See [`DiscAdjFeaVariable::new`] for the meaning of the initial values.
    pub fn new(
        disp: &[Real],
        vel: &[Real],
        accel: &[Real],
        layout: VariableLayout,
    ) -> Result<Self, BoundVarError> {
        let base = DiscAdjFeaVariable::new(disp, vel, accel, layout)?;
        let boundary = BoundaryStore::new(layout.n_point, &BoundaryField::decls(&layout));
        Ok(Self { base, boundary })
    }

    /// The always-present fields.
    pub fn base(&self) -> &DiscAdjFeaVariable {
        &self.base
    }

    /// Mutable access to the always-present fields.
    pub fn base_mut(&mut self) -> &mut DiscAdjFeaVariable {
        &mut self.base
    }

    /// The boundary vertex map.
    pub fn vertex_map(&self) -> &VertexMap {
        self.boundary.vertex_map()
    }

    /// Read-only view of the boundary store.
    pub fn boundary(&self) -> &BoundaryStore<BoundaryField, Real> {
        &self.boundary
    }

    /// Mark every point yielded by `points` as a boundary vertex. Returns how
    /// many were refused because boundary storage is already allocated.
    pub fn mark_vertices<It>(&mut self, points: It) -> usize
    where
        It: IntoIterator<Item = usize>,
    {
        self.boundary.mark_vertices(points)
    }

    /// Number of boundary vertices with storage (zero before allocation).
    pub fn n_vertex(&self) -> usize {
        self.boundary.n_vertex()
    }

    /// Whether boundary storage has been allocated.
    pub fn is_boundary_allocated(&self) -> bool {
        self.boundary.is_allocated()
    }

    /// All components of a boundary field at `point`, if it has storage.
    pub fn boundary_row(&self, field: BoundaryField, point: usize) -> Option<&[Real]> {
        self.boundary.row(field, point)
    }

    /// Copy a boundary field at `point` into `dst` (zeros for interior
    /// points); see [`BoundaryStore::read_row`].
    pub fn read_boundary_row(
        &self,
        field: BoundaryField,
        point: usize,
        dst: &mut [Real],
    ) -> Result<bool, BoundVarError> {
        self.boundary.read_row(field, point, dst)
    }

    /// Fallible read of a boundary field; see [`BoundaryStore::try_get`].
    pub fn try_boundary_value(
        &self,
        field: BoundaryField,
        point: usize,
        dim: usize,
    ) -> Result<Real, BoundVarError> {
        self.boundary.try_get(field, point, dim)
    }

    /// Fallible write of a boundary field; see [`BoundaryStore::try_set`].
    pub fn try_set_boundary_value(
        &mut self,
        field: BoundaryField,
        point: usize,
        dim: usize,
        value: Real,
    ) -> Result<bool, BoundVarError> {
        self.boundary.try_set(field, point, dim, value)
    }

    /// Zero every boundary value, keeping the vertex set and storage.
    pub fn clear_boundary_variables(&mut self) {
        self.boundary.clear();
    }
}

impl AdjointFeaVariables for DiscAdjFeaBoundVariable {
    fn layout(&self) -> &VariableLayout {
        self.base.layout()
    }

    fn get(&self, field: PointField, point: usize, column: usize) -> Real {
        self.base.get(field, point, column)
    }

    fn set(&mut self, field: PointField, point: usize, column: usize, value: Real) {
        self.base.set(field, point, column, value);
    }

    fn is_vertex(&self, point: usize) -> bool {
        self.boundary.is_vertex(point)
    }

    fn set_is_vertex(&mut self, point: usize, is_vertex: bool) {
        self.boundary.set_is_vertex(point, is_vertex);
    }

    fn allocate_boundary_variables(&mut self) -> Result<usize, BoundVarError> {
        self.boundary.allocate()
    }

    #[inline]
    fn flow_traction_sensitivity(&self, point: usize, dim: usize) -> Real {
        self.boundary.get(BoundaryField::FlowTractionSensitivity, point, dim)
    }

    #[inline]
    fn set_flow_traction_sensitivity(&mut self, point: usize, dim: usize, value: Real) {
        self.boundary.set(BoundaryField::FlowTractionSensitivity, point, dim, value);
    }

    #[inline]
    fn source_term_disp_adjoint(&self, point: usize, dim: usize) -> Real {
        self.boundary.get(BoundaryField::SourceTermDispAdjoint, point, dim)
    }

    #[inline]
    fn set_source_term_disp_adjoint(&mut self, point: usize, dim: usize, value: Real) {
        self.boundary.set(BoundaryField::SourceTermDispAdjoint, point, dim, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(n_point: usize, n_dim: usize) -> DiscAdjFeaBoundVariable {
        let layout = VariableLayout::new(n_point, n_dim, n_dim, false).unwrap();
        DiscAdjFeaBoundVariable::new(&vec![0.0; n_dim], &[], &[], layout).unwrap()
    }

    #[test]
    fn no_boundary_storage_before_allocation() {
        let mut v = vars(6, 3);
        v.mark_vertices([0, 4]);
        assert!(v.is_vertex(4));
        assert!(!v.is_boundary_allocated());
        assert_eq!(v.n_vertex(), 0);
        assert!(v.boundary().matrix(BoundaryField::SourceTermDispAdjoint).is_none());
        assert_eq!(v.source_term_disp_adjoint(4, 2), 0.0);
    }

    #[test]
    fn fields_do_not_alias() {
        let mut v = vars(4, 2);
        v.mark_vertices([1, 3]);
        v.allocate_boundary_variables().unwrap();
        v.set_flow_traction_sensitivity(3, 1, 1.5);
        v.set_source_term_disp_adjoint(3, 1, -2.0);
        assert_eq!(v.flow_traction_sensitivity(3, 1), 1.5);
        assert_eq!(v.source_term_disp_adjoint(3, 1), -2.0);
        assert_eq!(v.flow_traction_sensitivity(1, 1), 0.0);
        assert_eq!(
            v.boundary_row(BoundaryField::SourceTermDispAdjoint, 3),
            Some(&[0.0, -2.0][..])
        );
        let mut traction = [1.0; 2];
        assert_eq!(
            v.read_boundary_row(BoundaryField::FlowTractionSensitivity, 2, &mut traction),
            Ok(false)
        );
        assert_eq!(traction, [0.0; 2]);
    }

    #[test]
    fn base_fields_are_unaffected_by_membership() {
        let mut v = vars(3, 2);
        v.set_sensitivity(0, 0, 4.0);
        v.set(PointField::SolutionDirect, 2, 1, 1.0);
        v.allocate_boundary_variables().unwrap();
        assert_eq!(v.sensitivity(0, 0), 4.0);
        assert_eq!(v.base().get(PointField::SolutionDirect, 2, 1), 1.0);
    }

    #[test]
    fn double_allocation_keeps_data() {
        let mut v = vars(3, 2);
        v.set_is_vertex(2, true);
        assert_eq!(v.allocate_boundary_variables(), Ok(1));
        v.set_source_term_disp_adjoint(2, 0, 6.0);
        assert!(matches!(
            v.allocate_boundary_variables(),
            Err(BoundVarError::BoundaryAlreadyAllocated { n_vertex: 1 })
        ));
        assert_eq!(v.source_term_disp_adjoint(2, 0), 6.0);
    }

    #[test]
    fn re_marking_after_allocation_is_ignored() {
        let mut v = vars(10, 2);
        assert_eq!(v.mark_vertices([2, 5, 7]), 0);
        v.allocate_boundary_variables().unwrap();
        v.set_flow_traction_sensitivity(5, 0, 3.5);
        v.set_is_vertex(3, true);
        v.set_is_vertex(3, false);
        v.set_is_vertex(7, false);
        assert!(!v.is_vertex(3));
        assert!(v.is_vertex(7));
        assert_eq!(v.mark_vertices([0, 5]), 1);
        assert_eq!(v.flow_traction_sensitivity(5, 0), 3.5);
        v.set_flow_traction_sensitivity(5, 0, 1.0);
        assert_eq!(v.flow_traction_sensitivity(5, 0), 1.0);
        assert!(v.vertex_map().is_built());
    }

    #[test]
    fn clear_boundary_keeps_vertices() {
        let mut v = vars(3, 2);
        v.set_is_vertex(0, true);
        v.allocate_boundary_variables().unwrap();
        v.set_flow_traction_sensitivity(0, 0, 1.0);
        v.clear_boundary_variables();
        assert_eq!(v.flow_traction_sensitivity(0, 0), 0.0);
        assert_eq!(v.n_vertex(), 1);
        assert_eq!(
            v.try_boundary_value(BoundaryField::FlowTractionSensitivity, 0, 2),
            Err(BoundVarError::ColumnOutOfRange {
                field: "FlowTraction_Sens",
                column: 2,
                columns: 2
            })
        );
        assert_eq!(
            v.try_set_boundary_value(BoundaryField::FlowTractionSensitivity, 0, 1, 2.0),
            Ok(true)
        );
    }
}
