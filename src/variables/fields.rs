//! Field keys for adjoint FEA variables.

use crate::data::boundary_store::{FieldDecl, FieldKey};
use crate::variables::layout::VariableLayout;

/// Fields stored for every point of the domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointField {
    /// Adjoint of the displacements.
    Solution,
    /// Adjoint displacements of the previous time step.
    SolutionOld,
    /// Primal (direct) displacements recorded for the adjoint sweep.
    SolutionDirect,
    /// Geometric sensitivity, one component per dimension.
    Sensitivity,
    /// Cross-term derivative from a coupled solver.
    CrossTermDerivative,
    /// Geometry cross-term derivative from a coupled solver.
    GeometryCrossTermDerivative,
    /// Adjoint of the velocities (unsteady only).
    SolutionVel,
    /// Adjoint of the accelerations (unsteady only).
    SolutionAccel,
    /// Velocity adjoint of the previous time step (unsteady only).
    SolutionOldVel,
    /// Acceleration adjoint of the previous time step (unsteady only).
    SolutionOldAccel,
    /// Dynamic contribution to the adjoint (unsteady only).
    DynamicDerivative,
    /// Dynamic contribution of the previous time step (unsteady only).
    DynamicDerivativeN,
}

impl PointField {
    /// Every point field.
    pub const ALL: [PointField; 12] = [
        PointField::Solution,
        PointField::SolutionOld,
        PointField::SolutionDirect,
        PointField::Sensitivity,
        PointField::CrossTermDerivative,
        PointField::GeometryCrossTermDerivative,
        PointField::SolutionVel,
        PointField::SolutionAccel,
        PointField::SolutionOldVel,
        PointField::SolutionOldAccel,
        PointField::DynamicDerivative,
        PointField::DynamicDerivativeN,
    ];

    /// Whether the field exists only for unsteady problems.
    pub fn is_unsteady_only(self) -> bool {
        matches!(
            self,
            PointField::SolutionVel
                | PointField::SolutionAccel
                | PointField::SolutionOldVel
                | PointField::SolutionOldAccel
                | PointField::DynamicDerivative
                | PointField::DynamicDerivativeN
        )
    }

    /// Components per point under `layout`.
    pub fn columns(self, layout: &VariableLayout) -> usize {
        match self {
            PointField::Sensitivity => layout.n_dim,
            _ => layout.n_var,
        }
    }
}

impl FieldKey for PointField {
    fn name(self) -> &'static str {
        match self {
            PointField::Solution => "Solution",
            PointField::SolutionOld => "Solution_Old",
            PointField::SolutionDirect => "Solution_Direct",
            PointField::Sensitivity => "Sensitivity",
            PointField::CrossTermDerivative => "Cross_Term_Derivative",
            PointField::GeometryCrossTermDerivative => "Geometry_CrossTerm_Derivative",
            PointField::SolutionVel => "Solution_Vel",
            PointField::SolutionAccel => "Solution_Accel",
            PointField::SolutionOldVel => "Solution_Old_Vel",
            PointField::SolutionOldAccel => "Solution_Old_Accel",
            PointField::DynamicDerivative => "Dynamic_Derivative",
            PointField::DynamicDerivativeN => "Dynamic_Derivative_n",
        }
    }
}

/// Fields that exist only on boundary vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryField {
    /// Adjoint of the tractions applied by a coupled flow solver.
    FlowTractionSensitivity,
    /// Source term added to the displacement adjoint by external solvers.
    SourceTermDispAdjoint,
}

impl BoundaryField {
    /// Every boundary field.
    pub const ALL: [BoundaryField; 2] = [
        BoundaryField::FlowTractionSensitivity,
        BoundaryField::SourceTermDispAdjoint,
    ];

    /// Store declarations for all boundary fields under `layout`.
    pub fn decls(layout: &VariableLayout) -> Vec<FieldDecl<BoundaryField>> {
        Self::ALL
            .iter()
            .map(|&key| FieldDecl {
                key,
                columns: layout.n_dim,
            })
            .collect()
    }
}

impl FieldKey for BoundaryField {
    fn name(self) -> &'static str {
        match self {
            BoundaryField::FlowTractionSensitivity => "FlowTraction_Sens",
            BoundaryField::SourceTermDispAdjoint => "SourceTerm_DispAdjoint",
        }
    }
}
