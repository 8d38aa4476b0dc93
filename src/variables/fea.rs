//! DiscAdjFeaVariable: always-present per-point fields of the structural
//! discrete-adjoint solver.
//!
//! Every field is a dense `[n_point, columns]` matrix allocated in the
//! constructor. Velocity and acceleration fields exist only for unsteady
//! layouts; accessing them on a steady problem reads zero and ignores writes.

use crate::Real;
use crate::bound_error::BoundVarError;
use crate::data::matrix::Matrix;
use crate::variables::fields::PointField;
use crate::variables::layout::VariableLayout;
use crate::variables::traits::AdjointFeaVariables;

/// Base adjoint FEA variable container.
#[derive(Clone, Debug)]
pub struct DiscAdjFeaVariable {
    layout: VariableLayout,
    solution: Matrix<Real>,
    solution_old: Matrix<Real>,
    solution_direct: Matrix<Real>,
    sensitivity: Matrix<Real>,
    cross_term_derivative: Matrix<Real>,
    geometry_cross_term_derivative: Matrix<Real>,
    dynamic: Option<DynamicFields>,
}

/// Fields carried only by unsteady problems.
#[derive(Clone, Debug)]
struct DynamicFields {
    solution_vel: Matrix<Real>,
    solution_accel: Matrix<Real>,
    solution_old_vel: Matrix<Real>,
    solution_old_accel: Matrix<Real>,
    dynamic_derivative: Matrix<Real>,
    dynamic_derivative_n: Matrix<Real>,
}

fn check_len(name: &'static str, values: &[Real], expected: usize) -> Result<(), BoundVarError> {
    if values.len() != expected {
        return Err(BoundVarError::InitialValueLength {
            name,
            expected,
            found: values.len(),
        });
    }
    Ok(())
}

fn broadcast(n_point: usize, init: &[Real]) -> Result<Matrix<Real>, BoundVarError> {
    let mut m = Matrix::filled(n_point, init.len(), 0.0);
    m.fill_rows(init)?;
    Ok(m)
}

impl DiscAdjFeaVariable {
    /// Allocate every always-present field at full domain size.
    ///
    /// `disp` initialises the displacement adjoint of every point; `vel` and
    /// `accel` initialise the velocity/acceleration adjoints and are only
    /// checked and used when `layout.unsteady`. Each must hold `n_var`
    /// entries.
    pub fn new(
        disp: &[Real],
        vel: &[Real],
        accel: &[Real],
        layout: VariableLayout,
    ) -> Result<Self, BoundVarError> {
        layout.validate()?;
        let VariableLayout {
            n_point,
            n_dim,
            n_var,
            unsteady,
        } = layout;
        check_len("disp", disp, n_var)?;

        let dynamic = if unsteady {
            check_len("vel", vel, n_var)?;
            check_len("accel", accel, n_var)?;
            let solution_vel = broadcast(n_point, vel)?;
            let solution_accel = broadcast(n_point, accel)?;
            Some(DynamicFields {
                solution_old_vel: solution_vel.clone(),
                solution_old_accel: solution_accel.clone(),
                solution_vel,
                solution_accel,
                dynamic_derivative: Matrix::filled(n_point, n_var, 0.0),
                dynamic_derivative_n: Matrix::filled(n_point, n_var, 0.0),
            })
        } else {
            None
        };

        let solution = broadcast(n_point, disp)?;
        log::debug!(
            "adjoint FEA variables: {n_point} points, {n_var} vars, {n_dim}D, unsteady={unsteady}"
        );
        Ok(Self {
            layout,
            solution_old: solution.clone(),
            solution,
            solution_direct: Matrix::filled(n_point, n_var, 0.0),
            sensitivity: Matrix::filled(n_point, n_dim, 0.0),
            cross_term_derivative: Matrix::filled(n_point, n_var, 0.0),
            geometry_cross_term_derivative: Matrix::filled(n_point, n_dim, 0.0),
            dynamic,
        })
    }

    /// Whether `field` is carried by this problem.
    pub fn has_field(&self, field: PointField) -> bool {
        self.matrix(field).is_some()
    }

    /// Matrix backing `field`, if the problem carries it.
    pub fn matrix(&self, field: PointField) -> Option<&Matrix<Real>> {
        let dynamic = self.dynamic.as_ref();
        match field {
            PointField::Solution => Some(&self.solution),
            PointField::SolutionOld => Some(&self.solution_old),
            PointField::SolutionDirect => Some(&self.solution_direct),
            PointField::Sensitivity => Some(&self.sensitivity),
            PointField::CrossTermDerivative => Some(&self.cross_term_derivative),
            PointField::GeometryCrossTermDerivative => Some(&self.geometry_cross_term_derivative),
            PointField::SolutionVel => dynamic.map(|d| &d.solution_vel),
            PointField::SolutionAccel => dynamic.map(|d| &d.solution_accel),
            PointField::SolutionOldVel => dynamic.map(|d| &d.solution_old_vel),
            PointField::SolutionOldAccel => dynamic.map(|d| &d.solution_old_accel),
            PointField::DynamicDerivative => dynamic.map(|d| &d.dynamic_derivative),
            PointField::DynamicDerivativeN => dynamic.map(|d| &d.dynamic_derivative_n),
        }
    }

    fn matrix_mut(&mut self, field: PointField) -> Option<&mut Matrix<Real>> {
        let dynamic = self.dynamic.as_mut();
        match field {
            PointField::Solution => Some(&mut self.solution),
            PointField::SolutionOld => Some(&mut self.solution_old),
            PointField::SolutionDirect => Some(&mut self.solution_direct),
            PointField::Sensitivity => Some(&mut self.sensitivity),
            PointField::CrossTermDerivative => Some(&mut self.cross_term_derivative),
            PointField::GeometryCrossTermDerivative => {
                Some(&mut self.geometry_cross_term_derivative)
            }
            PointField::SolutionVel => dynamic.map(|d| &mut d.solution_vel),
            PointField::SolutionAccel => dynamic.map(|d| &mut d.solution_accel),
            PointField::SolutionOldVel => dynamic.map(|d| &mut d.solution_old_vel),
            PointField::SolutionOldAccel => dynamic.map(|d| &mut d.solution_old_accel),
            PointField::DynamicDerivative => dynamic.map(|d| &mut d.dynamic_derivative),
            PointField::DynamicDerivativeN => dynamic.map(|d| &mut d.dynamic_derivative_n),
        }
    }

    /// All components of `field` at `point`, if the problem carries it.
    ///
    /// # Panics
    /// Panics if `point >= n_point`.
    pub fn row(&self, field: PointField, point: usize) -> Option<&[Real]> {
        self.matrix(field).map(|m| m.row(point))
    }

    /// Overwrite all components of `field` at `point`.
    ///
    /// Ignored if the problem does not carry `field`.
    ///
    /// # Errors
    /// `StorageShapeMismatch` if `values` has the wrong length,
    /// `PointOutOfRange` if `point >= n_point`.
    pub fn set_row(
        &mut self,
        field: PointField,
        point: usize,
        values: &[Real],
    ) -> Result<(), BoundVarError> {
        match self.matrix_mut(field) {
            Some(m) => m.write_row(point, values),
            None => Ok(()),
        }
    }

    /// Shift the time level: copy the current adjoint solution (and, for
    /// unsteady problems, velocity and acceleration) into the `Old` fields
    /// and the dynamic derivative into its previous-step slot.
    pub fn set_solution_old(&mut self) {
        self.solution_old.copy_from(&self.solution);
        if let Some(d) = self.dynamic.as_mut() {
            d.solution_old_vel.copy_from(&d.solution_vel);
            d.solution_old_accel.copy_from(&d.solution_accel);
            d.dynamic_derivative_n.copy_from(&d.dynamic_derivative);
        }
    }

    /// Zero the geometric sensitivity of every point.
    pub fn clear_sensitivity(&mut self) {
        self.sensitivity.fill(0.0);
    }
}

impl AdjointFeaVariables for DiscAdjFeaVariable {
    fn layout(&self) -> &VariableLayout {
        &self.layout
    }

    fn get(&self, field: PointField, point: usize, column: usize) -> Real {
        self.matrix(field).map_or(0.0, |m| *m.at(point, column))
    }

    fn set(&mut self, field: PointField, point: usize, column: usize, value: Real) {
        if let Some(m) = self.matrix_mut(field) {
            *m.at_mut(point, column) = value;
        }
    }
}
