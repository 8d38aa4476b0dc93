#![cfg(not(feature = "strict-boundary-access"))]
mod util;

use adjoint_bound::prelude::*;
use util::{allocated_vars, random_vertices, rng, steady_vars};

#[test]
#[allow(clippy::approx_constant)]
fn three_vertices_in_ten_points() {
    let mut v = allocated_vars(10, &[2, 5, 7]);
    assert_eq!(v.n_vertex(), 3);
    let map = v.vertex_map();
    assert_eq!(map.vertex_index(2), Some(0));
    assert_eq!(map.vertex_index(5), Some(1));
    assert_eq!(map.vertex_index(7), Some(2));

    v.set_flow_traction_sensitivity(5, 0, 3.14);
    assert_eq!(v.flow_traction_sensitivity(5, 0), 3.14);
    assert_eq!(v.flow_traction_sensitivity(3, 0), 0.0);
    v.set_flow_traction_sensitivity(3, 0, 9.9);
    assert_eq!(v.flow_traction_sensitivity(3, 0), 0.0);
}

#[test]
fn allocation_without_vertices_is_empty() {
    let mut v = steady_vars(10);
    assert_eq!(v.allocate_boundary_variables(), Ok(0));
    for field in BoundaryField::ALL {
        let m = v.boundary().matrix(field).unwrap();
        assert_eq!(m.rows(), 0);
        assert!(m.is_empty());
    }
    for p in 0..10 {
        v.set_source_term_disp_adjoint(p, 1, 1.0);
        assert_eq!(v.source_term_disp_adjoint(p, 1), 0.0);
        assert_eq!(v.flow_traction_sensitivity(p, 0), 0.0);
    }
}

#[test]
fn interior_writes_leave_storage_untouched() {
    let mut r = rng();
    let vertices = random_vertices(&mut r, 200, 0.2);
    let mut v = allocated_vars(200, &vertices);
    for &p in &vertices {
        v.set_flow_traction_sensitivity(p, 1, -(p as f64));
        v.set_source_term_disp_adjoint(p, 0, p as f64);
    }
    let before: Vec<Matrix<Real>> = BoundaryField::ALL
        .iter()
        .map(|&f| v.boundary().matrix(f).unwrap().clone())
        .collect();
    for p in (0..200).filter(|p| !vertices.contains(p)) {
        for dim in 0..2 {
            v.set_source_term_disp_adjoint(p, dim, -1.0);
            v.set_flow_traction_sensitivity(p, dim, -1.0);
        }
    }
    for (field, snapshot) in BoundaryField::ALL.iter().zip(&before) {
        assert_eq!(v.boundary().matrix(*field), Some(snapshot));
    }
    for &p in &vertices {
        assert_eq!(v.flow_traction_sensitivity(p, 1), -(p as f64));
        assert_eq!(v.source_term_disp_adjoint(p, 0), p as f64);
    }
}

#[test]
#[allow(clippy::approx_constant)]
fn marking_after_allocation_keeps_vertex_data() {
    let mut v = allocated_vars(10, &[2, 5, 7]);
    v.set_flow_traction_sensitivity(5, 0, 3.14);
    v.set_source_term_disp_adjoint(7, 1, 2.5);

    v.set_is_vertex(3, true);
    v.set_is_vertex(3, false);
    v.set_is_vertex(5, false);
    assert_eq!(v.mark_vertices([4, 9]), 2);

    assert_eq!(v.vertex_map().vertices().collect::<Vec<_>>(), vec![2, 5, 7]);
    assert_eq!(v.flow_traction_sensitivity(5, 0), 3.14);
    assert_eq!(v.source_term_disp_adjoint(7, 1), 2.5);
    v.set_flow_traction_sensitivity(5, 0, 1.0);
    assert_eq!(v.flow_traction_sensitivity(5, 0), 1.0);
    v.set_flow_traction_sensitivity(4, 0, 1.0);
    assert_eq!(v.flow_traction_sensitivity(4, 0), 0.0);
    assert_eq!(
        v.allocate_boundary_variables(),
        Err(BoundVarError::BoundaryAlreadyAllocated { n_vertex: 3 })
    );
}

#[test]
fn whole_domain_sweep_through_trait_object() {
    fn sweep(vars: &mut dyn AdjointFeaVariables) -> f64 {
        let n = vars.n_point();
        for p in 0..n {
            vars.set_flow_traction_sensitivity(p, 0, 1.0);
        }
        (0..n).map(|p| vars.flow_traction_sensitivity(p, 0)).sum()
    }

    let mut bound = allocated_vars(8, &[0, 3, 4]);
    assert_eq!(sweep(&mut bound), 3.0);

    let layout = VariableLayout::new(8, 2, 2, false).unwrap();
    let mut interior = DiscAdjFeaVariable::new(&[0.0; 2], &[], &[], layout).unwrap();
    assert_eq!(sweep(&mut interior), 0.0);
}

#[test]
fn access_before_allocation_matches_interior() {
    let mut v = steady_vars(5);
    v.mark_vertices([1, 2]);
    v.set_flow_traction_sensitivity(1, 0, 2.0);
    assert_eq!(v.flow_traction_sensitivity(1, 0), 0.0);
    assert_eq!(v.vertex_map().vertex_index(1), None);
    assert_eq!(v.allocate_boundary_variables(), Ok(2));
    // Nothing leaked from the pre-allocation write.
    assert_eq!(v.flow_traction_sensitivity(1, 0), 0.0);
}

#[test]
fn concurrent_reads_after_allocation() {
    let mut v = allocated_vars(64, &[1, 9, 33, 63]);
    for (i, p) in [1, 9, 33, 63].into_iter().enumerate() {
        v.set_flow_traction_sensitivity(p, 1, i as f64 + 0.5);
    }
    let v = &v;
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(move || {
                    (0..64)
                        .map(|p| v.flow_traction_sensitivity(p, 1))
                        .sum::<f64>()
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 0.5 + 1.5 + 2.5 + 3.5);
        }
    });
}

#[test]
fn unsteady_layout_from_json() {
    let layout: VariableLayout =
        serde_json::from_str(r#"{"n_point":4,"n_dim":3,"n_var":3,"unsteady":true}"#).unwrap();
    let mut v = DiscAdjFeaBoundVariable::new(&[0.0; 3], &[1.0; 3], &[0.0; 3], layout).unwrap();
    assert!(v.base().has_field(PointField::SolutionOldVel));
    assert_eq!(v.get(PointField::SolutionVel, 3, 2), 1.0);
    v.set_is_vertex(3, true);
    v.allocate_boundary_variables().unwrap();
    v.set_source_term_disp_adjoint(3, 2, 0.75);
    assert_eq!(
        v.boundary_row(BoundaryField::SourceTermDispAdjoint, 3),
        Some(&[0.0, 0.0, 0.75][..])
    );
}

#[test]
#[should_panic(expected = "out of range")]
fn bad_dimension_panics() {
    let v = allocated_vars(4, &[0]);
    let _ = v.flow_traction_sensitivity(0, 2);
}

#[test]
#[should_panic]
fn bad_point_panics() {
    let v = allocated_vars(4, &[0]);
    let _ = v.is_vertex(4);
}
