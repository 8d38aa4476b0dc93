#![cfg(not(feature = "strict-boundary-access"))]
use adjoint_bound::prelude::*;
use proptest::prelude::*;
use std::collections::HashMap;

/// Sequence of (point, flag) marks over a domain of `n` points.
fn marks() -> impl Strategy<Value = (usize, Vec<(usize, bool)>)> {
    (1usize..64)
        .prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, any::<bool>()), 0..128)))
}

proptest! {
    #[test]
    fn last_write_wins((n, ops) in marks()) {
        let mut map: VertexMap = VertexMap::new(n);
        let mut last = HashMap::new();
        for &(p, flag) in &ops {
            map.set_is_vertex(p, flag);
            last.insert(p, flag);
        }
        for p in 0..n {
            prop_assert_eq!(map.is_vertex(p), last.get(&p).copied().unwrap_or(false));
            // repeated queries agree
            prop_assert_eq!(map.is_vertex(p), map.is_vertex(p));
        }
    }

    #[test]
    fn build_is_a_bijection((n, ops) in marks()) {
        let mut map: VertexMap = VertexMap::new(n);
        for &(p, flag) in &ops {
            map.set_is_vertex(p, flag);
        }
        let m = map.build().unwrap();
        prop_assert_eq!(m, (0..n).filter(|&p| map.is_vertex(p)).count());
        let mut seen = vec![false; m];
        let mut prev = None;
        for p in 0..n {
            match map.vertex_index(p) {
                Some(l) => {
                    prop_assert!(map.is_vertex(p));
                    let l = l as usize;
                    prop_assert!(l < m);
                    prop_assert!(!seen[l]);
                    seen[l] = true;
                    prop_assert!(prev.map_or(true, |q| l > q));
                    prev = Some(l);
                }
                None => prop_assert!(!map.is_vertex(p)),
            }
        }
        prop_assert!(seen.into_iter().all(|s| s));
        prop_assert!(map.validate_invariants().is_ok());
    }

    #[test]
    fn guarded_round_trip(
        (n, ops) in marks(),
        dim in 0usize..3,
        value in -1.0e6f64..1.0e6,
    ) {
        let layout = VariableLayout::new(n, 3, 3, false).unwrap();
        let mut v = DiscAdjFeaBoundVariable::new(&[0.0; 3], &[], &[], layout).unwrap();
        for &(p, flag) in &ops {
            v.set_is_vertex(p, flag);
        }
        v.allocate_boundary_variables().unwrap();
        for p in 0..n {
            v.set_flow_traction_sensitivity(p, dim, value);
            let expected = if v.is_vertex(p) { value } else { 0.0 };
            prop_assert_eq!(v.flow_traction_sensitivity(p, dim), expected);
            prop_assert_eq!(v.source_term_disp_adjoint(p, dim), 0.0);
        }
    }
}
