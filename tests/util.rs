#![allow(dead_code)]
use adjoint_bound::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(0xDEADBEEF)
}

/// Steady 2D variables over `n_point` points, boundary not yet allocated.
pub fn steady_vars(n_point: usize) -> DiscAdjFeaBoundVariable {
    let layout = VariableLayout::new(n_point, 2, 2, false).unwrap();
    DiscAdjFeaBoundVariable::new(&[0.0, 0.0], &[], &[], layout).unwrap()
}

/// Steady 2D variables with `vertices` marked and boundary storage allocated.
pub fn allocated_vars(n_point: usize, vertices: &[usize]) -> DiscAdjFeaBoundVariable {
    let mut v = steady_vars(n_point);
    v.mark_vertices(vertices.iter().copied());
    v.allocate_boundary_variables().unwrap();
    v
}

/// Random boundary subset of `0..n_point`, sorted ascending.
pub fn random_vertices<R: Rng>(rng: &mut R, n_point: usize, prob: f64) -> Vec<usize> {
    (0..n_point).filter(|_| rng.gen_bool(prob)).collect()
}
