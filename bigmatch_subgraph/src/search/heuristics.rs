use std::cmp::Reverse;

use rand::seq::SliceRandom;
use rand_pcg::Pcg64Mcg;

use crate::state::State;

/// The unfixed pattern vertex with the smallest domain. Ties go to the
/// highest pattern degree, then to the lowest index. `None` once every
/// vertex is fixed.
pub(crate) fn smallest_domain_first(state: &State, degrees: &[usize]) -> Option<usize> {
    (0..state.len())
        .filter(|&u| !state.is_fixed(u))
        .min_by_key(|&u| (state.domains().count(u), Reverse(degrees[u]), u))
}

/// Candidate values of `u` in ascending order, or shuffled once restarts
/// have begun.
pub(crate) fn value_order(state: &State, u: usize, rng: Option<&mut Pcg64Mcg>) -> Vec<usize> {
    let mut values: Vec<usize> = state.domains().get(u).ones().collect();
    if let Some(rng) = rng {
        values.shuffle(rng);
    }
    values
}
