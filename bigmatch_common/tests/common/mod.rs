#![allow(dead_code)]

/// Assert that a condition holds, with detailed error message
#[macro_export]
macro_rules! assert_with_context {
    ($cond:expr, $context:expr) => {
        if !$cond {
            panic!(
                "Assertion failed: {}\nContext: {}",
                stringify!($cond),
                $context
            );
        }
    };
}

/// Assert that an invariant holds
#[macro_export]
macro_rules! assert_invariant {
    ($cond:expr, $invariant_name:expr) => {
        if !$cond {
            panic!(
                "Invariant violated: {}\nCondition: {}",
                $invariant_name,
                stringify!($cond)
            );
        }
    };
}

/// Number of ordered pairs `(a, b)` with an edge `a -> b`.
pub fn count_adjacent_pairs(graph: &bigmatch_common::InputGraph) -> usize {
    let n = graph.size();
    (0..n)
        .flat_map(|a| (0..n).map(move |b| (a, b)))
        .filter(|&(a, b)| graph.adjacent(a, b))
        .count()
}
