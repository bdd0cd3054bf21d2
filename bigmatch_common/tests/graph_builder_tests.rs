#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use bigmatch_common::{InputGraph, SCENARIO_TEST_CASES, scenario};
use quickcheck::{Arbitrary, Gen, quickcheck};

mod common;

#[derive(Clone, Debug)]
enum BuildOp {
    Edge(usize, usize),
    Directed(usize, usize, bool),
    Resize(usize),
}

impl Arbitrary for BuildOp {
    fn arbitrary(g: &mut Gen) -> Self {
        let a = usize::arbitrary(g) % 8;
        let b = usize::arbitrary(g) % 8;
        match u8::arbitrary(g) % 5 {
            0 => BuildOp::Resize(1 + usize::arbitrary(g) % 8),
            1 | 2 => BuildOp::Edge(a, b),
            _ => BuildOp::Directed(a, b, bool::arbitrary(g)),
        }
    }
}

fn apply(ops: &[BuildOp]) -> InputGraph {
    let mut graph = InputGraph::new(4, false, true);
    for op in ops {
        // Out-of-range endpoints are rejected and leave the graph untouched.
        let _ = match *op {
            BuildOp::Edge(a, b) => graph.add_edge(a, b),
            BuildOp::Directed(a, b, labelled) => {
                graph.add_directed_edge(a, b, if labelled { "x" } else { "" })
            }
            BuildOp::Resize(n) => {
                graph.resize(n);
                Ok(())
            }
        };
    }
    graph
}

quickcheck! {
    fn prop_edge_count_matches_adjacency(ops: Vec<BuildOp>) -> bool {
        let graph = apply(&ops);
        graph.number_of_directed_edges() == common::count_adjacent_pairs(&graph)
    }

    fn prop_degrees_sum_to_edge_count(ops: Vec<BuildOp>) -> bool {
        let graph = apply(&ops);
        let total: usize = (0..graph.size()).map(|v| graph.degree(v)).sum();
        total == graph.number_of_directed_edges()
    }

    fn prop_edges_stay_in_range(ops: Vec<BuildOp>) -> bool {
        let graph = apply(&ops);
        let ok = graph.edges().all(|(a, b, _)| a < graph.size() && b < graph.size());
        ok
    }

    fn prop_loopy_iff_self_loop(ops: Vec<BuildOp>) -> bool {
        let graph = apply(&ops);
        let ok = graph.loopy() == graph.edges().any(|(a, b, _)| a == b);
        ok
    }
}

#[test]
fn scenario_names_are_unique() {
    let mut names: Vec<_> = SCENARIO_TEST_CASES.iter().map(|c| c.name).collect();
    names.sort_unstable();
    let before = names.len();
    names.dedup();
    assert_invariant!(names.len() == before, "scenario names are unique");
}

#[test]
fn scenarios_are_well_formed() {
    for case in SCENARIO_TEST_CASES.iter() {
        assert_with_context!(
            case.pattern.edges().all(|(a, b, _)| a < case.pattern.size() && b < case.pattern.size()),
            case.name
        );
        assert_with_context!(
            !case.config.count_solutions || case.config.restarts == bigmatch_common::RestartPolicy::None,
            case.name
        );
    }
}

#[test]
fn link_scenario_counts_anchor_in_degree() {
    let case = scenario("link_anchor").expect("link scenario exists");
    assert_eq!(case.pattern.in_degree(1), 1);
    assert_eq!(case.pattern.out_degree(0), 0);
    assert_eq!(case.target.vertex_from_name("L1_x"), Some(0));
}
