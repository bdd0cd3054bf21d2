//! Common test cases and definitions for bigmatch.
//!
//! This module defines small pattern and target graphs with known solution
//! counts, and the collection of scenarios run by the solver's test suites.

use crate::{ANCHOR_LABEL, Config, GraphError, InputGraph, Injectivity, LINK_LABEL};

/// A complete test case definition.
#[derive(Debug, Clone)]
pub struct TestCase {
    /// The name of the test case.
    pub name: &'static str,
    /// The configuration for the search.
    pub config: Config,
    /// The graph to embed.
    pub pattern: &'static InputGraph,
    /// The graph to embed into.
    pub target: &'static InputGraph,
    /// The expected number of solutions.
    pub expected_solutions: u64,
}

/// Build an undirected, unlabelled graph.
pub fn undirected(size: usize, edges: &[(usize, usize)]) -> Result<InputGraph, GraphError> {
    let mut graph = InputGraph::new(size, false, false);
    for &(a, b) in edges {
        graph.add_edge(a, b)?;
    }
    Ok(graph)
}

/// Build a directed, unlabelled graph.
pub fn directed(size: usize, edges: &[(usize, usize)]) -> Result<InputGraph, GraphError> {
    let mut graph = InputGraph::new(size, false, false);
    for &(a, b) in edges {
        graph.add_directed_edge(a, b, "")?;
    }
    Ok(graph)
}

/// Every ordered pair of distinct vertices is an edge.
pub fn complete_directed(size: usize) -> Result<InputGraph, GraphError> {
    let mut graph = InputGraph::new(size, false, false);
    for a in 0..size {
        for b in (0..size).filter(|&b| b != a) {
            graph.add_directed_edge(a, b, "")?;
        }
    }
    Ok(graph)
}

/// An undirected cycle on `size` vertices.
pub fn cycle(size: usize) -> Result<InputGraph, GraphError> {
    let edges: Vec<_> = (0..size).map(|i| (i, (i + 1) % size)).collect();
    undirected(size, &edges)
}

/// `ROOT0 -> A`, `ROOT1 -> B`, with both roots and both children sharing a
/// label so that the swap is a valid bigraph match.
pub fn two_roots() -> Result<InputGraph, GraphError> {
    let mut graph = InputGraph::new(4, true, false);
    for (v, name, label) in [(0, "ROOT0", "R"), (1, "ROOT1", "R"), (2, "A", "M"), (3, "B", "M")] {
        graph.set_vertex_name(v, name)?;
        graph.set_vertex_label(v, label)?;
    }
    graph.add_directed_edge(0, 2, "")?;
    graph.add_directed_edge(1, 3, "")?;
    Ok(graph)
}

/// A single LINK port named `link` tied to an ANCHOR named `anchor`.
pub fn link_anchor(link: &str, anchor: &str) -> Result<InputGraph, GraphError> {
    let mut graph = InputGraph::new(2, true, false);
    graph.set_vertex_label(0, LINK_LABEL)?;
    graph.set_vertex_name(0, link)?;
    graph.set_vertex_label(1, ANCHOR_LABEL)?;
    graph.set_vertex_name(1, anchor)?;
    graph.add_directed_edge(0, 1, "")?;
    Ok(graph)
}

// #####################
// PATTERNS
// #####################
lazy_static::lazy_static! {
    static ref EMPTY: InputGraph = InputGraph::new(0, false, false);
    static ref DIRECTED_TRIANGLE: InputGraph =
        directed(3, &[(0, 1), (1, 2), (2, 0)]).expect("Failed to build directed triangle");
    static ref SELF_LOOP: InputGraph =
        directed(1, &[(0, 0)]).expect("Failed to build self loop");
    static ref PATH3: InputGraph =
        undirected(3, &[(0, 1), (1, 2)]).expect("Failed to build path");
    static ref CYCLE6: InputGraph = cycle(6).expect("Failed to build 6-cycle");
    static ref TWO_ROOTS_PATTERN: InputGraph = two_roots().expect("Failed to build roots pattern");
    static ref LINK_PATTERN: InputGraph =
        link_anchor("L1_a", "A").expect("Failed to build link pattern");
}

// #####################
// TARGETS
// #####################
lazy_static::lazy_static! {
    static ref K4_DIRECTED: InputGraph = complete_directed(4).expect("Failed to build K4");
    static ref DIRECTED_PATH3: InputGraph =
        directed(3, &[(0, 1), (1, 2)]).expect("Failed to build directed path");
    static ref K4_UNDIRECTED: InputGraph = undirected(
        4,
        &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)],
    ).expect("Failed to build K4");
    static ref CYCLE4: InputGraph = cycle(4).expect("Failed to build 4-cycle");
    static ref CYCLE3: InputGraph = cycle(3).expect("Failed to build triangle");
    static ref TWO_ROOTS_TARGET: InputGraph = two_roots().expect("Failed to build roots target");
    static ref LINK_TARGET: InputGraph =
        link_anchor("L1_x", "A'").expect("Failed to build link target");
}

// #####################
// TEST CASES
// #####################
lazy_static::lazy_static! {
    pub static ref BASIC_TEST_CASES: Vec<TestCase> = vec![
        TestCase {
            name: "triangle_in_k4",
            config: Config::builder().count_solutions(true).build(),
            pattern: &DIRECTED_TRIANGLE,
            target: &K4_DIRECTED,
            expected_solutions: 24,
        },
        TestCase {
            name: "induced_triangle_in_k4",
            config: Config::builder().count_solutions(true).induced(true).build(),
            pattern: &DIRECTED_TRIANGLE,
            target: &K4_DIRECTED,
            expected_solutions: 0,
        },
        TestCase {
            name: "self_loop_in_path",
            config: Config::builder().count_solutions(true).build(),
            pattern: &SELF_LOOP,
            target: &DIRECTED_PATH3,
            expected_solutions: 0,
        },
        TestCase {
            name: "empty_pattern",
            config: Config::builder().count_solutions(true).build(),
            pattern: &EMPTY,
            target: &K4_DIRECTED,
            expected_solutions: 1,
        },
        TestCase {
            name: "k4_in_triangle",
            config: Config::builder().count_solutions(true).build(),
            pattern: &K4_DIRECTED,
            target: &DIRECTED_TRIANGLE,
            expected_solutions: 0,
        },
        TestCase {
            name: "path_in_k4",
            config: Config::builder().count_solutions(true).build(),
            pattern: &PATH3,
            target: &K4_UNDIRECTED,
            expected_solutions: 24,
        },
        TestCase {
            name: "induced_path_in_k4",
            config: Config::builder().count_solutions(true).induced(true).build(),
            pattern: &PATH3,
            target: &K4_UNDIRECTED,
            expected_solutions: 0,
        },
        TestCase {
            name: "induced_path_in_square",
            config: Config::builder().count_solutions(true).induced(true).build(),
            pattern: &PATH3,
            target: &CYCLE4,
            expected_solutions: 8,
        },
    ];

    pub static ref INJECTIVITY_TEST_CASES: Vec<TestCase> = vec![
        TestCase {
            name: "hexagon_onto_triangle_homomorphism",
            config: Config::builder()
                .count_solutions(true)
                .injectivity(Injectivity::None)
                .build(),
            pattern: &CYCLE6,
            target: &CYCLE3,
            expected_solutions: 66,
        },
        TestCase {
            name: "hexagon_onto_triangle_locally_injective",
            config: Config::builder()
                .count_solutions(true)
                .injectivity(Injectivity::LocallyInjective)
                .build(),
            pattern: &CYCLE6,
            target: &CYCLE3,
            expected_solutions: 6,
        },
        TestCase {
            name: "hexagon_onto_triangle_injective",
            config: Config::builder().count_solutions(true).build(),
            pattern: &CYCLE6,
            target: &CYCLE3,
            expected_solutions: 0,
        },
    ];

    pub static ref BIGRAPH_TEST_CASES: Vec<TestCase> = vec![
        TestCase {
            name: "two_roots_search",
            config: Config::bigraph_search(true),
            pattern: &TWO_ROOTS_PATTERN,
            target: &TWO_ROOTS_TARGET,
            expected_solutions: 2,
        },
        TestCase {
            name: "two_roots_equality",
            config: Config::bigraph_equality(),
            pattern: &TWO_ROOTS_PATTERN,
            target: &TWO_ROOTS_TARGET,
            expected_solutions: 1,
        },
        TestCase {
            name: "link_anchor",
            config: Config::bigraph_search(true),
            pattern: &LINK_PATTERN,
            target: &LINK_TARGET,
            expected_solutions: 1,
        },
    ];

    pub static ref SCENARIO_TEST_CASES: Vec<TestCase> = {
        let mut all = BASIC_TEST_CASES.clone();
        all.extend(INJECTIVITY_TEST_CASES.clone());
        all.extend(BIGRAPH_TEST_CASES.clone());
        all
    };
}

/// Look a scenario up by name.
pub fn scenario(name: &str) -> Option<&'static TestCase> {
    SCENARIO_TEST_CASES.iter().find(|case| case.name == name)
}
