use std::collections::BTreeMap;

use bigmatch_common::{ANCHOR_LABEL, Config, Deadline, InputGraph, LINK_LABEL};
use bigmatch_subgraph::test_harness::setup_test_logging;
use bigmatch_subgraph::{GraphKind, Session, SessionError, bigraph_equal};
use rstest::rstest;

/// `ROOT0 -> A`, `ROOT1 -> B` with the controls of `A` and `B` given.
fn two_regions(session: &mut Session, kind: GraphKind, a: &str, b: &str) {
    match kind {
        GraphKind::Pattern => session.start_pattern(4),
        GraphKind::Target => session.start_target(4),
    }
    session.add_node(kind, 0, "R", "ROOT0", &[], &[]).unwrap();
    session.add_node(kind, 1, "R", "ROOT1", &[], &[]).unwrap();
    session.add_node(kind, 2, a, "2", &[], &[]).unwrap();
    session.add_node(kind, 3, b, "3", &[], &[]).unwrap();
    session.add_edge(kind, 0, 2).unwrap();
    session.add_edge(kind, 1, 3).unwrap();
}

/// A single `M` node under root 0, against a root 0 holding two `M` nodes
/// and one `K` node.
fn rooted_nodes() -> Session {
    let mut session = Session::new();
    session.start_pattern(1);
    session
        .add_node(GraphKind::Pattern, 0, "M", "0", &[0], &[])
        .unwrap();

    session.start_target(3);
    session
        .add_node(GraphKind::Target, 0, "M", "0", &[0], &[])
        .unwrap();
    session
        .add_node(GraphKind::Target, 1, "M", "1", &[0], &[])
        .unwrap();
    session
        .add_node(GraphKind::Target, 2, "K", "2", &[0], &[])
        .unwrap();
    session
}

#[test]
fn match_all_stores_every_occurrence() {
    setup_test_logging();
    let mut session = rooted_nodes();
    assert_eq!(session.match_all(), Ok(2));
    assert_eq!(session.results().mapping.len(), 2);

    let mut images = Vec::new();
    while let Some(m) = session.next_solution() {
        images.push(m.get_target(0));
    }
    images.sort();
    assert_eq!(images, vec![Some(0), Some(1)]);
}

#[test]
fn count_keeps_no_mappings() {
    let mut session = rooted_nodes();
    assert_eq!(session.count_solutions(), Ok(2));
    assert!(!session.results().match_found());
    assert_eq!(session.results().count, 2);
}

#[test]
fn each_solve_clears_previous_results() {
    let mut session = rooted_nodes();
    session.match_all().unwrap();
    assert_eq!(session.match_one(), Ok(true));
    assert_eq!(session.results().mapping.len(), 1);
}

#[test]
fn nodes_decode_numeric_names() {
    let mut session = rooted_nodes();
    session.match_one().unwrap();
    let mapping = session.results().mapping[0].clone();
    let nodes = session.nodes(&mapping).unwrap();
    let target = mapping.get_target(0).unwrap();
    assert_eq!(nodes, BTreeMap::from([(0, target)]));
    assert_eq!(
        session.render(&mapping),
        Ok(format!("S\nN 0 {target}\nD\n"))
    );
}

#[test]
fn root_edges_must_exist_in_the_target() {
    let mut session = rooted_nodes();
    // Move the pattern node under root 1, which the target lacks.
    session.start_pattern(1);
    session
        .add_node(GraphKind::Pattern, 0, "M", "0", &[1], &[])
        .unwrap();
    assert_eq!(session.match_all(), Ok(0));
    assert_eq!(session.match_one(), Ok(false));
}

#[rstest]
#[case::identical("M", "N", "M", "N", true)]
#[case::swapped_regions("M", "N", "N", "M", false)]
#[case::different_controls("M", "N", "M", "K", false)]
fn equality_requires_identity_on_roots(
    #[case] pa: &str,
    #[case] pb: &str,
    #[case] ta: &str,
    #[case] tb: &str,
    #[case] expected: bool,
) {
    setup_test_logging();
    let mut session = Session::new();
    two_regions(&mut session, GraphKind::Pattern, pa, pb);
    two_regions(&mut session, GraphKind::Target, ta, tb);
    assert_eq!(session.equal(), Ok(expected));
}

/// An `M` node and a LINK named `link`, both tied to one ANCHOR.
fn linked_node(session: &mut Session, kind: GraphKind, link: &str) {
    match kind {
        GraphKind::Pattern => session.start_pattern(3),
        GraphKind::Target => session.start_target(3),
    }
    session.add_node(kind, 0, "M", "0", &[], &[]).unwrap();
    session.add_node(kind, 1, ANCHOR_LABEL, "A_0", &[], &[]).unwrap();
    session.add_node(kind, 2, LINK_LABEL, link, &[], &[]).unwrap();
    session.add_edge(kind, 0, 1).unwrap();
    session.add_edge(kind, 2, 1).unwrap();
}

#[rstest]
#[case::renumbered_closed_links("C1_a", "C7_a", true)]
#[case::closed_onto_open_port("C1_a", "L1_a", true)]
#[case::same_open_port("L2_a", "L2_b", true)]
#[case::renumbered_open_port("L2_a", "L3_a", false)]
fn only_open_ports_belong_to_the_interface(
    #[case] pattern_link: &str,
    #[case] target_link: &str,
    #[case] expected: bool,
) {
    let mut session = Session::new();
    linked_node(&mut session, GraphKind::Pattern, pattern_link);
    linked_node(&mut session, GraphKind::Target, target_link);
    assert_eq!(session.equal(), Ok(expected));
}

#[test]
fn equality_ignores_closed_link_numbers() {
    let graph = |link: &str| {
        let mut graph = InputGraph::new(3, true, false);
        graph.set_vertex_label(0, "M").unwrap();
        graph.set_vertex_label(1, ANCHOR_LABEL).unwrap();
        graph.set_vertex_label(2, LINK_LABEL).unwrap();
        graph.set_vertex_name(2, link).unwrap();
        graph.add_directed_edge(0, 1, "").unwrap();
        graph.add_directed_edge(2, 1, "").unwrap();
        graph
    };
    let (equal, outcome) = bigraph_equal(&graph("C1_a"), &graph("C2_a"), &Config::bigraph_equality());
    assert!(equal);
    assert_eq!(outcome.solution_count, 1);
}

#[test]
fn swapped_regions_still_match_as_a_search() {
    let mut session = Session::new();
    two_regions(&mut session, GraphKind::Pattern, "M", "N");
    two_regions(&mut session, GraphKind::Target, "N", "M");
    assert_eq!(session.match_all(), Ok(1));
}

#[test]
fn out_of_range_vertices_are_reported() {
    let mut session = Session::new();
    session.start_pattern(2);
    assert!(matches!(
        session.add_edge(GraphKind::Pattern, 0, 5),
        Err(SessionError::Graph(_))
    ));
    assert_eq!(
        session.add_edge(GraphKind::Target, 0, 1),
        Err(SessionError::NoGraph(GraphKind::Target))
    );
}

#[test]
fn expired_deadline_yields_no_results() {
    let mut session = rooted_nodes();
    let deadline = Deadline::never();
    deadline.expire_now();
    session.set_deadline(deadline);
    assert_eq!(session.match_all(), Ok(0));
    assert!(!session.results().match_found());
}
