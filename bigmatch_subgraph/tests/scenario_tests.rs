use bigmatch_common::{
    Config, ConfigBuilder, Injectivity, RestartPolicy, SCENARIO_TEST_CASES, cycle, undirected,
};
use bigmatch_subgraph::match_test;
use bigmatch_subgraph::test_harness::run_scenario;
use rstest::rstest;

fn homomorphism(c: ConfigBuilder) -> ConfigBuilder {
    c.injectivity(Injectivity::None)
}

fn locally_injective(c: ConfigBuilder) -> ConfigBuilder {
    c.injectivity(Injectivity::LocallyInjective)
}

fn without_filters(c: ConfigBuilder) -> ConfigBuilder {
    c.supplementals(false).nds(false)
}

#[test]
fn every_scenario_passes() {
    let failures: Vec<String> = SCENARIO_TEST_CASES
        .iter()
        .filter_map(|case| {
            run_scenario(case.name)
                .err()
                .map(|e| format!("{}: {e}", case.name))
        })
        .collect();
    assert!(failures.is_empty(), "{failures:#?}");
}

#[rstest]
#[case::triangle_in_k4("triangle_in_k4")]
#[case::induced_path_in_square("induced_path_in_square")]
#[case::hexagon_onto_triangle_homomorphism("hexagon_onto_triangle_homomorphism")]
#[case::hexagon_onto_triangle_locally_injective("hexagon_onto_triangle_locally_injective")]
#[case::two_roots_equality("two_roots_equality")]
fn named_scenario(#[case] name: &str) {
    run_scenario(name).unwrap();
}

#[test]
fn unknown_scenario_is_an_error() {
    assert!(run_scenario("no_such_case").is_err());
}

match_test!(
    name: empty_pattern_matches_once,
    scenario: "empty_pattern"
);

match_test!(
    name: edge_in_pentagon,
    pattern: undirected(2, &[(0, 1)]).unwrap(),
    target: cycle(5).unwrap(),
    expect: 10
);

match_test!(
    name: square_onto_edge_homomorphism,
    pattern: cycle(4).unwrap(),
    target: undirected(2, &[(0, 1)]).unwrap(),
    expect: 2,
    config: homomorphism
);

match_test!(
    name: square_onto_edge_locally_injective,
    pattern: cycle(4).unwrap(),
    target: undirected(2, &[(0, 1)]).unwrap(),
    expect: 0,
    config: locally_injective
);

match_test!(
    name: square_in_square_without_filters,
    pattern: cycle(4).unwrap(),
    target: cycle(4).unwrap(),
    expect: 8,
    config: without_filters
);

#[test]
fn scenario_configs_are_normalised() {
    // Enumeration never runs with restarts.
    assert!(
        SCENARIO_TEST_CASES
            .iter()
            .filter(|case| case.config.count_solutions)
            .all(|case| case.config.restarts == RestartPolicy::None)
    );
    assert!(Config::bigraph_equality().bigraph);
}
