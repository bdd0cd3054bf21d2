//! Shared helpers for the solver's test suites.

use std::collections::HashSet;
use std::sync::Once;

use bigmatch_common::{Config, ConfigBuilder, InputGraph, Injectivity, scenario};
use itertools::Itertools;

use crate::{VertexMapping, solve};

static INIT: Once = Once::new();

/// Configures logging for the test runner.
pub fn setup_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Check that `mapping` is a morphism of the kind `config` asks for,
/// independently of the solver's own reasoning.
///
/// Under `config.bigraph` the place constraints are checked too. The
/// equality interface is not.
pub fn check_mapping(
    pattern: &InputGraph,
    target: &InputGraph,
    config: &Config,
    mapping: &VertexMapping,
) -> Result<(), String> {
    let mut image = Vec::with_capacity(pattern.size());
    for p in 0..pattern.size() {
        match mapping.get_target(p) {
            Some(t) if t < target.size() => image.push(t),
            Some(t) => return Err(format!("vertex {p} maps to {t}, outside the target")),
            None => return Err(format!("vertex {p} is unmapped")),
        }
    }

    for (p, &t) in image.iter().enumerate() {
        let label = pattern.vertex_label(p);
        if !label.is_empty() && label != target.vertex_label(t) {
            return Err(format!(
                "vertex {p} labelled '{label}' maps to {t} labelled '{}'",
                target.vertex_label(t)
            ));
        }
    }

    if config.bigraph {
        check_place(pattern, target, &image)?;
    }

    for (a, b, label) in pattern.edges() {
        match target.edge_label(image[a], image[b]) {
            None => return Err(format!("edge {a} -> {b} has no image")),
            Some(l) if pattern.has_edge_labels() && l != label => {
                return Err(format!("edge {a} -> {b} labelled '{label}' maps onto '{l}'"));
            }
            Some(_) => {}
        }
    }

    if config.induced {
        for (a, b) in (0..pattern.size()).cartesian_product(0..pattern.size()) {
            if !pattern.adjacent(a, b) && target.adjacent(image[a], image[b]) {
                return Err(format!("non-edge {a} -> {b} maps onto an edge"));
            }
        }
    }

    match config.injectivity {
        Injectivity::None => {}
        Injectivity::Injective => {
            if let Some((a, b)) = (0..pattern.size())
                .tuple_combinations()
                .find(|&(a, b)| image[a] == image[b])
            {
                return Err(format!("vertices {a} and {b} share image {}", image[a]));
            }
        }
        Injectivity::LocallyInjective => {
            for x in 0..pattern.size() {
                let neighbours = (0..pattern.size())
                    .filter(|&y| pattern.adjacent(x, y) || pattern.adjacent(y, x))
                    .collect_vec();
                if !neighbours.iter().map(|&y| image[y]).all_unique() {
                    return Err(format!("neighbours of {x} share an image"));
                }
            }
        }
    }

    Ok(())
}

fn check_place(pattern: &InputGraph, target: &InputGraph, image: &[usize]) -> Result<(), String> {
    for (p, &t) in image.iter().enumerate() {
        let (p_child_of_root, p_parent_of_site) = pattern.big_constraint(p);
        let (t_child_of_root, t_parent_of_site) = target.big_constraint(t);
        if p_child_of_root && !t_child_of_root {
            return Err(format!("child of a root {p} maps to {t}, which is not"));
        }
        if p_parent_of_site && !t_parent_of_site {
            return Err(format!("parent of a site {p} maps to {t}, which is not"));
        }
    }
    for &(r, p) in pattern.pattern_root_edges() {
        if !target.pattern_root_edges().contains(&(r, image[p])) {
            return Err(format!("root edge {r} -> {p} has no image"));
        }
    }
    for &(p, s) in pattern.pattern_site_edges() {
        if !target.pattern_site_edges().contains(&(image[p], s)) {
            return Err(format!("site edge {p} -> {s} has no image"));
        }
    }
    Ok(())
}

/// Specification for a solution-count test.
pub struct TestSpec<'a> {
    /// The graph to embed.
    pub pattern: &'a InputGraph,
    /// The graph to embed into.
    pub target: &'a InputGraph,
    /// Number of distinct mappings expected.
    pub expected_count: u64,
    /// Optional configuration builder to override defaults.
    pub config_fn: Option<fn(ConfigBuilder) -> ConfigBuilder>,
}

/// Enumerate every mapping, check each one, and compare the count.
#[track_caller]
pub fn run_match_test(spec: TestSpec<'_>) -> Result<(), Box<dyn std::error::Error>> {
    setup_test_logging();

    let mut builder = Config::builder();
    if let Some(f) = spec.config_fn {
        builder = f(builder);
    }
    let config = builder.count_solutions(true).build();
    run_with_config(spec.pattern, spec.target, &config, spec.expected_count)
}

/// Run a named scenario from the shared test cases.
pub fn run_scenario(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    setup_test_logging();

    let case = scenario(name).ok_or_else(|| format!("unknown scenario '{name}'"))?;
    let config = Config {
        count_solutions: true,
        ..case.config.clone()
    };
    run_with_config(case.pattern, case.target, &config, case.expected_solutions)
}

fn run_with_config(
    pattern: &InputGraph,
    target: &InputGraph,
    config: &Config,
    expected: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut keep_going = |_: &VertexMapping| true;
    let outcome = solve(pattern, target, config, Some(&mut keep_going));

    if !outcome.completed {
        return Err(format!("search stopped early: {}", outcome.stop).into());
    }
    for mapping in &outcome.mappings {
        check_mapping(pattern, target, config, mapping)?;
    }
    let distinct: HashSet<String> = outcome.mappings.iter().map(ToString::to_string).collect();
    if distinct.len() != outcome.mappings.len() {
        return Err("the same mapping was emitted twice".into());
    }
    if outcome.solution_count != expected {
        tracing::error!(
            "Expected {} solutions, found {}",
            expected,
            outcome.solution_count
        );
        return Err(format!(
            "Expected {} solutions, found {}",
            expected, outcome.solution_count
        )
        .into());
    }
    Ok(())
}

/// Defines a solution-count test.
#[macro_export]
macro_rules! match_test {
    (
        name: $test_name:ident,
        scenario: $scenario:expr
    ) => {
        #[test]
        fn $test_name() -> Result<(), Box<dyn std::error::Error>> {
            $crate::test_harness::run_scenario($scenario)
        }
    };

    (
        name: $test_name:ident,
        pattern: $pattern:expr,
        target: $target:expr,
        expect: $count:expr
    ) => {
        #[test]
        fn $test_name() -> Result<(), Box<dyn std::error::Error>> {
            $crate::test_harness::run_match_test($crate::test_harness::TestSpec {
                pattern: &$pattern,
                target: &$target,
                expected_count: $count,
                config_fn: None,
            })
        }
    };

    (
        name: $test_name:ident,
        pattern: $pattern:expr,
        target: $target:expr,
        expect: $count:expr,
        config: $cfg_fn:expr
    ) => {
        #[test]
        fn $test_name() -> Result<(), Box<dyn std::error::Error>> {
            $crate::test_harness::run_match_test($crate::test_harness::TestSpec {
                pattern: &$pattern,
                target: &$target,
                expected_count: $count,
                config_fn: Some($cfg_fn),
            })
        }
    };
}
