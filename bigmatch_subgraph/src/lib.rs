//! Subgraph isomorphism and homomorphism search over small labelled
//! digraphs, with the place and link constraints of bigraph matching.
//!
//! A solve lowers both graphs to bitset adjacency, filters every pattern
//! vertex's domain of candidate target vertices once, then runs a
//! depth-first search that fixes one pattern vertex at a time and propagates
//! the consequences until a fixpoint.

mod constraints;
mod embedding;
mod model;
mod outcome;
pub mod profiling;
mod restarts;
mod search;
mod session;
mod state;
pub mod test_harness;

use bigmatch_common::{Config, InputGraph, RestartPolicy};
use tracing::debug;

use crate::constraints::{Propagation, initial_domains, propagate};
use crate::model::Model;
use crate::profiling::Timer;
use crate::search::Searcher;
use crate::state::State;

pub use crate::embedding::VertexMapping;
pub use crate::outcome::{Results, SolveOutcome, StopReason};
pub use crate::search::Callback;
pub use crate::session::{GraphKind, Session, SessionError, bigraph_equal, render_mapping};

/// Search for mappings of `pattern` into `target` under `config`.
///
/// Without `count_solutions` the search stops at the first mapping. With it,
/// every mapping is counted and, when `callback` is supplied, handed to the
/// callback and kept in [`SolveOutcome::mappings`]; the callback stops the
/// enumeration by returning `false`.
pub fn solve(
    pattern: &InputGraph,
    target: &InputGraph,
    config: &Config,
    callback: Option<Callback<'_>>,
) -> SolveOutcome {
    let _t = Timer::new("solve");
    let model = Model::new(pattern, target, config);

    if model.structurally_unsatisfiable(config) {
        debug!("Rejected before search");
        return SolveOutcome::unsatisfiable();
    }

    let domains = initial_domains(&model, config);
    if let Some(u) = (0..model.pattern_size()).find(|&u| domains.is_empty(u)) {
        debug!(pattern_vertex = u, "No candidates after filtering");
        return SolveOutcome::unsatisfiable();
    }

    let mut state = State::new(domains);
    match propagate(&model, config, &mut state) {
        Propagation::Consistent => {}
        Propagation::Conflict => {
            debug!("Initial propagation failed");
            return SolveOutcome::unsatisfiable();
        }
        Propagation::TimedOut => {
            debug!("Timed out during initial propagation");
            let mut outcome = SolveOutcome::new();
            outcome.finish(StopReason::TimedOut);
            return outcome;
        }
    }

    Searcher::new(&model, config, callback).run(&mut state)
}

/// Convenience wrapper over [`solve`] for one pattern/target pair.
pub struct SubgraphMatcher<'p, 't, 'cfg> {
    pattern: &'p InputGraph,
    target: &'t InputGraph,
    config: &'cfg Config,
}

impl<'p, 't, 'cfg> SubgraphMatcher<'p, 't, 'cfg> {
    pub fn new(pattern: &'p InputGraph, target: &'t InputGraph, config: &'cfg Config) -> Self {
        SubgraphMatcher {
            pattern,
            target,
            config,
        }
    }

    /// The first mapping found, if any.
    pub fn find_first(&self) -> Option<VertexMapping> {
        let config = Config {
            count_solutions: false,
            ..self.config.clone()
        };
        let outcome = solve(self.pattern, self.target, &config, None);
        outcome.found().then_some(outcome.mapping)
    }

    /// Every mapping, in search order.
    pub fn enumerate_all(&self) -> Vec<VertexMapping> {
        let config = self.enumeration_config();
        let mut keep_going = |_: &VertexMapping| true;
        solve(self.pattern, self.target, &config, Some(&mut keep_going)).mappings
    }

    /// Number of mappings.
    pub fn count(&self) -> u64 {
        solve(self.pattern, self.target, &self.enumeration_config(), None).solution_count
    }

    fn enumeration_config(&self) -> Config {
        Config {
            count_solutions: true,
            restarts: RestartPolicy::None,
            ..self.config.clone()
        }
    }
}
