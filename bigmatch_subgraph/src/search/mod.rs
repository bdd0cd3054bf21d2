use bigmatch_common::Config;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use tracing::{debug, trace};

use crate::constraints::{Propagation, propagate};
use crate::embedding::VertexMapping;
use crate::model::Model;
use crate::outcome::{SolveOutcome, StopReason};
use crate::profiling::Timer;
use crate::restarts::RestartSchedule;
use crate::state::State;

pub mod heuristics;
pub(crate) use heuristics::{smallest_domain_first, value_order};

/// Enumeration callback. Returning `false` stops the search.
pub type Callback<'c> = &'c mut dyn FnMut(&VertexMapping) -> bool;

/// How one subtree ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Subtree {
    Exhausted,
    Restart,
    Stop(StopReason),
}

/// Depth-first search over the domains of a propagated root state.
pub(crate) struct Searcher<'m, 'c> {
    model: &'m Model<'m>,
    config: &'m Config,
    callback: Option<Callback<'c>>,
    schedule: RestartSchedule,
    rng: Option<Pcg64Mcg>,
    outcome: SolveOutcome,
}

impl<'m, 'c> Searcher<'m, 'c> {
    pub(crate) fn new(model: &'m Model<'m>, config: &'m Config, callback: Option<Callback<'c>>) -> Self {
        Searcher {
            model,
            config,
            callback,
            schedule: RestartSchedule::new(config.restarts),
            rng: None,
            outcome: SolveOutcome::new(),
        }
    }

    /// Run until exhausted, stopped, or out of time.
    pub(crate) fn run(mut self, state: &mut State) -> SolveOutcome {
        let _t = Timer::new("search::run");
        let stop = loop {
            match self.search(state) {
                Subtree::Exhausted => {
                    break if self.outcome.found() && !self.config.count_solutions {
                        StopReason::FoundOne
                    } else {
                        StopReason::Exhausted
                    };
                }
                Subtree::Stop(reason) => break reason,
                Subtree::Restart => {
                    self.schedule.next_run();
                    let seed = self.config.seed;
                    self.rng.get_or_insert_with(|| Pcg64Mcg::seed_from_u64(seed));
                    debug!(restarts = self.schedule.restarts(), "Restarting search");
                }
            }
        };
        self.outcome.finish(stop);
        debug!(
            solutions = self.outcome.solution_count,
            nodes = self.outcome.nodes_visited,
            stop = %stop,
            "Search finished"
        );
        self.outcome
    }

    fn search(&mut self, state: &mut State) -> Subtree {
        if self.config.timeout.is_expired() {
            return Subtree::Stop(StopReason::TimedOut);
        }
        self.outcome.nodes_visited += 1;

        let Some(u) = smallest_domain_first(state, &self.model.pattern.degrees) else {
            return self.emit(state);
        };

        for v in value_order(state, u, self.rng.as_mut()) {
            if self.config.timeout.is_expired() {
                return Subtree::Stop(StopReason::TimedOut);
            }
            if !state.domains().get(u).contains(v) {
                continue;
            }
            trace!(pattern_vertex = u, target_vertex = v, "Decision");

            let level = state.mark();
            let result = match state.assign(u, v) {
                Err(_) => Subtree::Exhausted,
                Ok(()) => match propagate(self.model, self.config, state) {
                    Propagation::Consistent => self.search(state),
                    Propagation::Conflict => Subtree::Exhausted,
                    Propagation::TimedOut => Subtree::Stop(StopReason::TimedOut),
                },
            };
            state.restore(level);

            if result != Subtree::Exhausted {
                return result;
            }
            // The subtree under u = v holds no further solutions.
            if state.remove(u, v).is_err() {
                return Subtree::Exhausted;
            }
            match propagate(self.model, self.config, state) {
                Propagation::Consistent => {}
                Propagation::Conflict => return Subtree::Exhausted,
                Propagation::TimedOut => return Subtree::Stop(StopReason::TimedOut),
            }
            if self.schedule.did_backtrack() {
                return Subtree::Restart;
            }
        }
        Subtree::Exhausted
    }

    fn emit(&mut self, state: &State) -> Subtree {
        let Some(mapping) = state.mapping() else {
            return Subtree::Exhausted;
        };
        self.outcome.solution_count += 1;
        trace!(solution = self.outcome.solution_count, %mapping, "Solution");

        let keep_going = match self.callback.as_mut() {
            Some(callback) => {
                let keep_going = callback(&mapping);
                self.outcome.mappings.push(mapping.clone());
                keep_going
            }
            None => true,
        };
        if self.outcome.solution_count == 1 {
            self.outcome.mapping = mapping;
        }

        if !self.config.count_solutions {
            Subtree::Stop(StopReason::FoundOne)
        } else if !keep_going {
            Subtree::Stop(StopReason::CallbackStopped)
        } else {
            Subtree::Exhausted
        }
    }
}
