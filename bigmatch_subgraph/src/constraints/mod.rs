//! Unit filters applied once when building the initial domains, and the
//! propagators run to fixpoint during search.

mod adjacency;
mod all_different;
mod degree;
mod interface;
mod label;
mod loops;
mod place;

use bigmatch_common::{Config, Injectivity};
use fixedbitset::FixedBitSet;
use tracing::{debug, trace};

use crate::model::Model;
use crate::profiling::Timer;
use crate::state::{Domains, State};

pub(crate) use adjacency::propagate_assignment;
pub(crate) use all_different::cheap_all_different;
pub(crate) use degree::{DegreeConstraint, NdsConstraint};
pub(crate) use interface::InterfaceConstraint;
pub(crate) use label::LabelConstraint;
pub(crate) use loops::LoopConstraint;
pub(crate) use place::PlaceConstraint;

/// A per-pair filter on candidate images.
pub(crate) trait Constraint {
    /// Whether target vertex `t` may be the image of pattern vertex `p`.
    fn d_candidate_is_valid(&self, p: usize, t: usize) -> bool;
}

/// Result of running the propagators to fixpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Propagation {
    Consistent,
    Conflict,
    TimedOut,
}

fn unit_constraints<'a>(model: &'a Model<'a>, config: &Config) -> Vec<Box<dyn Constraint + 'a>> {
    let mut constraints: Vec<Box<dyn Constraint + 'a>> = vec![
        Box::new(LabelConstraint::new(model)),
        Box::new(LoopConstraint::new(model, config.induced)),
    ];
    if config.injectivity != Injectivity::None {
        constraints.push(Box::new(DegreeConstraint::new(model)));
        if config.nds {
            constraints.push(Box::new(NdsConstraint::new(model)));
        }
    }
    if config.bigraph {
        constraints.push(Box::new(PlaceConstraint::new(model)));
    }
    let interface = config
        .bigraph_equality_check
        .then(|| InterfaceConstraint::from_model(model))
        .flatten();
    if let Some(interface) = interface {
        constraints.push(Box::new(interface));
    }
    constraints
}

/// Domains containing every target vertex that passes all unit filters.
pub(crate) fn initial_domains<'a>(model: &'a Model<'a>, config: &Config) -> Domains {
    let _t = Timer::new("constraints::initial_domains");
    let constraints = unit_constraints(model, config);
    let width = model.target_size();

    let sets: Vec<FixedBitSet> = (0..model.pattern_size())
        .map(|p| {
            let mut set = FixedBitSet::with_capacity(width);
            for t in 0..width {
                if constraints.iter().all(|c| c.d_candidate_is_valid(p, t)) {
                    set.insert(t);
                }
            }
            trace!(pattern_vertex = p, candidates = set.count_ones(..), "Initial domain");
            set
        })
        .collect();

    debug!(
        filters = constraints.len(),
        total_candidates = sets.iter().map(|s| s.count_ones(..)).sum::<usize>(),
        "Built initial domains"
    );
    Domains::from_sets(sets, width)
}

/// Propagate every pending fixed vertex, then the Hall check, until nothing
/// changes.
pub(crate) fn propagate(model: &Model<'_>, config: &Config, state: &mut State) -> Propagation {
    let _t = Timer::new("constraints::propagate");
    let hall = config.supplementals && config.injective();
    loop {
        if config.timeout.is_expired() {
            return Propagation::TimedOut;
        }
        if let Some(u) = state.next_pending() {
            let Some(v) = state.value(u) else {
                return Propagation::Conflict;
            };
            if propagate_assignment(model, config, state, u, v).is_err() {
                return Propagation::Conflict;
            }
            continue;
        }
        if hall {
            if cheap_all_different(state, model.target_size()).is_err() {
                return Propagation::Conflict;
            }
            if state.has_pending() {
                continue;
            }
        }
        return Propagation::Consistent;
    }
}
