use bigmatch_common::{Config, Injectivity};

use crate::model::Model;
use crate::state::{Conflict, State};

/// Consequences of fixing pattern vertex `u` to target vertex `v`.
///
/// Neighbours of `u` are restricted to the matching neighbours of `v` in the
/// layer of the connecting edge's label. In induced mode non-neighbours lose
/// the neighbours of `v`. Finally the value is removed wherever the
/// injectivity discipline forbids sharing it.
pub(crate) fn propagate_assignment(
    model: &Model<'_>,
    config: &Config,
    state: &mut State,
    u: usize,
    v: usize,
) -> Result<(), Conflict> {
    for arc in &model.out_arcs[u] {
        state.intersect(arc.other, &model.layers[arc.layer].out_adj[v])?;
    }
    for arc in &model.in_arcs[u] {
        state.intersect(arc.other, &model.layers[arc.layer].in_adj[v])?;
    }

    if config.induced {
        for w in (0..model.pattern_size()).filter(|&w| w != u) {
            if !model.pattern.out_adj[u].contains(w) {
                state.difference(w, &model.target.out_adj[v])?;
            }
            if !model.pattern.in_adj[u].contains(w) {
                state.difference(w, &model.target.in_adj[v])?;
            }
        }
    }

    match config.injectivity {
        Injectivity::Injective => {
            for w in (0..model.pattern_size()).filter(|&w| w != u) {
                state.remove(w, v)?;
            }
        }
        Injectivity::LocallyInjective => {
            for w in model.two_hop[u].ones() {
                state.remove(w, v)?;
            }
        }
        Injectivity::None => {}
    }
    Ok(())
}
