//! Lowering of the input graphs into the bitset model used by the solver.
//!
//! The pattern and target are lowered together so that vertex and edge
//! labels share one interned id space. Everything in here is built once per
//! solve and read-only afterwards.

mod links;

use std::collections::HashMap;

use bigmatch_common::{Config, InputGraph, Injectivity};
use fixedbitset::FixedBitSet;
use tracing::{debug, trace};

pub(crate) use links::LinkMap;

/// Interned label id.
pub(crate) type LabelId = usize;

#[derive(Debug, Default)]
struct LabelInterner {
    ids: HashMap<String, LabelId>,
}

impl LabelInterner {
    fn intern(&mut self, label: &str) -> LabelId {
        let next = self.ids.len();
        *self.ids.entry(label.to_string()).or_insert(next)
    }

    fn get(&self, label: &str) -> Option<LabelId> {
        self.ids.get(label).copied()
    }
}

/// Adjacency and degree information for one graph.
#[derive(Debug, Clone)]
pub(crate) struct LoweredGraph {
    pub(crate) size: usize,
    pub(crate) out_adj: Vec<FixedBitSet>,
    pub(crate) in_adj: Vec<FixedBitSet>,
    /// Union of in and out neighbours.
    pub(crate) both: Vec<FixedBitSet>,
    pub(crate) loops: FixedBitSet,
    pub(crate) out_degrees: Vec<usize>,
    pub(crate) in_degrees: Vec<usize>,
    pub(crate) degrees: Vec<usize>,
    /// Neighbour degrees sorted in descending order. Empty when the
    /// neighbourhood degree sequence filter is off.
    pub(crate) nds: Vec<Vec<usize>>,
}

impl LoweredGraph {
    fn new(graph: &InputGraph, bigraph: bool, with_nds: bool) -> Self {
        let n = graph.size();
        let empty = FixedBitSet::with_capacity(n);
        let mut out_adj = vec![empty.clone(); n];
        let mut in_adj = vec![empty.clone(); n];
        let mut loops = empty;

        for (a, b, _) in graph.edges() {
            out_adj[a].insert(b);
            in_adj[b].insert(a);
            if a == b {
                loops.insert(a);
            }
        }

        let both: Vec<FixedBitSet> = out_adj
            .iter()
            .zip(&in_adj)
            .map(|(o, i)| o | i)
            .collect();

        let (out_degrees, in_degrees) = if bigraph {
            (
                (0..n).map(|v| graph.out_degree(v)).collect(),
                (0..n).map(|v| graph.in_degree(v)).collect(),
            )
        } else {
            (
                out_adj.iter().map(|s| s.count_ones(..)).collect(),
                in_adj.iter().map(|s| s.count_ones(..)).collect(),
            )
        };
        let degrees: Vec<usize> = both.iter().map(|s| s.count_ones(..)).collect();

        let nds = if with_nds {
            both.iter()
                .map(|nbrs| {
                    let mut seq: Vec<usize> = nbrs.ones().map(|w| degrees[w]).collect();
                    seq.sort_unstable_by(|a, b| b.cmp(a));
                    seq
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            size: n,
            out_adj,
            in_adj,
            both,
            loops,
            out_degrees,
            in_degrees,
            degrees,
            nds,
        }
    }

    pub(crate) fn loopy(&self) -> bool {
        !self.loops.is_clear()
    }

    pub(crate) fn max_degree(&self) -> usize {
        self.degrees.iter().copied().max().unwrap_or(0)
    }
}

/// Target adjacency restricted to one edge label.
#[derive(Debug, Clone)]
pub(crate) struct Layer {
    pub(crate) out_adj: Vec<FixedBitSet>,
    pub(crate) in_adj: Vec<FixedBitSet>,
}

/// A pattern edge seen from one endpoint: the other endpoint and the index
/// of the target layer that must carry the image edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PatternArc {
    pub(crate) other: usize,
    pub(crate) layer: usize,
}

/// The lowered pattern and target.
#[derive(Debug)]
pub(crate) struct Model<'g> {
    pub(crate) pattern_input: &'g InputGraph,
    pub(crate) target_input: &'g InputGraph,
    pub(crate) pattern: LoweredGraph,
    pub(crate) target: LoweredGraph,
    /// `None` for unlabelled pattern vertices, which match anything.
    pub(crate) pattern_labels: Vec<Option<LabelId>>,
    pub(crate) target_labels: Vec<Option<LabelId>>,
    pub(crate) out_arcs: Vec<Vec<PatternArc>>,
    pub(crate) in_arcs: Vec<Vec<PatternArc>>,
    pub(crate) layers: Vec<Layer>,
    /// Vertices sharing a pattern neighbour. Only built for locally
    /// injective solves.
    pub(crate) two_hop: Vec<FixedBitSet>,
    pub(crate) links: Option<LinkMap>,
}

impl<'g> Model<'g> {
    /// Lower both graphs under `config`.
    pub(crate) fn new(pattern: &'g InputGraph, target: &'g InputGraph, config: &Config) -> Self {
        let with_nds = config.nds && config.injectivity != Injectivity::None;
        let lowered_pattern = LoweredGraph::new(pattern, config.bigraph, with_nds);
        let lowered_target = LoweredGraph::new(target, config.bigraph, with_nds);

        let mut vertex_labels = LabelInterner::default();
        let target_labels: Vec<Option<LabelId>> = (0..target.size())
            .map(|v| Some(vertex_labels.intern(target.vertex_label(v))))
            .collect();
        // A pattern label missing from the target gets a fresh id that
        // nothing in the target carries.
        let pattern_labels: Vec<Option<LabelId>> = (0..pattern.size())
            .map(|v| {
                let label = pattern.vertex_label(v);
                (!label.is_empty()).then(|| vertex_labels.intern(label))
            })
            .collect();

        let compare_edge_labels = pattern.has_edge_labels();
        let mut edge_labels = LabelInterner::default();
        let mut out_arcs = vec![Vec::new(); pattern.size()];
        let mut in_arcs = vec![Vec::new(); pattern.size()];
        for (a, b, label) in pattern.edges() {
            let layer = if compare_edge_labels {
                edge_labels.intern(label)
            } else {
                0
            };
            out_arcs[a].push(PatternArc { other: b, layer });
            in_arcs[b].push(PatternArc { other: a, layer });
        }

        let layers = if compare_edge_labels {
            let n = target.size();
            let empty = FixedBitSet::with_capacity(n);
            let mut layers = vec![
                Layer {
                    out_adj: vec![empty.clone(); n],
                    in_adj: vec![empty; n],
                };
                edge_labels.ids.len()
            ];
            for (a, b, label) in target.edges() {
                if let Some(id) = edge_labels.get(label) {
                    layers[id].out_adj[a].insert(b);
                    layers[id].in_adj[b].insert(a);
                }
            }
            layers
        } else {
            vec![Layer {
                out_adj: lowered_target.out_adj.clone(),
                in_adj: lowered_target.in_adj.clone(),
            }]
        };

        let two_hop = if config.injectivity == Injectivity::LocallyInjective {
            two_hop_neighbourhoods(&lowered_pattern)
        } else {
            Vec::new()
        };

        let links = config
            .bigraph
            .then(|| LinkMap::new(pattern, target, config.link_scheme));

        debug!(
            pattern_size = pattern.size(),
            target_size = target.size(),
            layers = layers.len(),
            "Lowered model"
        );

        Self {
            pattern_input: pattern,
            target_input: target,
            pattern: lowered_pattern,
            target: lowered_target,
            pattern_labels,
            target_labels,
            out_arcs,
            in_arcs,
            layers,
            two_hop,
            links,
        }
    }

    /// Cheap checks that rule out every solution before search starts.
    pub(crate) fn structurally_unsatisfiable(&self, config: &Config) -> bool {
        if self.pattern.loopy() && !self.target.loopy() {
            trace!("Pattern has a self-loop but the target has none");
            return true;
        }
        if config.injective() && self.pattern.size > self.target.size {
            trace!("Pattern is larger than the target");
            return true;
        }
        if config.injectivity != Injectivity::None
            && self.pattern.max_degree() > self.target.max_degree()
        {
            trace!("Pattern degree exceeds every target degree");
            return true;
        }
        let too_many_links = self.links.as_ref().is_some_and(|links| {
            links.pattern_links.count_ones(..) > links.target_links.count_ones(..)
                || links.pattern_anchors.count_ones(..) > links.target_anchors.count_ones(..)
        });
        if config.injective() && too_many_links {
            trace!("Pattern has more link participants than the target");
            return true;
        }
        false
    }

    /// Number of pattern vertices.
    pub(crate) fn pattern_size(&self) -> usize {
        self.pattern.size
    }

    /// Number of target vertices.
    pub(crate) fn target_size(&self) -> usize {
        self.target.size
    }
}

fn two_hop_neighbourhoods(graph: &LoweredGraph) -> Vec<FixedBitSet> {
    (0..graph.size)
        .map(|u| {
            let mut reach = FixedBitSet::with_capacity(graph.size);
            for x in graph.both[u].ones() {
                reach.union_with(&graph.both[x]);
            }
            reach.set(u, false);
            reach
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use bigmatch_common::{Config, InputGraph, Injectivity, complete_directed, cycle, directed};

    use super::*;

    #[test]
    fn lowering_builds_both_directions() {
        let graph = directed(3, &[(0, 1), (1, 2)]).unwrap();
        let config = Config::default();
        let model = Model::new(&graph, &graph, &config);

        assert!(model.pattern.out_adj[0].contains(1));
        assert!(model.pattern.in_adj[1].contains(0));
        assert!(model.pattern.both[1].contains(0));
        assert!(model.pattern.both[1].contains(2));
        assert_eq!(model.pattern.out_degrees, vec![1, 1, 0]);
        assert_eq!(model.pattern.in_degrees, vec![0, 1, 1]);
        assert_eq!(model.pattern.nds[1], vec![1, 1]);
        assert_eq!(model.out_arcs[0], vec![PatternArc { other: 1, layer: 0 }]);
    }

    #[test]
    fn unlabelled_pattern_vertices_are_wildcards() {
        let mut pattern = InputGraph::new(2, true, false);
        pattern.set_vertex_label(1, "x").unwrap();
        let mut target = InputGraph::new(2, true, false);
        target.set_vertex_label(0, "x").unwrap();

        let model = Model::new(&pattern, &target, &Config::default());
        assert_eq!(model.pattern_labels[0], None);
        assert_eq!(model.pattern_labels[1], model.target_labels[0]);
        assert_ne!(model.pattern_labels[1], model.target_labels[1]);
    }

    #[test]
    fn edge_labels_split_target_layers() {
        let mut pattern = InputGraph::new(2, false, true);
        pattern.add_directed_edge(0, 1, "a").unwrap();
        let mut target = InputGraph::new(3, false, true);
        target.add_directed_edge(0, 1, "a").unwrap();
        target.add_directed_edge(0, 2, "b").unwrap();

        let model = Model::new(&pattern, &target, &Config::default());
        assert_eq!(model.layers.len(), 1);
        assert!(model.layers[0].out_adj[0].contains(1));
        assert!(!model.layers[0].out_adj[0].contains(2));
    }

    #[test]
    fn loopy_pattern_needs_loopy_target() {
        let pattern = directed(1, &[(0, 0)]).unwrap();
        let target = directed(3, &[(0, 1), (1, 2)]).unwrap();
        let model = Model::new(&pattern, &target, &Config::default());
        assert!(model.structurally_unsatisfiable(&Config::default()));
    }

    #[test]
    fn larger_pattern_is_unsatisfiable_when_injective() {
        let pattern = complete_directed(4).unwrap();
        let target = complete_directed(3).unwrap();
        let model = Model::new(&pattern, &target, &Config::default());
        assert!(model.structurally_unsatisfiable(&Config::default()));
    }

    #[test]
    fn surplus_pattern_links_are_unsatisfiable() {
        let mut pattern = InputGraph::new(2, true, false);
        pattern.set_vertex_label(0, "LINK").unwrap();
        pattern.set_vertex_label(1, "LINK").unwrap();
        let mut target = InputGraph::new(3, true, false);
        target.set_vertex_label(0, "LINK").unwrap();
        target.set_vertex_label(1, "M").unwrap();
        target.set_vertex_label(2, "M").unwrap();
        let config = Config::bigraph_search(true);
        let model = Model::new(&pattern, &target, &config);
        assert!(model.structurally_unsatisfiable(&config));
    }

    #[test]
    fn two_hop_excludes_self() {
        let graph = cycle(4).unwrap();
        let config = Config::builder()
            .injectivity(Injectivity::LocallyInjective)
            .build();
        let model = Model::new(&graph, &graph, &config);
        let reach: Vec<usize> = model.two_hop[0].ones().collect();
        assert_eq!(reach, vec![2]);
    }
}
