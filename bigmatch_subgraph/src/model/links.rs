use bigmatch_common::naming::{any_port, open_port, root_index};
use bigmatch_common::{ANCHOR_LABEL, InputGraph, LINK_LABEL, LinkScheme};
use fixedbitset::FixedBitSet;

/// Link-graph participants of both graphs and the interface identifiers
/// decoded from their names.
#[derive(Debug, Clone)]
pub(crate) struct LinkMap {
    pub(crate) pattern_links: FixedBitSet,
    pub(crate) pattern_anchors: FixedBitSet,
    pub(crate) target_links: FixedBitSet,
    pub(crate) target_anchors: FixedBitSet,
    /// Open port number of every pattern LINK vertex. Closed links are not
    /// part of the interface and stay `None`.
    pub(crate) pattern_ports: Vec<Option<usize>>,
    /// Open or closed port number of every target LINK vertex.
    pub(crate) target_ports: Vec<Option<usize>>,
    /// Root index of every vertex named `ROOT<k>`.
    pub(crate) pattern_roots: Vec<Option<usize>>,
    pub(crate) target_roots: Vec<Option<usize>>,
}

struct Decoded {
    links: FixedBitSet,
    anchors: FixedBitSet,
    ports: Vec<Option<usize>>,
    roots: Vec<Option<usize>>,
}

fn decode(graph: &InputGraph, port: impl Fn(&str) -> Option<usize>) -> Decoded {
    let n = graph.size();
    let mut links = FixedBitSet::with_capacity(n);
    let mut anchors = FixedBitSet::with_capacity(n);
    let mut ports = vec![None; n];
    let mut roots = vec![None; n];

    for v in 0..n {
        match graph.vertex_label(v) {
            LINK_LABEL => {
                links.insert(v);
                ports[v] = port(&graph.vertex_name(v));
            }
            ANCHOR_LABEL => anchors.insert(v),
            _ => {}
        }
        roots[v] = graph.explicit_vertex_name(v).and_then(root_index);
    }

    Decoded {
        links,
        anchors,
        ports,
        roots,
    }
}

impl LinkMap {
    pub(crate) fn new(pattern: &InputGraph, target: &InputGraph, scheme: LinkScheme) -> Self {
        let p = decode(pattern, |name| open_port(name, scheme));
        let t = decode(target, |name| any_port(name, scheme));
        Self {
            pattern_links: p.links,
            pattern_anchors: p.anchors,
            target_links: t.links,
            target_anchors: t.anchors,
            pattern_ports: p.ports,
            target_ports: t.ports,
            pattern_roots: p.roots,
            target_roots: t.roots,
        }
    }
}
