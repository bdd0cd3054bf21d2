#![allow(dead_code)]

use std::collections::BTreeMap;

use bigmatch_common::{ANCHOR_LABEL, Config, InputGraph, LINK_LABEL};
use bigmatch_subgraph::VertexMapping;
use bigmatch_subgraph::test_harness::check_mapping;
use quickcheck::{Arbitrary, Gen};

/// A graph small enough to enumerate every vertex map into another.
#[derive(Clone, Debug)]
pub struct SmallGraph {
    pub size: usize,
    pub edges: Vec<(usize, usize)>,
    pub directed: bool,
}

impl SmallGraph {
    pub fn build(&self) -> InputGraph {
        let mut graph = InputGraph::new(self.size, false, false);
        for &(a, b) in &self.edges {
            if self.directed {
                graph.add_directed_edge(a, b, "").unwrap();
            } else {
                graph.add_edge(a, b).unwrap();
            }
        }
        graph
    }
}

impl Arbitrary for SmallGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let size = usize::arbitrary(g) % 5;
        let directed = bool::arbitrary(g);
        let edges = if size == 0 {
            Vec::new()
        } else {
            let count = usize::arbitrary(g) % (size * size + 1);
            let mut edges = Vec::with_capacity(count);
            for _ in 0..count {
                let (a, b) = (usize::arbitrary(g) % size, usize::arbitrary(g) % size);
                // keep self-loops rare
                if a != b || u8::arbitrary(g) % 4 == 0 {
                    edges.push((a, b));
                }
            }
            edges
        };
        SmallGraph {
            size,
            edges,
            directed,
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let this = self.clone();
        Box::new((0..self.edges.len()).map(move |i| {
            let mut smaller = this.clone();
            smaller.edges.remove(i);
            smaller
        }))
    }
}

const CONTROLS: [&str; 4] = ["M", "K", LINK_LABEL, ANCHOR_LABEL];

/// A small bigraph encoding: every vertex carries a control, edges are
/// directed and labelled `e` or unlabelled, and vertices may sit under one
/// of two roots or above one of two sites.
#[derive(Clone, Debug)]
pub struct SmallBigraph {
    /// Index into the control set, per vertex.
    pub controls: Vec<usize>,
    /// Edges, with whether each carries the `e` label.
    pub edges: BTreeMap<(usize, usize), bool>,
    pub roots: Vec<(usize, usize)>,
    pub sites: Vec<(usize, usize)>,
}

impl SmallBigraph {
    pub fn build(&self) -> InputGraph {
        let mut graph = InputGraph::new(self.controls.len(), true, true);
        for (v, &c) in self.controls.iter().enumerate() {
            graph.set_vertex_label(v, CONTROLS[c]).unwrap();
        }
        // labels first, the degree counters read them
        for (&(a, b), &labelled) in &self.edges {
            graph
                .add_directed_edge(a, b, if labelled { "e" } else { "" })
                .unwrap();
        }
        for &(r, v) in &self.roots {
            graph.add_pattern_root_edge(r, v).unwrap();
            graph.set_child_of_root(v).unwrap();
        }
        for &(v, s) in &self.sites {
            graph.add_pattern_site_edge(v, s).unwrap();
            graph.set_parent_of_site(v).unwrap();
        }
        graph
    }
}

impl Arbitrary for SmallBigraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let size = usize::arbitrary(g) % 5;
        let mut controls = Vec::with_capacity(size);
        let mut edges = BTreeMap::new();
        let mut roots = Vec::new();
        let mut sites = Vec::new();
        for _ in 0..size {
            controls.push(usize::arbitrary(g) % CONTROLS.len());
        }
        if size > 0 {
            for _ in 0..usize::arbitrary(g) % (size * size + 1) {
                let (a, b) = (usize::arbitrary(g) % size, usize::arbitrary(g) % size);
                if a != b || u8::arbitrary(g) % 4 == 0 {
                    edges.insert((a, b), bool::arbitrary(g));
                }
            }
            for v in 0..size {
                if u8::arbitrary(g) % 3 == 0 {
                    roots.push((usize::arbitrary(g) % 2, v));
                }
                if u8::arbitrary(g) % 3 == 0 {
                    sites.push((v, usize::arbitrary(g) % 2));
                }
            }
        }
        SmallBigraph {
            controls,
            edges,
            roots,
            sites,
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let this = self.clone();
        let keys: Vec<(usize, usize)> = self.edges.keys().copied().collect();
        let without_edges = keys.into_iter().map({
            let this = this.clone();
            move |k| {
                let mut smaller = this.clone();
                smaller.edges.remove(&k);
                smaller
            }
        });
        let without_roots = (0..self.roots.len()).map({
            let this = this.clone();
            move |i| {
                let mut smaller = this.clone();
                smaller.roots.remove(i);
                smaller
            }
        });
        let without_sites = (0..self.sites.len()).map(move |i| {
            let mut smaller = this.clone();
            smaller.sites.remove(i);
            smaller
        });
        Box::new(without_edges.chain(without_roots).chain(without_sites))
    }
}

/// Count the mappings accepted by the independent checker by trying every
/// vertex map.
pub fn brute_force_count(pattern: &InputGraph, target: &InputGraph, config: &Config) -> u64 {
    let (np, nt) = (pattern.size(), target.size());
    if np == 0 {
        return 1;
    }
    if nt == 0 {
        return 0;
    }
    let mut images = vec![0; np];
    let mut count = 0;
    loop {
        let mapping: VertexMapping = images.iter().copied().enumerate().collect();
        if check_mapping(pattern, target, config, &mapping).is_ok() {
            count += 1;
        }
        // odometer
        let mut i = 0;
        loop {
            if i == np {
                return count;
            }
            images[i] += 1;
            if images[i] < nt {
                break;
            }
            images[i] = 0;
            i += 1;
        }
    }
}
