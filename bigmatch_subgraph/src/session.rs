//! A pattern/target pair built incrementally by a bigraph encoder, the
//! solves run over it, and the decoders that read mappings back in bigraph
//! terms.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use bigmatch_common::naming::{any_port, closed_link_index, is_closed_link, open_port, root_index};
use bigmatch_common::{
    Config, Deadline, GraphError, InputGraph, LINK_LABEL, LinkScheme, NamingError,
};
use thiserror::Error;
use tracing::debug;

use crate::embedding::VertexMapping;
use crate::outcome::{Results, SolveOutcome};
use crate::solve;

/// Errors raised by [`Session`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Naming(#[from] NamingError),

    /// A graph was used before it was started.
    #[error("the {0} graph has not been started")]
    NoGraph(GraphKind),
}

/// Which side of the match a call refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphKind {
    Pattern,
    Target,
}

impl std::fmt::Display for GraphKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphKind::Pattern => f.write_str("pattern"),
            GraphKind::Target => f.write_str("target"),
        }
    }
}

/// One pattern, one target, and the solutions of the last solve.
#[derive(Debug, Default)]
pub struct Session {
    pattern: Option<InputGraph>,
    target: Option<InputGraph>,
    results: Results,
    link_scheme: LinkScheme,
    deadline: Deadline,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read port names under `scheme` instead of trying both conventions.
    pub fn with_link_scheme(mut self, scheme: LinkScheme) -> Self {
        self.link_scheme = scheme;
        self
    }

    /// Time limit shared by every subsequent solve.
    pub fn set_deadline(&mut self, deadline: Deadline) {
        self.deadline = deadline;
    }

    /// Replace the pattern with an empty graph of `size` vertices.
    pub fn start_pattern(&mut self, size: usize) {
        self.pattern = Some(InputGraph::new(size, true, true));
    }

    /// Replace the target with an empty graph of `size` vertices.
    pub fn start_target(&mut self, size: usize) {
        self.target = Some(InputGraph::new(size, true, true));
    }

    pub fn graph(&self, kind: GraphKind) -> Result<&InputGraph, SessionError> {
        let graph = match kind {
            GraphKind::Pattern => self.pattern.as_ref(),
            GraphKind::Target => self.target.as_ref(),
        };
        graph.ok_or(SessionError::NoGraph(kind))
    }

    fn graph_mut(&mut self, kind: GraphKind) -> Result<&mut InputGraph, SessionError> {
        let graph = match kind {
            GraphKind::Pattern => self.pattern.as_mut(),
            GraphKind::Target => self.target.as_mut(),
        };
        graph.ok_or(SessionError::NoGraph(kind))
    }

    fn graphs(&self) -> Result<(&InputGraph, &InputGraph), SessionError> {
        Ok((self.graph(GraphKind::Pattern)?, self.graph(GraphKind::Target)?))
    }

    /// Describe vertex `i`: its control label, its name, the roots it sits
    /// directly under and the sites directly under it.
    pub fn add_node(
        &mut self,
        kind: GraphKind,
        i: usize,
        label: &str,
        name: &str,
        roots: &[usize],
        sites: &[usize],
    ) -> Result<(), SessionError> {
        let graph = self.graph_mut(kind)?;
        graph.set_vertex_label(i, label)?;
        graph.set_vertex_name(i, name)?;
        for &r in roots {
            graph.add_pattern_root_edge(r, i)?;
            graph.set_child_of_root(i)?;
        }
        for &s in sites {
            graph.add_pattern_site_edge(i, s)?;
            graph.set_parent_of_site(i)?;
        }
        Ok(())
    }

    /// A directed, unlabelled edge `i -> j`.
    pub fn add_edge(&mut self, kind: GraphKind, i: usize, j: usize) -> Result<(), SessionError> {
        self.graph_mut(kind)?.add_directed_edge(i, j, "")?;
        Ok(())
    }

    fn configure(&self, mut config: Config) -> Config {
        config.timeout = self.deadline.clone();
        config.link_scheme = self.link_scheme;
        config
    }

    /// Find one occurrence of the pattern. Returns whether one exists.
    pub fn match_one(&mut self) -> Result<bool, SessionError> {
        self.results.clear();
        let config = self.configure(Config::bigraph_search(false));
        let (pattern, target) = self.graphs()?;
        let outcome = solve(pattern, target, &config, None);

        self.results.count = outcome.solution_count;
        if outcome.found() {
            self.results.push(outcome.mapping);
        }
        Ok(self.results.match_found())
    }

    /// Find every occurrence of the pattern. Returns how many there are.
    pub fn match_all(&mut self) -> Result<u64, SessionError> {
        self.results.clear();
        let config = self.configure(Config::bigraph_search(true));
        let (pattern, target) = self.graphs()?;
        let mut keep_going = |_: &VertexMapping| true;
        let outcome = solve(pattern, target, &config, Some(&mut keep_going));

        self.results.count = outcome.solution_count;
        self.results.mapping = outcome.mappings;
        Ok(self.results.count)
    }

    /// Count occurrences without keeping them.
    pub fn count_solutions(&mut self) -> Result<u64, SessionError> {
        self.results.clear();
        let config = self.configure(Config::bigraph_search(true));
        let (pattern, target) = self.graphs()?;
        let outcome = solve(pattern, target, &config, None);

        self.results.count = outcome.solution_count;
        Ok(self.results.count)
    }

    /// Whether the two graphs describe the same bigraph: an isomorphism
    /// exists that is the identity on root indices and on link ports.
    pub fn equal(&mut self) -> Result<bool, SessionError> {
        self.results.clear();
        let config = self.configure(Config::bigraph_equality());
        let (pattern, target) = self.graphs()?;
        let (equal, outcome) = bigraph_equal(pattern, target, &config);

        self.results.count = outcome.solution_count;
        self.results.mapping = outcome.mappings;
        Ok(equal)
    }

    /// Solutions of the last solve.
    pub fn results(&self) -> &Results {
        &self.results
    }

    /// The next stored solution, `None` once all have been handed out.
    pub fn next_solution(&mut self) -> Option<&VertexMapping> {
        self.results.next_solution()
    }

    /// Closed link index in the pattern to closed link index in the target.
    pub fn edges(&self, m: &VertexMapping) -> Result<BTreeMap<usize, usize>, SessionError> {
        let (pattern, target) = self.graphs()?;
        let mut edges = BTreeMap::new();
        for (p, t) in m.iter() {
            let p_name = pattern.vertex_name(p);
            if !is_closed_link(&p_name) {
                continue;
            }
            let t_name = target.vertex_name(t);
            let from = closed_link_index(&p_name)
                .ok_or_else(|| NamingError::unrecognised(&*p_name, "closed link"))?;
            let to = closed_link_index(&t_name)
                .ok_or_else(|| NamingError::unrecognised(&*t_name, "closed link"))?;
            edges.insert(from, to);
        }
        Ok(edges)
    }

    /// Place graph vertex in the pattern to place graph vertex in the
    /// target, both read from the numeric vertex names.
    pub fn nodes(&self, m: &VertexMapping) -> Result<BTreeMap<usize, usize>, SessionError> {
        let (pattern, target) = self.graphs()?;
        let mut nodes = BTreeMap::new();
        for (p, t) in m.iter() {
            let p_name = pattern.vertex_name(p);
            if is_closed_link(&p_name) || pattern.vertex_label(p) == LINK_LABEL {
                continue;
            }
            let t_name = target.vertex_name(t);
            let from = p_name
                .parse()
                .map_err(|_| NamingError::unrecognised(&*p_name, "place"))?;
            let to = t_name
                .parse()
                .map_err(|_| NamingError::unrecognised(&*t_name, "place"))?;
            nodes.insert(from, to);
        }
        Ok(nodes)
    }

    /// `(pattern open port, target port)` pairs in mapping order.
    pub fn hyperedges(&self, m: &VertexMapping) -> Result<Vec<(usize, usize)>, SessionError> {
        let (pattern, target) = self.graphs()?;
        Ok(port_pairs(pattern, target, m, self.link_scheme).collect())
    }

    /// The mapping as a BigraphER occurrence block.
    pub fn render(&self, m: &VertexMapping) -> Result<String, SessionError> {
        let (pattern, target) = self.graphs()?;
        Ok(render_mapping(pattern, target, m, self.link_scheme))
    }
}

/// Equality check over two complete graphs under `config`, which should
/// be an equality configuration such as [`Config::bigraph_equality`].
///
/// Graphs with different vertex or edge counts are unequal without a search.
/// Otherwise the enumeration stops at the first mapping that is the identity
/// on the interface.
pub fn bigraph_equal(
    pattern: &InputGraph,
    target: &InputGraph,
    config: &Config,
) -> (bool, SolveOutcome) {
    if pattern.size() != target.size()
        || pattern.number_of_directed_edges() != target.number_of_directed_edges()
    {
        debug!(
            pattern_size = pattern.size(),
            target_size = target.size(),
            "Graphs differ in size"
        );
        return (false, SolveOutcome::unsatisfiable());
    }

    let scheme = config.link_scheme;
    let mut keep_going = |m: &VertexMapping| !interface_is_identity(pattern, target, m, scheme);
    let outcome = solve(pattern, target, config, Some(&mut keep_going));
    let equal = outcome
        .mappings
        .iter()
        .any(|m| interface_is_identity(pattern, target, m, scheme));
    (equal, outcome)
}

fn port_pairs<'a>(
    pattern: &'a InputGraph,
    target: &'a InputGraph,
    m: &'a VertexMapping,
    scheme: LinkScheme,
) -> impl Iterator<Item = (usize, usize)> + 'a {
    m.iter()
        .filter(|&(p, _)| pattern.vertex_label(p) == LINK_LABEL)
        .filter_map(move |(p, t)| {
            let from = open_port(&pattern.vertex_name(p), scheme)?;
            let to = any_port(&target.vertex_name(t), scheme)?;
            Some((from, to))
        })
}

/// Root indices map to themselves and every decodable open port keeps its
/// port number.
fn interface_is_identity(
    pattern: &InputGraph,
    target: &InputGraph,
    m: &VertexMapping,
    scheme: LinkScheme,
) -> bool {
    let roots_fixed = m.iter().all(|(p, t)| match root_index(&pattern.vertex_name(p)) {
        Some(k) => root_index(&target.vertex_name(t)) == Some(k),
        None => true,
    });
    roots_fixed && port_pairs(pattern, target, m, scheme).all(|(from, to)| from == to)
}

/// Render `m` in the format BigraphER reads back: `S`, then `E` lines for
/// closed links, `N` lines for place vertices, `H` lines grouping target
/// ports by pattern port, then `D`.
pub fn render_mapping(
    pattern: &InputGraph,
    target: &InputGraph,
    m: &VertexMapping,
    scheme: LinkScheme,
) -> String {
    let mut out = String::from("S\n");
    for (p, t) in m.iter() {
        let p_name = pattern.vertex_name(p);
        let t_name = target.vertex_name(t);
        if is_closed_link(&p_name) {
            let suffix = |name: &str| name.get(7..).unwrap_or_default().to_owned();
            let _ = writeln!(out, "E {} {}", suffix(&p_name), suffix(&t_name));
        } else if pattern.vertex_label(p) != LINK_LABEL {
            let _ = writeln!(out, "N {p_name} {t_name}");
        }
    }

    let mut hyperedges: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    for (from, to) in port_pairs(pattern, target, m, scheme) {
        hyperedges.entry(from).or_default().insert(to);
    }
    for (from, tos) in hyperedges {
        let _ = write!(out, "H {from} ");
        for to in tos {
            let _ = write!(out, "{to} ");
        }
        out.push('\n');
    }

    out.push_str("D\n");
    out
}
