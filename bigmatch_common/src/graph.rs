//! The mutable input graph handed to the solver.
//!
//! An [`InputGraph`] is filled in by a reader (or the session API) and then
//! treated as frozen for the lifetime of a solve. Besides ordinary labelled
//! vertices and directed, labelled edges it carries the bigraph tables: root
//! and site edges, per-vertex place-graph constraints, and the directed degree
//! counters that ignore link-graph edges.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use contracts::debug_ensures;

use crate::GraphError;

/// Vertex label reserved for link-graph port vertices.
pub const LINK_LABEL: &str = "LINK";
/// Vertex label reserved for the place-graph end of a link.
pub const ANCHOR_LABEL: &str = "ANCHOR";

fn sanity_check_name(name: &str, what: &'static str) -> Result<(), GraphError> {
    if name.bytes().all(|b| b.is_ascii_graphic()) {
        return Ok(());
    }
    let safe = name
        .chars()
        .map(|c| if c.is_ascii_graphic() { c } else { '?' })
        .collect();
    Err(GraphError::NonPrintable { what, safe })
}

/// A directed multigraph with bigraph metadata.
#[derive(Clone, Debug, Default)]
pub struct InputGraph {
    size: usize,
    has_vertex_labels: bool,
    has_edge_labels: bool,
    edges: BTreeMap<(usize, usize), String>,
    vertex_labels: Vec<String>,
    names_by_vertex: HashMap<usize, String>,
    vertices_by_name: HashMap<String, usize>,
    loopy: bool,
    directed: bool,

    // Bigraphs
    no_link_nodes: usize,
    /// (in, out) per vertex, excluding edges that touch a LINK vertex.
    vertex_directed_degrees: Vec<(usize, usize)>,
    /// (child of root, parent of site) per vertex.
    vertex_pattern_constraints: Vec<(bool, bool)>,
    pattern_site_edges: Vec<(usize, usize)>,
    pattern_root_edges: Vec<(usize, usize)>,
}

impl InputGraph {
    /// Create a graph with `size` unlabelled, unnamed vertices.
    #[debug_ensures(ret.size() == size)]
    pub fn new(size: usize, has_vertex_labels: bool, has_edge_labels: bool) -> Self {
        let mut graph = Self {
            has_vertex_labels,
            has_edge_labels,
            ..Default::default()
        };
        graph.resize(size);
        graph
    }

    /// Grow or shrink the vertex set. Edges and names that refer to removed
    /// vertices are dropped.
    #[debug_ensures(self.size() == size)]
    pub fn resize(&mut self, size: usize) {
        if size < self.size {
            self.edges.retain(|&(a, b), _| a < size && b < size);
            self.loopy = self.edges.keys().any(|&(a, b)| a == b);
            let removed: Vec<usize> = self
                .names_by_vertex
                .keys()
                .copied()
                .filter(|&v| v >= size)
                .collect();
            for v in removed {
                if let Some(name) = self.names_by_vertex.remove(&v) {
                    self.vertices_by_name.remove(&name);
                }
            }
            self.pattern_root_edges.retain(|&(_, v)| v < size);
            self.pattern_site_edges.retain(|&(v, _)| v < size);
        }
        self.size = size;
        self.vertex_labels.resize(size, String::new());
        self.vertex_pattern_constraints.resize(size, (false, false));
        self.vertex_directed_degrees.resize(size, (0, 0));
    }

    fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex < self.size {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                size: self.size,
            })
        }
    }

    /// Number of vertices.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Add an undirected, unlabelled edge, stored as both directions.
    ///
    /// # Errors
    /// Fails if either endpoint is out of range.
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<(), GraphError> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        self.edges.entry((a, b)).or_default();
        self.edges.entry((b, a)).or_default();
        if a == b {
            self.loopy = true;
        }
        Ok(())
    }

    /// Add a directed edge with a label, overwriting the label of an existing
    /// edge. Also updates the bigraph degree counters, which depend on the
    /// labels the endpoints carry at this point.
    ///
    /// # Errors
    /// Fails if either endpoint is out of range or the label is not printable.
    pub fn add_directed_edge(&mut self, a: usize, b: usize, label: &str) -> Result<(), GraphError> {
        sanity_check_name(label, "edge label")?;
        self.check_vertex(a)?;
        self.check_vertex(b)?;

        self.directed = true;
        self.edges.insert((a, b), label.to_string());
        if a == b {
            self.loopy = true;
        }

        // Bigraphs
        let a_link = self.vertex_label(a) == LINK_LABEL;
        let b_link = self.vertex_label(b) == LINK_LABEL;
        if !a_link && !b_link {
            self.vertex_directed_degrees[b].0 += 1;
            self.vertex_directed_degrees[a].1 += 1;
        }
        if a_link && self.vertex_label(b) == ANCHOR_LABEL {
            self.vertex_directed_degrees[b].0 += 1;
        }
        Ok(())
    }

    /// Whether the directed edge `a -> b` exists.
    pub fn adjacent(&self, a: usize, b: usize) -> bool {
        self.edges.contains_key(&(a, b))
    }

    /// Number of stored directed edges (an undirected edge counts twice).
    pub fn number_of_directed_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of stored edges leaving `a`.
    pub fn degree(&self, a: usize) -> usize {
        self.edges.range((a, 0)..=(a, usize::MAX)).count()
    }

    /// Bigraph in-degree counter of `v`.
    pub fn in_degree(&self, v: usize) -> usize {
        self.vertex_directed_degrees[v].0
    }

    /// Bigraph out-degree counter of `v`.
    pub fn out_degree(&self, v: usize) -> usize {
        self.vertex_directed_degrees[v].1
    }

    /// Whether any self-loop exists.
    pub fn loopy(&self) -> bool {
        self.loopy
    }

    /// Whether any edge was added with [`InputGraph::add_directed_edge`].
    pub fn directed(&self) -> bool {
        self.directed
    }

    /// Whether vertex labels are meaningful for this graph.
    pub fn has_vertex_labels(&self) -> bool {
        self.has_vertex_labels
    }

    /// Whether edge labels are meaningful for this graph.
    pub fn has_edge_labels(&self) -> bool {
        self.has_edge_labels
    }

    /// Set the label of `v`. An empty label leaves the current one in place.
    ///
    /// # Errors
    /// Fails if `v` is out of range or the label is not printable.
    pub fn set_vertex_label(&mut self, v: usize, label: &str) -> Result<(), GraphError> {
        sanity_check_name(label, "vertex label")?;
        self.check_vertex(v)?;
        if !label.is_empty() {
            self.vertex_labels[v] = label.to_string();
        }
        if label == LINK_LABEL || label == ANCHOR_LABEL {
            self.no_link_nodes += 1;
        }
        Ok(())
    }

    /// The label of `v`, empty when unlabelled.
    pub fn vertex_label(&self, v: usize) -> &str {
        &self.vertex_labels[v]
    }

    /// Set the name of `v`, replacing any previous name. An empty name
    /// clears it.
    ///
    /// # Errors
    /// Fails if `v` is out of range, the name is not printable, or another
    /// vertex already carries the name.
    pub fn set_vertex_name(&mut self, v: usize, name: &str) -> Result<(), GraphError> {
        sanity_check_name(name, "vertex name")?;
        self.check_vertex(v)?;
        match self.vertices_by_name.get(name) {
            Some(&existing) if existing != v => {
                return Err(GraphError::DuplicateName {
                    name: name.to_string(),
                    existing,
                });
            }
            _ => {}
        }
        if let Some(old) = self.names_by_vertex.remove(&v) {
            self.vertices_by_name.remove(&old);
        }
        if !name.is_empty() {
            self.names_by_vertex.insert(v, name.to_string());
            self.vertices_by_name.insert(name.to_string(), v);
        }
        Ok(())
    }

    /// The name of `v`, or its decimal index when unnamed.
    pub fn vertex_name(&self, v: usize) -> Cow<'_, str> {
        match self.names_by_vertex.get(&v) {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(v.to_string()),
        }
    }

    /// The explicit name of `v`, if one was set.
    pub fn explicit_vertex_name(&self, v: usize) -> Option<&str> {
        self.names_by_vertex.get(&v).map(String::as_str)
    }

    /// Look a vertex up by its explicit name.
    pub fn vertex_from_name(&self, name: &str) -> Option<usize> {
        self.vertices_by_name.get(name).copied()
    }

    /// The label of the edge `a -> b`, if the edge exists.
    pub fn edge_label(&self, a: usize, b: usize) -> Option<&str> {
        self.edges.get(&(a, b)).map(String::as_str)
    }

    /// Iterate over `(from, to, label)` in `(from, to)` order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, &str)> + '_ {
        self.edges.iter().map(|(&(a, b), l)| (a, b, l.as_str()))
    }

    /// Call `f` once per stored edge, in `(from, to)` order.
    pub fn for_each_edge(&self, mut f: impl FnMut(usize, usize, &str)) {
        for (a, b, l) in self.edges() {
            f(a, b, l);
        }
    }

    /// Record that `v` is a child of root `r`.
    ///
    /// # Errors
    /// Fails if `v` is out of range.
    pub fn add_pattern_root_edge(&mut self, r: usize, v: usize) -> Result<(), GraphError> {
        self.check_vertex(v)?;
        self.pattern_root_edges.push((r, v));
        Ok(())
    }

    /// Record that `v` is a parent of site `s`.
    ///
    /// # Errors
    /// Fails if `v` is out of range.
    pub fn add_pattern_site_edge(&mut self, v: usize, s: usize) -> Result<(), GraphError> {
        self.check_vertex(v)?;
        self.pattern_site_edges.push((v, s));
        Ok(())
    }

    /// All `(root, vertex)` pairs, in insertion order.
    pub fn pattern_root_edges(&self) -> &[(usize, usize)] {
        &self.pattern_root_edges
    }

    /// All `(vertex, site)` pairs, in insertion order.
    pub fn pattern_site_edges(&self) -> &[(usize, usize)] {
        &self.pattern_site_edges
    }

    /// Flag `v` as a child of some root.
    ///
    /// # Errors
    /// Fails if `v` is out of range.
    pub fn set_child_of_root(&mut self, v: usize) -> Result<(), GraphError> {
        self.check_vertex(v)?;
        self.vertex_pattern_constraints[v].0 = true;
        Ok(())
    }

    /// Flag `v` as a parent of some site.
    ///
    /// # Errors
    /// Fails if `v` is out of range.
    pub fn set_parent_of_site(&mut self, v: usize) -> Result<(), GraphError> {
        self.check_vertex(v)?;
        self.vertex_pattern_constraints[v].1 = true;
        Ok(())
    }

    /// `(child of root, parent of site)` for `v`.
    pub fn big_constraint(&self, v: usize) -> (bool, bool) {
        self.vertex_pattern_constraints[v]
    }

    /// Append a vertex labelled `LINK` and return its index.
    #[debug_ensures(self.vertex_label(ret) == LINK_LABEL)]
    pub fn add_link_node(&mut self) -> usize {
        let v = self.size;
        self.resize(v + 1);
        self.vertex_labels[v] = LINK_LABEL.to_string();
        self.no_link_nodes += 1;
        v
    }

    /// Number of vertices labelled `LINK` or `ANCHOR` so far.
    pub fn no_link_nodes(&self) -> usize {
        self.no_link_nodes
    }
}

impl fmt::Display for InputGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Size: {}", self.size)?;
        writeln!(f, "Vertex Labels: {}", self.has_vertex_labels)?;
        writeln!(f, "Edge Labels: {}", self.has_edge_labels)?;
        writeln!(f, "Link nodes: {}", self.no_link_nodes)?;
        writeln!(f, "Loopy: {}", self.loopy)?;
        writeln!(f, "Directed: {}", self.directed)?;
        writeln!(f, "Vertex Labels:")?;
        for l in &self.vertex_labels {
            write!(f, "{l};")?;
        }
        writeln!(f, "\nVertex Names:")?;
        let mut names: Vec<_> = self.names_by_vertex.iter().collect();
        names.sort_unstable();
        for (v, n) in names {
            write!(f, "{v}->{n};")?;
        }
        writeln!(f, "\nEdges: {}", self.edges.len())?;
        for (a, b, l) in self.edges() {
            write!(f, "[{a}-[{l}]->{b}];")?;
        }
        writeln!(f, "\nPattern Root Edges: {}", self.pattern_root_edges.len())?;
        for (r, v) in &self.pattern_root_edges {
            write!(f, "[{r}-->{v}];")?;
        }
        writeln!(f, "\nPattern Site Edges: {}", self.pattern_site_edges.len())?;
        for (v, s) in &self.pattern_site_edges {
            write!(f, "[{v}-->{s}];")?;
        }
        writeln!(
            f,
            "\nVertex Directed Degrees: {}",
            self.vertex_directed_degrees.len()
        )?;
        for (i, o) in &self.vertex_directed_degrees {
            write!(f, "[{i}-->{o}];")?;
        }
        writeln!(
            f,
            "\nVertex Pattern Constraints: {}",
            self.vertex_pattern_constraints.len()
        )?;
        for &(c, p) in &self.vertex_pattern_constraints {
            let flag = |b: bool| if b { "T" } else { "F" };
            write!(f, "[{}-->{}];", flag(c), flag(p))?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_edge_is_stored_both_ways() {
        let mut g = InputGraph::new(3, false, false);
        g.add_edge(0, 1).unwrap();
        assert!(g.adjacent(0, 1));
        assert!(g.adjacent(1, 0));
        assert_eq!(g.number_of_directed_edges(), 2);
        assert_eq!(g.degree(0), 1);
        assert!(!g.directed());
        assert!(!g.loopy());
    }

    #[test]
    fn self_loop_marks_graph_loopy() {
        let mut g = InputGraph::new(2, false, false);
        g.add_directed_edge(1, 1, "").unwrap();
        assert!(g.loopy());
        assert!(g.directed());
    }

    #[test]
    fn directed_edge_overwrites_label() {
        let mut g = InputGraph::new(2, false, true);
        g.add_directed_edge(0, 1, "a").unwrap();
        g.add_directed_edge(0, 1, "b").unwrap();
        assert_eq!(g.edge_label(0, 1), Some("b"));
        assert_eq!(g.edge_label(1, 0), None);
    }

    #[test]
    fn link_edges_do_not_count_towards_degrees() {
        let mut g = InputGraph::new(3, true, false);
        g.set_vertex_label(0, LINK_LABEL).unwrap();
        g.set_vertex_label(1, ANCHOR_LABEL).unwrap();
        g.add_directed_edge(0, 1, "").unwrap();
        g.add_directed_edge(1, 2, "").unwrap();
        g.add_directed_edge(2, 0, "").unwrap();

        // LINK -> ANCHOR only counts on the anchor's in-degree.
        assert_eq!(g.in_degree(1), 1);
        assert_eq!(g.out_degree(0), 0);
        assert_eq!(g.out_degree(1), 1);
        assert_eq!(g.in_degree(2), 1);
        // Edges into a LINK are ignored entirely.
        assert_eq!(g.out_degree(2), 0);
        assert_eq!(g.in_degree(0), 0);
        assert_eq!(g.no_link_nodes(), 2);
    }

    #[test]
    fn names_are_unique_and_fall_back_to_index() {
        let mut g = InputGraph::new(3, false, false);
        g.set_vertex_name(0, "ROOT0").unwrap();
        assert_eq!(g.vertex_name(0), "ROOT0");
        assert_eq!(g.vertex_name(2), "2");
        assert_eq!(g.vertex_from_name("ROOT0"), Some(0));

        let err = g.set_vertex_name(1, "ROOT0").unwrap_err();
        assert_eq!(
            err,
            GraphError::DuplicateName {
                name: "ROOT0".into(),
                existing: 0
            }
        );

        g.set_vertex_name(0, "A").unwrap();
        assert_eq!(g.vertex_from_name("ROOT0"), None);
        assert_eq!(g.vertex_from_name("A"), Some(0));
    }

    #[test]
    fn non_printable_names_are_rejected() {
        let mut g = InputGraph::new(1, true, true);
        let err = g.set_vertex_name(0, "bad\tname").unwrap_err();
        assert_eq!(
            err,
            GraphError::NonPrintable {
                what: "vertex name",
                safe: "bad?name".into()
            }
        );
        assert!(g.set_vertex_label(0, "sp ace").is_err());
        assert!(g.add_directed_edge(0, 0, "new\nline").is_err());
    }

    #[test]
    fn out_of_range_vertices_are_rejected() {
        let mut g = InputGraph::new(2, false, false);
        assert_eq!(
            g.add_edge(0, 2),
            Err(GraphError::VertexOutOfRange { vertex: 2, size: 2 })
        );
        assert!(g.set_child_of_root(5).is_err());
    }

    #[test]
    fn shrinking_drops_edges_and_names() {
        let mut g = InputGraph::new(3, false, false);
        g.add_edge(0, 2).unwrap();
        g.add_edge(2, 2).unwrap();
        g.add_edge(0, 1).unwrap();
        g.set_vertex_name(2, "gone").unwrap();
        g.resize(2);
        assert_eq!(g.number_of_directed_edges(), 2);
        assert!(!g.loopy());
        assert_eq!(g.vertex_from_name("gone"), None);
    }

    #[test]
    fn add_link_node_appends_a_link_vertex() {
        let mut g = InputGraph::new(1, true, false);
        let v = g.add_link_node();
        assert_eq!(v, 1);
        assert_eq!(g.size(), 2);
        assert_eq!(g.vertex_label(1), LINK_LABEL);
        assert_eq!(g.no_link_nodes(), 1);
    }

    #[test]
    fn display_lists_edges_and_constraints() {
        let mut g = InputGraph::new(2, false, true);
        g.add_directed_edge(0, 1, "x").unwrap();
        g.set_child_of_root(1).unwrap();
        let text = g.to_string();
        assert!(text.contains("Size: 2"));
        assert!(text.contains("[0-[x]->1];"));
        assert!(text.contains("[F-->F];[T-->F];"));
    }
}
