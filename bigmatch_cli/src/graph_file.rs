//! JSON graph descriptions read by the driver.

use std::fs;
use std::path::{Path, PathBuf};

use bigmatch_common::{GraphError, InputGraph};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a graph file.
#[derive(Debug, Error)]
pub enum GraphFileError {
    #[error("{path}: unable to open graph file: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: invalid graph description: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: {source}")]
    Graph {
        path: PathBuf,
        #[source]
        source: GraphError,
    },
}

/// One vertex of a graph file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexEntry {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub name: String,
    /// Roots this vertex sits directly under.
    #[serde(default)]
    pub roots: Vec<usize>,
    /// Sites directly under this vertex.
    #[serde(default)]
    pub sites: Vec<usize>,
}

/// One edge of a graph file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeEntry {
    pub from: usize,
    pub to: usize,
    #[serde(default)]
    pub label: String,
}

/// A whole graph file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphFile {
    /// Undirected files store every edge in both directions.
    #[serde(default = "default_directed")]
    pub directed: bool,
    pub vertices: Vec<VertexEntry>,
    #[serde(default)]
    pub edges: Vec<EdgeEntry>,
}

fn default_directed() -> bool {
    true
}

impl GraphFile {
    /// Read and parse a graph file.
    pub fn read(path: &Path) -> Result<Self, GraphFileError> {
        let text = fs::read_to_string(path).map_err(|source| GraphFileError::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| GraphFileError::Json {
            path: path.to_owned(),
            source,
        })
    }

    /// Build the solver's graph. Labels are enabled when any vertex or
    /// edge carries one.
    pub fn to_graph(&self) -> Result<InputGraph, GraphError> {
        let has_vertex_labels = self.vertices.iter().any(|v| !v.label.is_empty());
        let has_edge_labels = self.edges.iter().any(|e| !e.label.is_empty());
        let mut graph = InputGraph::new(self.vertices.len(), has_vertex_labels, has_edge_labels);

        for (i, vertex) in self.vertices.iter().enumerate() {
            graph.set_vertex_label(i, &vertex.label)?;
            graph.set_vertex_name(i, &vertex.name)?;
            for &r in &vertex.roots {
                graph.add_pattern_root_edge(r, i)?;
                graph.set_child_of_root(i)?;
            }
            for &s in &vertex.sites {
                graph.add_pattern_site_edge(i, s)?;
                graph.set_parent_of_site(i)?;
            }
        }

        for edge in &self.edges {
            if self.directed {
                graph.add_directed_edge(edge.from, edge.to, &edge.label)?;
            } else {
                graph.add_edge(edge.from, edge.to)?;
            }
        }
        Ok(graph)
    }
}

/// Read a graph file and build its graph.
pub fn load_graph(path: &Path) -> Result<InputGraph, GraphFileError> {
    let file = GraphFile::read(path)?;
    let graph = file.to_graph().map_err(|source| GraphFileError::Graph {
        path: path.to_owned(),
        source,
    })?;
    debug!(
        path = %path.display(),
        vertices = graph.size(),
        edges = graph.number_of_directed_edges(),
        "Loaded graph"
    );
    Ok(graph)
}
