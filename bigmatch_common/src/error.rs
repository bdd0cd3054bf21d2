//! Error types for graph construction and name decoding.

use thiserror::Error;

/// Errors raised by the input graph builder.
///
/// These are the only errors the matching pipeline reports: everything that
/// can go wrong is caught at the input boundary, before a solve starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A name or label contains characters that are not printable.
    #[error("Suspicious input detected: {what} '{safe}' contains non-printable characters")]
    NonPrintable {
        /// Which kind of string was rejected ("vertex name", "edge label", ...).
        what: &'static str,
        /// The offending string with every non-printable character replaced by `?`.
        safe: String,
    },

    /// A vertex index does not exist in the graph.
    #[error("vertex {vertex} is out of range for a graph of size {size}")]
    VertexOutOfRange {
        /// The index that was passed.
        vertex: usize,
        /// The current vertex count.
        size: usize,
    },

    /// A vertex name is already used by a different vertex.
    #[error("vertex name '{name}' is already used by vertex {existing}")]
    DuplicateName {
        /// The rejected name.
        name: String,
        /// The vertex that already owns the name.
        existing: usize,
    },
}

/// Errors raised while decoding bigraph vertex names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// The name does not follow the expected convention.
    #[error("vertex name '{name}' is not a valid {expected} name")]
    Unrecognised {
        /// The name that was decoded.
        name: String,
        /// The convention it was read under.
        expected: &'static str,
    },
}

impl NamingError {
    /// Create an unrecognised-name error.
    pub fn unrecognised(name: impl Into<String>, expected: &'static str) -> Self {
        Self::Unrecognised {
            name: name.into(),
            expected,
        }
    }
}
