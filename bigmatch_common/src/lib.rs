//! Common types shared across the bigmatch workspace.
//!
//! This crate provides the input graph builder consumed by the solver, the
//! bigraph naming conventions, solver configuration, the shared deadline
//! handle, and the scenario test cases used across the project.

mod config;
mod deadline;
mod error;
mod graph;
pub mod naming;
mod test_cases;

pub use crate::config::*;
pub use crate::deadline::*;
pub use crate::error::*;
pub use crate::graph::*;
pub use crate::test_cases::*;
