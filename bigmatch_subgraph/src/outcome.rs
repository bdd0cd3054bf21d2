//! What a solve reports back.

use std::fmt;

use crate::embedding::VertexMapping;

/// Why the search stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// Every branch was explored.
    Exhausted,
    /// A single solution was requested and found.
    FoundOne,
    /// The enumeration callback asked to stop.
    CallbackStopped,
    /// The deadline expired.
    TimedOut,
    /// No solution can exist; detected before search.
    Unsatisfiable,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::Exhausted => "exhausted",
            StopReason::FoundOne => "found one",
            StopReason::CallbackStopped => "stopped by callback",
            StopReason::TimedOut => "timed out",
            StopReason::Unsatisfiable => "unsatisfiable",
        };
        f.write_str(s)
    }
}

/// The result of one solve.
#[derive(Clone, Debug)]
pub struct SolveOutcome {
    /// The first solution found, empty when there was none.
    pub mapping: VertexMapping,
    /// Number of solutions emitted.
    pub solution_count: u64,
    /// False when the search was cut short by the deadline or the callback.
    pub completed: bool,
    /// Number of search nodes visited.
    pub nodes_visited: u64,
    /// Every emitted solution, when an enumeration callback was supplied.
    pub mappings: Vec<VertexMapping>,
    /// Why the search stopped.
    pub stop: StopReason,
}

impl SolveOutcome {
    pub(crate) fn new() -> Self {
        Self {
            mapping: VertexMapping::new(),
            solution_count: 0,
            completed: true,
            nodes_visited: 0,
            mappings: Vec::new(),
            stop: StopReason::Exhausted,
        }
    }

    pub(crate) fn unsatisfiable() -> Self {
        Self {
            stop: StopReason::Unsatisfiable,
            ..Self::new()
        }
    }

    /// Whether at least one solution was found.
    #[must_use]
    pub fn found(&self) -> bool {
        self.solution_count > 0
    }

    pub(crate) fn finish(&mut self, stop: StopReason) {
        self.stop = stop;
        self.completed = !matches!(stop, StopReason::TimedOut | StopReason::CallbackStopped);
    }
}

/// Mappings retained by a session between solves, with a streaming cursor.
#[derive(Clone, Debug, Default)]
pub struct Results {
    /// Stored solutions.
    pub mapping: Vec<VertexMapping>,
    /// Index of the next solution handed out by [`Results::next_solution`].
    pub next: usize,
    /// Aggregate solution count.
    pub count: u64,
}

impl Results {
    /// Forget every stored solution.
    pub fn clear(&mut self) {
        self.mapping.clear();
        self.next = 0;
        self.count = 0;
    }

    /// Whether any solution is stored.
    #[must_use]
    pub fn match_found(&self) -> bool {
        !self.mapping.is_empty()
    }

    /// Store a solution.
    pub fn push(&mut self, mapping: VertexMapping) {
        self.mapping.push(mapping);
    }

    /// The next stored solution, `None` once all have been handed out.
    pub fn next_solution(&mut self) -> Option<&VertexMapping> {
        let mapping = self.mapping.get(self.next)?;
        self.next += 1;
        Some(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_walks_stored_solutions() {
        let mut results = Results::default();
        results.push([(0, 1)].into_iter().collect());
        results.push([(0, 2)].into_iter().collect());
        assert!(results.match_found());

        assert_eq!(results.next_solution().and_then(|m| m.get_target(0)), Some(1));
        assert_eq!(results.next_solution().and_then(|m| m.get_target(0)), Some(2));
        assert!(results.next_solution().is_none());

        results.clear();
        assert!(!results.match_found());
        assert_eq!(results.next, 0);
    }

    #[test]
    fn interrupted_searches_are_incomplete() {
        let mut outcome = SolveOutcome::new();
        outcome.finish(StopReason::FoundOne);
        assert!(outcome.completed);
        outcome.finish(StopReason::TimedOut);
        assert!(!outcome.completed);
        outcome.finish(StopReason::CallbackStopped);
        assert!(!outcome.completed);
    }
}
