//! Mapping between pattern and target vertices.

use std::collections::BTreeMap;
use std::fmt;

use contracts::*;

/// A pattern-to-target vertex mapping.
///
/// Both directions are kept in ordered maps so that iteration follows
/// pattern (respectively target) index order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VertexMapping {
    /// Pattern to target vertex mapping
    pattern_to_target: BTreeMap<usize, usize>,
    /// Target to pattern vertex mapping
    target_to_pattern: BTreeMap<usize, Vec<usize>>,
}

impl VertexMapping {
    /// Checks if the mapping is internally consistent.
    ///
    /// Verifies that the two directions describe the same set of pairs.
    pub fn is_consistent(&self) -> bool {
        let total: usize = self.target_to_pattern.values().map(Vec::len).sum();
        if total != self.pattern_to_target.len() {
            return false;
        }
        self.pattern_to_target.iter().all(|(pattern, target)| {
            self.target_to_pattern
                .get(target)
                .is_some_and(|v| v.contains(pattern))
        })
    }

    /// Creates a new, empty mapping.
    #[ensures(ret.is_consistent())]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `pattern` to `target`, replacing any previous image of `pattern`.
    #[ensures(self.is_consistent())]
    pub fn assign(&mut self, pattern: usize, target: usize) {
        self.remove_by_pattern(pattern);
        self.pattern_to_target.insert(pattern, target);
        self.target_to_pattern
            .entry(target)
            .or_default()
            .push(pattern);
    }

    /// Removes the image of a pattern vertex.
    #[ensures(self.is_consistent())]
    pub fn remove_by_pattern(&mut self, pattern: usize) -> Option<usize> {
        let target = self.pattern_to_target.remove(&pattern)?;
        if let Some(patterns) = self.target_to_pattern.get_mut(&target) {
            patterns.retain(|&p| p != pattern);
            if patterns.is_empty() {
                self.target_to_pattern.remove(&target);
            }
        }
        Some(target)
    }

    /// The image of a pattern vertex.
    #[must_use]
    pub fn get_target(&self, pattern: usize) -> Option<usize> {
        self.pattern_to_target.get(&pattern).copied()
    }

    /// Every pattern vertex mapped onto `target`.
    #[must_use]
    pub fn get_pattern_vertices(&self, target: usize) -> &[usize] {
        self.target_to_pattern
            .get(&target)
            .map_or(&[], |v| v.as_slice())
    }

    /// Returns true if nothing maps onto `target`.
    #[must_use]
    pub fn target_is_free(&self, target: usize) -> bool {
        !self.target_to_pattern.contains_key(&target)
    }

    /// Returns true if no two pattern vertices share an image.
    #[must_use]
    pub fn is_injective(&self) -> bool {
        self.target_to_pattern.len() == self.pattern_to_target.len()
    }

    /// Number of mapped pattern vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pattern_to_target.len()
    }

    /// Returns true if nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern_to_target.is_empty()
    }

    /// `(pattern, target)` pairs in pattern index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pattern_to_target.iter().map(|(&p, &t)| (p, t))
    }

    /// Access the raw pattern-to-target mapping.
    #[must_use]
    pub const fn pattern_mapping(&self) -> &BTreeMap<usize, usize> {
        &self.pattern_to_target
    }

    /// Access the raw target-to-pattern mapping.
    #[must_use]
    pub const fn target_mapping(&self) -> &BTreeMap<usize, Vec<usize>> {
        &self.target_to_pattern
    }
}

impl FromIterator<(usize, usize)> for VertexMapping {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (p, t) in iter {
            mapping.assign(p, t);
        }
        mapping
    }
}

impl fmt::Display for VertexMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (p, t) in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "({p} -> {t})")?;
            first = false;
        }
        Ok(())
    }
}
