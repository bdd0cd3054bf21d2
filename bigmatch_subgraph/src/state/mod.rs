use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

mod domains;

pub(crate) use domains::{DomainLevel, Domains, Shrink};

use crate::embedding::VertexMapping;

/// A domain became empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Conflict;

/// Opaque handle returned by [`State::mark`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Level {
    domains: DomainLevel,
    fixed: usize,
}

/// Search state: the domains plus the bookkeeping of which pattern vertices
/// have been fixed and still need their consequences propagated.
pub(crate) struct State {
    domains: Domains,
    fixed: FixedBitSet,
    fixed_order: Vec<usize>,
    pending: VecDeque<usize>,
}

impl State {
    /// Wrap initial domains. Domains that are already singletons are queued
    /// for propagation.
    pub(crate) fn new(domains: Domains) -> Self {
        let n = domains.len();
        let mut state = Self {
            domains,
            fixed: FixedBitSet::with_capacity(n),
            fixed_order: Vec::with_capacity(n),
            pending: VecDeque::with_capacity(n),
        };
        for u in 0..n {
            state.note_fixed(u);
        }
        state
    }

    pub(crate) fn domains(&self) -> &Domains {
        &self.domains
    }

    pub(crate) fn len(&self) -> usize {
        self.domains.len()
    }

    pub(crate) fn is_fixed(&self, u: usize) -> bool {
        self.fixed.contains(u)
    }

    pub(crate) fn all_fixed(&self) -> bool {
        self.fixed_order.len() == self.domains.len()
    }

    pub(crate) fn next_pending(&mut self) -> Option<usize> {
        self.pending.pop_front()
    }

    pub(crate) fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub(crate) fn mark(&mut self) -> Level {
        debug_assert!(self.pending.is_empty());
        Level {
            domains: self.domains.mark(),
            fixed: self.fixed_order.len(),
        }
    }

    pub(crate) fn restore(&mut self, level: Level) {
        self.domains.restore(level.domains);
        for u in self.fixed_order.drain(level.fixed..) {
            self.fixed.set(u, false);
        }
        self.pending.clear();
    }

    fn note_fixed(&mut self, u: usize) {
        if !self.fixed.contains(u) && self.domains.count(u) == 1 {
            self.fixed.insert(u);
            self.fixed_order.push(u);
            self.pending.push_back(u);
        }
    }

    fn after(&mut self, u: usize, shrink: Shrink) -> Result<(), Conflict> {
        match shrink {
            Shrink::Emptied => Err(Conflict),
            Shrink::Shrunk => {
                self.note_fixed(u);
                Ok(())
            }
            Shrink::Unchanged => Ok(()),
        }
    }

    /// Decide `u = v`.
    pub(crate) fn assign(&mut self, u: usize, v: usize) -> Result<(), Conflict> {
        let shrink = self.domains.fix(u, v);
        self.after(u, shrink)?;
        // A domain that was already {v} still has to be marked.
        self.note_fixed(u);
        Ok(())
    }

    pub(crate) fn intersect(&mut self, u: usize, set: &FixedBitSet) -> Result<(), Conflict> {
        let shrink = self.domains.intersect(u, set);
        self.after(u, shrink)
    }

    pub(crate) fn difference(&mut self, u: usize, set: &FixedBitSet) -> Result<(), Conflict> {
        let shrink = self.domains.difference(u, set);
        self.after(u, shrink)
    }

    pub(crate) fn remove(&mut self, u: usize, v: usize) -> Result<(), Conflict> {
        let shrink = self.domains.remove(u, v);
        self.after(u, shrink)
    }

    /// The value of a fixed vertex.
    pub(crate) fn value(&self, u: usize) -> Option<usize> {
        self.domains.singleton(u)
    }

    /// The complete assignment, once every vertex is fixed.
    pub(crate) fn mapping(&self) -> Option<VertexMapping> {
        (0..self.len()).map(|u| Some((u, self.value(u)?))).collect()
    }
}
