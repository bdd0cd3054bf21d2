//! Candidate sets with a copy-on-write trail.

use contracts::*;
use fixedbitset::FixedBitSet;

/// Opaque handle returned by [`Domains::mark`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DomainLevel(usize);

/// Outcome of shrinking one domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Shrink {
    Unchanged,
    Shrunk,
    Emptied,
}

/// One candidate bitset per pattern vertex.
///
/// Every domain is saved at most once per level: the first change after a
/// [`Domains::mark`] pushes a copy onto the trail, and [`Domains::restore`]
/// swaps the copies back. Saved bitsets are recycled through a pool so that
/// search does not allocate once the trail has warmed up.
#[derive(Debug, Clone)]
pub(crate) struct Domains {
    width: usize,
    sets: Vec<FixedBitSet>,
    trail: Vec<(usize, FixedBitSet)>,
    levels: Vec<usize>,
    /// Stamp of the level at which each domain was last saved.
    saved: Vec<u64>,
    stamp: u64,
    pool: Vec<FixedBitSet>,
}

impl Domains {
    /// `count` full domains over `width` target vertices.
    #[cfg(test)]
    #[debug_ensures(ret.len() == count)]
    pub(crate) fn full(count: usize, width: usize) -> Self {
        let mut all = FixedBitSet::with_capacity(width);
        all.insert_range(..);
        Self::from_sets(vec![all; count], width)
    }

    pub(crate) fn from_sets(sets: Vec<FixedBitSet>, width: usize) -> Self {
        let count = sets.len();
        Self {
            width,
            sets,
            trail: Vec::new(),
            levels: Vec::new(),
            saved: vec![0; count],
            stamp: 1,
            pool: Vec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.sets.len()
    }

    pub(crate) fn get(&self, u: usize) -> &FixedBitSet {
        &self.sets[u]
    }

    pub(crate) fn count(&self, u: usize) -> usize {
        self.sets[u].count_ones(..)
    }

    pub(crate) fn is_empty(&self, u: usize) -> bool {
        self.sets[u].is_clear()
    }

    /// The only candidate of `u`, if exactly one is left.
    pub(crate) fn singleton(&self, u: usize) -> Option<usize> {
        let mut ones = self.sets[u].ones();
        let first = ones.next()?;
        ones.next().is_none().then_some(first)
    }

    /// Number of open levels.
    pub(crate) fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Open a new level.
    #[debug_ensures(self.depth() == old(self.depth()) + 1)]
    pub(crate) fn mark(&mut self) -> DomainLevel {
        let level = DomainLevel(self.levels.len());
        self.levels.push(self.trail.len());
        self.stamp += 1;
        level
    }

    /// Undo every change made since `level` was opened, closing it and
    /// every level above it.
    #[debug_requires(level.0 < self.depth())]
    #[debug_ensures(self.depth() == level.0)]
    pub(crate) fn restore(&mut self, level: DomainLevel) {
        let keep = self.levels[level.0];
        self.levels.truncate(level.0);
        for (u, mut saved) in self.trail.drain(keep..).rev() {
            std::mem::swap(&mut self.sets[u], &mut saved);
            self.pool.push(saved);
        }
        self.stamp += 1;
    }

    fn save(&mut self, u: usize) {
        if self.levels.is_empty() || self.saved[u] == self.stamp {
            return;
        }
        let mut copy = self
            .pool
            .pop()
            .unwrap_or_else(|| FixedBitSet::with_capacity(self.width));
        copy.clone_from(&self.sets[u]);
        self.trail.push((u, copy));
        self.saved[u] = self.stamp;
    }

    fn shrink_with(&mut self, u: usize, f: impl FnOnce(&mut FixedBitSet)) -> Shrink {
        let before = self.count(u);
        self.save(u);
        f(&mut self.sets[u]);
        let after = self.count(u);
        if after == 0 {
            Shrink::Emptied
        } else if after < before {
            Shrink::Shrunk
        } else {
            Shrink::Unchanged
        }
    }

    /// `D[u] <- D[u] & set`.
    pub(crate) fn intersect(&mut self, u: usize, set: &FixedBitSet) -> Shrink {
        if self.sets[u].is_subset(set) {
            return if self.is_empty(u) {
                Shrink::Emptied
            } else {
                Shrink::Unchanged
            };
        }
        self.shrink_with(u, |d| d.intersect_with(set))
    }

    /// `D[u] <- D[u] - set`.
    pub(crate) fn difference(&mut self, u: usize, set: &FixedBitSet) -> Shrink {
        if self.sets[u].is_disjoint(set) {
            return if self.is_empty(u) {
                Shrink::Emptied
            } else {
                Shrink::Unchanged
            };
        }
        self.shrink_with(u, |d| d.difference_with(set))
    }

    /// `D[u] <- D[u] - {v}`.
    pub(crate) fn remove(&mut self, u: usize, v: usize) -> Shrink {
        if !self.sets[u].contains(v) {
            return if self.is_empty(u) {
                Shrink::Emptied
            } else {
                Shrink::Unchanged
            };
        }
        self.shrink_with(u, |d| d.set(v, false))
    }

    /// `D[u] <- D[u] & {v}`.
    pub(crate) fn fix(&mut self, u: usize, v: usize) -> Shrink {
        if !self.sets[u].contains(v) {
            return self.shrink_with(u, FixedBitSet::clear);
        }
        self.shrink_with(u, |d| {
            d.clear();
            d.insert(v);
        })
    }

    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> Vec<FixedBitSet> {
        self.sets.clone()
    }
}
