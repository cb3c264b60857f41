//! Short-term move memory.

/// N×N table of "forbidden-until" step numbers, indexed by position pair.
///
/// A swap of positions `(i, j)` is tabu at step `s` while the stored value
/// is `>= s`. Steps are numbered from 1 within a restart cycle, so a freshly
/// cleared memory forbids nothing. Entries only grow until [`clear`] resets
/// the whole table at the start of a restart cycle.
///
/// [`clear`]: TabuMemory::clear
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabuMemory {
    n: usize,
    until: Vec<usize>,
}

impl TabuMemory {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            until: vec![0; n * n],
        }
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        lo * self.n + hi
    }

    /// Stored forbidden-until value for the unordered pair `{i, j}`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> usize {
        self.until[self.index(i, j)]
    }

    #[inline]
    pub fn is_tabu(&self, i: usize, j: usize, step: usize) -> bool {
        self.get(i, j) >= step
    }

    /// Forbids `{i, j}` through step `until`. Never shortens an existing ban.
    pub fn forbid(&mut self, i: usize, j: usize, until: usize) {
        let k = self.index(i, j);
        self.until[k] = self.until[k].max(until);
    }

    pub fn clear(&mut self) {
        self.until.fill(0);
    }

    pub fn is_clear(&self) -> bool {
        self.until.iter().all(|&v| v == 0)
    }
}
