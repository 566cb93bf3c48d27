//! Max-priority queue over cached marginal gains.
//!
//! The queue does not hold current gains: entries are gains as of the time
//! they were pushed, which submodularity makes valid upper bounds on the
//! true current gain. The lazy solver refreshes only the entry it pops;
//! nothing here ever fixes up stale entries eagerly.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use geograph::Vertex;

/// A vertex with its cached gain.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    pub vertex: Vertex,
    pub gain: u64,
}

/// Higher gain wins; equal gains fall back to the smaller vertex index so
/// that pop order is deterministic.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.gain
            .cmp(&other.gain)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Default)]
pub struct GainQueue {
    heap: BinaryHeap<Entry>,
}

impl GainQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Heapifies in bulk, cheaper than repeated pushes.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self {
            heap: BinaryHeap::from(entries),
        }
    }

    pub fn push(&mut self, entry: Entry) {
        self.heap.push(entry);
    }

    pub fn pop_max(&mut self) -> Option<Entry> {
        self.heap.pop()
    }

    pub fn peek_max(&self) -> Option<Entry> {
        self.heap.peek().copied()
    }

    pub fn peek_max_priority(&self) -> Option<u64> {
        self.heap.peek().map(|e| e.gain)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(vertex: Vertex, gain: u64) -> Entry {
        Entry { vertex, gain }
    }

    #[test]
    fn pops_by_descending_gain() {
        let mut q = GainQueue::new();
        for &(v, g) in &[(0, 3), (1, 9), (2, 5)] {
            q.push(entry(v, g));
        }
        assert_eq!(q.peek_max_priority(), Some(9));
        let order: Vec<_> = std::iter::from_fn(|| q.pop_max()).map(|e| e.vertex).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn ties_break_toward_the_smaller_vertex() {
        let mut q = GainQueue::from_entries(vec![entry(7, 4), entry(2, 4), entry(5, 4)]);
        let order: Vec<_> = std::iter::from_fn(|| q.pop_max()).map(|e| e.vertex).collect();
        assert_eq!(order, vec![2, 5, 7]);
    }

    #[test]
    fn bulk_build_matches_pushes() {
        let entries = vec![entry(3, 1), entry(0, 8), entry(1, 8), entry(4, 0)];
        let mut bulk = GainQueue::from_entries(entries.clone());
        let mut incremental = GainQueue::new();
        for e in entries {
            incremental.push(e);
        }
        while let Some(want) = incremental.pop_max() {
            assert_eq!(bulk.pop_max(), Some(want));
        }
        assert!(bulk.is_empty());
        assert_eq!(bulk.len(), 0);
    }
}
