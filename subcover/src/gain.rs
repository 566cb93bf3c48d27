//! Marginal-gain evaluation.
//!
//! The serial path is the tracker formula directly. For wide vertices the
//! neighbor list can instead be split into contiguous chunks whose partial
//! coverage sums are computed by parallel workers; the group term is added
//! once on the calling thread, so both paths agree exactly.

use geograph::{Vertex, VertexRecord};

use crate::harness::{parallel_map, split_evenly};
use crate::trackers::Trackers;

pub fn marginal_gain(trackers: &Trackers, record: &VertexRecord, threads: usize) -> u64 {
    if threads <= 1 {
        return trackers.marginal_gain(record);
    }
    let chunks: Vec<&[Vertex]> = split_evenly(record.neighbors.len(), threads)
        .into_iter()
        .map(|(lo, hi)| &record.neighbors[lo..hi])
        .collect();
    let partial: u64 = parallel_map(chunks, |chunk| trackers.coverage_sum(chunk))
        .into_iter()
        .sum();
    partial + trackers.group_remainder(record.group)
}
