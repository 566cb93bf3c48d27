//! Classic greedy: rescan every surviving candidate each round and commit
//! the global argmax.

use geograph::{Vertex, VertexStore};
use hashbrown::HashSet;

use crate::error::CoverError;
use crate::gain::marginal_gain;
use crate::harness::{parallel_map, split_evenly};
use crate::heap::Entry;
use crate::trackers::Trackers;
use crate::{residual_bar, Exit};

pub(crate) fn classic_greedy<S: VertexStore + ?Sized>(
    store: &S,
    trackers: &mut Trackers,
    threads: usize,
    progress: bool,
) -> Result<(Vec<Vertex>, Exit), CoverError> {
    let n = store.size();
    let mut candidates: HashSet<Vertex> = (0..n).map(|v| v as Vertex).collect();
    let mut coreset = Vec::new();
    let bar = residual_bar(trackers.residual_score(), "classic", progress);

    while !trackers.satisfied() {
        if candidates.is_empty() {
            bar.finish_and_clear();
            return Ok((coreset, Exit::Exhausted));
        }
        let chosen = match best_candidate(store, trackers, &candidates, threads)? {
            // a zero gain means the survivors cannot reduce the residual
            Some(best) if best.gain > 0 => best,
            _ => {
                bar.finish_and_clear();
                return Ok((coreset, Exit::Exhausted));
            }
        };

        let record = store.get(chosen.vertex)?;
        let before = trackers.residual_score();
        trackers.commit(&record);
        bar.inc(before - trackers.residual_score());
        candidates.remove(&chosen.vertex);
        coreset.push(chosen.vertex);
    }
    bar.finish_and_clear();
    Ok((coreset, Exit::Satisfied))
}

/// One round of argmax fan-out. Workers scan disjoint contiguous index
/// ranges against a stable tracker view; the reduction keeps the first
/// strictly-better result, so ties resolve to the first-scanned index.
fn best_candidate<S: VertexStore + ?Sized>(
    store: &S,
    trackers: &Trackers,
    candidates: &HashSet<Vertex>,
    threads: usize,
) -> Result<Option<Entry>, CoverError> {
    let n = store.size();
    let results = parallel_map(split_evenly(n, threads), |(lo, hi)| {
        argmax_worker(store, trackers, candidates, lo, hi)
    });

    let mut best: Option<Entry> = None;
    for result in results {
        if let Some(local) = result? {
            if best.map_or(true, |b| local.gain > b.gain) {
                best = Some(local);
            }
        }
    }
    Ok(best)
}

fn argmax_worker<S: VertexStore + ?Sized>(
    store: &S,
    trackers: &Trackers,
    candidates: &HashSet<Vertex>,
    lo: usize,
    hi: usize,
) -> Result<Option<Entry>, CoverError> {
    if lo >= hi {
        return Ok(None);
    }
    let mut best: Option<Entry> = None;
    for record in store.scan_range(lo as Vertex, (hi - 1) as Vertex)? {
        let record = record?;
        if !candidates.contains(&record.index) {
            continue;
        }
        let gain = marginal_gain(trackers, &record, 1);
        if best.map_or(true, |b| gain > b.gain) {
            best = Some(Entry {
                vertex: record.index,
                gain,
            });
        }
    }
    Ok(best)
}
