//! Lazy greedy: a heap of cached upper-bound gains, refreshed on pop.
//!
//! Because gains only ever decrease, a gain cached at any point in the past
//! upper-bounds the true current gain. The main loop pops the best cached
//! entry, recomputes its gain against the current trackers, and commits it
//! as soon as the refreshed entry still dominates the best remaining cached
//! entry; otherwise the entry goes back with its refreshed gain. The
//! dominance test compares full (gain, index) keys, so ties resolve exactly
//! as the classic solver's scan order does and the two produce identical
//! coresets.

use geograph::{Vertex, VertexStore};
use hashbrown::HashSet;

use crate::error::CoverError;
use crate::gain::marginal_gain;
use crate::harness::{parallel_map, split_evenly};
use crate::heap::{Entry, GainQueue};
use crate::trackers::Trackers;
use crate::{residual_bar, Exit};

/// No cardinality cap. Caps are enforced when non-negative.
pub(crate) const NO_CAP: i64 = -1;

pub(crate) struct LazyParams {
    pub cap: i64,
    pub threads: usize,
    /// Seed the heap with the degree-based upper bound instead of exact
    /// initial gains, skipping the initial gain scan.
    pub cheap_init: bool,
    pub progress: bool,
}

pub(crate) fn lazy_greedy<S: VertexStore + ?Sized>(
    store: &S,
    trackers: &mut Trackers,
    candidates: &[Vertex],
    params: &LazyParams,
) -> Result<(Vec<Vertex>, Exit), CoverError> {
    let mut queue = GainQueue::from_entries(initial_entries(store, trackers, candidates, params)?);
    let mut coreset = Vec::new();
    if params.cap == 0 {
        return Ok((coreset, Exit::CapReached));
    }
    let bar = residual_bar(trackers.residual_score(), "lazy", params.progress);

    while !trackers.satisfied() {
        // refresh loop: does not advance the selection count
        let chosen = loop {
            let top = match queue.pop_max() {
                Some(top) => top,
                None => {
                    bar.finish_and_clear();
                    return Ok((coreset, Exit::Exhausted));
                }
            };
            let record = store.get(top.vertex)?;
            let refreshed = Entry {
                vertex: top.vertex,
                gain: marginal_gain(trackers, &record, 1),
            };
            match queue.peek_max() {
                Some(next) if refreshed < next => queue.push(refreshed),
                _ => break (refreshed, record),
            }
        };
        let (entry, record) = chosen;
        if entry.gain == 0 {
            // the dominant refreshed gain is zero: nothing left can help
            bar.finish_and_clear();
            return Ok((coreset, Exit::Exhausted));
        }

        let before = trackers.residual_score();
        trackers.commit(&record);
        bar.inc(before - trackers.residual_score());
        coreset.push(entry.vertex);
        if params.cap >= 0 && coreset.len() as i64 >= params.cap {
            bar.finish_and_clear();
            return Ok((coreset, Exit::CapReached));
        }
    }
    bar.finish_and_clear();
    Ok((coreset, Exit::Satisfied))
}

/// Computes the initial heap contents, one worker per candidate chunk.
fn initial_entries<S: VertexStore + ?Sized>(
    store: &S,
    trackers: &Trackers,
    candidates: &[Vertex],
    params: &LazyParams,
) -> Result<Vec<Entry>, CoverError> {
    let chunks: Vec<&[Vertex]> = split_evenly(candidates.len(), params.threads)
        .into_iter()
        .map(|(lo, hi)| &candidates[lo..hi])
        .collect();
    let parts = parallel_map(chunks, |chunk| -> Result<Vec<Entry>, CoverError> {
        let mut entries = Vec::with_capacity(chunk.len());
        for record in store.scan_set(chunk)? {
            let record = record?;
            let gain = if params.cheap_init {
                trackers.gain_upper_bound(&record)
            } else {
                marginal_gain(trackers, &record, 1)
            };
            entries.push(Entry {
                vertex: record.index,
                gain,
            });
        }
        Ok(entries)
    });
    let mut entries = Vec::with_capacity(candidates.len());
    for part in parts {
        entries.extend(part?);
    }
    Ok(entries)
}

/// Cheap-first pass over everything, then an exact pass over the complement
/// against the already-committed trackers; the coresets concatenate.
pub(crate) fn two_stage<S: VertexStore + ?Sized>(
    store: &S,
    trackers: &mut Trackers,
    threads: usize,
    progress: bool,
) -> Result<(Vec<Vertex>, Exit), CoverError> {
    let all: Vec<Vertex> = (0..store.size()).map(|v| v as Vertex).collect();
    let (mut coreset, exit) = lazy_greedy(
        store,
        trackers,
        &all,
        &LazyParams {
            cap: NO_CAP,
            threads,
            cheap_init: true,
            progress,
        },
    )?;
    if exit == Exit::Satisfied {
        return Ok((coreset, exit));
    }

    let picked: HashSet<Vertex> = coreset.iter().copied().collect();
    let rest: Vec<Vertex> = all.into_iter().filter(|v| !picked.contains(v)).collect();
    let (tail, exit) = lazy_greedy(
        store,
        trackers,
        &rest,
        &LazyParams {
            cap: NO_CAP,
            threads,
            cheap_init: false,
            progress,
        },
    )?;
    coreset.extend(tail);
    Ok((coreset, exit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geograph::{MemoryStore, VertexRecord};

    fn rec(index: Vertex, group: u32, neighbors: Vec<Vertex>) -> VertexRecord {
        VertexRecord {
            index,
            group,
            neighbors,
        }
    }

    fn line_store(n: u32) -> MemoryStore {
        MemoryStore::new(
            (0..n)
                .map(|i| {
                    let mut neighbors = Vec::new();
                    if i > 0 {
                        neighbors.push(i - 1);
                    }
                    if i + 1 < n {
                        neighbors.push(i + 1);
                    }
                    rec(i, 0, neighbors)
                })
                .collect(),
        )
    }

    fn params(cap: i64, cheap_init: bool) -> LazyParams {
        LazyParams {
            cap,
            threads: 2,
            cheap_init,
            progress: false,
        }
    }

    fn all(n: u32) -> Vec<Vertex> {
        (0..n).collect()
    }

    #[test]
    fn solves_the_dominating_vertex_case() {
        let store = MemoryStore::new(vec![
            rec(0, 0, vec![0, 1]),
            rec(1, 0, vec![0, 1, 2]),
            rec(2, 0, vec![1, 2]),
        ]);
        let mut trackers = Trackers::from_store(&store, 1, &[1], false).unwrap();
        let (coreset, exit) =
            lazy_greedy(&store, &mut trackers, &all(3), &params(NO_CAP, false)).unwrap();
        assert_eq!(coreset, vec![1]);
        assert_eq!(exit, Exit::Satisfied);
    }

    #[test]
    fn cardinality_cap_stops_the_run() {
        let store = line_store(6);
        let mut trackers = Trackers::from_store(&store, 1, &[6], false).unwrap();
        let (coreset, exit) =
            lazy_greedy(&store, &mut trackers, &all(6), &params(2, false)).unwrap();
        assert_eq!(coreset.len(), 2);
        assert_eq!(exit, Exit::CapReached);
        assert!(!trackers.satisfied());

        let mut trackers = Trackers::from_store(&store, 1, &[6], false).unwrap();
        let (coreset, exit) =
            lazy_greedy(&store, &mut trackers, &all(6), &params(0, false)).unwrap();
        assert!(coreset.is_empty());
        assert_eq!(exit, Exit::CapReached);
    }

    #[test]
    fn cheap_init_matches_exact_init() {
        let store = line_store(9);
        let mut exact = Trackers::from_store(&store, 2, &[9], false).unwrap();
        let (want, want_exit) =
            lazy_greedy(&store, &mut exact, &all(9), &params(NO_CAP, false)).unwrap();
        let mut cheap = Trackers::from_store(&store, 2, &[9], false).unwrap();
        let (got, got_exit) =
            lazy_greedy(&store, &mut cheap, &all(9), &params(NO_CAP, true)).unwrap();
        assert_eq!(got, want);
        assert_eq!(got_exit, want_exit);
    }

    #[test]
    fn rerunning_on_the_coreset_reproduces_it() {
        let store = line_store(7);
        let mut trackers = Trackers::from_store(&store, 2, &[4], false).unwrap();
        let (coreset, exit) =
            lazy_greedy(&store, &mut trackers, &all(7), &params(NO_CAP, false)).unwrap();
        assert_eq!(exit, Exit::Satisfied);

        let mut again = Trackers::from_store(&store, 2, &[4], false).unwrap();
        let (rerun, exit) =
            lazy_greedy(&store, &mut again, &coreset, &params(NO_CAP, false)).unwrap();
        assert_eq!(exit, Exit::Satisfied);
        let mut want = coreset.clone();
        want.sort_unstable();
        let mut got = rerun;
        got.sort_unstable();
        assert_eq!(got, want);
    }

    #[test]
    fn exhaustion_reports_zero_gain_remainder() {
        // isolated self-loops, unreachable group demand
        let store = MemoryStore::new(vec![rec(0, 0, vec![0]), rec(1, 0, vec![1])]);
        let mut trackers = Trackers::from_store(&store, 1, &[5], false).unwrap();
        let (coreset, exit) =
            lazy_greedy(&store, &mut trackers, &all(2), &params(NO_CAP, false)).unwrap();
        assert_eq!(exit, Exit::Exhausted);
        assert_eq!(coreset, vec![0, 1]);
        assert_eq!(trackers.groups(), &[3]);
    }

    #[test]
    fn two_stage_concatenates_disjoint_passes() {
        let store = line_store(8);
        let mut trackers = Trackers::from_store(&store, 1, &[8], false).unwrap();
        let (coreset, exit) = two_stage(&store, &mut trackers, 2, false).unwrap();
        assert_eq!(exit, Exit::Satisfied);
        assert!(trackers.satisfied());
        let mut sorted = coreset.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), coreset.len());
    }
}
