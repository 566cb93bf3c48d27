//! DisCover: distributed submodular cover via GreeDi rounds.
//!
//! The outer loop grows a cardinality budget geometrically: each round asks
//! GreeDi for at most `cap` new vertices and doubles the budget whenever the
//! round removed less than `alpha * lambda` of the residual, with
//! `lambda = 1/sqrt(threads)`.
//!
//! GreeDi snapshots the trackers, splits the candidates round-robin across
//! workers, and runs a capped lazy greedy per partition, each against its
//! own private copy of the snapshot. A final capped lazy greedy over the
//! union of the partial solutions runs against the real trackers and is the
//! only stage that commits.

use geograph::{Vertex, VertexStore};
use hashbrown::HashSet;
use itertools::Itertools;

use crate::error::CoverError;
use crate::harness::parallel_map;
use crate::lazy::{lazy_greedy, LazyParams};
use crate::trackers::Trackers;
use crate::{residual_bar, Exit};

pub(crate) const ALPHA: f64 = 0.5;
const INITIAL_CAP: i64 = 2;

/// One outer round, for run reporting.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Round {
    pub cap: i64,
    pub residual_before: u64,
    pub residual_after: u64,
}

pub(crate) fn dis_cover<S: VertexStore + ?Sized>(
    store: &S,
    trackers: &mut Trackers,
    threads: usize,
    alpha: f64,
    progress: bool,
) -> Result<(Vec<Vertex>, Vec<Round>, Exit), CoverError> {
    let n = store.size();
    let mut candidates: HashSet<Vertex> = (0..n).map(|v| v as Vertex).collect();
    let lambda = 1.0 / (threads as f64).sqrt();
    let mut cap = INITIAL_CAP;
    let mut coreset = Vec::new();
    let mut rounds = Vec::new();
    let bar = residual_bar(trackers.residual_score(), "discover", progress);

    while !trackers.satisfied() {
        if candidates.is_empty() {
            bar.finish_and_clear();
            return Ok((coreset, rounds, Exit::Exhausted));
        }
        let residual_before = trackers.residual_score();
        let picked = greedi(store, trackers, &candidates, threads, cap)?;
        if picked.is_empty() && cap as u64 > candidates.len() as u64 {
            // the budget already exceeds the pool and a full round did nothing
            bar.finish_and_clear();
            return Ok((coreset, rounds, Exit::Exhausted));
        }
        for &v in &picked {
            candidates.remove(&v);
        }
        coreset.extend_from_slice(&picked);

        let residual_after = trackers.residual_score();
        rounds.push(Round {
            cap,
            residual_before,
            residual_after,
        });
        bar.inc(residual_before - residual_after);
        bar.set_message(format!(
            "round {} cap {} candidates {}",
            rounds.len(),
            cap,
            candidates.len()
        ));
        if ((residual_before - residual_after) as f64) < alpha * lambda * residual_before as f64 {
            cap = cap.saturating_mul(2);
        }
    }
    bar.finish_and_clear();
    Ok((coreset, rounds, Exit::Satisfied))
}

/// Distributed greedy filter: the partial solutions never touch the real
/// trackers, and the centralised re-selection over their union commits.
fn greedi<S: VertexStore + ?Sized>(
    store: &S,
    trackers: &mut Trackers,
    candidates: &HashSet<Vertex>,
    threads: usize,
    cap: i64,
) -> Result<Vec<Vertex>, CoverError> {
    let snapshot = trackers.clone();

    let mut partitions: Vec<Vec<Vertex>> =
        vec![Vec::with_capacity(candidates.len() / threads + 1); threads];
    for (i, v) in candidates.iter().copied().sorted().enumerate() {
        partitions[i % threads].push(v);
    }

    let partials = parallel_map(partitions, |partition| -> Result<Vec<Vertex>, CoverError> {
        let mut local = snapshot.clone();
        let (selected, _) = lazy_greedy(
            store,
            &mut local,
            &partition,
            &LazyParams {
                cap,
                threads: 1,
                cheap_init: false,
                progress: false,
            },
        )?;
        Ok(selected)
    });

    // partitions are disjoint, so the union is concatenation
    let mut union = Vec::new();
    for partial in partials {
        union.extend(partial?);
    }
    union.sort_unstable();

    let (selected, _) = lazy_greedy(
        store,
        trackers,
        &union,
        &LazyParams {
            cap,
            threads: 1,
            cheap_init: false,
            progress: false,
        },
    )?;
    Ok(selected)
}
