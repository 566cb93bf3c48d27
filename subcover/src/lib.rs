//! # `subcover` - submodular cover coresets
//!
//! Selects a small subset S of a neighborhood graph's vertices such that
//! every vertex v has at least `min(k, deg(v))` neighbors in S and every
//! group g contributes at least its required number of members to S.
//!
//! The residual demand lives in two integer trackers (per-vertex coverage,
//! per-group membership) whose entries only ever decrease, which makes the
//! gain objective monotone submodular and the lazy upper-bound heap sound.
//! Three solver families are provided: a classic rescan-everything greedy, a
//! lazy greedy, and the distributed DisCover/GreeDi scheme. Stores are
//! consumed through the read-only [`geograph::VertexStore`] interface only.

use geograph::{Vertex, VertexStore};
use indicatif::{ProgressBar, ProgressStyle};

mod classic;
mod discover;
pub mod error;
pub mod gain;
mod harness;
pub mod heap;
mod lazy;
pub mod trackers;

pub use error::CoverError;
pub use trackers::Trackers;

/// Solver selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OptimMode {
    /// Rescan all candidates in parallel chunks each round.
    Classic,
    /// Upper-bound heap with lazy refresh.
    Lazy,
    /// Lazy greedy seeded with cheap degree-based bounds.
    LazyLazy,
    /// Distributed two-stage DisCover/GreeDi.
    DisCover,
    /// Cheap-first pass, then an exact pass over the complement.
    TwoStage,
}

/// How a solver run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Exit {
    Satisfied,
    CapReached,
    Exhausted,
}

/// Computes a coreset of `store` under the given coverage requirement and
/// per-group requirements.
///
/// `threads` bounds the worker fan-out; 1 keeps everything sequential. With
/// `dense` the caller asserts every vertex degree is at least
/// `coverage_req`, so every coverage entry starts at `coverage_req` instead
/// of being capped at the vertex degree; group labels are validated either
/// way.
///
/// Returns the selected vertices in commit order. When the demands cannot
/// be met, [`CoverError::Unsatisfiable`] carries the partial coreset
/// together with the residual tracker contents.
pub fn coreset_of<S: VertexStore + ?Sized>(
    store: &S,
    coverage_req: u32,
    group_reqs: &[u32],
    mode: OptimMode,
    threads: usize,
    dense: bool,
) -> Result<Vec<Vertex>, CoverError> {
    if threads == 0 {
        return Err(CoverError::NoWorkers);
    }
    let mut trackers = Trackers::from_store(store, coverage_req, group_reqs, dense)?;
    let all: Vec<Vertex> = (0..store.size()).map(|v| v as Vertex).collect();

    let (coreset, exit) = match mode {
        OptimMode::Classic => classic::classic_greedy(store, &mut trackers, threads, true)?,
        OptimMode::Lazy | OptimMode::LazyLazy => lazy::lazy_greedy(
            store,
            &mut trackers,
            &all,
            &lazy::LazyParams {
                cap: lazy::NO_CAP,
                threads,
                cheap_init: mode == OptimMode::LazyLazy,
                progress: true,
            },
        )?,
        OptimMode::DisCover => {
            let (coreset, _rounds, exit) =
                discover::dis_cover(store, &mut trackers, threads, discover::ALPHA, true)?;
            (coreset, exit)
        }
        OptimMode::TwoStage => lazy::two_stage(store, &mut trackers, threads, true)?,
    };

    match exit {
        Exit::Satisfied => {
            debug_assert!(trackers.satisfied());
            Ok(coreset)
        }
        // no top-level solver runs with a cap
        Exit::CapReached => Ok(coreset),
        Exit::Exhausted => Err(CoverError::Unsatisfiable {
            residual: trackers.residual_score(),
            coverage: trackers.coverage().to_vec(),
            groups: trackers.groups().to_vec(),
            coreset,
        }),
    }
}

/// Progress over the residual demand still outstanding.
pub(crate) fn residual_bar(len: u64, prefix: &'static str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let sty = ProgressStyle::default_bar()
        .template("{prefix} [{elapsed_precise}] [{bar:40}] {pos:>10}/{len:10} {msg}")
        .progress_chars("##-");
    let bar = ProgressBar::new(len).with_style(sty);
    bar.set_prefix(prefix);
    bar
}
