//! Fan-out/fan-in execution of one round of worker tasks.
//!
//! Every parallel phase in the engine is one call here: fan out a worker
//! per input, block until all of them finish, collect the outputs in input
//! order. A single input stays on the calling thread, so `threads == 1`
//! never touches the rayon pool.

use rayon::iter::{IntoParallelIterator, ParallelIterator};

pub(crate) fn parallel_map<I, O, F>(inputs: Vec<I>, f: F) -> Vec<O>
where
    I: Send,
    O: Send,
    F: Fn(I) -> O + Sync + Send,
{
    if inputs.len() <= 1 {
        inputs.into_iter().map(f).collect()
    } else {
        inputs.into_par_iter().map(f).collect()
    }
}

/// Splits `0..n` into at most `t` contiguous half-open chunks of nearly
/// equal size.
pub(crate) fn split_evenly(n: usize, t: usize) -> Vec<(usize, usize)> {
    let t = t.max(1).min(n.max(1));
    (0..t).map(|i| (i * n / t, (i + 1) * n / t)).collect()
}
