//! Engine error kinds.

use geograph::{StoreError, Vertex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoverError {
    /// A vertex lookup or scan failed; fatal for the invocation.
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("vertex {vertex} carries group {group} but only {ngroups} group requirements were given")]
    GroupOutOfRange {
        vertex: Vertex,
        group: u32,
        ngroups: usize,
    },

    /// The trackers cannot reach zero with the remaining candidates. The
    /// partial coreset and the residual tracker contents are surfaced so the
    /// caller can decide whether to accept them.
    #[error("cover unsatisfiable after {} selections, residual {residual}", .coreset.len())]
    Unsatisfiable {
        coreset: Vec<Vertex>,
        coverage: Vec<u32>,
        groups: Vec<u32>,
        residual: u64,
    },
}
