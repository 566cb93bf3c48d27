//! Read-only vertex storage.
//!
//! The selection engine is oblivious to where vertex records live; it only
//! consumes the four scan shapes below. The in-memory implementation is the
//! reference store, but anything honoring the contract works.

use thiserror::Error;

pub type Vertex = u32;

/// One vertex of the neighborhood graph.
///
/// Indices are dense over `0..n`. The neighbor list is ordered, may contain
/// the vertex itself, and duplicates are permitted (they count with
/// multiplicity in gain computation downstream).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexRecord {
    pub index: Vertex,
    pub group: u32,
    pub neighbors: Vec<Vertex>,
}

impl VertexRecord {
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("vertex {index} beyond store size {size}")]
    OutOfRange { index: Vertex, size: usize },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A finite, single-pass stream of vertex records.
pub type VertexStream<'a> = Box<dyn Iterator<Item = Result<VertexRecord, StoreError>> + Send + 'a>;

/// Read-only access to a graph of `size()` vertices.
///
/// Only `scan_range` promises an ordering (ascending index); the other scans
/// may yield records in any order.
pub trait VertexStore: Sync {
    fn size(&self) -> usize;

    fn get(&self, index: Vertex) -> Result<VertexRecord, StoreError>;

    /// Stream the vertices with index in the closed interval `[lo, hi]`,
    /// in index order. Empty when `lo > hi` or the interval misses the store.
    fn scan_range(&self, lo: Vertex, hi: Vertex) -> Result<VertexStream<'_>, StoreError>;

    /// Stream the vertices with the given indices, in no particular order.
    fn scan_set(&self, indices: &[Vertex]) -> Result<VertexStream<'_>, StoreError>;

    /// Stream every vertex, in no particular order.
    fn scan_all(&self) -> Result<VertexStream<'_>, StoreError>;
}

/// Dense vector of records, indexed directly by vertex.
pub struct MemoryStore {
    records: Vec<VertexRecord>,
}

impl MemoryStore {
    /// `records[i].index` must equal `i`; neighbor indices should fall
    /// inside the store.
    pub fn new(records: Vec<VertexRecord>) -> Self {
        assert!(records.len() <= (1 << 32));
        assert!(records
            .iter()
            .enumerate()
            .all(|(i, r)| r.index as usize == i));
        debug_assert!(records
            .iter()
            .all(|r| r.neighbors.iter().all(|&u| (u as usize) < records.len())));
        Self { records }
    }
}

impl VertexStore for MemoryStore {
    fn size(&self) -> usize {
        self.records.len()
    }

    fn get(&self, index: Vertex) -> Result<VertexRecord, StoreError> {
        self.records
            .get(index as usize)
            .cloned()
            .ok_or(StoreError::OutOfRange {
                index,
                size: self.records.len(),
            })
    }

    fn scan_range(&self, lo: Vertex, hi: Vertex) -> Result<VertexStream<'_>, StoreError> {
        let lo = (lo as usize).min(self.records.len());
        let hi = ((hi as usize) + 1).min(self.records.len());
        let slice = if lo >= hi { &[][..] } else { &self.records[lo..hi] };
        Ok(Box::new(slice.iter().cloned().map(Ok)))
    }

    fn scan_set(&self, indices: &[Vertex]) -> Result<VertexStream<'_>, StoreError> {
        let size = self.records.len();
        let indices = indices.to_vec();
        let records = &self.records;
        Ok(Box::new(indices.into_iter().map(move |index| {
            records
                .get(index as usize)
                .cloned()
                .ok_or(StoreError::OutOfRange { index, size })
        })))
    }

    fn scan_all(&self) -> Result<VertexStream<'_>, StoreError> {
        Ok(Box::new(self.records.iter().cloned().map(Ok)))
    }
}
