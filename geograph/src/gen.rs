//! Synthetic random geometric graphs.
//!
//! Points are drawn uniformly in the d-dimensional unit cube and joined
//! whenever their Euclidean distance is at most `radius`. A point is at
//! distance zero from itself, so every neighbor list contains its own
//! vertex. Groups are assigned uniformly.

use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::store::{Vertex, VertexRecord};

/// Generates the records of a seeded random geometric graph.
///
/// Adjacency is the full O(n^2) distance test, parallelised over vertices;
/// the same seed always produces the same graph.
pub fn generate(n: usize, dims: usize, ngroups: u32, radius: f64, seed: u64) -> Vec<VertexRecord> {
    assert!(ngroups > 0);
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<Vec<f64>> = (0..n)
        .map(|_| (0..dims).map(|_| rng.gen::<f64>()).collect())
        .collect();
    let groups: Vec<u32> = (0..n).map(|_| rng.gen_range(0..ngroups)).collect();

    let sty = ProgressStyle::default_bar()
        .template("{prefix} [{elapsed_precise}] [{bar:40}] {pos:>10}/{len:10}")
        .progress_chars("##-");
    let bar = ProgressBar::new(n as u64).with_style(sty);
    bar.set_prefix("adjacency");

    let r2 = radius * radius;
    let records: Vec<VertexRecord> = (0..n)
        .into_par_iter()
        .map(|i| {
            let neighbors = (0..n)
                .filter(|&j| dist2(&points[i], &points[j]) <= r2)
                .map(|j| j as Vertex)
                .collect();
            bar.inc(1);
            VertexRecord {
                index: i as Vertex,
                group: groups[i],
                neighbors,
            }
        })
        .collect();
    bar.finish_and_clear();
    records
}

fn dist2(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_under_seed() {
        let a = generate(40, 3, 4, 0.3, 7);
        let b = generate(40, 3, 4, 0.3, 7);
        assert_eq!(a, b);
        let c = generate(40, 3, 4, 0.3, 8);
        assert_ne!(a, c);
    }

    #[test]
    fn neighbors_include_self_and_are_symmetric() {
        let records = generate(30, 2, 3, 0.4, 11);
        for r in &records {
            assert!(r.neighbors.contains(&r.index));
            assert!(r.group < 3);
            for &u in &r.neighbors {
                assert!(records[u as usize].neighbors.contains(&r.index));
            }
        }
    }

    #[test]
    fn radius_controls_density() {
        let sparse = generate(30, 2, 2, 0.0, 3);
        // distance zero still joins a point to itself
        assert!(sparse.iter().all(|r| r.neighbors == vec![r.index]));
        let dense = generate(30, 2, 2, 2.0, 3);
        assert!(dense.iter().all(|r| r.neighbors.len() == 30));
    }
}
