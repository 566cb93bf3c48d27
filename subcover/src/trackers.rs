//! Coverage and group remainder tracking.
//!
//! `coverage[v]` counts how many more of `v`'s neighbors the coreset still
//! owes it; `group[g]` counts how many more members group `g` still owes.
//! Both vectors only ever decrease, floored at zero, and the running
//! residual is their sum. A vertex's marginal gain sums the remainders its
//! neighbors still carry plus its group's remainder, so gains are
//! non-negative and non-increasing over any execution, and a gain of zero
//! means a commit would change nothing.

use geograph::{Vertex, VertexRecord, VertexStore};

use crate::error::CoverError;

#[derive(Clone, Debug)]
pub struct Trackers {
    coverage: Vec<u32>,
    group: Vec<u32>,
    coverage_req: u32,
    residual: u64,
}

impl Trackers {
    /// Builds the trackers for a store.
    ///
    /// One full scan rejects group labels outside `group_reqs` before any
    /// solving starts and, unless `dense` is set, caps each coverage entry
    /// at the vertex degree. With `dense` the caller asserts every degree is
    /// at least `coverage_req`, so the cap is skipped and every entry keeps
    /// `coverage_req`.
    pub fn from_store<S: VertexStore + ?Sized>(
        store: &S,
        coverage_req: u32,
        group_reqs: &[u32],
        dense: bool,
    ) -> Result<Self, CoverError> {
        let mut coverage = vec![coverage_req; store.size()];
        for record in store.scan_all()? {
            let record = record?;
            if record.group as usize >= group_reqs.len() {
                return Err(CoverError::GroupOutOfRange {
                    vertex: record.index,
                    group: record.group,
                    ngroups: group_reqs.len(),
                });
            }
            if !dense {
                coverage[record.index as usize] = coverage_req.min(record.degree() as u32);
            }
        }
        let group = group_reqs.to_vec();
        let residual = coverage.iter().map(|&c| u64::from(c)).sum::<u64>()
            + group.iter().map(|&g| u64::from(g)).sum::<u64>();
        Ok(Self {
            coverage,
            group,
            coverage_req,
            residual,
        })
    }

    pub fn coverage(&self) -> &[u32] {
        &self.coverage
    }

    pub fn groups(&self) -> &[u32] {
        &self.group
    }

    /// Residual coverage owed to each of the given neighbors, summed with
    /// multiplicity.
    pub fn coverage_sum(&self, neighbors: &[Vertex]) -> u64 {
        neighbors
            .iter()
            .map(|&u| u64::from(self.coverage[u as usize]))
            .sum()
    }

    pub fn group_remainder(&self, group: u32) -> u64 {
        u64::from(self.group[group as usize])
    }

    /// The outstanding demand this vertex's commit would act on.
    pub fn marginal_gain(&self, record: &VertexRecord) -> u64 {
        self.coverage_sum(&record.neighbors) + self.group_remainder(record.group)
    }

    /// Upper bound on [`marginal_gain`](Self::marginal_gain) computable
    /// without touching the coverage vector: every entry is at most the
    /// coverage requirement.
    pub fn gain_upper_bound(&self, record: &VertexRecord) -> u64 {
        u64::from(self.coverage_req) * record.neighbors.len() as u64
            + self.group_remainder(record.group)
    }

    /// Decrements each neighbor's coverage remainder and the vertex's group
    /// remainder by one, floored at zero. Duplicate neighbors decrement per
    /// occurrence.
    pub fn commit(&mut self, record: &VertexRecord) {
        for &u in &record.neighbors {
            let c = &mut self.coverage[u as usize];
            if *c > 0 {
                *c -= 1;
                self.residual -= 1;
            }
        }
        let g = &mut self.group[record.group as usize];
        if *g > 0 {
            *g -= 1;
            self.residual -= 1;
        }
    }

    /// True iff every coverage and group entry is zero.
    pub fn satisfied(&self) -> bool {
        self.residual == 0
    }

    pub fn residual_score(&self) -> u64 {
        self.residual
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geograph::MemoryStore;

    fn rec(index: Vertex, group: u32, neighbors: Vec<Vertex>) -> VertexRecord {
        VertexRecord {
            index,
            group,
            neighbors,
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            rec(0, 0, vec![0, 1]),
            rec(1, 0, vec![0, 1, 2]),
            rec(2, 1, vec![1, 2]),
        ])
    }

    #[test]
    fn sparse_init_caps_at_degree() {
        let t = Trackers::from_store(&store(), 3, &[1, 1], false).unwrap();
        assert_eq!(t.coverage(), &[2, 3, 2]);
        assert_eq!(t.groups(), &[1, 1]);
        assert_eq!(t.residual_score(), 9);
    }

    #[test]
    fn dense_init_skips_the_degree_cap() {
        let t = Trackers::from_store(&store(), 3, &[1, 1], true).unwrap();
        assert_eq!(t.coverage(), &[3, 3, 3]);
        assert_eq!(t.residual_score(), 11);
    }

    #[test]
    fn init_rejects_unknown_groups_in_both_modes() {
        for &dense in &[false, true] {
            assert!(matches!(
                Trackers::from_store(&store(), 1, &[1], dense),
                Err(CoverError::GroupOutOfRange {
                    vertex: 2,
                    group: 1,
                    ngroups: 1
                })
            ));
        }
    }

    #[test]
    fn commit_decrements_and_floors() {
        let mut t = Trackers::from_store(&store(), 1, &[1, 0], false).unwrap();
        assert_eq!(t.coverage(), &[1, 1, 1]);
        let v1 = store().get(1).unwrap();
        t.commit(&v1);
        assert_eq!(t.coverage(), &[0, 0, 0]);
        assert_eq!(t.groups(), &[0, 0]);
        // repeat commits stay floored
        t.commit(&v1);
        assert_eq!(t.coverage(), &[0, 0, 0]);
        assert_eq!(t.groups(), &[0, 0]);
        assert!(t.satisfied());
    }

    #[test]
    fn residual_matches_tracker_sums() {
        let mut t = Trackers::from_store(&store(), 2, &[2, 2], false).unwrap();
        let recs: Vec<_> = (0..3).map(|v| store().get(v).unwrap()).collect();
        for r in &recs {
            t.commit(r);
            let by_sum = t.coverage().iter().map(|&c| u64::from(c)).sum::<u64>()
                + t.groups().iter().map(|&g| u64::from(g)).sum::<u64>();
            assert_eq!(t.residual_score(), by_sum);
        }
    }

    #[test]
    fn duplicate_neighbors_count_with_multiplicity() {
        let s = MemoryStore::new(vec![rec(0, 0, vec![1, 1, 0]), rec(1, 0, vec![0, 1])]);
        let t = Trackers::from_store(&s, 2, &[1], false).unwrap();
        // coverage [2, 2]; vertex 0 sums neighbor 1 twice
        let v0 = s.get(0).unwrap();
        assert_eq!(t.marginal_gain(&v0), 2 + 2 + 2 + 1);
        let mut t = t;
        t.commit(&v0);
        // neighbor 1 decremented twice
        assert_eq!(t.coverage(), &[1, 0]);
    }

    #[test]
    fn gains_never_increase_across_commits() {
        let s = store();
        let mut t = Trackers::from_store(&s, 2, &[2, 1], false).unwrap();
        let recs: Vec<_> = (0..3).map(|v| s.get(v).unwrap()).collect();
        let mut last: Vec<u64> = recs.iter().map(|r| t.marginal_gain(r)).collect();
        for committed in &recs {
            t.commit(committed);
            let now: Vec<u64> = recs.iter().map(|r| t.marginal_gain(r)).collect();
            for (before, after) in last.iter().zip(now.iter()) {
                assert!(after <= before);
            }
            last = now;
        }
    }

    #[test]
    fn upper_bound_dominates_the_gain() {
        let s = store();
        let t = Trackers::from_store(&s, 2, &[2, 1], false).unwrap();
        for v in 0..3 {
            let r = s.get(v).unwrap();
            assert!(t.gain_upper_bound(&r) >= t.marginal_gain(&r));
        }
    }
}
