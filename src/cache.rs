use std::collections::HashMap;

use crate::probe::ProbePair;

/// The last strong branching result of one variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheEntry {
    /// Down and up probe results.
    pub probes: ProbePair,
    /// Number of the node at which the probes were made.
    pub node: i64,
    /// LP age at the time of probing.
    pub lp_age: i64,
    /// LP objective of the node at the time of probing.
    pub lp_obj_val: f64,
}

impl CacheEntry {
    /// Objective gains of the cached probes relative to the LP objective they were made at.
    pub fn gains(&self) -> (f64, f64) {
        (
            (self.probes.down.objective - self.lp_obj_val).max(0.0),
            (self.probes.up.objective - self.lp_obj_val).max(0.0),
        )
    }
}

/// Per-variable store of strong branching results, keyed by the variable's problem index.
///
/// An entry is only handed out at the node where it was produced and while the LP has not aged
/// by `max_age` or more since.
#[derive(Debug, Clone, Default)]
pub struct CandidateCache {
    entries: HashMap<usize, CacheEntry>,
}

impl CandidateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry of `var_prob_id` if it is fresh for the given node and LP age.
    pub fn lookup(&self, var_prob_id: usize, node: i64, lp_age: i64, max_age: i64) -> Option<&CacheEntry> {
        self.entries
            .get(&var_prob_id)
            .filter(|entry| entry.node == node && lp_age - entry.lp_age < max_age)
    }

    /// Stores a result, replacing any earlier one for the same variable.
    pub fn store(&mut self, var_prob_id: usize, probes: ProbePair, node: i64, lp_age: i64, lp_obj_val: f64) {
        let _ = self.entries.insert(
            var_prob_id,
            CacheEntry {
                probes,
                node,
                lp_age,
                lp_obj_val,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
