/// A fractional variable of the current LP solution that the rule may branch on.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchingCandidate {
    /// The index of the variable in the current subproblem, used as its identity.
    pub var_prob_id: usize,
    /// The LP solution value of the variable.
    pub lp_sol_val: f64,
    /// The fractional part of the LP solution value, in the open unit interval.
    pub frac: f64,
    /// The branching priority of the variable, higher is preferred.
    pub priority: i32,
}

impl BranchingCandidate {
    /// Creates a candidate with default priority from its LP value.
    pub fn new(var_prob_id: usize, lp_sol_val: f64) -> Self {
        BranchingCandidate {
            var_prob_id,
            lp_sol_val,
            frac: lp_sol_val - lp_sol_val.floor(),
            priority: 0,
        }
    }

    /// Sets the branching priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Distance from the LP value down to the next smaller integer.
    pub fn down_distance(&self) -> f64 {
        self.frac
    }

    /// Distance from the LP value up to the next larger integer.
    pub fn up_distance(&self) -> f64 {
        1.0 - self.frac
    }
}

/// The LP branching candidates of a node.
///
/// The first `n_prio` candidates carry the maximal branching priority and are the only ones whose
/// scores are compared. The first `n_complete` visited candidates are probed on both sides
/// regardless of any skip flags.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateList {
    candidates: Vec<BranchingCandidate>,
    n_prio: usize,
    n_complete: usize,
}

impl CandidateList {
    /// Builds a list from candidates, moving the ones with maximal priority to the front.
    pub fn new(mut candidates: Vec<BranchingCandidate>) -> Self {
        let max_priority = candidates.iter().map(|c| c.priority).max();
        // stable sort keeps the framework's order within a priority class
        candidates.sort_by_key(|c| std::cmp::Reverse(c.priority));
        let n_prio = match max_priority {
            Some(max) => candidates.iter().take_while(|c| c.priority == max).count(),
            None => 0,
        };
        CandidateList {
            n_complete: n_prio,
            candidates,
            n_prio,
        }
    }

    /// Builds a list whose candidates are already ordered with `n_prio` priority candidates first.
    pub fn with_counts(candidates: Vec<BranchingCandidate>, n_prio: usize) -> Self {
        let n_prio = n_prio.min(candidates.len());
        CandidateList {
            candidates,
            n_prio,
            n_complete: n_prio,
        }
    }

    /// Sets the completion cutoff, clamped to the number of priority candidates.
    pub fn set_n_complete(&mut self, n_complete: usize) {
        self.n_complete = n_complete.min(self.n_prio);
    }

    /// Returns the number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns whether the list has no candidates.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns the number of priority candidates.
    pub fn n_prio(&self) -> usize {
        self.n_prio
    }

    /// Returns the completion cutoff.
    pub fn n_complete(&self) -> usize {
        self.n_complete
    }

    /// Returns the candidate at `index`.
    pub fn get(&self, index: usize) -> Option<&BranchingCandidate> {
        self.candidates.get(index)
    }

    /// Returns all candidates.
    pub fn as_slice(&self) -> &[BranchingCandidate] {
        &self.candidates
    }

    /// Cycles once through the priority candidates, starting at `start` modulo their count.
    pub fn iter_from(&self, start: usize) -> CandidateIter<'_> {
        let start = if self.n_prio == 0 { 0 } else { start % self.n_prio };
        CandidateIter {
            list: self,
            start,
            step: 0,
        }
    }
}

/// Where a candidate was met during a cyclic traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// Number of candidates visited before this one.
    pub step: usize,
    /// Index of the candidate in its list.
    pub index: usize,
}

impl Visit {
    /// Returns whether the candidate lies in the must-visit prefix.
    pub fn is_complete(&self, n_complete: usize) -> bool {
        self.step < n_complete
    }
}

/// Cyclic iterator over the priority candidates of a [`CandidateList`].
#[derive(Debug, Clone)]
pub struct CandidateIter<'a> {
    list: &'a CandidateList,
    start: usize,
    step: usize,
}

impl<'a> Iterator for CandidateIter<'a> {
    type Item = (Visit, &'a BranchingCandidate);

    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.list.n_prio {
            return None;
        }
        let index = (self.start + self.step) % self.list.n_prio;
        let visit = Visit {
            step: self.step,
            index,
        };
        self.step += 1;
        Some((visit, &self.list.candidates[index]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.n_prio - self.step.min(self.list.n_prio);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CandidateIter<'_> {}
