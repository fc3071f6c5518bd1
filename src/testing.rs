use std::collections::HashMap;

use crate::candidate::{BranchingCandidate, CandidateList};
use crate::framework::Framework;
use crate::probe::{Direction, ProbeResult};
use crate::pseudocost::{PseudocostUpdate, Pseudocosts};
use crate::retcode::Retcode;
use crate::score::ScoreFunction;
use crate::session::StrongBranchLp;

/// Child handle of the mock, carrying the variable branched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MockChild {
    Down(usize),
    Up(usize),
}

/// A scripted branch-and-bound node that records every call the rule makes.
///
/// Unscripted variables probe to the node's LP value on both sides.
#[derive(Debug)]
pub(crate) struct MockFramework {
    pub lp_obj: f64,
    pub cutoff: f64,
    pub node: i64,
    pub depth: usize,
    pub lp_age: i64,
    pub all_cols: bool,
    pub exact: bool,
    pub stop_after_probes: Option<usize>,
    pub tighten_ok: bool,
    pub keep_conflicts_ok: bool,
    pub score: ScoreFunction,
    pub candidates: Vec<BranchingCandidate>,
    scripts: HashMap<usize, (ProbeResult, ProbeResult)>,

    pub probes: Vec<(usize, Direction)>,
    pub iteration_limits: Vec<Option<usize>>,
    pub pseudocost_updates: Vec<PseudocostUpdate>,
    pub pseudocosts: Pseudocosts,
    pub new_lbs: Vec<(usize, f64)>,
    pub new_ubs: Vec<(usize, f64)>,
    pub conflicts_kept: Vec<usize>,
    pub branched: Option<usize>,
    pub child_bounds: Vec<(MockChild, f64)>,

    /// Counts LP modifications, restored when a session ends.
    state: u64,
    saved_state: Option<u64>,
    sessions_started: usize,
}

impl MockFramework {
    pub fn new(lp_obj: f64) -> Self {
        MockFramework {
            lp_obj,
            cutoff: f64::INFINITY,
            node: 1,
            depth: 0,
            lp_age: 1,
            all_cols: true,
            exact: false,
            stop_after_probes: None,
            tighten_ok: true,
            keep_conflicts_ok: true,
            score: ScoreFunction::default(),
            candidates: Vec::new(),
            scripts: HashMap::new(),
            probes: Vec::new(),
            iteration_limits: Vec::new(),
            pseudocost_updates: Vec::new(),
            pseudocosts: Pseudocosts::new(),
            new_lbs: Vec::new(),
            new_ubs: Vec::new(),
            conflicts_kept: Vec::new(),
            branched: None,
            child_bounds: Vec::new(),
            state: 0,
            saved_state: None,
            sessions_started: 0,
        }
    }

    pub fn with_candidates(mut self, candidates: Vec<BranchingCandidate>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn script(&mut self, var_prob_id: usize, down: ProbeResult, up: ProbeResult) {
        let _ = self.scripts.insert(var_prob_id, (down, up));
    }

    /// The results a probe of the variable returns.
    pub fn scripted(&self, var_prob_id: usize) -> (ProbeResult, ProbeResult) {
        self.scripts
            .get(&var_prob_id)
            .copied()
            .unwrap_or((ProbeResult::optimal(self.lp_obj), ProbeResult::optimal(self.lp_obj)))
    }

    pub fn lp_state(&self) -> u64 {
        self.state
    }

    pub fn in_session(&self) -> bool {
        self.saved_state.is_some()
    }

    pub fn sessions_started(&self) -> usize {
        self.sessions_started
    }
}

impl StrongBranchLp for MockFramework {
    fn start_strong_branch(&mut self) -> Result<(), Retcode> {
        if self.saved_state.is_some() {
            return Err(Retcode::InvalidCall);
        }
        self.saved_state = Some(self.state);
        self.sessions_started += 1;
        Ok(())
    }

    fn end_strong_branch(&mut self) -> Result<(), Retcode> {
        match self.saved_state.take() {
            Some(state) => {
                self.state = state;
                Ok(())
            }
            None => Err(Retcode::InvalidCall),
        }
    }

    fn probe(
        &mut self,
        candidate: &BranchingCandidate,
        direction: Direction,
        iteration_limit: Option<usize>,
    ) -> Result<ProbeResult, Retcode> {
        assert!(self.in_session(), "probe outside of a strong branching session");
        self.state += 1;
        self.probes.push((candidate.var_prob_id, direction));
        self.iteration_limits.push(iteration_limit);
        let (down, up) = self.scripted(candidate.var_prob_id);
        Ok(match direction {
            Direction::Down => down,
            Direction::Up => up,
        })
    }
}

impl Framework for MockFramework {
    type Child = MockChild;

    fn node_number(&self) -> i64 {
        self.node
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn lp_age(&self) -> i64 {
        self.lp_age
    }

    fn lp_obj_val(&self) -> f64 {
        self.lp_obj
    }

    fn cutoff_bound(&self) -> f64 {
        self.cutoff
    }

    fn all_cols_in_lp(&self) -> bool {
        self.all_cols
    }

    fn is_exact_solve(&self) -> bool {
        self.exact
    }

    fn is_stopped(&self) -> bool {
        self.stop_after_probes.is_some_and(|n| self.probes.len() >= n)
    }

    fn lp_branching_cands(&self) -> Result<CandidateList, Retcode> {
        Ok(CandidateList::new(self.candidates.clone()))
    }

    fn branch_score(&self, _candidate: &BranchingCandidate, down_gain: f64, up_gain: f64) -> f64 {
        self.score.score(down_gain, up_gain)
    }

    fn update_pseudocost(&mut self, update: &PseudocostUpdate) -> Result<(), Retcode> {
        self.pseudocosts.update(update);
        self.pseudocost_updates.push(*update);
        Ok(())
    }

    fn tighten_lb(&mut self, candidate: &BranchingCandidate, new_lb: f64) -> Result<bool, Retcode> {
        self.new_lbs.push((candidate.var_prob_id, new_lb));
        Ok(self.tighten_ok)
    }

    fn tighten_ub(&mut self, candidate: &BranchingCandidate, new_ub: f64) -> Result<bool, Retcode> {
        self.new_ubs.push((candidate.var_prob_id, new_ub));
        Ok(self.tighten_ok)
    }

    fn keep_conflicts(&mut self, candidate: &BranchingCandidate) -> Result<bool, Retcode> {
        if self.keep_conflicts_ok {
            self.conflicts_kept.push(candidate.var_prob_id);
        }
        Ok(self.keep_conflicts_ok)
    }

    fn branch_var(&mut self, candidate: &BranchingCandidate) -> Result<(MockChild, MockChild), Retcode> {
        if self.in_session() {
            return Err(Retcode::InvalidCall);
        }
        self.branched = Some(candidate.var_prob_id);
        Ok((
            MockChild::Down(candidate.var_prob_id),
            MockChild::Up(candidate.var_prob_id),
        ))
    }

    fn update_child_bound(&mut self, child: &MockChild, bound: f64) -> Result<(), Retcode> {
        self.child_bounds.push((*child, bound));
        Ok(())
    }
}
