use crate::candidate::{BranchingCandidate, CandidateList};
use crate::pseudocost::PseudocostUpdate;
use crate::retcode::Retcode;
use crate::session::StrongBranchLp;

/// Everything the full strong branching rule needs from the branch-and-bound framework.
///
/// Query methods are infallible; methods that change the search state keep the framework's
/// status-code contract and return a [`Retcode`] on failure.
pub trait Framework: StrongBranchLp {
    /// Handle of a child node created by branching.
    type Child;

    /// Number of the node being branched on.
    fn node_number(&self) -> i64;

    /// Depth of the node being branched on.
    fn depth(&self) -> usize;

    /// Counter of LP changes at the current node.
    fn lp_age(&self) -> i64;

    /// Objective value of the node's LP relaxation.
    fn lp_obj_val(&self) -> f64;

    /// Objective value at or above which nodes are cut off.
    fn cutoff_bound(&self) -> f64;

    /// Returns whether all columns of the problem are present in the LP.
    fn all_cols_in_lp(&self) -> bool;

    /// Returns whether the problem is solved in exact arithmetic.
    fn is_exact_solve(&self) -> bool;

    /// Returns whether the solve has been asked to stop.
    fn is_stopped(&self) -> bool {
        false
    }

    /// Feasibility tolerance used for rounding LP values.
    fn feastol(&self) -> f64 {
        1e-6
    }

    /// Rounds up, treating values within the feasibility tolerance of an integer as integral.
    fn feas_ceil(&self, val: f64) -> f64 {
        (val - self.feastol()).ceil()
    }

    /// Rounds down, treating values within the feasibility tolerance of an integer as integral.
    fn feas_floor(&self, val: f64) -> f64 {
        (val + self.feastol()).floor()
    }

    /// The fractional LP candidates of the node.
    fn lp_branching_cands(&self) -> Result<CandidateList, Retcode>;

    /// Combines the gains of a candidate into a branching score.
    fn branch_score(&self, candidate: &BranchingCandidate, down_gain: f64, up_gain: f64) -> f64;

    /// Feeds one observation into the pseudocosts.
    fn update_pseudocost(&mut self, update: &PseudocostUpdate) -> Result<(), Retcode>;

    /// Raises the local lower bound of a candidate. Returns `false` if the domain became empty.
    fn tighten_lb(&mut self, candidate: &BranchingCandidate, new_lb: f64) -> Result<bool, Retcode>;

    /// Lowers the local upper bound of a candidate. Returns `false` if the domain became empty.
    fn tighten_ub(&mut self, candidate: &BranchingCandidate, new_ub: f64) -> Result<bool, Retcode>;

    /// Keeps the conflict constraints produced while probing a candidate.
    ///
    /// Returns `false` if they could not be added.
    fn keep_conflicts(&mut self, candidate: &BranchingCandidate) -> Result<bool, Retcode>;

    /// Branches on a candidate, returning the down and up child.
    fn branch_var(&mut self, candidate: &BranchingCandidate) -> Result<(Self::Child, Self::Child), Retcode>;

    /// Raises the dual bound of a child.
    fn update_child_bound(&mut self, child: &Self::Child, bound: f64) -> Result<(), Retcode>;
}
