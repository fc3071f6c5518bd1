use crate::candidate::BranchingCandidate;
use crate::ffi;
use crate::probe::Direction;
use scip_sys::SCIP_Result;

/// A dual bound estimate for a child node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildBound {
    /// The bound value.
    pub value: f64,
    /// Whether the value is a proven dual bound. Otherwise it is only an estimate.
    pub valid: bool,
}

impl ChildBound {
    pub fn valid(value: f64) -> Self {
        ChildBound { value, valid: true }
    }

    pub fn estimate(value: f64) -> Self {
        ChildBound { value, valid: false }
    }

    /// The lower bound that may be installed in the child given the proved bound of the parent.
    pub fn child_lower_bound(&self, proved_bound: f64) -> f64 {
        if self.valid {
            self.value.max(proved_bound)
        } else {
            proved_bound
        }
    }
}

/// The candidate chosen for branching.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchDecision {
    pub candidate: BranchingCandidate,
    pub down: ChildBound,
    pub up: ChildBound,
    pub score: f64,
    /// Dual bound proven for the whole subtree of the node.
    pub proved_bound: f64,
}

/// A bound change derived from an infeasible rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainReduction {
    pub candidate: BranchingCandidate,
    /// The rounding that was proven infeasible.
    pub infeasible_side: Direction,
    /// The new lower bound for an infeasible down rounding, the new upper bound otherwise.
    pub new_bound: f64,
}

/// Why the rule did not produce a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotRunReason {
    /// There were no candidates.
    NoCandidates,
    /// There was exactly one candidate, nothing to compare.
    SingleCandidate,
    /// The LP solver failed during strong branching.
    LpError,
    /// A probing LP was unbounded.
    Unbounded,
    /// The solve was asked to stop.
    Stopped,
    /// Every candidate was skipped.
    NothingScored,
}

/// The outcome of one execution of the branching rule.
#[derive(Debug, Clone, PartialEq)]
pub enum BranchingVerdict {
    /// The rule did not run, the bounds are the ones of the node's LP.
    DidNotRun {
        reason: NotRunReason,
        down: ChildBound,
        up: ChildBound,
    },
    /// Branch on the given candidate.
    Branched(BranchDecision),
    /// The current node is infeasible and can be cut off.
    CutOff,
    /// The domain of a candidate was reduced, no branching happened.
    ReducedDom(DomainReduction),
    /// A conflict constraint was added.
    ConsAdded,
}

impl BranchingVerdict {
    pub(crate) fn did_not_run(reason: NotRunReason, lp_obj_val: f64) -> Self {
        BranchingVerdict::DidNotRun {
            reason,
            down: ChildBound::valid(lp_obj_val),
            up: ChildBound::valid(lp_obj_val),
        }
    }

    /// Returns the decision if the verdict is to branch.
    pub fn decision(&self) -> Option<&BranchDecision> {
        match self {
            BranchingVerdict::Branched(decision) => Some(decision),
            _ => None,
        }
    }
}

impl From<&BranchingVerdict> for SCIP_Result {
    fn from(val: &BranchingVerdict) -> Self {
        match val {
            BranchingVerdict::DidNotRun { .. } => ffi::SCIP_Result_SCIP_DIDNOTRUN,
            BranchingVerdict::Branched(_) => ffi::SCIP_Result_SCIP_BRANCHED,
            BranchingVerdict::CutOff => ffi::SCIP_Result_SCIP_CUTOFF,
            BranchingVerdict::ReducedDom(_) => ffi::SCIP_Result_SCIP_REDUCEDDOM,
            BranchingVerdict::ConsAdded => ffi::SCIP_Result_SCIP_CONSADDED,
        }
    }
}
