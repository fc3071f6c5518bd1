/// The side of a candidate's domain that a probe tightens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The candidate's upper bound is rounded down.
    Down,
    /// The candidate's lower bound is rounded up.
    Up,
}

/// Termination status of a probing LP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LpStatus {
    /// Solved to optimality.
    Optimal,
    /// Proven infeasible.
    Infeasible,
    /// The iteration limit was hit before the LP was solved.
    IterLimit,
    /// The objective limit was reached, the objective value is a bound.
    ObjLimit,
    /// The LP solver reported numerical trouble.
    Unstable,
    /// The LP is unbounded.
    Unbounded,
    /// The LP solver failed.
    Error,
}

impl LpStatus {
    /// Returns whether a probe with this status yields a dual bound for the child.
    pub fn is_bound_producing(self) -> bool {
        matches!(self, LpStatus::Optimal | LpStatus::Infeasible | LpStatus::ObjLimit)
    }
}

/// Outcome of solving the LP with one side of a candidate tightened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeResult {
    /// Termination status of the probing LP.
    pub status: LpStatus,
    /// Objective value reached by the probing LP.
    pub objective: f64,
    /// Whether the LP back end considers `objective` a valid dual bound.
    pub valid: bool,
    /// Whether the rounded child is infeasible.
    pub infeasible: bool,
    /// Whether the back end stored a conflict constraint for the infeasibility.
    pub conflict: bool,
}

impl ProbeResult {
    /// An optimally solved probe.
    pub fn optimal(objective: f64) -> Self {
        ProbeResult {
            status: LpStatus::Optimal,
            objective,
            valid: true,
            infeasible: false,
            conflict: false,
        }
    }

    /// An infeasible probe.
    pub fn infeasible(conflict: bool) -> Self {
        ProbeResult {
            status: LpStatus::Infeasible,
            objective: f64::INFINITY,
            valid: true,
            infeasible: true,
            conflict,
        }
    }

    /// A probe stopped by the iteration limit, `estimate` is the last objective value.
    pub fn iter_limit(estimate: f64) -> Self {
        ProbeResult {
            status: LpStatus::IterLimit,
            objective: estimate,
            valid: false,
            infeasible: false,
            conflict: false,
        }
    }

    /// A probe that hit numerical trouble.
    pub fn unstable(estimate: f64) -> Self {
        ProbeResult {
            status: LpStatus::Unstable,
            objective: estimate,
            valid: false,
            infeasible: false,
            conflict: false,
        }
    }

    /// A probe whose LP is unbounded.
    pub fn unbounded() -> Self {
        ProbeResult {
            status: LpStatus::Unbounded,
            objective: f64::NEG_INFINITY,
            valid: false,
            infeasible: false,
            conflict: false,
        }
    }

    /// A failed probe.
    pub fn error() -> Self {
        ProbeResult {
            status: LpStatus::Error,
            objective: f64::NEG_INFINITY,
            valid: false,
            infeasible: false,
            conflict: false,
        }
    }

    /// The result recorded for a side that was not probed.
    pub fn skipped() -> Self {
        ProbeResult {
            status: LpStatus::IterLimit,
            objective: f64::NEG_INFINITY,
            valid: false,
            infeasible: false,
            conflict: false,
        }
    }

    /// Returns whether the probe makes strong branching unusable at this node.
    pub fn is_fatal(&self) -> bool {
        matches!(self.status, LpStatus::Error | LpStatus::Unbounded)
    }
}

/// The down and up probe of one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbePair {
    pub down: ProbeResult,
    pub up: ProbeResult,
}

impl ProbePair {
    /// Fixes the validity of both sides to what the LP context at probing time allows.
    ///
    /// A pair kept for later use must not become a proof once the LP changes.
    pub fn with_validity(mut self, all_cols_in_lp: bool, exact_solve: bool) -> Self {
        self.down.valid = is_valid_dual_bound(&self.down, all_cols_in_lp, exact_solve);
        self.up.valid = is_valid_dual_bound(&self.up, all_cols_in_lp, exact_solve);
        self
    }
}

/// Decides whether a probed objective value may be claimed as the child's dual bound.
///
/// Without all columns in the LP, or when solving exactly, the value is only an estimate.
pub fn is_valid_dual_bound(result: &ProbeResult, all_cols_in_lp: bool, exact_solve: bool) -> bool {
    all_cols_in_lp && !exact_solve && result.valid && result.status.is_bound_producing()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimal_probe_is_valid_bound() {
        assert!(is_valid_dual_bound(&ProbeResult::optimal(3.0), true, false));
        assert!(is_valid_dual_bound(&ProbeResult::infeasible(false), true, false));
    }

    #[test]
    fn incomplete_or_exact_lp_never_gives_bounds() {
        let res = ProbeResult::optimal(3.0);
        assert!(!is_valid_dual_bound(&res, false, false));
        assert!(!is_valid_dual_bound(&res, true, true));
    }

    #[test]
    fn limits_and_trouble_are_estimates() {
        assert!(!is_valid_dual_bound(&ProbeResult::iter_limit(11.0), true, false));
        assert!(!is_valid_dual_bound(&ProbeResult::unstable(11.0), true, false));
        assert!(!is_valid_dual_bound(&ProbeResult::error(), true, false));

        let mut obj_limit = ProbeResult::iter_limit(20.0);
        obj_limit.status = LpStatus::ObjLimit;
        obj_limit.valid = true;
        assert!(is_valid_dual_bound(&obj_limit, true, false));
    }

    #[test]
    fn back_end_validity_is_respected() {
        let mut res = ProbeResult::optimal(3.0);
        res.valid = false;
        assert!(!is_valid_dual_bound(&res, true, false));
    }

    #[test]
    fn frozen_validity_survives_a_complete_lp() {
        let pair = ProbePair {
            down: ProbeResult::optimal(12.0),
            up: ProbeResult::iter_limit(13.0),
        };
        let frozen = pair.with_validity(false, false);
        assert!(!frozen.down.valid);
        assert!(!is_valid_dual_bound(&frozen.down, true, false));
        assert!(!is_valid_dual_bound(&frozen.up, true, false));

        let frozen = pair.with_validity(true, false);
        assert!(is_valid_dual_bound(&frozen.down, true, false));
        assert!(!is_valid_dual_bound(&frozen.up, true, false));
    }
}
