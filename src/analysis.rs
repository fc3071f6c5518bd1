use crate::probe::{ProbePair, ProbeResult, is_valid_dual_bound};

/// What the rule has to do after looking at the probes of one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfeasibilityAction {
    /// No reduction, the candidate is scored.
    Continue,
    /// Both roundings are infeasible.
    Cutoff,
    /// The down rounding is infeasible, the lower bound is raised.
    ReduceDown,
    /// The up rounding is infeasible, the upper bound is lowered.
    ReduceUp,
    /// The infeasible roundings produced conflict constraints that propagation will act on.
    AddConflict,
}

impl InfeasibilityAction {
    /// The action taken when the conflict constraints cannot be kept.
    pub fn without_conflicts(self, down_infeasible: bool, up_infeasible: bool) -> Self {
        match self {
            InfeasibilityAction::AddConflict => match (down_infeasible, up_infeasible) {
                (true, true) => InfeasibilityAction::Cutoff,
                (true, false) => InfeasibilityAction::ReduceDown,
                (false, true) => InfeasibilityAction::ReduceUp,
                (false, false) => InfeasibilityAction::Continue,
            },
            other => other,
        }
    }
}

/// Which sides of a candidate were proven infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Infeasibility {
    pub down: bool,
    pub up: bool,
    pub action: InfeasibilityAction,
}

/// LP context needed to trust a probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LpContext {
    pub all_cols_in_lp: bool,
    pub exact_solve: bool,
    pub cutoff_bound: f64,
}

fn proven_infeasible(result: &ProbeResult, lp: &LpContext) -> bool {
    is_valid_dual_bound(result, lp.all_cols_in_lp, lp.exact_solve)
        && (result.infeasible || result.objective >= lp.cutoff_bound)
}

/// Interprets the infeasibility reports of a candidate's probes.
///
/// Only infeasibility backed by a valid dual bound is acted upon; anything else continues as if
/// the side were feasible.
pub fn analyse(probes: &ProbePair, lp: &LpContext, allow_add_cons: bool) -> Infeasibility {
    let down = proven_infeasible(&probes.down, lp);
    let up = proven_infeasible(&probes.up, lp);

    let action = if !down && !up {
        InfeasibilityAction::Continue
    } else if allow_add_cons && (!down || probes.down.conflict) && (!up || probes.up.conflict) {
        InfeasibilityAction::AddConflict
    } else if down && up {
        InfeasibilityAction::Cutoff
    } else if down {
        InfeasibilityAction::ReduceDown
    } else {
        InfeasibilityAction::ReduceUp
    };

    Infeasibility { down, up, action }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LP: LpContext = LpContext {
        all_cols_in_lp: true,
        exact_solve: false,
        cutoff_bound: f64::INFINITY,
    };

    fn pair(down: ProbeResult, up: ProbeResult) -> ProbePair {
        ProbePair { down, up }
    }

    #[test]
    fn feasible_sides_continue() {
        let res = analyse(&pair(ProbeResult::optimal(1.0), ProbeResult::optimal(2.0)), &LP, true);
        assert_eq!(res.action, InfeasibilityAction::Continue);
    }

    #[test]
    fn both_infeasible_is_cutoff() {
        let probes = pair(ProbeResult::infeasible(false), ProbeResult::infeasible(true));
        assert_eq!(analyse(&probes, &LP, true).action, InfeasibilityAction::Cutoff);
    }

    #[test]
    fn both_infeasible_with_conflicts() {
        let probes = pair(ProbeResult::infeasible(true), ProbeResult::infeasible(true));
        assert_eq!(analyse(&probes, &LP, true).action, InfeasibilityAction::AddConflict);
        assert_eq!(analyse(&probes, &LP, false).action, InfeasibilityAction::Cutoff);
    }

    #[test]
    fn one_side_infeasible_reduces() {
        let probes = pair(ProbeResult::infeasible(false), ProbeResult::optimal(12.0));
        let res = analyse(&probes, &LP, true);
        assert_eq!(res.action, InfeasibilityAction::ReduceDown);
        assert!(res.down && !res.up);

        let probes = pair(ProbeResult::optimal(12.0), ProbeResult::infeasible(false));
        assert_eq!(analyse(&probes, &LP, true).action, InfeasibilityAction::ReduceUp);
    }

    #[test]
    fn one_side_infeasible_with_conflict() {
        let probes = pair(ProbeResult::infeasible(true), ProbeResult::optimal(12.0));
        let res = analyse(&probes, &LP, true);
        assert_eq!(res.action, InfeasibilityAction::AddConflict);
        assert_eq!(
            res.action.without_conflicts(res.down, res.up),
            InfeasibilityAction::ReduceDown
        );
    }

    #[test]
    fn untrusted_infeasibility_continues() {
        let probes = pair(ProbeResult::infeasible(false), ProbeResult::infeasible(false));
        let incomplete = LpContext {
            all_cols_in_lp: false,
            ..LP
        };
        assert_eq!(analyse(&probes, &incomplete, true).action, InfeasibilityAction::Continue);
        let exact = LpContext {
            exact_solve: true,
            ..LP
        };
        assert_eq!(analyse(&probes, &exact, true).action, InfeasibilityAction::Continue);

        let mut unstable = ProbeResult::infeasible(false);
        unstable.valid = false;
        let probes = pair(unstable, ProbeResult::optimal(3.0));
        assert_eq!(analyse(&probes, &LP, true).action, InfeasibilityAction::Continue);
    }

    #[test]
    fn bound_beyond_cutoff_is_infeasible() {
        let lp = LpContext {
            cutoff_bound: 15.0,
            ..LP
        };
        let probes = pair(ProbeResult::optimal(15.0), ProbeResult::optimal(14.0));
        assert_eq!(analyse(&probes, &lp, false).action, InfeasibilityAction::ReduceDown);
    }
}
