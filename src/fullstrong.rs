use std::collections::HashMap;

use log::{debug, info, warn};

use crate::analysis::{Infeasibility, InfeasibilityAction, LpContext, analyse};
use crate::branchrule::{BranchDecision, BranchingVerdict, ChildBound, DomainReduction, NotRunReason};
use crate::cache::CandidateCache;
use crate::candidate::{BranchingCandidate, CandidateList};
use crate::framework::Framework;
use crate::param::FullStrongParams;
use crate::probe::{Direction, LpStatus, ProbePair, ProbeResult, is_valid_dual_bound};
use crate::pseudocost::pseudocost_updates;
use crate::retcode::Retcode;
use crate::session::ProbeSession;

/// Number of probes between two node information lines at the root.
const DISPLAY_FREQ: usize = 100;

/// Counters of a [`FullStrongBranching`] rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullStrongStats {
    /// Number of executions.
    pub n_calls: usize,
    /// Number of LP probes.
    pub n_probes: usize,
    /// Number of candidates evaluated from the cache.
    pub n_cache_hits: usize,
}

/// Best candidate found so far in a selection.
#[derive(Debug, Clone, Copy)]
struct Best {
    index: usize,
    score: f64,
    down: ChildBound,
    up: ChildBound,
}

/// Full strong branching: every priority candidate is probed on both sides and the one with
/// the best score is branched on.
#[derive(Debug, Clone, Default)]
pub struct FullStrongBranching {
    params: FullStrongParams,
    /// Position in the candidate list at which the next selection starts.
    last_cand: usize,
    cache: CandidateCache,
    /// Per-variable (skip down, skip up) flags, honoured beyond the completion cutoff.
    skip: HashMap<usize, (bool, bool)>,
    stats: FullStrongStats,
}

impl FullStrongBranching {
    pub fn new(params: FullStrongParams) -> Self {
        FullStrongBranching {
            params,
            ..Default::default()
        }
    }

    pub fn params(&self) -> &FullStrongParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut FullStrongParams {
        &mut self.params
    }

    pub fn stats(&self) -> FullStrongStats {
        self.stats
    }

    /// Position at which the next selection starts.
    pub fn last_cand(&self) -> usize {
        self.last_cand
    }

    pub fn cache(&self) -> &CandidateCache {
        &self.cache
    }

    /// Sets which sides of a variable may be left unprobed beyond the completion cutoff.
    pub fn set_skip(&mut self, var_prob_id: usize, skip_down: bool, skip_up: bool) {
        if skip_down || skip_up {
            let _ = self.skip.insert(var_prob_id, (skip_down, skip_up));
        } else {
            let _ = self.skip.remove(&var_prob_id);
        }
    }

    fn skip_flags(&self, var_prob_id: usize) -> (bool, bool) {
        self.skip.get(&var_prob_id).copied().unwrap_or((false, false))
    }

    /// Resets the state kept between executions, to be called when a solve starts.
    pub fn init(&mut self) {
        self.last_cand = 0;
        self.cache.clear();
    }

    /// Runs the rule at the current node: selects a candidate and, unless a reduction was found,
    /// branches on it and installs the child bounds.
    pub fn execute<F: Framework>(
        &mut self,
        ctx: &mut F,
        allow_add_cons: bool,
    ) -> Result<BranchingVerdict, Retcode> {
        self.stats.n_calls += 1;
        let candidates = ctx.lp_branching_cands()?;
        let verdict = self.select(ctx, &candidates, allow_add_cons)?;

        if let BranchingVerdict::Branched(decision) = &verdict {
            debug!(
                " -> {} candidates, selected variable {} (solval={}, down={}, up={}, score={})",
                candidates.len(),
                decision.candidate.var_prob_id,
                decision.candidate.lp_sol_val,
                decision.down.value,
                decision.up.value,
                decision.score
            );
            let (down_child, up_child) = ctx.branch_var(&decision.candidate)?;
            if ctx.all_cols_in_lp() && !ctx.is_exact_solve() {
                ctx.update_child_bound(&down_child, decision.down.child_lower_bound(decision.proved_bound))?;
                ctx.update_child_bound(&up_child, decision.up.child_lower_bound(decision.proved_bound))?;
            }
        }

        Ok(verdict)
    }

    /// Selects a branching candidate by strong branching without branching on it.
    ///
    /// The candidates are visited cyclically starting where the previous selection stopped.
    /// Reductions found on the way (cutoff, bound changes, conflicts) end the selection early.
    pub fn select<F: Framework>(
        &mut self,
        ctx: &mut F,
        candidates: &CandidateList,
        allow_add_cons: bool,
    ) -> Result<BranchingVerdict, Retcode> {
        let lp_obj_val = ctx.lp_obj_val();

        if candidates.is_empty() {
            return Ok(BranchingVerdict::did_not_run(NotRunReason::NoCandidates, lp_obj_val));
        }
        if candidates.len() == 1 {
            return Ok(BranchingVerdict::did_not_run(NotRunReason::SingleCandidate, lp_obj_val));
        }
        if candidates.n_prio() == 0 {
            return Ok(BranchingVerdict::did_not_run(NotRunReason::NothingScored, lp_obj_val));
        }

        let lp = LpContext {
            all_cols_in_lp: ctx.all_cols_in_lp(),
            exact_solve: ctx.is_exact_solve(),
            cutoff_bound: ctx.cutoff_bound(),
        };
        let node = ctx.node_number();
        let lp_age = ctx.lp_age();
        let depth = ctx.depth();
        let feastol = ctx.feastol();
        let n_complete = candidates.n_complete();
        let reevalage = self.params.reevalage;
        let iteration_limit = self.params.iteration_limit;

        let mut proved_bound = lp_obj_val;
        let mut best: Option<Best> = None;
        let mut both_gains = false;
        let mut n_sb_calls = 0;
        let mut next_start = self.last_cand;

        let mut session = ProbeSession::begin(ctx)?;

        for (visit, cand) in candidates.iter_from(self.last_cand) {
            if both_gains && !visit.is_complete(n_complete) {
                break;
            }
            if session.is_stopped() {
                session.end()?;
                self.last_cand = visit.index;
                return Ok(BranchingVerdict::did_not_run(NotRunReason::Stopped, lp_obj_val));
            }

            let (skip_down, skip_up) = if visit.is_complete(n_complete) {
                (false, false)
            } else {
                self.skip_flags(cand.var_prob_id)
            };
            if skip_down && skip_up {
                next_start = visit.index + 1;
                continue;
            }

            let (probes, cached_gains) = match self.cache.lookup(cand.var_prob_id, node, lp_age, reevalage) {
                Some(entry) => {
                    self.stats.n_cache_hits += 1;
                    let gains = entry.gains();
                    debug!(
                        "strong branching on variable {} already performed (lpage={}, down={} ({:+}), up={} ({:+}))",
                        cand.var_prob_id,
                        lp_age - entry.lp_age,
                        entry.probes.down.objective,
                        gains.0,
                        entry.probes.up.objective,
                        gains.1
                    );
                    (entry.probes, Some(gains))
                }
                None => {
                    debug!(
                        "applying strong branching on variable {} with solution {}",
                        cand.var_prob_id, cand.lp_sol_val
                    );
                    let down = if skip_down {
                        ProbeResult::skipped()
                    } else {
                        session.probe(cand, Direction::Down, iteration_limit)?
                    };
                    let up = if skip_up {
                        ProbeResult::skipped()
                    } else {
                        session.probe(cand, Direction::Up, iteration_limit)?
                    };
                    self.stats.n_probes += usize::from(!skip_down) + usize::from(!skip_up);
                    n_sb_calls += 1;

                    if depth == 0 && n_sb_calls % DISPLAY_FREQ == 0 {
                        info!(
                            "(node {node}) {n_sb_calls} strong branching calls, lp objective {lp_obj_val}, proved bound {proved_bound}"
                        );
                    }

                    if down.is_fatal() || up.is_fatal() {
                        let unbounded = down.status == LpStatus::Unbounded || up.status == LpStatus::Unbounded;
                        warn!(
                            "(node {node}) error in strong branching call for variable {} with solution {}",
                            cand.var_prob_id, cand.lp_sol_val
                        );
                        session.end()?;
                        self.last_cand = visit.index;
                        let reason = if unbounded {
                            NotRunReason::Unbounded
                        } else {
                            NotRunReason::LpError
                        };
                        return Ok(BranchingVerdict::did_not_run(reason, lp_obj_val));
                    }

                    let probes = ProbePair { down, up }.with_validity(lp.all_cols_in_lp, lp.exact_solve);
                    (probes, None)
                }
            };

            // cached bounds may have reached a cutoff that improved since they were stored
            let infeasibility = analyse(&probes, &lp, allow_add_cons);
            if infeasibility.action != InfeasibilityAction::Continue {
                session.end()?;
                self.last_cand = visit.index;
                return self.reduce(ctx, cand, infeasibility);
            }

            let (down_gain, up_gain) = match cached_gains {
                Some(gains) => gains,
                None => {
                    let down_gain = probes.down.objective.max(lp_obj_val) - lp_obj_val;
                    let up_gain = probes.up.objective.max(lp_obj_val) - lp_obj_val;
                    for update in pseudocost_updates(
                        cand,
                        (!skip_down).then_some(down_gain),
                        (!skip_up).then_some(up_gain),
                    ) {
                        session.update_pseudocost(&update)?;
                    }
                    if !skip_down && !skip_up {
                        self.cache.store(cand.var_prob_id, probes, node, lp_age, lp_obj_val);
                    }
                    (down_gain, up_gain)
                }
            };

            if down_gain > feastol && up_gain > feastol {
                both_gains = true;
            }

            // a probe may end below the node's LP value through numerical noise
            let down = ChildBound {
                value: probes.down.objective.max(lp_obj_val),
                valid: is_valid_dual_bound(&probes.down, lp.all_cols_in_lp, lp.exact_solve),
            };
            let up = ChildBound {
                value: probes.up.objective.max(lp_obj_val),
                valid: is_valid_dual_bound(&probes.up, lp.all_cols_in_lp, lp.exact_solve),
            };
            if down.valid && up.valid {
                // the weaker child bounds the whole subtree
                proved_bound = proved_bound.max(down.value.min(up.value));
            }

            let score = session.branch_score(cand, down_gain, up_gain);
            if best.is_none_or(|b| score > b.score) {
                best = Some(Best {
                    index: visit.index,
                    score,
                    down,
                    up,
                });
            }
            debug!(
                " -> cand {}/{} var {} (solval={}, downgain={}, upgain={}, score={}) -- best: {:?}",
                visit.index,
                candidates.len(),
                cand.var_prob_id,
                cand.lp_sol_val,
                down_gain,
                up_gain,
                score,
                best.map(|b| (b.index, b.score))
            );

            next_start = visit.index + 1;
        }

        session.end()?;
        self.last_cand = next_start % candidates.n_prio();

        let Some(best) = best else {
            return Ok(BranchingVerdict::did_not_run(NotRunReason::NothingScored, lp_obj_val));
        };
        debug_assert!(proved_bound < lp.cutoff_bound);
        let Some(candidate) = candidates.get(best.index) else {
            return Err(Retcode::InvalidResult);
        };

        Ok(BranchingVerdict::Branched(BranchDecision {
            candidate: candidate.clone(),
            down: best.down,
            up: best.up,
            score: best.score,
            proved_bound,
        }))
    }

    /// Acts on a candidate with an infeasible rounding.
    fn reduce<F: Framework>(
        &mut self,
        ctx: &mut F,
        cand: &BranchingCandidate,
        infeasibility: Infeasibility,
    ) -> Result<BranchingVerdict, Retcode> {
        let mut action = infeasibility.action;
        if action == InfeasibilityAction::AddConflict {
            if ctx.keep_conflicts(cand)? {
                debug!(" -> conflict constraints added for variable {}", cand.var_prob_id);
                return Ok(BranchingVerdict::ConsAdded);
            }
            action = action.without_conflicts(infeasibility.down, infeasibility.up);
        }

        match action {
            InfeasibilityAction::Cutoff => {
                debug!(" -> variable {} is infeasible in both directions", cand.var_prob_id);
                Ok(BranchingVerdict::CutOff)
            }
            InfeasibilityAction::ReduceDown => {
                debug!(" -> variable {} is infeasible in downward branch", cand.var_prob_id);
                let new_bound = ctx.feas_ceil(cand.lp_sol_val);
                if !ctx.tighten_lb(cand, new_bound)? {
                    return Ok(BranchingVerdict::CutOff);
                }
                Ok(BranchingVerdict::ReducedDom(DomainReduction {
                    candidate: cand.clone(),
                    infeasible_side: Direction::Down,
                    new_bound,
                }))
            }
            InfeasibilityAction::ReduceUp => {
                debug!(" -> variable {} is infeasible in upward branch", cand.var_prob_id);
                let new_bound = ctx.feas_floor(cand.lp_sol_val);
                if !ctx.tighten_ub(cand, new_bound)? {
                    return Ok(BranchingVerdict::CutOff);
                }
                Ok(BranchingVerdict::ReducedDom(DomainReduction {
                    candidate: cand.clone(),
                    infeasible_side: Direction::Up,
                    new_bound,
                }))
            }
            InfeasibilityAction::Continue | InfeasibilityAction::AddConflict => Err(Retcode::InvalidResult),
        }
    }
}
