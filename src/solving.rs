use std::ffi::c_int;
use std::mem::MaybeUninit;
use std::ptr::null_mut;

use crate::candidate::{BranchingCandidate, CandidateList};
use crate::framework::Framework;
use crate::node::Node;
use crate::probe::{Direction, ProbeResult};
use crate::pseudocost::PseudocostUpdate;
use crate::score::ScoreFunction;
use crate::session::StrongBranchLp;
use crate::{Retcode, ffi, scip_call};

/// View of a SCIP instance while the branching rule executes at a node.
#[derive(Debug)]
pub(crate) struct ScipSolving {
    raw: *mut ffi::SCIP,
}

impl ScipSolving {
    pub(crate) fn new(raw: *mut ffi::SCIP) -> Self {
        ScipSolving { raw }
    }

    /// The transformed variable at the given problem index.
    fn var_at(&self, var_prob_id: usize) -> Result<*mut ffi::SCIP_VAR, Retcode> {
        let n_vars = unsafe { ffi::SCIPgetNVars(self.raw) }.max(0) as usize;
        if var_prob_id >= n_vars {
            return Err(Retcode::InvalidData);
        }
        Ok(unsafe { *ffi::SCIPgetVars(self.raw).add(var_prob_id) })
    }

    fn var(&self, candidate: &BranchingCandidate) -> Result<*mut ffi::SCIP_VAR, Retcode> {
        self.var_at(candidate.var_prob_id)
    }
}

impl StrongBranchLp for ScipSolving {
    fn start_strong_branch(&mut self) -> Result<(), Retcode> {
        scip_call!(ffi::SCIPstartStrongbranch(self.raw, false.into()));
        Ok(())
    }

    fn end_strong_branch(&mut self) -> Result<(), Retcode> {
        scip_call!(ffi::SCIPendStrongbranch(self.raw));
        Ok(())
    }

    fn probe(
        &mut self,
        candidate: &BranchingCandidate,
        direction: Direction,
        iteration_limit: Option<usize>,
    ) -> Result<ProbeResult, Retcode> {
        let var = self.var(candidate)?;
        let itlim = iteration_limit.map_or(c_int::MAX, |limit| c_int::try_from(limit).unwrap_or(c_int::MAX));

        let mut bound = 0.0;
        let mut valid: std::os::raw::c_uint = 0;
        let mut infeasible: std::os::raw::c_uint = 0;
        let mut conflict: std::os::raw::c_uint = 0;
        let mut lperror: std::os::raw::c_uint = 0;

        // a null output pointer tells SCIP to leave that side alone
        let side = (
            &mut bound as *mut f64,
            &mut valid as *mut std::os::raw::c_uint,
            &mut infeasible as *mut std::os::raw::c_uint,
            &mut conflict as *mut std::os::raw::c_uint,
        );
        let none = (null_mut(), null_mut(), null_mut(), null_mut());
        let (down, up) = match direction {
            Direction::Down => (side, none),
            Direction::Up => (none, side),
        };

        scip_call!(ffi::SCIPgetVarStrongbranchFrac(
            self.raw,
            var,
            itlim,
            false.into(),
            down.0,
            up.0,
            down.1,
            up.1,
            down.2,
            up.2,
            down.3,
            up.3,
            &mut lperror,
        ));

        Ok(if lperror != 0 {
            ProbeResult::error()
        } else if infeasible != 0 {
            ProbeResult::infeasible(conflict != 0)
        } else if valid != 0 {
            ProbeResult::optimal(bound)
        } else {
            ProbeResult::iter_limit(bound)
        })
    }
}

impl Framework for ScipSolving {
    type Child = Node;

    fn node_number(&self) -> i64 {
        unsafe { ffi::SCIPnodeGetNumber(ffi::SCIPgetCurrentNode(self.raw)) }
    }

    fn depth(&self) -> usize {
        unsafe { ffi::SCIPgetDepth(self.raw) }.max(0) as usize
    }

    fn lp_age(&self) -> i64 {
        unsafe { ffi::SCIPgetNLPs(self.raw) }
    }

    fn lp_obj_val(&self) -> f64 {
        unsafe { ffi::SCIPgetLPObjval(self.raw) }
    }

    fn cutoff_bound(&self) -> f64 {
        unsafe { ffi::SCIPgetCutoffbound(self.raw) }
    }

    fn all_cols_in_lp(&self) -> bool {
        unsafe { ffi::SCIPallColsInLP(self.raw) != 0 }
    }

    fn is_exact_solve(&self) -> bool {
        unsafe { ffi::SCIPisExact(self.raw) != 0 }
    }

    fn is_stopped(&self) -> bool {
        unsafe { ffi::SCIPisStopped(self.raw) != 0 }
    }

    fn feastol(&self) -> f64 {
        unsafe { ffi::SCIPfeastol(self.raw) }
    }

    fn feas_ceil(&self, val: f64) -> f64 {
        unsafe { ffi::SCIPfeasCeil(self.raw, val) }
    }

    fn feas_floor(&self, val: f64) -> f64 {
        unsafe { ffi::SCIPfeasFloor(self.raw, val) }
    }

    fn lp_branching_cands(&self) -> Result<CandidateList, Retcode> {
        let mut lpcands = MaybeUninit::uninit();
        let mut lpcandssol = MaybeUninit::uninit();
        let mut nlpcands = MaybeUninit::uninit();
        let mut npriolpcands = MaybeUninit::uninit();
        scip_call!(ffi::SCIPgetLPBranchCands(
            self.raw,
            lpcands.as_mut_ptr(),
            lpcandssol.as_mut_ptr(),
            null_mut(),
            nlpcands.as_mut_ptr(),
            npriolpcands.as_mut_ptr(),
            null_mut(),
        ));
        let lpcands = unsafe { lpcands.assume_init() };
        let lpcandssol = unsafe { lpcandssol.assume_init() };
        let nlpcands = unsafe { nlpcands.assume_init() }.max(0) as usize;
        let npriolpcands = unsafe { npriolpcands.assume_init() }.max(0) as usize;

        let mut cands = Vec::with_capacity(nlpcands);
        for i in 0..nlpcands {
            let var = unsafe { *lpcands.add(i) };
            let lp_sol_val = unsafe { *lpcandssol.add(i) };
            let var_prob_id = unsafe { ffi::SCIPvarGetProbindex(var) };
            if var_prob_id < 0 {
                return Err(Retcode::InvalidData);
            }
            let priority = unsafe { ffi::SCIPvarGetBranchPriority(var) };
            cands.push(BranchingCandidate::new(var_prob_id as usize, lp_sol_val).with_priority(priority));
        }
        Ok(CandidateList::with_counts(cands, npriolpcands))
    }

    fn branch_score(&self, candidate: &BranchingCandidate, down_gain: f64, up_gain: f64) -> f64 {
        match self.var(candidate) {
            Ok(var) => unsafe { ffi::SCIPgetBranchScore(self.raw, var, down_gain, up_gain) },
            Err(_) => ScoreFunction::default().score(down_gain, up_gain),
        }
    }

    fn update_pseudocost(&mut self, update: &PseudocostUpdate) -> Result<(), Retcode> {
        let var = self.var_at(update.var_prob_id)?;
        scip_call!(ffi::SCIPupdateVarPseudocost(
            self.raw,
            var,
            update.sol_val_delta,
            update.obj_delta,
            update.weight,
        ));
        Ok(())
    }

    fn tighten_lb(&mut self, candidate: &BranchingCandidate, new_lb: f64) -> Result<bool, Retcode> {
        let var = self.var(candidate)?;
        let mut infeasible: std::os::raw::c_uint = 0;
        let mut tightened: std::os::raw::c_uint = 0;
        scip_call!(ffi::SCIPtightenVarLb(
            self.raw,
            var,
            new_lb,
            false.into(),
            &mut infeasible,
            &mut tightened,
        ));
        Ok(infeasible == 0)
    }

    fn tighten_ub(&mut self, candidate: &BranchingCandidate, new_ub: f64) -> Result<bool, Retcode> {
        let var = self.var(candidate)?;
        let mut infeasible: std::os::raw::c_uint = 0;
        let mut tightened: std::os::raw::c_uint = 0;
        scip_call!(ffi::SCIPtightenVarUb(
            self.raw,
            var,
            new_ub,
            false.into(),
            &mut infeasible,
            &mut tightened,
        ));
        Ok(infeasible == 0)
    }

    fn keep_conflicts(&mut self, _candidate: &BranchingCandidate) -> Result<bool, Retcode> {
        // SCIP's conflict analysis already added them while probing
        Ok(true)
    }

    fn branch_var(&mut self, candidate: &BranchingCandidate) -> Result<(Node, Node), Retcode> {
        let var = self.var(candidate)?;
        let mut down = MaybeUninit::uninit();
        let mut up = MaybeUninit::uninit();
        scip_call!(ffi::SCIPbranchVar(
            self.raw,
            var,
            down.as_mut_ptr(),
            null_mut(),
            up.as_mut_ptr(),
        ));
        let down = unsafe { down.assume_init() };
        let up = unsafe { up.assume_init() };
        Ok((Node { raw: down }, Node { raw: up }))
    }

    fn update_child_bound(&mut self, child: &Node, bound: f64) -> Result<(), Retcode> {
        if child.raw.is_null() {
            return Ok(());
        }
        scip_call!(ffi::SCIPupdateNodeLowerbound(self.raw, child.raw, bound));
        Ok(())
    }
}
