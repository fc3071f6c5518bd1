use crate::fullstrong::FullStrongBranching;
use crate::param::reevalage_param;
use crate::solving::ScipSolving;
use crate::{ObjSense, ParamSetting, Retcode, Status, VarType, Variable};
use crate::{ffi, scip_call, scip_call_panic};
use log::{debug, warn};
use scip_sys::{SCIP_Cons, SCIP_Var};
use std::ffi::CString;
use std::mem::MaybeUninit;
use std::rc::Rc;

#[non_exhaustive]
#[derive(Debug)]
pub(crate) struct ScipPtr {
    pub(crate) raw: *mut ffi::SCIP,
}

/// Data attached to the full strong branching plugin.
struct FullStrongData {
    rule: FullStrongBranching,
    name: String,
    reevalage_param: CString,
}

pub(crate) fn c_string(s: &str) -> Result<CString, Retcode> {
    CString::new(s).map_err(|_| Retcode::InvalidData)
}

impl ScipPtr {
    pub(crate) fn new() -> Self {
        let mut scip_ptr = MaybeUninit::uninit();
        scip_call_panic!(ffi::SCIPcreate(scip_ptr.as_mut_ptr()));
        let scip_ptr = unsafe { scip_ptr.assume_init() };
        ScipPtr { raw: scip_ptr }
    }

    pub(crate) fn set_bool_param(&self, param: &str, value: bool) -> Result<(), Retcode> {
        let param = c_string(param)?;
        scip_call! { ffi::SCIPsetBoolParam(self.raw, param.as_ptr(), value.into()) };
        Ok(())
    }

    pub(crate) fn set_int_param(&self, param: &str, value: i32) -> Result<(), Retcode> {
        let param = c_string(param)?;
        scip_call! { ffi::SCIPsetIntParam(self.raw, param.as_ptr(), value) };
        Ok(())
    }

    pub(crate) fn set_longint_param(&self, param: &str, value: i64) -> Result<(), Retcode> {
        let param = c_string(param)?;
        scip_call! { ffi::SCIPsetLongintParam(self.raw, param.as_ptr(), value) };
        Ok(())
    }

    pub(crate) fn set_real_param(&self, param: &str, value: f64) -> Result<(), Retcode> {
        let param = c_string(param)?;
        scip_call! { ffi::SCIPsetRealParam(self.raw, param.as_ptr(), value) };
        Ok(())
    }

    pub(crate) fn bool_param(&self, param: &str) -> Result<bool, Retcode> {
        let param = c_string(param)?;
        let mut value = MaybeUninit::uninit();
        scip_call! { ffi::SCIPgetBoolParam(self.raw, param.as_ptr(), value.as_mut_ptr()) };
        Ok(unsafe { value.assume_init() } != 0)
    }

    pub(crate) fn int_param(&self, param: &str) -> Result<i32, Retcode> {
        let param = c_string(param)?;
        let mut value = MaybeUninit::uninit();
        scip_call! { ffi::SCIPgetIntParam(self.raw, param.as_ptr(), value.as_mut_ptr()) };
        Ok(unsafe { value.assume_init() })
    }

    pub(crate) fn longint_param(&self, param: &str) -> Result<i64, Retcode> {
        let param = c_string(param)?;
        let mut value = MaybeUninit::uninit();
        scip_call! { ffi::SCIPgetLongintParam(self.raw, param.as_ptr(), value.as_mut_ptr()) };
        Ok(unsafe { value.assume_init() })
    }

    pub(crate) fn real_param(&self, param: &str) -> Result<f64, Retcode> {
        let param = c_string(param)?;
        let mut value = MaybeUninit::uninit();
        scip_call! { ffi::SCIPgetRealParam(self.raw, param.as_ptr(), value.as_mut_ptr()) };
        Ok(unsafe { value.assume_init() })
    }

    pub(crate) fn set_presolving(&self, presolving: ParamSetting) -> Result<(), Retcode> {
        scip_call! { ffi::SCIPsetPresolving(self.raw, presolving.into(), true.into()) };
        Ok(())
    }

    pub(crate) fn set_separating(&self, separating: ParamSetting) -> Result<(), Retcode> {
        scip_call! { ffi::SCIPsetSeparating(self.raw, separating.into(), true.into()) };
        Ok(())
    }

    pub(crate) fn set_heuristics(&self, heuristics: ParamSetting) -> Result<(), Retcode> {
        scip_call! { ffi::SCIPsetHeuristics(self.raw, heuristics.into(), true.into()) };
        Ok(())
    }

    pub(crate) fn create_prob(&self, name: &str) -> Result<(), Retcode> {
        let name = c_string(name)?;
        scip_call!(ffi::SCIPcreateProbBasic(self.raw, name.as_ptr()));
        Ok(())
    }

    pub(crate) fn set_obj_sense(&self, sense: ObjSense) -> Result<(), Retcode> {
        scip_call!(ffi::SCIPsetObjsense(self.raw, sense.into()));
        Ok(())
    }

    pub(crate) fn status(&self) -> Status {
        let status = unsafe { ffi::SCIPgetStatus(self.raw) };
        status.into()
    }

    pub(crate) fn include_default_plugins(&self) -> Result<(), Retcode> {
        scip_call!(ffi::SCIPincludeDefaultPlugins(self.raw));
        Ok(())
    }

    pub(crate) fn solve(&self) -> Result<(), Retcode> {
        scip_call!(ffi::SCIPsolve(self.raw));
        Ok(())
    }

    pub(crate) fn obj_val(&self) -> f64 {
        unsafe { ffi::SCIPgetPrimalbound(self.raw) }
    }

    pub(crate) fn best_bound(&self) -> f64 {
        unsafe { ffi::SCIPgetDualbound(self.raw) }
    }

    pub(crate) fn n_nodes(&self) -> usize {
        unsafe { ffi::SCIPgetNNodes(self.raw) as usize }
    }

    pub(crate) fn n_lp_iterations(&self) -> usize {
        unsafe { ffi::SCIPgetNLPIterations(self.raw) as usize }
    }

    pub(crate) fn n_strong_branch_iterations(&self) -> usize {
        unsafe { ffi::SCIPgetNStrongbranchLPIterations(self.raw) as usize }
    }

    pub(crate) fn create_var(
        &self,
        lb: f64,
        ub: f64,
        obj: f64,
        name: &str,
        var_type: VarType,
    ) -> Result<*mut SCIP_Var, Retcode> {
        let name = c_string(name)?;
        let mut var_ptr = MaybeUninit::uninit();
        scip_call! { ffi::SCIPcreateVarBasic(
            self.raw,
            var_ptr.as_mut_ptr(),
            name.as_ptr(),
            lb,
            ub,
            obj,
            var_type.into(),
        ) };
        let var_ptr = unsafe { var_ptr.assume_init() };
        scip_call! { ffi::SCIPaddVar(self.raw, var_ptr) };
        Ok(var_ptr)
    }

    pub(crate) fn create_cons(
        &self,
        vars: &[Rc<Variable>],
        coefs: &[f64],
        lhs: f64,
        rhs: f64,
        name: &str,
    ) -> Result<*mut SCIP_Cons, Retcode> {
        if vars.len() != coefs.len() {
            return Err(Retcode::InvalidData);
        }
        let c_name = c_string(name)?;
        let mut scip_cons = MaybeUninit::uninit();
        scip_call! { ffi::SCIPcreateConsBasicLinear(
            self.raw,
            scip_cons.as_mut_ptr(),
            c_name.as_ptr(),
            0,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            lhs,
            rhs,
        ) };
        let scip_cons = unsafe { scip_cons.assume_init() };
        for (var, &coef) in vars.iter().zip(coefs) {
            scip_call! { ffi::SCIPaddCoefLinear(self.raw, scip_cons, var.raw, coef) };
        }
        scip_call! { ffi::SCIPaddCons(self.raw, scip_cons) };
        Ok(scip_cons)
    }

    /// Registers full strong branching as a SCIP branching rule.
    ///
    /// The reevaluation age is added as the parameter `branching/<name>/reevalage` and read
    /// back on every execution.
    pub(crate) fn include_fullstrong(
        &self,
        name: &str,
        desc: &str,
        priority: i32,
        maxdepth: i32,
        maxbounddist: f64,
        rule: FullStrongBranching,
    ) -> Result<(), Retcode> {
        let c_name = c_string(name)?;
        let c_desc = c_string(desc)?;
        let reevalage_param = c_string(&reevalage_param(name))?;

        extern "C" fn branchexeclp(
            scip: *mut ffi::SCIP,
            branchrule: *mut ffi::SCIP_BRANCHRULE,
            allowaddcons: std::os::raw::c_uint,
            res: *mut ffi::SCIP_RESULT,
        ) -> ffi::SCIP_Retcode {
            let data_ptr = unsafe { ffi::SCIPbranchruleGetData(branchrule) };
            assert!(!data_ptr.is_null());
            let data = unsafe { &mut *(data_ptr as *mut FullStrongData) };

            let mut reevalage = MaybeUninit::uninit();
            let retcode = Retcode::from(unsafe {
                ffi::SCIPgetLongintParam(scip, data.reevalage_param.as_ptr(), reevalage.as_mut_ptr())
            });
            if retcode != Retcode::Okay {
                return retcode.into();
            }
            data.rule.params_mut().reevalage = unsafe { reevalage.assume_init() };

            let mut solving = ScipSolving::new(scip);
            match data.rule.execute(&mut solving, allowaddcons != 0) {
                Ok(verdict) => {
                    unsafe { *res = (&verdict).into() };
                    Retcode::Okay.into()
                }
                Err(retcode) => {
                    warn!("{} failed: {retcode}", data.name);
                    retcode.into()
                }
            }
        }

        extern "C" fn branchinit(
            _scip: *mut ffi::SCIP,
            branchrule: *mut ffi::SCIP_BRANCHRULE,
        ) -> ffi::SCIP_Retcode {
            let data_ptr = unsafe { ffi::SCIPbranchruleGetData(branchrule) };
            assert!(!data_ptr.is_null());
            let data = unsafe { &mut *(data_ptr as *mut FullStrongData) };
            data.rule.init();
            Retcode::Okay.into()
        }

        extern "C" fn branchexit(
            _scip: *mut ffi::SCIP,
            branchrule: *mut ffi::SCIP_BRANCHRULE,
        ) -> ffi::SCIP_Retcode {
            let data_ptr = unsafe { ffi::SCIPbranchruleGetData(branchrule) };
            assert!(!data_ptr.is_null());
            let data = unsafe { &*(data_ptr as *mut FullStrongData) };
            debug!("{}: {:?}", data.name, data.rule.stats());
            Retcode::Okay.into()
        }

        extern "C" fn branchfree(
            _scip: *mut ffi::SCIP,
            branchrule: *mut ffi::SCIP_BRANCHRULE,
        ) -> ffi::SCIP_Retcode {
            let data_ptr = unsafe { ffi::SCIPbranchruleGetData(branchrule) };
            assert!(!data_ptr.is_null());
            drop(unsafe { Box::from_raw(data_ptr as *mut FullStrongData) });
            Retcode::Okay.into()
        }

        scip_call!(ffi::SCIPaddLongintParam(
            self.raw,
            reevalage_param.as_ptr(),
            c"number of intermediate LPs solved to trigger reevaluation of strong branching value for a variable that was already evaluated at the current node"
                .as_ptr(),
            std::ptr::null_mut(),
            true.into(),
            rule.params().reevalage,
            0,
            i64::MAX,
            None,
            std::ptr::null_mut(),
        ));

        let data_ptr = Box::into_raw(Box::new(FullStrongData {
            rule,
            name: name.to_string(),
            reevalage_param,
        }));

        let retcode = Retcode::from(unsafe {
            ffi::SCIPincludeBranchrule(
                self.raw,
                c_name.as_ptr(),
                c_desc.as_ptr(),
                priority,
                maxdepth,
                maxbounddist,
                None,
                Some(branchfree),
                Some(branchinit),
                Some(branchexit),
                None,
                None,
                Some(branchexeclp),
                None,
                None,
                data_ptr as *mut ffi::SCIP_BranchruleData,
            )
        });
        if retcode != Retcode::Okay {
            drop(unsafe { Box::from_raw(data_ptr) });
            return Err(retcode);
        }

        Ok(())
    }

    /// Number of LP executions of the branching rule with the given name.
    pub(crate) fn branch_rule_n_calls(&self, name: &str) -> Option<usize> {
        let name = c_string(name).ok()?;
        let branchrule = unsafe { ffi::SCIPfindBranchrule(self.raw, name.as_ptr()) };
        if branchrule.is_null() {
            return None;
        }
        Some(unsafe { ffi::SCIPbranchruleGetNLPCalls(branchrule) } as usize)
    }
}

impl Drop for ScipPtr {
    fn drop(&mut self) {
        // the model keeps one reference to every variable and constraint it created
        let scip_stage = unsafe { ffi::SCIPgetStage(self.raw) };
        if scip_stage == ffi::SCIP_Stage_SCIP_STAGE_PROBLEM
            || scip_stage == ffi::SCIP_Stage_SCIP_STAGE_TRANSFORMED
            || scip_stage == ffi::SCIP_Stage_SCIP_STAGE_INITPRESOLVE
            || scip_stage == ffi::SCIP_Stage_SCIP_STAGE_PRESOLVING
            || scip_stage == ffi::SCIP_Stage_SCIP_STAGE_EXITPRESOLVE
            || scip_stage == ffi::SCIP_Stage_SCIP_STAGE_PRESOLVED
            || scip_stage == ffi::SCIP_Stage_SCIP_STAGE_INITSOLVE
            || scip_stage == ffi::SCIP_Stage_SCIP_STAGE_SOLVING
            || scip_stage == ffi::SCIP_Stage_SCIP_STAGE_SOLVED
            || scip_stage == ffi::SCIP_Stage_SCIP_STAGE_EXITSOLVE
        {
            let n_vars = unsafe { ffi::SCIPgetNOrigVars(self.raw) };
            let vars = unsafe { ffi::SCIPgetOrigVars(self.raw) };
            for i in 0..n_vars {
                let mut var = unsafe { *vars.add(i as usize) };
                scip_call_panic!(ffi::SCIPreleaseVar(self.raw, &mut var));
            }

            let n_conss = unsafe { ffi::SCIPgetNOrigConss(self.raw) };
            let conss = unsafe { ffi::SCIPgetOrigConss(self.raw) };
            for i in 0..n_conss {
                let mut cons = unsafe { *conss.add(i as usize) };
                scip_call_panic!(ffi::SCIPreleaseCons(self.raw, &mut cons));
            }
        }

        unsafe { ffi::SCIPfree(&mut self.raw) };
    }
}
