use std::rc::Rc;

use crate::fullstrong::FullStrongBranching;
use crate::retcode::Retcode;
use crate::scip::ScipPtr;
use crate::status::Status;
use crate::variable::{VarType, Variable};
use crate::ffi;

/// Represents an optimization model.
#[non_exhaustive]
#[derive(Debug)]
pub struct Model<State> {
    pub(crate) scip: Rc<ScipPtr>,
    #[allow(dead_code)]
    pub(crate) state: State,
}

/// Represents the state of an optimization model that has not yet been solved.
#[derive(Debug)]
pub struct Unsolved;

/// Represents the state of an optimization model where all plugins have been included.
#[derive(Debug)]
pub struct PluginsIncluded;

/// Represents the state of an optimization model where the problem has been created.
#[derive(Debug, Clone)]
pub struct ProblemCreated;

/// Represents the state of an optimization model that has been solved.
#[derive(Debug)]
pub struct Solved;

impl Model<Unsolved> {
    /// Creates a new `Model` instance with an `Unsolved` state.
    pub fn new() -> Self {
        Self::try_new().expect("Failed to create SCIP instance")
    }

    /// Tries to create a new `Model` instance with an `Unsolved` state.
    pub fn try_new() -> Result<Self, Retcode> {
        let scip_ptr = ScipPtr::new();
        Ok(Model {
            scip: Rc::new(scip_ptr),
            state: Unsolved {},
        })
    }
}

impl Model<PluginsIncluded> {
    /// Creates a new problem with the given name.
    ///
    /// # Panics
    ///
    /// This method panics if the problem cannot be created in the current state.
    pub fn create_prob(self, name: &str) -> Model<ProblemCreated> {
        self.scip
            .create_prob(name)
            .expect("Failed to create problem in state PluginsIncluded");
        Model {
            scip: self.scip,
            state: ProblemCreated {},
        }
    }
}

impl Model<ProblemCreated> {
    /// Sets the objective sense of the model.
    ///
    /// # Panics
    ///
    /// This method panics if the objective sense cannot be set in the current state.
    pub fn set_obj_sense(self, sense: ObjSense) -> Self {
        self.scip
            .set_obj_sense(sense)
            .expect("Failed to set objective sense in state ProblemCreated");
        self
    }

    /// Adds a new variable with the given bounds, objective coefficient, name and type.
    ///
    /// # Panics
    ///
    /// This method panics if the variable cannot be created in the current state.
    pub fn add_var(
        &mut self,
        lb: f64,
        ub: f64,
        obj: f64,
        name: &str,
        var_type: VarType,
    ) -> Rc<Variable> {
        let var = self
            .scip
            .create_var(lb, ub, obj, name, var_type)
            .expect("Failed to create variable in state ProblemCreated");
        Rc::new(Variable {
            raw: var,
            scip: self.scip.clone(),
        })
    }

    /// Adds the linear constraint `lhs <= sum(coefs[i] * vars[i]) <= rhs`.
    ///
    /// # Panics
    ///
    /// This method panics if the constraint cannot be created in the current state.
    pub fn add_cons(&mut self, vars: Vec<Rc<Variable>>, coefs: &[f64], lhs: f64, rhs: f64, name: &str) {
        self.scip
            .create_cons(&vars, coefs, lhs, rhs, name)
            .expect("Failed to create constraint in state ProblemCreated");
    }

    /// Includes full strong branching as a branching rule. See [`crate::fullstrong`] for a
    /// builder with the default plugin metadata.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the branching rule. The reevaluation age is exposed as the
    ///   parameter `branching/<name>/reevalage`.
    /// * `desc` - The description of the branching rule.
    /// * `priority` - The priority of the branching rule. When SCIP decides which branching rule
    ///   to call, it considers their priorities. A higher value indicates a higher priority.
    /// * `maxdepth` - The maximum depth level up to which this branching rule should be used, -1
    ///   for no limit.
    /// * `maxbounddist` - The maximum relative bound distance from the current node's dual bound
    ///   to primal bound compared to the best node's dual bound for applying the branching rule.
    /// * `rule` - The rule, moved into the SCIP plugin.
    ///
    /// # Panics
    ///
    /// This method panics if the rule or its parameter cannot be included, e.g. when the name is
    /// already taken.
    pub fn include_fullstrong(
        &mut self,
        name: &str,
        desc: &str,
        priority: i32,
        maxdepth: i32,
        maxbounddist: f64,
        rule: FullStrongBranching,
    ) {
        self.scip
            .include_fullstrong(name, desc, priority, maxdepth, maxbounddist, rule)
            .expect("Failed to include full strong branching rule in state ProblemCreated");
    }

    /// Solves the model and returns it in the `Solved` state.
    ///
    /// # Panics
    ///
    /// This method panics if the problem cannot be solved in the current state.
    pub fn solve(self) -> Model<Solved> {
        self.scip
            .solve()
            .expect("Failed to solve problem in state ProblemCreated");
        Model {
            scip: self.scip,
            state: Solved {},
        }
    }
}

impl Model<Solved> {
    /// Returns the objective value of the best solution found.
    pub fn obj_val(&self) -> f64 {
        self.scip.obj_val()
    }

    /// Returns the best dual bound.
    pub fn best_bound(&self) -> f64 {
        self.scip.best_bound()
    }

    /// Returns the number of nodes explored.
    pub fn n_nodes(&self) -> usize {
        self.scip.n_nodes()
    }

    /// Returns the number of LP iterations performed.
    pub fn n_lp_iterations(&self) -> usize {
        self.scip.n_lp_iterations()
    }

    /// Returns the number of LP iterations spent in strong branching.
    pub fn n_strong_branch_iterations(&self) -> usize {
        self.scip.n_strong_branch_iterations()
    }

    /// Returns how often the branching rule with the given name was called on an LP solution,
    /// `None` if there is no such rule.
    pub fn branch_rule_n_calls(&self, name: &str) -> Option<usize> {
        self.scip.branch_rule_n_calls(name)
    }
}

impl<T> Model<T> {
    /// Returns the status of the optimization model.
    pub fn status(&self) -> Status {
        self.scip.status()
    }

    /// Hides the output of the optimization model by setting the `display/verblevel` parameter to 0.
    pub fn hide_output(self) -> Self {
        self.scip
            .set_int_param("display/verblevel", 0)
            .expect("Failed to set display/verblevel to 0");
        self
    }

    /// Includes all default plugins and returns the model in the `PluginsIncluded` state.
    pub fn include_default_plugins(self) -> Model<PluginsIncluded> {
        self.scip
            .include_default_plugins()
            .expect("Failed to include default plugins");
        Model {
            scip: self.scip,
            state: PluginsIncluded {},
        }
    }

    /// Sets a SCIP boolean parameter.
    pub fn set_bool_param(self, param: &str, value: bool) -> Result<Self, Retcode> {
        self.scip.set_bool_param(param, value)?;
        Ok(self)
    }

    /// Sets a SCIP integer parameter.
    pub fn set_int_param(self, param: &str, value: i32) -> Result<Self, Retcode> {
        self.scip.set_int_param(param, value)?;
        Ok(self)
    }

    /// Sets a SCIP long integer parameter.
    pub fn set_longint_param(self, param: &str, value: i64) -> Result<Self, Retcode> {
        self.scip.set_longint_param(param, value)?;
        Ok(self)
    }

    /// Sets a SCIP real parameter.
    pub fn set_real_param(self, param: &str, value: f64) -> Result<Self, Retcode> {
        self.scip.set_real_param(param, value)?;
        Ok(self)
    }

    /// Reads a SCIP boolean parameter.
    pub fn bool_param(&self, param: &str) -> Result<bool, Retcode> {
        self.scip.bool_param(param)
    }

    /// Reads a SCIP integer parameter.
    pub fn int_param(&self, param: &str) -> Result<i32, Retcode> {
        self.scip.int_param(param)
    }

    /// Reads a SCIP long integer parameter.
    pub fn longint_param(&self, param: &str) -> Result<i64, Retcode> {
        self.scip.longint_param(param)
    }

    /// Reads a SCIP real parameter.
    pub fn real_param(&self, param: &str) -> Result<f64, Retcode> {
        self.scip.real_param(param)
    }

    /// Sets the presolving emphasis.
    pub fn set_presolving(self, presolving: ParamSetting) -> Self {
        self.scip
            .set_presolving(presolving)
            .expect("Failed to set presolving with valid value");
        self
    }

    /// Sets the separating emphasis.
    pub fn set_separating(self, separating: ParamSetting) -> Self {
        self.scip
            .set_separating(separating)
            .expect("Failed to set separating with valid value");
        self
    }

    /// Sets the heuristics emphasis.
    pub fn set_heuristics(self, heuristics: ParamSetting) -> Self {
        self.scip
            .set_heuristics(heuristics)
            .expect("Failed to set heuristics with valid value");
        self
    }
}

/// The default implementation for a `Model` instance in the `ProblemCreated` state.
impl Default for Model<ProblemCreated> {
    /// Creates a new `Model` instance with the default plugins included and a problem named "problem".
    fn default() -> Self {
        Model::new()
            .include_default_plugins()
            .create_prob("problem")
    }
}

/// An enum representing the possible settings for a SCIP parameter.
#[derive(Debug)]
pub enum ParamSetting {
    /// Use default values.
    Default,
    /// Set to aggressive settings.
    Aggressive,
    /// Set to fast settings.
    Fast,
    /// Turn off.
    Off,
}

impl From<ParamSetting> for ffi::SCIP_PARAMSETTING {
    fn from(val: ParamSetting) -> Self {
        match val {
            ParamSetting::Default => ffi::SCIP_ParamSetting_SCIP_PARAMSETTING_DEFAULT,
            ParamSetting::Aggressive => ffi::SCIP_ParamSetting_SCIP_PARAMSETTING_AGGRESSIVE,
            ParamSetting::Fast => ffi::SCIP_ParamSetting_SCIP_PARAMSETTING_FAST,
            ParamSetting::Off => ffi::SCIP_ParamSetting_SCIP_PARAMSETTING_OFF,
        }
    }
}

/// An enum representing the objective sense of a SCIP optimization model.
#[derive(Debug)]
pub enum ObjSense {
    /// The problem is a minimization problem.
    Minimize,
    /// The problem is a maximization problem.
    Maximize,
}

impl From<ObjSense> for ffi::SCIP_OBJSENSE {
    fn from(val: ObjSense) -> Self {
        match val {
            ObjSense::Maximize => ffi::SCIP_Objsense_SCIP_OBJSENSE_MAXIMIZE,
            ObjSense::Minimize => ffi::SCIP_Objsense_SCIP_OBJSENSE_MINIMIZE,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::param::{DEFAULT_NAME, REEVALAGE_PARAM};
    use crate::{FullStrongParams, fullstrong};
    use rayon::prelude::*;

    /// Builds a model with the given rows over binary variables, with presolving,
    /// separation and heuristics off so that branching decides the solve.
    fn binary_model(values: &[f64], rows: &[(Vec<f64>, f64)]) -> Model<ProblemCreated> {
        let mut model = Model::new()
            .hide_output()
            .include_default_plugins()
            .create_prob("test")
            .set_obj_sense(ObjSense::Maximize)
            .set_presolving(ParamSetting::Off)
            .set_separating(ParamSetting::Off)
            .set_heuristics(ParamSetting::Off);

        let vars: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(i, &value)| model.add_var(0., 1., value, &format!("x{i}"), VarType::Binary))
            .collect();
        for (i, (weights, capacity)) in rows.iter().enumerate() {
            model.add_cons(vars.clone(), weights, -f64::INFINITY, *capacity, &format!("c{i}"));
        }
        model
    }

    /// max 8a + 11b + 6c + 4d s.t. 5a + 7b + 4c + 3d <= 14, optimum 21 with LP bound 22.
    pub(crate) fn knapsack() -> Model<ProblemCreated> {
        binary_model(&[8., 11., 6., 4.], &[(vec![5., 7., 4., 3.], 14.)])
    }

    /// Two-row knapsack with optimum 35.
    fn multi_knapsack() -> Model<ProblemCreated> {
        binary_model(
            &[10., 13., 7., 8., 12., 9., 6., 11.],
            &[
                (vec![4., 6., 3., 4., 5., 4., 2., 5.], 15.),
                (vec![3., 5., 4., 2., 6., 3., 3., 4.], 12.),
            ],
        )
    }

    #[test]
    fn knapsack_without_rule() {
        let model = knapsack().solve();
        assert_eq!(model.status(), Status::Optimal);
        assert_eq!(model.obj_val(), 21.);
    }

    #[test]
    fn knapsack_with_fullstrong() {
        let mut model = knapsack();
        fullstrong().add(&mut model);
        let solved = model.solve();
        assert_eq!(solved.status(), Status::Optimal);
        assert_eq!(solved.obj_val(), 21.);
        assert!(solved.branch_rule_n_calls(DEFAULT_NAME).unwrap() >= 1);
    }

    #[test]
    fn multi_knapsack_with_fullstrong() {
        let mut model = multi_knapsack();
        fullstrong().add(&mut model);
        let solved = model.solve();
        assert_eq!(solved.status(), Status::Optimal);
        assert_eq!(solved.obj_val(), 35.);
        assert_eq!(solved.best_bound(), 35.);
        assert!(solved.branch_rule_n_calls(DEFAULT_NAME).unwrap() >= 1);
    }

    #[test]
    fn rule_variants_agree_on_optimum() {
        for params in [
            FullStrongParams::default(),
            FullStrongParams::default().reevalage(0),
            FullStrongParams::default().iteration_limit(1),
        ] {
            let mut model = multi_knapsack();
            model.include_fullstrong("custom", "test", 200000, -1, 1., FullStrongBranching::new(params));
            let solved = model.solve();
            assert_eq!(solved.status(), Status::Optimal);
            assert_eq!(solved.obj_val(), 35.);
        }
    }

    #[test]
    fn reevalage_is_a_scip_parameter() {
        let mut model = knapsack();
        fullstrong().reevalage(4).add(&mut model);
        assert_eq!(model.longint_param(REEVALAGE_PARAM).unwrap(), 4);
        let model = model.set_longint_param(REEVALAGE_PARAM, 0).unwrap();
        assert_eq!(model.longint_param(REEVALAGE_PARAM).unwrap(), 0);
        assert_eq!(
            model.set_longint_param(REEVALAGE_PARAM, -1).unwrap_err(),
            Retcode::ParameterWrongVal
        );
    }

    #[test]
    #[should_panic(expected = "Failed to include full strong branching rule")]
    fn duplicate_rule_name() {
        let mut model = knapsack();
        fullstrong().add(&mut model);
        fullstrong().add(&mut model);
    }

    #[test]
    fn missing_rule_has_no_calls() {
        let model = knapsack().solve();
        assert_eq!(model.branch_rule_n_calls("nonexistent"), None);
    }

    #[test]
    fn parallel_solves() {
        let objs = (0..100)
            .into_par_iter()
            .map(|_| {
                let mut model = multi_knapsack();
                fullstrong().add(&mut model);
                let solved = model.solve();
                (solved.status(), solved.obj_val())
            })
            .collect::<Vec<_>>();

        assert!(objs.iter().all(|&(status, obj)| status == Status::Optimal && obj == 35.));
    }
}
