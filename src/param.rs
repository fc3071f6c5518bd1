use crate::{Model, Retcode};

/// Default name of the rule when registered with SCIP.
///
/// SCIP's default plugins already contain a rule named `fullstrong`.
pub const DEFAULT_NAME: &str = "fullstrongrule";

/// Name of the SCIP parameter holding [`FullStrongParams::reevalage`] for the default rule name.
pub const REEVALAGE_PARAM: &str = "branching/fullstrongrule/reevalage";

/// Default of [`FullStrongParams::reevalage`].
pub const DEFAULT_REEVALAGE: i64 = 10;

/// Parameters of the full strong branching rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullStrongParams {
    /// Number of intermediate LPs after which a strong branching result of the current node is
    /// evaluated again.
    pub reevalage: i64,
    /// Simplex iteration limit of each probe, `None` for no limit.
    pub iteration_limit: Option<usize>,
}

impl Default for FullStrongParams {
    fn default() -> Self {
        FullStrongParams {
            reevalage: DEFAULT_REEVALAGE,
            iteration_limit: None,
        }
    }
}

impl FullStrongParams {
    pub fn reevalage(mut self, reevalage: i64) -> Self {
        self.reevalage = reevalage.max(0);
        self
    }

    pub fn iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = Some(limit);
        self
    }
}

/// Name of the SCIP parameter holding the reevaluation age of the rule named `rule_name`.
pub fn reevalage_param(rule_name: &str) -> String {
    format!("branching/{rule_name}/reevalage")
}

/// A type that can be read from and written to a SCIP parameter.
pub trait ScipParameter: Sized {
    fn set<T>(model: Model<T>, name: &str, value: Self) -> Result<Model<T>, Retcode>;
    fn get<T>(model: &Model<T>, name: &str) -> Result<Self, Retcode>;
}

impl ScipParameter for f64 {
    fn set<T>(model: Model<T>, name: &str, value: f64) -> Result<Model<T>, Retcode> {
        model.set_real_param(name, value)
    }

    fn get<T>(model: &Model<T>, name: &str) -> Result<f64, Retcode> {
        model.real_param(name)
    }
}

impl ScipParameter for i32 {
    fn set<T>(model: Model<T>, name: &str, value: i32) -> Result<Model<T>, Retcode> {
        model.set_int_param(name, value)
    }

    fn get<T>(model: &Model<T>, name: &str) -> Result<i32, Retcode> {
        model.int_param(name)
    }
}

impl ScipParameter for i64 {
    fn set<T>(model: Model<T>, name: &str, value: i64) -> Result<Model<T>, Retcode> {
        model.set_longint_param(name, value)
    }

    fn get<T>(model: &Model<T>, name: &str) -> Result<i64, Retcode> {
        model.longint_param(name)
    }
}

impl ScipParameter for bool {
    fn set<T>(model: Model<T>, name: &str, value: bool) -> Result<Model<T>, Retcode> {
        model.set_bool_param(name, value)
    }

    fn get<T>(model: &Model<T>, name: &str) -> Result<bool, Retcode> {
        model.bool_param(name)
    }
}
