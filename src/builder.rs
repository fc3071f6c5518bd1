use crate::fullstrong::FullStrongBranching;
use crate::param::{DEFAULT_NAME, FullStrongParams};
use crate::{Model, ProblemCreated};

/// A builder for registering full strong branching with a model. It can be created using the
/// `fullstrong` function.
#[derive(Debug)]
pub struct FullStrongBuilder {
    name: String,
    desc: String,
    priority: i32,
    maxdepth: i32,
    maxbounddist: f64,
    params: FullStrongParams,
}

impl FullStrongBuilder {
    /// Creates a new `FullStrongBuilder`.
    ///
    /// Defaults:
    /// - `name`: "fullstrongrule"
    /// - `desc`: "full strong branching"
    /// - `priority`: 100000
    /// - `maxdepth`: -1 (unlimited)
    /// - `maxbounddist`: 1.0 (applies on all nodes)
    pub fn new() -> Self {
        FullStrongBuilder {
            name: DEFAULT_NAME.into(),
            desc: "full strong branching".into(),
            priority: 100000,
            maxdepth: -1,
            maxbounddist: 1.0,
            params: FullStrongParams::default(),
        }
    }

    /// Sets the name of the branch rule.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Sets the description of the branch rule.
    pub fn desc(mut self, desc: &str) -> Self {
        self.desc = desc.to_string();
        self
    }

    /// Sets the priority of the branch rule.
    ///
    /// When SCIP decides which branch rule to call, it considers their priorities.
    /// A higher value indicates a higher priority.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the maximum depth level up to which this branch rule should be used.
    ///
    /// If this is -1, the branch rule can be used at any depth.
    pub fn maxdepth(mut self, maxdepth: i32) -> Self {
        self.maxdepth = maxdepth;
        self
    }

    /// Sets the maximum relative bound distance from the current node's dual bound to
    /// primal bound compared to the best node's dual bound for applying the branch rule.
    pub fn maxbounddist(mut self, maxbounddist: f64) -> Self {
        self.maxbounddist = maxbounddist;
        self
    }

    /// Sets the initial value of the reevaluation age.
    pub fn reevalage(mut self, reevalage: i64) -> Self {
        self.params = self.params.reevalage(reevalage);
        self
    }

    /// Sets the simplex iteration limit of each probe.
    pub fn iteration_limit(mut self, limit: usize) -> Self {
        self.params = self.params.iteration_limit(limit);
        self
    }

    /// Includes the rule in the model.
    pub fn add(self, model: &mut Model<ProblemCreated>) {
        model.include_fullstrong(
            &self.name,
            &self.desc,
            self.priority,
            self.maxdepth,
            self.maxbounddist,
            FullStrongBranching::new(self.params),
        );
    }
}

impl Default for FullStrongBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a new default `FullStrongBuilder`.
///
/// ```rust,no_run
/// use fullstrong::{Model, fullstrong};
///
/// let mut model = Model::default();
/// fullstrong().priority(50000).reevalage(5).add(&mut model);
/// ```
pub fn fullstrong() -> FullStrongBuilder {
    FullStrongBuilder::new()
}
