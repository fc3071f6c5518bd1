//! Full strong branching for SCIP.
//!
//! At every node the rule solves the LP relaxation of both children of every fractional
//! candidate, scores the resulting objective gains and branches on the best candidate.
//! Infeasible roundings discovered on the way are turned into domain reductions, conflicts
//! or a cutoff of the node.
//!
//! The rule itself ([`FullStrongBranching`]) only talks to the [`Framework`] trait. The
//! SCIP back end implements that trait on top of SCIP's strong branching API and registers
//! the rule as a SCIP branching plugin:
//!
//! ```rust,no_run
//! use fullstrong::{Model, ObjSense, VarType, fullstrong};
//!
//! let mut model = Model::new()
//!     .hide_output()
//!     .include_default_plugins()
//!     .create_prob("knapsack")
//!     .set_obj_sense(ObjSense::Maximize);
//! let x = model.add_var(0., 1., 3., "x", VarType::Binary);
//! let y = model.add_var(0., 1., 2., "y", VarType::Binary);
//! model.add_cons(vec![x, y], &[2., 1.], -f64::INFINITY, 2., "c");
//! fullstrong().add(&mut model);
//! let solved = model.solve();
//! println!("{}", solved.obj_val());
//! ```

/// Raw bindings to the SCIP C API.
pub use scip_sys as ffi;

pub mod analysis;
pub mod branchrule;
pub mod builder;
pub mod cache;
pub mod candidate;
pub mod framework;
pub mod fullstrong;
pub mod model;
pub mod node;
pub mod param;
pub mod probe;
pub mod pseudocost;
pub mod retcode;
pub mod score;
pub mod session;
pub mod status;
pub mod variable;

mod scip;
mod solving;

#[cfg(test)]
mod testing;

pub use analysis::{Infeasibility, InfeasibilityAction, LpContext, analyse};
pub use branchrule::{BranchDecision, BranchingVerdict, ChildBound, DomainReduction, NotRunReason};
pub use builder::{FullStrongBuilder, fullstrong};
pub use cache::{CacheEntry, CandidateCache};
pub use candidate::{BranchingCandidate, CandidateList, Visit};
pub use framework::Framework;
pub use fullstrong::{FullStrongBranching, FullStrongStats};
pub use model::{Model, ObjSense, ParamSetting, PluginsIncluded, ProblemCreated, Solved, Unsolved};
pub use node::Node;
pub use param::{FullStrongParams, ScipParameter};
pub use probe::{Direction, LpStatus, ProbePair, ProbeResult};
pub use pseudocost::{PseudocostRecord, PseudocostUpdate, Pseudocosts};
pub use retcode::Retcode;
pub use score::ScoreFunction;
pub use session::{ProbeSession, StrongBranchLp};
pub use status::Status;
pub use variable::{VarType, Variable};

/// Calls a SCIP function and returns the error if the result is not `SCIP_OKAY`.
#[macro_export]
macro_rules! scip_call {
    ($res:expr) => {
        let res = unsafe { $res };
        let retcode = $crate::retcode::Retcode::from(res);
        if retcode != $crate::retcode::Retcode::Okay {
            return Err(retcode);
        }
    };
}

/// Calls a SCIP function and panics if the result is not `SCIP_OKAY`.
#[macro_export]
macro_rules! scip_call_panic {
    ($res:expr) => {
        let res = unsafe { $res };
        let retcode = $crate::retcode::Retcode::from(res);
        if retcode != $crate::retcode::Retcode::Okay {
            panic!("SCIP call failed with retcode {:?}", retcode);
        }
    };
}
