use crate::ffi;
use crate::scip::ScipPtr;
use std::ffi::CStr;
use std::rc::Rc;

/// A variable of the original problem.
#[derive(Debug)]
pub struct Variable {
    pub(crate) raw: *mut ffi::SCIP_VAR,
    #[allow(dead_code)]
    pub(crate) scip: Rc<ScipPtr>,
}

impl Variable {
    /// Returns the index of the variable, unique within the problem.
    pub fn index(&self) -> usize {
        unsafe { ffi::SCIPvarGetIndex(self.raw) as usize }
    }

    /// Returns the name of the variable.
    pub fn name(&self) -> String {
        let name = unsafe { CStr::from_ptr(ffi::SCIPvarGetName(self.raw)) };
        name.to_string_lossy().into_owned()
    }

    /// Returns the objective coefficient of the variable.
    pub fn obj(&self) -> f64 {
        unsafe { ffi::SCIPvarGetObj(self.raw) }
    }

    /// Returns the lower bound of the variable.
    pub fn lb(&self) -> f64 {
        unsafe { ffi::SCIPvarGetLbLocal(self.raw) }
    }

    /// Returns the upper bound of the variable.
    pub fn ub(&self) -> f64 {
        unsafe { ffi::SCIPvarGetUbLocal(self.raw) }
    }

    /// Returns the type of the variable.
    pub fn var_type(&self) -> VarType {
        unsafe { ffi::SCIPvarGetType(self.raw) }.into()
    }
}

/// The type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Continuous,
    Integer,
    ImplInt,
    Binary,
}

impl From<VarType> for ffi::SCIP_VARTYPE {
    fn from(var_type: VarType) -> Self {
        match var_type {
            VarType::Continuous => ffi::SCIP_Vartype_SCIP_VARTYPE_CONTINUOUS,
            VarType::Integer => ffi::SCIP_Vartype_SCIP_VARTYPE_INTEGER,
            VarType::ImplInt => ffi::SCIP_Vartype_SCIP_VARTYPE_IMPLINT,
            VarType::Binary => ffi::SCIP_Vartype_SCIP_VARTYPE_BINARY,
        }
    }
}

impl From<ffi::SCIP_VARTYPE> for VarType {
    fn from(var_type: ffi::SCIP_VARTYPE) -> Self {
        match var_type {
            ffi::SCIP_Vartype_SCIP_VARTYPE_CONTINUOUS => VarType::Continuous,
            ffi::SCIP_Vartype_SCIP_VARTYPE_INTEGER => VarType::Integer,
            ffi::SCIP_Vartype_SCIP_VARTYPE_IMPLINT => VarType::ImplInt,
            ffi::SCIP_Vartype_SCIP_VARTYPE_BINARY => VarType::Binary,
            _ => panic!("Unknown VarType {var_type:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Model;

    #[test]
    fn variable_data() {
        let mut model = Model::new()
            .hide_output()
            .include_default_plugins()
            .create_prob("test");
        let x = model.add_var(0., 3., 2.5, "x", VarType::Integer);
        assert_eq!(x.index(), 0);
        assert_eq!(x.name(), "x");
        assert_eq!(x.obj(), 2.5);
        assert_eq!(x.lb(), 0.);
        assert_eq!(x.ub(), 3.);
        assert_eq!(x.var_type(), VarType::Integer);
    }
}
