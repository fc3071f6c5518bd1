use crate::ffi;

/// Return codes of SCIP calls, also used by every fallible framework call made by the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Retcode {
    /// Normal termination.
    #[error("normal termination")]
    Okay,
    /// Unspecified error.
    #[error("unspecified error")]
    Error,
    /// Insufficient memory error.
    #[error("insufficient memory")]
    NoMemory,
    /// Read error.
    #[error("read error")]
    ReadError,
    /// Write error.
    #[error("write error")]
    WriteError,
    /// File not found error.
    #[error("file not found")]
    NoFile,
    /// Cannot create file.
    #[error("cannot create file")]
    FileCreateError,
    /// Error in LP solver.
    #[error("error in LP solver")]
    LpError,
    /// No problem exists.
    #[error("no problem exists")]
    NoProblem,
    /// Method cannot be called at this time in solution process.
    #[error("method cannot be called at this time in solution process")]
    InvalidCall,
    /// Error in input data.
    #[error("error in input data")]
    InvalidData,
    /// Method returned an invalid result code.
    #[error("method returned an invalid result code")]
    InvalidResult,
    /// A required plugin was not found.
    #[error("a required plugin was not found")]
    PluginNotFound,
    /// The parameter with the given name was not found.
    #[error("the parameter with the given name was not found")]
    ParameterUnknown,
    /// The parameter is not of the expected type.
    #[error("the parameter is not of the expected type")]
    ParameterWrongType,
    /// The value is invalid for the given parameter.
    #[error("the value is invalid for the given parameter")]
    ParameterWrongVal,
    /// The given key is already existing in table.
    #[error("the given key is already existing in table")]
    KeyAlreadyExisting,
    /// Maximal branching depth level exceeded.
    #[error("maximal branching depth level exceeded")]
    MaxDepthLevel,
    /// No branching could be created.
    #[error("no branching could be created")]
    BranchError,
    /// Function not implemented.
    #[error("function not implemented")]
    NotImplemented,
}

impl From<ffi::SCIP_Retcode> for Retcode {
    fn from(val: ffi::SCIP_Retcode) -> Self {
        match val {
            ffi::SCIP_Retcode_SCIP_OKAY => Retcode::Okay,
            ffi::SCIP_Retcode_SCIP_ERROR => Retcode::Error,
            ffi::SCIP_Retcode_SCIP_NOMEMORY => Retcode::NoMemory,
            ffi::SCIP_Retcode_SCIP_READERROR => Retcode::ReadError,
            ffi::SCIP_Retcode_SCIP_WRITEERROR => Retcode::WriteError,
            ffi::SCIP_Retcode_SCIP_NOFILE => Retcode::NoFile,
            ffi::SCIP_Retcode_SCIP_FILECREATEERROR => Retcode::FileCreateError,
            ffi::SCIP_Retcode_SCIP_LPERROR => Retcode::LpError,
            ffi::SCIP_Retcode_SCIP_NOPROBLEM => Retcode::NoProblem,
            ffi::SCIP_Retcode_SCIP_INVALIDCALL => Retcode::InvalidCall,
            ffi::SCIP_Retcode_SCIP_INVALIDDATA => Retcode::InvalidData,
            ffi::SCIP_Retcode_SCIP_INVALIDRESULT => Retcode::InvalidResult,
            ffi::SCIP_Retcode_SCIP_PLUGINNOTFOUND => Retcode::PluginNotFound,
            ffi::SCIP_Retcode_SCIP_PARAMETERUNKNOWN => Retcode::ParameterUnknown,
            ffi::SCIP_Retcode_SCIP_PARAMETERWRONGTYPE => Retcode::ParameterWrongType,
            ffi::SCIP_Retcode_SCIP_PARAMETERWRONGVAL => Retcode::ParameterWrongVal,
            ffi::SCIP_Retcode_SCIP_KEYALREADYEXISTING => Retcode::KeyAlreadyExisting,
            ffi::SCIP_Retcode_SCIP_MAXDEPTHLEVEL => Retcode::MaxDepthLevel,
            ffi::SCIP_Retcode_SCIP_BRANCHERROR => Retcode::BranchError,
            ffi::SCIP_Retcode_SCIP_NOTIMPLEMENTED => Retcode::NotImplemented,
            _ => panic!("Unknown SCIP return code {val:?}"),
        }
    }
}

impl From<Retcode> for ffi::SCIP_Retcode {
    fn from(val: Retcode) -> Self {
        match val {
            Retcode::Okay => ffi::SCIP_Retcode_SCIP_OKAY,
            Retcode::Error => ffi::SCIP_Retcode_SCIP_ERROR,
            Retcode::NoMemory => ffi::SCIP_Retcode_SCIP_NOMEMORY,
            Retcode::ReadError => ffi::SCIP_Retcode_SCIP_READERROR,
            Retcode::WriteError => ffi::SCIP_Retcode_SCIP_WRITEERROR,
            Retcode::NoFile => ffi::SCIP_Retcode_SCIP_NOFILE,
            Retcode::FileCreateError => ffi::SCIP_Retcode_SCIP_FILECREATEERROR,
            Retcode::LpError => ffi::SCIP_Retcode_SCIP_LPERROR,
            Retcode::NoProblem => ffi::SCIP_Retcode_SCIP_NOPROBLEM,
            Retcode::InvalidCall => ffi::SCIP_Retcode_SCIP_INVALIDCALL,
            Retcode::InvalidData => ffi::SCIP_Retcode_SCIP_INVALIDDATA,
            Retcode::InvalidResult => ffi::SCIP_Retcode_SCIP_INVALIDRESULT,
            Retcode::PluginNotFound => ffi::SCIP_Retcode_SCIP_PLUGINNOTFOUND,
            Retcode::ParameterUnknown => ffi::SCIP_Retcode_SCIP_PARAMETERUNKNOWN,
            Retcode::ParameterWrongType => ffi::SCIP_Retcode_SCIP_PARAMETERWRONGTYPE,
            Retcode::ParameterWrongVal => ffi::SCIP_Retcode_SCIP_PARAMETERWRONGVAL,
            Retcode::KeyAlreadyExisting => ffi::SCIP_Retcode_SCIP_KEYALREADYEXISTING,
            Retcode::MaxDepthLevel => ffi::SCIP_Retcode_SCIP_MAXDEPTHLEVEL,
            Retcode::BranchError => ffi::SCIP_Retcode_SCIP_BRANCHERROR,
            Retcode::NotImplemented => ffi::SCIP_Retcode_SCIP_NOTIMPLEMENTED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lp_error_round_trips_through_ffi() {
        let raw: ffi::SCIP_Retcode = Retcode::LpError.into();
        assert_eq!(raw, ffi::SCIP_Retcode_SCIP_LPERROR);
        assert_eq!(Retcode::from(raw), Retcode::LpError);
    }

    #[test]
    fn display_message() {
        assert_eq!(Retcode::BranchError.to_string(), "no branching could be created");
    }
}
