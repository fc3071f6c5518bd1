use crate::ffi;

/// A node of the branch-and-bound tree, as created by branching.
#[derive(Debug)]
pub struct Node {
    pub(crate) raw: *mut ffi::SCIP_NODE,
}
