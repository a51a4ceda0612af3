use thiserror::Error;

/// Failures that stop the machine. The reference specification leaves all
/// three conditions undefined, so rather than wrap an address or corrupt the
/// stack we refuse to continue and let the host decide what to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MachineError {
    #[error("memory access out of range at {addr:#05x}")]
    AddressOutOfRange { addr: u16 },

    #[error("call stack overflow: more than {depth} nested subroutines")]
    StackOverflow { depth: usize },

    #[error("subroutine return with an empty call stack")]
    StackUnderflow,
}
