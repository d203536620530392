use thiserror::Error;

/// The result of a FRAIG operation.
pub type Result<T> = std::result::Result<T, FraigError>;

/// Error returned when a FRAIG operation failed.
///
/// Only data conditions are reported this way. Broken API usage (a handle which does not
/// belong to the manager, the fanin of an input) panics, and SAT resource exhaustion is
/// reported as an `Unknown` answer rather than as an error.
#[derive(Debug, Error)]
pub enum FraigError {
    /// The configuration given to the manager is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An expression refers to a variable for which no input handle was supplied.
    #[error("variable {0} is not mapped to any input handle")]
    UnknownVariable(usize),

    /// The input with given position does not exist.
    #[error("input {0} does not exist")]
    InputDoesNotExist(usize),

    /// A truth table must have exactly `2^inputs` entries.
    #[error("truth table has {len} entries, expected 2^{inputs}")]
    InvalidTruthTable { len: usize, inputs: usize },

    /// An input assignment does not provide one value per input.
    #[error("expected {expected} input values, got {got}")]
    InputCountMismatch { expected: usize, got: usize },

    /// The FRAIG has reached an invalid state. This should never happen.
    /// It is reported by [`Fraig::check_integrity`], which exists for debug purposes.
    ///
    /// [`Fraig::check_integrity`]: crate::Fraig::check_integrity
    #[error("the FRAIG has reached an invalid state - this should not happen - error: {0}")]
    InvalidState(String),
}
