//! Error types for interface records, sequences and type support.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("CDR error: {0}")]
    Cdr(#[from] cdr::Error),

    #[error("CDR data too short for encapsulation header ({0} bytes)")]
    TruncatedHeader(usize),

    #[error("expected CDR_LE encapsulation [0x00, 0x01], found {0:?}")]
    UnsupportedEncapsulation([u8; 2]),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error("type '{0}' is not registered")]
    UnknownType(String),

    #[error("invalid type name '{0}': expected 'package/kind/Name'")]
    InvalidTypeName(String),

    #[error("invalid type hash: {0}")]
    InvalidHash(String),

    #[error("invalid goal status {0}: expected 0..=6")]
    InvalidGoalStatus(i8),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of the sequence utility.
///
/// A failed operation leaves the sequence in the state it had before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("failed to allocate storage for {requested} elements")]
    Allocation { requested: usize },

    #[error("bounded sequence exceeded maximum size: max={max}, actual={actual}")]
    BoundExceeded { max: usize, actual: usize },
}
