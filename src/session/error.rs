use std::result;

use thiserror::Error as DeriveError;

/// An error that occurred in a CMIS session.
///
/// This mirrors the exception hierarchy of the CMIS specification closely enough for an adapter to
/// tell a missing object apart from every other failure. Implementations of [`CmisSession`] which
/// talk to a real repository should map their transport errors onto these variants and use
/// `Runtime` for anything which doesn't fit.
///
/// [`CmisSession`]: crate::session::CmisSession
#[derive(Debug, DeriveError)]
pub enum SessionError {
    /// The requested object does not exist.
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// An argument passed to the repository was invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An object with the same name already exists in the target folder.
    #[error("Name constraint violation: {0}")]
    NameConstraintViolation(String),

    /// The operation violates a constraint of the repository.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// The repository does not support the operation.
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// Any other error which occurred while talking to the repository.
    #[error("{0}")]
    Runtime(#[from] anyhow::Error),
}

impl SessionError {
    /// Return whether this error means the requested object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SessionError::ObjectNotFound(_))
    }
}

/// The result type for operations with a CMIS session.
pub type SessionResult<T> = result::Result<T, SessionError>;
