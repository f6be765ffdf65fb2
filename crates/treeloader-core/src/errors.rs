use thiserror::Error;

/// Input rejected before any network request is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("GitHub user not specified")]
    MissingOwner,
}

pub type ValidationResult<T> = Result<T, ValidationError>;
