//! Error types for window-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),

    #[error("Invalid sentinel year: {0}")]
    InvalidSentinel(i32),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown content type: {0}")]
    UnknownContentType(String),

    #[error("Submission blocked: {errors} unresolved date error(s)")]
    Blocked { errors: usize },
}

pub type Result<T> = std::result::Result<T, WindowError>;
