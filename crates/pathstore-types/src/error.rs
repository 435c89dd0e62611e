use thiserror::Error;

/// Errors produced by type construction and validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("path must not be empty")]
    EmptyPath,

    #[error("content type must not be empty")]
    EmptyContentType,

    #[error("content type contains a control character: {0:?}")]
    InvalidContentType(String),
}

pub type TypeResult<T> = Result<T, TypeError>;
