use chrono::NaiveDate;
use thiserror::Error;

use crate::auth::TOKEN_LENGTH;
use crate::types::TaskStatus;

/// Why a bearer token was refused. Only ever logged, never sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("token is empty")]
    Empty,

    #[error("token has length {0}, expected {expected}", expected = TOKEN_LENGTH)]
    WrongLength(usize),

    #[error("token contains non-hexadecimal characters")]
    NotHex,

    #[error("token is not registered")]
    Unknown,

    #[error("token was revoked on {0}")]
    Revoked(NaiveDate),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("not found")]
    NotFound,

    #[error("already exists")]
    AlreadyExists,

    #[error("unauthenticated: {0}")]
    Unauthenticated(#[from] AuthFailure),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("cannot change task status from {from} to {to}")]
    InvalidTransition { from: TaskStatus, to: TaskStatus },
}

pub type Result<T> = std::result::Result<T, Error>;
