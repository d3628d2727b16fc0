//! Error types for chess-table-core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid square name: {0:?}")]
    InvalidSquare(String),
}

pub type Result<T> = std::result::Result<T, Error>;
