//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("unknown sort property: {0:?}")]
  UnknownSortProperty(String),

  #[error("unknown sort direction: {0:?}")]
  UnknownSortDirection(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
