//! Error types for `poststats-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("version must be a non-negative 32-bit integer, got {0}")]
  InvalidVersion(i64),

  #[error("topic must not be empty")]
  EmptyTopic,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
