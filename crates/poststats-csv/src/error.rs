//! Error types for the poststats CSV ingest adapter.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("input has no header row")]
  MissingHeader,

  #[error("header is missing required column {0:?}")]
  MissingColumn(&'static str),

  #[error("line {line}: unterminated quoted field")]
  UnterminatedQuote { line: usize },

  #[error("line {line}: expected {expected} fields, found {found}")]
  FieldCount {
    line:     usize,
    expected: usize,
    found:    usize,
  },

  #[error("line {line}: column {column:?} is not an integer: {value:?}")]
  InvalidInteger {
    line:   usize,
    column: &'static str,
    value:  String,
  },

  #[error("line {line}: unrecognised timestamp {value:?}")]
  InvalidTimestamp { line: usize, value: String },

  #[error("line {line}: {source}")]
  InvalidRevision {
    line:   usize,
    #[source]
    source: poststats_core::Error,
  },

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
