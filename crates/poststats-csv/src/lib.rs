//! CSV ingest adapter for poststats.
//!
//! Converts tabular post exports into [`Revision`] values. Pure synchronous;
//! no HTTP or database dependencies. A batch is accepted whole or rejected
//! whole: the first malformed row aborts the parse with an error naming its
//! line, so malformed input never reaches the statistics engine.
//!
//! # Quick start
//!
//! ```no_run
//! let csv = "post_id,topic,likes,shares,comments,version,timestamp\n\
//!            7,health,5,-1,3,1,2024-01-01 10:00:00\n";
//! let revisions = poststats_csv::parse(csv).unwrap();
//! assert_eq!(revisions.len(), 1);
//! ```

pub mod error;
mod parse;

use std::path::Path;

pub use error::{Error, Result};
use poststats_core::revision::Revision;

/// The header this adapter expects, in the order exports usually carry it.
pub const COLUMNS: [&str; 7] = [
  parse::POST_ID,
  parse::TOPIC,
  parse::LIKES,
  parse::SHARES,
  parse::COMMENTS,
  parse::VERSION,
  parse::TIMESTAMP,
];

/// Parse every data row of `input` into a revision.
///
/// The first non-blank record is the header. Columns are matched by name, so
/// their order is free and extra columns are ignored.
pub fn parse(input: &str) -> Result<Vec<Revision>> {
  let mut records = parse::split_records(input)?.into_iter();
  let header = records.next().ok_or(Error::MissingHeader)?;
  let columns = parse::Columns::locate(&header.fields)?;

  records
    .map(|record| parse::decode_row(&columns, &record))
    .collect()
}

/// Read `path` and [`parse`] its contents.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<Revision>> {
  let input = std::fs::read_to_string(path)?;
  parse(&input)
}
