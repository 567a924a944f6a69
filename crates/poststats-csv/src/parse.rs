//! CSV record splitter and revision decoder.
//!
//! Pipeline:
//!   raw &str
//!     └─ split_records()      → Vec<Record>
//!          └─ Columns::locate() → header positions
//!               └─ decode_row() → Revision

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use poststats_core::revision::{EntityId, Revision, version_from_i64};

use crate::error::{Error, Result};

// ─── Record splitting ────────────────────────────────────────────────────────

/// One logical CSV record and the 1-based line it starts on.
#[derive(Debug)]
pub(crate) struct Record {
  pub line:   usize,
  pub fields: Vec<String>,
}

/// Split `input` into records (RFC 4180 quoting, CRLF or LF endings).
///
/// Quoted fields may contain commas, line breaks and `""` escapes. Records
/// consisting of a single empty field (blank lines) are dropped.
pub(crate) fn split_records(input: &str) -> Result<Vec<Record>> {
  let mut records = Vec::new();
  let mut fields: Vec<String> = Vec::new();
  let mut field = String::new();
  let mut in_quotes = false;
  let mut line = 1usize;
  let mut record_line = 1usize;
  let mut chars = input.chars().peekable();

  while let Some(c) = chars.next() {
    if in_quotes {
      match c {
        '"' if chars.peek() == Some(&'"') => {
          chars.next();
          field.push('"');
        }
        '"' => in_quotes = false,
        '\n' => {
          line += 1;
          field.push('\n');
        }
        _ => field.push(c),
      }
      continue;
    }

    match c {
      '"' if field.trim().is_empty() => {
        field.clear();
        in_quotes = true;
      }
      ',' => fields.push(std::mem::take(&mut field)),
      '\r' if chars.peek() == Some(&'\n') => {}
      '\n' => {
        fields.push(std::mem::take(&mut field));
        push_record(&mut records, record_line, std::mem::take(&mut fields));
        line += 1;
        record_line = line;
      }
      _ => field.push(c),
    }
  }

  if in_quotes {
    return Err(Error::UnterminatedQuote { line: record_line });
  }
  if !field.is_empty() || !fields.is_empty() {
    fields.push(field);
    push_record(&mut records, record_line, fields);
  }

  Ok(records)
}

fn push_record(records: &mut Vec<Record>, line: usize, fields: Vec<String>) {
  let blank = fields.len() == 1 && fields[0].trim().is_empty();
  if !blank {
    records.push(Record { line, fields });
  }
}

// ─── Header ──────────────────────────────────────────────────────────────────

pub(crate) const POST_ID: &str = "post_id";
pub(crate) const TOPIC: &str = "topic";
pub(crate) const LIKES: &str = "likes";
pub(crate) const SHARES: &str = "shares";
pub(crate) const COMMENTS: &str = "comments";
pub(crate) const VERSION: &str = "version";
pub(crate) const TIMESTAMP: &str = "timestamp";

/// Positions of the required columns within a record.
pub(crate) struct Columns {
  post_id:   usize,
  topic:     usize,
  likes:     usize,
  shares:    usize,
  comments:  usize,
  version:   usize,
  timestamp: usize,
  width:     usize,
}

impl Columns {
  /// Find every required column in `header` by name (trimmed,
  /// case-insensitive). Unknown columns are ignored.
  pub(crate) fn locate(header: &[String]) -> Result<Self> {
    let find = |name: &'static str| {
      header
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or(Error::MissingColumn(name))
    };

    Ok(Self {
      post_id:   find(POST_ID)?,
      topic:     find(TOPIC)?,
      likes:     find(LIKES)?,
      shares:    find(SHARES)?,
      comments:  find(COMMENTS)?,
      version:   find(VERSION)?,
      timestamp: find(TIMESTAMP)?,
      width:     header.len(),
    })
  }
}

// ─── Row decoding ────────────────────────────────────────────────────────────

/// Decode one data record into a validated [`Revision`].
pub(crate) fn decode_row(columns: &Columns, record: &Record) -> Result<Revision> {
  let line = record.line;
  let fields = &record.fields;

  if fields.len() != columns.width {
    return Err(Error::FieldCount {
      line,
      expected: columns.width,
      found: fields.len(),
    });
  }

  let integer = |index: usize, column: &'static str| -> Result<i64> {
    let raw = fields[index].trim();
    raw.parse::<i64>().map_err(|_| Error::InvalidInteger {
      line,
      column,
      value: raw.to_string(),
    })
  };

  let raw_version = integer(columns.version, VERSION)?;
  let version = version_from_i64(raw_version)
    .map_err(|source| Error::InvalidRevision { line, source })?;

  let raw_ts = fields[columns.timestamp].trim();
  let timestamp = parse_timestamp(raw_ts).ok_or_else(|| Error::InvalidTimestamp {
    line,
    value: raw_ts.to_string(),
  })?;

  let revision = Revision {
    entity_id: EntityId(integer(columns.post_id, POST_ID)?),
    version,
    topic: fields[columns.topic].trim().to_string(),
    likes: integer(columns.likes, LIKES)?,
    shares: integer(columns.shares, SHARES)?,
    comments: integer(columns.comments, COMMENTS)?,
    timestamp,
  };

  revision
    .validate()
    .map_err(|source| Error::InvalidRevision { line, source })?;

  Ok(revision)
}

/// Parse a timestamp in any of the accepted layouts. Values without an
/// offset are taken as UTC.
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc));
  }
  for layout in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
      return Some(naive.and_utc());
    }
  }
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .ok()
    .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
