//! Text record codec.
//!
//! # Overview
//!
//! Every record kind is stored in a plain text file as either a labeled
//! block (notes, contacts) or a single line (tasks). This module holds the
//! pieces they share:
//!
//! - [`TextRecord`] - implemented by each record type to encode one record
//!   and decode the next one from a [`LineCursor`]
//! - [`LineCursor`] - line reader over file text that strips `\r\n` and `\n`
//!   terminators alike, so files written on Windows load unchanged
//! - [`decode_all`] / [`encode_all`] - whole-file helpers used by the stores
//!
//! # Leniency
//!
//! Decoders never fail. A line that does not begin a record is reported as
//! [`Decoded::Skipped`] and loading continues with the next line.

use log::debug;

/// Remove one trailing carriage return, if present.
pub fn trim_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Value after a `LABEL:` prefix, with one leading space removed.
///
/// Returns `None` if the line does not start with `label`.
pub fn labeled_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.strip_prefix(label)
        .map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
}

/// Line reader over the contents of a record file.
///
/// Each `\n` ends a line and a final unterminated fragment is still a line.
/// Yielded lines have their terminator and one trailing `\r` removed.
pub struct LineCursor<'a> {
    inner: std::str::SplitInclusive<'a, char>,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_inclusive('\n'),
        }
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next().map(|raw| {
            let line = raw.strip_suffix('\n').unwrap_or(raw);
            trim_cr(line)
        })
    }
}

/// One step of decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<R> {
    /// A complete record.
    Record(R),
    /// A line that does not start a record and was ignored.
    Skipped(String),
}

/// A record that can be written to and read back from its text format.
pub trait TextRecord: Sized {
    /// Human-readable kind, used in logs and errors ("note", "task", ...).
    const KIND: &'static str;

    /// Encode this record as a complete, newline-terminated block or line.
    fn encode(&self) -> String;

    /// Decode the next record.
    ///
    /// Returns `None` once the input is exhausted.
    fn decode(lines: &mut LineCursor<'_>) -> Option<Decoded<Self>>;

    /// Check that the record encodes to text that decodes back to itself.
    ///
    /// Returns the reason a field can't be stored.
    fn validate(&self) -> Result<(), &'static str> {
        Ok(())
    }
}

/// Reject values that would spill onto another line of the file.
pub fn check_single_line(value: &str, reason: &'static str) -> Result<(), &'static str> {
    if value.contains(['\n', '\r']) {
        Err(reason)
    } else {
        Ok(())
    }
}

/// Records decoded from a whole file, plus what was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFile<R> {
    pub records: Vec<R>,
    /// Lines ignored because they did not start a record.
    pub skipped: usize,
    /// True if decoding stopped at `limit` with more records remaining.
    pub truncated: bool,
}

/// Decode at most `limit` records from `text`, in file order.
pub fn decode_all<R: TextRecord>(text: &str, limit: usize) -> DecodedFile<R> {
    let mut cursor = LineCursor::new(text);
    let mut records = Vec::new();
    let mut skipped = 0;
    let mut truncated = false;

    while let Some(decoded) = R::decode(&mut cursor) {
        match decoded {
            Decoded::Record(record) => {
                if records.len() >= limit {
                    truncated = true;
                    break;
                }
                records.push(record);
            }
            Decoded::Skipped(line) => {
                debug!("Ignoring malformed {} line: {:?}", R::KIND, line);
                skipped += 1;
            }
        }
    }

    DecodedFile {
        records,
        skipped,
        truncated,
    }
}

/// Encode all records, in order, as one file body.
pub fn encode_all<R: TextRecord>(records: &[R]) -> String {
    records.iter().map(TextRecord::encode).collect()
}

// ============================================================================
// TESTS
// ============================================================================
