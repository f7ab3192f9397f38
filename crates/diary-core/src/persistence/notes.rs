//! Note persistence.
//!
//! # File Format
//!
//! Stored as `notes.txt` in the data directory, one block per note:
//!
//! ```text
//! DATE: 01/01/2024 09:00
//! CONTENT:
//! Hello
//! World
//! ~
//! ---
//! ```
//!
//! The `~` line ends the content and `---` separates blocks. A note can
//! therefore never contain a line that is exactly `~`.

use super::codec::{check_single_line, labeled_value, trim_cr, Decoded, LineCursor, TextRecord};
use super::error::StoreError;
use super::store::RecordStore;
use super::types::{timestamp_now, Note};

pub const DATE_LABEL: &str = "DATE:";
pub const CONTENT_MARKER: &str = "CONTENT:";
/// Ends the content lines of a note, both on disk and during input capture.
pub const CONTENT_TERMINATOR: &str = "~";
pub const BLOCK_SEPARATOR: &str = "---";

pub type NoteStore = RecordStore<Note>;

impl TextRecord for Note {
    const KIND: &'static str = "note";

    fn encode(&self) -> String {
        let mut block = format!("{DATE_LABEL} {}\n{CONTENT_MARKER}\n", self.created_at);
        block.push_str(&self.content);
        if !self.content.is_empty() && !self.content.ends_with('\n') {
            block.push('\n');
        }
        block.push_str(CONTENT_TERMINATOR);
        block.push('\n');
        block.push_str(BLOCK_SEPARATOR);
        block.push('\n');
        block
    }

    fn decode(lines: &mut LineCursor<'_>) -> Option<Decoded<Self>> {
        let line = lines.next()?;
        let Some(created_at) = labeled_value(line, DATE_LABEL) else {
            return Some(Decoded::Skipped(line.to_string()));
        };

        // The CONTENT: marker is required but not checked.
        lines.next()?;

        let mut content = String::new();
        for line in lines.by_ref() {
            if line == CONTENT_TERMINATOR {
                break;
            }
            content.push_str(line);
            content.push('\n');
        }

        // Separator.
        lines.next();

        Some(Decoded::Record(Note {
            created_at: created_at.to_string(),
            content,
        }))
    }

    fn validate(&self) -> Result<(), &'static str> {
        check_single_line(&self.created_at, "date must be a single line")?;
        if self.content.lines().any(|line| trim_cr(line) == CONTENT_TERMINATOR) {
            return Err("content line `~` would end the note early");
        }
        Ok(())
    }
}

impl RecordStore<Note> {
    /// Add a note stamped with the current time.
    pub fn add_note(&mut self, content: impl Into<String>) -> Result<usize, StoreError> {
        self.append(Note::new(timestamp_now(), content))
    }
}

// ============================================================================
// TESTS
// ============================================================================
