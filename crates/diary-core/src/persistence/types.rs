//! Persistence data types.
//!
//! # Data Model Overview
//!
//! The diary persists three record kinds plus the user list, each in its
//! own flat text file:
//!
//! ```text
//! <data dir>/
//! ├── users.txt       # `username secret` pairs
//! ├── notes.txt       # DATE/CONTENT blocks terminated by `~` and `---`
//! ├── tasks.txt       # `[0] description | timestamp` lines
//! └── contacts.txt    # NAME/PHONE/DATE blocks terminated by `---`
//! ```
//!
//! # Design Principles
//!
//! - **Positional identity**: records carry no IDs, a record is addressed by
//!   its 1-based position in the current listing
//! - **Opaque timestamps**: `created_at` is stored and compared as text
//! - **Human-readable files**: every format can be edited by hand

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Display/storage format for record timestamps (`dd/mm/yyyy hh:mm`).
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Current local wall-clock time in [`TIMESTAMP_FORMAT`].
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

// ============================================================================
// Record Types
// ============================================================================

/// A free-form multi-line note.
///
/// Content is a sequence of lines, each terminated by `\n`. A line equal to
/// `~` cannot be stored because it terminates the content block on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// When the note was written.
    pub created_at: String,

    /// Note body, newline-terminated lines.
    pub content: String,
}

impl Note {
    /// Build a note, terminating the last content line with `\n` if needed.
    pub fn new(created_at: impl Into<String>, content: impl Into<String>) -> Self {
        let mut content = content.into();
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        Self {
            created_at: created_at.into(),
            content,
        }
    }

    /// Iterate over the content lines without their terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }
}

/// A single-line to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// What needs doing.
    pub description: String,

    /// True once the task is completed.
    pub done: bool,

    /// When the task was added. Empty for tasks saved by older versions.
    pub created_at: String,
}

impl Task {
    /// Build a task that is not done yet.
    pub fn new(description: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
            created_at: created_at.into(),
        }
    }
}

/// A name/phone pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub created_at: String,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            created_at: created_at.into(),
        }
    }
}

// ============================================================================
// Credential Types
// ============================================================================

/// A username and its shared secret, stored in plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub secret: String,
}

/// Result of checking a username/secret pair against the user list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthOutcome {
    /// The username is unknown; the caller should register it.
    NewUser,
    /// Known username, matching secret.
    Accepted,
    /// Known username, wrong secret.
    Rejected,
}

// ============================================================================
// TESTS
// ============================================================================
