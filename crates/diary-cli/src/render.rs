//! Text and JSON output.
//!
//! Listings and action results are built as plain data first, then printed
//! either as console text or as one JSON document per command.

use std::io::{self, Write};

use diary_core::persistence::RecordStore;
use diary_core::{CancelReason, Contact, ContactStore, Note, NoteStore, Task, TaskStore};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

/// Shown for records saved without a timestamp.
const UNKNOWN_DATE: &str = "unknown";
const NAME_COLUMN: usize = 28;

/// A record with its position in the listing.
#[derive(Serialize)]
struct Positioned<'a, R> {
    position: usize,
    #[serde(flatten)]
    record: &'a R,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Listing<'a, R> {
    kind: &'static str,
    count: usize,
    capacity: usize,
    items: Vec<Positioned<'a, R>>,
}

impl<'a, R> Listing<'a, R> {
    fn of(kind: &'static str, store: &'a RecordStore<R>) -> Self
    where
        R: diary_core::persistence::TextRecord,
    {
        Self {
            kind,
            count: store.len(),
            capacity: store.capacity(),
            items: store
                .records()
                .iter()
                .enumerate()
                .map(|(index, record)| Positioned {
                    position: index + 1,
                    record,
                })
                .collect(),
        }
    }
}

pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

fn or_unknown(created_at: &str) -> &str {
    if created_at.is_empty() {
        UNKNOWN_DATE
    } else {
        created_at
    }
}

// ============================================================================
// Listings
// ============================================================================

pub fn notes<W: Write>(out: &mut W, store: &NoteStore, format: Format) -> io::Result<()> {
    if format == Format::Json {
        return write_json(out, &Listing::<Note>::of("notes", store));
    }

    if store.is_empty() {
        return writeln!(out, "No notes.");
    }

    writeln!(out, "---- Notes ({}) ----", store.len())?;
    for (index, note) in store.records().iter().enumerate() {
        writeln!(out, " Note #{}  Date: {}", index + 1, note.created_at)?;
        writeln!(out, "----------------------")?;
        for line in note.lines() {
            writeln!(out, "  {line}")?;
        }
        writeln!(out, "----------------------")?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn tasks<W: Write>(out: &mut W, store: &TaskStore, format: Format) -> io::Result<()> {
    if format == Format::Json {
        return write_json(out, &Listing::<Task>::of("tasks", store));
    }

    if store.is_empty() {
        return writeln!(out, "No tasks.");
    }

    writeln!(out, "---- Tasks ----")?;
    for (index, task) in store.records().iter().enumerate() {
        let mark = if task.done { 'x' } else { ' ' };
        writeln!(
            out,
            "{:>3}. [{mark}] {} (Added: {})",
            index + 1,
            task.description,
            or_unknown(&task.created_at)
        )?;
    }
    Ok(())
}

pub fn contacts<W: Write>(out: &mut W, store: &ContactStore, format: Format) -> io::Result<()> {
    if format == Format::Json {
        return write_json(out, &Listing::<Contact>::of("contacts", store));
    }

    if store.is_empty() {
        return writeln!(out, "No contacts.");
    }

    writeln!(out, "---- Contacts ({}) ----", store.len())?;
    writeln!(out, "{:<5}{:<30}{:<18}{:<20}", "No", "Name", "Phone", "Added")?;
    writeln!(out, "{}", "-".repeat(73))?;
    for (index, contact) in store.records().iter().enumerate() {
        let name: String = contact.name.chars().take(NAME_COLUMN).collect();
        writeln!(
            out,
            "{:<5}{:<30}{:<18}{:<20}",
            index + 1,
            name,
            contact.phone,
            or_unknown(&contact.created_at)
        )?;
    }
    Ok(())
}

// ============================================================================
// Action Reports
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Added,
    Deleted,
    Toggled,
    Cleared,
}

/// What a mutating command did, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub kind: &'static str,
    pub action: Action,
    pub cancelled: Option<CancelReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<usize>,
}

impl Report {
    pub fn new(kind: &'static str, action: Action) -> Self {
        Self {
            kind,
            action,
            cancelled: None,
            position: None,
            created_at: None,
            done: None,
            removed: None,
        }
    }

    pub fn cancelled(kind: &'static str, action: Action, reason: CancelReason) -> Self {
        Self {
            cancelled: Some(reason),
            ..Self::new(kind, action)
        }
    }

    /// Console wording for this report.
    pub fn message(&self) -> String {
        if self.cancelled.is_some() {
            return "Cancelled.".to_string();
        }

        let position = self.position.unwrap_or_default();
        match self.action {
            Action::Added => {
                let verb = if self.kind == "task" { "added" } else { "saved" };
                format!(
                    "{} {verb} at {}",
                    capitalize(self.kind),
                    self.created_at.as_deref().unwrap_or(UNKNOWN_DATE)
                )
            }
            Action::Deleted => format!("Deleted {} #{position}", self.kind),
            Action::Toggled => {
                let state = if self.done == Some(true) { "done" } else { "not done" };
                format!("Toggled {} #{position}: {state}", self.kind)
            }
            Action::Cleared => match self.removed {
                Some(0) | None => format!("No {}s to delete.", self.kind),
                Some(_) => format!("All {}s deleted.", self.kind),
            },
        }
    }
}

pub fn report<W: Write>(out: &mut W, report: &Report, format: Format) -> io::Result<()> {
    match format {
        Format::Json => write_json(out, report),
        Format::Text => writeln!(out, "{}", report.message()),
    }
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    fn text<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn notes_text_listing_indents_lines() {
        let dir = tempdir().unwrap();
        let mut store = NoteStore::new(dir.path().join("notes.txt"), 140);
        store.append(Note::new("01/01/2024 09:00", "Hello\nWorld")).unwrap();

        let output = text(|out| notes(out, &store, Format::Text));

        assert!(output.starts_with("---- Notes (1) ----\n"));
        assert!(output.contains(" Note #1  Date: 01/01/2024 09:00\n"));
        assert!(output.contains("  Hello\n  World\n"));
    }

    #[test]
    fn empty_listings() {
        let dir = tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("tasks.txt"), 140);

        assert_eq!(text(|out| tasks(out, &store, Format::Text)), "No tasks.\n");
    }

    #[test]
    fn tasks_text_marks_done_and_unknown_dates() {
        let dir = tempdir().unwrap();
        let mut store = TaskStore::new(dir.path().join("tasks.txt"), 140);
        store.append(Task::new("old task", "")).unwrap();
        store
            .append(Task {
                description: "Buy milk".to_string(),
                done: true,
                created_at: "01/01/2024 09:00".to_string(),
            })
            .unwrap();

        let output = text(|out| tasks(out, &store, Format::Text));

        assert!(output.contains("  1. [ ] old task (Added: unknown)\n"));
        assert!(output.contains("  2. [x] Buy milk (Added: 01/01/2024 09:00)\n"));
    }

    #[test]
    fn contacts_text_truncates_long_names() {
        let dir = tempdir().unwrap();
        let mut store = ContactStore::new(dir.path().join("contacts.txt"), 140);
        store
            .append(Contact::new("N".repeat(40), "555", "01/01/2024 09:00"))
            .unwrap();

        let output = text(|out| contacts(out, &store, Format::Text));

        assert!(output.contains(&"N".repeat(28)));
        assert!(!output.contains(&"N".repeat(29)));
    }

    #[test]
    fn json_listing_includes_positions() {
        let dir = tempdir().unwrap();
        let mut store = TaskStore::new(dir.path().join("tasks.txt"), 3);
        store.append(Task::new("a", "t1")).unwrap();
        store.append(Task::new("b", "t2")).unwrap();

        let output = text(|out| tasks(out, &store, Format::Json));
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["kind"], "tasks");
        assert_eq!(value["count"], 2);
        assert_eq!(value["capacity"], 3);
        assert_eq!(value["items"][1]["position"], 2);
        assert_eq!(value["items"][1]["description"], "b");
        assert_eq!(value["items"][1]["createdAt"], "t2");
    }

    #[test]
    fn report_messages() {
        let mut added = Report::new("note", Action::Added);
        added.created_at = Some("01/01/2024 09:00".to_string());
        assert_eq!(added.message(), "Note saved at 01/01/2024 09:00");

        let mut toggled = Report::new("task", Action::Toggled);
        toggled.position = Some(2);
        toggled.done = Some(true);
        assert_eq!(toggled.message(), "Toggled task #2: done");

        let mut cleared = Report::new("contact", Action::Cleared);
        cleared.removed = Some(3);
        assert_eq!(cleared.message(), "All contacts deleted.");

        let cancelled = Report::cancelled("task", Action::Deleted, CancelReason::InvalidSelection);
        assert_eq!(cancelled.message(), "Cancelled.");
    }

    #[test]
    fn report_json_names_cancel_reason() {
        let report = Report::cancelled("note", Action::Cleared, CancelReason::Declined);
        let output = text(|out| super::report(out, &report, Format::Json));
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["cancelled"], "declined");
        assert_eq!(value["action"], "cleared");
        assert!(value.get("position").is_none());
    }
}
