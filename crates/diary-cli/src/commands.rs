//! One-shot subcommands.
//!
//! Each command works on an already logged-in [`Diary`]. Results go to
//! `out`; questions (note bodies, clear confirmations) go to `prompts` so
//! JSON output stays clean.

use std::io::{self, BufRead, Cursor, Write};

use diary_core::persistence::{RecordStore, TextRecord};
use diary_core::{Contact, Diary, DiaryError, Note, Outcome, Task};

use crate::cli::{ClearArgs, Command, ContactsAction, NotesAction, TasksAction};
use crate::menu;
use crate::prompt::{self, single_line};
use crate::render::{self, Action, Format, Report};

pub fn run<R: BufRead, P: Write, W: Write>(
    diary: &mut Diary,
    command: &Command,
    format: Format,
    input: &mut R,
    prompts: &mut P,
    out: &mut W,
) -> Result<(), DiaryError> {
    match command {
        Command::Login => Ok(()),
        Command::Menu => menu::run(diary, input, out),
        Command::Notes(action) => notes(diary, action, format, input, prompts, out),
        Command::Tasks(action) => tasks(diary, action, format, input, prompts, out),
        Command::Contacts(action) => contacts(diary, action, format, input, prompts, out),
    }
}

fn notes<R: BufRead, P: Write, W: Write>(
    diary: &mut Diary,
    action: &NotesAction,
    format: Format,
    input: &mut R,
    prompts: &mut P,
    out: &mut W,
) -> Result<(), DiaryError> {
    let report = match action {
        NotesAction::List => return Ok(render::notes(out, diary.notes(), format)?),
        NotesAction::Add { text } => {
            let body = if text.is_empty() {
                writeln!(
                    prompts,
                    "Enter note (multi-line). End with a single line containing only ~"
                )?;
                prompt::read_note_body(input)?
            } else {
                prompt::read_note_body(&mut Cursor::new(text.join(" ")))?
            };
            let store = diary.notes_mut();
            let position = store.add_note(body)?;
            added(store, position)
        }
        NotesAction::Delete { position } => deleted(diary.notes_mut(), *position)?,
        NotesAction::Clear(args) => cleared(diary.notes_mut(), args, input, prompts)?,
    };
    Ok(render::report(out, &report, format)?)
}

fn tasks<R: BufRead, P: Write, W: Write>(
    diary: &mut Diary,
    action: &TasksAction,
    format: Format,
    input: &mut R,
    prompts: &mut P,
    out: &mut W,
) -> Result<(), DiaryError> {
    let report = match action {
        TasksAction::List => return Ok(render::tasks(out, diary.tasks(), format)?),
        TasksAction::Add { text } => {
            let store = diary.tasks_mut();
            let position = store.add_task(single_line(&text.join(" ")))?;
            added(store, position)
        }
        TasksAction::Toggle { position } => toggled(diary.tasks_mut().toggle_at(*position)?, *position),
        TasksAction::Delete { position } => deleted(diary.tasks_mut(), *position)?,
        TasksAction::Clear(args) => cleared(diary.tasks_mut(), args, input, prompts)?,
    };
    Ok(render::report(out, &report, format)?)
}

fn contacts<R: BufRead, P: Write, W: Write>(
    diary: &mut Diary,
    action: &ContactsAction,
    format: Format,
    input: &mut R,
    prompts: &mut P,
    out: &mut W,
) -> Result<(), DiaryError> {
    let report = match action {
        ContactsAction::List => return Ok(render::contacts(out, diary.contacts(), format)?),
        ContactsAction::Add { name, phone } => {
            let store = diary.contacts_mut();
            let position = store.add_contact(single_line(name), single_line(phone))?;
            added(store, position)
        }
        ContactsAction::Delete { position } => deleted(diary.contacts_mut(), *position)?,
        ContactsAction::Clear(args) => cleared(diary.contacts_mut(), args, input, prompts)?,
    };
    Ok(render::report(out, &report, format)?)
}

// ============================================================================
// Shared Actions
// ============================================================================

/// Timestamp accessor shared by every record kind.
pub(crate) trait Stamped {
    fn created_at(&self) -> &str;
}

impl Stamped for Note {
    fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl Stamped for Task {
    fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl Stamped for Contact {
    fn created_at(&self) -> &str {
        &self.created_at
    }
}

pub(crate) fn added<R: TextRecord + Stamped>(store: &RecordStore<R>, position: usize) -> Report {
    let mut report = Report::new(R::KIND, Action::Added);
    report.position = Some(position);
    report.created_at = store.get(position).map(|r| r.created_at().to_string());
    report
}

pub(crate) fn deleted<R: TextRecord>(
    store: &mut RecordStore<R>,
    position: usize,
) -> Result<Report, DiaryError> {
    Ok(match store.delete_at(position)? {
        Outcome::Done(_) => {
            let mut report = Report::new(R::KIND, Action::Deleted);
            report.position = Some(position);
            report
        }
        Outcome::Cancelled(reason) => Report::cancelled(R::KIND, Action::Deleted, reason),
    })
}

pub(crate) fn toggled(outcome: Outcome<bool>, position: usize) -> Report {
    match outcome {
        Outcome::Done(done) => {
            let mut report = Report::new(Task::KIND, Action::Toggled);
            report.position = Some(position);
            report.done = Some(done);
            report
        }
        Outcome::Cancelled(reason) => Report::cancelled(Task::KIND, Action::Toggled, reason),
    }
}

/// Clear a store, asking first unless `--yes` was given.
///
/// An empty store reports nothing to delete without asking.
fn cleared<R: TextRecord, I: BufRead, P: Write>(
    store: &mut RecordStore<R>,
    args: &ClearArgs,
    input: &mut I,
    prompts: &mut P,
) -> Result<Report, DiaryError> {
    let confirmed = store.is_empty() || args.yes || confirm_clear::<R, _, _>(input, prompts)?;
    Ok(cleared_report::<R>(store.delete_all(confirmed)?))
}

pub(crate) fn confirm_clear<R: TextRecord, I: BufRead, P: Write>(
    input: &mut I,
    prompts: &mut P,
) -> io::Result<bool> {
    prompt::confirm(
        input,
        prompts,
        &format!("Are you sure you want to DELETE ALL {}s?", R::KIND),
    )
}

pub(crate) fn cleared_report<R: TextRecord>(outcome: Outcome<usize>) -> Report {
    match outcome {
        Outcome::Done(removed) => {
            let mut report = Report::new(R::KIND, Action::Cleared);
            report.removed = Some(removed);
            report
        }
        Outcome::Cancelled(reason) => Report::cancelled(R::KIND, Action::Cleared, reason),
    }
}

// ============================================================================
// TESTS
// ============================================================================
