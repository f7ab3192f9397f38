//! Interactive numbered menus.
//!
//! The menu reads one choice per line. End of input anywhere leaves the
//! whole menu, so piping a script into `diary menu` works.

use std::io::{BufRead, Write};

use diary_core::persistence::{RecordStore, TextRecord};
use diary_core::{Diary, DiaryError, Outcome};

use crate::commands::{added, cleared_report, confirm_clear, deleted, toggled};
use crate::prompt::{self, single_line};
use crate::render::{self, capitalize, Format, Report};

/// Whether to keep showing the menu after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run<R: BufRead, W: Write>(
    diary: &mut Diary,
    input: &mut R,
    out: &mut W,
) -> Result<(), DiaryError> {
    loop {
        writeln!(out)?;
        writeln!(out, " MAIN MENU ")?;
        writeln!(out, "1. Notes\n2. Tasks\n3. Contacts\n0. Exit")?;

        let Some(choice) = prompt::ask(input, out, "Choose: ")? else {
            return Ok(());
        };
        let flow = match choice.trim() {
            "1" => notes_menu(diary, input, out)?,
            "2" => tasks_menu(diary, input, out)?,
            "3" => contacts_menu(diary, input, out)?,
            "0" => {
                writeln!(out, "Exiting. Goodbye!")?;
                Flow::Quit
            }
            _ => {
                writeln!(out, "Invalid choice.")?;
                Flow::Continue
            }
        };
        if flow == Flow::Quit {
            return Ok(());
        }
    }
}

// ============================================================================
// Sub-menus
// ============================================================================

fn notes_menu<R: BufRead, W: Write>(
    diary: &mut Diary,
    input: &mut R,
    out: &mut W,
) -> Result<Flow, DiaryError> {
    loop {
        writeln!(out)?;
        writeln!(out, " -- NOTES -- ")?;
        writeln!(
            out,
            "1. Add Note\n2. View Notes\n3. Delete Single Note\n4. Delete All Notes\n0. Back"
        )?;

        let Some(choice) = prompt::ask(input, out, "Choose: ")? else {
            return Ok(Flow::Quit);
        };
        let store = diary.notes_mut();
        match choice.trim() {
            "1" => {
                if full(store, out)? {
                    continue;
                }
                writeln!(
                    out,
                    "Enter note (multi-line). End with a single line containing only ~"
                )?;
                let body = prompt::read_note_body(input)?;
                let position = store.add_note(body)?;
                show(out, &added(store, position))?;
            }
            "2" => render::notes(out, store, Format::Text)?,
            "3" => delete_single(store, input, out, render::notes)?,
            "4" => delete_all(store, input, out)?,
            "0" => return Ok(Flow::Continue),
            _ => writeln!(out, "Invalid.")?,
        }
    }
}

fn tasks_menu<R: BufRead, W: Write>(
    diary: &mut Diary,
    input: &mut R,
    out: &mut W,
) -> Result<Flow, DiaryError> {
    loop {
        writeln!(out)?;
        writeln!(out, " -- TASKS -- ")?;
        writeln!(out, "1. Add Task\n2. View Tasks\n3. Toggle/Delete Task\n0. Back")?;

        let Some(choice) = prompt::ask(input, out, "Choose: ")? else {
            return Ok(Flow::Quit);
        };
        let store = diary.tasks_mut();
        match choice.trim() {
            "1" => {
                if full(store, out)? {
                    continue;
                }
                let Some(text) = prompt::ask(input, out, "Enter task description: ")? else {
                    return Ok(Flow::Quit);
                };
                let position = store.add_task(single_line(&text))?;
                show(out, &added(store, position))?;
            }
            "2" => render::tasks(out, store, Format::Text)?,
            "3" => {
                if store.is_empty() {
                    writeln!(out, "No tasks.")?;
                    continue;
                }
                render::tasks(out, store, Format::Text)?;
                let Some(position) = pick(store, input, out, "Enter task number (0 cancel): ")?
                else {
                    writeln!(out, "Cancelled.")?;
                    continue;
                };
                let Some(action) = prompt::ask(input, out, " 1.Toggle\n 2.Delete\n Enter choice: ")?
                else {
                    return Ok(Flow::Quit);
                };
                match action.trim() {
                    "1" => show(out, &toggled(store.toggle_at(position)?, position))?,
                    "2" => show(out, &deleted(store, position)?)?,
                    _ => writeln!(out, "Invalid option.")?,
                }
            }
            "0" => return Ok(Flow::Continue),
            _ => writeln!(out, "Invalid.")?,
        }
    }
}

fn contacts_menu<R: BufRead, W: Write>(
    diary: &mut Diary,
    input: &mut R,
    out: &mut W,
) -> Result<Flow, DiaryError> {
    loop {
        writeln!(out)?;
        writeln!(out, " -- CONTACTS -- ")?;
        writeln!(
            out,
            "1. Add Contact\n2. View Contacts\n3. Delete Single Contact\n4. Delete All Contacts\n0. Back"
        )?;

        let Some(choice) = prompt::ask(input, out, "Choose: ")? else {
            return Ok(Flow::Quit);
        };
        let store = diary.contacts_mut();
        match choice.trim() {
            "1" => {
                if full(store, out)? {
                    continue;
                }
                let Some(name) = prompt::ask(input, out, "Enter name: ")? else {
                    return Ok(Flow::Quit);
                };
                let Some(phone) = prompt::ask(input, out, "Enter phone: ")? else {
                    return Ok(Flow::Quit);
                };
                let position = store.add_contact(single_line(&name), single_line(&phone))?;
                show(out, &added(store, position))?;
            }
            "2" => render::contacts(out, store, Format::Text)?,
            "3" => delete_single(store, input, out, render::contacts)?,
            "4" => delete_all(store, input, out)?,
            "0" => return Ok(Flow::Continue),
            _ => writeln!(out, "Invalid.")?,
        }
    }
}

// ============================================================================
// Shared Steps
// ============================================================================

type Listing<R, W> = fn(&mut W, &RecordStore<R>, Format) -> std::io::Result<()>;

fn show<W: Write>(out: &mut W, report: &Report) -> Result<(), DiaryError> {
    writeln!(out, "{}", report.message())?;
    Ok(())
}

/// Print the "storage full" message if there is no room for another record.
fn full<R: TextRecord, W: Write>(store: &RecordStore<R>, out: &mut W) -> Result<bool, DiaryError> {
    if !store.is_full() {
        return Ok(false);
    }
    writeln!(out, "{} storage full.", capitalize(R::KIND))?;
    Ok(true)
}

/// Ask for a position in the current listing. `None` for 0, junk or out of range.
fn pick<R: TextRecord, I: BufRead, W: Write>(
    store: &RecordStore<R>,
    input: &mut I,
    out: &mut W,
    question: &str,
) -> Result<Option<usize>, DiaryError> {
    let position = prompt::ask_position(input, out, question)?;
    Ok(position.filter(|p| store.get(*p).is_some()))
}

fn delete_single<R: TextRecord, I: BufRead, W: Write>(
    store: &mut RecordStore<R>,
    input: &mut I,
    out: &mut W,
    listing: Listing<R, W>,
) -> Result<(), DiaryError> {
    if store.is_empty() {
        writeln!(out, "No {}s to delete.", R::KIND)?;
        return Ok(());
    }

    listing(out, store, Format::Text)?;
    let question = format!("Enter {} number to delete (0 cancel): ", R::KIND);
    let position = prompt::ask_position(input, out, &question)?.unwrap_or(0);
    show(out, &deleted(store, position)?)
}

fn delete_all<R: TextRecord, I: BufRead, W: Write>(
    store: &mut RecordStore<R>,
    input: &mut I,
    out: &mut W,
) -> Result<(), DiaryError> {
    if store.is_empty() {
        writeln!(out, "No {}s to delete.", R::KIND)?;
        return Ok(());
    }

    let confirmed = confirm_clear::<R, _, _>(input, out)?;
    let outcome: Outcome<usize> = store.delete_all(confirmed)?;
    show(out, &cleared_report::<R>(outcome))
}

// ============================================================================
// TESTS
// ============================================================================
