//! # diary-core
//!
//! Core record persistence for Mini Digital Diary, a single-user notebook
//! for notes, to-do tasks and contacts kept in plain text files.
//!
//! This crate is presentation-agnostic and is used by:
//! - the `diary` command-line tool (subcommands and interactive menu)
//! - integration tests driving the stores directly
//!
//! ## Key Concepts
//!
//! - **Record**: a note, task or contact, encoded as a text block or line
//! - **Store**: a capacity-bounded, ordered mirror of one data file
//! - **Position**: the 1-based index of a record in the current listing,
//!   the only identity a record has
//! - **Session**: a logged-in [`Diary`] owning all three stores

pub mod config;
pub mod paths;
pub mod persistence;
pub mod session;

// Re-export commonly used types
pub use config::DiaryConfig;
pub use persistence::{
    AuthOutcome, CancelReason, Contact, ContactStore, LoadReport, Note, NoteStore, Outcome,
    StoreError, Task, TaskStore,
};
pub use session::{Diary, DiaryError, Login};
