//! Persistence layer for notes, tasks, contacts and users.
//!
//! # Overview
//!
//! This module handles all file I/O for the diary's persistent state:
//!
//! - **Codec** - text formats shared by the record kinds
//! - **Stores** - in-memory, capacity-bounded mirrors of each data file
//! - **Credentials** - the plain-text user list
//!
//! # File Locations
//!
//! All data lives in one directory (see [`crate::config::DiaryConfig`]):
//!
//! ```text
//! ~/.mini-diary/                  (or DIARY_DIR)
//! ├── users.txt
//! ├── notes.txt
//! ├── tasks.txt
//! └── contacts.txt
//! ```
//!
//! # Design Principles
//!
//! ## Append vs Rewrite
//!
//! Adding a record appends one block to the end of its file. Any positional
//! edit (delete, toggle, clear) rewrites the whole file from memory, using
//! write-then-rename.
//!
//! ## Lenient Loading
//!
//! Loading never fails on bad data. Lines that don't start a record are
//! skipped, and a missing file is an empty store.
//!
//! # Usage
//!
//! ```ignore
//! use diary_core::persistence::{TaskStore, Outcome};
//!
//! let mut tasks = TaskStore::open(config.tasks_file(), config.capacity);
//! tasks.add_task("Water the plants")?;
//! if let Outcome::Done(done) = tasks.toggle_at(1)? {
//!     println!("task 1 done: {done}");
//! }
//! ```

pub mod codec;
pub mod contacts;
pub mod credentials;
pub mod error;
pub mod notes;
pub mod store;
pub mod tasks;
pub mod types;

// Re-export commonly used items for convenience
pub use codec::{decode_all, encode_all, trim_cr, Decoded, DecodedFile, LineCursor, TextRecord};
pub use contacts::ContactStore;
pub use credentials::{is_valid_token, CredentialStore};
pub use error::StoreError;
pub use notes::{NoteStore, CONTENT_TERMINATOR};
pub use store::{CancelReason, LoadReport, Outcome, RecordStore};
pub use tasks::TaskStore;
pub use types::*;
