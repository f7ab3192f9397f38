//! Diary configuration.
//!
//! Everything the session needs to find its files: one data directory holding
//! the user list and the three record files, plus the per-kind capacity.

use std::path::{Path, PathBuf};

use crate::paths::default_data_dir;

/// Maximum records per kind unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 140;

pub const USERS_FILE: &str = "users.txt";
pub const NOTES_FILE: &str = "notes.txt";
pub const TASKS_FILE: &str = "tasks.txt";
pub const CONTACTS_FILE: &str = "contacts.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryConfig {
    /// Directory holding all diary files.
    pub data_dir: PathBuf,

    /// Maximum number of notes, tasks and contacts (each).
    pub capacity: usize,
}

impl DiaryConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    pub fn notes_file(&self) -> PathBuf {
        self.data_dir.join(NOTES_FILE)
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir.join(TASKS_FILE)
    }

    pub fn contacts_file(&self) -> PathBuf {
        self.data_dir.join(CONTACTS_FILE)
    }

    /// The three record files, in notes/tasks/contacts order.
    pub fn record_files(&self) -> [PathBuf; 3] {
        [self.notes_file(), self.tasks_file(), self.contacts_file()]
    }
}

impl Default for DiaryConfig {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}
