//! The open diary: one store per record kind.

use log::info;

use crate::config::DiaryConfig;
use crate::persistence::{ContactStore, LoadReport, NoteStore, TaskStore};

/// Notes, tasks and contacts loaded for the current session.
///
/// Constructed once at session start and dropped at session end. Every
/// store is loaded eagerly; mutations flush to disk immediately.
#[derive(Debug)]
pub struct Diary {
    username: Option<String>,
    notes: NoteStore,
    tasks: TaskStore,
    contacts: ContactStore,
}

impl Diary {
    /// Load all three stores from the configured data directory.
    pub fn open(config: &DiaryConfig) -> Self {
        let mut diary = Self {
            username: None,
            notes: NoteStore::new(config.notes_file(), config.capacity),
            tasks: TaskStore::new(config.tasks_file(), config.capacity),
            contacts: ContactStore::new(config.contacts_file(), config.capacity),
        };
        let reports = diary.reload();
        info!(
            "Opened diary in {}: {} notes, {} tasks, {} contacts",
            config.data_dir().display(),
            reports[0].loaded,
            reports[1].loaded,
            reports[2].loaded
        );
        diary
    }

    pub(crate) fn for_user(config: &DiaryConfig, username: &str) -> Self {
        let mut diary = Self::open(config);
        diary.username = Some(username.to_string());
        diary
    }

    /// Reload every store from disk, in notes/tasks/contacts order.
    pub fn reload(&mut self) -> [LoadReport; 3] {
        [
            self.notes.load_all(),
            self.tasks.load_all(),
            self.contacts.load_all(),
        ]
    }

    /// The logged-in user, if the diary was opened through a login.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NoteStore {
        &mut self.notes
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskStore {
        &mut self.tasks
    }

    pub fn contacts(&self) -> &ContactStore {
        &self.contacts
    }

    pub fn contacts_mut(&mut self) -> &mut ContactStore {
        &mut self.contacts
    }
}
