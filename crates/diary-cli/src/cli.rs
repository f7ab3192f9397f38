use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use diary_core::config::DEFAULT_CAPACITY;
use diary_core::paths::{default_data_dir, DATA_DIR_ENV};
use diary_core::DiaryConfig;

use crate::render::Format;

/// Mini Digital Diary - notes, tasks and contacts in plain text files.
#[derive(Parser, Debug)]
#[command(name = "diary", version)]
pub struct Cli {
    /// Directory holding users.txt, notes.txt, tasks.txt and contacts.txt
    #[arg(long, env = DATA_DIR_ENV, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Maximum number of records per kind
    #[arg(long, env = "DIARY_CAPACITY", default_value_t = DEFAULT_CAPACITY, global = true)]
    pub capacity: usize,

    /// Username (prompted for if omitted)
    #[arg(short, long, env = "DIARY_USER", global = true)]
    pub user: Option<String>,

    /// Secret key (prompted for if omitted)
    #[arg(short, long, env = "DIARY_SECRET", hide_env_values = true, global = true)]
    pub secret: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// What to do; without a command the interactive menu starts
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn config(&self) -> DiaryConfig {
        let data_dir = self.data_dir.clone().unwrap_or_else(default_data_dir);
        DiaryConfig::new(data_dir).with_capacity(self.capacity)
    }

    pub fn format(&self) -> Format {
        if self.json {
            Format::Json
        } else {
            Format::Text
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in (registering on first use) and exit
    Login,
    /// Multi-line notes
    #[command(subcommand)]
    Notes(NotesAction),
    /// To-do tasks
    #[command(subcommand)]
    Tasks(TasksAction),
    /// Name and phone contacts
    #[command(subcommand)]
    Contacts(ContactsAction),
    /// Interactive menu
    Menu,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum NotesAction {
    /// Add a note; without TEXT, lines are read from stdin until `~`
    Add { text: Vec<String> },
    /// List notes
    List,
    /// Delete the note at a position from the last listing
    Delete { position: usize },
    /// Delete every note
    Clear(ClearArgs),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TasksAction {
    /// Add a task
    Add {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List tasks
    List,
    /// Mark a task done or not done
    Toggle { position: usize },
    /// Delete the task at a position from the last listing
    Delete { position: usize },
    /// Delete every task
    Clear(ClearArgs),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ContactsAction {
    /// Add a contact
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
    },
    /// List contacts
    List,
    /// Delete the contact at a position from the last listing
    Delete { position: usize },
    /// Delete every contact
    Clear(ClearArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}
