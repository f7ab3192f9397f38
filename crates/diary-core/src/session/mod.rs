//! Diary sessions.
//!
//! A session starts with a login against the user list and then owns the
//! three record stores for the rest of the run.

mod diary;
mod login;

pub use diary::Diary;
pub use login::{DiaryError, Login};
