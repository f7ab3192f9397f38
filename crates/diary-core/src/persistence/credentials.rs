//! Credential persistence.
//!
//! # Overview
//!
//! The user list maps each username to a shared secret. Both are stored and
//! compared as plain text; the file is meant for a single local user, not
//! as a security boundary.
//!
//! # File Format
//!
//! Stored as `users.txt` in the data directory. The reader takes
//! whitespace-separated tokens two at a time, so pairs do not have to be one
//! per line:
//!
//! ```text
//! alice s3cret
//! bob hunter2
//! ```
//!
//! A later duplicate username replaces the earlier secret. A trailing token
//! without a partner is ignored.
//!
//! # Usage
//!
//! ```ignore
//! let mut users = CredentialStore::load(&path)?;
//! match users.authenticate("alice", "s3cret") {
//!     AuthOutcome::NewUser => {
//!         users.insert("alice", "s3cret");
//!         users.save(&path)?;
//!     }
//!     AuthOutcome::Accepted => { /* open the diary */ }
//!     AuthOutcome::Rejected => { /* deny access */ }
//! }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::types::{AuthOutcome, Credential};

/// The user list, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialStore {
    credentials: Vec<Credential>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the user list from disk.
    ///
    /// # Returns
    ///
    /// The parsed user list, or an empty one if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but can't be read.
    pub fn load(path: &Path) -> Result<Self, std::io::Error> {
        match fs::read(path) {
            Ok(bytes) => Ok(Self::parse(&String::from_utf8_lossy(&bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e),
        }
    }

    /// Parse `username secret` token pairs.
    pub fn parse(text: &str) -> Self {
        let mut store = Self::new();
        let mut tokens = text.split_whitespace();
        while let (Some(username), Some(secret)) = (tokens.next(), tokens.next()) {
            store.insert(username, secret);
        }
        store
    }

    /// Save the user list, one pair per line.
    ///
    /// Writes to a temp file first and renames it over `path`.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut temp_name = path.as_os_str().to_os_string();
        temp_name.push(".tmp");
        let temp_path = Path::new(&temp_name);

        fs::write(temp_path, self.to_text())?;
        fs::rename(temp_path, path)?;

        Ok(())
    }

    /// The file body written by [`CredentialStore::save`].
    pub fn to_text(&self) -> String {
        self.credentials
            .iter()
            .map(|c| format!("{} {}\n", c.username, c.secret))
            .collect()
    }

    /// Check a username/secret pair.
    pub fn authenticate(&self, username: &str, secret: &str) -> AuthOutcome {
        match self.get(username) {
            None => AuthOutcome::NewUser,
            Some(stored) if stored == secret => AuthOutcome::Accepted,
            Some(_) => AuthOutcome::Rejected,
        }
    }

    /// Insert a user, or replace the secret of an existing one in place.
    pub fn insert(&mut self, username: impl Into<String>, secret: impl Into<String>) {
        let username = username.into();
        let secret = secret.into();

        match self.credentials.iter_mut().find(|c| c.username == username) {
            Some(existing) => existing.secret = secret,
            None => self.credentials.push(Credential { username, secret }),
        }
    }

    /// The stored secret for `username`.
    pub fn get(&self, username: &str) -> Option<&str> {
        self.credentials
            .iter()
            .find(|c| c.username == username)
            .map(|c| c.secret.as_str())
    }

    pub fn contains(&self, username: &str) -> bool {
        self.get(username).is_some()
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.credentials.iter().map(|c| c.username.as_str())
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

/// True if `value` can be stored as a username or secret.
///
/// The file is whitespace-delimited, so values must be non-empty and free
/// of whitespace to read back as a single token.
pub fn is_valid_token(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_whitespace)
}

// ============================================================================
// TESTS
// ============================================================================
