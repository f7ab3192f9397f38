//! Login and registration.
//!
//! Records are not kept per user. Registering a new user wipes the shared
//! notes, tasks and contacts files so the newcomer starts from an empty
//! diary; returning users get whatever is on disk.

use std::fs::{self, File};

use log::{info, warn};
use thiserror::Error;

use super::diary::Diary;
use crate::config::DiaryConfig;
use crate::persistence::{is_valid_token, AuthOutcome, CredentialStore, StoreError};

#[derive(Error, Debug)]
pub enum DiaryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid {field}: must be non-empty and contain no whitespace")]
    InvalidCredential { field: &'static str },

    #[error("User already registered: {0}")]
    AlreadyRegistered(String),
}

/// Result of [`Diary::login`].
#[derive(Debug)]
pub enum Login {
    /// First login for this username: the user was registered and the
    /// data files were reset.
    Registered(Diary),
    /// Known user with the right secret.
    Welcome(Diary),
    /// Known user, wrong secret. No stores were opened.
    Rejected,
}

impl Diary {
    /// Check a username/secret pair against the user list on disk.
    pub fn authenticate(
        config: &DiaryConfig,
        username: &str,
        secret: &str,
    ) -> Result<AuthOutcome, DiaryError> {
        let users = CredentialStore::load(&config.users_file())?;
        Ok(users.authenticate(username, secret))
    }

    /// Add a new user and reset the shared record files.
    ///
    /// # Errors
    ///
    /// - `InvalidCredential` if either value is empty or contains whitespace
    /// - `AlreadyRegistered` if the username is taken
    /// - `Io` if the user list or a record file can't be written
    pub fn register_new_user(
        config: &DiaryConfig,
        username: &str,
        secret: &str,
    ) -> Result<(), DiaryError> {
        if !is_valid_token(username) {
            return Err(DiaryError::InvalidCredential { field: "username" });
        }
        if !is_valid_token(secret) {
            return Err(DiaryError::InvalidCredential { field: "secret" });
        }

        let users_file = config.users_file();
        let mut users = CredentialStore::load(&users_file)?;
        if users.contains(username) {
            return Err(DiaryError::AlreadyRegistered(username.to_string()));
        }

        // The user is only saved once the record files are empty.
        fs::create_dir_all(config.data_dir())?;
        for path in config.record_files() {
            File::create(&path)?;
        }

        users.insert(username, secret);
        users.save(&users_file)?;

        info!("Registered new user {username}, record files reset");
        Ok(())
    }

    /// Authenticate, registering unknown users, and open the diary.
    pub fn login(
        config: &DiaryConfig,
        username: &str,
        secret: &str,
    ) -> Result<Login, DiaryError> {
        match Self::authenticate(config, username, secret)? {
            AuthOutcome::NewUser => {
                Self::register_new_user(config, username, secret)?;
                Ok(Login::Registered(Self::for_user(config, username)))
            }
            AuthOutcome::Accepted => {
                info!("User {username} logged in");
                Ok(Login::Welcome(Self::for_user(config, username)))
            }
            AuthOutcome::Rejected => {
                warn!("Rejected login for {username}");
                Ok(Login::Rejected)
            }
        }
    }
}
