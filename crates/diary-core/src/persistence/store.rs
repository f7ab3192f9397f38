//! Fixed-capacity record stores backed by a single text file.
//!
//! # Overview
//!
//! A [`RecordStore`] mirrors one data file in memory. It is rebuilt from the
//! file by [`RecordStore::load_all`] and flushed back after every mutation:
//!
//! - **Add** appends the encoded record to the end of the file
//! - **Delete / toggle / clear** rewrite the whole file, since positional
//!   edits cannot be expressed as an append
//!
//! # Positions
//!
//! Records have no IDs. Delete and update take a 1-based position into the
//! current sequence. A position outside `1..=len` is not an error, the call
//! is a no-op that returns [`Outcome::Cancelled`].
//!
//! # Atomic Rewrite
//!
//! Rewrites go to `<file>.tmp` first and are renamed over the data file.
//! Appends write to the data file directly. Either way, memory only changes
//! once the write has succeeded, and a record whose fields would break the
//! file format is rejected with [`StoreError::InvalidRecord`].

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;

use super::codec::{decode_all, encode_all, TextRecord};
use super::error::StoreError;

/// Why a store operation made no change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CancelReason {
    /// The position was outside the current listing.
    InvalidSelection,
    /// The caller did not confirm a destructive operation.
    Declined,
}

/// Result of an operation that may be cancelled without being an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Done(T),
    Cancelled(CancelReason),
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled(_))
    }

    /// The value of a completed operation.
    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            Outcome::Cancelled(_) => None,
        }
    }
}

/// Summary of a [`RecordStore::load_all`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    /// Records now held in memory.
    pub loaded: usize,
    /// Malformed lines that were ignored.
    pub skipped: usize,
    /// True if the file held more records than the store's capacity.
    pub truncated: bool,
}

/// An ordered, capacity-bounded collection of records mirrored in a file.
#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    path: PathBuf,
    capacity: usize,
    records: Vec<R>,
}

impl<R: TextRecord> RecordStore<R> {
    /// Create an empty store without touching the file.
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
            records: Vec::new(),
        }
    }

    /// Create a store and load its records from `path`.
    pub fn open(path: impl Into<PathBuf>, capacity: usize) -> Self {
        let mut store = Self::new(path, capacity);
        store.load_all();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    /// All records in listing order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// The record at a 1-based position.
    pub fn get(&self, position: usize) -> Option<&R> {
        self.index_of(position).map(|index| &self.records[index])
    }

    /// Replace the in-memory records with the contents of the file.
    ///
    /// A missing or unreadable file loads as an empty store. Loading stops
    /// once `capacity` records have been read.
    pub fn load_all(&mut self) -> LoadReport {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    warn!("Failed to read {}: {e}", self.path.display());
                }
                self.records.clear();
                return LoadReport::default();
            }
        };

        let text = String::from_utf8_lossy(&bytes);
        let decoded = decode_all::<R>(&text, self.capacity);
        if decoded.truncated {
            warn!(
                "{} holds more than {} {} records, ignoring the rest",
                self.path.display(),
                self.capacity,
                R::KIND
            );
        }

        self.records = decoded.records;
        debug!(
            "Loaded {} {} records from {}",
            self.records.len(),
            R::KIND,
            self.path.display()
        );

        LoadReport {
            loaded: self.records.len(),
            skipped: decoded.skipped,
            truncated: decoded.truncated,
        }
    }

    /// Add a record to the end of the store and the file.
    ///
    /// Returns the new record's 1-based position.
    pub fn append(&mut self, record: R) -> Result<usize, StoreError> {
        if self.is_full() {
            return Err(StoreError::CapacityExceeded {
                kind: R::KIND,
                capacity: self.capacity,
            });
        }
        Self::check(&record)?;

        self.ensure_parent_dir()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(record.encode().as_bytes())?;

        self.records.push(record);
        debug!("Appended {} #{}", R::KIND, self.records.len());
        Ok(self.records.len())
    }

    /// Overwrite the file with every record currently in memory.
    pub fn rewrite_all(&self) -> Result<(), StoreError> {
        self.ensure_parent_dir()?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, encode_all(&self.records))?;
        fs::rename(&temp_path, &self.path)?;

        debug!(
            "Rewrote {} with {} {} records",
            self.path.display(),
            self.records.len(),
            R::KIND
        );
        Ok(())
    }

    /// Remove the record at a 1-based position, keeping the order of the rest.
    pub fn delete_at(&mut self, position: usize) -> Result<Outcome<R>, StoreError> {
        let Some(index) = self.index_of(position) else {
            return Ok(Outcome::Cancelled(CancelReason::InvalidSelection));
        };

        let removed = self.records.remove(index);
        if let Err(e) = self.rewrite_all() {
            self.records.insert(index, removed);
            return Err(e);
        }
        Ok(Outcome::Done(removed))
    }

    /// Remove every record, only if `confirmed`.
    ///
    /// Returns how many records were removed.
    pub fn delete_all(&mut self, confirmed: bool) -> Result<Outcome<usize>, StoreError> {
        if !confirmed {
            return Ok(Outcome::Cancelled(CancelReason::Declined));
        }

        let previous = std::mem::take(&mut self.records);
        if let Err(e) = self.rewrite_all() {
            self.records = previous;
            return Err(e);
        }
        let removed = previous.len();
        log::info!("Deleted all {removed} {} records", R::KIND);
        Ok(Outcome::Done(removed))
    }

    /// Apply `edit` to the record at a 1-based position and rewrite the file.
    ///
    /// The record is only replaced in memory once the file has been written.
    pub(crate) fn update_at<T>(
        &mut self,
        position: usize,
        edit: impl FnOnce(&mut R) -> T,
    ) -> Result<Outcome<T>, StoreError>
    where
        R: Clone,
    {
        let Some(index) = self.index_of(position) else {
            return Ok(Outcome::Cancelled(CancelReason::InvalidSelection));
        };

        let mut updated = self.records[index].clone();
        let value = edit(&mut updated);
        Self::check(&updated)?;

        let previous = std::mem::replace(&mut self.records[index], updated);
        if let Err(e) = self.rewrite_all() {
            self.records[index] = previous;
            return Err(e);
        }
        Ok(Outcome::Done(value))
    }

    fn check(record: &R) -> Result<(), StoreError> {
        record.validate().map_err(|reason| StoreError::InvalidRecord {
            kind: R::KIND,
            reason,
        })
    }

    fn index_of(&self, position: usize) -> Option<usize> {
        position
            .checked_sub(1)
            .filter(|index| *index < self.records.len())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn ensure_parent_dir(&self) -> Result<(), std::io::Error> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
