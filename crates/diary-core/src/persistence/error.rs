use thiserror::Error;

/// Error type for record store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO error while writing the backing file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The store already holds `capacity` records.
    #[error("{kind} storage full ({capacity} records)")]
    CapacityExceeded {
        kind: &'static str,
        capacity: usize,
    },

    /// The record can't be written without breaking the file format.
    #[error("invalid {kind}: {reason}")]
    InvalidRecord {
        kind: &'static str,
        reason: &'static str,
    },
}

impl StoreError {
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, StoreError::CapacityExceeded { .. })
    }
}
