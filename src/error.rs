//! Error taxonomy shared by every table operation.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// No entry in the target chain carries this key (including an empty bucket).
    #[error("key {0:?} not found")]
    KeyNotFound(String),
    /// The key is already present in the target chain.
    #[error("key {0:?} already exists")]
    KeyAlreadyExists(String),
    #[error("invalid capacity {0}: a table needs at least one bucket")]
    InvalidCapacity(usize),
    /// A user-supplied hash function broke the `0 <= index < capacity` contract.
    #[error("hash of {key:?} produced bucket {index}, outside 0..{capacity}")]
    HashOutOfRange {
        key: String,
        index: usize,
        capacity: usize,
    },
    #[error("bucket {index} is outside 0..{capacity}")]
    BucketOutOfRange { index: usize, capacity: usize },
}
