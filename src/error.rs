//! Error types shared by the catalog loader and the progress store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request could not be sent: {0}")]
    Network(String),
    #[error("catalog request failed with status {status} {status_text}")]
    Status { status: u16, status_text: String },
    #[error("catalog request timed out after {0} ms")]
    Timeout(u32),
    #[error("catalog payload is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("catalog payload must be a JSON array")]
    NotAnArray,
}

/// Why a single catalog entry was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("entry does not match the word schema: {0}")]
    Shape(String),
    #[error("entry has an empty id")]
    EmptyId,
    #[error("entry {id} has an empty target word")]
    EmptyWord { id: String },
    #[error("entry {id} offers {letter:?}, which is not a single character")]
    NotSingleCharacter { id: String, letter: String },
    #[error("entry id {id} is already used")]
    DuplicateId { id: String },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("could not read {key}")]
    Read { key: String },
    #[error("could not write {key}")]
    Write { key: String },
    #[error("stored value for {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("value could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}
