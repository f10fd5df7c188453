//! Error taxonomy for the catalog. Library code returns these typed errors so
//! callers can tell a rejected form apart from a broken store; the binary and
//! the TUI wrap them in `anyhow` at the edge.

use std::fmt;

use thiserror::Error;

/// Which collection a record belongs to. Used to word validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Book,
    Author,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Book => write!(f, "book"),
            EntityKind::Author => write!(f, "author"),
        }
    }
}

/// A draft or edited record was rejected before touching any collection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The {0} name is required. Please provide a valid name.")]
    MissingName(EntityKind),
    #[error("Invalid email \"{0}\". Please provide a valid email.")]
    InvalidEmail(String),
    #[error("Author {0} not found. Please select a valid author or add a new one first.")]
    UnknownAuthor(i64),
    #[error("Page count \"{0}\" must be a non-negative whole number.")]
    InvalidPages(String),
}

/// Problems reading from or writing to the key/value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable(#[from] rusqlite::Error),
    #[error("stored data under \"{key}\" is malformed")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize collection \"{key}\"")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything an entity store operation can fail with.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("No identifiers left for a new {0}.")]
    IdsExhausted(EntityKind),
}

/// A book whose `author_id` matches no known author. Detected after loading
/// and after author deletion; reported, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrphanedBook {
    pub book_id: i64,
    pub author_id: i64,
}

impl fmt::Display for OrphanedBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "book {} references missing author {}",
            self.book_id, self.author_id
        )
    }
}
