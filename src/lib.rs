//! Core library surface for the Book Catalog Manager TUI application.
//!
//! The domain records, the entity store that keeps books and authors
//! consistent, and the key/value persistence behind it are usable without the
//! terminal front-end; the `bin` target wires them to the `ui` module.
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod prompt;
pub mod store;
pub mod ui;

pub use config::{Config, IdPolicy};
pub use db::{open_store, KeyValueStore, MemoryStore, SqliteStore, StorageAdapter};
pub use error::{CatalogError, EntityKind, OrphanedBook, StorageError, ValidationError};
pub use models::{Author, AuthorDetail, AuthorDraft, Book, BookDraft, BookView};
pub use prompt::UserPrompt;
pub use store::{EntityStore, AUTHORS_KEY, BOOKS_KEY};

/// The interactive application entry point and state container.
pub use ui::{run_app, App, Catalog};
