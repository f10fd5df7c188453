#![allow(dead_code)]

use std::cell::Cell;

use book_catalog_manager::{
    AuthorDraft, BookDraft, EntityStore, IdPolicy, KeyValueStore, MemoryStore, StorageAdapter,
    StorageError, UserPrompt,
};

/// Answers every confirmation with a fixed choice and records what was asked.
pub struct ScriptedPrompt {
    pub answer: bool,
    pub asked: Vec<String>,
    pub notices: Vec<String>,
}

impl ScriptedPrompt {
    pub fn yes() -> Self {
        Self {
            answer: true,
            asked: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn no() -> Self {
        Self {
            answer: false,
            ..Self::yes()
        }
    }
}

impl UserPrompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.answer
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

pub fn empty_store() -> EntityStore<MemoryStore> {
    EntityStore::load(StorageAdapter::new(MemoryStore::new()), IdPolicy::PreserveStored)
}

pub fn store_with_rowling() -> EntityStore<MemoryStore> {
    let mut store = empty_store();
    store.add_author(AuthorDraft::new("Rowling")).unwrap();
    store
}

/// In-memory store whose writes can be switched off to simulate a full disk
/// or a locked database. Reads keep working.
pub struct FailingStore {
    inner: MemoryStore,
    failing: Cell<bool>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            failing: Cell::new(false),
        }
    }

    pub fn fail_writes(&self) {
        self.failing.set(true);
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(StorageError::Unavailable(rusqlite::Error::InvalidQuery));
        }
        self.inner.set(key, value)
    }
}

/// One author with two books, persisted, after which every write fails.
pub fn store_with_failing_writes() -> EntityStore<FailingStore> {
    let mut store = EntityStore::load(
        StorageAdapter::new(FailingStore::new()),
        IdPolicy::PreserveStored,
    );
    store
        .add_author(AuthorDraft::new("Rowling").with_email("jk@rowling.co"))
        .unwrap();
    store.add_book(BookDraft::new("Potter", 1)).unwrap();
    store.add_book(BookDraft::new("Chamber", 1)).unwrap();
    store.storage().store().fail_writes();
    store
}
