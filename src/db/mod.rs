//! Persistence: a key/value store abstraction, its SQLite and in-memory
//! implementations, and the adapter that turns collections into stored text.

mod connection;
mod kv;
mod storage;

pub use connection::open_store;
pub use kv::{KeyValueStore, MemoryStore, SqliteStore};
pub use storage::StorageAdapter;
