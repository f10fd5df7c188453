// Persistence round-trips through the storage adapter and the SQLite store.

mod common;

use book_catalog_manager::{
    open_store, Author, AuthorDraft, Book, BookDraft, Config, EntityStore, IdPolicy,
    KeyValueStore, MemoryStore, StorageAdapter, StorageError, AUTHORS_KEY, BOOKS_KEY,
};

use common::ScriptedPrompt;

fn books() -> Vec<Book> {
    vec![
        Book {
            id: 3,
            name: "Emma".to_string(),
            pages: Some(474),
            author_id: 7,
        },
        Book {
            id: 8,
            name: "Persuasion".to_string(),
            pages: None,
            author_id: 7,
        },
    ]
}

#[test]
fn missing_key_loads_as_empty() {
    let adapter = StorageAdapter::new(MemoryStore::new());
    let loaded: Vec<Book> = adapter.load(BOOKS_KEY).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn save_then_load_preserves_order_and_fields() {
    let adapter = StorageAdapter::new(MemoryStore::new());
    adapter.save(BOOKS_KEY, &books()).unwrap();
    let loaded: Vec<Book> = adapter.load(BOOKS_KEY).unwrap();
    assert_eq!(loaded, books());
}

#[test]
fn malformed_text_is_a_catchable_error() {
    let adapter = StorageAdapter::new(MemoryStore::new().with_entry(BOOKS_KEY, "[{\"id\": 1,"));
    let err = adapter.load::<Book>(BOOKS_KEY).unwrap_err();
    assert!(matches!(err, StorageError::Malformed { ref key, .. } if key == BOOKS_KEY));

    let recovered: Vec<Book> = adapter.load_or_empty(BOOKS_KEY);
    assert!(recovered.is_empty());
}

#[test]
fn malformed_collection_does_not_take_down_the_other() {
    let authors = r#"[{"id":1,"name":"Austen","email":"jane@austen.uk"}]"#;
    let kv = MemoryStore::new()
        .with_entry(BOOKS_KEY, "not json")
        .with_entry(AUTHORS_KEY, authors);
    let store = EntityStore::load(StorageAdapter::new(kv), IdPolicy::PreserveStored);

    assert!(store.books().is_empty());
    assert_eq!(store.authors().len(), 1);
}

#[test]
fn renumbering_reassigns_ids_by_position_per_collection() {
    let authors = vec![
        Author {
            id: 7,
            name: "Austen".to_string(),
            email: None,
        },
        Author {
            id: 2,
            name: "Rowling".to_string(),
            email: None,
        },
    ];
    let adapter = StorageAdapter::new(MemoryStore::new());
    adapter.save(BOOKS_KEY, &books()).unwrap();
    adapter.save(AUTHORS_KEY, &authors).unwrap();

    let store = EntityStore::load(adapter, IdPolicy::RenumberOnLoad);

    let book_ids: Vec<i64> = store.books().iter().map(|book| book.id).collect();
    let author_ids: Vec<i64> = store.authors().iter().map(|author| author.id).collect();
    assert_eq!(book_ids, vec![1, 2]);
    assert_eq!(author_ids, vec![1, 2]);

    // Content other than ids is untouched, including the stale references.
    assert_eq!(store.books()[0].name, "Emma");
    assert_eq!(store.books()[0].author_id, 7);
    assert_eq!(store.authors()[0].name, "Austen");
    assert_eq!(store.orphaned_books().len(), 2);
}

#[test]
fn preserving_ids_keeps_references_intact() {
    let authors = vec![Author {
        id: 7,
        name: "Austen".to_string(),
        email: None,
    }];
    let adapter = StorageAdapter::new(MemoryStore::new());
    adapter.save(BOOKS_KEY, &books()).unwrap();
    adapter.save(AUTHORS_KEY, &authors).unwrap();

    let mut store = EntityStore::load(adapter, IdPolicy::PreserveStored);
    assert_eq!(store.books(), books().as_slice());
    assert!(store.orphaned_books().is_empty());
    assert_eq!(store.books_by_author(7).len(), 2);

    let next = store.add_book(BookDraft::new("Sanditon", 7)).unwrap();
    assert_eq!(next.id, 9);
}

#[test]
fn catalog_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::for_dir(dir.path());

    {
        let kv = open_store(&config).unwrap();
        let mut store = EntityStore::load(StorageAdapter::new(kv), config.id_policy);
        store
            .add_author(AuthorDraft::new("Rowling").with_email("jk@rowling.co"))
            .unwrap();
        store
            .add_book(BookDraft::new("Potter", 1).with_pages(223))
            .unwrap();
        store.add_book(BookDraft::new("Chamber", 1)).unwrap();
        store.delete_book(2, &mut ScriptedPrompt::yes()).unwrap();
    }

    let kv = open_store(&config).unwrap();
    let store = EntityStore::load(StorageAdapter::new(kv), config.id_policy);
    assert_eq!(store.authors().len(), 1);
    assert_eq!(store.authors()[0].email.as_deref(), Some("jk@rowling.co"));
    assert_eq!(
        store.books(),
        &[Book {
            id: 1,
            name: "Potter".to_string(),
            pages: Some(223),
            author_id: 1,
        }]
    );
}

#[test]
fn reopening_under_renumber_policy_compacts_ids() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::for_dir(dir.path()).with_id_policy(IdPolicy::RenumberOnLoad);
    assert_eq!(config.id_policy, IdPolicy::RenumberOnLoad);

    {
        let kv = open_store(&config).unwrap();
        let mut store = EntityStore::load(StorageAdapter::new(kv), config.id_policy);
        store.add_author(AuthorDraft::new("Austen")).unwrap();
        for name in ["Emma", "Persuasion", "Sanditon"] {
            store.add_book(BookDraft::new(name, 1)).unwrap();
        }
        store.delete_book(1, &mut ScriptedPrompt::yes()).unwrap();
        let ids: Vec<i64> = store.books().iter().map(|book| book.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    let kv = open_store(&config).unwrap();
    let store = EntityStore::load(StorageAdapter::new(kv), config.id_policy);
    let ids: Vec<i64> = store.books().iter().map(|book| book.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(store.books()[0].name, "Persuasion");
    assert_eq!(store.books()[1].author_id, 1);
}

#[test]
fn sqlite_store_overwrites_existing_keys() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::for_dir(dir.path().join("nested"));
    let kv = open_store(&config).unwrap();

    assert_eq!(kv.get("books").unwrap(), None);
    kv.set("books", "[]").unwrap();
    kv.set("books", "[1]").unwrap();
    assert_eq!(kv.get("books").unwrap().as_deref(), Some("[1]"));
    assert!(config.db_path.exists());
}

#[test]
fn persisted_text_uses_the_stored_field_names() {
    let adapter = StorageAdapter::new(MemoryStore::new());
    adapter.save(BOOKS_KEY, &books()[1..]).unwrap();
    assert_eq!(
        adapter.store().get(BOOKS_KEY).unwrap().as_deref(),
        Some(r#"[{"id":8,"name":"Persuasion","authorId":7}]"#)
    );
}
