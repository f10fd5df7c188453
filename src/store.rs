//! The authoritative in-memory catalog. Both collections are read once when
//! the store is loaded and the affected collection is written back after
//! every successful mutation.

use crate::config::IdPolicy;
use crate::db::{KeyValueStore, StorageAdapter};
use crate::error::{CatalogError, EntityKind, OrphanedBook, StorageError, ValidationError};
use crate::models::{require_name, Author, AuthorDetail, AuthorDraft, Book, BookDraft, BookView};
use crate::prompt::UserPrompt;

/// Storage key of the book collection.
pub const BOOKS_KEY: &str = "books";
/// Storage key of the author collection.
pub const AUTHORS_KEY: &str = "authors";

pub struct EntityStore<S> {
    storage: StorageAdapter<S>,
    books: Vec<Book>,
    authors: Vec<Author>,
}

impl<S: KeyValueStore> EntityStore<S> {
    /// Read both collections. Unreadable collections start out empty, and books
    /// pointing at unknown authors are logged.
    pub fn load(storage: StorageAdapter<S>, id_policy: IdPolicy) -> Self {
        let mut books: Vec<Book> = storage.load_or_empty(BOOKS_KEY);
        let mut authors: Vec<Author> = storage.load_or_empty(AUTHORS_KEY);

        if id_policy == IdPolicy::RenumberOnLoad {
            for (index, book) in books.iter_mut().enumerate() {
                book.id = index as i64 + 1;
            }
            for (index, author) in authors.iter_mut().enumerate() {
                author.id = index as i64 + 1;
            }
        }

        tracing::info!(
            books = books.len(),
            authors = authors.len(),
            ?id_policy,
            "loaded catalog"
        );

        let store = Self {
            storage,
            books,
            authors,
        };
        for orphan in store.orphaned_books() {
            tracing::warn!(book_id = orphan.book_id, author_id = orphan.author_id, "{orphan}");
        }
        store
    }

    pub fn storage(&self) -> &StorageAdapter<S> {
        &self.storage
    }

    /// Every book in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Every author in insertion order.
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn book_by_id(&self, id: i64) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn author_by_id(&self, id: i64) -> Option<&Author> {
        self.authors.iter().find(|author| author.id == id)
    }

    /// Books whose `author_id` equals `author_id`, in insertion order.
    pub fn books_by_author(&self, author_id: i64) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|book| book.author_id == author_id)
            .collect()
    }

    /// A book together with its author, resolved now.
    pub fn book_view(&self, id: i64) -> Option<BookView> {
        let book = self.book_by_id(id)?.clone();
        let author = self.author_by_id(book.author_id).cloned();
        if author.is_none() {
            tracing::warn!(book_id = book.id, author_id = book.author_id, "book has no author");
        }
        Some(BookView { book, author })
    }

    /// An author together with the books that reference it.
    pub fn author_detail(&self, id: i64) -> Option<AuthorDetail> {
        let author = self.author_by_id(id)?.clone();
        let books = self.books_by_author(id).into_iter().cloned().collect();
        Some(AuthorDetail { author, books })
    }

    /// Books whose author reference resolves to nothing.
    pub fn orphaned_books(&self) -> Vec<OrphanedBook> {
        self.books
            .iter()
            .filter(|book| self.author_by_id(book.author_id).is_none())
            .map(|book| OrphanedBook {
                book_id: book.id,
                author_id: book.author_id,
            })
            .collect()
    }

    /// Validate and append a new book. The author must exist right now.
    pub fn add_book(&mut self, draft: BookDraft) -> Result<Book, CatalogError> {
        require_name(&draft.name, EntityKind::Book)?;
        if self.author_by_id(draft.author_id).is_none() {
            return Err(ValidationError::UnknownAuthor(draft.author_id).into());
        }

        let id = next_id(self.books.iter().map(|book| book.id))
            .ok_or(CatalogError::IdsExhausted(EntityKind::Book))?;
        let book = draft.into_book(id);
        let mut books = self.books.clone();
        books.push(book.clone());
        self.commit_books(books)?;

        tracing::info!(id = book.id, author_id = book.author_id, "added book");
        Ok(book)
    }

    /// Validate and append a new author.
    pub fn add_author(&mut self, draft: AuthorDraft) -> Result<Author, CatalogError> {
        let id = next_id(self.authors.iter().map(|author| author.id))
            .ok_or(CatalogError::IdsExhausted(EntityKind::Author))?;
        let author = draft.into_author(id);
        author.validate()?;

        let mut authors = self.authors.clone();
        authors.push(author.clone());
        self.commit_authors(authors)?;

        tracing::info!(id = author.id, "added author");
        Ok(author)
    }

    /// Replace the book with the same id. Returns `false` without writing
    /// anything when no book matches.
    pub fn update_book(&mut self, book: Book) -> Result<bool, CatalogError> {
        book.validate()?;
        let Some(index) = self.books.iter().position(|existing| existing.id == book.id) else {
            tracing::debug!(id = book.id, "no book to update");
            return Ok(false);
        };

        let mut books = self.books.clone();
        books[index] = book;
        self.commit_books(books)?;
        tracing::info!(id = self.books[index].id, "updated book");
        Ok(true)
    }

    /// Replace the author with the same id. Returns `false` without writing
    /// anything when no author matches.
    pub fn update_author(&mut self, mut author: Author) -> Result<bool, CatalogError> {
        author.email = author.email.filter(|email| !email.is_empty());
        author.validate()?;
        let Some(index) = self
            .authors
            .iter()
            .position(|existing| existing.id == author.id)
        else {
            tracing::debug!(id = author.id, "no author to update");
            return Ok(false);
        };

        let mut authors = self.authors.clone();
        authors[index] = author;
        self.commit_authors(authors)?;
        tracing::info!(id = self.authors[index].id, "updated author");
        Ok(true)
    }

    /// Remove a book once the user confirms. `None` means nothing was removed,
    /// either because no book matched or because the user declined.
    pub fn delete_book(
        &mut self,
        id: i64,
        prompt: &mut dyn UserPrompt,
    ) -> Result<Option<Book>, CatalogError> {
        let Some(index) = self.books.iter().position(|book| book.id == id) else {
            return Ok(None);
        };
        if !prompt.confirm(&format!(
            "Are you sure you want to delete the book \"{}\"?",
            self.books[index].name
        )) {
            return Ok(None);
        }

        let mut books = self.books.clone();
        let removed = books.remove(index);
        self.commit_books(books)?;
        tracing::info!(id, "deleted book");
        Ok(Some(removed))
    }

    /// Remove an author once the user confirms. Books that referenced the
    /// author are left in place.
    pub fn delete_author(
        &mut self,
        id: i64,
        prompt: &mut dyn UserPrompt,
    ) -> Result<Option<Author>, CatalogError> {
        let Some(index) = self.authors.iter().position(|author| author.id == id) else {
            return Ok(None);
        };
        if !prompt.confirm(&format!(
            "Are you sure you want to delete the author \"{}\"?",
            self.authors[index].name
        )) {
            return Ok(None);
        }

        let mut authors = self.authors.clone();
        let removed = authors.remove(index);
        self.commit_authors(authors)?;

        let orphaned = self.books_by_author(id).len();
        if orphaned > 0 {
            tracing::warn!(id, orphaned, "deleted author still referenced by books");
        } else {
            tracing::info!(id, "deleted author");
        }
        Ok(Some(removed))
    }

    fn commit_books(&mut self, books: Vec<Book>) -> Result<(), StorageError> {
        self.storage.save(BOOKS_KEY, &books)?;
        self.books = books;
        Ok(())
    }

    fn commit_authors(&mut self, authors: Vec<Author>) -> Result<(), StorageError> {
        self.storage.save(AUTHORS_KEY, &authors)?;
        self.authors = authors;
        Ok(())
    }
}

/// One past the largest id in use, so a deleted maximum is handed out again.
/// `None` once the largest id is `i64::MAX`.
fn next_id(ids: impl Iterator<Item = i64>) -> Option<i64> {
    match ids.max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}
