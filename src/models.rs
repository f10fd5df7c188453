//! Domain records for the catalog. Books and authors are plain data holders
//! that serialize to the persisted JSON layout; the joined views at the bottom
//! are derived at read time and never written back.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EntityKind, ValidationError};

/// `local@domain.tld` with no whitespace and a single `@`.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A catalogued book. `author_id` is checked against the author collection
/// only when the book is created.
pub struct Book {
    /// Unique within the book collection. Assigned by the store as one past
    /// the largest id in use.
    pub id: i64,
    /// Title shown in the book table and detail panel. Never blank.
    pub name: String,
    /// Page count, when the user entered one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    /// Id of the author this book was created against. Persisted as
    /// `authorId`; may dangle after the author is deleted.
    #[serde(rename = "authorId")]
    pub author_id: i64,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Book {
    /// Check the fields an edit is allowed to change.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name(&self.name, EntityKind::Book)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A catalogued author. The author's books are looked up on demand.
pub struct Author {
    /// Unique within the author collection and referenced by `Book::author_id`.
    pub id: i64,
    /// Display name. Never blank.
    pub name: String,
    /// Contact address in `local@domain.tld` form. An empty string is stored
    /// as `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Author {
    /// Check the name and, when present, the email address.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_name(&self.name, EntityKind::Author)?;
        check_email(self.email.as_deref())
    }
}

/// Book fields collected from a form, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub name: String,
    pub pages: Option<u32>,
    pub author_id: i64,
}

impl BookDraft {
    pub fn new(name: impl Into<String>, author_id: i64) -> Self {
        Self {
            name: name.into(),
            pages: None,
            author_id,
        }
    }

    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = Some(pages);
        self
    }

    pub(crate) fn into_book(self, id: i64) -> Book {
        Book {
            id,
            name: self.name,
            pages: self.pages,
            author_id: self.author_id,
        }
    }
}

/// Author fields collected from a form, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDraft {
    pub name: String,
    pub email: Option<String>,
}

impl AuthorDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub(crate) fn into_author(self, id: i64) -> Author {
        Author {
            id,
            name: self.name,
            email: self.email.filter(|email| !email.is_empty()),
        }
    }
}

/// A book joined with its author, if that author still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookView {
    pub book: Book,
    pub author: Option<Author>,
}

impl BookView {
    /// Name shown wherever a book's author is displayed.
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|author| author.name.as_str())
            .unwrap_or("Author not found")
    }
}

/// An author joined with every book that references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<Book>,
}

pub(crate) fn require_name(name: &str, kind: EntityKind) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::MissingName(kind))
    } else {
        Ok(())
    }
}

/// An absent or empty email is accepted; anything else, whitespace included,
/// must look like an address.
pub(crate) fn check_email(email: Option<&str>) -> Result<(), ValidationError> {
    match email {
        Some(value) if !value.is_empty() && !is_valid_email(value) => {
            Err(ValidationError::InvalidEmail(value.to_string()))
        }
        _ => Ok(()),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
        .is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern_accepts_simple_addresses() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("jk.rowling@example.org"));
    }

    #[test]
    fn email_pattern_rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@@b.co"));
    }

    #[test]
    fn empty_email_counts_as_absent_but_whitespace_does_not() {
        assert_eq!(check_email(Some("")), Ok(()));
        assert_eq!(check_email(None), Ok(()));
        assert_eq!(
            check_email(Some("   ")),
            Err(ValidationError::InvalidEmail("   ".to_string()))
        );
        assert_eq!(
            check_email(Some("nope")),
            Err(ValidationError::InvalidEmail("nope".to_string()))
        );
    }

    #[test]
    fn book_serializes_with_persisted_field_names() {
        let book = Book {
            id: 1,
            name: "Potter".to_string(),
            pages: None,
            author_id: 1,
        };
        let text = serde_json::to_string(&book).unwrap();
        assert_eq!(text, r#"{"id":1,"name":"Potter","authorId":1}"#);
    }

    #[test]
    fn derived_fields_in_stored_text_are_ignored() {
        let text = r#"{"id":4,"name":"Emma","pages":320,"authorId":2,"author":null}"#;
        let book: Book = serde_json::from_str(text).unwrap();
        assert_eq!(book.pages, Some(320));
        assert_eq!(book.author_id, 2);
    }

    #[test]
    fn missing_author_reads_as_not_found() {
        let view = BookView {
            book: Book {
                id: 1,
                name: "Orphan".to_string(),
                pages: None,
                author_id: 9,
            },
            author: None,
        };
        assert_eq!(view.author_name(), "Author not found");
    }
}
