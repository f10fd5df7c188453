use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::error::{EntityKind, ValidationError};
use crate::models::{Author, AuthorDraft, Book, BookDraft};

/// Internal representation of the book form fields.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) name: String,
    pub(crate) pages: String,
    pub(crate) author_id: Option<i64>,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Fields available within the book form.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum BookField {
    #[default]
    Name,
    Pages,
    Author,
}

impl BookForm {
    /// Populate the form from an existing book when editing.
    pub(crate) fn from_book(book: &Book) -> Self {
        Self {
            name: book.name.clone(),
            pages: book.pages.map(|pages| pages.to_string()).unwrap_or_default(),
            author_id: Some(book.author_id),
            active: BookField::Name,
            error: None,
        }
    }

    /// Move focus forward (Name → Pages → Author).
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            BookField::Name => BookField::Pages,
            BookField::Pages => BookField::Author,
            BookField::Author => BookField::Name,
        };
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            BookField::Name => BookField::Author,
            BookField::Pages => BookField::Name,
            BookField::Author => BookField::Pages,
        };
    }

    /// Append a character to the active field. The page count only takes
    /// digits and the author picker takes no text at all.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            BookField::Name if !ch.is_control() => {
                self.name.push(ch);
                true
            }
            BookField::Pages if ch.is_ascii_digit() => {
                self.pages.push(ch);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            BookField::Name => {
                self.name.pop();
            }
            BookField::Pages => {
                self.pages.pop();
            }
            BookField::Author => self.author_id = None,
        }
    }

    /// Step through the author list. Stepping past either end lands on the
    /// "no author" placeholder.
    pub(crate) fn cycle_author(&mut self, authors: &[Author], step: isize) {
        if authors.is_empty() {
            self.author_id = None;
            return;
        }
        // Slot 0 is the placeholder, slots 1..=len are authors.
        let slots = authors.len() as isize + 1;
        let current = self
            .author_id
            .and_then(|id| authors.iter().position(|author| author.id == id))
            .map_or(0, |index| index as isize + 1);
        let next = (current + step).rem_euclid(slots);
        self.author_id = if next == 0 {
            None
        } else {
            Some(authors[next as usize - 1].id)
        };
    }

    /// Validate the inputs and return a draft ready for the store. Whether the
    /// chosen author exists is left to the store.
    pub(crate) fn parse_inputs(&self) -> Result<BookDraft> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName(EntityKind::Book).into());
        }
        let pages_raw = self.pages.trim();
        let pages = if pages_raw.is_empty() {
            None
        } else {
            Some(
                pages_raw
                    .parse::<u32>()
                    .map_err(|_| ValidationError::InvalidPages(pages_raw.to_string()))?,
            )
        };
        let author_id = self
            .author_id
            .ok_or_else(|| anyhow!("Please select a valid author."))?;
        Ok(BookDraft {
            name: name.to_string(),
            pages,
            author_id,
        })
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(
        &self,
        field_name: &str,
        field: BookField,
        authors: &[Author],
    ) -> Line<'static> {
        let is_active = self.active == field;
        let (display, empty) = match field {
            BookField::Name => placeholder(&self.name, "<required>"),
            BookField::Pages => placeholder(&self.pages, "<optional>"),
            BookField::Author => match self.author_id {
                Some(id) => match authors.iter().find(|author| author.id == id) {
                    Some(author) => (format!("◀ {} ▶", author.name), false),
                    None => (format!("◀ unknown author {id} ▶"), false),
                },
                None => ("◀ Select an author ▶".to_string(), true),
            },
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, field_style(is_active, empty)),
        ])
    }

    pub(crate) fn value_len(&self, field: BookField) -> usize {
        match field {
            BookField::Name => self.name.chars().count(),
            BookField::Pages => self.pages.chars().count(),
            BookField::Author => 0,
        }
    }
}

/// Form state for author creation/editing.
#[derive(Default, Clone)]
pub(crate) struct AuthorForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) active: AuthorField,
    pub(crate) error: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum AuthorField {
    #[default]
    Name,
    Email,
}

impl AuthorForm {
    pub(crate) fn from_author(author: &Author) -> Self {
        Self {
            name: author.name.clone(),
            email: author.email.clone().unwrap_or_default(),
            active: AuthorField::Name,
            error: None,
        }
    }

    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            AuthorField::Name => AuthorField::Email,
            AuthorField::Email => AuthorField::Name,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            AuthorField::Name => self.name.push(ch),
            AuthorField::Email => self.email.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            AuthorField::Name => {
                self.name.pop();
            }
            AuthorField::Email => {
                self.email.pop();
            }
        }
    }

    /// Trim the inputs into a draft. Email format is checked by the store.
    pub(crate) fn parse_inputs(&self) -> Result<AuthorDraft> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName(EntityKind::Author).into());
        }
        let email = self.email.trim();
        let draft = AuthorDraft::new(name);
        Ok(if email.is_empty() {
            draft
        } else {
            draft.with_email(email)
        })
    }

    pub(crate) fn build_line(&self, field_name: &str, field: AuthorField) -> Line<'static> {
        let (display, empty) = match field {
            AuthorField::Name => placeholder(&self.name, "<required>"),
            AuthorField::Email => placeholder(&self.email, "<optional>"),
        };
        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, field_style(self.active == field, empty)),
        ])
    }

    pub(crate) fn value_len(&self, field: AuthorField) -> usize {
        match field {
            AuthorField::Name => self.name.chars().count(),
            AuthorField::Email => self.email.chars().count(),
        }
    }
}

/// A book form set aside while the author form is open on top of it.
#[derive(Clone)]
pub(crate) enum PendingBook {
    New(BookForm),
    Existing { id: i64, form: BookForm },
}

impl PendingBook {
    pub(crate) fn form_mut(&mut self) -> &mut BookForm {
        match self {
            PendingBook::New(form) => form,
            PendingBook::Existing { form, .. } => form,
        }
    }
}

/// Which record the delete dialog is about.
#[derive(Clone)]
pub(crate) enum ConfirmDelete {
    Book { id: i64, name: String },
    Author { id: i64, name: String, books: usize },
}

impl ConfirmDelete {
    pub(crate) fn message(&self) -> String {
        match self {
            ConfirmDelete::Book { name, .. } => {
                format!("Are you sure you want to delete the book \"{name}\"?")
            }
            ConfirmDelete::Author { name, .. } => {
                format!("Are you sure you want to delete the author \"{name}\"?")
            }
        }
    }
}

fn placeholder(value: &str, empty_text: &str) -> (String, bool) {
    if value.is_empty() {
        (empty_text.to_string(), true)
    } else {
        (value.to_string(), false)
    }
}

fn field_style(is_active: bool, empty: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Yellow)
    } else if empty {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authors() -> Vec<Author> {
        vec![
            Author {
                id: 1,
                name: "Rowling".to_string(),
                email: None,
            },
            Author {
                id: 4,
                name: "Austen".to_string(),
                email: Some("jane@austen.uk".to_string()),
            },
        ]
    }

    #[test]
    fn book_form_requires_a_name() {
        let form = BookForm {
            name: "   ".to_string(),
            author_id: Some(1),
            ..BookForm::default()
        };
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::MissingName(EntityKind::Book))
        );
    }

    #[test]
    fn book_form_requires_an_author() {
        let form = BookForm {
            name: "Potter".to_string(),
            ..BookForm::default()
        };
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn blank_pages_parse_as_absent() {
        let form = BookForm {
            name: " Potter ".to_string(),
            author_id: Some(1),
            ..BookForm::default()
        };
        let draft = form.parse_inputs().unwrap();
        assert_eq!(draft, BookDraft::new("Potter", 1));

        let form = BookForm {
            pages: "320".to_string(),
            ..form
        };
        assert_eq!(form.parse_inputs().unwrap().pages, Some(320));
    }

    #[test]
    fn pages_field_only_accepts_digits() {
        let mut form = BookForm::default();
        form.next_field();
        assert!(form.push_char('3'));
        assert!(!form.push_char('-'));
        assert!(!form.push_char('x'));
        assert_eq!(form.pages, "3");
    }

    #[test]
    fn author_picker_wraps_through_placeholder() {
        let authors = authors();
        let mut form = BookForm::default();
        form.cycle_author(&authors, 1);
        assert_eq!(form.author_id, Some(1));
        form.cycle_author(&authors, 1);
        assert_eq!(form.author_id, Some(4));
        form.cycle_author(&authors, 1);
        assert_eq!(form.author_id, None);
        form.cycle_author(&authors, -1);
        assert_eq!(form.author_id, Some(4));
    }

    #[test]
    fn author_form_drops_blank_email() {
        let form = AuthorForm {
            name: "Austen".to_string(),
            email: "  ".to_string(),
            ..AuthorForm::default()
        };
        assert_eq!(form.parse_inputs().unwrap(), AuthorDraft::new("Austen"));
    }

    #[test]
    fn editing_prefills_from_record() {
        let form = AuthorForm::from_author(&authors()[1]);
        assert_eq!(form.email, "jane@austen.uk");

        let book = Book {
            id: 2,
            name: "Emma".to_string(),
            pages: Some(474),
            author_id: 4,
        };
        let form = BookForm::from_book(&book);
        assert_eq!(form.pages, "474");
        assert_eq!(form.author_id, Some(4));
    }
}
