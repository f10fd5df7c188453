use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, Paragraph, Row, Table, TableState, Wrap,
};
use ratatui::Frame;

use crate::db::KeyValueStore;
use crate::models::{Author, Book};
use crate::prompt::UserPrompt;
use crate::store::EntityStore;

use super::forms::{AuthorField, AuthorForm, BookField, BookForm, ConfirmDelete, PendingBook};
use super::helpers::{centered_rect, or_not_provided, surface_error};
use super::screens::{CatalogScreen, DetailScreen, Focus};

/// Store type the TUI runs against: on-disk or in-memory, picked at startup.
pub type Catalog = EntityStore<Box<dyn KeyValueStore>>;

/// Header space for the application title.
const HEADER_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// Fine-grained modes layered over the catalog tables.
enum Mode {
    Normal,
    AddingBook(BookForm),
    EditingBook { id: i64, form: BookForm },
    AddingAuthor {
        form: AuthorForm,
        resume: Option<PendingBook>,
    },
    EditingAuthor { id: i64, form: AuthorForm },
    ConfirmDelete(ConfirmDelete),
    Viewing(DetailScreen),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Answers the store's confirmation with the choice already made in the
/// dialog and sends notices to the footer.
struct DialogPrompt<'a> {
    answer: bool,
    status: &'a mut Option<StatusMessage>,
}

impl UserPrompt for DialogPrompt<'_> {
    fn confirm(&mut self, message: &str) -> bool {
        tracing::debug!(answer = self.answer, "{message}");
        self.answer
    }

    fn notify(&mut self, message: &str) {
        *self.status = Some(StatusMessage {
            text: message.to_string(),
            kind: StatusKind::Error,
        });
    }
}

/// Central application state shared across the TUI.
pub struct App {
    store: Catalog,
    screen: CatalogScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: Catalog) -> Self {
        Self {
            store,
            screen: CatalogScreen::new(),
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Show a message in the footer from the first frame on, e.g. to say the
    /// session is running without persistent storage.
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.set_status(notice, StatusKind::Error);
        self
    }

    pub fn store(&self) -> &Catalog {
        &self.store
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::AddingBook(form) => self.handle_book_form(code, None, form),
            Mode::EditingBook { id, form } => self.handle_book_form(code, Some(id), form),
            Mode::AddingAuthor { form, resume } => self.handle_author_form(code, None, form, resume),
            Mode::EditingAuthor { id, form } => self.handle_author_form(code, Some(id), form, None),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
            Mode::Viewing(detail) => match code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Mode::Normal,
                _ => Mode::Viewing(detail),
            },
        };

        Ok(exit)
    }

    /// Open the author form on top of the book form so a missing author can
    /// be added without losing the book being typed.
    pub(crate) fn handle_ctrl_a(&mut self) {
        let previous = mem::replace(&mut self.mode, Mode::Normal);
        self.mode = match previous {
            Mode::AddingBook(form) => Mode::AddingAuthor {
                form: AuthorForm::default(),
                resume: Some(PendingBook::New(form)),
            },
            Mode::EditingBook { id, form } => Mode::AddingAuthor {
                form: AuthorForm::default(),
                resume: Some(PendingBook::Existing { id, form }),
            },
            other => other,
        };
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        let len = self.focused_len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Tab | KeyCode::BackTab => self.screen.toggle_focus(),
            KeyCode::Up => self.screen.move_selection(-1, len),
            KeyCode::Down => self.screen.move_selection(1, len),
            KeyCode::PageUp => self.screen.move_selection(-5, len),
            KeyCode::PageDown => self.screen.move_selection(5, len),
            KeyCode::Home => self.screen.select_first(),
            KeyCode::End => self.screen.select_last(len),
            KeyCode::Char('b') | KeyCode::Char('B') => {
                self.clear_status();
                if self.store.authors().is_empty() {
                    self.set_status(
                        "No authors yet. Press A to add one before adding books.",
                        StatusKind::Error,
                    );
                }
                return Mode::AddingBook(BookForm::default());
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                return Mode::AddingAuthor {
                    form: AuthorForm::default(),
                    resume: None,
                };
            }
            KeyCode::Char('e') | KeyCode::Char('E') => match self.screen.focus {
                Focus::Books => match self.current_book().cloned() {
                    Some(book) => {
                        self.clear_status();
                        return Mode::EditingBook {
                            id: book.id,
                            form: BookForm::from_book(&book),
                        };
                    }
                    None => self.set_status("No book selected to edit.", StatusKind::Error),
                },
                Focus::Authors => match self.current_author().cloned() {
                    Some(author) => {
                        self.clear_status();
                        return Mode::EditingAuthor {
                            id: author.id,
                            form: AuthorForm::from_author(&author),
                        };
                    }
                    None => self.set_status("No author selected to edit.", StatusKind::Error),
                },
            },
            KeyCode::Char('-') | KeyCode::Delete => match self.screen.focus {
                Focus::Books => match self.current_book() {
                    Some(book) => {
                        let confirm = ConfirmDelete::Book {
                            id: book.id,
                            name: book.name.clone(),
                        };
                        self.clear_status();
                        return Mode::ConfirmDelete(confirm);
                    }
                    None => self.set_status("No book selected to delete.", StatusKind::Error),
                },
                Focus::Authors => match self.current_author() {
                    Some(author) => {
                        let confirm = ConfirmDelete::Author {
                            id: author.id,
                            name: author.name.clone(),
                            books: self.store.books_by_author(author.id).len(),
                        };
                        self.clear_status();
                        return Mode::ConfirmDelete(confirm);
                    }
                    None => self.set_status("No author selected to delete.", StatusKind::Error),
                },
            },
            KeyCode::Enter => {
                let detail = match self.screen.focus {
                    Focus::Books => self
                        .current_book()
                        .and_then(|book| self.store.book_view(book.id))
                        .map(DetailScreen::Book),
                    Focus::Authors => self
                        .current_author()
                        .and_then(|author| self.store.author_detail(author.id))
                        .map(DetailScreen::Author),
                };
                match detail {
                    Some(detail) => return Mode::Viewing(detail),
                    None => self.set_status("Nothing selected.", StatusKind::Error),
                }
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_book_form(&mut self, code: KeyCode, id: Option<i64>, mut form: BookForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Left if form.active == BookField::Author => {
                form.cycle_author(self.store.authors(), -1)
            }
            KeyCode::Right if form.active == BookField::Author => {
                form.cycle_author(self.store.authors(), 1)
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let saved = match id {
                    Some(id) => self.save_existing_book(id, &form),
                    None => self.save_new_book(&form),
                };
                match saved {
                    Ok(()) => keep_open = false,
                    Err(err) => {
                        let message = surface_error(&err);
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        match (keep_open, id) {
            (false, _) => Mode::Normal,
            (true, Some(id)) => Mode::EditingBook { id, form },
            (true, None) => Mode::AddingBook(form),
        }
    }

    fn handle_author_form(
        &mut self,
        code: KeyCode,
        id: Option<i64>,
        mut form: AuthorForm,
        resume: Option<PendingBook>,
    ) -> Mode {
        let mut created: Option<i64> = None;
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let saved = match id {
                    Some(id) => self.save_existing_author(id, &form).map(|_| None),
                    None => self.save_new_author(&form).map(Some),
                };
                match saved {
                    Ok(new_id) => {
                        created = new_id;
                        keep_open = false;
                    }
                    Err(err) => {
                        let message = surface_error(&err);
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            return match id {
                Some(id) => Mode::EditingAuthor { id, form },
                None => Mode::AddingAuthor { form, resume },
            };
        }

        match resume {
            Some(mut pending) => {
                if created.is_some() {
                    pending.form_mut().author_id = created;
                }
                match pending {
                    PendingBook::New(form) => Mode::AddingBook(form),
                    PendingBook::Existing { id, form } => Mode::EditingBook { id, form },
                }
            }
            None => Mode::Normal,
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.perform_delete(&confirm, false);
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                if self.perform_delete(&confirm, true) {
                    Mode::Normal
                } else {
                    Mode::ConfirmDelete(confirm)
                }
            }
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    fn save_new_book(&mut self, form: &BookForm) -> Result<()> {
        let draft = form.parse_inputs()?;
        let book = self.store.add_book(draft)?;
        self.focus_book(book.id);
        self.set_status(format!("Added book \"{}\".", book.name), StatusKind::Info);
        Ok(())
    }

    fn save_existing_book(&mut self, id: i64, form: &BookForm) -> Result<()> {
        let draft = form.parse_inputs()?;
        let book = Book {
            id,
            name: draft.name,
            pages: draft.pages,
            author_id: draft.author_id,
        };
        let name = book.name.clone();
        if self.store.update_book(book)? {
            self.focus_book(id);
            self.set_status(format!("Updated book \"{name}\"."), StatusKind::Info);
        } else {
            self.set_status("Book no longer exists.", StatusKind::Error);
        }
        Ok(())
    }

    fn save_new_author(&mut self, form: &AuthorForm) -> Result<i64> {
        let draft = form.parse_inputs()?;
        let author = self.store.add_author(draft)?;
        self.focus_author(author.id);
        self.set_status(format!("Added author \"{}\".", author.name), StatusKind::Info);
        Ok(author.id)
    }

    fn save_existing_author(&mut self, id: i64, form: &AuthorForm) -> Result<()> {
        let draft = form.parse_inputs()?;
        let author = Author {
            id,
            name: draft.name,
            email: draft.email,
        };
        let name = author.name.clone();
        if self.store.update_author(author)? {
            self.focus_author(id);
            self.set_status(format!("Updated author \"{name}\"."), StatusKind::Info);
        } else {
            self.set_status("Author no longer exists.", StatusKind::Error);
        }
        Ok(())
    }

    /// Hand the dialog's answer to the store. Returns `false` when the store
    /// failed and the dialog should stay open for a retry.
    fn perform_delete(&mut self, confirm: &ConfirmDelete, answer: bool) -> bool {
        let mut prompt = DialogPrompt {
            answer,
            status: &mut self.status,
        };
        let outcome = match confirm {
            ConfirmDelete::Book { id, .. } => self
                .store
                .delete_book(*id, &mut prompt)
                .map(|removed| removed.map(|book| format!("Deleted book \"{}\".", book.name))),
            ConfirmDelete::Author { id, .. } => {
                self.store.delete_author(*id, &mut prompt).map(|removed| {
                    removed.map(|author| format!("Deleted author \"{}\".", author.name))
                })
            }
        };

        match outcome {
            Ok(Some(message)) => {
                self.screen
                    .ensure_in_bounds(self.store.books().len(), self.store.authors().len());
                self.set_status(message, StatusKind::Info);
                true
            }
            Ok(None) => true,
            Err(err) => {
                prompt.notify(&surface_error(&anyhow::Error::from(err)));
                false
            }
        }
    }

    fn focus_book(&mut self, id: i64) {
        if let Some(index) = self.store.books().iter().position(|book| book.id == id) {
            self.screen.book_selected = index;
        }
    }

    fn focus_author(&mut self, id: i64) {
        if let Some(index) = self.store.authors().iter().position(|author| author.id == id) {
            self.screen.author_selected = index;
        }
    }

    fn current_book(&self) -> Option<&Book> {
        self.store.books().get(self.screen.book_selected)
    }

    fn current_author(&self) -> Option<&Author> {
        self.store.authors().get(self.screen.author_selected)
    }

    fn focused_len(&self) -> usize {
        match self.screen.focus {
            Focus::Books => self.store.books().len(),
            Focus::Authors => self.store.authors().len(),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT.min(area.height)),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT.min(area.height)),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);

        let tables = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        self.draw_book_table(frame, tables[0]);
        self.draw_author_table(frame, tables[1]);

        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::Normal => {}
            Mode::AddingBook(form) => self.draw_book_form(frame, area, "Add Book", form),
            Mode::EditingBook { form, .. } => self.draw_book_form(frame, area, "Edit Book", form),
            Mode::AddingAuthor { form, .. } => {
                self.draw_author_form(frame, area, "Add Author", form)
            }
            Mode::EditingAuthor { form, .. } => {
                self.draw_author_form(frame, area, "Edit Author", form)
            }
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Viewing(DetailScreen::Book(view)) => {
                let lines = vec![
                    Line::from(format!("ID: {}", view.book.id)),
                    Line::from(format!("Name: {}", view.book.name)),
                    Line::from(format!("Pages: {}", or_not_provided(view.book.pages))),
                    Line::from(format!("Author ID: {}", view.book.author_id)),
                    Line::from(format!("Author: {}", view.author_name())),
                ];
                self.draw_detail(frame, area, "Book Details", lines);
            }
            Mode::Viewing(DetailScreen::Author(detail)) => {
                let mut lines = vec![
                    Line::from(format!("ID: {}", detail.author.id)),
                    Line::from(format!("Name: {}", detail.author.name)),
                    Line::from(format!(
                        "Email: {}",
                        or_not_provided(detail.author.email.as_deref())
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Books:",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                ];
                if detail.books.is_empty() {
                    lines.push(Line::from("This author has no books."));
                } else {
                    lines.extend(
                        detail
                            .books
                            .iter()
                            .map(|book| Line::from(format!("  • {}", book.name))),
                    );
                }
                self.draw_detail(frame, area, "Author Details", lines);
            }
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "Book & Author Catalog",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Organize and manage your collections.",
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, area);
    }

    fn table_block(&self, title: &'static str, focus: Focus) -> Block<'static> {
        let border_style = if self.screen.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
    }

    fn draw_book_table(&self, frame: &mut Frame, area: Rect) {
        let block = self.table_block("Books", Focus::Books);
        if self.store.books().is_empty() {
            let empty = Paragraph::new("No books yet. Press B to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let rows: Vec<Row> = self
            .store
            .books()
            .iter()
            .map(|book| {
                let author = self
                    .store
                    .author_by_id(book.author_id)
                    .map(|author| author.name.clone())
                    .unwrap_or_else(|| "Author not found".to_string());
                Row::new(vec![
                    book.id.to_string(),
                    book.name.clone(),
                    book.pages.map(|pages| pages.to_string()).unwrap_or_default(),
                    author,
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Percentage(50),
                Constraint::Length(8),
                Constraint::Percentage(40),
            ],
        )
        .header(header_row(["ID", "Name", "Pages", "Author"]))
        .block(block)
        .row_highlight_style(highlight(self.screen.focus == Focus::Books))
        .highlight_symbol("▶ ");

        let mut state = TableState::default().with_selected(Some(self.screen.book_selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_author_table(&self, frame: &mut Frame, area: Rect) {
        let block = self.table_block("Authors", Focus::Authors);
        if self.store.authors().is_empty() {
            let empty = Paragraph::new("No authors yet. Press A to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let rows: Vec<Row> = self
            .store
            .authors()
            .iter()
            .map(|author| {
                Row::new(vec![
                    author.id.to_string(),
                    author.name.clone(),
                    author.email.clone().unwrap_or_default(),
                    self.store.books_by_author(author.id).len().to_string(),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Percentage(40),
                Constraint::Percentage(45),
                Constraint::Length(6),
            ],
        )
        .header(header_row(["ID", "Name", "Email", "Books"]))
        .block(block)
        .row_highlight_style(highlight(self.screen.focus == Focus::Authors))
        .highlight_symbol("▶ ");

        let mut state = TableState::default().with_selected(Some(self.screen.author_selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let keys: &[(&str, &str)] = match &self.mode {
            Mode::Normal => &[
                ("[Tab]", " Switch table   "),
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Details   "),
                ("[B]", " Add book   "),
                ("[A]", " Add author   "),
                ("[E]", " Edit   "),
                ("[-]", " Delete   "),
                ("[Q]", " Quit"),
            ],
            Mode::AddingBook(_) | Mode::EditingBook { .. } => &[
                ("[Tab]", " Next field   "),
                ("[←→]", " Pick author   "),
                ("[Ctrl+A]", " New author   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::AddingAuthor { .. } | Mode::EditingAuthor { .. } => &[
                ("[Tab]", " Next field   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::ConfirmDelete(_) => &[("[Y]", " Delete   "), ("[N/Esc]", " Keep")],
            Mode::Viewing(_) => &[("[Esc]", " Close")],
        };

        let spans: Vec<Span<'static>> = keys
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(key.to_string(), key_style),
                    Span::raw(label.to_string()),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &BookForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let authors = self.store.authors();
        let mut lines = vec![
            form.build_line("Name", BookField::Name, authors),
            form.build_line("Pages", BookField::Pages, authors),
            form.build_line("Author", BookField::Author, authors),
            Line::from(""),
        ];
        lines.push(form_hint(form.error.as_deref()));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row) = match form.active {
            BookField::Name => ("Name: ", 0),
            BookField::Pages => ("Pages: ", 1),
            BookField::Author => return,
        };
        frame.set_cursor_position((
            inner.x + prefix.len() as u16 + form.value_len(form.active) as u16,
            inner.y + row,
        ));
    }

    fn draw_author_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &AuthorForm) {
        let popup_area = centered_rect(60, 35, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            form.build_line("Name", AuthorField::Name),
            form.build_line("Email", AuthorField::Email),
            Line::from(""),
            form_hint(form.error.as_deref()),
        ];

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row) = match form.active {
            AuthorField::Name => ("Name: ", 0),
            AuthorField::Email => ("Email: ", 1),
        };
        frame.set_cursor_position((
            inner.x + prefix.len() as u16 + form.value_len(form.active) as u16,
            inner.y + row,
        ));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![Line::from(confirm.message())];
        if let ConfirmDelete::Author { books, .. } = confirm {
            if *books > 0 {
                lines.push(Line::from(Span::styled(
                    format!("{books} book(s) will keep pointing at this author."),
                    Style::default().fg(Color::Yellow),
                )));
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Y to confirm or N / Esc to cancel.",
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'_>>) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        let items: Vec<ListItem> = lines.into_iter().map(ListItem::new).collect();
        frame.render_widget(List::new(items).block(block), popup_area);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

fn header_row(titles: [&'static str; 4]) -> Row<'static> {
    Row::new(titles).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn highlight(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    }
}

fn form_hint(error: Option<&str>) -> Line<'static> {
    match error {
        Some(error) => Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            "Enter to save • Tab to switch • Esc to cancel",
            Style::default().fg(Color::Gray),
        )),
    }
}
