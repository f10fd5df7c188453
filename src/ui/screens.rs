use crate::models::{AuthorDetail, BookView};

/// Which table currently receives navigation keys.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Focus {
    Books,
    Authors,
}

/// Selection state for the two catalog tables.
pub(crate) struct CatalogScreen {
    pub(crate) focus: Focus,
    pub(crate) book_selected: usize,
    pub(crate) author_selected: usize,
}

impl CatalogScreen {
    pub(crate) fn new() -> Self {
        Self {
            focus: Focus::Books,
            book_selected: 0,
            author_selected: 0,
        }
    }

    pub(crate) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Books => Focus::Authors,
            Focus::Authors => Focus::Books,
        };
    }

    /// Move within the focused table, clamped to `len` rows.
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            return;
        }
        let selected = self.selected_mut();
        let new = (*selected as isize + offset).clamp(0, len as isize - 1);
        *selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        *self.selected_mut() = 0;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        *self.selected_mut() = len.saturating_sub(1);
    }

    /// Keep both selections inside their tables after rows disappear.
    pub(crate) fn ensure_in_bounds(&mut self, books: usize, authors: usize) {
        self.book_selected = self.book_selected.min(books.saturating_sub(1));
        self.author_selected = self.author_selected.min(authors.saturating_sub(1));
    }

    fn selected_mut(&mut self) -> &mut usize {
        match self.focus {
            Focus::Books => &mut self.book_selected,
            Focus::Authors => &mut self.author_selected,
        }
    }
}

/// Read-only detail panels opened with Enter.
pub(crate) enum DetailScreen {
    Book(BookView),
    Author(AuthorDetail),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_clamps_to_table() {
        let mut screen = CatalogScreen::new();
        screen.move_selection(5, 3);
        assert_eq!(screen.book_selected, 2);
        screen.move_selection(-10, 3);
        assert_eq!(screen.book_selected, 0);
    }

    #[test]
    fn each_table_keeps_its_own_selection() {
        let mut screen = CatalogScreen::new();
        screen.move_selection(1, 4);
        screen.toggle_focus();
        screen.select_last(3);
        assert_eq!(screen.book_selected, 1);
        assert_eq!(screen.author_selected, 2);
    }

    #[test]
    fn shrinking_tables_pull_selection_back() {
        let mut screen = CatalogScreen::new();
        screen.book_selected = 4;
        screen.author_selected = 2;
        screen.ensure_in_bounds(2, 0);
        assert_eq!(screen.book_selected, 1);
        assert_eq!(screen.author_selected, 0);
    }
}
