use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Text for an optional value in detail panels.
pub(crate) fn or_not_provided<T: ToString>(value: Option<T>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| "Not provided".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    use crate::error::{CatalogError, ValidationError};

    #[test]
    fn surfaces_innermost_cause() {
        let err = Err::<(), _>(std::io::Error::other("disk full"))
            .context("failed to save")
            .unwrap_err();
        assert_eq!(surface_error(&err), "disk full");
    }

    #[test]
    fn validation_message_reaches_the_user() {
        let err: Error = CatalogError::from(ValidationError::UnknownAuthor(7)).into();
        assert!(surface_error(&err).starts_with("Author 7 not found"));
    }

    #[test]
    fn missing_values_read_as_not_provided() {
        assert_eq!(or_not_provided(Some(12)), "12");
        assert_eq!(or_not_provided::<u32>(None), "Not provided");
    }
}
