//! Ratatui front-end: two catalog tables, modal forms for creating and
//! editing records, a delete confirmation dialog, and read-only detail panels.
//! All authoritative state stays in the entity store; the UI only keeps
//! selection and the currently open modal.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::{App, Catalog};
pub use terminal::run_app;
