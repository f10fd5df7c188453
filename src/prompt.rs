//! The interactive side of destructive or rejected actions.

/// Asks the user to confirm destructive actions and tells them when an action
/// was rejected.
pub trait UserPrompt {
    fn confirm(&mut self, message: &str) -> bool;
    /// Show a message that needs no answer. The store reports rejected input
    /// through its `Result` instead, so this is for callers that hold the
    /// prompt when an error comes back.
    fn notify(&mut self, message: &str);
}
