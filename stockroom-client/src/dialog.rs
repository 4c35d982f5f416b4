/// State machine for the Add/Edit dialogs
///
/// Every dialog moves through the same states:
///
/// ```text
/// closed → open → submitting → closed          (success)
///                            → open-with-error (failure)
/// ```
///
/// There are no intermediate states. A failed submit re-opens the dialog
/// with an inline error message; there is no retry queue. Invalid
/// transitions are ignored so callers never have to guard.

/// Dialog lifecycle state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    /// Dialog is not shown
    #[default]
    Closed,

    /// Dialog is shown; `error` holds the inline message after a failed
    /// submit
    Open {
        /// Inline error from the last failed submit, if any
        error: Option<String>,
    },

    /// A submit request is in flight
    Submitting,
}

impl DialogState {
    /// Opens the dialog with a clean slate
    ///
    /// Only valid from `Closed`; opening an already-open dialog keeps its
    /// error.
    pub fn open(&mut self) {
        if matches!(self, DialogState::Closed) {
            *self = DialogState::Open { error: None };
        }
    }

    /// Dismisses the dialog
    ///
    /// Ignored while a submit is in flight; the dialog resolves to closed
    /// or re-opened when the response lands.
    pub fn close(&mut self) {
        if !matches!(self, DialogState::Submitting) {
            *self = DialogState::Closed;
        }
    }

    /// Marks the submit request as sent
    ///
    /// Only valid from `Open`.
    pub fn begin_submit(&mut self) {
        if matches!(self, DialogState::Open { .. }) {
            *self = DialogState::Submitting;
        }
    }

    /// The submit succeeded; the dialog closes
    pub fn submit_succeeded(&mut self) {
        if matches!(self, DialogState::Submitting) {
            *self = DialogState::Closed;
        }
    }

    /// The submit failed; the dialog re-opens with an inline error
    pub fn submit_failed(&mut self, message: impl Into<String>) {
        if matches!(self, DialogState::Submitting) {
            *self = DialogState::Open {
                error: Some(message.into()),
            };
        }
    }

    /// Whether the dialog is currently visible
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    /// The inline error message, if the last submit failed
    pub fn error(&self) -> Option<&str> {
        match self {
            DialogState::Open { error } => error.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_submit_closes_dialog() {
        let mut dialog = DialogState::default();

        dialog.open();
        assert!(dialog.is_open());

        dialog.begin_submit();
        assert_eq!(dialog, DialogState::Submitting);

        dialog.submit_succeeded();
        assert_eq!(dialog, DialogState::Closed);
    }

    #[test]
    fn test_failed_submit_reopens_with_error() {
        let mut dialog = DialogState::default();

        dialog.open();
        dialog.begin_submit();
        dialog.submit_failed("The name must be 1-255 characters");

        assert!(dialog.is_open());
        assert_eq!(dialog.error(), Some("The name must be 1-255 characters"));
    }

    #[test]
    fn test_reopening_after_failure_clears_error() {
        let mut dialog = DialogState::default();

        dialog.open();
        dialog.begin_submit();
        dialog.submit_failed("boom");
        dialog.close();
        dialog.open();

        assert_eq!(dialog.error(), None);
    }

    #[test]
    fn test_invalid_transitions_are_ignored() {
        let mut dialog = DialogState::default();

        // Submitting from closed does nothing
        dialog.begin_submit();
        assert_eq!(dialog, DialogState::Closed);

        // Success outside a submit does nothing
        dialog.open();
        dialog.submit_succeeded();
        assert!(dialog.is_open());

        // Close during submit is ignored
        dialog.begin_submit();
        dialog.close();
        assert_eq!(dialog, DialogState::Submitting);
    }
}
