//! Actions returned by screen event handlers.

use crate::model::ProfileDraft;

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to update global state and navigate between
/// screens.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Persist a validated profile draft and report it to the caller.
    SaveProfile(ProfileDraft),
    /// Quit the application.
    Quit,
}
