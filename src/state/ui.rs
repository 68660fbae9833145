//! Local UI chrome state.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Presentation state shared across the dashboard chrome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    /// Whether the dark theme is active.
    pub dark_mode: bool,
}
