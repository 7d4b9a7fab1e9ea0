//! Capability interfaces between the orchestrator and whatever presentation
//! layer hosts the panel. The orchestrator never touches a concrete UI.

use async_trait::async_trait;

use crate::models::{JobEntry, SavedResume};

/// Blocking questions put to the user.
#[async_trait]
pub trait Prompter: Send {
    /// Asks for a line of text. `None` means the user cancelled.
    async fn ask_text(&mut self, message: &str, default: Option<&str>) -> Option<String>;

    async fn confirm(&mut self, message: &str) -> bool;

    /// Modal notice; returns once the user has seen it.
    fn alert(&mut self, message: &str);
}

/// The side panel surface: card list, loading indicator, saved-résumé selector.
pub trait PanelView: Prompter {
    /// Replaces the displayed cards with `jobs`.
    fn render(&mut self, jobs: &[JobEntry]);

    /// Removes all cards, showing nothing at all.
    fn clear(&mut self);

    /// Reads the displayed cards back, in display order, including edits.
    fn collect(&self) -> Vec<JobEntry>;

    /// `Some(text)` shows the indicator and disables the drop target;
    /// `None` hides it and re-enables uploads.
    fn set_loading(&mut self, status: Option<&str>);

    /// Refreshes the saved-résumé selector. `selected` is a storage key.
    fn show_saved(&mut self, saved: &[SavedResume], selected: Option<&str>);
}
