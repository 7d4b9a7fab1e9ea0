use crate::models::JobEntry;

/// Where the upload pipeline currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Idle,
    Extracting,
    Submitting,
    Rendered,
    Failed,
}

impl PanelState {
    /// A new upload may start only from a resting state.
    pub fn accepts_upload(self) -> bool {
        matches!(self, PanelState::Idle | PanelState::Rendered)
    }

    /// Text for the loading indicator, shown only while work is in flight.
    pub fn loading_text(self) -> Option<&'static str> {
        match self {
            PanelState::Extracting => Some("Extracting text..."),
            PanelState::Submitting => Some("Analyzing with AI..."),
            _ => None,
        }
    }
}

/// Mutable state owned by the orchestrator.
///
/// `current_jobs` is the displayed list in full, including entries past the
/// display cap. It is not kept in sync with the archive; only an explicit
/// save writes it back.
#[derive(Debug, Default)]
pub struct AppState {
    phase: PanelState,
    current_jobs: Vec<JobEntry>,
    selected: Option<String>,
}

impl AppState {
    pub fn phase(&self) -> PanelState {
        self.phase
    }

    pub fn set_phase(&mut self, phase: PanelState) {
        tracing::debug!("Panel state {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    pub fn current_jobs(&self) -> &[JobEntry] {
        &self.current_jobs
    }

    pub fn replace_jobs(&mut self, jobs: Vec<JobEntry>) {
        self.current_jobs = jobs;
    }

    /// Storage key of the résumé selected in the saved-résumé selector.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, key: Option<String>) {
        self.selected = key;
    }

    /// Combines the entries read back from the cards with the entries that
    /// were never displayed, so a save does not drop anything past the cap.
    pub fn merge_edits(&self, mut collected: Vec<JobEntry>) -> Vec<JobEntry> {
        let shown = collected.len();
        collected.extend(self.current_jobs.iter().skip(shown).cloned());
        collected
    }
}
