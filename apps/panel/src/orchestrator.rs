//! Orchestrator — wires the panel together.
//!
//! upload → credential → extract → submit → render → save prompt, plus the
//! saved-résumé selector, Save and Delete actions. Each handler runs to
//! completion before the next event is delivered; every failure is alerted
//! and leaves the panel usable.

use bytes::Bytes;
use chrono::Local;
use tracing::{info, warn};

use crate::archive::{record_key, ResumeArchive, RECORD_PREFIX};
use crate::credentials::CredentialStore;
use crate::errors::PanelError;
use crate::extraction_client::ExtractionClient;
use crate::extractor::{looks_like_pdf, TextExtractor};
use crate::models::JobEntry;
use crate::state::{AppState, PanelState};
use crate::view::PanelView;

const SAVE_PROMPT: &str = "Success! Name this resume:";
const DELETE_PROMPT: &str = "Delete this resume?";
const NO_SELECTION: &str = "Please select or create a resume to save changes to.";

/// A file handed over by the picker or the drop target.
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub bytes: Bytes,
}

pub struct Orchestrator<V: PanelView> {
    view: V,
    state: AppState,
    credentials: CredentialStore,
    extractor: TextExtractor,
    client: ExtractionClient,
    archive: ResumeArchive,
}

impl<V: PanelView> Orchestrator<V> {
    pub fn new(
        view: V,
        credentials: CredentialStore,
        extractor: TextExtractor,
        client: ExtractionClient,
        archive: ResumeArchive,
    ) -> Self {
        Self {
            view,
            state: AppState::default(),
            credentials,
            extractor,
            client,
            archive,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Populates the saved-résumé selector on startup.
    pub async fn init(&mut self) {
        if let Err(e) = self.refresh_saved().await {
            self.fail(e);
        }
    }

    pub async fn handle_upload(&mut self, upload: Upload) {
        if !self.state.phase().accepts_upload() {
            warn!(
                "Ignoring upload of {} while {:?}",
                upload.name,
                self.state.phase()
            );
            return;
        }

        if let Err(e) = self.run_upload(upload).await {
            self.fail(e);
        }
    }

    async fn run_upload(&mut self, upload: Upload) -> Result<(), PanelError> {
        if !looks_like_pdf(&upload.bytes) {
            return Err(PanelError::UnsupportedFile(upload.name));
        }

        let credential = self
            .credentials
            .get_or_prompt(&mut self.view)
            .await?
            .ok_or(PanelError::CredentialRefused)?;

        info!("Processing {} ({} bytes)", upload.name, upload.bytes.len());

        self.enter(PanelState::Extracting);
        let text = self.extractor.extract_text(upload.bytes).await?;

        self.enter(PanelState::Submitting);
        let jobs = self.client.submit(&text, &credential).await?.into_jobs();

        self.view.render(&jobs);
        self.state.replace_jobs(jobs);
        self.enter(PanelState::Rendered);
        info!("Rendered {} jobs", self.state.current_jobs().len());

        let default_name = format!("Resume {}", Local::now().format("%-m/%-d/%Y"));
        let answer = self.view.ask_text(SAVE_PROMPT, Some(&default_name)).await;
        if let Some(name) = answer.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            let jobs = self.state.current_jobs().to_vec();
            self.save_new(name, jobs).await?;
        }
        Ok(())
    }

    /// First save of a freshly parsed list. An existing record with the same
    /// name is only replaced after confirmation.
    async fn save_new(
        &mut self,
        name: &str,
        jobs: Vec<JobEntry>,
    ) -> Result<(), PanelError> {
        let key = record_key(name);
        if self.archive.exists(&key).await? {
            let question = format!("A resume named \"{name}\" already exists. Overwrite it?");
            if !self.view.confirm(&question).await {
                info!("Kept existing resume '{name}'");
                return Ok(());
            }
        }

        let key = self.archive.save(name, &jobs).await?;
        self.state.select(Some(key));
        self.refresh_saved().await
    }

    /// Opens a saved résumé from the selector. Empty or stale keys are ignored.
    pub async fn handle_select(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }
        match self.archive.load(key).await {
            Ok(Some(jobs)) => {
                self.view.render(&jobs);
                self.state.replace_jobs(jobs);
                self.state.select(Some(key.to_string()));
                if let Err(e) = self.refresh_saved().await {
                    self.fail(e);
                }
            }
            Ok(None) => warn!("Selected resume {key} no longer exists"),
            Err(e) => self.fail(e),
        }
    }

    /// Writes the visible cards, edits included, back to the selected résumé.
    pub async fn handle_save(&mut self) {
        let Some(key) = self.state.selected().map(String::from) else {
            self.view.alert(NO_SELECTION);
            return;
        };
        let name = key.strip_prefix(RECORD_PREFIX).unwrap_or(&key).to_string();
        let jobs = self.state.merge_edits(self.view.collect());

        match self.save_selected(&name, jobs).await {
            Ok(()) => self.view.alert("Saved!"),
            Err(e) => self.fail(e),
        }
    }

    pub async fn handle_delete(&mut self) {
        let Some(key) = self.state.selected().map(String::from) else {
            return;
        };
        if !self.view.confirm(DELETE_PROMPT).await {
            return;
        }

        if let Err(e) = self.delete_selected(&key).await {
            self.fail(e);
        }
    }

    async fn save_selected(&mut self, name: &str, jobs: Vec<JobEntry>) -> Result<(), PanelError> {
        let key = self.archive.save(name, &jobs).await?;
        self.state.replace_jobs(jobs);
        self.state.select(Some(key));
        self.refresh_saved().await
    }

    async fn delete_selected(&mut self, key: &str) -> Result<(), PanelError> {
        self.archive.delete(key).await?;
        self.state.select(None);
        self.state.replace_jobs(Vec::new());
        self.view.clear();
        self.refresh_saved().await
    }

    /// Drops the stored credential so the next upload prompts again.
    pub async fn forget_credential(&mut self) {
        match self.credentials.clear().await {
            Ok(()) => self.view.alert("Secret Key cleared."),
            Err(e) => self.fail(e),
        }
    }

    async fn refresh_saved(&mut self) -> Result<(), PanelError> {
        let saved = self.archive.list().await?;
        self.view.show_saved(&saved, self.state.selected());
        Ok(())
    }

    fn enter(&mut self, phase: PanelState) {
        self.state.set_phase(phase);
        self.view.set_loading(phase.loading_text());
    }

    /// Surfaces an error and returns the panel to a usable state. Aborted
    /// uploads (refused credential, non-PDF file) never left their state.
    fn fail(&mut self, error: PanelError) {
        let aborted = matches!(
            error,
            PanelError::CredentialRefused | PanelError::UnsupportedFile(_)
        );
        if self.state.phase().loading_text().is_some() {
            self.view.set_loading(None);
        }
        if !aborted {
            self.state.set_phase(PanelState::Failed);
        }

        let message = error.user_message();
        self.view.alert(&message);

        if !aborted {
            self.state.set_phase(PanelState::Idle);
        }
    }
}
