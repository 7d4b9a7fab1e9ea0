//! Line-oriented side panel on stdin/stdout.
//!
//! Prompts block on the next input line, which is what the core expects of
//! a modal prompt. While a handler runs no command is read, so the upload
//! target is effectively disabled during loading.

pub mod command;

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use crate::archive::record_key;
use crate::editor::{JobEditor, EMPTY_STATE};
use crate::models::{JobEntry, JobField, SavedResume};
use crate::orchestrator::{Orchestrator, Upload};
use crate::view::{PanelView, Prompter};

pub use command::{Command, HELP};

/// Typing this at a text prompt cancels it.
const CANCEL: &str = "-";

pub struct TerminalView {
    editor: JobEditor,
    input: Lines<BufReader<Stdin>>,
    saved: Vec<SavedResume>,
    selected: Option<String>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            editor: JobEditor::new(),
            input: BufReader::new(tokio::io::stdin()).lines(),
            saved: Vec::new(),
            selected: None,
        }
    }

    pub fn editor(&self) -> &JobEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut JobEditor {
        &mut self.editor
    }

    async fn read_line(&mut self) -> Option<String> {
        // A broken stdin is treated like end of input.
        self.input.next_line().await.ok().flatten()
    }

    /// Reads lines until one parses. `None` at end of input.
    pub async fn next_command(&mut self) -> Option<Command> {
        loop {
            print!("> ");
            flush();
            let line = self.read_line().await?;
            match Command::parse(&line) {
                Ok(command) => return Some(command),
                Err(msg) => println!("{msg}"),
            }
        }
    }

    /// Resolves `open` arguments: a 1-based position in the list or a name.
    pub fn resolve_saved(&self, arg: &str) -> Option<String> {
        if let Ok(n) = arg.parse::<usize>() {
            if let Some(record) = n.checked_sub(1).and_then(|i| self.saved.get(i)) {
                return Some(record.key.clone());
            }
        }
        let key = record_key(arg);
        self.saved
            .iter()
            .find(|r| r.key == key)
            .map(|r| r.key.clone())
    }

    pub fn print_cards(&self) {
        if self.editor.is_empty_state() {
            println!("{EMPTY_STATE}");
            return;
        }
        for (i, card) in self.editor.cards().iter().enumerate() {
            println!(
                "[{}] {} | {} | {} | {} - {}",
                i + 1,
                card.value(JobField::Company),
                card.value(JobField::Title),
                card.value(JobField::Location),
                card.value(JobField::StartDate),
                card.value(JobField::EndDate),
            );
            for line in card.value(JobField::Description).lines() {
                println!("      {line}");
            }
        }
    }

    pub fn print_saved(&self) {
        if self.saved.is_empty() {
            println!("No saved resumes.");
            return;
        }
        for (i, record) in self.saved.iter().enumerate() {
            let marker = if self.selected.as_deref() == Some(record.key.as_str()) {
                "*"
            } else {
                " "
            };
            println!("{marker} {}. {}", i + 1, record.display_name);
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompter for TerminalView {
    async fn ask_text(&mut self, message: &str, default: Option<&str>) -> Option<String> {
        println!("{message}");
        match default {
            Some(d) => print!("[{d}] (enter to accept, '{CANCEL}' to cancel) "),
            None => print!("('{CANCEL}' to cancel) "),
        }
        flush();

        let line = self.read_line().await?;
        interpret_answer(&line, default)
    }

    async fn confirm(&mut self, message: &str) -> bool {
        print!("{message} [y/N] ");
        flush();
        matches!(
            self.read_line().await.as_deref().map(str::trim),
            Some("y" | "Y" | "yes" | "Yes")
        )
    }

    fn alert(&mut self, message: &str) {
        println!("! {message}");
    }
}

impl PanelView for TerminalView {
    fn render(&mut self, jobs: &[JobEntry]) {
        self.editor.render(jobs);
        self.print_cards();
    }

    fn clear(&mut self) {
        self.editor.clear();
    }

    fn collect(&self) -> Vec<JobEntry> {
        self.editor.collect()
    }

    fn set_loading(&mut self, status: Option<&str>) {
        if let Some(text) = status {
            println!("... {text}");
        }
    }

    fn show_saved(&mut self, saved: &[SavedResume], selected: Option<&str>) {
        self.saved = saved.to_vec();
        self.selected = selected.map(String::from);
    }
}

/// Maps a typed answer to a prompt result: `-` cancels, an empty line takes
/// the default when there is one.
fn interpret_answer(line: &str, default: Option<&str>) -> Option<String> {
    let line = line.trim();
    if line == CANCEL {
        return None;
    }
    match default {
        Some(d) if line.is_empty() => Some(d.to_string()),
        _ => Some(line.to_string()),
    }
}

/// The interactive loop. Returns when the user quits or input ends.
pub async fn run(panel: &mut Orchestrator<TerminalView>) -> Result<()> {
    panel.init().await;
    println!("Resume panel ready. Type 'help' for commands.");
    panel.view().print_saved();

    while let Some(command) = panel.view_mut().next_command().await {
        match command {
            Command::Upload(path) => match read_upload(&path).await {
                Ok(upload) => panel.handle_upload(upload).await,
                Err(e) => panel.view_mut().alert(&format!("Error: {e}")),
            },
            Command::Open(arg) => match panel.view().resolve_saved(&arg) {
                Some(key) => panel.handle_select(&key).await,
                None => panel
                    .view_mut()
                    .alert(&format!("No saved resume matches '{arg}'.")),
            },
            Command::Show => panel.view().print_cards(),
            Command::Html => println!("{}", panel.view().editor().markup()),
            Command::Edit { card, field, value } => {
                if !panel.view_mut().editor_mut().set_field(card, field, value) {
                    panel
                        .view_mut()
                        .alert(&format!("There is no card #{}.", card + 1));
                }
            }
            Command::Save => panel.handle_save().await,
            Command::Delete => panel.handle_delete().await,
            Command::List => panel.view().print_saved(),
            Command::ForgetKey => panel.forget_credential().await,
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Noop => {}
        }
    }

    info!("Panel closed");
    Ok(())
}

async fn read_upload(path: &Path) -> Result<Upload> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Upload {
        name,
        bytes: Bytes::from(bytes),
    })
}

fn flush() {
    use std::io::Write;
    let _ = std::io::stdout().flush();
}
