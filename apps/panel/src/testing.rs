//! Shared fakes for unit tests: a scripted panel, fixed PDF pages and a
//! local stand-in for the extraction service.

use std::collections::VecDeque;

use async_trait::async_trait;
use axum::Router;

use crate::editor::JobEditor;
use crate::extractor::PdfBackend;
use crate::models::{JobEntry, SavedResume};
use crate::view::{PanelView, Prompter};

/// Serves `router` on an ephemeral localhost port and returns its base URL.
pub async fn spawn_worker(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/")
}

/// Backend that ignores the bytes and returns the given pages.
pub struct FixedPages(pub Vec<Vec<&'static str>>);

impl PdfBackend for FixedPages {
    fn page_fragments(&self, _bytes: &[u8]) -> Result<Vec<Vec<String>>, String> {
        Ok(self
            .0
            .iter()
            .map(|page| page.iter().map(|s| s.to_string()).collect())
            .collect())
    }
}

/// Panel that answers prompts from a script and records what it was shown.
#[derive(Default)]
pub struct ScriptedView {
    pub editor: JobEditor,
    pub answers: VecDeque<Option<String>>,
    pub confirms: VecDeque<bool>,
    pub prompts: Vec<String>,
    pub alerts: Vec<String>,
    pub loading: Vec<Option<String>>,
    pub saved: Vec<SavedResume>,
    pub selected: Option<String>,
}

impl ScriptedView {
    pub fn answering(answers: &[Option<&str>]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.map(String::from)).collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl Prompter for ScriptedView {
    async fn ask_text(&mut self, message: &str, _default: Option<&str>) -> Option<String> {
        self.prompts.push(message.to_string());
        self.answers.pop_front().flatten()
    }

    async fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.confirms.pop_front().unwrap_or(false)
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

impl PanelView for ScriptedView {
    fn render(&mut self, jobs: &[JobEntry]) {
        self.editor.render(jobs);
    }

    fn clear(&mut self) {
        self.editor.clear();
    }

    fn collect(&self) -> Vec<JobEntry> {
        self.editor.collect()
    }

    fn set_loading(&mut self, status: Option<&str>) {
        self.loading.push(status.map(String::from));
    }

    fn show_saved(&mut self, saved: &[SavedResume], selected: Option<&str>) {
        self.saved = saved.to_vec();
        self.selected = selected.map(String::from);
    }
}

/// Builds a minimal uncompressed PDF. Each page is a list of text lines
/// set in Helvetica, one line per 40pt; an empty list gives a blank page.
pub fn pdf_with_pages(pages: &[&[&str]]) -> Vec<u8> {
    let mut objects: Vec<String> = Vec::new();
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| 4 + i * 2).collect();
    let kids = page_ids
        .iter()
        .map(|id| format!("{id} 0 R"))
        .collect::<Vec<_>>()
        .join(" ");

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{kids}] /Count {} >>",
        pages.len()
    ));
    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    );
    for (lines, page_id) in pages.iter().zip(&page_ids) {
        let mut content = String::new();
        if !lines.is_empty() {
            content.push_str("BT /F1 12 Tf 72 720 Td ");
            for (i, line) in lines.iter().enumerate() {
                if i > 0 {
                    content.push_str("0 -40 Td ");
                }
                content.push_str(&format!("({line}) Tj "));
            }
            content.push_str("ET");
        }
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            page_id + 1
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }
    let xref_at = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    out
}
