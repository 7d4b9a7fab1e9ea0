mod archive;
mod config;
mod credentials;
mod editor;
mod errors;
mod extraction_client;
mod extractor;
mod models;
mod orchestrator;
mod state;
mod storage;
mod terminal;
#[cfg(test)]
mod testing;
mod view;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::archive::ResumeArchive;
use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::extraction_client::ExtractionClient;
use crate::extractor::{PdfExtractBackend, TextExtractor};
use crate::orchestrator::Orchestrator;
use crate::storage::{JsonFileStore, KeyValueStore};
use crate::terminal::TerminalView;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging; stdout belongs to the panel
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting resume panel v{}", env!("CARGO_PKG_VERSION"));

    // Initialize local storage
    let store = JsonFileStore::open(&config.store_path).await?;
    info!("Storage opened at {}", store.path().display());
    let store: Arc<dyn KeyValueStore> = Arc::new(store);

    let credentials = CredentialStore::new(store.clone());
    let archive = ResumeArchive::new(store);

    // Initialize extraction pipeline
    let extractor = TextExtractor::new(Arc::new(PdfExtractBackend));
    let client = ExtractionClient::new(config.extractor_url.clone(), credentials.clone());
    info!("Extraction service: {}", client.url());

    let mut panel = Orchestrator::new(
        TerminalView::new(),
        credentials,
        extractor,
        client,
        archive,
    );

    terminal::run(&mut panel).await
}
