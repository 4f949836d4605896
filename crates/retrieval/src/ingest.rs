//! Document ingestion: web pages and PDF files reduced to plain text.
//!
//! Every source is best-effort. A failed fetch or extraction is logged and
//! skipped, and blank results are dropped, so the collected list may be empty.

use std::path::Path;
use std::time::Duration;

use agrigenius_core::{AppConfig, AppError, AppResult};
use scraper::{Html, Selector};

/// Raw text of one ingested source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBlob {
    pub source_id: String,
    pub text: String,
}

/// Elements whose text never reaches the reader.
const HIDDEN_ELEMENTS: &str = "script, style, noscript, template, head";

/// Fetches web pages and keeps their visible text.
#[derive(Debug, Clone)]
pub struct WebFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl WebFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub async fn fetch(&self, url: &str) -> AppResult<String> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::Ingestion(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(AppError::Ingestion(format!(
                "Fetching {} returned {}",
                url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Ingestion(format!("Failed to read {}: {}", url, e)))?;
        Ok(visible_text(&body))
    }
}

impl Default for WebFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

/// Collapse an HTML document to whitespace-normalized visible text.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(hidden) = Selector::parse(HIDDEN_ELEMENTS) else {
        return String::new();
    };

    let hidden_ids: Vec<_> = document.select(&hidden).map(|el| el.id()).collect();
    let mut words = Vec::new();
    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        if node.ancestors().any(|a| hidden_ids.contains(&a.id())) {
            continue;
        }
        words.extend(text.split_whitespace());
    }
    words.join(" ")
}

/// Pulls the text layer out of PDF files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, path: &Path) -> AppResult<String> {
        let bytes = std::fs::read(path)?;
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            AppError::Ingestion(format!("Failed to extract text from {}: {}", path.display(), e))
        })
    }
}

/// Gather the configured web pages and PDFs, in that order.
///
/// Relative PDF paths resolve against the workspace.
pub async fn collect_blobs(config: &AppConfig) -> Vec<SourceBlob> {
    let settings = &config.retrieval;
    let fetcher = WebFetcher::new(Duration::from_secs(settings.fetch_timeout_secs.max(1)));
    let extractor = PdfExtractor::new();
    let mut blobs = Vec::new();

    let pages = futures::future::join_all(settings.urls.iter().map(|url| fetcher.fetch(url))).await;
    for (url, page) in settings.urls.iter().zip(pages) {
        match page {
            Ok(text) => push_blob(&mut blobs, url.clone(), text),
            Err(e) => tracing::warn!(url = %url, error = %e, "Skipping web source"),
        }
    }

    for file in &settings.pdf_files {
        let path = config.resolve_path(file);
        let pdf = path.clone();
        let extracted = tokio::task::spawn_blocking(move || extractor.extract(&pdf))
            .await
            .unwrap_or_else(|e| Err(AppError::Ingestion(format!("PDF extraction panicked: {}", e))));
        match extracted {
            Ok(text) => push_blob(&mut blobs, path.display().to_string(), text),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping PDF source"),
        }
    }

    tracing::info!(sources = blobs.len(), "Collected retrieval sources");
    blobs
}

fn push_blob(blobs: &mut Vec<SourceBlob>, source_id: String, text: String) {
    if text.trim().is_empty() {
        tracing::debug!(source = %source_id, "Dropping empty source");
        return;
    }
    blobs.push(SourceBlob { source_id, text });
}
