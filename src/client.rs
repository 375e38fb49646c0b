//! Scripture client: the four request operations against the upstream REST
//! API. Each resolves the bible identifier through the version registry,
//! issues one GET, and runs the response through the normalizer or extractor.

use crate::extract::extract_verse_content;
use crate::normalize::{normalize_books, normalize_chapters, normalize_verses};
use crate::runtime::fetcher::{Fetcher, HttpFetcher};
use crate::types::{Book, Chapter, Verse, VerseContent};
use crate::versions::resolve_api_id;
use serde_json::Value;
use std::sync::Arc;
use urlencoding::encode;

pub const DEFAULT_API_BASE: &str = "https://localhost:7271/api/Scripture";

pub struct ScriptureClient {
    base_url: String,
    fetcher: Arc<dyn Fetcher>,
}

impl ScriptureClient {
    pub fn new(base_url: impl Into<String>, fetcher: Arc<dyn Fetcher>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, fetcher }
    }

    /// Client against `base_url` using a fresh reqwest transport.
    pub fn with_http_transport(base_url: impl Into<String>) -> Self {
        Self::new(base_url, Arc::new(HttpFetcher::default()))
    }

    /// Fetches `path` and parses the body as JSON. A body that is not JSON
    /// is an upstream shape irregularity, not an error: it degrades to
    /// `Null`, which the normalizer and extractor map to empty output.
    async fn get_json(&self, path: &str) -> Result<Value, String> {
        let url = format!("{}{}", self.base_url, path);
        let body = self.fetcher.fetch(&url).await?;
        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!("non-JSON response body from {url}: {e}");
                Ok(Value::Null)
            }
        }
    }

    pub async fn list_books(&self, bible: Option<&str>) -> Result<Vec<Book>, String> {
        let api_id = resolve_api_id(bible);
        let raw = self
            .get_json(&format!("/bibles/{}/books", encode(&api_id)))
            .await?;
        Ok(normalize_books(&raw))
    }

    pub async fn list_chapters(&self, bible: &str, book_id: &str) -> Result<Vec<Chapter>, String> {
        let api_id = resolve_api_id(Some(bible));
        let raw = self
            .get_json(&format!(
                "/bibles/{}/books/{}/chapters",
                encode(&api_id),
                encode(book_id)
            ))
            .await?;
        Ok(normalize_chapters(&raw))
    }

    pub async fn list_verses(&self, bible: &str, chapter_id: &str) -> Result<Vec<Verse>, String> {
        let api_id = resolve_api_id(Some(bible));
        let raw = self
            .get_json(&format!(
                "/bibles/{}/chapters/{}/verses",
                encode(&api_id),
                encode(chapter_id)
            ))
            .await?;
        Ok(normalize_verses(&raw))
    }

    pub async fn get_verse(&self, bible: &str, verse_id: &str) -> Result<VerseContent, String> {
        let api_id = resolve_api_id(Some(bible));
        let raw = self
            .get_json(&format!(
                "/bibles/{}/verses/{}",
                encode(&api_id),
                encode(verse_id)
            ))
            .await?;
        Ok(extract_verse_content(&raw))
    }
}
