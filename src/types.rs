use crate::extract::SanitizedMarkup;
use serde::{Deserialize, Serialize};

/// One book within a bible, as returned by the upstream book-list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One chapter within a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One verse within a chapter. The `text` field on list results is
/// informational only; the display payload comes from the verse-detail fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Fully-resolved display payload for a single verse: a plain-text rendition
/// and, when the upstream content carried markup, a re-synthesized safe
/// rendition. Only the verse-detail fetch produces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerseContent {
    pub text: Option<String>,
    pub html: Option<SanitizedMarkup>,
}

impl VerseContent {
    pub fn empty() -> Self {
        Self {
            text: None,
            html: None,
        }
    }
}
