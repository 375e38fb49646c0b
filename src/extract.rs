//! Verse markup extraction: adapts an upstream verse payload (plain text or
//! an HTML fragment) into a plain-text rendition plus a re-synthesized,
//! safe-to-render markup rendition. Upstream markup is never forwarded;
//! only extracted text, escaped, is interpolated into a fixed template.

use crate::types::VerseContent;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;
use tl::{Node, NodeHandle, Parser, VDom};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Markup that a rendering layer may insert into a document verbatim.
///
/// Constructible only inside this module, and only from escaped text, so
/// holding one is proof the value never contained upstream markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SanitizedMarkup(String);

impl SanitizedMarkup {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the display payload from a verse-detail response body.
///
/// Total over arbitrary JSON: shape surprises and markup-parse failures
/// degrade to plainer output, never to an error.
pub fn extract_verse_content(raw: &Value) -> VerseContent {
    let body = match raw.get("data") {
        Some(data) if !data.is_null() => data,
        _ => raw,
    };

    let candidates = [
        body.get("content"),
        body.get("text"),
        body.get("verse").and_then(|v| v.get("text")),
        body.get("data").and_then(|v| v.get("content")),
        Some(body),
    ];
    let Some(s) = candidates
        .iter()
        .flatten()
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .find(|s| !s.is_empty())
    else {
        return VerseContent::empty();
    };

    if !looks_like_markup(s) {
        return VerseContent {
            text: Some(s.to_string()),
            html: None,
        };
    }

    let (text, html) = parse_verse_markup(s);
    VerseContent {
        text,
        html: Some(html),
    }
}

/// A string is treated as markup only if it starts with `<` and a `>`
/// follows somewhere after it.
fn looks_like_markup(s: &str) -> bool {
    s.starts_with('<') && s[1..].contains('>')
}

fn parse_verse_markup(fragment: &str) -> (Option<String>, SanitizedMarkup) {
    let dom = match tl::parse(fragment, tl::ParserOptions::default()) {
        Ok(dom) => dom,
        Err(e) => {
            tracing::debug!("verse fragment failed to parse, stripping tags: {e}");
            return stripped_fallback(fragment);
        }
    };
    let parser = dom.parser();

    let Some(primary) = find_primary_node(&dom, parser) else {
        // No element nodes at all; use the fragment's raw text.
        let mut text = String::new();
        for handle in dom.children() {
            collect_text(parser, *handle, None, &mut text);
        }
        let text = clean_text(&text);
        return (text.clone(), synthesize(None, text.as_deref().unwrap_or("")));
    };

    match find_marker(parser, primary) {
        Some(marker) => {
            let number = marker_number(parser, marker);
            let mut remaining = String::new();
            collect_text(parser, primary, Some(marker), &mut remaining);
            let text = clean_text(&remaining);
            (
                text.clone(),
                synthesize(number.as_deref(), text.as_deref().unwrap_or("")),
            )
        }
        None => {
            let mut inner = String::new();
            collect_text(parser, primary, None, &mut inner);
            let text = clean_text(&inner);
            (text.clone(), synthesize(None, text.as_deref().unwrap_or("")))
        }
    }
}

/// The node verse content is read from: the first paragraph in document
/// order, else the first top-level element of the fragment.
fn find_primary_node(dom: &VDom<'_>, parser: &Parser<'_>) -> Option<NodeHandle> {
    for (index, node) in dom.nodes().iter().enumerate() {
        if let Some(tag) = node.as_tag() {
            if tag.name().as_utf8_str().eq_ignore_ascii_case("p") {
                return Some(NodeHandle::new(index as u32));
            }
        }
    }
    dom.children()
        .iter()
        .copied()
        .find(|handle| handle.get(parser).map(|n| n.as_tag().is_some()).unwrap_or(false))
}

/// First descendant element carrying a verse-number marker: a `data-number`
/// attribute, class `v`, or a `data-sid` attribute. One document-order walk,
/// so the choice is deterministic across calls.
fn find_marker(parser: &Parser<'_>, root: NodeHandle) -> Option<NodeHandle> {
    let tag = root.get(parser)?.as_tag()?;
    for child in tag.children().top().iter() {
        if let Some(found) = find_marker_in(parser, *child) {
            return Some(found);
        }
    }
    None
}

fn find_marker_in(parser: &Parser<'_>, handle: NodeHandle) -> Option<NodeHandle> {
    let node = handle.get(parser)?;
    let tag = node.as_tag()?;
    if is_marker(tag) {
        return Some(handle);
    }
    for child in tag.children().top().iter() {
        if let Some(found) = find_marker_in(parser, *child) {
            return Some(found);
        }
    }
    None
}

fn is_marker(tag: &tl::HTMLTag<'_>) -> bool {
    let attributes = tag.attributes();
    if attributes.get("data-number").is_some() || attributes.get("data-sid").is_some() {
        return true;
    }
    attributes
        .class()
        .map(|c| c.as_utf8_str().split_whitespace().any(|class| class == "v"))
        .unwrap_or(false)
}

/// The displayed verse number: the marker's `data-number` value when it has
/// one, else the marker's own trimmed text.
fn marker_number(parser: &Parser<'_>, marker: NodeHandle) -> Option<String> {
    let tag = marker.get(parser)?.as_tag()?;
    if let Some(value) = tag.attributes().get("data-number").flatten() {
        let value = value.as_utf8_str().trim().to_string();
        if !value.is_empty() {
            return Some(value);
        }
    }
    clean_text(&tag.inner_text(parser))
}

/// Concatenates the raw text of a subtree, skipping the `skip` node and its
/// descendants (used to keep the verse number out of the plain text).
fn collect_text(parser: &Parser<'_>, handle: NodeHandle, skip: Option<NodeHandle>, out: &mut String) {
    if skip.is_some_and(|s| s.get_inner() == handle.get_inner()) {
        return;
    }
    let Some(node) = handle.get(parser) else {
        return;
    };
    match node {
        Node::Raw(raw) => out.push_str(&raw.as_utf8_str()),
        Node::Tag(tag) => {
            for child in tag.children().top().iter() {
                collect_text(parser, *child, skip, out);
            }
        }
        _ => {}
    }
}

/// Entity-decodes and trims extracted text; empty results become `None`.
fn clean_text(raw: &str) -> Option<String> {
    let decoded = decode_entities(raw);
    let trimmed = decoded.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// `&amp;` last, so entity names produced by decoding it are not re-decoded.
fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace('\u{00A0}', " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Fixed output template. Only escaped text is interpolated, which is what
/// entitles the result to be `SanitizedMarkup`.
fn synthesize(number: Option<&str>, text: &str) -> SanitizedMarkup {
    let markup = match number {
        Some(number) => format!(
            "<div class=\"verse\"><strong class=\"verse-number\">{}</strong> <span class=\"verse-text\">{}</span></div>",
            escape_html(number),
            escape_html(text),
        ),
        None => format!(
            "<div class=\"verse\"><span class=\"verse-text\">{}</span></div>",
            escape_html(text),
        ),
    };
    SanitizedMarkup(markup)
}

/// Last-resort path when structured parsing fails: remove anything
/// tag-shaped and wrap the escaped remainder.
fn stripped_fallback(fragment: &str) -> (Option<String>, SanitizedMarkup) {
    let stripped = TAG_RE.replace_all(fragment, "");
    let text = clean_text(&stripped);
    let markup = SanitizedMarkup(format!(
        "<div>{}</div>",
        escape_html(text.as_deref().unwrap_or(""))
    ));
    (text, markup)
}
