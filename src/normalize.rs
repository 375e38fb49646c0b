//! Response normalization: turns heterogeneous upstream list payloads into
//! fixed-shape entity records. The upstream envelope is not contractually
//! stable across endpoints, so every shape decision lives here and the rest
//! of the crate sees only `Book`/`Chapter`/`Verse`.

use crate::types::{Book, Chapter, Verse};
use serde_json::Value;

const EMPTY: &[Value] = &[];

/// Locates the item list inside a list payload. A bare array is used as-is;
/// otherwise the first present, non-null of `data`, `items`, and the
/// entity-specific field wins. Anything else (scalars, null, a winning
/// non-array field) yields an empty list.
fn item_list<'a>(raw: &'a Value, entity_field: &str) -> &'a [Value] {
    if let Some(list) = raw.as_array() {
        return list;
    }
    if let Some(object) = raw.as_object() {
        for key in ["data", "items", entity_field] {
            match object.get(key) {
                None | Some(Value::Null) => continue,
                Some(value) => return value.as_array().map(Vec::as_slice).unwrap_or(EMPTY),
            }
        }
    }
    EMPTY
}

/// First of `keys` present on `item` as a string. JSON numbers are
/// stringified; other value types do not satisfy the fallback.
fn string_field(item: &Value, keys: &[&str]) -> Option<String> {
    for &key in keys {
        match item.get(key) {
            Some(Value::String(s)) => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

fn number_field(item: &Value, key: &str) -> Option<i64> {
    match item.get(key) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn normalize_books(raw: &Value) -> Vec<Book> {
    item_list(raw, "books")
        .iter()
        .filter_map(|item| {
            let Some(id) = string_field(item, &["id", "bookId", "abbreviation", "name"]) else {
                tracing::warn!("dropping book record without any id field: {item}");
                return None;
            };
            Some(Book {
                id,
                name: string_field(item, &["name", "abbreviation"]),
            })
        })
        .collect()
}

pub fn normalize_chapters(raw: &Value) -> Vec<Chapter> {
    item_list(raw, "chapters")
        .iter()
        .filter_map(|item| {
            let Some(id) = string_field(item, &["id", "chapterId", "number"]) else {
                tracing::warn!("dropping chapter record without any id field: {item}");
                return None;
            };
            Some(Chapter {
                id,
                number: number_field(item, "number"),
                name: string_field(item, &["name", "reference"]),
            })
        })
        .collect()
}

pub fn normalize_verses(raw: &Value) -> Vec<Verse> {
    item_list(raw, "verses")
        .iter()
        .filter_map(|item| {
            let Some(id) = string_field(item, &["id", "verseId", "number"]) else {
                tracing::warn!("dropping verse record without any id field: {item}");
                return None;
            };
            Some(Verse {
                id,
                text: string_field(item, &["text", "content"]),
            })
        })
        .collect()
}
