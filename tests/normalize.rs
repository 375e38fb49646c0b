use scripture::normalize::{normalize_books, normalize_chapters, normalize_verses};
use serde_json::json;

#[test]
fn test_books_accept_every_recognized_envelope() {
    let items = json!([
        { "id": "GEN", "name": "Genesis" },
        { "id": "EXO", "name": "Exodus" }
    ]);
    let bare = normalize_books(&items);
    assert_eq!(bare.len(), 2);
    assert_eq!(bare[0].id, "GEN");
    assert_eq!(bare[0].name.as_deref(), Some("Genesis"));

    for wrapped in [
        json!({ "data": items }),
        json!({ "items": items }),
        json!({ "books": items }),
    ] {
        assert_eq!(normalize_books(&wrapped), bare);
    }
}

#[test]
fn test_data_wins_over_entity_field() {
    let raw = json!({
        "books": [{ "id": "LOSER" }],
        "data": [{ "id": "WINNER" }]
    });
    let books = normalize_books(&raw);
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, "WINNER");
}

#[test]
fn test_null_envelope_field_is_skipped() {
    let raw = json!({ "data": null, "items": [{ "id": "GEN" }] });
    assert_eq!(normalize_books(&raw).len(), 1);
}

#[test]
fn test_degenerate_payloads_produce_empty_lists() {
    for raw in [
        json!(null),
        json!(42),
        json!("nope"),
        json!({}),
        json!({ "data": "not-a-list" }),
    ] {
        assert!(normalize_books(&raw).is_empty());
        assert!(normalize_chapters(&raw).is_empty());
        assert!(normalize_verses(&raw).is_empty());
    }
}

#[test]
fn test_book_id_fallback_chain() {
    let raw = json!([
        { "bookId": "GEN" },
        { "abbreviation": "EXO" },
        { "name": "Leviticus" }
    ]);
    let books = normalize_books(&raw);
    assert_eq!(books[0].id, "GEN");
    assert_eq!(books[1].id, "EXO");
    assert_eq!(books[2].id, "Leviticus");
    // Name falls back to the abbreviation when absent.
    assert_eq!(books[1].name.as_deref(), Some("EXO"));
}

#[test]
fn test_record_without_id_fields_is_dropped() {
    let raw = json!([
        { "id": "GEN" },
        { "something": "else" },
        { "id": "EXO" }
    ]);
    let books = normalize_books(&raw);
    assert_eq!(
        books.iter().map(|b| b.id.as_str()).collect::<Vec<_>>(),
        vec!["GEN", "EXO"]
    );
}

#[test]
fn test_chapter_id_falls_back_to_stringified_number() {
    let raw = json!({ "chapters": [
        { "chapterId": "GEN.1", "number": 1, "reference": "Genesis 1" },
        { "number": 2 },
        { "number": "3" }
    ]});
    let chapters = normalize_chapters(&raw);
    assert_eq!(chapters[0].id, "GEN.1");
    assert_eq!(chapters[0].number, Some(1));
    assert_eq!(chapters[0].name.as_deref(), Some("Genesis 1"));
    assert_eq!(chapters[1].id, "2");
    assert_eq!(chapters[2].id, "3");
    assert_eq!(chapters[2].number, Some(3));
}

#[test]
fn test_verse_fallbacks() {
    let raw = json!({ "verses": [
        { "verseId": "GEN.1.1", "content": "In the beginning" },
        { "number": 2, "text": "And the earth" }
    ]});
    let verses = normalize_verses(&raw);
    assert_eq!(verses[0].id, "GEN.1.1");
    assert_eq!(verses[0].text.as_deref(), Some("In the beginning"));
    assert_eq!(verses[1].id, "2");
    assert_eq!(verses[1].text.as_deref(), Some("And the earth"));
}

#[test]
fn test_upstream_order_is_preserved() {
    let raw = json!({ "data": [
        { "id": "JHN" }, { "id": "GEN" }, { "id": "PSA" }
    ]});
    let ids: Vec<_> = normalize_books(&raw).into_iter().map(|b| b.id).collect();
    assert_eq!(ids, vec!["JHN", "GEN", "PSA"]);
}
