//! Reader controller: orchestrates the bible → book → chapter → verse
//! selection chain against the scripture client and exposes a snapshot of
//! observable UI state.
//!
//! Selections at the four levels form a strict dependency chain. Every
//! dispatch stamps the target level's generation counter; a completion whose
//! stamp no longer matches is a stale response for a superseded selection
//! and is discarded without touching state.

use crate::client::ScriptureClient;
use crate::runtime::store::KeyValueStore;
use crate::types::{Book, Chapter, Verse, VerseContent};
use crate::versions::default_version;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Store key under which the last-selected bible version id is persisted.
pub const SELECTED_BIBLE_KEY: &str = "selectedBibleId";

const BIBLE: usize = 0;
const BOOK: usize = 1;
const CHAPTER: usize = 2;
const VERSE: usize = 3;
const LEVELS: usize = 4;

/// Observable UI state. Cloned out as a snapshot; never mutated by callers.
#[derive(Debug, Clone, Default)]
pub struct ReaderState {
    pub selected_bible: String,
    pub selected_book: Option<String>,
    pub selected_chapter: Option<String>,
    pub selected_verse: Option<String>,
    pub books: Vec<Book>,
    pub chapters: Vec<Chapter>,
    pub verses: Vec<Verse>,
    pub verse_content: Option<VerseContent>,
    pub loading: bool,
    pub error: Option<String>,
}

struct Inner {
    state: ReaderState,
    epochs: [u64; LEVELS],
}

/// Invalidates `level` and every level below it. In-flight fetches stamped
/// with the old values are discarded on completion.
fn bump(epochs: &mut [u64; LEVELS], level: usize) {
    for epoch in &mut epochs[level..] {
        *epoch += 1;
    }
}

pub struct ReaderController {
    client: ScriptureClient,
    store: Arc<dyn KeyValueStore>,
    inner: Mutex<Inner>,
}

impl ReaderController {
    /// Builds a controller whose initial bible selection is the persisted
    /// one if present, else the registry default. Store failures are
    /// ignored; persistence is best-effort.
    pub fn new(client: ScriptureClient, store: Arc<dyn KeyValueStore>) -> Self {
        let selected_bible = match store.get(SELECTED_BIBLE_KEY) {
            Ok(Some(id)) if !id.trim().is_empty() => id,
            Ok(_) => default_version().id.to_string(),
            Err(e) => {
                tracing::debug!("ignoring failure reading persisted bible selection: {e}");
                default_version().id.to_string()
            }
        };
        Self {
            client,
            store,
            inner: Mutex::new(Inner {
                state: ReaderState {
                    selected_bible,
                    ..ReaderState::default()
                },
                epochs: [0; LEVELS],
            }),
        }
    }

    pub async fn state(&self) -> ReaderState {
        self.inner.lock().await.state.clone()
    }

    /// Startup load: fetches the current bible's books and cascades into the
    /// first book's chapters.
    pub async fn init(&self) {
        self.reload_books().await;
    }

    pub async fn select_bible(&self, bible_id: &str) {
        if bible_id.trim().is_empty() {
            return;
        }
        if let Err(e) = self.store.set(SELECTED_BIBLE_KEY, bible_id) {
            tracing::debug!("ignoring failure persisting bible selection: {e}");
        }
        {
            let mut guard = self.inner.lock().await;
            guard.state.selected_bible = bible_id.to_string();
        }
        self.reload_books().await;
    }

    async fn reload_books(&self) {
        let (bible, stamp) = {
            let mut guard = self.inner.lock().await;
            let inner = &mut *guard;
            inner.state.selected_book = None;
            inner.state.selected_chapter = None;
            inner.state.selected_verse = None;
            inner.state.books.clear();
            inner.state.chapters.clear();
            inner.state.verses.clear();
            inner.state.verse_content = None;
            inner.state.loading = true;
            inner.state.error = None;
            bump(&mut inner.epochs, BIBLE);
            (inner.state.selected_bible.clone(), inner.epochs[BIBLE])
        };

        let result = self.client.list_books(Some(&bible)).await;

        let cascade = {
            let mut guard = self.inner.lock().await;
            let inner = &mut *guard;
            if inner.epochs[BIBLE] != stamp {
                return;
            }
            match result {
                Err(e) => {
                    inner.state.error = Some(e);
                    inner.state.loading = false;
                    None
                }
                Ok(books) => {
                    let first = books.first().map(|b| b.id.clone());
                    inner.state.books = books;
                    match first {
                        Some(book_id) => {
                            // Auto-select the first book and cascade into
                            // its chapter list.
                            inner.state.selected_book = Some(book_id.clone());
                            bump(&mut inner.epochs, BOOK);
                            Some((book_id, inner.epochs[BOOK]))
                        }
                        None => {
                            inner.state.loading = false;
                            None
                        }
                    }
                }
            }
        };

        let Some((book_id, book_stamp)) = cascade else {
            return;
        };
        let result = self.client.list_chapters(&bible, &book_id).await;

        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        if inner.epochs[BOOK] != book_stamp {
            return;
        }
        match result {
            Ok(chapters) => inner.state.chapters = chapters,
            Err(e) => inner.state.error = Some(e),
        }
        inner.state.loading = false;
    }

    /// Selects a book and fetches its chapters. The chapter is left for the
    /// user to pick explicitly; there is no auto-select at this level.
    pub async fn select_book(&self, book_id: &str) {
        let (bible, stamp) = {
            let mut guard = self.inner.lock().await;
            let inner = &mut *guard;
            inner.state.selected_book = Some(book_id.to_string());
            inner.state.selected_chapter = None;
            inner.state.selected_verse = None;
            inner.state.chapters.clear();
            inner.state.verses.clear();
            inner.state.verse_content = None;
            inner.state.loading = true;
            inner.state.error = None;
            bump(&mut inner.epochs, BOOK);
            (inner.state.selected_bible.clone(), inner.epochs[BOOK])
        };

        let result = self.client.list_chapters(&bible, book_id).await;

        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        if inner.epochs[BOOK] != stamp {
            return;
        }
        match result {
            Ok(chapters) => inner.state.chapters = chapters,
            Err(e) => inner.state.error = Some(e),
        }
        inner.state.loading = false;
    }

    pub async fn select_chapter(&self, chapter_id: &str) {
        let (bible, stamp) = {
            let mut guard = self.inner.lock().await;
            let inner = &mut *guard;
            inner.state.selected_chapter = Some(chapter_id.to_string());
            inner.state.selected_verse = None;
            inner.state.verses.clear();
            inner.state.verse_content = None;
            inner.state.loading = true;
            inner.state.error = None;
            bump(&mut inner.epochs, CHAPTER);
            (inner.state.selected_bible.clone(), inner.epochs[CHAPTER])
        };

        let result = self.client.list_verses(&bible, chapter_id).await;

        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        if inner.epochs[CHAPTER] != stamp {
            return;
        }
        match result {
            Ok(verses) => inner.state.verses = verses,
            Err(e) => inner.state.error = Some(e),
        }
        inner.state.loading = false;
    }

    /// Selects a verse and fetches its display content. A verse selection
    /// without a chapter selection is meaningless and ignored.
    pub async fn select_verse(&self, verse_id: &str) {
        let (bible, stamp) = {
            let mut guard = self.inner.lock().await;
            let inner = &mut *guard;
            if inner.state.selected_chapter.is_none() {
                return;
            }
            inner.state.selected_verse = Some(verse_id.to_string());
            inner.state.verse_content = None;
            inner.state.loading = true;
            inner.state.error = None;
            bump(&mut inner.epochs, VERSE);
            (inner.state.selected_bible.clone(), inner.epochs[VERSE])
        };

        let result = self.client.get_verse(&bible, verse_id).await;

        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        if inner.epochs[VERSE] != stamp {
            return;
        }
        match result {
            Ok(content) => inner.state.verse_content = Some(content),
            Err(e) => inner.state.error = Some(e),
        }
        inner.state.loading = false;
    }

    /// Clears the book selection and everything below it. No fetch is
    /// issued; any in-flight fetch at or below this level is invalidated.
    pub async fn clear_book(&self) {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        inner.state.selected_book = None;
        inner.state.selected_chapter = None;
        inner.state.selected_verse = None;
        inner.state.chapters.clear();
        inner.state.verses.clear();
        inner.state.verse_content = None;
        inner.state.loading = false;
        bump(&mut inner.epochs, BOOK);
    }

    pub async fn clear_chapter(&self) {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        inner.state.selected_chapter = None;
        inner.state.selected_verse = None;
        inner.state.verses.clear();
        inner.state.verse_content = None;
        inner.state.loading = false;
        bump(&mut inner.epochs, CHAPTER);
    }

    pub async fn clear_verse(&self) {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        inner.state.selected_verse = None;
        inner.state.verse_content = None;
        inner.state.loading = false;
        bump(&mut inner.epochs, VERSE);
    }
}
