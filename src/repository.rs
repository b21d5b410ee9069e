use std::collections::HashSet;
use std::thread;

use tracing::{debug, info, warn};

use crate::error::{HighlightError, Result};
use crate::model::{KanjiItem, VocabItem};
use crate::records::{KanjiRecord, VocabRecord};
use crate::types::RetryPolicy;

/// Source of the learner's known items.
///
/// Vocabulary items are expected to carry their classification and
/// inflections already; [`VocabItem::new`] computes both.
pub trait ItemRepository {
    /// Known kanji, in any order.
    fn kanji_items(&self) -> Result<Vec<KanjiItem>>;
    /// Known vocabulary. Order decides ambiguous level lookups.
    fn vocab_items(&self) -> Result<Vec<VocabItem>>;
}

/// Immutable view of both collections for one tagging pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSnapshot {
    kanji: Vec<KanjiItem>,
    vocab: Vec<VocabItem>,
}

impl ItemSnapshot {
    /// Builds a snapshot, dropping items that break the collection
    /// invariants: empty surface forms, multi-character kanji and repeated
    /// surface forms (the first occurrence is kept).
    pub fn new(kanji: Vec<KanjiItem>, vocab: Vec<VocabItem>) -> Self {
        let kanji_total = kanji.len();
        let vocab_total = vocab.len();

        let mut seen = HashSet::new();
        let kanji: Vec<KanjiItem> = kanji
            .into_iter()
            .filter(|item| {
                let surface = item.surface_form();
                if surface.chars().count() != 1 {
                    warn!(surface, "skipping kanji item that is not a single character");
                    return false;
                }
                if !seen.insert(surface.to_string()) {
                    warn!(surface, "skipping duplicate kanji item");
                    return false;
                }
                true
            })
            .collect();

        let mut seen = HashSet::new();
        let vocab: Vec<VocabItem> = vocab
            .into_iter()
            .filter(|item| {
                let surface = item.surface_form();
                if surface.is_empty() {
                    warn!("skipping vocabulary item with empty surface form");
                    return false;
                }
                if !seen.insert(surface.to_string()) {
                    warn!(surface, "skipping duplicate vocabulary item");
                    return false;
                }
                true
            })
            .collect();

        debug!(
            kanji = kanji.len(),
            vocab = vocab.len(),
            dropped = (kanji_total - kanji.len()) + (vocab_total - vocab.len()),
            "built item snapshot"
        );
        Self { kanji, vocab }
    }

    /// Builds a snapshot from flattened transport records.
    pub fn from_records(kanji: Vec<KanjiRecord>, vocab: Vec<VocabRecord>) -> Self {
        Self::new(
            kanji.into_iter().map(KanjiItem::from).collect(),
            vocab.into_iter().map(VocabItem::from).collect(),
        )
    }

    /// Reads both collections from a repository. Both reads complete before
    /// the snapshot exists, so a pass never sees a partial update.
    pub fn from_repository<R: ItemRepository + ?Sized>(repository: &R) -> Result<Self> {
        let kanji = repository.kanji_items()?;
        let vocab = repository.vocab_items()?;
        Ok(Self::new(kanji, vocab))
    }

    /// Known kanji after sanitising.
    pub fn kanji(&self) -> &[KanjiItem] {
        &self.kanji
    }

    /// Known vocabulary, in collection order.
    pub fn vocab(&self) -> &[VocabItem] {
        &self.vocab
    }

    /// Whether both collections are empty.
    pub fn is_empty(&self) -> bool {
        self.kanji.is_empty() && self.vocab.is_empty()
    }
}

impl ItemRepository for ItemSnapshot {
    fn kanji_items(&self) -> Result<Vec<KanjiItem>> {
        Ok(self.kanji.clone())
    }

    fn vocab_items(&self) -> Result<Vec<VocabItem>> {
        Ok(self.vocab.clone())
    }
}

/// Runs `operation` until it succeeds, a non-retryable error occurs or the
/// policy's attempts are used up. Only [`HighlightError::Repository`] is
/// retried; the operation receives the 1-based attempt number.
pub fn fetch_with_retry<T, F>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut(u32) -> Result<T>,
{
    policy.validate()?;
    let mut attempt = 1;
    loop {
        match operation(attempt) {
            Ok(value) => {
                if attempt > 1 {
                    info!(attempt, "item retrieval succeeded after retry");
                }
                return Ok(value);
            }
            Err(HighlightError::Repository(message)) if attempt < policy.max_attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %message,
                    "item retrieval failed, retrying"
                );
                thread::sleep(delay);
                attempt += 1;
            }
            Err(HighlightError::Repository(message)) => {
                return Err(HighlightError::Repository(format!(
                    "giving up after {attempt} attempts: {message}"
                )));
            }
            Err(error) => return Err(error),
        }
    }
}
