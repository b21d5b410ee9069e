use tracing::{debug, info};

use crate::cache::SnapshotCache;
use crate::error::Result;
use crate::index::{MatchIndex, MatchIndexBuilder};
use crate::levels::LevelResolver;
use crate::model::{KanjiItem, MatchSpan, VocabItem};
use crate::repository::{fetch_with_retry, ItemRepository, ItemSnapshot};
use crate::tagger::Tagger;
use crate::tree::TextTree;
use crate::types::HighlightConfig;

/// Pass-scoped highlighting context.
///
/// Holds one immutable [`ItemSnapshot`], the [`MatchIndex`] compiled from it
/// and the settings used to scan and render. Every pass reads the same
/// snapshot, so a tree is never tagged against one set of items and
/// resolved against another.
#[derive(Debug, Clone)]
pub struct Highlighter {
    snapshot: ItemSnapshot,
    index: MatchIndex,
    config: HighlightConfig,
}

impl Highlighter {
    /// Creates a highlighter with [`HighlightConfig::default`].
    pub fn new(snapshot: ItemSnapshot) -> Result<Self> {
        Self::with_config(snapshot, HighlightConfig::default())
    }

    /// Creates a highlighter with explicit settings.
    pub fn with_config(snapshot: ItemSnapshot, config: HighlightConfig) -> Result<Self> {
        config.validate()?;
        let index = MatchIndexBuilder::new()
            .with_size_limit(config.regex_size_limit)
            .build(snapshot.kanji(), snapshot.vocab())?;
        info!(
            kanji = snapshot.kanji().len(),
            vocab = snapshot.vocab().len(),
            "highlighter ready"
        );
        Ok(Self {
            snapshot,
            index,
            config,
        })
    }

    /// Reads a snapshot from `repository` and builds a highlighter over it.
    ///
    /// With `config.cache_path` set, a cached snapshot is used when present
    /// and a fresh one is stored after fetching. Retrieval is retried
    /// according to `config.retry`.
    pub fn from_repository<R: ItemRepository + ?Sized>(
        repository: &R,
        config: HighlightConfig,
    ) -> Result<Self> {
        config.validate()?;
        let snapshot = match &config.cache_path {
            Some(path) => SnapshotCache::new(path).load_or_fetch(repository, &config.retry)?,
            None => fetch_with_retry(&config.retry, |_| ItemSnapshot::from_repository(repository))?,
        };
        Self::with_config(snapshot, config)
    }

    /// Tags a copy of `tree` and resolves the level of every annotation.
    ///
    /// The input tree is left untouched. Text already inside annotations is
    /// not rescanned, so highlighting a highlighted tree changes nothing.
    pub fn highlight(&self, tree: &TextTree) -> Result<TextTree> {
        let spans = Tagger::new(&self.index, &self.config).collect(tree);
        let mut output = tree.clone();
        output.apply(&spans)?;
        LevelResolver::new(self.snapshot.kanji(), self.snapshot.vocab()).resolve(&mut output)?;
        debug!(spans = spans.len(), "highlight pass complete");
        Ok(output)
    }

    /// Spans of a standalone string.
    pub fn highlight_text(&self, text: &str) -> Vec<MatchSpan> {
        Tagger::new(&self.index, &self.config).tag_text(text)
    }

    /// The compiled index.
    pub fn index(&self) -> &MatchIndex {
        &self.index
    }

    /// The items every pass reads.
    pub fn snapshot(&self) -> &ItemSnapshot {
        &self.snapshot
    }

    /// Active settings.
    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }
}

/// Compiles a [`MatchIndex`] with default limits.
pub fn build_index(kanji: &[KanjiItem], vocab: &[VocabItem]) -> Result<MatchIndex> {
    MatchIndexBuilder::new().build(kanji, vocab)
}

/// Returns a copy of `tree` with every match wrapped in an annotation.
/// Levels are left unset; see [`resolve_levels`].
pub fn tag(index: &MatchIndex, tree: &TextTree) -> Result<TextTree> {
    let config = HighlightConfig::default();
    let spans = Tagger::new(index, &config).collect(tree);
    let mut output = tree.clone();
    output.apply(&spans)?;
    Ok(output)
}

/// Attaches mastery levels to the annotations of a tagged tree.
pub fn resolve_levels(tree: &mut TextTree, kanji: &[KanjiItem], vocab: &[VocabItem]) -> Result<()> {
    LevelResolver::new(kanji, vocab).resolve(tree)
}
