use tracing::debug;

use crate::error::{HighlightError, Result};
use crate::model::{AnnotationKind, KanjiItem, VocabItem};
use crate::tree::TextTree;

/// Looks up mastery levels for annotated text.
#[derive(Debug, Clone, Copy)]
pub struct LevelResolver<'a> {
    kanji: &'a [KanjiItem],
    vocab: &'a [VocabItem],
}

impl<'a> LevelResolver<'a> {
    /// Resolver over the collections the tree was tagged against.
    pub fn new(kanji: &'a [KanjiItem], vocab: &'a [VocabItem]) -> Self {
        Self { kanji, vocab }
    }

    /// The kanji whose character equals `text`.
    pub fn resolve_kanji(&self, text: &str) -> Result<&'a KanjiItem> {
        self.kanji
            .iter()
            .find(|item| item.surface_form() == text)
            .ok_or_else(|| inconsistent(AnnotationKind::Kanji, text))
    }

    /// The first vocabulary item, in collection order, that has `text` as
    /// its dictionary form or one of its inflected forms.
    pub fn resolve_vocab(&self, text: &str) -> Result<&'a VocabItem> {
        self.vocab
            .iter()
            .find(|item| item.has_form(text))
            .ok_or_else(|| inconsistent(AnnotationKind::Vocab, text))
    }

    /// Sets the level of every annotation in `tree`.
    ///
    /// Fails on the first annotation no item accounts for, which means the
    /// tree was tagged against a different snapshot. Annotations resolved
    /// before the failure keep their new level.
    pub fn resolve(&self, tree: &mut TextTree) -> Result<()> {
        let pending: Vec<_> = tree
            .annotations()
            .into_iter()
            .map(|(id, annotation)| (id, annotation.kind, annotation.text.clone()))
            .collect();
        for (id, kind, text) in &pending {
            let level = match kind {
                AnnotationKind::Kanji => self.resolve_kanji(text)?.level(),
                AnnotationKind::Vocab => self.resolve_vocab(text)?.level(),
            };
            if let Some(annotation) = tree.annotation_mut(*id) {
                annotation.level = Some(level.to_string());
            }
        }
        debug!(annotations = pending.len(), "resolved levels");
        Ok(())
    }
}

fn inconsistent(kind: AnnotationKind, text: &str) -> HighlightError {
    HighlightError::InconsistentSnapshot {
        kind,
        text: text.to_string(),
    }
}
