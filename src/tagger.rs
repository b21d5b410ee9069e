use tracing::debug;

use crate::index::MatchIndex;
use crate::model::MatchSpan;
use crate::tree::{NodeId, TextTree};
use crate::types::HighlightConfig;

/// A match located in one text leaf of a [`TextTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafSpan {
    /// The text leaf the span offsets refer to.
    pub leaf: NodeId,
    /// The match, in character offsets of the leaf text.
    pub span: MatchSpan,
}

/// Scans a tree with a compiled [`MatchIndex`].
///
/// A tagger never mutates the tree. [`Tagger::collect`] returns every span
/// to wrap and [`TextTree::apply`] performs the split afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Tagger<'a> {
    index: &'a MatchIndex,
    config: &'a HighlightConfig,
}

impl<'a> Tagger<'a> {
    /// Tagger scanning with `index`, skipping the elements `config` lists.
    pub fn new(index: &'a MatchIndex, config: &'a HighlightConfig) -> Self {
        Self { index, config }
    }

    /// Spans for every text leaf outside skipped elements and existing
    /// annotations, leaves in reverse document order.
    pub fn collect(&self, tree: &TextTree) -> Vec<LeafSpan> {
        if self.index.is_empty() {
            return Vec::new();
        }
        let leaves = tree.text_leaves(|name| self.config.is_skipped(name));
        let mut out = Vec::new();
        for leaf in &leaves {
            let Some(text) = tree.leaf_text(*leaf) else {
                continue;
            };
            out.extend(
                self.tag_text(text)
                    .into_iter()
                    .map(|span| LeafSpan { leaf: *leaf, span }),
            );
        }
        debug!(leaves = leaves.len(), spans = out.len(), "collected spans");
        out
    }

    /// Spans of a standalone string.
    pub fn tag_text(&self, text: &str) -> Vec<MatchSpan> {
        if text.is_empty() {
            return Vec::new();
        }
        self.index.find_spans(text)
    }
}

pub(crate) fn ranges_overlap(a_begin: usize, a_end: usize, b_begin: usize, b_end: usize) -> bool {
    a_begin < b_end && b_begin < a_end
}

/// Char index of a byte offset, given the map from [`build_char_to_byte_map`].
pub(crate) fn byte_to_char_index(map: &[usize], byte_index: usize) -> usize {
    map.partition_point(|offset| *offset < byte_index)
        .min(map.len().saturating_sub(1))
}

pub(crate) fn build_char_to_byte_map(text: &str) -> Vec<usize> {
    let mut map = Vec::with_capacity(text.chars().count() + 1);
    for (index, _) in text.char_indices() {
        map.push(index);
    }
    map.push(text.len());
    map
}

pub(crate) fn slice_char_range<'a>(text: &'a str, map: &[usize], begin: usize, end: usize) -> &'a str {
    let max = map.len().saturating_sub(1);
    let safe_begin = begin.min(max);
    let safe_end = end.min(max).max(safe_begin);
    &text[map[safe_begin]..map[safe_end]]
}
