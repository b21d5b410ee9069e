use std::collections::HashMap;

use aho_corasick::{AhoCorasick, MatchKind};
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::constants::DEFAULT_REGEX_SIZE_LIMIT;
use crate::error::Result;
use crate::model::{AnnotationKind, ItemRef, KanjiItem, MatchSpan, VocabItem};
use crate::tagger::{build_char_to_byte_map, byte_to_char_index};

/// Builds a [`MatchIndex`] from the two known-item collections.
#[derive(Debug, Clone, Copy)]
pub struct MatchIndexBuilder {
    size_limit: usize,
}

impl Default for MatchIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchIndexBuilder {
    /// Builder with the default kanji pattern size limit.
    pub fn new() -> Self {
        Self {
            size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }

    /// Caps the compiled size (and lazy DFA cache) of the kanji pattern.
    pub fn with_size_limit(mut self, size_limit: usize) -> Self {
        self.size_limit = size_limit;
        self
    }

    /// Compiles the vocabulary automaton and the kanji pattern.
    ///
    /// Every form of every vocabulary item (dictionary form plus one per
    /// inflectional ending) becomes one automaton pattern, searched with
    /// leftmost-longest semantics: the earliest match wins and, among
    /// matches starting there, the longest. A form shared by several items
    /// belongs to the first of them. Empty collections produce an index that
    /// matches nothing.
    pub fn build(&self, kanji: &[KanjiItem], vocab: &[VocabItem]) -> Result<MatchIndex> {
        let mut vocab_forms = HashMap::new();
        let mut patterns = Vec::new();
        let mut pattern_items = Vec::new();
        for (index, item) in vocab.iter().enumerate() {
            for form in item.forms() {
                if form.is_empty() || vocab_forms.contains_key(&form) {
                    continue;
                }
                vocab_forms.insert(form.clone(), index);
                patterns.push(form);
                pattern_items.push(index);
            }
        }

        let mut kanji_chars = HashMap::new();
        for (index, item) in kanji.iter().enumerate() {
            if item.surface_form().is_empty() {
                continue;
            }
            kanji_chars
                .entry(item.surface_form().to_string())
                .or_insert(index);
        }
        let kanji_pattern = kanji_pattern(kanji);

        let automaton = if patterns.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .match_kind(MatchKind::LeftmostLongest)
                    .build(&patterns)?,
            )
        };

        let index = MatchIndex {
            vocab: automaton,
            kanji: self.compile(&kanji_pattern)?,
            kanji_pattern,
            pattern_items,
            vocab_forms,
            kanji_chars,
        };
        debug!(
            vocab_items = vocab.len(),
            vocab_forms = index.vocab_forms.len(),
            kanji_items = index.kanji_chars.len(),
            "built match index"
        );
        Ok(index)
    }

    fn compile(&self, pattern: &str) -> Result<Option<Regex>> {
        if pattern.is_empty() {
            return Ok(None);
        }
        let regex = RegexBuilder::new(pattern)
            .size_limit(self.size_limit)
            .dfa_size_limit(self.size_limit)
            .build()?;
        Ok(Some(regex))
    }
}

fn kanji_pattern(kanji: &[KanjiItem]) -> String {
    kanji
        .iter()
        .filter(|item| !item.surface_form().is_empty())
        .map(|item| regex::escape(item.surface_form()))
        .collect::<Vec<_>>()
        .join("|")
}

/// Compiled matcher over one snapshot.
#[derive(Debug, Clone)]
pub struct MatchIndex {
    vocab: Option<AhoCorasick>,
    kanji: Option<Regex>,
    kanji_pattern: String,
    pattern_items: Vec<usize>,
    vocab_forms: HashMap<String, usize>,
    kanji_chars: HashMap<String, usize>,
}

impl MatchIndex {
    /// Whether the index can match anything at all.
    pub fn is_empty(&self) -> bool {
        self.vocab.is_none() && self.kanji.is_none()
    }

    /// Number of distinct vocabulary forms the index recognises.
    pub fn vocab_form_count(&self) -> usize {
        self.vocab_forms.len()
    }

    /// Source pattern for kanji matches.
    pub fn kanji_pattern(&self) -> &str {
        &self.kanji_pattern
    }

    /// The item that produces `text`, first in collection order.
    pub fn source_of(&self, kind: AnnotationKind, text: &str) -> Option<ItemRef> {
        let table = match kind {
            AnnotationKind::Kanji => &self.kanji_chars,
            AnnotationKind::Vocab => &self.vocab_forms,
        };
        table.get(text).map(|index| ItemRef { kind, index: *index })
    }

    /// Finds every tagged span of `text`, ordered by start offset.
    ///
    /// Vocabulary is matched first; kanji are then matched only in the text
    /// between vocabulary spans, so a word always wins over the single kanji
    /// it contains. Offsets are character based.
    pub fn find_spans(&self, text: &str) -> Vec<MatchSpan> {
        let map = build_char_to_byte_map(text);
        let mut spans = Vec::new();
        let mut gaps = Vec::new();
        let mut cursor = 0;

        if let Some(automaton) = &self.vocab {
            for found in automaton.find_iter(text) {
                let Some(index) = self.pattern_items.get(found.pattern().as_usize()) else {
                    continue;
                };
                gaps.push((cursor, found.start()));
                cursor = found.end();
                spans.push(MatchSpan {
                    start: byte_to_char_index(&map, found.start()),
                    end: byte_to_char_index(&map, found.end()),
                    source: ItemRef {
                        kind: AnnotationKind::Vocab,
                        index: *index,
                    },
                    matched_text: text[found.start()..found.end()].to_string(),
                });
            }
        }
        gaps.push((cursor, text.len()));
        if let Some(regex) = &self.kanji {
            for (gap_start, gap_end) in gaps {
                if gap_start >= gap_end {
                    continue;
                }
                for found in regex.find_iter(&text[gap_start..gap_end]) {
                    let Some(source) = self.source_of(AnnotationKind::Kanji, found.as_str()) else {
                        continue;
                    };
                    spans.push(MatchSpan {
                        start: byte_to_char_index(&map, gap_start + found.start()),
                        end: byte_to_char_index(&map, gap_start + found.end()),
                        source,
                        matched_text: found.as_str().to_string(),
                    });
                }
            }
        }

        spans.sort_by_key(|span| span.start);
        spans
    }
}

#[cfg(test)]
mod index_tests {
    use super::MatchIndexBuilder;
    use crate::model::{AnnotationKind, KanjiItem, VocabItem, WordClass};

    fn vocab(surface: &str, class: WordClass) -> VocabItem {
        VocabItem::with_word_class(surface, vec![], class, "guru", 5)
    }

    #[test]
    fn empty_collections_match_nothing() {
        let index = MatchIndexBuilder::new().build(&[], &[]).expect("build");
        assert!(index.is_empty());
        assert!(index.find_spans("食べる").is_empty());
        assert!(index.find_spans("").is_empty());
    }

    #[test]
    fn longer_inflection_wins_over_shorter_one() {
        let index = MatchIndexBuilder::new()
            .build(&[], &[vocab("食べる", WordClass::VerbIchidan)])
            .expect("build");
        let spans = index.find_spans("食べなかった");
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (0, 6));
        assert_eq!(spans[0].matched_text, "食べなかった");
    }

    #[test]
    fn longer_word_wins_across_items() {
        let index = MatchIndexBuilder::new()
            .build(
                &[],
                &[vocab("行く", WordClass::VerbGodan('く')), vocab("行く先", WordClass::Noun)],
            )
            .expect("build");
        let spans = index.find_spans("行く先");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].matched_text, "行く先");
        assert_eq!(spans[0].source.index, 1);
    }

    #[test]
    fn kanji_only_match_outside_vocabulary() {
        let index = MatchIndexBuilder::new()
            .build(
                &[KanjiItem::new("食", "guru", 5), KanjiItem::new("飲", "guru", 5)],
                &[vocab("食べる", WordClass::VerbIchidan)],
            )
            .expect("build");
        let spans = index.find_spans("食べる食飲");
        let kinds: Vec<_> = spans.iter().map(|span| (span.kind(), span.start, span.end)).collect();
        assert_eq!(
            kinds,
            vec![
                (AnnotationKind::Vocab, 0, 3),
                (AnnotationKind::Kanji, 3, 4),
                (AnnotationKind::Kanji, 4, 5),
            ]
        );
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let index = MatchIndexBuilder::new()
            .build(&[], &[vocab("a.b", WordClass::Noun)])
            .expect("build");
        assert!(index.find_spans("axb").is_empty());
        assert_eq!(index.find_spans("a.b").len(), 1);
    }

    #[test]
    fn leftmost_match_wins_over_a_later_overlapping_one() {
        let index = MatchIndexBuilder::new()
            .build(
                &[],
                &[vocab("BC", WordClass::Noun), vocab("AB", WordClass::Noun)],
            )
            .expect("build");
        let spans = index.find_spans("ABC");
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (0, 2));
        assert_eq!(spans[0].matched_text, "AB");
        assert_eq!(spans[0].source.index, 1);
    }

    #[test]
    fn shared_form_belongs_to_the_first_item() {
        let index = MatchIndexBuilder::new()
            .build(
                &[],
                &[
                    vocab("行う", WordClass::VerbGodan('う')),
                    vocab("行く", WordClass::VerbGodan('く')),
                ],
            )
            .expect("build");
        let spans = index.find_spans("行った");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].source.index, 0);
        assert!(index.vocab_form_count() > 0);
    }

    #[test]
    fn tiny_size_limit_fails_to_compile() {
        let result = MatchIndexBuilder::new().with_size_limit(16).build(
            &[
                KanjiItem::new("食", "guru", 5),
                KanjiItem::new("飲", "guru", 5),
                KanjiItem::new("水", "guru", 5),
            ],
            &[],
        );
        assert!(matches!(result, Err(crate::HighlightError::Pattern(_))));
    }
}
