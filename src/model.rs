use serde::{Deserialize, Serialize};

use crate::classify::classify;
use crate::inflect::inflect;

/// Fields shared by every learned item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnedItem {
    /// Kanji or vocabulary characters.
    pub surface_form: String,
    /// Opaque mastery tier label (for example `"guru"`).
    pub level: String,
    /// Monotonic ordering of `level`.
    pub level_rank: u32,
}

impl LearnedItem {
    /// Creates a learned item.
    pub fn new(surface_form: impl Into<String>, level: impl Into<String>, level_rank: u32) -> Self {
        Self {
            surface_form: surface_form.into(),
            level: level.into(),
            level_rank,
        }
    }
}

/// A known kanji. The surface form is exactly one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiItem {
    /// Shared learned-item fields.
    #[serde(flatten)]
    pub learned: LearnedItem,
}

impl KanjiItem {
    /// Creates a kanji item.
    pub fn new(character: impl Into<String>, level: impl Into<String>, level_rank: u32) -> Self {
        Self {
            learned: LearnedItem::new(character, level, level_rank),
        }
    }

    /// The kanji character.
    pub fn surface_form(&self) -> &str {
        &self.learned.surface_form
    }

    /// Mastery tier label.
    pub fn level(&self) -> &str {
        &self.learned.level
    }
}

/// Conjugation class of a vocabulary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordClass {
    /// Nouns, na-adjectives and everything not otherwise classified.
    Noun,
    /// い-adjective. Not conjugated.
    IAdjective,
    /// する compound. Not conjugated.
    VerbSuru,
    /// 来る.
    VerbKuru,
    /// Ru-verb.
    VerbIchidan,
    /// U-verb, carrying its terminal kana.
    VerbGodan(char),
}

impl WordClass {
    /// Whether the class is any verb variant.
    pub fn is_verb(self) -> bool {
        matches!(
            self,
            WordClass::VerbSuru | WordClass::VerbKuru | WordClass::VerbIchidan | WordClass::VerbGodan(_)
        )
    }
}

/// A known vocabulary word together with its cached classification and
/// inflectional endings.
///
/// `inflections` holds endings appended to [`VocabItem::stem`]; the terminal
/// kana of the dictionary form is itself one of the endings. The list is
/// ordered longest first and is empty for non-verbs and する verbs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabItem {
    /// Shared learned-item fields.
    #[serde(flatten)]
    pub learned: LearnedItem,
    /// Kana readings, canonical first.
    pub reading: Vec<String>,
    /// English meanings, used only for classification.
    pub glosses: Vec<String>,
    /// Conjugation class.
    pub word_class: WordClass,
    /// Inflectional endings, longest first.
    pub inflections: Vec<String>,
}

impl VocabItem {
    /// Creates a vocabulary item, classifying it and generating its
    /// inflections.
    pub fn new(
        surface_form: impl Into<String>,
        reading: Vec<String>,
        glosses: Vec<String>,
        level: impl Into<String>,
        level_rank: u32,
    ) -> Self {
        let surface_form = surface_form.into();
        let word_class = classify(&surface_form, &reading, &glosses);
        Self::assemble(
            LearnedItem::new(surface_form, level, level_rank),
            reading,
            glosses,
            word_class,
        )
    }

    /// Creates a vocabulary item with a caller-supplied class.
    pub fn with_word_class(
        surface_form: impl Into<String>,
        reading: Vec<String>,
        word_class: WordClass,
        level: impl Into<String>,
        level_rank: u32,
    ) -> Self {
        Self::assemble(
            LearnedItem::new(surface_form, level, level_rank),
            reading,
            Vec::new(),
            word_class,
        )
    }

    fn assemble(
        learned: LearnedItem,
        reading: Vec<String>,
        glosses: Vec<String>,
        word_class: WordClass,
    ) -> Self {
        let inflections = inflect(&learned.surface_form, word_class);
        Self {
            learned,
            reading,
            glosses,
            word_class,
            inflections,
        }
    }

    /// The vocabulary characters.
    pub fn surface_form(&self) -> &str {
        &self.learned.surface_form
    }

    /// Mastery tier label.
    pub fn level(&self) -> &str {
        &self.learned.level
    }

    /// Substring the inflectional endings attach to: the surface form minus
    /// its terminal kana, or the whole surface form when there are no
    /// endings.
    pub fn stem(&self) -> &str {
        let surface = self.surface_form();
        if self.inflections.is_empty() {
            return surface;
        }
        match surface.char_indices().last() {
            Some((index, _)) => &surface[..index],
            None => surface,
        }
    }

    /// Every surface form this item can appear as: the dictionary form
    /// first, then one form per ending.
    pub fn forms(&self) -> impl Iterator<Item = String> + '_ {
        let stem = self.stem();
        std::iter::once(self.surface_form().to_string())
            .chain(self.inflections.iter().map(move |ending| format!("{stem}{ending}")))
    }

    /// Whether `text` is one of [`Self::forms`].
    pub fn has_form(&self, text: &str) -> bool {
        if text == self.surface_form() {
            return true;
        }
        let stem = self.stem();
        text.strip_prefix(stem)
            .map(|ending| self.inflections.iter().any(|candidate| candidate == ending))
            .unwrap_or(false)
    }
}

/// Which collection an annotation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationKind {
    /// Single-kanji match.
    Kanji,
    /// Vocabulary match, possibly inflected.
    Vocab,
}

impl AnnotationKind {
    /// Lowercase name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            AnnotationKind::Kanji => "kanji",
            AnnotationKind::Vocab => "vocabulary",
        }
    }
}

/// Back-reference from a match to the snapshot item that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRef {
    /// Collection the item lives in.
    pub kind: AnnotationKind,
    /// Position of the item in that collection.
    pub index: usize,
}

/// A tagged span of scanned text.
///
/// `start`/`end` are character offsets (Rust `str.chars()` index space, not
/// byte offsets), `start < end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan {
    /// Inclusive begin offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
    /// Item the match was produced from.
    pub source: ItemRef,
    /// Literal matched text.
    pub matched_text: String,
}

impl MatchSpan {
    /// Annotation kind of the span.
    pub fn kind(&self) -> AnnotationKind {
        self.source.kind
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always `false` for spans produced by the tagger.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[cfg(test)]
mod model_tests {
    use super::{VocabItem, WordClass};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn ichidan_item_reconstructs_its_forms() {
        let item = VocabItem::new(
            "食べる",
            strings(&["たべる"]),
            strings(&["to eat"]),
            "guru",
            5,
        );
        assert_eq!(item.word_class, WordClass::VerbIchidan);
        assert_eq!(item.stem(), "食べ");
        assert!(item.has_form("食べる"));
        assert!(item.has_form("食べなかった"));
        assert!(!item.has_form("食べ"));
        let forms: Vec<String> = item.forms().collect();
        assert_eq!(forms[0], "食べる");
        assert!(forms.contains(&"食べませんでした".to_string()));
    }

    #[test]
    fn noun_stem_is_the_whole_surface() {
        let item = VocabItem::new("日本", strings(&["にほん"]), strings(&["Japan"]), "master", 6);
        assert_eq!(item.word_class, WordClass::Noun);
        assert!(item.inflections.is_empty());
        assert_eq!(item.stem(), "日本");
        assert_eq!(item.forms().collect::<Vec<_>>(), vec!["日本".to_string()]);
    }

    #[test]
    fn serialized_items_keep_flattened_learned_fields() {
        let item = VocabItem::with_word_class(
            "走る",
            strings(&["はしる"]),
            WordClass::VerbGodan('る'),
            "enlightened",
            8,
        );
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["surface_form"], "走る");
        assert_eq!(json["level_rank"], 8);
        let back: VocabItem = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, item);
    }
}
