#![deny(missing_docs)]

//! Highlights known Japanese kanji and vocabulary in text.
//!
//! A learner's known items are compiled into a [`MatchIndex`]; text trees
//! are scanned with it, every match is wrapped in an annotation node, and
//! each annotation is labelled with the mastery level of the item it came
//! from. Verbs are matched in their common inflected forms as well as their
//! dictionary form.
//!
//! ## Quick Start
//! ```
//! use kotoba_highlight::{Highlighter, ItemSnapshot, KanjiItem, TextTree, VocabItem};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let snapshot = ItemSnapshot::new(
//!         vec![KanjiItem::new("走", "guru", 5)],
//!         vec![VocabItem::new(
//!             "走る",
//!             vec!["はしる".to_string()],
//!             vec!["to run".to_string()],
//!             "master",
//!             6,
//!         )],
//!     );
//!     let highlighter = Highlighter::new(snapshot)?;
//!     let tree = highlighter.highlight(&TextTree::from_text("彼は走った。"))?;
//!     let annotations = tree.annotations();
//!     assert_eq!(annotations.len(), 1);
//!     assert_eq!(annotations[0].1.text, "走った");
//!     assert_eq!(annotations[0].1.level.as_deref(), Some("master"));
//!     Ok(())
//! }
//! ```
//!
//! ## Loading Items
//! Items usually come from an [`ItemRepository`]. [`Highlighter::from_repository`]
//! retries failed reads with bounded exponential backoff and, when a cache
//! path is configured, keeps the last snapshot in a JSON file.
//!
//! ```no_run
//! use kotoba_highlight::{
//!     parse_kanji_response, parse_vocab_response, HighlightConfig, Highlighter, ItemSnapshot,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let kanji = parse_kanji_response(&std::fs::read_to_string("kanji.json")?)?;
//!     let vocab = parse_vocab_response(&std::fs::read_to_string("vocabulary.json")?)?;
//!     let snapshot = ItemSnapshot::from_records(kanji, vocab);
//!     let config = HighlightConfig::default().with_cache_path("items.json");
//!     let highlighter = Highlighter::from_repository(&snapshot, config)?;
//!     println!("{} vocabulary forms", highlighter.index().vocab_form_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Offset Rules
//! Span offsets are character indices (based on `str.chars()`), not byte
//! indices.
//!
//! ## Environment Variables
//! - `KOTOBA_HIGHLIGHT_CACHE_PATH`: snapshot cache file.
//! - `KOTOBA_HIGHLIGHT_REGEX_SIZE_LIMIT`: compiled pattern size limit in bytes.

mod cache;
mod classify;
mod constants;
mod error;
mod exceptions;
mod index;
mod inflect;
mod levels;
mod model;
mod records;
mod repository;
mod runtime;
mod stems;
mod tagger;
mod tree;
mod types;

pub use cache::{default_cache_path, SnapshotCache};
pub use classify::classify;
pub use constants::*;
pub use error::{HighlightError, Result};
pub use exceptions::{is_godan_exception, GODAN_RU_EXCEPTIONS};
pub use index::{MatchIndex, MatchIndexBuilder};
pub use inflect::{inflect, inflected_forms};
pub use levels::LevelResolver;
pub use model::{
    AnnotationKind, ItemRef, KanjiItem, LearnedItem, MatchSpan, VocabItem, WordClass,
};
pub use records::{parse_kanji_response, parse_vocab_response, KanjiRecord, VocabRecord};
pub use repository::{fetch_with_retry, ItemRepository, ItemSnapshot};
pub use runtime::{build_index, resolve_levels, tag, Highlighter};
pub use stems::{godan_stems, GodanStems, GODAN_TABLES, ICHIDAN_ENDINGS};
pub use tagger::{LeafSpan, Tagger};
pub use tree::{Annotation, NodeId, NodeKind, TextTree};
pub use types::{HighlightConfig, RetryPolicy};

#[cfg(test)]
mod test_support;
