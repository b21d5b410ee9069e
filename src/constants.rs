//! Fixed language data and defaults shared across the crate.

/// Default tag name for kanji annotations.
pub const KANJI_TAG: &str = "kotoba-kanji";
/// Default tag name for vocabulary annotations.
pub const VOCAB_TAG: &str = "kotoba-vocab";

/// Default render colour for kanji annotations.
pub const KANJI_COLOR: &str = "#f100a0";
/// Default render colour for vocabulary annotations.
pub const VOCAB_COLOR: &str = "#a000f1";

/// Element names whose subtrees are never scanned by default.
pub const DEFAULT_SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "textarea"];

/// Default compiled-pattern size budget, in bytes.
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 64 * (1 << 20);

/// Environment variable overriding the snapshot cache file.
pub const ENV_CACHE_PATH: &str = "KOTOBA_HIGHLIGHT_CACHE_PATH";
/// Environment variable overriding [`DEFAULT_REGEX_SIZE_LIMIT`].
pub const ENV_REGEX_SIZE_LIMIT: &str = "KOTOBA_HIGHLIGHT_REGEX_SIZE_LIMIT";

/// Prefix the first English gloss of a verb starts with.
pub const VERB_GLOSS_PREFIX: &str = "to ";

/// Terminal kana a dictionary-form verb can end with.
pub const VERB_TERMINALS: [char; 9] = ['う', 'つ', 'る', 'ぶ', 'む', 'ぬ', 'く', 'ぐ', 'す'];

/// Kana that may precede the final る of an ichidan verb's reading.
pub const ICHIDAN_PRE_RU: [char; 24] = [
    'え', 'け', 'げ', 'め', 'へ', 'べ', 'せ', 'ぜ', 'ね', 'れ', 'て', 'で', //
    'い', 'き', 'ぎ', 'み', 'ひ', 'び', 'し', 'じ', 'に', 'り', 'ち', 'ぢ',
];

/// Dictionary-form ending of suru verbs.
pub const SURU_ENDING: &str = "する";
/// The one kuru verb.
pub const KURU: &str = "来る";

pub(crate) const CACHE_DIR_NAME: &str = "kotoba-highlight";
pub(crate) const CACHE_FILE_NAME: &str = "items.json";
