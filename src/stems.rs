//! Sound-stem tables for godan verbs and the ichidan ending set.

/// Derived stems for one godan terminal kana.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GodanStems {
    /// Dictionary-form terminal kana.
    pub terminal: char,
    /// a-sound stem (negative, passive, causative).
    pub a: char,
    /// i-sound stem (masu forms).
    pub i: char,
    /// e-sound stem (potential).
    pub e: char,
    /// Prefix placed before the て/た linker.
    pub te: char,
    /// Whether the linker is voiced (で/だ).
    pub voiced: bool,
}

impl GodanStems {
    const fn new(terminal: char, a: char, i: char, e: char, te: char, voiced: bool) -> Self {
        Self {
            terminal,
            a,
            i,
            e,
            te,
            voiced,
        }
    }

    /// te-form linker, て or で.
    pub fn te_linker(&self) -> char {
        if self.voiced {
            'で'
        } else {
            'て'
        }
    }

    /// Plain-past linker, た or だ.
    pub fn ta_linker(&self) -> char {
        if self.voiced {
            'だ'
        } else {
            'た'
        }
    }
}

const U: GodanStems = GodanStems::new('う', 'わ', 'い', 'え', 'っ', false);
const TSU: GodanStems = GodanStems::new('つ', 'た', 'ち', 'て', 'っ', false);
const RU: GodanStems = GodanStems::new('る', 'ら', 'り', 'れ', 'っ', false);
const KU: GodanStems = GodanStems::new('く', 'か', 'き', 'け', 'い', false);
const GU: GodanStems = GodanStems::new('ぐ', 'が', 'ぎ', 'げ', 'い', true);
const BU: GodanStems = GodanStems::new('ぶ', 'ば', 'び', 'べ', 'ん', true);
const MU: GodanStems = GodanStems::new('む', 'ま', 'み', 'め', 'ん', true);
const NU: GodanStems = GodanStems::new('ぬ', 'な', 'に', 'ね', 'ん', true);
const SU: GodanStems = GodanStems::new('す', 'さ', 'し', 'せ', 'し', false);

/// 行く and its compounds take っ before the linker.
pub(crate) const IKU: GodanStems = GodanStems::new('く', 'か', 'き', 'け', 'っ', false);

/// Every godan table, in the order of [`crate::constants::VERB_TERMINALS`].
pub const GODAN_TABLES: [GodanStems; 9] = [U, TSU, RU, BU, MU, NU, KU, GU, SU];

/// Endings shared by ichidan verbs and 来る, appended to the stem.
pub const ICHIDAN_ENDINGS: [&str; 11] = [
    "る",
    "ない",
    "ます",
    "ません",
    "ました",
    "ませんでした",
    "なかった",
    "た",
    "て",
    "なくて",
    "ろ",
];

/// Looks up the stem table for a godan terminal kana.
pub fn godan_stems(terminal: char) -> Option<GodanStems> {
    GODAN_TABLES
        .iter()
        .copied()
        .find(|stems| stems.terminal == terminal)
}
