//! Inflected-form generation for classified verbs.

use crate::model::WordClass;
use crate::stems::{godan_stems, GodanStems, ICHIDAN_ENDINGS, IKU};

/// Produces the inflectional endings of a classified entry, longest first.
///
/// Endings attach to the surface form minus its terminal kana. する verbs and
/// non-verbs yield no endings, so they only ever match in dictionary form.
pub fn inflect(surface: &str, class: WordClass) -> Vec<String> {
    let endings = match class {
        WordClass::Noun | WordClass::IAdjective | WordClass::VerbSuru => Vec::new(),
        WordClass::VerbKuru | WordClass::VerbIchidan => {
            ICHIDAN_ENDINGS.iter().map(|ending| ending.to_string()).collect()
        }
        WordClass::VerbGodan(terminal) => match godan_table(surface, terminal) {
            Some(stems) => godan_endings(&stems),
            None => Vec::new(),
        },
    };
    longest_first(endings)
}

/// Full inflected surface forms of a classified entry, longest first.
pub fn inflected_forms(surface: &str, class: WordClass) -> Vec<String> {
    let stem = match surface.char_indices().last() {
        Some((index, _)) => &surface[..index],
        None => surface,
    };
    inflect(surface, class)
        .into_iter()
        .map(|ending| format!("{stem}{ending}"))
        .collect()
}

fn godan_table(surface: &str, terminal: char) -> Option<GodanStems> {
    if surface.ends_with("行く") {
        return Some(IKU);
    }
    godan_stems(terminal)
}

fn godan_endings(stems: &GodanStems) -> Vec<String> {
    let GodanStems { terminal, a, i, e, te, .. } = *stems;
    let te_linker = stems.te_linker();
    let ta_linker = stems.ta_linker();

    vec![
        terminal.to_string(),
        format!("{a}ない"),
        format!("{a}なかった"),
        format!("{i}ます"),
        format!("{i}ません"),
        format!("{i}ました"),
        format!("{i}ませんでした"),
        format!("{te}{ta_linker}"),
        format!("{te}{te_linker}"),
        format!("{a}なくて"),
        format!("{e}る"),
        format!("{a}れる"),
        format!("{a}せる"),
        format!("{terminal}な"),
    ]
}

/// Stable sort by decreasing character count, dropping repeats.
fn longest_first(mut endings: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(endings.len());
    endings.retain(|ending| {
        if seen.contains(ending) {
            false
        } else {
            seen.push(ending.clone());
            true
        }
    });
    endings.sort_by_key(|ending| std::cmp::Reverse(ending.chars().count()));
    endings
}
