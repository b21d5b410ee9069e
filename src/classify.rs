//! Conjugation-class detection for vocabulary entries.

use crate::constants::{ICHIDAN_PRE_RU, KURU, SURU_ENDING, VERB_GLOSS_PREFIX, VERB_TERMINALS};
use crate::exceptions::is_godan_exception;
use crate::model::WordClass;

/// Classifies a vocabulary entry from its surface form, readings and
/// glosses.
///
/// Only entries whose first gloss starts with `"to "` and whose surface ends
/// in a verb terminal kana are treated as verbs. The canonical (first)
/// reading decides between ichidan and godan for る-verbs, with a fixed list
/// of godan look-alikes overriding the reading check.
pub fn classify(surface: &str, reading: &[String], glosses: &[String]) -> WordClass {
    let Some(terminal) = surface.chars().last() else {
        return WordClass::Noun;
    };

    let glossed_as_verb = glosses
        .first()
        .map(|gloss| gloss.starts_with(VERB_GLOSS_PREFIX))
        .unwrap_or(false);
    if !glossed_as_verb || !VERB_TERMINALS.contains(&terminal) {
        return if terminal == 'い' {
            WordClass::IAdjective
        } else {
            WordClass::Noun
        };
    }

    if surface.ends_with(SURU_ENDING) {
        return WordClass::VerbSuru;
    }
    if surface == KURU {
        return WordClass::VerbKuru;
    }
    if terminal == 'る' && reading_looks_ichidan(reading) && !is_godan_exception(surface) {
        return WordClass::VerbIchidan;
    }
    WordClass::VerbGodan(terminal)
}

fn reading_looks_ichidan(reading: &[String]) -> bool {
    let Some(canonical) = reading.first() else {
        return false;
    };
    let Some(before_ru) = canonical.strip_suffix('る') else {
        return false;
    };
    before_ru
        .chars()
        .last()
        .map(|kana| ICHIDAN_PRE_RU.contains(&kana))
        .unwrap_or(false)
}
