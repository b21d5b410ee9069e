//! JSON transport records for learned items.
//!
//! Two shapes are understood: the flattened records kept by callers
//! (`character`, `meaning`, `kana`, `srs`, `srs_numeric`) and the raw
//! upstream API payload they are distilled from.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{KanjiItem, VocabItem};

/// Flattened kanji record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiRecord {
    /// The kanji character.
    pub character: String,
    /// Mastery tier label.
    pub srs: String,
    /// Mastery tier rank.
    pub srs_numeric: u32,
}

/// Flattened vocabulary record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabRecord {
    /// Vocabulary characters.
    pub character: String,
    /// English meanings, user synonyms appended.
    #[serde(default)]
    pub meaning: Vec<String>,
    /// Kana readings, canonical first.
    #[serde(default)]
    pub kana: Vec<String>,
    /// Mastery tier label.
    pub srs: String,
    /// Mastery tier rank.
    pub srs_numeric: u32,
}

impl From<KanjiRecord> for KanjiItem {
    fn from(record: KanjiRecord) -> Self {
        KanjiItem::new(record.character, record.srs, record.srs_numeric)
    }
}

impl From<VocabRecord> for VocabItem {
    fn from(record: VocabRecord) -> Self {
        VocabItem::new(
            record.character,
            record.kana,
            record.meaning,
            record.srs,
            record.srs_numeric,
        )
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    requested_information: RequestedInformation,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequestedInformation {
    List(Vec<ApiItem>),
    General { general: Vec<ApiItem> },
}

impl RequestedInformation {
    fn into_items(self) -> Vec<ApiItem> {
        match self {
            RequestedInformation::List(items) => items,
            RequestedInformation::General { general } => general,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiItem {
    character: String,
    #[serde(default)]
    meaning: Option<String>,
    #[serde(default)]
    kana: Option<String>,
    #[serde(default)]
    user_specific: Option<UserSpecific>,
}

#[derive(Debug, Deserialize)]
struct UserSpecific {
    srs: String,
    srs_numeric: u32,
    #[serde(default)]
    user_synonyms: Option<Vec<String>>,
}

/// Parses an upstream kanji payload, keeping only learned entries.
pub fn parse_kanji_response(json: &str) -> Result<Vec<KanjiRecord>> {
    let response: ApiResponse = serde_json::from_str(json)?;
    Ok(response
        .requested_information
        .into_items()
        .into_iter()
        .filter_map(|item| {
            let progress = item.user_specific?;
            Some(KanjiRecord {
                character: item.character,
                srs: progress.srs,
                srs_numeric: progress.srs_numeric,
            })
        })
        .collect())
}

/// Parses an upstream vocabulary payload, keeping only learned entries.
pub fn parse_vocab_response(json: &str) -> Result<Vec<VocabRecord>> {
    let response: ApiResponse = serde_json::from_str(json)?;
    Ok(response
        .requested_information
        .into_items()
        .into_iter()
        .filter_map(|item| {
            let progress = item.user_specific?;
            let mut meaning = split_list(item.meaning.as_deref().unwrap_or(""));
            meaning.extend(progress.user_synonyms.unwrap_or_default());
            Some(VocabRecord {
                character: item.character,
                meaning,
                kana: split_list(item.kana.as_deref().unwrap_or("")),
                srs: progress.srs,
                srs_numeric: progress.srs_numeric,
            })
        })
        .collect())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(", ")
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
