use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DEFAULT_REGEX_SIZE_LIMIT, DEFAULT_SKIPPED_ELEMENTS, ENV_CACHE_PATH, ENV_REGEX_SIZE_LIMIT,
    KANJI_COLOR, KANJI_TAG, VOCAB_COLOR, VOCAB_TAG,
};
use crate::error::{HighlightError, Result};
use crate::model::AnnotationKind;

/// Bounded exponential backoff for item retrieval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    /// Growth factor between consecutive delays.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Sets the total number of attempts.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the delay after the first failure.
    pub fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    /// Caps every delay.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Sets the growth factor between delays.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let scaled = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        if !scaled.is_finite() || scaled >= self.max_delay.as_secs_f64() {
            return self.max_delay;
        }
        Duration::from_secs_f64(scaled)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(HighlightError::InvalidArgument(
                "RetryPolicy.max_attempts must be >= 1".to_string(),
            ));
        }
        if !(self.multiplier >= 1.0) {
            return Err(HighlightError::InvalidArgument(format!(
                "RetryPolicy.multiplier must be >= 1.0, got {}",
                self.multiplier
            )));
        }
        Ok(())
    }
}

/// Settings for one highlighter.
#[derive(Debug, Clone)]
pub struct HighlightConfig {
    /// Tag name of kanji annotations.
    pub kanji_tag: String,
    /// Tag name of vocabulary annotations.
    pub vocab_tag: String,
    /// Render colour of kanji annotations.
    pub kanji_color: String,
    /// Render colour of vocabulary annotations.
    pub vocab_color: String,
    /// Element names whose subtrees are never scanned.
    pub skipped_elements: Vec<String>,
    /// Size limit in bytes for the compiled kanji pattern and its lazy DFA.
    pub regex_size_limit: usize,
    /// Snapshot cache file used by [`crate::Highlighter::from_repository`].
    pub cache_path: Option<PathBuf>,
    /// Backoff for item retrieval.
    pub retry: RetryPolicy,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        let mut skipped_elements: Vec<String> = DEFAULT_SKIPPED_ELEMENTS
            .iter()
            .map(|name| name.to_string())
            .collect();
        skipped_elements.push(KANJI_TAG.to_string());
        skipped_elements.push(VOCAB_TAG.to_string());

        Self {
            kanji_tag: KANJI_TAG.to_string(),
            vocab_tag: VOCAB_TAG.to_string(),
            kanji_color: KANJI_COLOR.to_string(),
            vocab_color: VOCAB_COLOR.to_string(),
            skipped_elements,
            regex_size_limit: env::var(ENV_REGEX_SIZE_LIMIT)
                .ok()
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(DEFAULT_REGEX_SIZE_LIMIT),
            cache_path: env::var_os(ENV_CACHE_PATH).map(PathBuf::from),
            retry: RetryPolicy::default(),
        }
    }
}

impl HighlightConfig {
    /// Renames the kanji annotation tag and keeps it out of scans.
    pub fn with_kanji_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.kanji_tag = tag.clone();
        self.skip_element(tag)
    }

    /// Renames the vocabulary annotation tag and keeps it out of scans.
    pub fn with_vocab_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.vocab_tag = tag.clone();
        self.skip_element(tag)
    }

    /// Sets the kanji render colour.
    pub fn with_kanji_color(mut self, color: impl Into<String>) -> Self {
        self.kanji_color = color.into();
        self
    }

    /// Sets the vocabulary render colour.
    pub fn with_vocab_color(mut self, color: impl Into<String>) -> Self {
        self.vocab_color = color.into();
        self
    }

    /// Adds an element name whose subtree is never scanned.
    pub fn skip_element(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.skipped_elements.contains(&name) {
            self.skipped_elements.push(name);
        }
        self
    }

    /// Sets [`Self::regex_size_limit`].
    pub fn with_regex_size_limit(mut self, limit: usize) -> Self {
        self.regex_size_limit = limit;
        self
    }

    /// Sets the snapshot cache file.
    pub fn with_cache_path(mut self, path: impl AsRef<Path>) -> Self {
        self.cache_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the retrieval backoff.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Tag name used for annotations of `kind`.
    pub fn tag_for(&self, kind: AnnotationKind) -> &str {
        match kind {
            AnnotationKind::Kanji => &self.kanji_tag,
            AnnotationKind::Vocab => &self.vocab_tag,
        }
    }

    /// Render colour used for annotations of `kind`.
    pub fn color_for(&self, kind: AnnotationKind) -> &str {
        match kind {
            AnnotationKind::Kanji => &self.kanji_color,
            AnnotationKind::Vocab => &self.vocab_color,
        }
    }

    pub(crate) fn is_skipped(&self, element: &str) -> bool {
        self.skipped_elements
            .iter()
            .any(|name| name.eq_ignore_ascii_case(element))
    }

    /// Rejects settings the highlighter cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.kanji_tag.is_empty() || self.vocab_tag.is_empty() {
            return Err(HighlightError::InvalidArgument(
                "annotation tag names must not be empty".to_string(),
            ));
        }
        if self.kanji_tag == self.vocab_tag {
            return Err(HighlightError::InvalidArgument(format!(
                "kanji and vocabulary tags must differ, both are {:?}",
                self.kanji_tag
            )));
        }
        if self.regex_size_limit == 0 {
            return Err(HighlightError::InvalidArgument(
                "HighlightConfig.regex_size_limit must be >= 1".to_string(),
            ));
        }
        self.retry.validate()
    }
}
