use std::fmt;

use crate::model::AnnotationKind;

/// Error type returned by kotoba-highlight public APIs.
#[derive(Debug)]
pub enum HighlightError {
    /// User-provided arguments were invalid.
    InvalidArgument(String),
    /// The match index could not be compiled.
    Pattern(String),
    /// An annotation could not be traced back to an item of the snapshot it
    /// was produced from. The current pass is aborted.
    InconsistentSnapshot {
        /// Kind of annotation that failed to resolve.
        kind: AnnotationKind,
        /// Literal text carried by the annotation.
        text: String,
    },
    /// Learned-item retrieval failed.
    Repository(String),
    /// Snapshot cache could not be read or written.
    Cache(String),
    /// Transport or cache JSON was malformed.
    Json(serde_json::Error),
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightError::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            HighlightError::Pattern(message) => write!(f, "failed to compile match index: {message}"),
            HighlightError::InconsistentSnapshot { kind, text } => write!(
                f,
                "no {} item matches annotated text {text:?}; index and snapshot disagree",
                kind.label()
            ),
            HighlightError::Repository(message) => write!(f, "item repository error: {message}"),
            HighlightError::Cache(message) => write!(f, "snapshot cache error: {message}"),
            HighlightError::Json(error) => write!(f, "malformed item json: {error}"),
        }
    }
}

impl std::error::Error for HighlightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HighlightError::Json(error) => Some(error),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HighlightError {
    fn from(value: serde_json::Error) -> Self {
        HighlightError::Json(value)
    }
}

impl From<aho_corasick::BuildError> for HighlightError {
    fn from(value: aho_corasick::BuildError) -> Self {
        HighlightError::Pattern(value.to_string())
    }
}

impl From<regex::Error> for HighlightError {
    fn from(value: regex::Error) -> Self {
        HighlightError::Pattern(value.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HighlightError>;
