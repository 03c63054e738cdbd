use thiserror::Error;

/// Error type a [`crate::Replacer`] may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, ReplaceError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReplaceError {
  #[error("invalid pattern '{pattern}': {source}")]
  Pattern {
    pattern: String,
    #[source]
    source:  regex::Error,
  },
  #[error("replacement for match {start}..{end} failed: {source}")]
  Callback {
    start:  usize,
    end:    usize,
    #[source]
    source: BoxError,
  },
  #[error("replacement for match {start}..{end} produced no node")]
  MissingReplacement { start: usize, end: usize },
  #[error("invalid replacement template '{template}': {reason}")]
  Template {
    template: String,
    reason:   &'static str,
  },
  #[error(transparent)]
  Config(#[from] toml::de::Error),
}
