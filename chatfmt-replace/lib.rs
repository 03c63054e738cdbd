//! Regex find-and-replace over styled chat text.
//!
//! A message is a [`chatfmt_core::Node`] tree. Replacing in it works on the
//! plain text of runs of adjacent text leaves, so a match can span leaves
//! with different styles. Template and opaque leaves break runs and are never
//! matched into. Template arguments are replaced on their own.

mod error;
mod escape;
pub mod expand;
pub mod matcher;
pub mod replace;
pub mod replacer;
pub mod rules;
pub mod segment;

pub use error::{
  BoxError,
  ReplaceError,
  Result,
};
pub use expand::Expand;
pub use matcher::NodeMatch;
pub use replace::{
  NodePattern,
  NodePatternBuilder,
  ReplaceOptions,
  replace_all,
  replace_all_escaped,
};
pub use replacer::{
  Replacer,
  TryFn,
  WithSlice,
  try_fn,
  with_slice,
};
pub use rules::{
  Rule,
  RuleSet,
};
pub use segment::{
  Run,
  Segment,
  segment,
};
