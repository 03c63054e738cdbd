//! Ways to produce the node that replaces a match.
//!
//! [`Replacer`] is implemented for:
//!
//! - [`Node`] and `&Node` - a fixed replacement; escaped matches keep their
//!   occurrence
//! - `FnMut(&NodeMatch) -> Node` - a callback invoked for every match,
//!   escaped or not
//! - [`try_fn`] - a fallible callback which may also decline to produce a
//!   node
//! - [`with_slice`] - a callback which also receives the matched
//!   single-codepoint leaves
//!
//! A replacer that fails, or returns no node, aborts the whole replace call.
//! No partially replaced tree is ever returned.
//!
//! Closures passed directly need their argument type spelled out, as with
//! the `regex` crate:
//!
//! ```
//! use chatfmt_core::Node;
//! use chatfmt_replace::{NodeMatch, replace_all};
//!
//! let out = replace_all(&Node::text("a1b22"), r"\d+", |m: &NodeMatch<'_>| {
//!   Node::text(format!("<{}>", m.as_str()))
//! })
//! .unwrap();
//! assert_eq!(out.plain_text(), "a<1>b<22>");
//! ```

use chatfmt_core::Node;

use crate::{
  error::BoxError,
  matcher::NodeMatch,
};

pub trait Replacer {
  /// Produces the node for one match. `Ok(None)` means no replacement could
  /// be built, which is reported as [`crate::ReplaceError::MissingReplacement`].
  fn replace_match(&mut self, m: &NodeMatch<'_>) -> Result<Option<Node>, BoxError>;
}

impl Replacer for Node {
  fn replace_match(&mut self, m: &NodeMatch<'_>) -> Result<Option<Node>, BoxError> {
    (&*self).replace_match(m)
  }
}

impl Replacer for &Node {
  fn replace_match(&mut self, m: &NodeMatch<'_>) -> Result<Option<Node>, BoxError> {
    if m.is_escaped() {
      return Ok(Some(m.literal()));
    }
    Ok(Some((*self).clone()))
  }
}

impl<F> Replacer for F
where
  F: FnMut(&NodeMatch<'_>) -> Node,
{
  fn replace_match(&mut self, m: &NodeMatch<'_>) -> Result<Option<Node>, BoxError> {
    Ok(Some(self(m)))
  }
}

/// See [`try_fn`].
#[derive(Debug, Clone)]
pub struct TryFn<F>(F);

/// Wraps a fallible callback. An `Err` aborts the replace call with
/// [`crate::ReplaceError::Callback`], `Ok(None)` aborts it with
/// [`crate::ReplaceError::MissingReplacement`].
pub fn try_fn<F, E>(f: F) -> TryFn<F>
where
  F: FnMut(&NodeMatch<'_>) -> Result<Option<Node>, E>,
  E: Into<BoxError>,
{
  TryFn(f)
}

impl<F, E> Replacer for TryFn<F>
where
  F: FnMut(&NodeMatch<'_>) -> Result<Option<Node>, E>,
  E: Into<BoxError>,
{
  fn replace_match(&mut self, m: &NodeMatch<'_>) -> Result<Option<Node>, BoxError> {
    (self.0)(m).map_err(Into::into)
  }
}

/// See [`with_slice`].
#[derive(Debug, Clone)]
pub struct WithSlice<F>(F);

/// Wraps a callback that takes the match and the single-codepoint leaves it
/// consumed.
pub fn with_slice<F>(f: F) -> WithSlice<F>
where
  F: FnMut(&NodeMatch<'_>, &[Node]) -> Node,
{
  WithSlice(f)
}

impl<F> Replacer for WithSlice<F>
where
  F: FnMut(&NodeMatch<'_>, &[Node]) -> Node,
{
  fn replace_match(&mut self, m: &NodeMatch<'_>) -> Result<Option<Node>, BoxError> {
    Ok(Some((self.0)(m, m.chars())))
  }
}
