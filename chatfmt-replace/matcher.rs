//! Regex matching over segmented runs.
//!
//! Matches are found per [`Run`] with the usual leftmost-first,
//! non-overlapping semantics, so they never cross an opaque segment. Every
//! match is handed to a [`Replacer`] as a [`NodeMatch`], and the node it
//! returns takes the place of the matched codepoints. Everything between
//! matches is copied over as the run's single-codepoint leaves.
//!
//! Offsets exposed by [`NodeMatch`] are codepoint offsets relative to the
//! start of the run, not byte offsets.
//!
//! Matching is only driven from [`crate::NodePattern`], which also runs the
//! escape cleanup pass:
//!
//! ```compile_fail
//! use chatfmt_replace::matcher::apply;
//! ```

use std::ops::Range;

use chatfmt_core::{
  Node,
  normalize::compact,
};
use regex::{
  Captures,
  Regex,
};

use crate::{
  error::{
    ReplaceError,
    Result,
  },
  escape,
  replacer::Replacer,
  segment::{
    Run,
    Segment,
  },
};

/// A single match inside a run, with access to the styled text it covers.
///
/// When the pattern was compiled with escaping, the consumed span
/// ([`NodeMatch::range`]) may start one backslash before the occurrence
/// itself. Group 0 never includes that backslash.
#[derive(Debug, Clone, Copy)]
pub struct NodeMatch<'m> {
  run:        &'m Run,
  captures:   &'m Captures<'m>,
  byte_start: usize,
  start:      usize,
  end:        usize,
  escaped:    bool,
}

impl<'m> NodeMatch<'m> {
  /// Start of the consumed span, in codepoints.
  pub fn start(&self) -> usize {
    self.start
  }

  /// End of the consumed span, in codepoints.
  pub fn end(&self) -> usize {
    self.end
  }

  pub fn range(&self) -> Range<usize> {
    self.start..self.end
  }

  /// The consumed text, including a consumed escape backslash.
  pub fn as_str(&self) -> &'m str {
    let end = self.captures.get(0).map_or(self.byte_start, |m| m.end());
    &self.run.text()[self.byte_start..end]
  }

  /// Whether the occurrence was preceded by a single, unescaped backslash.
  pub fn is_escaped(&self) -> bool {
    self.escaped
  }

  /// Number of capture groups in the pattern, not counting group 0.
  pub fn group_count(&self) -> usize {
    self.captures.len() - 1
  }

  /// Text of group `i`, or `None` if the group does not exist or did not
  /// participate in this match.
  pub fn group(&self, i: usize) -> Option<&'m str> {
    self.captures.get(i).map(|m| m.as_str())
  }

  pub fn group_range(&self, i: usize) -> Option<Range<usize>> {
    self
      .captures
      .get(i)
      .map(|m| self.run.char_range(m.range()))
  }

  pub fn group_start(&self, i: usize) -> Option<usize> {
    self.group_range(i).map(|range| range.start)
  }

  pub fn group_end(&self, i: usize) -> Option<usize> {
    self.group_range(i).map(|range| range.end)
  }

  pub fn name(&self, name: &str) -> Option<&'m str> {
    self.captures.name(name).map(|m| m.as_str())
  }

  pub fn name_range(&self, name: &str) -> Option<Range<usize>> {
    self
      .captures
      .name(name)
      .map(|m| self.run.char_range(m.range()))
  }

  /// The single-codepoint leaves of the consumed span.
  pub fn chars(&self) -> &'m [Node] {
    &self.run.chars()[self.start..self.end]
  }

  /// The consumed span as one compacted node.
  pub fn node(&self) -> Node {
    self.slice_node(self.range())
  }

  /// The styled text of group `i` as one compacted node.
  pub fn group_node(&self, i: usize) -> Option<Node> {
    self.group_range(i).map(|range| self.slice_node(range))
  }

  pub fn name_node(&self, name: &str) -> Option<Node> {
    self.name_range(name).map(|range| self.slice_node(range))
  }

  /// The occurrence without any consumed backslash, i.e. group 0.
  pub fn literal(&self) -> Node {
    self.group_node(0).unwrap_or_default()
  }

  fn slice_node(&self, range: Range<usize>) -> Node {
    compact(&Node::from_children(self.run.chars()[range].to_vec()))
  }
}

/// Replaces every match of `regex` in the runs of `segments`, passing opaque
/// segments through. The first replacer failure aborts the whole call.
pub(crate) fn apply<R>(
  segments: &[Segment],
  regex: &Regex,
  escaping: bool,
  replacer: &mut R,
) -> Result<Vec<Node>>
where
  R: Replacer + ?Sized,
{
  let mut out = Vec::with_capacity(segments.len());
  for segment in segments {
    match segment {
      Segment::Run(run) => replace_run(run, regex, escaping, replacer, &mut out)?,
      Segment::Opaque(node) => out.push(node.clone()),
    }
  }
  Ok(out)
}

fn replace_run<R>(
  run: &Run,
  regex: &Regex,
  escaping: bool,
  replacer: &mut R,
  out: &mut Vec<Node>,
) -> Result<()>
where
  R: Replacer + ?Sized,
{
  let mut last_end = 0;
  let mut last_byte_end = 0;

  for captures in regex.captures_iter(run.text()) {
    let Some(whole) = captures.get(0) else {
      continue;
    };
    let (byte_start, escaped) = if escaping {
      escape::consumed_start(run.text(), whole.start(), last_byte_end)
    } else {
      (whole.start(), false)
    };
    let start = run.char_idx(byte_start);
    let end = run.char_idx(whole.end());

    let node_match = NodeMatch {
      run,
      captures: &captures,
      byte_start,
      start,
      end,
      escaped,
    };
    tracing::trace!(start, end, escaped, text = node_match.as_str(), "replacing match");

    let replacement = match replacer.replace_match(&node_match) {
      Ok(Some(node)) => node,
      Ok(None) => return Err(ReplaceError::MissingReplacement { start, end }),
      Err(source) => return Err(ReplaceError::Callback { start, end, source }),
    };

    out.extend_from_slice(&run.chars()[last_end..start]);
    out.push(replacement);
    last_end = end;
    last_byte_end = whole.end();
  }

  out.extend_from_slice(&run.chars()[last_end..]);
  Ok(())
}
