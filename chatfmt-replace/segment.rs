//! Linearization of a flattened tree into matchable text.
//!
//! The leaves of a flattened tree are split into [`Segment`]s:
//!
//! - a [`Run`] is a maximal stretch of text leaves. Its text is what patterns
//!   are matched against, and every codepoint of it is backed by a synthetic
//!   single-codepoint leaf that remembers the style of the leaf it came from.
//! - anything else ([`Segment::Opaque`]) passes through untouched and is a hard
//!   boundary: no match can start on one side of it and end on the other.
//!
//! Adjacent text leaves with different styles end up in the same run, so a
//! pattern sees the text the reader sees rather than leaf boundaries.

use std::ops::Range;

use chatfmt_core::{
  Node,
  Style,
  TextNode,
  Tendril,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  Run(Run),
  Opaque(Node),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Run {
  text:    String,
  /// Byte offset of every codepoint in `text`.
  offsets: Vec<usize>,
  chars:   Vec<Node>,
}

impl Run {
  pub fn text(&self) -> &str {
    &self.text
  }

  /// One single-codepoint text leaf per codepoint of [`Run::text`].
  pub fn chars(&self) -> &[Node] {
    &self.chars
  }

  /// Length in codepoints.
  pub fn len(&self) -> usize {
    self.chars.len()
  }

  pub fn is_empty(&self) -> bool {
    self.chars.is_empty()
  }

  /// Converts a byte offset on a codepoint boundary (or the end of the text)
  /// into a codepoint offset.
  pub fn char_idx(&self, byte_idx: usize) -> usize {
    self.offsets.partition_point(|&offset| offset < byte_idx)
  }

  pub fn char_range(&self, bytes: Range<usize>) -> Range<usize> {
    self.char_idx(bytes.start)..self.char_idx(bytes.end)
  }

  fn push(&mut self, ch: char, style: &Style) {
    self.offsets.push(self.text.len());
    self.text.push(ch);
    let mut content = Tendril::new();
    content.push(ch);
    self.chars.push(Node::Text(TextNode {
      content,
      style:    style.clone(),
      children: Vec::new(),
    }));
  }
}

/// Splits the children of a flattened node into runs and opaque segments.
pub fn segment(children: &[Node]) -> Vec<Segment> {
  let mut segments = Vec::new();
  let mut run = Run::default();

  for child in children {
    match child {
      Node::Text(text) if text.children.is_empty() => {
        for ch in text.content.chars() {
          run.push(ch, &text.style);
        }
      },
      // Unflattened text nodes and non-text nodes are kept whole.
      Node::Text(_) | Node::Template(_) | Node::Opaque(_) => {
        if !run.is_empty() {
          segments.push(Segment::Run(std::mem::take(&mut run)));
        }
        segments.push(Segment::Opaque(child.clone()));
      },
    }
  }

  if !run.is_empty() {
    segments.push(Segment::Run(run));
  }
  segments
}
