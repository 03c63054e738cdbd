//! Replacement templates with group references.
//!
//! An [`Expand`] is parsed once from a template string and builds one node per
//! match: literal text becomes text nodes, group references become the styled
//! text of that group (see [`NodeMatch::group_node`]).
//!
//! Syntax, close to the `regex` crate's:
//!
//! - `$N` - numbered group `N` (the longest run of digits)
//! - `${N}` / `${name}` - numbered or named group, delimited
//! - `$$` - a literal `$`
//!
//! A `$` that starts none of the above is literal. A group that is absent
//! from the match expands to nothing.

use chatfmt_core::{
  Node,
  Style,
  Tendril,
};
use smallvec::SmallVec;

use crate::{
  error::{
    BoxError,
    ReplaceError,
    Result,
  },
  matcher::NodeMatch,
  replacer::Replacer,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
  Literal(Tendril),
  Index(usize),
  Name(Tendril),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expand {
  pieces: SmallVec<[Piece; 4]>,
  style:  Style,
}

impl Expand {
  pub fn new(template: &str) -> Result<Self> {
    let invalid = |reason| ReplaceError::Template {
      template: template.to_string(),
      reason,
    };

    let mut pieces = SmallVec::new();
    let mut literal = Tendril::new();
    let mut rest = template;

    while let Some(dollar) = rest.find('$') {
      literal.push_str(&rest[..dollar]);
      let after = &rest[dollar + 1..];

      if let Some(tail) = after.strip_prefix('$') {
        literal.push('$');
        rest = tail;
        continue;
      }

      let (piece, tail) = if let Some(braced) = after.strip_prefix('{') {
        let close = braced.find('}').ok_or_else(|| invalid("unclosed '${'"))?;
        let name = &braced[..close];
        let piece = if name.is_empty() {
          return Err(invalid("empty group reference"));
        } else if let Ok(index) = name.parse() {
          Piece::Index(index)
        } else if name.chars().all(|ch| ch.is_alphanumeric() || ch == '_') {
          Piece::Name(name.into())
        } else {
          return Err(invalid("group names may only contain letters, digits and '_'"));
        };
        (piece, &braced[close + 1..])
      } else {
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
          literal.push('$');
          rest = after;
          continue;
        }
        let index = after[..digits]
          .parse()
          .map_err(|_| invalid("group index out of range"))?;
        (Piece::Index(index), &after[digits..])
      };

      if !literal.is_empty() {
        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
      }
      pieces.push(piece);
      rest = tail;
    }

    literal.push_str(rest);
    if !literal.is_empty() {
      pieces.push(Piece::Literal(literal));
    }
    Ok(Self {
      pieces,
      style: Style::default(),
    })
  }

  /// Style wrapped around every expansion. Group text keeps whatever its
  /// own leaves set.
  #[must_use]
  pub fn with_style(mut self, style: Style) -> Self {
    self.style = style;
    self
  }

  /// Builds the replacement for `m`. Escaped matches expand to their own
  /// occurrence.
  pub fn expand(&self, m: &NodeMatch<'_>) -> Node {
    if m.is_escaped() {
      return m.literal();
    }

    let children = self
      .pieces
      .iter()
      .filter_map(|piece| match piece {
        Piece::Literal(text) => Some(Node::text(text.clone())),
        Piece::Index(index) => m.group_node(*index),
        Piece::Name(name) => m.name_node(name),
      })
      .collect();
    Node::from_children(children).with_style(self.style.clone())
  }
}

impl Replacer for Expand {
  fn replace_match(&mut self, m: &NodeMatch<'_>) -> std::result::Result<Option<Node>, BoxError> {
    Ok(Some(self.expand(m)))
  }
}

impl Replacer for &Expand {
  fn replace_match(&mut self, m: &NodeMatch<'_>) -> std::result::Result<Option<Node>, BoxError> {
    Ok(Some(self.expand(m)))
  }
}

#[cfg(test)]
mod test {
  use chatfmt_core::{
    Color,
    normalize::compact,
  };

  use super::*;
  use crate::replace::NodePattern;

  fn pieces(template: &str) -> Vec<Piece> {
    Expand::new(template).unwrap().pieces.into_vec()
  }

  #[test]
  fn parse_references() {
    assert_eq!(pieces("[$1]"), vec![
      Piece::Literal("[".into()),
      Piece::Index(1),
      Piece::Literal("]".into()),
    ]);
    assert_eq!(pieces("${12}x${who}"), vec![
      Piece::Index(12),
      Piece::Literal("x".into()),
      Piece::Name("who".into()),
    ]);
    assert_eq!(pieces("$$5 costs $"), vec![Piece::Literal("$5 costs $".into())]);
    assert_eq!(pieces("$a"), vec![Piece::Literal("$a".into())]);
    assert!(pieces("").is_empty());
  }

  #[test]
  fn reject_malformed_references() {
    assert!(matches!(Expand::new("${1"), Err(ReplaceError::Template { .. })));
    assert!(matches!(Expand::new("${}"), Err(ReplaceError::Template { .. })));
    assert!(matches!(Expand::new("${a-b}"), Err(ReplaceError::Template { .. })));
  }

  #[test]
  fn expansion_keeps_group_styles() {
    let red = Style::default().fg(Color::Red);
    let gold = Style::default().fg(Color::Gold);
    let input = Node::from_children(vec![Node::text("say "), Node::text("hi").with_style(red.clone())]);
    let pattern = NodePattern::new(r"say (\w+)(!)?").unwrap();
    let expand = Expand::new("<$1$2>").unwrap().with_style(gold.clone());

    let out = pattern.replace_all(&input, &expand).unwrap();
    assert_eq!(
      compact(&out),
      Node::from_children(vec![
        Node::text("<").with_style(gold.clone()),
        Node::text("hi").with_style(red),
        Node::text(">").with_style(gold),
      ])
    );
  }

  #[test]
  fn escaped_occurrences_stay_literal() {
    let pattern = NodePattern::builder("[item]")
      .literal(true)
      .escaping(true)
      .build()
      .unwrap();
    let expand = Expand::new("ITEM").unwrap();
    let out = pattern
      .replace_all(&Node::text(r"[item] and \[item]"), &expand)
      .unwrap();
    assert_eq!(out.plain_text(), "ITEM and [item]");
  }
}
