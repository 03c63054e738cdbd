//! Styled rendering of a tree, one cell per visible unit.
//!
//! Two trees that produce the same [`cells`] look identical in chat, however
//! differently their nodes are arranged.

use crate::{
  Tendril,
  node::{
    Node,
    Payload,
  },
  style::Style,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
  /// A single codepoint with its effective style.
  Char(char, Style),
  Template {
    key:   Tendril,
    style: Style,
    args:  Vec<Vec<Cell>>,
  },
  Opaque {
    payload: Payload,
    style:   Style,
  },
}

pub fn cells(node: &Node) -> Vec<Cell> {
  let mut out = Vec::new();
  push_cells(node, &Style::default(), &mut out);
  out
}

fn push_cells(node: &Node, inherited: &Style, out: &mut Vec<Cell>) {
  let style = inherited.patch(node.style());

  match node {
    Node::Text(text) => out.extend(text.content.chars().map(|ch| Cell::Char(ch, style.clone()))),
    Node::Template(template) => out.push(Cell::Template {
      key:   template.key.clone(),
      style: style.clone(),
      args:  template
        .args
        .iter()
        .map(|arg| {
          let mut arg_cells = Vec::new();
          push_cells(arg, &style, &mut arg_cells);
          arg_cells
        })
        .collect(),
    }),
    Node::Opaque(opaque) => out.push(Cell::Opaque {
      payload: opaque.payload.clone(),
      style:   style.clone(),
    }),
  }

  for child in node.children() {
    push_cells(child, &style, out);
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::style::Color;

  #[test]
  fn cells_resolve_inherited_style() {
    let gold = Style::default().fg(Color::Gold);
    let node = Node::text("a")
      .with_style(gold.clone())
      .with_child(Node::text("\u{1F600}"));
    assert_eq!(cells(&node), vec![
      Cell::Char('a', gold.clone()),
      Cell::Char('\u{1F600}', gold),
    ]);
  }

  #[test]
  fn template_args_inherit_template_style() {
    let red = Style::default().fg(Color::Red);
    let node = Node::template("k", ["x"]).with_style(red.clone());
    assert_eq!(cells(&node), vec![Cell::Template {
      key:   "k".into(),
      style: red.clone(),
      args:  vec![vec![Cell::Char('x', red)]],
    }]);
  }
}
