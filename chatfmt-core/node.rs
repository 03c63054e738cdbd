//! The styled-text tree.
//!
//! A chat message is a tree of [`Node`]s. Render order is a depth-first walk:
//! a node's own content (text, template or opaque payload) comes first,
//! followed by its children, which inherit the parent's [`Style`] and may
//! override parts of it.
//!
//! The set of node kinds is closed:
//!
//! - [`TextNode`] - plain text content
//! - [`TemplateNode`] - a key resolved at render time with positional
//!   argument subtrees
//! - [`OpaqueNode`] - anything whose content is not plain text (keybinds,
//!   scores, entity selectors, storage lookups)
//!
//! Nodes are plain values. Every transformation in this workspace borrows its
//! input and returns a fresh tree.
//!
//! ```
//! use chatfmt_core::{node::Node, style::{Color, Style}};
//!
//! let message = Node::text("Hello, ")
//!   .with_child(Node::text("world").with_style(Style::default().fg(Color::Gold)))
//!   .with_child(Node::text("!"));
//! assert_eq!(message.plain_text(), "Hello, world!");
//! ```

use crate::{
  Tendril,
  style::Style,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
  Text(TextNode),
  Template(TemplateNode),
  Opaque(OpaqueNode),
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct TextNode {
  pub content:  Tendril,
  pub style:    Style,
  pub children: Vec<Node>,
}

/// A parameterized message. `args` are addressed by position, not by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateNode {
  pub key:      Tendril,
  pub args:     Vec<Node>,
  pub style:    Style,
  pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpaqueNode {
  pub payload:  Payload,
  pub style:    Style,
  pub children: Vec<Node>,
}

/// Non-text content, resolved by the client or the server at render time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Payload {
  Keybind(Tendril),
  Score { name: Tendril, objective: Tendril },
  Selector(Tendril),
  Storage { path: Tendril, source: Tendril },
}

impl Payload {
  /// Text shown when the payload cannot be resolved.
  pub fn fallback_text(&self) -> &str {
    match self {
      Payload::Keybind(key) => key.as_str(),
      Payload::Score { name, .. } => name.as_str(),
      Payload::Selector(pattern) => pattern.as_str(),
      Payload::Storage { path, .. } => path.as_str(),
    }
  }
}

impl Default for Node {
  fn default() -> Self {
    Node::empty()
  }
}

impl From<TextNode> for Node {
  fn from(node: TextNode) -> Self {
    Node::Text(node)
  }
}

impl From<TemplateNode> for Node {
  fn from(node: TemplateNode) -> Self {
    Node::Template(node)
  }
}

impl From<OpaqueNode> for Node {
  fn from(node: OpaqueNode) -> Self {
    Node::Opaque(node)
  }
}

impl From<&str> for Node {
  fn from(text: &str) -> Self {
    Node::text(text)
  }
}

impl Node {
  /// A text node without content, style or children.
  pub fn empty() -> Self {
    Node::Text(TextNode::default())
  }

  pub fn text(content: impl Into<Tendril>) -> Self {
    Node::Text(TextNode {
      content: content.into(),
      ..TextNode::default()
    })
  }

  /// An unstyled, contentless node wrapping `children`.
  pub fn from_children(children: Vec<Node>) -> Self {
    Node::Text(TextNode {
      children,
      ..TextNode::default()
    })
  }

  pub fn template<I>(key: impl Into<Tendril>, args: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<Node>,
  {
    Node::Template(TemplateNode {
      key:      key.into(),
      args:     args.into_iter().map(Into::into).collect(),
      style:    Style::default(),
      children: Vec::new(),
    })
  }

  pub fn opaque(payload: Payload) -> Self {
    Node::Opaque(OpaqueNode {
      payload,
      style: Style::default(),
      children: Vec::new(),
    })
  }

  pub fn style(&self) -> &Style {
    match self {
      Node::Text(node) => &node.style,
      Node::Template(node) => &node.style,
      Node::Opaque(node) => &node.style,
    }
  }

  pub fn children(&self) -> &[Node] {
    match self {
      Node::Text(node) => &node.children,
      Node::Template(node) => &node.children,
      Node::Opaque(node) => &node.children,
    }
  }

  fn parts_mut(&mut self) -> (&mut Style, &mut Vec<Node>) {
    match self {
      Node::Text(node) => (&mut node.style, &mut node.children),
      Node::Template(node) => (&mut node.style, &mut node.children),
      Node::Opaque(node) => (&mut node.style, &mut node.children),
    }
  }

  #[must_use]
  pub fn with_style(mut self, style: Style) -> Self {
    *self.parts_mut().0 = style;
    self
  }

  #[must_use]
  pub fn with_children(mut self, children: Vec<Node>) -> Self {
    *self.parts_mut().1 = children;
    self
  }

  #[must_use]
  pub fn with_child(mut self, child: Node) -> Self {
    self.parts_mut().1.push(child);
    self
  }

  /// Takes the children out of the node, leaving it a leaf.
  pub fn into_parts(mut self) -> (Node, Vec<Node>) {
    let children = std::mem::take(self.parts_mut().1);
    (self, children)
  }

  /// The node's own text content. Only text nodes have one.
  pub fn content(&self) -> Option<&str> {
    match self {
      Node::Text(node) => Some(node.content.as_str()),
      Node::Template(_) | Node::Opaque(_) => None,
    }
  }

  pub fn is_leaf(&self) -> bool {
    self.children().is_empty()
  }

  /// Renders the tree without styling. Templates render as their key and
  /// opaque nodes as their payload's fallback text.
  pub fn plain_text(&self) -> String {
    let mut out = String::new();
    self.write_plain(&mut out);
    out
  }

  fn write_plain(&self, out: &mut String) {
    match self {
      Node::Text(node) => out.push_str(&node.content),
      Node::Template(node) => out.push_str(&node.key),
      Node::Opaque(node) => out.push_str(node.payload.fallback_text()),
    }
    for child in self.children() {
      child.write_plain(out);
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::style::Color;

  #[test]
  fn plain_text_is_depth_first() {
    let node = Node::text("a")
      .with_child(Node::text("b").with_child(Node::text("c")))
      .with_child(Node::opaque(Payload::Keybind("key.jump".into())))
      .with_child(Node::template("chat.type.text", ["x", "y"]).with_child(Node::text("d")));
    assert_eq!(node.plain_text(), "abckey.jumpchat.type.textd");
  }

  #[test]
  fn builders_do_not_touch_other_fields() {
    let style = Style::default().fg(Color::Green);
    let node = Node::template("k", ["arg"])
      .with_style(style.clone())
      .with_child(Node::text("tail"));
    let Node::Template(template) = &node else {
      panic!("expected template");
    };
    assert_eq!(template.key.as_str(), "k");
    assert_eq!(template.args, vec![Node::text("arg")]);
    assert_eq!(node.style(), &style);
    assert_eq!(node.children(), &[Node::text("tail")]);
  }

  #[test]
  fn into_parts_strips_children() {
    let node = Node::text("a").with_child(Node::text("b"));
    let (leaf, children) = node.into_parts();
    assert!(leaf.is_leaf());
    assert_eq!(leaf.content(), Some("a"));
    assert_eq!(children, vec![Node::text("b")]);
  }

  #[test]
  fn payload_fallbacks() {
    assert_eq!(Payload::Selector("@p".into()).fallback_text(), "@p");
    let score = Payload::Score {
      name:      "Steve".into(),
      objective: "kills".into(),
    };
    assert_eq!(score.fallback_text(), "Steve");
  }
}
