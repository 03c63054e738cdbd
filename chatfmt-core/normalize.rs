//! Canonical forms of a styled-text tree.
//!
//! Two operations bracket every edit of a tree:
//!
//! - [`flatten`] pushes all formatting down to the leaves and lists them in
//!   render order under a single unstyled root. Once flattened, the root's
//!   children are the authoritative sequence to work on.
//! - [`compact`] goes the other way after editing: empty text is dropped and
//!   neighbouring text leaves with identical style are merged, so the result
//!   has as few nodes as possible.
//!
//! Both preserve what the tree renders to, character by character (see
//! [`crate::render::cells`]).
//!
//! Template arguments are separate fragments. They are never spliced into
//! the outer leaf sequence: [`flatten`] leaves them as they are, [`compact`]
//! compacts each one on its own.

use crate::{
  node::{
    Node,
    OpaqueNode,
    TemplateNode,
    TextNode,
  },
  style::Style,
};

/// Returns an unstyled root whose children are the leaves of `node` in
/// render order, each carrying its effective style.
pub fn flatten(node: &Node) -> Node {
  Node::from_children(flatten_leaves(node))
}

/// The leaves [`flatten`] would produce, without the wrapping root.
pub fn flatten_leaves(node: &Node) -> Vec<Node> {
  let mut leaves = Vec::new();
  push_leaves(node, &Style::default(), &mut leaves);
  leaves
}

fn push_leaves(node: &Node, inherited: &Style, leaves: &mut Vec<Node>) {
  let style = inherited.patch(node.style());

  match node {
    Node::Text(text) if text.content.is_empty() => {},
    Node::Text(text) => leaves.push(Node::Text(TextNode {
      content:  text.content.clone(),
      style:    style.clone(),
      children: Vec::new(),
    })),
    Node::Template(template) => leaves.push(Node::Template(TemplateNode {
      key:      template.key.clone(),
      args:     template.args.clone(),
      style:    style.clone(),
      children: Vec::new(),
    })),
    Node::Opaque(opaque) => leaves.push(Node::Opaque(OpaqueNode {
      payload:  opaque.payload.clone(),
      style:    style.clone(),
      children: Vec::new(),
    })),
  }

  for child in node.children() {
    push_leaves(child, &style, leaves);
  }
}

/// Rewrites `node` with the fewest nodes that render the same.
///
/// A tree with no visible content compacts to [`Node::empty`], a tree with a
/// single leaf compacts to that leaf.
pub fn compact(node: &Node) -> Node {
  let mut leaves: Vec<Node> = Vec::new();

  for leaf in flatten_leaves(node) {
    match leaf {
      Node::Text(text) => {
        if let Some(Node::Text(prev)) = leaves.last_mut()
          && prev.style == text.style
        {
          prev.content.push_str(&text.content);
        } else {
          leaves.push(Node::Text(text));
        }
      },
      Node::Template(mut template) => {
        template.args = template.args.iter().map(compact).collect();
        leaves.push(Node::Template(template));
      },
      opaque @ Node::Opaque(_) => leaves.push(opaque),
    }
  }

  match leaves.len() {
    0 => Node::empty(),
    1 => leaves.pop().unwrap_or_default(),
    _ => Node::from_children(leaves),
  }
}
