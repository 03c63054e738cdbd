//! Find-and-replace over whole styled-text trees.
//!
//! [`NodePattern::replace_all`] runs the full pipeline on a tree:
//!
//! 1. template arguments are replaced first, each one on its own
//! 2. the tree is flattened and split into runs and opaque segments
//! 3. matches in every run are replaced
//! 4. the new children are compacted into the result
//! 5. with escaping, the escape cleanup pass runs over the result
//!
//! The input tree is only borrowed and the result is always a new tree.
//! A compiled [`NodePattern`] can be shared between threads.
//!
//! ```
//! use chatfmt_core::{Color, Node, Style};
//! use chatfmt_replace::NodePattern;
//!
//! let zero = Node::text("0").with_style(Style::default().fg(Color::Red));
//! let out = NodePattern::new("o")
//!   .unwrap()
//!   .replace_all(&Node::text("hello world"), &zero)
//!   .unwrap();
//! assert_eq!(out.plain_text(), "hell0 w0rld");
//! ```

use std::time::Instant;

use chatfmt_core::{
  Node,
  normalize::{
    compact,
    flatten_leaves,
  },
};
use regex::{
  Regex,
  RegexBuilder,
};

use crate::{
  error::{
    ReplaceError,
    Result,
  },
  matcher::{
    NodeMatch,
    apply,
  },
  replacer::Replacer,
  segment::segment,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceOptions {
  /// Let a backslash in front of an occurrence suppress it.
  pub escaping:         bool,
  pub case_insensitive: bool,
  /// Match the pattern text literally instead of as a regex.
  pub literal:          bool,
}

#[derive(Debug, Clone)]
pub struct NodePattern {
  source:   String,
  regex:    Regex,
  escaping: bool,
}

impl NodePattern {
  pub fn new(pattern: &str) -> Result<Self> {
    Self::with_options(pattern, ReplaceOptions::default())
  }

  pub fn builder(pattern: impl Into<String>) -> NodePatternBuilder {
    NodePatternBuilder {
      pattern: pattern.into(),
      options: ReplaceOptions::default(),
    }
  }

  /// Compiles `pattern`. An invalid pattern fails here, before any tree is
  /// touched.
  pub fn with_options(pattern: &str, options: ReplaceOptions) -> Result<Self> {
    let source = if options.literal {
      regex::escape(pattern)
    } else {
      pattern.to_string()
    };
    let regex = compile(&source, &options)?;

    Ok(Self {
      source,
      regex,
      escaping: options.escaping,
    })
  }

  /// The regex source this pattern was compiled from.
  pub fn as_str(&self) -> &str {
    &self.source
  }

  pub fn is_escaping(&self) -> bool {
    self.escaping
  }

  /// Replaces every match in `node` with what `replacer` produces.
  ///
  /// The first replacer failure aborts the call and is returned.
  pub fn replace_all<R: Replacer>(&self, node: &Node, mut replacer: R) -> Result<Node> {
    let start = tracing::enabled!(tracing::Level::DEBUG).then(Instant::now);

    let mut result = replace_tree(&self.regex, self.escaping, node, &mut replacer)?;
    if self.escaping {
      // Every backslash still in front of an occurrence is dropped, once.
      let mut strip_backslash = |m: &NodeMatch<'_>| m.literal();
      result = replace_tree(&self.regex, true, &result, &mut strip_backslash)?;
    }

    if let Some(start) = start {
      tracing::debug!(
        pattern = %self.source,
        "node replace took {}s",
        Instant::now().duration_since(start).as_secs_f64()
      );
    }
    Ok(result)
  }
}

fn compile(source: &str, options: &ReplaceOptions) -> Result<Regex> {
  RegexBuilder::new(source)
    .case_insensitive(options.case_insensitive)
    .build()
    .map_err(|source_err| ReplaceError::Pattern {
      pattern: source.to_string(),
      source:  source_err,
    })
}

fn replace_tree<R>(regex: &Regex, escaping: bool, node: &Node, replacer: &mut R) -> Result<Node>
where
  R: Replacer + ?Sized,
{
  let mut children = Vec::new();
  for leaf in flatten_leaves(node) {
    match leaf {
      Node::Template(mut template) => {
        tracing::trace!(key = %template.key, args = template.args.len(), "replacing in template arguments");
        let mut args = Vec::with_capacity(template.args.len());
        for arg in &template.args {
          args.push(replace_tree(regex, escaping, arg, replacer)?);
        }
        template.args = args;
        children.push(Node::Template(template));
      },
      leaf @ (Node::Text(_) | Node::Opaque(_)) => children.push(leaf),
    }
  }

  let replaced = apply(&segment(&children), regex, escaping, replacer)?;
  Ok(compact(&Node::from_children(replaced)))
}

#[derive(Debug, Clone)]
pub struct NodePatternBuilder {
  pattern: String,
  options: ReplaceOptions,
}

impl NodePatternBuilder {
  #[must_use]
  pub fn escaping(mut self, yes: bool) -> Self {
    self.options.escaping = yes;
    self
  }

  #[must_use]
  pub fn case_insensitive(mut self, yes: bool) -> Self {
    self.options.case_insensitive = yes;
    self
  }

  #[must_use]
  pub fn literal(mut self, yes: bool) -> Self {
    self.options.literal = yes;
    self
  }

  #[must_use]
  pub fn options(mut self, options: ReplaceOptions) -> Self {
    self.options = options;
    self
  }

  pub fn build(&self) -> Result<NodePattern> {
    NodePattern::with_options(&self.pattern, self.options)
  }
}

/// Compiles `pattern` and replaces every match in `node`.
pub fn replace_all<R: Replacer>(node: &Node, pattern: &str, replacer: R) -> Result<Node> {
  NodePattern::new(pattern)?.replace_all(node, replacer)
}

/// Like [`replace_all`], with backslash escaping enabled.
pub fn replace_all_escaped<R: Replacer>(node: &Node, pattern: &str, replacer: R) -> Result<Node> {
  NodePattern::builder(pattern)
    .escaping(true)
    .build()?
    .replace_all(node, replacer)
}
