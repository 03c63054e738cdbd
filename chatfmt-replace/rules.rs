//! Replacement rules loaded from configuration.
//!
//! A rule file is a list of `[[rule]]` tables:
//!
//! ```toml
//! [[rule]]
//! pattern = "[item]"
//! literal = true
//! escaping = true
//! replacement = "[$0]"
//! style = { color = "aqua", underlined = true }
//!
//! [[rule]]
//! pattern = "(?<who>@\\w+)"
//! replacement = "${who}"
//! style = { color = "#ffaa00", bold = true }
//! ```
//!
//! All patterns and templates are compiled when the file is loaded. The
//! rules then run in order, each one seeing the output of the previous one.

use chatfmt_core::{
  Color,
  Decoration,
  Node,
  Style,
};
use serde::{
  Deserialize,
  Serialize,
};

use crate::{
  error::Result,
  expand::Expand,
  replace::{
    NodePattern,
    ReplaceOptions,
  },
};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct StyleConfig {
  pub color:         Option<Color>,
  pub bold:          Option<bool>,
  pub italic:        Option<bool>,
  pub underlined:    Option<bool>,
  pub strikethrough: Option<bool>,
  pub obfuscated:    Option<bool>,
}

impl StyleConfig {
  pub fn to_style(&self) -> Style {
    let mut style = Style {
      color: self.color,
      ..Style::default()
    };
    let decorations = [
      (self.bold, Decoration::BOLD),
      (self.italic, Decoration::ITALIC),
      (self.underlined, Decoration::UNDERLINED),
      (self.strikethrough, Decoration::STRIKETHROUGH),
      (self.obfuscated, Decoration::OBFUSCATED),
    ];
    for (setting, decoration) in decorations {
      style = match setting {
        Some(true) => style.add_decoration(decoration),
        Some(false) => style.remove_decoration(decoration),
        None => style,
      };
    }
    style
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RuleConfig {
  pub pattern:          String,
  pub replacement:      String,
  #[serde(default)]
  pub escaping:         bool,
  #[serde(default)]
  pub case_insensitive: bool,
  #[serde(default)]
  pub literal:          bool,
  #[serde(default)]
  pub style:            StyleConfig,
}

impl RuleConfig {
  /// The only file form of [`ReplaceOptions`].
  pub fn options(&self) -> ReplaceOptions {
    ReplaceOptions {
      escaping:         self.escaping,
      case_insensitive: self.case_insensitive,
      literal:          self.literal,
    }
  }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
  #[serde(rename = "rule")]
  pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone)]
pub struct Rule {
  pattern:     NodePattern,
  replacement: Expand,
}

impl Rule {
  pub fn compile(config: &RuleConfig) -> Result<Self> {
    Ok(Self {
      pattern:     NodePattern::with_options(&config.pattern, config.options())?,
      replacement: Expand::new(&config.replacement)?.with_style(config.style.to_style()),
    })
  }

  pub fn pattern(&self) -> &NodePattern {
    &self.pattern
  }

  pub fn apply(&self, node: &Node) -> Result<Node> {
    self.pattern.replace_all(node, &self.replacement)
  }
}

#[derive(Debug, Default, Clone)]
pub struct RuleSet {
  rules: Vec<Rule>,
}

impl RuleSet {
  pub fn from_toml(source: &str) -> Result<Self> {
    let config: RulesConfig = toml::from_str(source)?;
    Self::from_config(&config)
  }

  pub fn from_config(config: &RulesConfig) -> Result<Self> {
    let rules = config
      .rules
      .iter()
      .map(Rule::compile)
      .collect::<Result<Vec<_>>>()?;
    tracing::debug!(rules = rules.len(), "compiled replacement rules");
    Ok(Self { rules })
  }

  pub fn rules(&self) -> &[Rule] {
    &self.rules
  }

  pub fn len(&self) -> usize {
    self.rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  /// Runs every rule in order over `node`.
  pub fn apply(&self, node: &Node) -> Result<Node> {
    let mut node = node.clone();
    for rule in &self.rules {
      node = rule.apply(&node)?;
    }
    Ok(node)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::error::ReplaceError;

  const RULES: &str = r##"
[[rule]]
pattern = "[item]"
literal = true
escaping = true
replacement = "<$0>"
style = { color = "aqua", underlined = true }

[[rule]]
pattern = "(?<who>@\\w+)"
replacement = "${who}"
style = { color = "#ffaa00", bold = true }
"##;

  #[test]
  fn load_and_apply_rules() {
    let rules = RuleSet::from_toml(RULES).unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules.rules()[0].pattern().as_str(), r"\[item\]");
    assert!(rules.rules()[0].pattern().is_escaping());

    let out = rules
      .apply(&Node::text(r"@steve look: [item], not \[item]"))
      .unwrap();
    assert_eq!(out.plain_text(), "@steve look: <[item]>, not [item]");

    let mention = Style::default()
      .fg(Color::Rgb(0xff, 0xaa, 0x00))
      .add_decoration(Decoration::BOLD);
    assert_eq!(out.children()[0], Node::text("@steve").with_style(mention));
  }

  #[test]
  fn style_config_maps_decorations() {
    let config = StyleConfig {
      color: Some(Color::Red),
      bold: Some(true),
      italic: Some(false),
      ..StyleConfig::default()
    };
    let style = config.to_style();
    assert_eq!(style.color, Some(Color::Red));
    assert!(style.is_decorated(Decoration::BOLD));
    assert!(style.sub_decoration.contains(Decoration::ITALIC));
    assert!(!style.add_decoration.contains(Decoration::UNDERLINED));
    assert!(!style.sub_decoration.contains(Decoration::UNDERLINED));
  }

  #[test]
  fn rule_keys_map_to_replace_options() {
    let config: RulesConfig = toml::from_str(
      "[[rule]]\npattern = \"a\"\nreplacement = \"b\"\ncase-insensitive = true",
    )
    .unwrap();
    assert_eq!(config.rules[0].options(), ReplaceOptions {
      case_insensitive: true,
      ..ReplaceOptions::default()
    });

    let rules = RuleSet::from_config(&config).unwrap();
    assert!(!rules.rules()[0].pattern().is_escaping());
    assert_eq!(rules.apply(&Node::text("AaA")).unwrap().plain_text(), "bbb");
  }

  #[test]
  fn empty_config_is_a_no_op() {
    let rules = RuleSet::from_toml("").unwrap();
    assert!(rules.is_empty());
    let node = Node::text("unchanged");
    assert_eq!(rules.apply(&node).unwrap(), node);
  }

  #[test]
  fn reject_bad_configs() {
    assert!(matches!(
      RuleSet::from_toml("[[rule]]\npattern = \"a\"\nreplacement = \"b\"\nunknown = 1"),
      Err(ReplaceError::Config(_))
    ));
    assert!(matches!(
      RuleSet::from_toml("[[rule]]\npattern = \"(\"\nreplacement = \"b\""),
      Err(ReplaceError::Pattern { .. })
    ));
    assert!(matches!(
      RuleSet::from_toml("[[rule]]\npattern = \"a\"\nreplacement = \"${\""),
      Err(ReplaceError::Template { .. })
    ));
    assert!(matches!(
      RuleSet::from_toml("[[rule]]\npattern = \"a\"\nreplacement = \"b\"\nstyle = { color = \"nope\" }"),
      Err(ReplaceError::Config(_))
    ));
  }
}
