//! Formatting carried by every node of a styled-text tree.
//!
//! A [`Style`] only records what it *sets*. Unset attributes are inherited
//! from the parent node when the tree is flattened, which is why colors are
//! `Option`s and decorations are tracked as two sets: the ones explicitly
//! switched on ([`Style::add_decoration`]) and the ones explicitly switched
//! off ([`Style::sub_decoration`]).
//!
//! ```
//! use chatfmt_core::style::{Color, Decoration, Style};
//!
//! let parent = Style::default().fg(Color::Gold).add_decoration(Decoration::BOLD);
//! let child = Style::default().remove_decoration(Decoration::BOLD);
//!
//! let effective = parent.patch(&child);
//! assert_eq!(effective.color, Some(Color::Gold));
//! assert!(!effective.is_decorated(Decoration::BOLD));
//! ```

use std::{
  fmt,
  str::FromStr,
};

use bitflags::bitflags;
use serde::{
  Deserialize,
  Serialize,
};

use crate::{
  Tendril,
  node::Node,
};

bitflags! {
  #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct Decoration: u8 {
    const BOLD          = 0b0000_0001;
    const ITALIC        = 0b0000_0010;
    const UNDERLINED    = 0b0000_0100;
    const STRIKETHROUGH = 0b0000_1000;
    const OBFUSCATED    = 0b0001_0000;
  }
}

/// A chat color: one of the sixteen legacy named colors or a full RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
  Black,
  DarkBlue,
  DarkGreen,
  DarkAqua,
  DarkRed,
  DarkPurple,
  Gold,
  Gray,
  DarkGray,
  Blue,
  Green,
  Aqua,
  Red,
  LightPurple,
  Yellow,
  White,
  Rgb(u8, u8, u8),
}

const NAMED_COLORS: [(&str, Color); 16] = [
  ("black", Color::Black),
  ("dark_blue", Color::DarkBlue),
  ("dark_green", Color::DarkGreen),
  ("dark_aqua", Color::DarkAqua),
  ("dark_red", Color::DarkRed),
  ("dark_purple", Color::DarkPurple),
  ("gold", Color::Gold),
  ("gray", Color::Gray),
  ("dark_gray", Color::DarkGray),
  ("blue", Color::Blue),
  ("green", Color::Green),
  ("aqua", Color::Aqua),
  ("red", Color::Red),
  ("light_purple", Color::LightPurple),
  ("yellow", Color::Yellow),
  ("white", Color::White),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "invalid color '{}'", self.0)
  }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
  type Err = ParseColorError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if let Some(hex) = s.strip_prefix('#') {
      let invalid = || ParseColorError(s.to_string());
      if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
      }
      let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| invalid());
      return Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
    }

    NAMED_COLORS
      .iter()
      .find(|(name, _)| name.eq_ignore_ascii_case(s))
      .map(|(_, color)| *color)
      .ok_or_else(|| ParseColorError(s.to_string()))
  }
}

impl TryFrom<String> for Color {
  type Error = ParseColorError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<Color> for String {
  fn from(color: Color) -> Self {
    color.to_string()
  }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
      named => {
        let name = NAMED_COLORS
          .iter()
          .find(|(_, color)| color == named)
          .map_or("", |(name, _)| name);
        f.write_str(name)
      },
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickAction {
  OpenUrl,
  RunCommand,
  SuggestCommand,
  ChangePage,
  CopyToClipboard,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClickEvent {
  pub action: ClickAction,
  pub value:  Tendril,
}

impl ClickEvent {
  pub fn new(action: ClickAction, value: impl Into<Tendril>) -> Self {
    Self {
      action,
      value: value.into(),
    }
  }
}

/// Content shown when hovering a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HoverEvent {
  ShowText(Box<Node>),
  ShowItem {
    id:    Tendril,
    count: u32,
  },
  ShowEntity {
    kind: Tendril,
    id:   Tendril,
    name: Option<Box<Node>>,
  },
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Style {
  pub color:          Option<Color>,
  pub add_decoration: Decoration,
  pub sub_decoration: Decoration,
  pub font:           Option<Tendril>,
  pub insertion:      Option<Tendril>,
  pub click:          Option<ClickEvent>,
  pub hover:          Option<HoverEvent>,
}

impl Style {
  #[must_use]
  pub fn fg(mut self, color: Color) -> Self {
    self.color = Some(color);
    self
  }

  #[must_use]
  pub fn add_decoration(mut self, decoration: Decoration) -> Self {
    self.sub_decoration.remove(decoration);
    self.add_decoration.insert(decoration);
    self
  }

  #[must_use]
  pub fn remove_decoration(mut self, decoration: Decoration) -> Self {
    self.add_decoration.remove(decoration);
    self.sub_decoration.insert(decoration);
    self
  }

  #[must_use]
  pub fn font(mut self, font: impl Into<Tendril>) -> Self {
    self.font = Some(font.into());
    self
  }

  #[must_use]
  pub fn insertion(mut self, insertion: impl Into<Tendril>) -> Self {
    self.insertion = Some(insertion.into());
    self
  }

  #[must_use]
  pub fn click(mut self, click: ClickEvent) -> Self {
    self.click = Some(click);
    self
  }

  #[must_use]
  pub fn hover(mut self, hover: HoverEvent) -> Self {
    self.hover = Some(hover);
    self
  }

  /// Whether the decoration is explicitly switched on.
  pub fn is_decorated(&self, decoration: Decoration) -> bool {
    self.add_decoration.contains(decoration)
  }

  pub fn is_empty(&self) -> bool {
    *self == Style::default()
  }

  /// Layers `other` on top of `self`: every attribute `other` sets wins,
  /// everything else is inherited from `self`.
  #[must_use]
  pub fn patch(&self, other: &Style) -> Style {
    Style {
      color:          other.color.or(self.color),
      add_decoration: self.add_decoration.difference(other.sub_decoration) | other.add_decoration,
      sub_decoration: self.sub_decoration.difference(other.add_decoration) | other.sub_decoration,
      font:           other.font.clone().or_else(|| self.font.clone()),
      insertion:      other.insertion.clone().or_else(|| self.insertion.clone()),
      click:          other.click.clone().or_else(|| self.click.clone()),
      hover:          other.hover.clone().or_else(|| self.hover.clone()),
    }
  }
}
