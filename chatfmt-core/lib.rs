use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod node;
pub mod normalize;
pub mod render;
pub mod style;

pub use node::{
  Node,
  OpaqueNode,
  Payload,
  TemplateNode,
  TextNode,
};
pub use style::{
  Color,
  Decoration,
  Style,
};

pub type Tendril = SmartString<LazyCompact>;
