//! Data model emitted by the node translator.

pub mod content;
pub mod node;
pub mod type_index;

pub use content::{AttrContent, AttrValue, Content};
pub use node::{Attribute, GraphNode, Point, NODE_ANCHOR};
pub use type_index::TypeIndex;
