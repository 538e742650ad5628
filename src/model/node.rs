use serde::{Deserialize, Serialize};

use super::Content;

/// A layout hint in renderer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// Anchor every node is placed at; the renderer positions expanded nodes
/// relative to it.
pub const NODE_ANCHOR: Point = Point { x: 40, y: 60 };

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub name: String,
    pub content: Content,
    pub inverse: bool,
    pub edge_anchor: Point,
}

/// One IFC line rendered as a graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: u64,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub attributes: Vec<Attribute>,
    pub layout_hint: Point,
}

impl GraphNode {
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn forward_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| !a.inverse)
    }

    pub fn inverse_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| a.inverse)
    }
}
