use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::GraphError;
use crate::graph::classify::classify;
use crate::graph::layout::EdgeLayout;
use crate::graph::source::NodeSource;
use crate::model::{Attribute, GraphNode, NODE_ANCHOR};

/// Builds the graph node for one line.
///
/// Attributes keep the order of the forward+inverse view. An attribute is
/// inverse when its name is missing from the forward-only view.
pub fn translate<S: NodeSource + ?Sized>(source: &S, id: u64) -> Result<GraphNode, GraphError> {
    let forward = source.fetch_forward(id)?;
    let full = source.fetch_forward_with_inverse(id)?;

    let forward_keys: HashSet<&str> = forward.keys().collect();
    let mut layout = EdgeLayout::new();

    let attributes: Vec<Attribute> = full
        .attributes
        .iter()
        .map(|(name, raw)| {
            let inverse = !forward_keys.contains(name.as_str());
            let content = classify(raw);
            let edge_anchor = layout.place(inverse, content.has_value());
            Attribute {
                name: name.clone(),
                content,
                inverse,
                edge_anchor,
            }
        })
        .collect();

    let entity_type = source.type_name(full.type_code).unwrap_or_else(|| {
        warn!(id, type_code = full.type_code, "type code has no name");
        format!("Type{}", full.type_code)
    });

    debug!(
        id,
        %entity_type,
        attributes = attributes.len(),
        inverse = attributes.iter().filter(|a| a.inverse).count(),
        "translated line"
    );

    Ok(GraphNode {
        id: full.id,
        entity_type,
        attributes,
        layout_hint: NODE_ANCHOR,
    })
}
