use tracing::{debug, info};

use crate::error::GraphError;
use crate::graph::source::ModelSource;
use crate::graph::translate::translate;
use crate::model::{GraphNode, TypeIndex};
use crate::parser::{IfcModel, OpenOptions};

/// Entity type every valid model is rooted at.
pub const ROOT_TYPE: &str = "IfcProject";

/// One open model and its type index.
///
/// The index is built once on load and never changes. Opening another
/// model means creating another session; sessions are independent.
#[derive(Debug)]
pub struct Session<S = IfcModel> {
    source: S,
    type_index: TypeIndex,
    root_id: u64,
}

impl Session<IfcModel> {
    /// Opens raw model bytes, recentering coordinates to the origin.
    pub fn open(bytes: &[u8]) -> Result<(Self, GraphNode), GraphError> {
        Self::open_with(bytes, OpenOptions::default())
    }

    pub fn open_with(bytes: &[u8], options: OpenOptions) -> Result<(Self, GraphNode), GraphError> {
        let model = IfcModel::open(bytes, options)?;
        Self::load(model)
    }
}

impl<S: ModelSource> Session<S> {
    /// Indexes every line by type and translates the project root.
    pub fn load(source: S) -> Result<(Self, GraphNode), GraphError> {
        let type_index = build_type_index(&source);
        let root_id = type_index.first(ROOT_TYPE).ok_or(GraphError::MissingRoot)?;

        info!(
            types = type_index.len(),
            lines = type_index.total_lines(),
            root = root_id,
            "model loaded"
        );

        let session = Self {
            source,
            type_index,
            root_id,
        };
        let root = session.add_node(root_id)?;
        Ok((session, root))
    }

    /// Translates a line into a fresh node.
    pub fn add_node(&self, id: u64) -> Result<GraphNode, GraphError> {
        translate(&self.source, id)
    }

    /// Same as [`Session::add_node`]; kept for callers that look lines up
    /// by id rather than by following a reference.
    pub fn add_node_by_id(&self, id: u64) -> Result<GraphNode, GraphError> {
        self.add_node(id)
    }

    #[must_use]
    pub fn type_index(&self) -> &TypeIndex {
        &self.type_index
    }

    #[must_use]
    pub fn root_id(&self) -> u64 {
        self.root_id
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }
}

fn build_type_index<S: ModelSource>(source: &S) -> TypeIndex {
    let mut index = TypeIndex::new();
    for id in source.line_ids() {
        let name = source
            .line_type(id)
            .and_then(|code| source.type_name(code));
        match name {
            Some(name) => index.push(&name, id),
            None => debug!(id, "line without a resolvable type left out of the index"),
        }
    }
    index
}
