use crate::error::ExportError;
use crate::model::{GraphNode, TypeIndex};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// What a freshly loaded model looks like: its root node and type index.
#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    model: &'a GraphNode,
    entities: &'a TypeIndex,
}

pub fn export_json<P: AsRef<Path>>(
    root: &GraphNode,
    type_index: &TypeIndex,
    path: P,
) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let json = serde_json::to_string_pretty(&Snapshot {
        model: root,
        entities: type_index,
    })?;

    let mut file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    file.write_all(json.as_bytes())
        .map_err(|e| ExportError::WriteError {
            message: e.to_string(),
        })?;

    Ok(())
}
