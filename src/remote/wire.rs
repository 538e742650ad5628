//! Request and response bodies exchanged with a node server.

use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::model::{GraphNode, TypeIndex};

pub const UPLOAD_ROUTE: &str = "/upload";
pub const GET_NODE_ROUTE: &str = "/get_node";

/// Answer to an upload: the classified root, the type index, and the
/// token naming the stored model in later requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub model: GraphNode,
    pub entities: TypeIndex,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetNodeRequest {
    pub path: String,
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetNodeResponse {
    pub node: GraphNode,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<&ServerError> for ErrorResponse {
    fn from(err: &ServerError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code().to_string(),
        }
    }
}
