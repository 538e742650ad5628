use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{GraphError, ParseError, ServerError, TransportError};
use crate::graph::EdgeLayout;
use crate::model::{GraphNode, TypeIndex, NODE_ANCHOR};
use crate::parser::OpenOptions;
use crate::remote::server::NodeServer;
use crate::remote::wire::{
    ErrorResponse, GetNodeRequest, GetNodeResponse, UploadResponse, GET_NODE_ROUTE,
};

/// Request/response channel to a node server.
///
/// One attempt per call. Error answers come back as
/// [`TransportError::Status`] carrying the server's code.
pub trait Transport {
    /// Sends a model file, answering with an upload response body.
    fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<Value, TransportError>;

    /// Posts a JSON body to a route.
    fn post(&self, route: &str, body: Value) -> Result<Value, TransportError>;
}

/// Transport that calls an in-process [`NodeServer`].
#[derive(Debug, Default)]
pub struct Loopback {
    server: Mutex<NodeServer>,
}

impl Loopback {
    #[must_use]
    pub fn new(server: NodeServer) -> Self {
        Self {
            server: Mutex::new(server),
        }
    }

    #[must_use]
    pub fn with_options(options: OpenOptions) -> Self {
        Self::new(NodeServer::with_options(options))
    }

    fn server(&self) -> Result<std::sync::MutexGuard<'_, NodeServer>, TransportError> {
        self.server.lock().map_err(|_| TransportError::Unavailable {
            message: "node server lock poisoned".to_string(),
        })
    }
}

fn status(err: &ServerError) -> TransportError {
    let ErrorResponse { error, code } = ErrorResponse::from(err);
    TransportError::Status {
        code,
        message: error,
    }
}

impl Transport for Loopback {
    fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<Value, TransportError> {
        let response = self
            .server()?
            .upload(file_name, bytes)
            .map_err(|e| status(&e))?;
        Ok(serde_json::to_value(response)?)
    }

    fn post(&self, route: &str, body: Value) -> Result<Value, TransportError> {
        self.server()?.handle(route, body).map_err(|e| status(&e))
    }
}

/// Model loader and node translator backed by a remote node server.
///
/// Nodes arrive already classified. Edge anchors are recomputed locally
/// from each attribute's `inverse` flag and value; the flag itself is
/// taken as sent.
#[derive(Debug)]
pub struct RemoteSession<T> {
    transport: T,
    path: Option<String>,
}

impl<T: Transport> RemoteSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            path: None,
        }
    }

    /// Uploads a model and returns its root node and type index.
    pub fn load_file(
        &mut self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<(GraphNode, TypeIndex), GraphError> {
        let body = self
            .transport
            .upload(file_name, bytes)
            .map_err(|e| into_graph_error(e, None))?;
        let UploadResponse {
            model,
            entities,
            path,
        } = decode(body)?;

        debug!(%path, root = model.id, "remote model loaded");
        self.path = Some(path);
        Ok((relayout(model), entities))
    }

    pub fn add_node(&self, id: u64) -> Result<GraphNode, GraphError> {
        let path = self.path.as_ref().ok_or_else(|| TransportError::Unavailable {
            message: "no model has been uploaded".to_string(),
        })?;
        let request = GetNodeRequest {
            path: path.clone(),
            id,
        };
        let body = serde_json::to_value(request).map_err(TransportError::from)?;
        let body = self
            .transport
            .post(GET_NODE_ROUTE, body)
            .map_err(|e| into_graph_error(e, Some(id)))?;
        let GetNodeResponse { node } = decode(body)?;
        Ok(relayout(node))
    }

    pub fn add_node_by_id(&self, id: u64) -> Result<GraphNode, GraphError> {
        self.add_node(id)
    }

    /// Token of the uploaded model, once there is one.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

fn decode<R: DeserializeOwned>(body: Value) -> Result<R, GraphError> {
    serde_json::from_value(body).map_err(|e| GraphError::Transport(e.into()))
}

/// Restores the local error for codes that have one. `requested` is the
/// node id a `get_node` call asked for.
fn into_graph_error(err: TransportError, requested: Option<u64>) -> GraphError {
    match err {
        TransportError::Status { code, message } => match (code.as_str(), requested) {
            ("MISSING_ROOT", _) => GraphError::MissingRoot,
            ("PARSE_ERROR", _) => GraphError::Parse(ParseError::Remote { message }),
            ("UNKNOWN_ID", Some(id)) => GraphError::UnknownId(id),
            _ => GraphError::Transport(TransportError::Status { code, message }),
        },
        other => GraphError::Transport(other),
    }
}

fn relayout(mut node: GraphNode) -> GraphNode {
    let mut layout = EdgeLayout::new();
    for attribute in &mut node.attributes {
        attribute.edge_anchor = layout.place(attribute.inverse, attribute.content.has_value());
    }
    node.layout_hint = NODE_ANCHOR;
    node
}
