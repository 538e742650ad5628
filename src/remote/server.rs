use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::ServerError;
use crate::graph::Session;
use crate::parser::OpenOptions;
use crate::remote::wire::{
    GetNodeRequest, GetNodeResponse, UploadResponse, GET_NODE_ROUTE, UPLOAD_ROUTE,
};

/// Serves classified nodes for uploaded models.
///
/// Every upload opens its own session, stored under an opaque path token.
/// Sessions stay open until [`NodeServer::close`] drops them.
#[derive(Debug, Default)]
pub struct NodeServer {
    sessions: HashMap<String, Session>,
    uploads: u64,
    options: OpenOptions,
}

impl NodeServer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: OpenOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn upload(&mut self, file_name: &str, bytes: &[u8]) -> Result<UploadResponse, ServerError> {
        let (session, root) = Session::open_with(bytes, self.options)?;

        self.uploads += 1;
        let path = format!("uploads/{}-{}", self.uploads, sanitize(file_name));
        let entities = session.type_index().clone();
        self.sessions.insert(path.clone(), session);

        info!(%path, bytes = bytes.len(), "stored uploaded model");
        Ok(UploadResponse {
            model: root,
            entities,
            path,
        })
    }

    pub fn get_node(&self, request: &GetNodeRequest) -> Result<GetNodeResponse, ServerError> {
        let session = self
            .sessions
            .get(&request.path)
            .ok_or_else(|| ServerError::UnknownModel {
                path: request.path.clone(),
            })?;
        let node = session.add_node(request.id)?;
        debug!(path = %request.path, id = request.id, "served node");
        Ok(GetNodeResponse { node })
    }

    /// Dispatches a JSON request to its route.
    pub fn handle(&self, route: &str, body: Value) -> Result<Value, ServerError> {
        match route {
            GET_NODE_ROUTE => {
                let request: GetNodeRequest =
                    serde_json::from_value(body).map_err(|e| ServerError::BadRequest {
                        message: e.to_string(),
                    })?;
                let response = self.get_node(&request)?;
                serde_json::to_value(response).map_err(|e| ServerError::BadRequest {
                    message: e.to_string(),
                })
            }
            UPLOAD_ROUTE => Err(ServerError::BadRequest {
                message: "uploads carry the model bytes, not a JSON body".to_string(),
            }),
            _ => Err(ServerError::NotFound {
                route: route.to_string(),
            }),
        }
    }

    /// Drops the session stored under `path`.
    pub fn close(&mut self, path: &str) -> Result<(), ServerError> {
        if self.sessions.remove(path).is_none() {
            return Err(ServerError::UnknownModel {
                path: path.to_string(),
            });
        }
        info!(%path, "closed uploaded model");
        Ok(())
    }

    #[must_use]
    pub fn model_count(&self) -> usize {
        self.sessions.len()
    }
}

fn sanitize(file_name: &str) -> String {
    let name: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() {
        "model.ifc".to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const MODEL: &str = "ISO-10303-21;
DATA;
#1=IFCPROJECT('p',$,'Project',$,$,$,$,$,$);
#2=IFCWALL('w',$,'Wall',$,$,$,$,$,$);
ENDSEC;
END-ISO-10303-21;
";

    #[test]
    fn uploads_get_distinct_tokens() {
        let mut server = NodeServer::new();
        let first = server.upload("a b.ifc", MODEL.as_bytes()).unwrap();
        let second = server.upload("", MODEL.as_bytes()).unwrap();
        assert_eq!(first.path, "uploads/1-a_b.ifc");
        assert_eq!(second.path, "uploads/2-model.ifc");
        assert_eq!(first.model.id, 1);
        assert_eq!(first.entities.ids("IfcWall"), &[2]);
        assert_eq!(server.model_count(), 2);
    }

    #[test]
    fn routes_node_requests() {
        let mut server = NodeServer::new();
        let upload = server.upload("m.ifc", MODEL.as_bytes()).unwrap();
        let body = server
            .handle(GET_NODE_ROUTE, json!({"path": upload.path, "id": 2}))
            .unwrap();
        assert_eq!(body["node"]["type"], "IfcWall");
        assert_eq!(body["node"]["id"], 2);
    }

    #[test]
    fn closed_models_are_gone() {
        let mut server = NodeServer::new();
        let first = server.upload("a.ifc", MODEL.as_bytes()).unwrap();
        let second = server.upload("b.ifc", MODEL.as_bytes()).unwrap();

        server.close(&first.path).unwrap();
        assert_eq!(server.model_count(), 1);
        let request = GetNodeRequest {
            path: first.path.clone(),
            id: 2,
        };
        assert_eq!(server.get_node(&request).unwrap_err().code(), "UNKNOWN_MODEL");
        assert_eq!(server.close(&first.path).unwrap_err().code(), "UNKNOWN_MODEL");

        let request = GetNodeRequest {
            path: second.path,
            id: 2,
        };
        assert_eq!(server.get_node(&request).unwrap().node.id, 2);
    }

    #[test]
    fn errors_carry_codes() {
        let mut server = NodeServer::new();
        let upload = server.upload("m.ifc", MODEL.as_bytes()).unwrap();

        let err = server.handle(GET_NODE_ROUTE, json!({"path": upload.path, "id": 9})).unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_ID");
        let err = server.handle(GET_NODE_ROUTE, json!({"path": "nope", "id": 1})).unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_MODEL");
        let err = server.handle(GET_NODE_ROUTE, json!({"id": 1})).unwrap_err();
        assert_eq!(err.code(), "BAD_REQUEST");
        let err = server.handle(UPLOAD_ROUTE, json!({})).unwrap_err();
        assert_eq!(err.code(), "BAD_REQUEST");
        let err = server.handle("/delete", json!({})).unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
        let err = server.upload("bad.ifc", b"garbage").unwrap_err();
        assert_eq!(err.code(), "PARSE_ERROR");
    }
}
