//! Error types for IFC Graph.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing IFC files.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the IFC file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The model bytes are not valid UTF-8 text.
    #[error("model is not valid UTF-8 text: {source}")]
    InvalidUtf8 {
        #[from]
        source: std::str::Utf8Error,
    },

    /// The STEP format is invalid or malformed.
    #[error("invalid STEP format: {message}")]
    InvalidStep { message: String },

    /// A node server could not open the model; carries its message as sent.
    #[error("{message}")]
    Remote { message: String },

    /// A JSON line dump does not have the expected shape.
    #[error("invalid line dump: {message}")]
    InvalidDump { message: String },
}

/// Errors surfaced by the model loader and the node translator.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The model bytes could not be opened.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The model has no `IfcProject` entity to use as root.
    #[error("model has no IfcProject root entity")]
    MissingRoot,

    /// The requested id is not a line of the open model.
    #[error("entity #{0} does not exist in the open model")]
    UnknownId(u64),

    /// A remote request failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors raised by a remote transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The remote side answered with an error status.
    #[error("remote error {code}: {message}")]
    Status { code: String, message: String },

    /// The response body did not have the expected shape.
    #[error("malformed response: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },

    /// The remote side could not be reached.
    #[error("transport unavailable: {message}")]
    Unavailable { message: String },
}

/// Errors that can occur when exporting data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },

    /// Failed to read the lines of the model being dumped.
    #[error("failed to capture model lines: {source}")]
    Capture {
        #[from]
        source: GraphError,
    },
}

/// Errors a node server reports back to its clients.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Opening or translating failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The path token does not name an uploaded model.
    #[error("no uploaded model at '{path}'")]
    UnknownModel { path: String },

    /// The request body could not be decoded.
    #[error("bad request: {message}")]
    BadRequest { message: String },

    /// The route is not served.
    #[error("no route '{route}'")]
    NotFound { route: String },
}

impl ServerError {
    /// Stable code sent alongside the message.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ServerError::Graph(GraphError::Parse(_)) => "PARSE_ERROR",
            ServerError::Graph(GraphError::MissingRoot) => "MISSING_ROOT",
            ServerError::Graph(GraphError::UnknownId(_)) => "UNKNOWN_ID",
            ServerError::Graph(GraphError::Transport(_)) => "TRANSPORT_ERROR",
            ServerError::UnknownModel { .. } => "UNKNOWN_MODEL",
            ServerError::BadRequest { .. } => "BAD_REQUEST",
            ServerError::NotFound { .. } => "NOT_FOUND",
        }
    }
}
