//! Node translation served across a request/response boundary.
//!
//! [`NodeServer`] keeps uploaded models and answers node requests;
//! [`RemoteSession`] gives callers the same loader/translator surface as
//! [`crate::graph::Session`] over any [`Transport`].

pub mod client;
pub mod server;
pub mod wire;

pub use client::{Loopback, RemoteSession, Transport};
pub use server::NodeServer;
pub use wire::{ErrorResponse, GetNodeRequest, GetNodeResponse, UploadResponse};
