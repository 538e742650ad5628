//! # IFC Graph
//!
//! Expands an IFC model into graph nodes one line at a time.
//!
//! ## Features
//!
//! - Parse IFC text (STEP physical files) into tagged line records
//! - Index every line by entity type and locate the `IfcProject` root
//! - Translate any line into a node: attributes split into forward and
//!   inverse sides, each with its edge anchor
//! - Serve nodes across a request/response boundary
//! - Export to JSON, CSV and JSON line dumps
//!
//! ## Example
//!
//! ```no_run
//! use ifc_graph::graph::Session;
//!
//! let bytes = std::fs::read("model.ifc").expect("Failed to read");
//! let (session, root) = Session::open(&bytes).expect("Failed to open");
//! println!("Root: #{} {}", root.id, root.entity_type);
//! for attribute in root.inverse_attributes() {
//!     println!("  <- {}", attribute.name);
//! }
//! println!("Types: {}", session.type_index().len());
//! ```

pub mod error;
pub mod export;
pub mod graph;
pub mod model;
pub mod parser;
pub mod remote;
pub mod ui;
