//! Line-to-node translation.
//!
//! [`Session`] is the model loader: it opens a model, indexes its lines
//! by type and hands out nodes on demand. [`translate`] is the one
//! translation routine, written against the [`NodeSource`] capability so
//! in-process models and JSON line dumps share it.

pub mod classify;
pub mod json_source;
pub mod layout;
pub mod session;
pub mod source;
pub mod translate;

pub use classify::classify;
pub use json_source::JsonLineSource;
pub use layout::EdgeLayout;
pub use session::{Session, ROOT_TYPE};
pub use source::{ModelSource, NodeSource};
pub use translate::translate;
