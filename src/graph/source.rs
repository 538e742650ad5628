//! The capability the translator runs against.

use crate::error::GraphError;
use crate::parser::{EntityRecord, IfcModel};

/// Raw line records for one open model.
pub trait NodeSource {
    /// The line's forward attributes only.
    fn fetch_forward(&self, id: u64) -> Result<EntityRecord, GraphError>;

    /// The line's forward attributes followed by its inverse attributes.
    fn fetch_forward_with_inverse(&self, id: u64) -> Result<EntityRecord, GraphError>;

    /// Entity type name behind a type code.
    fn type_name(&self, type_code: u32) -> Option<String>;
}

/// A source that can also enumerate its lines, as the loader needs.
pub trait ModelSource: NodeSource {
    /// Every line id, in enumeration order.
    fn line_ids(&self) -> Vec<u64>;

    /// Type code of a line.
    fn line_type(&self, id: u64) -> Option<u32>;
}

impl NodeSource for IfcModel {
    fn fetch_forward(&self, id: u64) -> Result<EntityRecord, GraphError> {
        self.entity_record(id, false).ok_or(GraphError::UnknownId(id))
    }

    fn fetch_forward_with_inverse(&self, id: u64) -> Result<EntityRecord, GraphError> {
        self.entity_record(id, true).ok_or(GraphError::UnknownId(id))
    }

    fn type_name(&self, type_code: u32) -> Option<String> {
        IfcModel::type_name(self, type_code).map(str::to_string)
    }
}

impl ModelSource for IfcModel {
    fn line_ids(&self) -> Vec<u64> {
        self.all_entity_ids().collect()
    }

    fn line_type(&self, id: u64) -> Option<u32> {
        IfcModel::line_type(self, id)
    }
}
