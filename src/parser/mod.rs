pub mod model;
pub mod recenter;
pub mod record;
pub mod schema;
pub mod step;

pub use crate::error::ParseError;
pub use model::{IfcModel, OpenOptions};
pub use record::{EntityRecord, RawValue, Scalar, ValueTag, OMITTED_ID};
pub use step::{StepEntity, StepFile, StepValue};
