//! Raw line records handed out by the parsing boundary.
//!
//! Every attribute value is decoded exactly once into [`RawValue`], so
//! consumers match on a closed set of shapes instead of sniffing.

use crate::parser::step::StepValue;

/// Reference id the parser reserves for the omitted parameter `*`.
pub const OMITTED_ID: u64 = 0;

/// Value type codes, as conventionally used by IFC line dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTag {
    String = 1,
    Label = 2,
    Enum = 3,
    Real = 4,
    Ref = 5,
    Integer = 10,
}

impl ValueTag {
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::String),
            2 => Some(Self::Label),
            3 => Some(Self::Enum),
            4 => Some(Self::Real),
            5 => Some(Self::Ref),
            10 => Some(Self::Integer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Integer(i64),
    Real(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// `$`, or an absent value.
    Null,
    /// A single cross-reference, as the parser hands out top-level references.
    Handle(u64),
    /// A value carrying its type code. References nested in lists arrive
    /// as `Tagged { tag: Ref, .. }` rather than as handles.
    Tagged { tag: ValueTag, value: Scalar },
    /// An untagged number or string.
    Scalar(Scalar),
    List(Vec<RawValue>),
    /// A wrapped value such as `IFCLABEL('x')`, or any shape not covered above.
    Structured {
        type_name: String,
        value: Box<RawValue>,
    },
}

impl RawValue {
    /// Target id when this value refers to another line.
    ///
    /// Both the handle form and the tagged form are references.
    #[must_use]
    pub fn reference_id(&self) -> Option<u64> {
        match self {
            RawValue::Handle(id) => Some(*id),
            RawValue::Tagged {
                tag: ValueTag::Ref,
                value: Scalar::Integer(id),
            } => u64::try_from(*id).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_real(&self) -> bool {
        matches!(
            self,
            RawValue::Tagged {
                tag: ValueTag::Real,
                ..
            }
        )
    }

    /// Decodes a top-level attribute value.
    #[must_use]
    pub fn from_step(value: &StepValue) -> Self {
        match value {
            StepValue::Reference(id) => RawValue::Handle(*id),
            StepValue::Derived => RawValue::Handle(OMITTED_ID),
            other => Self::from_step_element(other),
        }
    }

    /// Decodes a value nested inside a list.
    fn from_step_element(value: &StepValue) -> Self {
        let tagged = |tag, value| RawValue::Tagged { tag, value };
        match value {
            StepValue::Reference(id) => tagged(ValueTag::Ref, Scalar::Integer(*id as i64)),
            StepValue::Derived => tagged(ValueTag::Ref, Scalar::Integer(OMITTED_ID as i64)),
            StepValue::Null => RawValue::Null,
            StepValue::String(s) => tagged(ValueTag::String, Scalar::Text(s.clone())),
            StepValue::Real(f) => tagged(ValueTag::Real, Scalar::Real(*f)),
            StepValue::Integer(i) => tagged(ValueTag::Integer, Scalar::Integer(*i)),
            StepValue::Boolean(b) => {
                tagged(ValueTag::Enum, Scalar::Text(if *b { "T" } else { "F" }.to_string()))
            }
            StepValue::Enum(e) => tagged(ValueTag::Enum, Scalar::Text(e.clone())),
            StepValue::List(items) => {
                RawValue::List(items.iter().map(Self::from_step_element).collect())
            }
            StepValue::Typed { type_name, value } => RawValue::Structured {
                type_name: type_name.clone(),
                value: Box::new(Self::from_step_element(value)),
            },
        }
    }
}

/// One view of a line: its id, its type code and its named attributes
/// in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub id: u64,
    pub type_code: u32,
    pub attributes: Vec<(String, RawValue)>,
}

impl EntityRecord {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}
