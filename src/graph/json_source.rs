//! Pre-parsed line records in JSON.
//!
//! A line dump holds both views of every line, each as an object with
//! `expressID`, `type` and one key per attribute:
//!
//! ```json
//! {
//!   "types": ["IfcProject", "IfcWall"],
//!   "lines": [
//!     {
//!       "forward": {"expressID": 10, "type": 1, "Name": {"type": 2, "value": "Wall-1"}},
//!       "withInverses": {"expressID": 10, "type": 1, "Name": {"type": 2, "value": "Wall-1"},
//!                        "HasOpenings": [{"type": 5, "value": 20}]}
//!     }
//!   ]
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{GraphError, ParseError};
use crate::graph::source::{ModelSource, NodeSource};
use crate::parser::{EntityRecord, RawValue, Scalar, ValueTag};

const ID_KEY: &str = "expressID";
const TYPE_KEY: &str = "type";

#[derive(Debug, Serialize, Deserialize)]
struct LineDump {
    types: Vec<String>,
    lines: Vec<DumpedLine>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DumpedLine {
    forward: Map<String, Value>,
    with_inverses: Map<String, Value>,
}

#[derive(Debug, Clone)]
struct LineViews {
    forward: EntityRecord,
    full: EntityRecord,
}

/// A [`NodeSource`] over a JSON line dump.
#[derive(Debug, Clone, Default)]
pub struct JsonLineSource {
    type_names: Vec<String>,
    lines: Vec<LineViews>,
    index: HashMap<u64, usize>,
}

impl JsonLineSource {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        let dump: LineDump = serde_json::from_slice(bytes).map_err(|e| ParseError::InvalidDump {
            message: e.to_string(),
        })?;

        let mut source = Self {
            type_names: dump.types,
            ..Self::default()
        };
        for line in &dump.lines {
            let forward = record_from_json(&line.forward)?;
            let full = record_from_json(&line.with_inverses)?;
            if forward.id != full.id {
                return Err(ParseError::InvalidDump {
                    message: format!("views of line #{} disagree on its id", forward.id),
                });
            }
            if source.index.insert(forward.id, source.lines.len()).is_some() {
                return Err(ParseError::InvalidDump {
                    message: format!("line #{} appears twice", forward.id),
                });
            }
            source.lines.push(LineViews { forward, full });
        }
        Ok(source)
    }

    /// Captures both views of every line of another source.
    pub fn capture<S: ModelSource + ?Sized>(source: &S) -> Result<Self, GraphError> {
        let mut capture = Self::default();
        let mut codes: HashMap<u32, u32> = HashMap::new();

        for id in source.line_ids() {
            let mut forward = source.fetch_forward(id)?;
            let mut full = source.fetch_forward_with_inverse(id)?;
            let code = match codes.get(&forward.type_code) {
                Some(&code) => code,
                None => {
                    let name = source
                        .type_name(forward.type_code)
                        .unwrap_or_else(|| format!("Type{}", forward.type_code));
                    capture.type_names.push(name);
                    let code = (capture.type_names.len() - 1) as u32;
                    codes.insert(forward.type_code, code);
                    code
                }
            };
            forward.type_code = code;
            full.type_code = code;
            capture.index.insert(id, capture.lines.len());
            capture.lines.push(LineViews { forward, full });
        }

        Ok(capture)
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        let dump = LineDump {
            types: self.type_names.clone(),
            lines: self
                .lines
                .iter()
                .map(|line| DumpedLine {
                    forward: record_to_json(&line.forward),
                    with_inverses: record_to_json(&line.full),
                })
                .collect(),
        };
        serde_json::to_value(dump).unwrap_or(Value::Null)
    }

    fn views(&self, id: u64) -> Result<&LineViews, GraphError> {
        self.index
            .get(&id)
            .map(|&slot| &self.lines[slot])
            .ok_or(GraphError::UnknownId(id))
    }
}

impl NodeSource for JsonLineSource {
    fn fetch_forward(&self, id: u64) -> Result<EntityRecord, GraphError> {
        Ok(self.views(id)?.forward.clone())
    }

    fn fetch_forward_with_inverse(&self, id: u64) -> Result<EntityRecord, GraphError> {
        Ok(self.views(id)?.full.clone())
    }

    fn type_name(&self, type_code: u32) -> Option<String> {
        self.type_names.get(type_code as usize).cloned()
    }
}

impl ModelSource for JsonLineSource {
    fn line_ids(&self) -> Vec<u64> {
        self.lines.iter().map(|line| line.forward.id).collect()
    }

    fn line_type(&self, id: u64) -> Option<u32> {
        self.views(id).ok().map(|line| line.forward.type_code)
    }
}

fn record_from_json(object: &Map<String, Value>) -> Result<EntityRecord, ParseError> {
    let id = object.get(ID_KEY).and_then(Value::as_u64);
    let type_code = object
        .get(TYPE_KEY)
        .and_then(Value::as_u64)
        .and_then(|code| u32::try_from(code).ok());

    let (Some(id), Some(type_code)) = (id, type_code) else {
        return Err(ParseError::InvalidDump {
            message: format!("line record without numeric '{ID_KEY}' and '{TYPE_KEY}'"),
        });
    };

    let attributes = object
        .iter()
        .filter(|(key, _)| key.as_str() != ID_KEY && key.as_str() != TYPE_KEY)
        .map(|(key, value)| (key.clone(), raw_from_json(value)))
        .collect();

    Ok(EntityRecord {
        id,
        type_code,
        attributes,
    })
}

fn record_to_json(record: &EntityRecord) -> Map<String, Value> {
    let mut object = Map::new();
    object.insert(ID_KEY.to_string(), Value::from(record.id));
    object.insert(TYPE_KEY.to_string(), Value::from(record.type_code));
    for (name, value) in &record.attributes {
        object.insert(name.clone(), raw_to_json(value));
    }
    object
}

/// Decodes one attribute value of a line dump.
#[must_use]
pub fn raw_from_json(value: &Value) -> RawValue {
    match value {
        Value::Null => RawValue::Null,
        Value::Bool(b) => RawValue::Scalar(Scalar::Text(if *b { "T" } else { "F" }.to_string())),
        Value::Number(_) | Value::String(_) => {
            json_scalar(value).map_or(RawValue::Null, RawValue::Scalar)
        }
        Value::Array(items) => RawValue::List(items.iter().map(raw_from_json).collect()),
        Value::Object(object) => raw_from_object(object),
    }
}

fn raw_from_object(object: &Map<String, Value>) -> RawValue {
    if let Some(type_name) = object.get("name").and_then(Value::as_str) {
        let mut inner = object.clone();
        inner.remove("name");
        return RawValue::Structured {
            type_name: type_name.to_string(),
            value: Box::new(raw_from_object(&inner)),
        };
    }

    let tag = object
        .get(TYPE_KEY)
        .and_then(Value::as_u64)
        .and_then(ValueTag::from_code);
    let scalar = object.get("value").and_then(json_scalar);

    match (tag, scalar) {
        (Some(ValueTag::Real), Some(Scalar::Integer(i))) => RawValue::Tagged {
            tag: ValueTag::Real,
            value: Scalar::Real(i as f64),
        },
        (Some(tag), Some(value)) => RawValue::Tagged { tag, value },
        _ => RawValue::Structured {
            type_name: String::new(),
            value: Box::new(object.get("value").map_or(RawValue::Null, raw_from_json)),
        },
    }
}

fn json_scalar(value: &Value) -> Option<Scalar> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Scalar::Integer)
            .or_else(|| n.as_f64().map(Scalar::Real)),
        Value::String(s) => Some(Scalar::Text(s.clone())),
        _ => None,
    }
}

/// Encodes one attribute value for a line dump.
#[must_use]
pub fn raw_to_json(value: &RawValue) -> Value {
    match value {
        RawValue::Null => Value::Null,
        RawValue::Handle(id) => tagged_json(ValueTag::Ref, &Scalar::Integer(*id as i64)),
        RawValue::Tagged { tag, value } => tagged_json(*tag, value),
        RawValue::Scalar(value) => scalar_json(value),
        RawValue::List(items) => Value::Array(items.iter().map(raw_to_json).collect()),
        RawValue::Structured { type_name, value } => {
            let mut object = match raw_to_json(value) {
                Value::Object(object) => object,
                other => {
                    let mut object = Map::new();
                    object.insert("value".to_string(), other);
                    object
                }
            };
            object.insert("name".to_string(), Value::from(type_name.as_str()));
            Value::Object(object)
        }
    }
}

fn tagged_json(tag: ValueTag, value: &Scalar) -> Value {
    let mut object = Map::new();
    object.insert(TYPE_KEY.to_string(), Value::from(tag.code()));
    object.insert("value".to_string(), scalar_json(value));
    Value::Object(object)
}

fn scalar_json(value: &Scalar) -> Value {
    match value {
        Scalar::Integer(i) => Value::from(*i),
        Scalar::Real(f) => Value::from(*f),
        Scalar::Text(s) => Value::from(s.as_str()),
    }
}
