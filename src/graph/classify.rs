//! Attribute classification.
//!
//! Turns one raw attribute value into the content shown on a node:
//! references become links, reals lists collapse into one coordinate
//! value, everything else is shown as a plain value.

use tracing::warn;

use crate::model::{AttrContent, AttrValue, Content};
use crate::parser::{RawValue, Scalar, OMITTED_ID};

/// Classifies a raw attribute value. Never fails; shapes that do not fit
/// degrade to a best-effort value.
#[must_use]
pub fn classify(raw: &RawValue) -> Content {
    match raw {
        RawValue::List(items) if items.is_empty() => Content::Many(Vec::new()),
        RawValue::List(items) if items.iter().all(RawValue::is_real) => {
            Content::One(AttrContent::Value(AttrValue::Numbers(reals(items))))
        }
        RawValue::List(items) => Content::Many(items.iter().map(classify_element).collect()),
        other => Content::One(classify_single(other)),
    }
}

fn classify_single(raw: &RawValue) -> AttrContent {
    if let Some(id) = raw.reference_id() {
        return reference(id);
    }
    match raw {
        RawValue::Null => AttrContent::Value(AttrValue::Null),
        RawValue::Tagged { value, .. } | RawValue::Scalar(value) => {
            AttrContent::Value(scalar(value))
        }
        RawValue::Handle(_) | RawValue::List(_) | RawValue::Structured { .. } => {
            AttrContent::Value(fallback(raw))
        }
    }
}

fn classify_element(raw: &RawValue) -> AttrContent {
    match raw {
        RawValue::List(items) if !items.is_empty() && items.iter().all(RawValue::is_real) => {
            AttrContent::Value(AttrValue::Numbers(reals(items)))
        }
        other => classify_single(other),
    }
}

fn reference(id: u64) -> AttrContent {
    AttrContent::Reference((id != OMITTED_ID).then_some(id))
}

fn scalar(value: &Scalar) -> AttrValue {
    match value {
        Scalar::Integer(i) => AttrValue::Integer(*i),
        Scalar::Real(f) => AttrValue::Number(*f),
        Scalar::Text(s) => AttrValue::Text(s.clone()),
    }
}

fn reals(items: &[RawValue]) -> Vec<f64> {
    items
        .iter()
        .filter_map(|item| match item {
            RawValue::Tagged {
                value: Scalar::Real(f),
                ..
            } => Some(*f),
            RawValue::Tagged {
                value: Scalar::Integer(i),
                ..
            } => Some(*i as f64),
            _ => None,
        })
        .collect()
}

/// Best-effort scalar for shapes classification has no rule for.
fn fallback(raw: &RawValue) -> AttrValue {
    match raw {
        RawValue::Structured { type_name, value } => match value.as_ref() {
            RawValue::Tagged { value, .. } | RawValue::Scalar(value) => scalar(value),
            RawValue::Null => AttrValue::Null,
            RawValue::List(items) if !items.is_empty() && items.iter().all(RawValue::is_real) => {
                AttrValue::Numbers(reals(items))
            }
            nested @ RawValue::Structured { .. } => fallback(nested),
            _ => {
                warn!(%type_name, "wrapped value has no scalar to show");
                AttrValue::Null
            }
        },
        other => {
            warn!(value = ?other, "unrecognized attribute shape");
            AttrValue::Null
        }
    }
}
