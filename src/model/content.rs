use serde::{Deserialize, Serialize};

/// A scalar or coordinate-like value shown on an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Integer(i64),
    Number(f64),
    Text(String),
    Numbers(Vec<f64>),
}

impl AttrValue {
    /// `true` for null and for an empty numeric list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            AttrValue::Null => true,
            AttrValue::Numbers(values) => values.is_empty(),
            AttrValue::Integer(_) | AttrValue::Number(_) | AttrValue::Text(_) => false,
        }
    }
}

/// One classified entry of an attribute.
///
/// Serialized as `{"kind": "reference" | "value", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum AttrContent {
    /// A link to another line; `None` is the omitted parameter.
    Reference(Option<u64>),
    Value(AttrValue),
}

impl AttrContent {
    #[must_use]
    pub fn has_value(&self) -> bool {
        match self {
            AttrContent::Reference(id) => id.is_some(),
            AttrContent::Value(value) => !value.is_empty(),
        }
    }

    /// Target id of a resolved reference.
    #[must_use]
    pub fn target(&self) -> Option<u64> {
        match self {
            AttrContent::Reference(id) => *id,
            AttrContent::Value(_) => None,
        }
    }
}

/// Attribute content: a single entry or an ordered list of entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Many(Vec<AttrContent>),
    One(AttrContent),
}

impl Content {
    /// Whether the attribute carries anything worth drawing.
    #[must_use]
    pub fn has_value(&self) -> bool {
        match self {
            Content::Many(entries) => !entries.is_empty(),
            Content::One(entry) => entry.has_value(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &AttrContent> {
        match self {
            Content::Many(entries) => entries.iter(),
            Content::One(entry) => std::slice::from_ref(entry).iter(),
        }
    }

    /// Ids of every resolved reference in this content.
    pub fn targets(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries().filter_map(AttrContent::target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn wire_shape_of_entries() {
        assert_eq!(
            serde_json::to_value(AttrContent::Reference(None)).unwrap(),
            json!({"kind": "reference", "value": null})
        );
        assert_eq!(
            serde_json::to_value(AttrContent::Value(AttrValue::Numbers(vec![0.0, 1.5]))).unwrap(),
            json!({"kind": "value", "value": [0.0, 1.5]})
        );
        assert_eq!(
            serde_json::to_value(Content::Many(vec![AttrContent::Reference(Some(3))])).unwrap(),
            json!([{"kind": "reference", "value": 3}])
        );
    }

    #[test]
    fn reads_back_from_the_wire() {
        let content: Content = serde_json::from_value(json!({"kind": "value", "value": "Wall"})).unwrap();
        assert_eq!(content, Content::One(AttrContent::Value(AttrValue::Text("Wall".into()))));
        let content: Content = serde_json::from_value(json!({"kind": "value", "value": null})).unwrap();
        assert_eq!(content, Content::One(AttrContent::Value(AttrValue::Null)));
        let content: Content = serde_json::from_value(json!({"kind": "value", "value": 2.5})).unwrap();
        assert_eq!(content, Content::One(AttrContent::Value(AttrValue::Number(2.5))));
    }

    #[test]
    fn presence_rules() {
        assert!(!Content::Many(Vec::new()).has_value());
        assert!(Content::Many(vec![AttrContent::Reference(None)]).has_value());
        assert!(!Content::One(AttrContent::Reference(None)).has_value());
        assert!(!Content::One(AttrContent::Value(AttrValue::Numbers(Vec::new()))).has_value());
        assert!(Content::One(AttrContent::Value(AttrValue::Integer(0))).has_value());
    }
}
