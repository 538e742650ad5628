use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Line ids grouped by entity type name.
///
/// Groups keep the order in which their type was first seen, and ids
/// keep enumeration order within a group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeIndex {
    groups: Vec<(String, Vec<u64>)>,
    lookup: HashMap<String, usize>,
}

impl TypeIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, type_name: &str, id: u64) {
        let slot = match self.lookup.get(type_name) {
            Some(&slot) => slot,
            None => {
                self.groups.push((type_name.to_string(), Vec::new()));
                self.lookup.insert(type_name.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].1.push(id);
    }

    #[must_use]
    pub fn ids(&self, type_name: &str) -> &[u64] {
        self.lookup
            .get(type_name)
            .map_or(&[][..], |&slot| self.groups[slot].1.as_slice())
    }

    #[must_use]
    pub fn first(&self, type_name: &str) -> Option<u64> {
        self.ids(type_name).first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u64])> {
        self.groups
            .iter()
            .map(|(name, ids)| (name.as_str(), ids.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn total_lines(&self) -> usize {
        self.groups.iter().map(|(_, ids)| ids.len()).sum()
    }
}

impl Serialize for TypeIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.groups.iter().map(|(name, ids)| (name, ids)))
    }
}

impl<'de> Deserialize<'de> for TypeIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TypeIndexVisitor;

        impl<'de> Visitor<'de> for TypeIndexVisitor {
            type Value = TypeIndex;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of type names to line ids")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TypeIndex, A::Error> {
                let mut index = TypeIndex::new();
                while let Some((name, ids)) = map.next_entry::<String, Vec<u64>>()? {
                    for id in ids {
                        index.push(&name, id);
                    }
                }
                Ok(index)
            }
        }

        deserializer.deserialize_map(TypeIndexVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_first_seen_order() {
        let mut index = TypeIndex::new();
        index.push("IfcWall", 10);
        index.push("IfcProject", 1);
        index.push("IfcWall", 5);

        let groups: Vec<(&str, Vec<u64>)> = index.iter().map(|(n, ids)| (n, ids.to_vec())).collect();
        assert_eq!(groups, vec![("IfcWall", vec![10, 5]), ("IfcProject", vec![1])]);
        assert_eq!(index.first("IfcWall"), Some(10));
        assert_eq!(index.ids("IfcSlab"), &[] as &[u64]);
        assert_eq!(index.total_lines(), 3);
    }

    #[test]
    fn serializes_as_an_ordered_map() {
        let mut index = TypeIndex::new();
        index.push("IfcWall", 10);
        index.push("IfcProject", 1);
        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(json, r#"{"IfcWall":[10],"IfcProject":[1]}"#);
        let back: TypeIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(back, index);
    }
}
