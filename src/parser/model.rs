use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::{debug, info, warn};

use crate::error::ParseError;
use crate::parser::record::{EntityRecord, RawValue, Scalar, ValueTag};
use crate::parser::recenter::recenter_root_placements;
use crate::parser::schema;
use crate::parser::step::{StepFile, StepValue};

/// Settings applied when a model is opened.
#[derive(Debug, Clone, Copy)]
pub struct OpenOptions {
    /// Shift root placements so the model sits at the origin.
    pub coordinate_to_origin: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            coordinate_to_origin: true,
        }
    }
}

/// Lines referring to a target id: `(entity position, attribute index)`.
type ReverseIndex = HashMap<u64, Vec<(usize, usize)>>;

/// An opened IFC model.
///
/// Type codes are model-local: each distinct entity type gets the next
/// code in order of first appearance. Attribute names and inverse
/// attributes come from the IFC4 tables; files declaring another schema
/// get positional names and no inverses.
#[derive(Debug)]
pub struct IfcModel {
    step: StepFile,
    named: bool,
    type_names: Vec<String>,
    type_codes: Vec<u32>,
    reverse: OnceLock<ReverseIndex>,
}

impl IfcModel {
    pub fn open(bytes: &[u8], options: OpenOptions) -> Result<Self, ParseError> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let content = std::str::from_utf8(bytes)?;
        let mut step = StepFile::parse(content)?;

        if options.coordinate_to_origin {
            recenter_root_placements(&mut step);
        }

        let mut code_by_type: HashMap<String, u32> = HashMap::new();
        let mut type_names = Vec::new();
        let type_codes = step
            .entities
            .iter()
            .map(|entity| {
                *code_by_type
                    .entry(entity.entity_type.clone())
                    .or_insert_with(|| {
                        type_names.push(schema::canonical_name(&entity.entity_type));
                        (type_names.len() - 1) as u32
                    })
            })
            .collect();

        info!(
            schema = %step.schema,
            lines = step.entities.len(),
            types = type_names.len(),
            "opened IFC model"
        );

        let named = schema::covers(&step.schema);
        if !named {
            warn!(schema = %step.schema, "schema not covered, using positional attribute names");
        }

        Ok(Self {
            step,
            named,
            type_names,
            type_codes,
            reverse: OnceLock::new(),
        })
    }

    #[must_use]
    pub fn schema(&self) -> &str {
        &self.step.schema
    }

    pub fn all_entity_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.step.entities.iter().map(|e| e.id)
    }

    #[must_use]
    pub fn type_name(&self, type_code: u32) -> Option<&str> {
        self.type_names.get(type_code as usize).map(String::as_str)
    }

    /// All type names, indexed by type code.
    #[must_use]
    pub fn type_names(&self) -> &[String] {
        &self.type_names
    }

    #[must_use]
    pub fn line_type(&self, id: u64) -> Option<u32> {
        let position = self.position(id)?;
        Some(self.type_codes[position])
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.step.position(id)
    }

    /// The attribute record of a line, optionally with inverse attributes
    /// appended after the forward ones.
    #[must_use]
    pub fn entity_record(&self, id: u64, include_inverse: bool) -> Option<EntityRecord> {
        let position = self.position(id)?;
        let entity = &self.step.entities[position];
        let names = if self.named {
            schema::attribute_names(&entity.entity_type)
        } else {
            Vec::new()
        };

        let mut attributes: Vec<(String, RawValue)> = entity
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| (schema::attribute_name(&names, i), RawValue::from_step(value)))
            .collect();

        if include_inverse && self.named {
            attributes.extend(self.inverse_attributes(id, &entity.entity_type));
        }

        Some(EntityRecord {
            id,
            type_code: self.type_codes[position],
            attributes,
        })
    }

    fn inverse_attributes(&self, id: u64, entity_type: &str) -> Vec<(String, RawValue)> {
        let referrers = self
            .reverse_index()
            .get(&id)
            .map_or(&[][..], Vec::as_slice);

        schema::inverse_attributes(entity_type)
            .into_iter()
            .map(|def| {
                let sources: Vec<u64> = referrers
                    .iter()
                    .filter_map(|&(position, attribute)| {
                        let source = &self.step.entities[position];
                        let names = schema::attribute_names(&source.entity_type);
                        let matches = schema::is_subtype_of(&source.entity_type, def.source)
                            && names.get(attribute) == Some(&def.source_attribute);
                        matches.then_some(source.id)
                    })
                    .collect();

                let value = if def.set {
                    RawValue::List(
                        sources
                            .into_iter()
                            .map(|source| RawValue::Tagged {
                                tag: ValueTag::Ref,
                                value: Scalar::Integer(source as i64),
                            })
                            .collect(),
                    )
                } else {
                    sources.first().map_or(RawValue::Null, |&source| RawValue::Handle(source))
                };
                (def.name.to_string(), value)
            })
            .collect()
    }

    fn reverse_index(&self) -> &ReverseIndex {
        self.reverse.get_or_init(|| {
            let mut index: ReverseIndex = HashMap::new();
            for (position, entity) in self.step.entities.iter().enumerate() {
                for (attribute, value) in entity.values.iter().enumerate() {
                    let mut targets = Vec::new();
                    collect_references(value, &mut targets);
                    targets.sort_unstable();
                    targets.dedup();
                    for target in targets {
                        index.entry(target).or_default().push((position, attribute));
                    }
                }
            }
            debug!(targets = index.len(), "built reverse reference index");
            index
        })
    }
}

fn collect_references(value: &StepValue, out: &mut Vec<u64>) {
    match value {
        StepValue::Reference(id) => out.push(*id),
        StepValue::List(items) => items.iter().for_each(|item| collect_references(item, out)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WALL_WITH_OPENING: &str = "ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCPROJECT('p',$,'Project',$,$,$,$,$,$);
#10=IFCWALL('w',$,'Wall-1',$,$,$,$,*,$);
#20=IFCRELVOIDSELEMENT('v',$,$,$,#10,#30);
#30=IFCOPENINGELEMENT('o',$,$,$,$,$,$,$,$);
#40=IFCRELAGGREGATES('a',$,$,$,#1,(#10,#30));
ENDSEC;
END-ISO-10303-21;
";

    fn model() -> IfcModel {
        IfcModel::open(WALL_WITH_OPENING.as_bytes(), OpenOptions::default()).unwrap()
    }

    #[test]
    fn type_codes_follow_first_appearance() {
        let model = model();
        assert_eq!(model.type_name(model.line_type(1).unwrap()), Some("IfcProject"));
        assert_eq!(model.type_name(model.line_type(10).unwrap()), Some("IfcWall"));
        assert_eq!(model.line_type(99), None);
        assert_eq!(model.all_entity_ids().collect::<Vec<_>>(), vec![1, 10, 20, 30, 40]);
    }

    #[test]
    fn forward_record_names_attributes() {
        let record = model().entity_record(10, false).unwrap();
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys[..4].to_vec(), vec!["GlobalId", "OwnerHistory", "Name", "Description"]);
        assert_eq!(record.get("Tag"), Some(&RawValue::Handle(0)));
        assert!(record.get("HasOpenings").is_none());
    }

    #[test]
    fn inverse_record_appends_back_references() {
        let record = model().entity_record(10, true).unwrap();
        assert_eq!(
            record.get("HasOpenings"),
            Some(&RawValue::List(vec![RawValue::Tagged {
                tag: ValueTag::Ref,
                value: Scalar::Integer(20),
            }]))
        );
        assert_eq!(
            record.get("Decomposes").and_then(|v| match v {
                RawValue::List(items) => items.first().and_then(RawValue::reference_id),
                _ => None,
            }),
            Some(40)
        );
        assert_eq!(record.get("IsDecomposedBy"), Some(&RawValue::List(Vec::new())));
    }

    #[test]
    fn single_valued_inverse_is_a_handle() {
        let record = model().entity_record(30, true).unwrap();
        assert_eq!(record.get("VoidsElements"), Some(&RawValue::Handle(20)));
        assert_eq!(record.get("HasFillings"), Some(&RawValue::List(Vec::new())));
    }

    #[test]
    fn entities_outside_the_attribute_table_keep_their_ifc_name() {
        let content = WALL_WITH_OPENING.replace(
            "#30=IFCOPENINGELEMENT",
            "#50=IFCFLOWTERMINAL('f',$,$,$,$,$,$,$);\n#30=IFCOPENINGELEMENT",
        );
        let model = IfcModel::open(content.as_bytes(), OpenOptions::default()).unwrap();
        assert_eq!(model.type_name(model.line_type(50).unwrap()), Some("IfcFlowTerminal"));

        let record = model.entity_record(50, true).unwrap();
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys.first(), Some(&"Attribute1"));
        assert_eq!(keys.len(), 8);
    }

    #[test]
    fn other_schemas_get_positional_names() {
        let content = WALL_WITH_OPENING.replace("'IFC4'", "'IFC2X3'");
        let model = IfcModel::open(content.as_bytes(), OpenOptions::default()).unwrap();
        assert_eq!(model.schema(), "IFC2X3");
        assert_eq!(model.type_name(model.line_type(10).unwrap()), Some("IfcWall"));

        let record = model.entity_record(10, true).unwrap();
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys.len(), 9);
        assert_eq!(keys[8], "Attribute9");
        assert!(record.get("PredefinedType").is_none());
        assert!(record.get("HasOpenings").is_none());
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let err = IfcModel::open(&[0xff, 0xfe, 0x00], OpenOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidUtf8 { .. }));
    }
}
