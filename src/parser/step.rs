use std::collections::HashMap;

use crate::error::ParseError;

/// One decoded STEP parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum StepValue {
    String(String),
    Real(f64),
    Integer(i64),
    Boolean(bool),
    Enum(String),
    Reference(u64),
    List(Vec<StepValue>),
    /// A defined-type wrapper such as `IFCLABEL('x')`.
    Typed {
        type_name: String,
        value: Box<StepValue>,
    },
    /// `$`
    Null,
    /// `*`
    Derived,
}

#[derive(Debug, Clone)]
pub struct StepEntity {
    pub id: u64,
    pub entity_type: String,
    pub values: Vec<StepValue>,
}

/// A decoded STEP exchange file. Entities keep file order.
#[derive(Debug, Default)]
pub struct StepFile {
    pub entities: Vec<StepEntity>,
    pub schema: String,
    index: HashMap<u64, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Outside,
    Header,
    Data,
}

impl StepFile {
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut file = StepFile::default();
        let mut section = Section::Outside;
        let mut seen_magic = false;
        let mut seen_data = false;

        for statement in split_statements(content)? {
            match statement.as_str() {
                "ISO-10303-21" => {
                    seen_magic = true;
                    continue;
                }
                "HEADER" => {
                    section = Section::Header;
                    continue;
                }
                "DATA" => {
                    section = Section::Data;
                    seen_data = true;
                    continue;
                }
                "ENDSEC" => {
                    section = Section::Outside;
                    continue;
                }
                "END-ISO-10303-21" => break,
                _ => {}
            }

            match section {
                Section::Header => {
                    if statement.starts_with("FILE_SCHEMA") {
                        file.schema = parse_schema_name(&statement).unwrap_or_default();
                    }
                }
                Section::Data => {
                    let entity = Self::parse_entity(&statement).ok_or_else(|| {
                        ParseError::InvalidStep {
                            message: format!("malformed entity instance '{}'", preview(&statement)),
                        }
                    })?;
                    file.insert(entity)?;
                }
                Section::Outside => {
                    return Err(ParseError::InvalidStep {
                        message: format!("statement outside of any section '{}'", preview(&statement)),
                    });
                }
            }
        }

        if !seen_magic {
            return Err(ParseError::InvalidStep {
                message: "missing ISO-10303-21 header".to_string(),
            });
        }
        if !seen_data {
            return Err(ParseError::InvalidStep {
                message: "missing DATA section".to_string(),
            });
        }

        Ok(file)
    }

    fn insert(&mut self, entity: StepEntity) -> Result<(), ParseError> {
        if self.index.contains_key(&entity.id) {
            return Err(ParseError::InvalidStep {
                message: format!("duplicate entity instance #{}", entity.id),
            });
        }
        self.index.insert(entity.id, self.entities.len());
        self.entities.push(entity);
        Ok(())
    }

    fn parse_entity(statement: &str) -> Option<StepEntity> {
        // Format: #123=IFCWALL('guid',#ref,'name',...)
        let rest = statement.strip_prefix('#')?;
        let eq_pos = rest.find('=')?;
        let id: u64 = rest[..eq_pos].trim().parse().ok()?;

        let rest = rest[eq_pos + 1..].trim();
        let paren_pos = rest.find('(')?;
        let entity_type = rest[..paren_pos].trim().to_ascii_uppercase();
        if entity_type.is_empty() || !rest.ends_with(')') {
            return None;
        }

        let values = parse_values(&rest[paren_pos + 1..rest.len() - 1]);

        Some(StepEntity {
            id,
            entity_type,
            values,
        })
    }

    /// Position of an entity in file order.
    #[must_use]
    pub fn position(&self, id: u64) -> Option<usize> {
        self.index.get(&id).copied()
    }

    #[must_use]
    pub fn get_entity(&self, id: u64) -> Option<&StepEntity> {
        self.index.get(&id).map(|&i| &self.entities[i])
    }

    pub(crate) fn get_entity_mut(&mut self, id: u64) -> Option<&mut StepEntity> {
        self.index.get(&id).map(|&i| &mut self.entities[i])
    }

    #[must_use]
    pub fn get_entities_by_type(&self, entity_type: &str) -> Vec<&StepEntity> {
        self.entities
            .iter()
            .filter(|e| e.entity_type == entity_type)
            .collect()
    }
}

/// Splits the exchange structure into `;`-terminated statements,
/// skipping comments and respecting quoted strings.
fn split_statements(content: &str) -> Result<Vec<String>, ParseError> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_string {
            current.push(ch);
            if ch == '\'' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '\'' => {
                in_string = true;
                current.push(ch);
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                let mut closed = false;
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        closed = true;
                        break;
                    }
                    prev = c;
                }
                if !closed {
                    return Err(ParseError::InvalidStep {
                        message: "unterminated comment".to_string(),
                    });
                }
            }
            ';' => {
                let statement = current.trim();
                if !statement.is_empty() {
                    statements.push(statement.to_string());
                }
                current.clear();
            }
            '\r' | '\n' | '\t' => current.push(' '),
            _ => current.push(ch),
        }
    }

    if in_string {
        return Err(ParseError::InvalidStep {
            message: "unterminated string literal".to_string(),
        });
    }
    if !current.trim().is_empty() {
        return Err(ParseError::InvalidStep {
            message: format!("unterminated statement '{}'", preview(current.trim())),
        });
    }

    Ok(statements)
}

fn parse_schema_name(statement: &str) -> Option<String> {
    let start = statement.find('\'')?;
    let end = statement[start + 1..].find('\'')?;
    Some(statement[start + 1..start + 1 + end].to_string())
}

fn parse_values(s: &str) -> Vec<StepValue> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut paren_depth = 0usize;

    for ch in s.chars() {
        match ch {
            '\'' => {
                in_string = !in_string;
                current.push(ch);
            }
            '(' if !in_string => {
                paren_depth += 1;
                current.push(ch);
            }
            ')' if !in_string => {
                paren_depth = paren_depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if !in_string && paren_depth == 0 => {
                values.push(parse_single_value(current.trim()));
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if !current.trim().is_empty() || !values.is_empty() {
        values.push(parse_single_value(current.trim()));
    }

    values
}

fn parse_single_value(s: &str) -> StepValue {
    if s == "$" || s.is_empty() {
        return StepValue::Null;
    }
    if s == "*" {
        return StepValue::Derived;
    }
    if let Some(id) = s.strip_prefix('#').and_then(|r| r.trim().parse::<u64>().ok()) {
        return StepValue::Reference(id);
    }
    if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
        return StepValue::String(decode_step_string(&s[1..s.len() - 1]));
    }
    if s.len() >= 2 && s.starts_with('.') && s.ends_with('.') {
        return match &s[1..s.len() - 1] {
            "T" => StepValue::Boolean(true),
            "F" => StepValue::Boolean(false),
            inner => StepValue::Enum(inner.to_string()),
        };
    }
    if s.starts_with('(') && s.ends_with(')') {
        return StepValue::List(parse_values(&s[1..s.len() - 1]));
    }
    if let Ok(i) = s.parse::<i64>() {
        return StepValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return StepValue::Real(f);
    }
    // Typed value like IFCBOOLEAN(.T.)
    if let Some(paren_pos) = s.find('(') {
        if s.ends_with(')') {
            let inner = parse_values(&s[paren_pos + 1..s.len() - 1]);
            let value = match inner.len() {
                0 => StepValue::Null,
                1 => inner.into_iter().next().unwrap_or(StepValue::Null),
                _ => StepValue::List(inner),
            };
            return StepValue::Typed {
                type_name: s[..paren_pos].trim().to_ascii_uppercase(),
                value: Box::new(value),
            };
        }
    }

    StepValue::String(s.to_string())
}

fn preview(statement: &str) -> String {
    statement.chars().take(60).collect()
}

/// Decode STEP/IFC encoded strings.
///
/// Handles `\X2\XXXX\X0\` (UCS-2, several code units per run), `\X\hh`
/// (ISO 8859-1), `\S\c` (high-bit shift), `\\` and the doubled apostrophe.
fn decode_step_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find(&['\\', '\''][..]) {
        result.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("''") {
            result.push('\'');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("\\X2\\") {
            let end = after.find("\\X0\\").unwrap_or(after.len());
            decode_ucs2(&after[..end], &mut result);
            rest = after.get(end + 4..).unwrap_or("");
        } else if let Some((code, after)) = tail.strip_prefix("\\X\\").and_then(latin1_escape) {
            result.push(char::from(code));
            rest = after;
        } else if let Some(after) = tail.strip_prefix("\\S\\") {
            let mut chars = after.chars();
            if let Some(c) = chars.next() {
                if let Some(shifted) = char::from_u32(u32::from(c) + 128) {
                    result.push(shifted);
                }
            }
            rest = chars.as_str();
        } else if let Some(after) = tail.strip_prefix("\\\\") {
            result.push('\\');
            rest = after;
        } else {
            result.push_str(&tail[..1]);
            rest = &tail[1..];
        }
    }

    result.push_str(rest);
    result
}

/// Two hex digits after `\X\`, and the text following them.
fn latin1_escape(after: &str) -> Option<(u8, &str)> {
    let hex = after.get(..2)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let code = u8::from_str_radix(hex, 16).ok()?;
    Some((code, &after[2..]))
}

fn decode_ucs2(hex: &str, out: &mut String) {
    for chunk in hex.as_bytes().chunks(4) {
        let code = std::str::from_utf8(chunk)
            .ok()
            .filter(|c| c.len() == 4)
            .and_then(|c| u32::from_str_radix(c, 16).ok())
            .and_then(char::from_u32);
        if let Some(c) = code {
            out.push(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = "ISO-10303-21;
HEADER;
FILE_DESCRIPTION(('ViewDefinition [CoordinationView]'),'2;1');
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCPROJECT('0xScRe4drECQ4DMSqUjd6d',$,'Demo; project',$,$,$,$,$,$);
#2=IFCCARTESIANPOINT((0.,1.5,-2.E-1));
#3=IFCPROPERTYSINGLEVALUE('IsExternal',$,IFCBOOLEAN(.T.),$);
#4= IFCWALL('2O2Fr$t4X7Zf8NOew3FLOH',$,'Wall',
  $,$,#5,*,'It''s',.NOTDEFINED.);
ENDSEC;
END-ISO-10303-21;
";

    #[test]
    fn parses_entities_in_file_order() {
        let file = StepFile::parse(MINIMAL).unwrap();
        assert_eq!(file.schema, "IFC4");
        let ids: Vec<u64> = file.entities.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(
            file.get_entity(1).unwrap().values[2],
            StepValue::String("Demo; project".to_string())
        );
    }

    #[test]
    fn statements_may_span_lines() {
        let file = StepFile::parse(MINIMAL).unwrap();
        let wall = file.get_entity(4).unwrap();
        assert_eq!(wall.entity_type, "IFCWALL");
        assert_eq!(wall.values.len(), 9);
        assert_eq!(wall.values[5], StepValue::Reference(5));
        assert_eq!(wall.values[6], StepValue::Derived);
        assert_eq!(wall.values[7], StepValue::String("It's".to_string()));
        assert_eq!(wall.values[8], StepValue::Enum("NOTDEFINED".to_string()));
    }

    #[test]
    fn decodes_reals_and_typed_values() {
        let file = StepFile::parse(MINIMAL).unwrap();
        assert_eq!(
            file.get_entity(2).unwrap().values[0],
            StepValue::List(vec![
                StepValue::Real(0.0),
                StepValue::Real(1.5),
                StepValue::Real(-0.2),
            ])
        );
        assert_eq!(
            file.get_entity(3).unwrap().values[2],
            StepValue::Typed {
                type_name: "IFCBOOLEAN".to_string(),
                value: Box::new(StepValue::Boolean(true)),
            }
        );
    }

    #[test]
    fn empty_list_has_no_elements() {
        assert_eq!(parse_single_value("()"), StepValue::List(Vec::new()));
    }

    #[test]
    fn rejects_missing_header() {
        let err = StepFile::parse("DATA;\n#1=IFCPROJECT($);\nENDSEC;\n").unwrap_err();
        assert!(err.to_string().contains("ISO-10303-21"));
    }

    #[test]
    fn rejects_malformed_instance() {
        let content = "ISO-10303-21;\nDATA;\n#1 IFCPROJECT($);\nENDSEC;\nEND-ISO-10303-21;\n";
        assert!(matches!(
            StepFile::parse(content),
            Err(ParseError::InvalidStep { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let content =
            "ISO-10303-21;\nDATA;\n#1=IFCPROJECT($);\n#1=IFCWALL($);\nENDSEC;\nEND-ISO-10303-21;\n";
        let err = StepFile::parse(content).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn decodes_string_escapes() {
        assert_eq!(decode_step_string("Wall \\X2\\00C400D6\\X0\\"), "Wall ÄÖ");
        assert_eq!(decode_step_string("\\X\\E9t\\X\\E9"), "été");
        assert_eq!(decode_step_string("a\\\\b"), "a\\b");
        assert_eq!(decode_step_string("\\S\\D"), "Ä");
    }

    #[test]
    fn malformed_latin1_escape_keeps_the_text() {
        assert_eq!(decode_step_string("a\\X\\E"), "a\\X\\E");
        assert_eq!(decode_step_string("\\X\\é rest"), "\\X\\é rest");
        assert_eq!(decode_step_string("\\X\\zz wall"), "\\X\\zz wall");
    }
}
