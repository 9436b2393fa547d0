//! Package declarations and package bodies.
//!
//! Subprogram declarations are carried as their JSON maps; only the package
//! name and component declarations are interpreted.

use std::collections::HashSet;

use serde_json::Value;

use crate::entity::Entity;
use crate::error::JsonError;
use crate::language::Language;
use crate::to_json::{
    array_field, as_object, from_json_keyed, other_fields, str_field, to_json_keyed, FromJson,
    JsonMap, ToJson,
};

/// A package declaration with its component declarations and subprograms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageHeader {
    /// Package name.
    pub name: String,
    /// Component declarations, keyed by name in JSON.
    pub components: Vec<Entity>,
    /// Function declarations as emitted by the converter.
    pub functions: Vec<JsonMap>,
    /// Remaining keys of the source object.
    pub extra: JsonMap,
}

/// A package body with its subprogram bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageBody {
    /// Package name.
    pub name: String,
    /// Function bodies as emitted by the converter.
    pub functions: Vec<JsonMap>,
    /// Remaining keys of the source object.
    pub extra: JsonMap,
}

impl PackageHeader {
    /// Creates an empty package declaration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Canonicalizes the package name and every component declaration.
    ///
    /// Fails with [`JsonError::Redefinition`] if two components collapse to the
    /// same name; the package is left unchanged in that case.
    pub fn normalize_ids(&mut self, lang: Language) -> Result<(), JsonError> {
        let mut normalized = self.clone();
        normalized.name = lang.normalize_id(&normalized.name);
        let mut seen = HashSet::new();
        for c in &mut normalized.components {
            c.normalize_ids(lang)?;
            if !seen.insert(c.name.clone()) {
                return Err(JsonError::Redefinition(c.name.clone()));
            }
        }
        *self = normalized;
        Ok(())
    }
}

impl PackageBody {
    /// Creates an empty package body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

fn functions_to_json(functions: &[JsonMap]) -> Value {
    Value::Array(functions.iter().cloned().map(Value::Object).collect())
}

fn functions_from_json(map: &JsonMap) -> Result<Vec<JsonMap>, JsonError> {
    array_field(map, "functions")?
        .iter()
        .map(|f| as_object(f, "functions").cloned())
        .collect()
}

/// Renders `{"name", "components", "functions", ...extra}`.
impl ToJson for PackageHeader {
    fn to_json(&self) -> Result<JsonMap, JsonError> {
        let mut m = JsonMap::new();
        m.insert("name".into(), Value::from(self.name.as_str()));
        m.insert(
            "components".into(),
            to_json_keyed(&self.components, |c: &Entity| c.name.as_str())?,
        );
        m.insert("functions".into(), functions_to_json(&self.functions));
        m.extend(self.extra.clone());
        Ok(m)
    }
}

impl FromJson for PackageHeader {
    fn from_json(map: &JsonMap) -> Result<Self, JsonError> {
        Ok(Self {
            name: str_field(map, "name")?.to_string(),
            components: from_json_keyed(map, "components", |c: &Entity| c.name.as_str())?,
            functions: functions_from_json(map)?,
            extra: other_fields(map, &["name", "components", "functions"]),
        })
    }
}

/// Renders `{"name", "functions", ...extra}`.
impl ToJson for PackageBody {
    fn to_json(&self) -> Result<JsonMap, JsonError> {
        let mut m = JsonMap::new();
        m.insert("name".into(), Value::from(self.name.as_str()));
        m.insert("functions".into(), functions_to_json(&self.functions));
        m.extend(self.extra.clone());
        Ok(m)
    }
}

impl FromJson for PackageBody {
    fn from_json(map: &JsonMap) -> Result<Self, JsonError> {
        Ok(Self {
            name: str_field(map, "name")?.to_string(),
            functions: functions_from_json(map)?,
            extra: other_fields(map, &["name", "functions"]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> JsonMap {
        match value {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    fn header() -> JsonMap {
        map(json!({
            "name": "Util_Pkg",
            "components": {
                "Fifo": {"name": "Fifo", "generics": [], "ports": []}
            },
            "functions": [
                {"name": "clog2", "isOperator": false, "params": [], "locals": [], "body": []}
            ]
        }))
    }

    #[test]
    fn header_round_trips() {
        let source = header();
        let ph = PackageHeader::from_json(&source).unwrap();
        assert_eq!(ph.components.len(), 1);
        assert_eq!(ph.functions[0]["name"], json!("clog2"));
        assert_eq!(ph.to_json().unwrap(), source);
    }

    #[test]
    fn component_key_must_match_name() {
        let m = map(json!({
            "name": "p",
            "components": {"A": {"name": "B", "generics": [], "ports": []}},
            "functions": []
        }));
        let err = PackageHeader::from_json(&m).unwrap_err();
        assert!(matches!(err, JsonError::NameMismatch { ref key, ref name } if key == "A" && name == "B"));
    }

    #[test]
    fn normalize_header_components() {
        let mut ph = PackageHeader::from_json(&header()).unwrap();
        ph.normalize_ids(Language::Vhdl).unwrap();
        assert_eq!(ph.name, "util_pkg");
        assert_eq!(ph.components[0].name, "fifo");
    }

    #[test]
    fn colliding_components_rejected() {
        let mut ph = PackageHeader::new("p");
        ph.components.push(Entity::new("Fifo"));
        ph.components.push(Entity::new("FIFO"));
        let err = ph.normalize_ids(Language::Vhdl).unwrap_err();
        assert!(matches!(err, JsonError::Redefinition(ref n) if n == "fifo"));
        assert_eq!(ph.name, "p");
        assert_eq!(ph.components[1].name, "FIFO");
    }

    #[test]
    fn body_keeps_extra_keys() {
        let source = map(json!({"name": "p", "functions": [], "constants": [1]}));
        let pb = PackageBody::from_json(&source).unwrap();
        assert_eq!(pb.extra["constants"], json!([1]));
        assert_eq!(pb.to_json().unwrap(), source);
    }

    #[test]
    fn non_object_function_fails() {
        let m = map(json!({"name": "p", "functions": [3]}));
        let err = PackageBody::from_json(&m).unwrap_err();
        assert!(matches!(err, JsonError::UnexpectedType { field: "functions", .. }));
    }
}
