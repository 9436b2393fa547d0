//! Architecture bodies and the component instances they contain.

use serde_json::Value;

use crate::error::JsonError;
use crate::language::Language;
use crate::to_json::{
    field, from_json_array, other_fields, str_field, to_json_array, FromJson, JsonMap, ToJson,
};

/// One instantiated component inside an architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInstance {
    /// Instance label.
    pub name: String,
    /// Reference to the instantiated entity, as emitted by the converter
    /// (a name or a list of name parts).
    pub entity_name: Value,
    /// Remaining keys of the source object, such as port maps.
    pub extra: JsonMap,
}

impl ComponentInstance {
    /// Canonicalizes the label and the entity reference.
    pub fn normalize_ids(&mut self, lang: Language) {
        self.name = lang.normalize_id(&self.name);
        lang.normalize_reference(&mut self.entity_name);
    }
}

impl ToJson for ComponentInstance {
    fn to_json(&self) -> Result<JsonMap, JsonError> {
        let mut m = JsonMap::new();
        m.insert("name".into(), Value::from(self.name.as_str()));
        m.insert("entityName".into(), self.entity_name.clone());
        m.extend(self.extra.clone());
        Ok(m)
    }
}

impl FromJson for ComponentInstance {
    fn from_json(map: &JsonMap) -> Result<Self, JsonError> {
        Ok(Self {
            name: str_field(map, "name")?.to_string(),
            entity_name: field(map, "entityName")?.clone(),
            extra: other_fields(map, &["name", "entityName"]),
        })
    }
}

/// An architecture body of an entity.
///
/// Keys the model does not interpret are kept in `extra` and written back
/// after the known ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Architecture {
    /// Architecture name, e.g. `rtl`.
    pub name: String,
    /// Name of the entity this body implements.
    pub entity_name: String,
    /// Component instances in declaration order.
    pub component_instances: Vec<ComponentInstance>,
    /// Remaining keys of the source object.
    pub extra: JsonMap,
}

const KNOWN: [&str; 3] = ["name", "entityName", "componentInstances"];

impl Architecture {
    /// Creates an empty architecture of `entity_name`.
    pub fn new(name: impl Into<String>, entity_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity_name: entity_name.into(),
            ..Self::default()
        }
    }

    /// Canonicalizes the architecture, entity and instance names.
    pub fn normalize_ids(&mut self, lang: Language) {
        self.name = lang.normalize_id(&self.name);
        self.entity_name = lang.normalize_id(&self.entity_name);
        for ci in &mut self.component_instances {
            ci.normalize_ids(lang);
        }
    }
}

/// Renders `{"name", "entityName", "componentInstances", ...extra}`.
impl ToJson for Architecture {
    fn to_json(&self) -> Result<JsonMap, JsonError> {
        let mut m = JsonMap::new();
        m.insert("name".into(), Value::from(self.name.as_str()));
        m.insert("entityName".into(), Value::from(self.entity_name.as_str()));
        m.insert(
            "componentInstances".into(),
            to_json_array(&self.component_instances)?,
        );
        m.extend(self.extra.clone());
        Ok(m)
    }
}

impl FromJson for Architecture {
    fn from_json(map: &JsonMap) -> Result<Self, JsonError> {
        Ok(Self {
            name: str_field(map, "name")?.to_string(),
            entity_name: str_field(map, "entityName")?.to_string(),
            component_instances: from_json_array(map, "componentInstances")?,
            extra: other_fields(map, &KNOWN),
        })
    }
}
