//! A design document: every unit converted from one source file.

use serde_json::Value;

use crate::architecture::Architecture;
use crate::entity::Entity;
use crate::error::JsonError;
use crate::language::Language;
use crate::package::{PackageBody, PackageHeader};
use crate::to_json::{
    array_field, as_object, encode_json, from_json_array, from_json_keyed, other_fields,
    to_json_array, to_json_keyed, FromJson, JsonMap, ToJson,
};

const KNOWN: [&str; 5] = [
    "imports",
    "packageHeaders",
    "entities",
    "packages",
    "architectures",
];

/// The units of one converted source file, each kind kept in insertion order.
///
/// Entities, package headers and package bodies are keyed by name in JSON.
/// Their names are unique per kind: inserting a second unit with an existing
/// name is an error rather than an overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Design {
    /// Library and use clauses, as emitted by the converter.
    pub imports: Vec<Value>,
    package_headers: Vec<PackageHeader>,
    entities: Vec<Entity>,
    packages: Vec<PackageBody>,
    /// Architecture bodies in source order.
    pub architectures: Vec<Architecture>,
    /// Top-level keys the model does not interpret.
    pub extra: JsonMap,
}

impl Design {
    /// Creates an empty design.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity, rejecting duplicate names.
    pub fn insert(&mut self, entity: Entity) -> Result<(), JsonError> {
        if self.entity(&entity.name).is_some() {
            return Err(JsonError::Redefinition(entity.name));
        }
        self.entities.push(entity);
        Ok(())
    }

    /// Adds a package declaration, rejecting duplicate names.
    pub fn insert_package_header(&mut self, header: PackageHeader) -> Result<(), JsonError> {
        if self.package_header(&header.name).is_some() {
            return Err(JsonError::Redefinition(header.name));
        }
        self.package_headers.push(header);
        Ok(())
    }

    /// Adds a package body, rejecting duplicate names.
    pub fn insert_package(&mut self, body: PackageBody) -> Result<(), JsonError> {
        if self.package(&body.name).is_some() {
            return Err(JsonError::Redefinition(body.name));
        }
        self.packages.push(body);
        Ok(())
    }

    /// Looks up an entity by name.
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// All entities in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Looks up a package declaration by name.
    pub fn package_header(&self, name: &str) -> Option<&PackageHeader> {
        self.package_headers.iter().find(|p| p.name == name)
    }

    /// All package declarations in insertion order.
    pub fn package_headers(&self) -> &[PackageHeader] {
        &self.package_headers
    }

    /// Looks up a package body by name.
    pub fn package(&self, name: &str) -> Option<&PackageBody> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// All package bodies in insertion order.
    pub fn packages(&self) -> &[PackageBody] {
        &self.packages
    }

    /// Total number of ports across all entities.
    pub fn port_count(&self) -> usize {
        self.entities.iter().map(|e| e.ports.len()).sum()
    }

    /// Sorts the generics and ports of every entity and component declaration
    /// by name.
    pub fn sort_interfaces(&mut self) {
        for e in &mut self.entities {
            e.sort_interface();
        }
        for c in self
            .package_headers
            .iter_mut()
            .flat_map(|p| p.components.iter_mut())
        {
            c.sort_interface();
        }
    }

    /// Canonicalizes every identifier for `lang`.
    ///
    /// Fails with [`JsonError::Redefinition`] if two units of the same kind,
    /// or two ports or generics of one entity, collapse to the same canonical
    /// name; the design is left unchanged in that case.
    pub fn normalize_ids(&mut self, lang: Language) -> Result<(), JsonError> {
        let mut normalized = Design {
            imports: self.imports.clone(),
            architectures: self.architectures.clone(),
            extra: self.extra.clone(),
            ..Design::new()
        };
        for import in &mut normalized.imports {
            lang.normalize_reference(import);
        }
        for mut ph in self.package_headers.iter().cloned() {
            ph.normalize_ids(lang)?;
            normalized.insert_package_header(ph)?;
        }
        for mut e in self.entities.iter().cloned() {
            e.normalize_ids(lang)?;
            normalized.insert(e)?;
        }
        for mut pb in self.packages.iter().cloned() {
            pb.name = lang.normalize_id(&pb.name);
            normalized.insert_package(pb)?;
        }
        for a in &mut normalized.architectures {
            a.normalize_ids(lang);
        }
        *self = normalized;
        Ok(())
    }

    /// Encodes the design as JSON text, pretty-printed with two-space indents
    /// when `pretty` is set.
    pub fn to_json_string(&self, pretty: bool) -> Result<String, JsonError> {
        self.to_json_string_indented(pretty.then_some(2))
    }

    /// Encodes the design as JSON text indented by `indent` spaces per level,
    /// or on a single line when `indent` is `None`.
    pub fn to_json_string_indented(&self, indent: Option<usize>) -> Result<String, JsonError> {
        encode_json(&self.to_json()?, indent)
    }

    /// Decodes a design from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, JsonError> {
        let value: Value = serde_json::from_str(text)?;
        Design::from_json(as_object(&value, "design")?)
    }
}

/// Renders `{"imports", "packageHeaders", "entities", "packages",
/// "architectures", ...extra}`. Every section is written, empty or not.
impl ToJson for Design {
    fn to_json(&self) -> Result<JsonMap, JsonError> {
        let mut m = JsonMap::new();
        m.insert("imports".into(), Value::Array(self.imports.clone()));
        m.insert(
            "packageHeaders".into(),
            to_json_keyed(&self.package_headers, |p: &PackageHeader| p.name.as_str())?,
        );
        m.insert(
            "entities".into(),
            to_json_keyed(&self.entities, |e: &Entity| e.name.as_str())?,
        );
        m.insert(
            "packages".into(),
            to_json_keyed(&self.packages, |p: &PackageBody| p.name.as_str())?,
        );
        m.insert("architectures".into(), to_json_array(&self.architectures)?);
        m.extend(self.extra.clone());
        Ok(m)
    }
}

/// Only `entities` is required; the other sections default to empty.
impl FromJson for Design {
    fn from_json(map: &JsonMap) -> Result<Self, JsonError> {
        let mut design = Design::new();
        if map.contains_key("imports") {
            design.imports = array_field(map, "imports")?.clone();
        }
        if map.contains_key("packageHeaders") {
            for ph in from_json_keyed(map, "packageHeaders", |p: &PackageHeader| p.name.as_str())? {
                design.insert_package_header(ph)?;
            }
        }
        for e in from_json_keyed(map, "entities", |e: &Entity| e.name.as_str())? {
            design.insert(e)?;
        }
        if map.contains_key("packages") {
            for pb in from_json_keyed(map, "packages", |p: &PackageBody| p.name.as_str())? {
                design.insert_package(pb)?;
            }
        }
        if map.contains_key("architectures") {
            design.architectures = from_json_array(map, "architectures")?;
        }
        design.extra = other_fields(map, &KNOWN);
        Ok(design)
    }
}
