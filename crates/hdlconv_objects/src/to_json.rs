//! The convert-to-map capability shared by every HDL object.
//!
//! Objects render themselves into an ordered [`JsonMap`]; text encoding is
//! left to `serde_json`. The map keeps insertion order, so key order in the
//! produced JSON matches the order in which an object inserts its fields.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::JsonError;

/// An ordered map from string keys to JSON values.
pub type JsonMap = serde_json::Map<String, Value>;

/// Converts an object into its generic ordered-map form.
pub trait ToJson {
    /// Builds a fresh map describing the current state of `self`.
    fn to_json(&self) -> Result<JsonMap, JsonError>;
}

/// Reads an object back from the map form produced by [`ToJson`].
pub trait FromJson: Sized {
    /// Reconstructs an object from `map`.
    fn from_json(map: &JsonMap) -> Result<Self, JsonError>;
}

/// A raw map is its own JSON form.
impl ToJson for JsonMap {
    fn to_json(&self) -> Result<JsonMap, JsonError> {
        Ok(self.clone())
    }
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json(&self) -> Result<JsonMap, JsonError> {
        (**self).to_json()
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn to_json(&self) -> Result<JsonMap, JsonError> {
        (**self).to_json()
    }
}

/// Encodes `map` as JSON text indented by `indent` spaces per level, or on a
/// single line when `indent` is `None`.
pub fn encode_json(map: &JsonMap, indent: Option<usize>) -> Result<String, JsonError> {
    let Some(width) = indent else {
        return Ok(serde_json::to_string(map)?);
    };
    let pad = " ".repeat(width);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(pad.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    map.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

pub(crate) fn field<'a>(map: &'a JsonMap, key: &'static str) -> Result<&'a Value, JsonError> {
    map.get(key).ok_or(JsonError::MissingField(key))
}

pub(crate) fn str_field<'a>(map: &'a JsonMap, key: &'static str) -> Result<&'a str, JsonError> {
    field(map, key)?
        .as_str()
        .ok_or(JsonError::UnexpectedType {
            field: key,
            expected: "a string",
        })
}

pub(crate) fn object_field<'a>(
    map: &'a JsonMap,
    key: &'static str,
) -> Result<&'a JsonMap, JsonError> {
    as_object(field(map, key)?, key)
}

pub(crate) fn array_field<'a>(
    map: &'a JsonMap,
    key: &'static str,
) -> Result<&'a Vec<Value>, JsonError> {
    field(map, key)?
        .as_array()
        .ok_or(JsonError::UnexpectedType {
            field: key,
            expected: "an array",
        })
}

pub(crate) fn as_object<'a>(value: &'a Value, key: &'static str) -> Result<&'a JsonMap, JsonError> {
    value.as_object().ok_or(JsonError::UnexpectedType {
        field: key,
        expected: "an object",
    })
}

/// Converts each item and collects the maps into a JSON array.
pub(crate) fn to_json_array<'a, T, I>(items: I) -> Result<Value, JsonError>
where
    T: ToJson + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let values = items
        .into_iter()
        .map(|item| item.to_json().map(Value::Object))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Array(values))
}

/// Renders items as an object keyed by each item's name, in order.
pub(crate) fn to_json_keyed<'a, T, I>(items: I, name: impl Fn(&T) -> &str) -> Result<Value, JsonError>
where
    T: ToJson + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut m = JsonMap::new();
    for item in items {
        m.insert(name(item).to_string(), Value::Object(item.to_json()?));
    }
    Ok(Value::Object(m))
}

/// Reads the object under `key` whose entries are keyed by name.
///
/// An entry whose key differs from the name it declares is rejected.
pub(crate) fn from_json_keyed<T: FromJson>(
    map: &JsonMap,
    key: &'static str,
    name: impl Fn(&T) -> &str,
) -> Result<Vec<T>, JsonError> {
    let mut items = Vec::new();
    for (entry_key, value) in object_field(map, key)? {
        let item = T::from_json(as_object(value, key)?)?;
        if name(&item) != entry_key.as_str() {
            return Err(JsonError::NameMismatch {
                key: entry_key.clone(),
                name: name(&item).to_string(),
            });
        }
        items.push(item);
    }
    Ok(items)
}

/// Collects the entries of `map` whose keys are not in `known`, in order.
pub(crate) fn other_fields(map: &JsonMap, known: &[&str]) -> JsonMap {
    map.iter()
        .filter(|(k, _)| !known.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Reads every element of the array under `key` as an object of type `T`.
pub(crate) fn from_json_array<T: FromJson>(
    map: &JsonMap,
    key: &'static str,
) -> Result<Vec<T>, JsonError> {
    array_field(map, key)?
        .iter()
        .map(|value| T::from_json(as_object(value, key)?))
        .collect()
}
