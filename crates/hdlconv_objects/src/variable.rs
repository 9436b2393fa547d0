//! Named, typed declarations: port signals, generics and function parameters.

use serde_json::Value;

use crate::error::JsonError;
use crate::expr::Expr;
use crate::language::Language;
use crate::to_json::{object_field, str_field, FromJson, JsonMap, ToJson};

/// A declared name with a type mark and an optional default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Declared identifier.
    pub name: String,
    /// Type mark, e.g. `std_logic` or `std_logic_vector(7 downto 0)`.
    pub ty: Expr,
    /// Default value expression, if one was given.
    pub value: Option<Expr>,
}

impl Variable {
    /// Creates a variable without a default value.
    pub fn new(name: impl Into<String>, ty: Expr) -> Self {
        Self {
            name: name.into(),
            ty,
            value: None,
        }
    }

    /// Sets the default value.
    pub fn with_value(mut self, value: Expr) -> Self {
        self.value = Some(value);
        self
    }

    /// Canonicalizes the declared name and every name referenced by the type
    /// mark and default value.
    pub fn normalize_ids(&mut self, lang: Language) {
        self.name = lang.normalize_id(&self.name);
        self.ty.normalize_ids(lang);
        if let Some(value) = &mut self.value {
            value.normalize_ids(lang);
        }
    }
}

/// Renders `{"name", "type", "value"}`; `value` is `null` when unset.
impl ToJson for Variable {
    fn to_json(&self) -> Result<JsonMap, JsonError> {
        let mut m = JsonMap::new();
        m.insert("name".into(), Value::from(self.name.as_str()));
        m.insert("type".into(), Value::Object(self.ty.to_json()?));
        let value = match &self.value {
            Some(v) => Value::Object(v.to_json()?),
            None => Value::Null,
        };
        m.insert("value".into(), value);
        Ok(m)
    }
}

impl FromJson for Variable {
    fn from_json(map: &JsonMap) -> Result<Self, JsonError> {
        let name = str_field(map, "name")?.to_string();
        let ty = Expr::from_json(object_field(map, "type")?)?;
        let value = match map.get("value") {
            None | Some(Value::Null) => None,
            Some(_) => Some(Expr::from_json(object_field(map, "value")?)?),
        };
        Ok(Self { name, ty, value })
    }
}
