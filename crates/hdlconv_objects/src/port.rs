//! Port declarations of an entity.

use serde_json::Value;

use crate::direction::Direction;
use crate::error::JsonError;
use crate::to_json::{object_field, str_field, FromJson, JsonMap, ToJson};
use crate::variable::Variable;

/// One port of an entity: a direction and the signal it carries.
///
/// Both fields are public and may be left unset while a front end fills the
/// record in. Conversion to JSON requires both to be present. The signal
/// descriptor is any [`ToJson`] type and defaults to [`Variable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port<V = Variable> {
    /// Signal-flow mode.
    pub direction: Option<Direction>,
    /// The declared signal.
    pub variable: Option<V>,
}

impl<V> Default for Port<V> {
    fn default() -> Self {
        Self {
            direction: None,
            variable: None,
        }
    }
}

impl<V> Port<V> {
    /// Creates a port with both fields set.
    pub fn new(direction: Direction, variable: V) -> Self {
        Self {
            direction: Some(direction),
            variable: Some(variable),
        }
    }
}

impl Port<Variable> {
    /// Returns the declared signal name, if the variable is set.
    pub fn name(&self) -> Option<&str> {
        self.variable.as_ref().map(|v| v.name.as_str())
    }
}

/// Renders `{"direction": "OUT", "variable": {...}}`.
///
/// Fails with [`JsonError::MissingField`] when either field is unset. Errors
/// from the variable's own conversion are returned unchanged.
impl<V: ToJson> ToJson for Port<V> {
    fn to_json(&self) -> Result<JsonMap, JsonError> {
        let direction = self.direction.ok_or(JsonError::MissingField("direction"))?;
        let variable = self
            .variable
            .as_ref()
            .ok_or(JsonError::MissingField("variable"))?;

        let mut m = JsonMap::new();
        m.insert("direction".into(), Value::from(direction.as_str()));
        m.insert("variable".into(), Value::Object(variable.to_json()?));
        Ok(m)
    }
}

impl<V: FromJson> FromJson for Port<V> {
    fn from_json(map: &JsonMap) -> Result<Self, JsonError> {
        let direction = str_field(map, "direction")?.parse()?;
        let variable = V::from_json(object_field(map, "variable")?)?;
        Ok(Self::new(direction, variable))
    }
}
