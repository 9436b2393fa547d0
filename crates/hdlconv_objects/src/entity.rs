//! Entity declarations: a name plus generic and port interface lists.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::JsonError;
use crate::language::Language;
use crate::port::Port;
use crate::to_json::{from_json_array, str_field, to_json_array, FromJson, JsonMap, ToJson};
use crate::variable::Variable;

/// A hardware entity and its interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entity {
    /// Entity name.
    pub name: String,
    /// Generic (parameter) declarations.
    pub generics: Vec<Variable>,
    /// Port declarations.
    pub ports: Vec<Port>,
}

impl Entity {
    /// Creates an entity with an empty interface.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Finds a port by its signal name.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name() == Some(name))
    }

    /// Finds a generic by name.
    pub fn generic(&self, name: &str) -> Option<&Variable> {
        self.generics.iter().find(|g| g.name == name)
    }

    /// Orders generics and ports by name. Ports without a variable come first.
    pub fn sort_interface(&mut self) {
        self.generics.sort_by(|a, b| a.name.cmp(&b.name));
        self.ports.sort_by(|a, b| a.name().cmp(&b.name()));
    }

    /// Canonicalizes the entity name and every generic and port declaration,
    /// including names referenced by their types and default values.
    ///
    /// Fails with [`JsonError::Redefinition`] if two generics or two ports
    /// collapse to the same name; the entity is left unchanged in that case.
    pub fn normalize_ids(&mut self, lang: Language) -> Result<(), JsonError> {
        let mut normalized = self.clone();
        normalized.name = lang.normalize_id(&normalized.name);
        for g in &mut normalized.generics {
            g.normalize_ids(lang);
        }
        for v in normalized.ports.iter_mut().filter_map(|p| p.variable.as_mut()) {
            v.normalize_ids(lang);
        }
        check_unique(normalized.generics.iter().map(|g| g.name.as_str()))?;
        check_unique(normalized.ports.iter().filter_map(|p| p.name()))?;
        *self = normalized;
        Ok(())
    }
}

fn check_unique<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), JsonError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(JsonError::Redefinition(name.to_string()));
        }
    }
    Ok(())
}

/// Renders `{"name", "generics", "ports"}`.
impl ToJson for Entity {
    fn to_json(&self) -> Result<JsonMap, JsonError> {
        let mut m = JsonMap::new();
        m.insert("name".into(), Value::from(self.name.as_str()));
        m.insert("generics".into(), to_json_array(&self.generics)?);
        m.insert("ports".into(), to_json_array(&self.ports)?);
        Ok(m)
    }
}

impl FromJson for Entity {
    fn from_json(map: &JsonMap) -> Result<Self, JsonError> {
        Ok(Self {
            name: str_field(map, "name")?.to_string(),
            generics: from_json_array(map, "generics")?,
            ports: from_json_array(map, "ports")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::expr::Expr;
    use serde_json::json;

    fn counter() -> Entity {
        let mut e = Entity::new("Counter");
        e.generics
            .push(Variable::new("WIDTH", Expr::id("natural")).with_value(Expr::int(8)));
        e.ports.push(Port::new(
            Direction::Out,
            Variable::new("q", Expr::id("std_logic")),
        ));
        e.ports.push(Port::new(
            Direction::In,
            Variable::new("Clk", Expr::id("std_logic")),
        ));
        e
    }

    #[test]
    fn renders_name_generics_ports() {
        let m = counter().to_json().unwrap();
        let keys: Vec<_> = m.keys().cloned().collect();
        assert_eq!(keys, vec!["name", "generics", "ports"]);
        assert_eq!(m["name"], json!("Counter"));
        assert_eq!(m["generics"].as_array().unwrap().len(), 1);
        assert_eq!(m["ports"][0]["direction"], json!("OUT"));
        assert_eq!(m["ports"][1]["variable"]["name"], json!("Clk"));
    }

    #[test]
    fn unset_port_fails_whole_entity() {
        let mut e = counter();
        e.ports.push(Port::default());
        let err = e.to_json().unwrap_err();
        assert!(matches!(err, JsonError::MissingField("direction")));
    }

    #[test]
    fn sorts_ports_by_name() {
        let mut e = counter();
        e.sort_interface();
        let names: Vec<_> = e.ports.iter().filter_map(|p| p.name()).collect();
        assert_eq!(names, vec!["Clk", "q"]);
    }

    #[test]
    fn normalizes_vhdl_names() {
        let mut e = counter();
        e.normalize_ids(Language::Vhdl).unwrap();
        assert_eq!(e.name, "counter");
        assert!(e.generic("width").is_some());
        assert!(e.port("clk").is_some());
        assert!(e.port("Clk").is_none());
    }

    #[test]
    fn verilog_names_untouched() {
        let mut e = counter();
        e.normalize_ids(Language::Verilog).unwrap();
        assert_eq!(e.name, "Counter");
        assert!(e.port("Clk").is_some());
    }

    #[test]
    fn normalize_rewrites_generic_references() {
        let mut e = counter();
        e.ports.push(Port::new(
            Direction::Out,
            Variable::new(
                "Data",
                Expr::call(
                    Expr::id("std_logic_vector"),
                    vec![Expr::binary(
                        "DOWNTO",
                        Expr::binary("SUB", Expr::id("WIDTH"), Expr::int(1)),
                        Expr::int(0),
                    )],
                ),
            ),
        ));
        e.normalize_ids(Language::Vhdl).unwrap();
        let m = e.to_json().unwrap();
        assert_eq!(m["generics"][0]["name"], json!("width"));
        let bound = &m["ports"][2]["variable"]["type"]["binOperator"]["operands"][0];
        assert_eq!(
            bound["binOperator"]["op0"]["binOperator"]["op0"],
            json!({"literal": {"type": "ID", "value": "width"}})
        );
    }

    #[test]
    fn colliding_port_names_rejected() {
        let mut e = Entity::new("mux");
        e.ports
            .push(Port::new(Direction::In, Variable::new("A", Expr::id("std_logic"))));
        e.ports
            .push(Port::new(Direction::Out, Variable::new("a", Expr::id("std_logic"))));
        let before = e.clone();
        let err = e.normalize_ids(Language::Vhdl).unwrap_err();
        assert!(matches!(err, JsonError::Redefinition(ref n) if n == "a"));
        assert_eq!(e, before);
        assert!(e.clone().normalize_ids(Language::Verilog).is_ok());
    }

    #[test]
    fn colliding_generic_names_rejected() {
        let mut e = Entity::new("fifo");
        e.generics.push(Variable::new("Depth", Expr::id("natural")));
        e.generics.push(Variable::new("DEPTH", Expr::id("natural")));
        let err = e.normalize_ids(Language::Vhdl).unwrap_err();
        assert!(matches!(err, JsonError::Redefinition(ref n) if n == "depth"));
        assert_eq!(e.generics[0].name, "Depth");
    }

    #[test]
    fn reads_back() {
        let e = counter();
        let back = Entity::from_json(&e.to_json().unwrap()).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn missing_ports_fails() {
        let m = match json!({"name": "x", "generics": []}) {
            Value::Object(m) => m,
            _ => unreachable!(),
        };
        let err = Entity::from_json(&m).unwrap_err();
        assert!(matches!(err, JsonError::MissingField("ports")));
    }
}
