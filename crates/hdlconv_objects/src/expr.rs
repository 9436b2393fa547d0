//! Expressions as they appear in type marks and default values.
//!
//! The JSON shape is one of:
//!
//! ```text
//! {"literal": {"type": "ID" | "INT" | "STRING", "value": ..., "bits": N?}}
//! {"binOperator": {"operator": NAME, "op0": EXPR, "op1": EXPR}}
//! {"binOperator": {"operator": NAME, "op0": EXPR, "operands": [EXPR, ...]}}
//! ```

use std::fmt;

use serde_json::Value;

use crate::error::JsonError;
use crate::language::Language;
use crate::to_json::{
    as_object, field, from_json_array, str_field, to_json_array, FromJson, JsonMap, ToJson,
};

/// Operator name of a function call; `op0` is the callee.
pub const CALL: &str = "CALL";
/// Operator name of a conditional expression; `op0` is the condition.
pub const TERNARY: &str = "TERNARY";

/// A literal leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// A (possibly selected) name, e.g. `ieee.std_logic_1164.std_logic`.
    Id(Vec<String>),
    /// An integer. `bits` is set for bit-vector literals such as `x"FF"`.
    Int {
        /// Numeric value.
        value: i64,
        /// Width of a bit-vector literal.
        bits: Option<u32>,
    },
    /// A string literal.
    Str(String),
}

/// An expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A leaf value.
    Literal(Literal),
    /// A two-operand operator, e.g. `DOWNTO` or `ADD`.
    Binary {
        /// Operator name.
        operator: String,
        /// Left operand.
        op0: Box<Expr>,
        /// Right operand.
        op1: Box<Expr>,
    },
    /// A call or ternary: `op0` followed by any number of operands.
    Nary {
        /// Operator name, normally [`CALL`] or [`TERNARY`].
        operator: String,
        /// The callee or condition.
        op0: Box<Expr>,
        /// Remaining operands in order.
        operands: Vec<Expr>,
    },
}

impl Expr {
    /// A simple name.
    pub fn id(name: impl Into<String>) -> Self {
        Expr::Literal(Literal::Id(vec![name.into()]))
    }

    /// A selected name built from its dotted parts.
    pub fn selected<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expr::Literal(Literal::Id(parts.into_iter().map(Into::into).collect()))
    }

    /// An integer literal.
    pub fn int(value: i64) -> Self {
        Expr::Literal(Literal::Int { value, bits: None })
    }

    /// A bit-vector literal of the given width.
    pub fn vector(value: i64, bits: u32) -> Self {
        Expr::Literal(Literal::Int {
            value,
            bits: Some(bits),
        })
    }

    /// A string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::Str(value.into()))
    }

    /// A binary operator application.
    pub fn binary(operator: impl Into<String>, op0: Expr, op1: Expr) -> Self {
        Expr::Binary {
            operator: operator.into(),
            op0: Box::new(op0),
            op1: Box::new(op1),
        }
    }

    /// A call of `callee` with `args`, e.g. `std_logic_vector(7 downto 0)`.
    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Nary {
            operator: CALL.to_string(),
            op0: Box::new(callee),
            operands: args,
        }
    }

    /// Returns the last part of a name literal, if this is one.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Expr::Literal(Literal::Id(parts)) => parts.last().map(String::as_str),
            _ => None,
        }
    }

    /// Canonicalizes every name referenced anywhere in the tree.
    pub fn normalize_ids(&mut self, lang: Language) {
        match self {
            Expr::Literal(Literal::Id(parts)) => {
                for part in parts.iter_mut() {
                    *part = lang.normalize_id(part);
                }
            }
            Expr::Literal(_) => {}
            Expr::Binary { op0, op1, .. } => {
                op0.normalize_ids(lang);
                op1.normalize_ids(lang);
            }
            Expr::Nary { op0, operands, .. } => {
                op0.normalize_ids(lang);
                for operand in operands {
                    operand.normalize_ids(lang);
                }
            }
        }
    }
}

impl ToJson for Expr {
    fn to_json(&self) -> Result<JsonMap, JsonError> {
        let mut outer = JsonMap::new();
        match self {
            Expr::Literal(lit) => {
                let mut m = JsonMap::new();
                match lit {
                    Literal::Id(parts) => {
                        m.insert("type".into(), Value::from("ID"));
                        let value = match parts.as_slice() {
                            [single] => Value::from(single.as_str()),
                            _ => Value::from(parts.clone()),
                        };
                        m.insert("value".into(), value);
                    }
                    Literal::Int { value, bits } => {
                        m.insert("type".into(), Value::from("INT"));
                        m.insert("value".into(), Value::from(*value));
                        if let Some(bits) = bits {
                            m.insert("bits".into(), Value::from(*bits));
                        }
                    }
                    Literal::Str(s) => {
                        m.insert("type".into(), Value::from("STRING"));
                        m.insert("value".into(), Value::from(s.as_str()));
                    }
                }
                outer.insert("literal".into(), Value::Object(m));
            }
            Expr::Binary { operator, op0, op1 } => {
                let mut m = JsonMap::new();
                m.insert("operator".into(), Value::from(operator.as_str()));
                m.insert("op0".into(), Value::Object(op0.to_json()?));
                m.insert("op1".into(), Value::Object(op1.to_json()?));
                outer.insert("binOperator".into(), Value::Object(m));
            }
            Expr::Nary {
                operator,
                op0,
                operands,
            } => {
                let mut m = JsonMap::new();
                m.insert("operator".into(), Value::from(operator.as_str()));
                m.insert("op0".into(), Value::Object(op0.to_json()?));
                m.insert("operands".into(), to_json_array(operands.iter())?);
                outer.insert("binOperator".into(), Value::Object(m));
            }
        }
        Ok(outer)
    }
}

impl FromJson for Expr {
    fn from_json(map: &JsonMap) -> Result<Self, JsonError> {
        if let Some(lit) = map.get("literal").filter(|v| !v.is_null()) {
            return literal_from_json(as_object(lit, "literal")?).map(Expr::Literal);
        }
        if let Some(op) = map.get("binOperator").filter(|v| !v.is_null()) {
            let op = as_object(op, "binOperator")?;
            let operator = str_field(op, "operator")?.to_string();
            let op0 = Box::new(Expr::from_json(as_object(field(op, "op0")?, "op0")?)?);
            if op.contains_key("operands") {
                let operands = from_json_array(op, "operands")?;
                return Ok(Expr::Nary {
                    operator,
                    op0,
                    operands,
                });
            }
            let op1 = Box::new(Expr::from_json(as_object(field(op, "op1")?, "op1")?)?);
            return Ok(Expr::Binary { operator, op0, op1 });
        }
        Err(JsonError::Unparsable(Value::Object(map.clone()).to_string()))
    }
}

fn literal_from_json(lit: &JsonMap) -> Result<Literal, JsonError> {
    let kind = str_field(lit, "type")?;
    let value = field(lit, "value")?;
    match kind {
        "ID" => match value {
            Value::String(s) => Ok(Literal::Id(vec![s.clone()])),
            Value::Array(parts) => parts
                .iter()
                .map(|p| {
                    p.as_str().map(str::to_string).ok_or(JsonError::UnexpectedType {
                        field: "value",
                        expected: "a name part string",
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Literal::Id),
            _ => Err(JsonError::UnexpectedType {
                field: "value",
                expected: "a string or list of strings",
            }),
        },
        "INT" => {
            let value = value.as_i64().ok_or(JsonError::UnexpectedType {
                field: "value",
                expected: "an integer",
            })?;
            let bits = match lit.get("bits") {
                None | Some(Value::Null) => None,
                Some(b) => Some(
                    b.as_u64()
                        .and_then(|b| u32::try_from(b).ok())
                        .ok_or(JsonError::UnexpectedType {
                            field: "bits",
                            expected: "a bit width",
                        })?,
                ),
            };
            Ok(Literal::Int { value, bits })
        }
        "STRING" => value
            .as_str()
            .map(|s| Literal::Str(s.to_string()))
            .ok_or(JsonError::UnexpectedType {
                field: "value",
                expected: "a string",
            }),
        other => Err(JsonError::UnknownLiteral(other.to_string())),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(Literal::Id(parts)) => write!(f, "{}", parts.join(".")),
            Expr::Literal(Literal::Int { value, .. }) => write!(f, "{value}"),
            Expr::Literal(Literal::Str(s)) => write!(f, "\"{s}\""),
            Expr::Binary { operator, op0, op1 } => {
                write!(f, "{op0} {} {op1}", operator.to_lowercase())
            }
            Expr::Nary {
                operator,
                op0,
                operands,
            } => {
                if operator == CALL {
                    write!(f, "{op0}(")?;
                } else {
                    write!(f, "{}({op0}, ", operator.to_lowercase())?;
                }
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{operand}")?;
                }
                f.write_str(")")
            }
        }
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

    fn slv_7_downto_0() -> Expr {
        Expr::call(
            Expr::id("std_logic_vector"),
            vec![Expr::binary("DOWNTO", Expr::int(7), Expr::int(0))],
        )
    }

    #[test]
    fn simple_id_is_plain_string() {
        let m = Expr::id("std_logic").to_json().unwrap();
        assert_eq!(
            Value::Object(m),
            json!({"literal": {"type": "ID", "value": "std_logic"}})
        );
    }

    #[test]
    fn selected_id_is_list() {
        let m = Expr::selected(["ieee", "numeric_std", "unsigned"])
            .to_json()
            .unwrap();
        assert_eq!(
            Value::Object(m),
            json!({"literal": {"type": "ID", "value": ["ieee", "numeric_std", "unsigned"]}})
        );
    }

    #[test]
    fn vector_literal_carries_bits() {
        let m = Expr::vector(255, 8).to_json().unwrap();
        assert_eq!(
            Value::Object(m),
            json!({"literal": {"type": "INT", "value": 255, "bits": 8}})
        );
        let m = Expr::int(4).to_json().unwrap();
        assert!(!m["literal"].as_object().unwrap().contains_key("bits"));
    }

    #[test]
    fn call_uses_operands() {
        let m = slv_7_downto_0().to_json().unwrap();
        let expected = json!({"binOperator": {
            "operator": "CALL",
            "op0": {"literal": {"type": "ID", "value": "std_logic_vector"}},
            "operands": [{"binOperator": {
                "operator": "DOWNTO",
                "op0": {"literal": {"type": "INT", "value": 7}},
                "op1": {"literal": {"type": "INT", "value": 0}},
            }}],
        }});
        assert_eq!(Value::Object(m), expected);
    }

    #[test]
    fn reads_back_nested_call() {
        let e = slv_7_downto_0();
        let back = Expr::from_json(&e.to_json().unwrap()).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn reads_null_literal_as_operator() {
        let m = map(json!({
            "literal": null,
            "binOperator": {
                "operator": "ADD",
                "op0": {"literal": {"type": "ID", "value": "WIDTH"}},
                "op1": {"literal": {"type": "INT", "value": 1}},
            }
        }));
        let e = Expr::from_json(&m).unwrap();
        assert_eq!(e, Expr::binary("ADD", Expr::id("WIDTH"), Expr::int(1)));
    }

    #[test]
    fn unknown_literal_type_fails() {
        let m = map(json!({"literal": {"type": "REAL", "value": 1.5}}));
        let err = Expr::from_json(&m).unwrap_err();
        assert!(matches!(err, JsonError::UnknownLiteral(ref t) if t == "REAL"));
    }

    #[test]
    fn empty_map_is_unparsable() {
        let err = Expr::from_json(&JsonMap::new()).unwrap_err();
        assert!(matches!(err, JsonError::Unparsable(_)));
    }

    #[test]
    fn binary_without_op1_fails() {
        let m = map(json!({"binOperator": {
            "operator": "ADD",
            "op0": {"literal": {"type": "INT", "value": 1}},
        }}));
        let err = Expr::from_json(&m).unwrap_err();
        assert!(matches!(err, JsonError::MissingField("op1")));
    }

    #[test]
    fn display_renders_vhdl_like_text() {
        assert_eq!(slv_7_downto_0().to_string(), "std_logic_vector(7 downto 0)");
        assert_eq!(Expr::selected(["ieee", "std_logic"]).to_string(), "ieee.std_logic");
        assert_eq!(Expr::string("abc").to_string(), "\"abc\"");
    }

    #[test]
    fn normalize_reaches_nested_references() {
        let mut e = Expr::call(
            Expr::id("STD_LOGIC_VECTOR"),
            vec![Expr::binary(
                "DOWNTO",
                Expr::binary("SUB", Expr::id("WIDTH"), Expr::int(1)),
                Expr::int(0),
            )],
        );
        e.normalize_ids(Language::Vhdl);
        assert_eq!(e.to_string(), "std_logic_vector(width sub 1 downto 0)");
        let m = e.to_json().unwrap();
        assert_eq!(m["binOperator"]["operator"], json!("CALL"));
    }

    #[test]
    fn normalize_keeps_strings_and_verilog_names() {
        let mut s = Expr::string("Hello");
        s.normalize_ids(Language::Vhdl);
        assert_eq!(s, Expr::string("Hello"));
        let mut id = Expr::selected(["Work", "Pkg"]);
        id.normalize_ids(Language::Verilog);
        assert_eq!(id, Expr::selected(["Work", "Pkg"]));
        id.normalize_ids(Language::Vhdl);
        assert_eq!(id, Expr::selected(["work", "pkg"]));
    }

    #[test]
    fn as_name_returns_last_part() {
        assert_eq!(Expr::selected(["work", "pkg", "t"]).as_name(), Some("t"));
        assert_eq!(Expr::int(1).as_name(), None);
    }
}
