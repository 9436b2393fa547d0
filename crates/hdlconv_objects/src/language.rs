//! Source languages and their identifier rules.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A hardware description language whose objects share this JSON model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// VHDL; identifiers are case-insensitive.
    Vhdl,
    /// Verilog; identifiers are case-sensitive.
    Verilog,
}

impl Language {
    /// Infers the language from a file extension (`.vhd`, `.vhdl`, `.v`).
    ///
    /// The extension is matched without regard to case. Design JSON files are
    /// usually named after their source, so `top.vhd.json` resolves to VHDL.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        let name = name.strip_suffix(".json").unwrap_or(name.as_str());
        if name.ends_with(".vhd") || name.ends_with(".vhdl") {
            Some(Language::Vhdl)
        } else if name.ends_with(".v") {
            Some(Language::Verilog)
        } else {
            None
        }
    }

    /// Returns `true` if identifiers differ by case.
    pub fn is_case_sensitive(self) -> bool {
        matches!(self, Language::Verilog)
    }

    /// Returns the canonical form of an identifier.
    pub fn normalize_id(self, id: &str) -> String {
        if self.is_case_sensitive() {
            id.to_string()
        } else {
            id.to_lowercase()
        }
    }

    /// Canonicalizes a reference as emitted by the converter: a single name
    /// or a list of name parts. Any other shape is left untouched.
    pub fn normalize_reference(self, reference: &mut Value) {
        match reference {
            Value::String(name) => *name = self.normalize_id(name),
            Value::Array(parts) => {
                for part in parts {
                    if let Value::String(name) = part {
                        *name = self.normalize_id(name);
                    }
                }
            }
            _ => {}
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Vhdl => f.write_str("vhdl"),
            Language::Verilog => f.write_str("verilog"),
        }
    }
}
