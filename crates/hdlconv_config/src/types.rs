//! Configuration types deserialized from `hdlconv.toml`.

use hdlconv_objects::Language;
use serde::Deserialize;

/// The top-level converter configuration parsed from `hdlconv.toml`.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertConfig {
    /// Input handling (source language).
    #[serde(default)]
    pub input: InputConfig,
    /// Output formatting and normalization.
    #[serde(default)]
    pub output: OutputConfig,
}

/// How input documents are interpreted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Source language. When absent it is inferred from each file name.
    #[serde(default)]
    pub language: Option<Language>,
}

/// How output documents are written.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Pretty-print with newlines and indentation.
    #[serde(default = "default_true")]
    pub pretty: bool,
    /// Spaces per indentation level when pretty-printing.
    #[serde(default = "default_indent")]
    pub indent: usize,
    /// Sort generics and ports by name.
    #[serde(default = "default_true")]
    pub sort: bool,
    /// Canonicalize identifier case for case-insensitive languages.
    #[serde(default = "default_true")]
    pub normalize_case: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: default_indent(),
            sort: true,
            normalize_case: true,
        }
    }
}

impl OutputConfig {
    /// Indentation to pass to the JSON writer, `None` for compact output.
    pub fn effective_indent(&self) -> Option<usize> {
        self.pretty.then_some(self.indent)
    }
}

fn default_true() -> bool {
    true
}

fn default_indent() -> usize {
    2
}
