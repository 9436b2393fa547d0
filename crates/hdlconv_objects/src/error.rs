//! Error types for converting HDL objects to and from JSON maps.

/// Errors raised while building or reading the JSON form of an HDL object.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    /// A field required to build or read an object is unset or absent.
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    /// A field holds a JSON value of the wrong kind.
    #[error("field '{field}' expected {expected}")]
    UnexpectedType {
        /// The offending key.
        field: &'static str,
        /// A short description of the expected JSON kind.
        expected: &'static str,
    },

    /// A port direction string is not one of the known modes.
    #[error("invalid port direction '{0}'")]
    InvalidDirection(String),

    /// A literal carries a type tag other than `ID`, `INT` or `STRING`.
    #[error("unknown type of literal '{0}'")]
    UnknownLiteral(String),

    /// An expression map has neither a `literal` nor a `binOperator` entry.
    #[error("unparsable expression {0}")]
    Unparsable(String),

    /// An object with the same name was already inserted.
    #[error("redefinition of '{0}'")]
    Redefinition(String),

    /// A keyed entry declares a different name than the key it is stored under.
    #[error("entry '{key}' declares name '{name}'")]
    NameMismatch {
        /// The map key.
        key: String,
        /// The name inside the entry.
        name: String,
    },

    /// The JSON text could not be encoded or decoded.
    #[error("malformed JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Encoded output was not valid UTF-8.
    #[error("encoded JSON is not UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
