//! Error types for protojson-build.

use std::io;

/// Errors that can occur while generating JSON encoders.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error while writing generated files.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Invalid generator configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A field's kind has no JSON encoding rule.
    #[error("unsupported kind `{kind}` for field `{field}` of message `{message}`")]
    UnsupportedKind {
        message: String,
        field: String,
        kind: String,
    },
    /// A field references a type missing from the schema.
    #[error("field `{field}` of message `{message}` references unknown type `{type_name}`")]
    UnknownType {
        message: String,
        field: String,
        type_name: String,
    },
    /// A field references an enum as a message, or the reverse.
    #[error("field `{field}` of message `{message}` expects {expected} but `{type_name}` is not one")]
    KindMismatch {
        message: String,
        field: String,
        type_name: String,
        expected: &'static str,
    },
    /// The same fully-qualified name is declared twice.
    #[error("type `{0}` is declared more than once")]
    DuplicateType(String),
    /// A oneof member points at a group the message does not declare.
    #[error("field `{field}` of message `{message}` belongs to undeclared oneof #{index}")]
    UnknownOneof {
        message: String,
        field: String,
        index: usize,
    },
    /// Missing OUT_DIR environment variable.
    #[error("OUT_DIR not set. Run from build.rs or set out_dir().")]
    MissingOutDir,
    /// Generated code could not be parsed back for formatting.
    #[error("failed to parse generated code: {0}")]
    SynParse(String),
}

/// Invalid generator configuration. Raised before any code is generated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A parameter is not of the form `key=value`.
    #[error("malformed option `{token}`: expected `key=value`")]
    Malformed { token: String },
    /// A parameter names an option that does not exist.
    #[error("unknown option `{token}`; expected one of {}", crate::config::OPTION_KEYS.join(", "))]
    UnknownKey { token: String },
    /// A recognised option has a value that cannot be used.
    #[error("invalid value `{value}` for option `{key}`: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}
