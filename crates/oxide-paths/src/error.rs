//! Error types for template registration and lookup.

use thiserror::Error;

/// Errors raised while building a [`Paths`](crate::Paths) index or calling it
/// with input of the wrong shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathsError {
    /// The index was built without any templates.
    #[error("constructed without paths")]
    NoPaths,

    /// The template mapping was not an object.
    #[error("template mapping should be an object, got {0}")]
    NotAnObject(&'static str),

    /// A template was empty or contained no path segments.
    #[error("invalid empty path: '{0}'")]
    EmptyPattern(String),

    /// A literal segment of a template did not decode to UTF-8.
    #[error("invalid percent-encoding in template '{pattern}'")]
    InvalidEncoding {
        /// The offending template.
        pattern: String,
    },

    /// Two templates bind different variables at the same position.
    #[error("template '{pattern}' binds '{found}' where another template binds '{existing}'")]
    ConflictingParameter {
        /// The template being registered.
        pattern: String,
        /// The binding already present in the tree.
        existing: String,
        /// The binding the new template asked for.
        found: String,
    },

    /// Two templates terminate on the same position.
    #[error("template '{pattern}' resolves to the same path as '{existing}'")]
    ConflictingValue {
        /// The template being registered.
        pattern: String,
        /// The template that already owns the position.
        existing: String,
    },

    /// A lookup was called with something other than a string or null.
    #[error("path must be a string, got {0}")]
    NotAString(&'static str),
}

/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, PathsError>;

/// Names the JSON type of `value` for diagnostics.
pub(crate) const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
