//! All error types for the deepmsg crate.
//!
//! Construction-time failures (missing directory, unreadable or malformed
//! files) and per-call lookup failures share this one enum. Detected
//! placeholder cycles are not errors; they are rendered inline.

use std::path::PathBuf;

use thiserror::Error;

use crate::formats::FormatType;

#[derive(Error, Debug)]
pub enum Error {
    #[error("directory `{}` does not exist", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HJSON parse error: {0}")]
    Hjson(#[from] deser_hjson::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{format} parse error in `{}`: {message}", path.display())]
    Parse {
        path: PathBuf,
        format: FormatType,
        message: String,
    },

    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("cannot look up `{key}` in non-object value {value}")]
    TypeMismatch { key: String, value: String },

    #[error("value at `{key}` is a {kind}, not text")]
    NotText { key: String, kind: &'static str },

    #[error("unresolved reference `{key}`")]
    Unresolved { key: String },

    #[error("expansion of `{key}` exceeded the maximum depth of {depth}")]
    RecursionLimit { key: String, depth: usize },
}

impl Error {
    /// Creates a parse error for a file of the given format.
    pub fn parse_error(
        path: impl Into<PathBuf>,
        format: FormatType,
        message: impl ToString,
    ) -> Self {
        Error::Parse {
            path: path.into(),
            format,
            message: message.to_string(),
        }
    }

    /// Creates a type mismatch for a traversal step into `value`.
    pub fn type_mismatch(key: impl Into<String>, value: impl ToString) -> Self {
        Error::TypeMismatch {
            key: key.into(),
            value: value.to_string(),
        }
    }
}
