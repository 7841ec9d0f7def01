//! All supported message file formats.
//!
//! This module re-exports the parser for each format and provides the
//! [`FormatType`] enum for picking one from a file name.

pub mod hjson;
pub mod json;
pub mod toml;
pub mod yaml;

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

// Reexporting the formats for easier access
pub use hjson::Format as HjsonFormat;
pub use json::Format as JsonFormat;
pub use toml::Format as TomlFormat;
pub use yaml::Format as YamlFormat;

use crate::{Error, traits::Parser, tree::Node};

/// Represents all supported message file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// Plain JSON (`.json`).
    Json,
    /// Human JSON (`.hjson`): comments, unquoted keys and strings, optional commas.
    Hjson,
    /// YAML (`.yaml`, `.yml`).
    Yaml,
    /// TOML (`.toml`).
    Toml,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// # Example
/// ```rust
/// use deepmsg::formats::FormatType;
/// assert_eq!(FormatType::Json.to_string(), "json");
/// assert_eq!(FormatType::Hjson.to_string(), "hjson");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Json => write!(f, "json"),
            FormatType::Hjson => write!(f, "hjson"),
            FormatType::Yaml => write!(f, "yaml"),
            FormatType::Toml => write!(f, "toml"),
        }
    }
}

/// Implements [`std::str::FromStr`] for [`FormatType`].
///
/// Accepts the names and extensions case-insensitively. Returns
/// [`crate::error::Error::UnknownFormat`] for anything else.
///
/// # Example
/// ```rust
/// use deepmsg::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("HJSON").unwrap(), FormatType::Hjson);
/// assert_eq!(FormatType::from_str("yml").unwrap(), FormatType::Yaml);
/// assert!(FormatType::from_str("xml").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "json" => Ok(FormatType::Json),
            "hjson" => Ok(FormatType::Hjson),
            "yaml" | "yml" => Ok(FormatType::Yaml),
            "toml" => Ok(FormatType::Toml),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Json => "json",
            FormatType::Hjson => "hjson",
            FormatType::Yaml => "yaml",
            FormatType::Toml => "toml",
        }
    }

    /// Infers the format from a path's extension, or `None` if it is not a
    /// message file.
    ///
    /// ```rust
    /// use deepmsg::formats::FormatType;
    /// assert_eq!(FormatType::from_extension("locales/en_US.hjson"), Some(FormatType::Hjson));
    /// assert_eq!(FormatType::from_extension("README.md"), None);
    /// ```
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Option<FormatType> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| FormatType::from_str(ext).ok())
    }

    /// Parses already decoded text in this format.
    pub fn parse_str(&self, s: &str) -> Result<Node, Error> {
        match self {
            FormatType::Json => JsonFormat::from_str(s),
            FormatType::Hjson => HjsonFormat::from_str(s),
            FormatType::Yaml => YamlFormat::from_str(s),
            FormatType::Toml => TomlFormat::from_str(s),
        }
    }

    /// Reads and parses a file in this format.
    pub fn read_from<P: AsRef<Path>>(&self, path: P) -> Result<Node, Error> {
        match self {
            FormatType::Json => JsonFormat::read_from(path),
            FormatType::Hjson => HjsonFormat::read_from(path),
            FormatType::Yaml => YamlFormat::read_from(path),
            FormatType::Toml => TomlFormat::read_from(path),
        }
    }
}
