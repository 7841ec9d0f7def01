//! Construction-time options for [`crate::Messages`].

use serde::Deserialize;

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Default cap on nested placeholder expansion.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Resolution behavior options for [`crate::Messages`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Locale queried when a call does not name one.
    pub default_locale: String,
    /// Fail with [`crate::Error::Unresolved`] instead of substituting an
    /// empty string for missing keys.
    pub strict: bool,
    /// Maximum nesting of placeholder expansion before giving up.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Options {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default locale.
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Enables/disables strict handling of missing keys.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the maximum expansion depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
