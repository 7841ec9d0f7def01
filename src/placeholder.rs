//! `${ key }` placeholder scanning and substitution.
//!
//! A placeholder is `${`, optional whitespace, a deep key without braces or
//! whitespace, optional whitespace, `}`.

use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\$\{\s*([^{}\s]*?)\s*\}").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte range of the whole `${...}` token in the scanned text.
    pub span: Range<usize>,
    /// The trimmed deep key between the braces.
    pub key: String,
}

/// Extracts placeholders from `input` in occurrence order.
pub fn extract_placeholders(input: &str) -> Vec<Placeholder> {
    PLACEHOLDER_REGEX
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let key = caps.get(1)?;
            Some(Placeholder {
                span: whole.range(),
                key: key.as_str().to_string(),
            })
        })
        .collect()
}

pub fn has_placeholders(input: &str) -> bool {
    PLACEHOLDER_REGEX.is_match(input)
}

/// Replaces every placeholder in `input` with the output of `substitute`,
/// stopping at the first error.
pub fn replace_placeholders<F>(input: &str, mut substitute: F) -> Result<String, Error>
where
    F: FnMut(&str) -> Result<String, Error>,
{
    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    for placeholder in extract_placeholders(input) {
        out.push_str(&input[last..placeholder.span.start]);
        out.push_str(&substitute(&placeholder.key)?);
        last = placeholder.span.end;
    }
    out.push_str(&input[last..]);
    Ok(out)
}
