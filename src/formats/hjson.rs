//! Human JSON message files.
//!
//! HJSON allows comments, unquoted keys, quoteless strings and omitted
//! commas, which keeps hand-written message catalogs readable.

use crate::{error::Error, traits::Parser, tree::Node};

pub struct Format;

impl Parser for Format {
    fn from_str(s: &str) -> Result<Node, Error> {
        deser_hjson::from_str(s).map_err(Error::Hjson)
    }
}
