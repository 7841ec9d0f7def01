//! Plain JSON message files.

use crate::{error::Error, traits::Parser, tree::Node};

pub struct Format;

impl Parser for Format {
    fn from_str(s: &str) -> Result<Node, Error> {
        serde_json::from_str(s).map_err(Error::Json)
    }
}
