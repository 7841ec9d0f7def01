//! Traits for format-agnostic parsing of message files.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::{error::Error, tree::Node};

/// A trait for parsing one structured-data file into a message tree.
///
/// # Example
///
/// ```rust,no_run
/// use deepmsg::traits::Parser;
/// let tree = deepmsg::formats::JsonFormat::read_from("locales/en_US.json")?;
/// println!("{}", tree);
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from already decoded text.
    fn from_str(s: &str) -> Result<Node, Error>;

    /// Parse from any reader. UTF-16 and UTF-8 input with a byte order mark
    /// is transcoded first.
    fn from_reader<R: Read>(reader: R) -> Result<Node, Error> {
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(reader);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(decoded.trim_start_matches('\u{feff}'))
    }

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Node, Error> {
        let file = File::open(path).map_err(Error::Io)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Node, Error> {
        Self::from_reader(bytes)
    }
}
