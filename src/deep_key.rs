//! Deep-key lookup into a [`Node`] tree.
//!
//! A deep key is a dotted path such as `menu.items.2` or `greetings.*`.
//! Plain segments address a mapping key or a sequence index; the `*`
//! segment picks one child uniformly at random.

use std::{fmt::Display, str::FromStr};

use rand::Rng;
use tracing::trace;

use crate::{error::Error, tree::Node};

/// The segment that selects a random child.
pub const WILDCARD: &str = "*";

/// A single path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Name(String),
    Wildcard,
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Name(name) => write!(f, "{}", name),
            Segment::Wildcard => write!(f, "{}", WILDCARD),
        }
    }
}

/// A parsed dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepKey {
    segments: Vec<Segment>,
}

impl DeepKey {
    /// Splits `key` on `.`. Empty segments are kept, so `a..b` looks up the
    /// empty-string key between `a` and `b`.
    pub fn parse(key: &str) -> Self {
        let segments = key
            .split('.')
            .map(|segment| match segment {
                WILDCARD => Segment::Wildcard,
                name => Segment::Name(name.to_string()),
            })
            .collect();
        DeepKey { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Looks this key up in `tree`, using the thread-local RNG for wildcards.
    pub fn get<'a>(&self, tree: &'a Node) -> Result<Option<&'a Node>, Error> {
        self.get_with_rng(tree, &mut rand::rng())
    }

    /// Looks this key up in `tree`, drawing wildcard picks from `rng`.
    ///
    /// Returns `Ok(None)` when the last segment names nothing. Stepping into
    /// a scalar, or past a segment that names nothing, fails with
    /// [`Error::TypeMismatch`].
    pub fn get_with_rng<'a, R: Rng>(
        &self,
        tree: &'a Node,
        rng: &mut R,
    ) -> Result<Option<&'a Node>, Error> {
        let mut current = tree;
        let last = self.segments.len().saturating_sub(1);
        for (i, segment) in self.segments.iter().enumerate() {
            if !current.is_container() {
                return Err(Error::type_mismatch(self.to_string(), current));
            }
            let next = match segment {
                Segment::Wildcard => pick_random(current, rng),
                Segment::Name(name) => child(current, name),
            };
            match next {
                Some(node) => current = node,
                None if i == last => return Ok(None),
                None => return Err(Error::type_mismatch(self.to_string(), "undefined")),
            }
        }
        Ok(Some(current))
    }
}

impl FromStr for DeepKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DeepKey::parse(s))
    }
}

impl From<&str> for DeepKey {
    fn from(key: &str) -> Self {
        DeepKey::parse(key)
    }
}

impl Display for DeepKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .segments
            .iter()
            .map(Segment::to_string)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", joined)
    }
}

/// Looks up a dotted `key` in `tree`.
///
/// # Example
///
/// ```rust
/// use deepmsg::{Node, deep_key::get};
/// use serde_json::json;
///
/// let tree = Node::from(json!({"foo": {"bar": ["a", "b", "c"]}}));
/// assert_eq!(get("foo.bar.1", &tree)?, Some(&Node::from("b")));
/// assert_eq!(get("foo.missing", &tree)?, None);
/// # Ok::<(), deepmsg::Error>(())
/// ```
pub fn get<'a>(key: &str, tree: &'a Node) -> Result<Option<&'a Node>, Error> {
    DeepKey::parse(key).get(tree)
}

/// Same as [`get`], with an explicit random source for `*` segments.
pub fn get_with_rng<'a, R: Rng>(
    key: &str,
    tree: &'a Node,
    rng: &mut R,
) -> Result<Option<&'a Node>, Error> {
    DeepKey::parse(key).get_with_rng(tree, rng)
}

fn child<'a>(node: &'a Node, name: &str) -> Option<&'a Node> {
    match node {
        Node::Mapping(map) => map.get(name),
        Node::Sequence(items) => name.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn pick_random<'a, R: Rng>(node: &'a Node, rng: &mut R) -> Option<&'a Node> {
    let len = match node {
        Node::Sequence(items) => items.len(),
        Node::Mapping(map) => map.len(),
        _ => return None,
    };
    if len == 0 {
        return None;
    }
    let index = rng.random_range(0..len);
    trace!(index, len, "wildcard pick");
    match node {
        Node::Sequence(items) => items.get(index),
        Node::Mapping(map) => map.values().nth(index),
        _ => None,
    }
}
