#![forbid(unsafe_code)]
//! Deep-key message lookup and recursive templating for localized catalogs.
//!
//! A catalog is a directory of JSON, HJSON, YAML or TOML files, one per
//! locale (`en_US.hjson`, `ru_RU.json`, ...). Messages are addressed by
//! dotted "deep keys" and may embed `${...}` placeholders.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use deepmsg::{Messages, Node};
//! use serde_json::json;
//!
//! let messages = Messages::new("locales", Some("en_US"))?;
//!
//! // Plain lookup, numeric index, and random pick
//! let title = messages.message("menu.title")?;
//! let second = messages.message("menu.items.1")?;
//! let greeting = messages.message("greetings.*")?;
//!
//! // Substitution from caller data, in an explicit locale
//! let data = Node::from(json!({"user": {"name": "Ann"}}));
//! let welcome = messages.get_message("welcome", &data, Some("ru_RU"))?;
//! # Ok::<(), deepmsg::Error>(())
//! ```
//!
//! # Key syntax
//!
//! - `a.b.c` walks nested mappings
//! - `items.2` indexes a sequence
//! - `items.*` picks a uniformly random element (or mapping value)
//!
//! # Placeholders
//!
//! `${key}` in a message is looked up in the caller's data. When that value
//! contains placeholders of its own, they are expanded as messages from the
//! catalog. Re-entering a key already expanded in the same call inserts a
//! visible recursion marker instead of looping.

pub mod deep_key;
pub mod error;
pub mod formats;
pub mod loader;
pub mod messages;
pub mod options;
pub mod placeholder;
pub mod store;
pub mod traits;
pub mod tree;

// Re-export most used types for easy consumption
pub use crate::{
    deep_key::{DeepKey, get, get_with_rng},
    error::Error,
    formats::FormatType,
    loader::Loader,
    messages::{Messages, ResolveObserver, recursion_marker},
    options::Options,
    store::LocaleStore,
    tree::Node,
};
