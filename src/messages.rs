//! The [`Messages`] resolver: locale selection, raw lookup and recursive
//! `${...}` expansion.
//!
//! Placeholders in a message are first resolved against the caller's data
//! tree. If the substituted data value itself contains placeholders, those
//! name further *messages* and are expanded from the catalog, so a data value
//! such as `"${units.kg}"` picks up the localized unit name.

use std::{collections::HashSet, fmt, path::Path, sync::Arc};

use lazy_static::lazy_static;
use rand::Rng;
use tracing::{debug, warn};

use crate::{
    deep_key::DeepKey,
    error::Error,
    loader::Loader,
    options::Options,
    placeholder::{has_placeholders, replace_placeholders},
    store::LocaleStore,
    tree::Node,
};

lazy_static! {
    static ref EMPTY_DATA: Node = Node::empty();
}

/// Renders the inline marker that replaces a placeholder whose key is
/// already being expanded in the current call.
pub fn recursion_marker(key: &str) -> String {
    format!("    !!!! FIND RECURSION FOR DEEPKEY: {}!!!!    ", key)
}

/// Receives every fully resolved message.
pub trait ResolveObserver: Send + Sync {
    fn on_resolved(&self, key: &str, locale: &str, text: &str);
}

/// A localized message catalog with deep-key lookup and templating.
///
/// # Example
///
/// ```rust
/// use deepmsg::{LocaleStore, Messages, Node, Options};
/// use serde_json::json;
///
/// let store = LocaleStore::new()
///     .with_locale("en_US", Node::from(json!({
///         "greeting": "Hello ${name}, you have ${count}",
///         "units": {"apples": "apples"}
///     })));
/// let messages = Messages::from_store(store, Options::new());
///
/// let data = Node::from(json!({"name": "Ann", "count": "3 ${units.apples}"}));
/// assert_eq!(
///     messages.message_with("greeting", &data)?,
///     "Hello Ann, you have 3 apples"
/// );
/// # Ok::<(), deepmsg::Error>(())
/// ```
#[derive(Clone)]
pub struct Messages {
    store: LocaleStore,
    strict: bool,
    max_depth: usize,
    observer: Option<Arc<dyn ResolveObserver>>,
}

impl fmt::Debug for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Messages")
            .field("store", &self.store)
            .field("strict", &self.strict)
            .field("max_depth", &self.max_depth)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Messages {
    /// Loads every message file in `dir`; each file stem becomes a locale.
    ///
    /// `locale` sets the default locale (`en_US` when `None`).
    ///
    /// # Errors
    ///
    /// [`Error::DirectoryNotFound`] if `dir` does not exist, or the first
    /// read/parse failure among its files.
    pub fn new<P: AsRef<Path>>(dir: P, locale: Option<&str>) -> Result<Self, Error> {
        let mut options = Options::new();
        if let Some(locale) = locale {
            options = options.with_default_locale(locale);
        }
        Self::from_loader(&mut Loader::new(), dir, options)
    }

    /// Like [`Messages::new`], but parses through a shared `loader` so files
    /// already loaded by another instance are not parsed again.
    pub fn from_loader<P: AsRef<Path>>(
        loader: &mut Loader,
        dir: P,
        options: Options,
    ) -> Result<Self, Error> {
        let mut store = LocaleStore::new();
        for (locale, tree) in loader.load_dir(dir)? {
            store.add_locale(locale, tree);
        }
        Ok(Self::from_store(store, options))
    }

    /// Builds a resolver over trees that are already in memory. The store's
    /// default locale is replaced by `options.default_locale`.
    pub fn from_store(mut store: LocaleStore, options: Options) -> Self {
        store.set_default_locale(options.default_locale);
        Messages {
            store,
            strict: options.strict,
            max_depth: options.max_depth,
            observer: None,
        }
    }

    /// Attaches an observer that is told about every resolved message.
    pub fn with_observer(mut self, observer: Arc<dyn ResolveObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn store(&self) -> &LocaleStore {
        &self.store
    }

    pub fn default_locale(&self) -> &str {
        self.store.default_locale()
    }

    /// Changes the locale used by calls that do not name one.
    pub fn set_default_locale(&mut self, locale: impl Into<String>) {
        self.store.set_default_locale(locale);
    }

    /// Resolves `key` with no substitution data in the default locale.
    pub fn message(&self, key: &str) -> Result<String, Error> {
        self.get_message(key, &EMPTY_DATA, None)
    }

    /// Resolves `key` with no substitution data in `locale`.
    pub fn message_in(&self, key: &str, locale: &str) -> Result<String, Error> {
        self.get_message(key, &EMPTY_DATA, Some(locale))
    }

    /// Resolves `key` with `data` in the default locale.
    pub fn message_with(&self, key: &str, data: &Node) -> Result<String, Error> {
        self.get_message(key, data, None)
    }

    /// Resolves the message at deep key `key` for `locale`, substituting
    /// `${...}` placeholders from `data`.
    ///
    /// Missing keys render as empty text unless the instance is strict. A
    /// placeholder that would re-enter a key already expanded in this call
    /// renders as [`recursion_marker`].
    pub fn get_message(
        &self,
        key: &str,
        data: &Node,
        locale: Option<&str>,
    ) -> Result<String, Error> {
        self.get_message_with_rng(key, data, locale, &mut rand::rng())
    }

    /// Same as [`Messages::get_message`], drawing `*` picks from `rng`.
    pub fn get_message_with_rng<R: Rng>(
        &self,
        key: &str,
        data: &Node,
        locale: Option<&str>,
        rng: &mut R,
    ) -> Result<String, Error> {
        let locale = locale.unwrap_or(self.store.default_locale());
        let mut expansion = Expansion {
            messages: self,
            tree: self.store.select(Some(locale)),
            data,
            rng,
            in_progress: HashSet::new(),
        };
        let text = expansion.expand(key, 0)?;

        debug!(key, locale, text = %text, "resolved message");
        if let Some(observer) = &self.observer {
            observer.on_resolved(key, locale, &text);
        }
        Ok(text)
    }

    /// Renders a looked-up value as text, applying the unresolved policy.
    fn render(&self, key: &str, value: Option<&Node>) -> Result<String, Error> {
        match value {
            None if self.strict => Err(Error::Unresolved {
                key: key.to_string(),
            }),
            None => {
                warn!(key, "unresolved reference rendered as empty text");
                Ok(String::new())
            }
            Some(node) => node.to_text().ok_or_else(|| Error::NotText {
                key: key.to_string(),
                kind: node.kind(),
            }),
        }
    }
}

/// State of one top-level resolve call.
///
/// `in_progress` only grows during the call: once a key has been expanded,
/// any later placeholder naming it in the same call renders as the recursion
/// marker, even when it is not an actual cycle.
struct Expansion<'a, R> {
    messages: &'a Messages,
    tree: &'a Node,
    data: &'a Node,
    rng: &'a mut R,
    in_progress: HashSet<String>,
}

impl<R: Rng> Expansion<'_, R> {
    fn expand(&mut self, key: &str, depth: usize) -> Result<String, Error> {
        if depth > self.messages.max_depth {
            return Err(Error::RecursionLimit {
                key: key.to_string(),
                depth: self.messages.max_depth,
            });
        }
        self.in_progress.insert(key.to_string());

        let raw = {
            let value = DeepKey::parse(key).get_with_rng(self.tree, &mut *self.rng)?;
            self.messages.render(key, value)?
        };

        replace_placeholders(&raw, |inner| {
            let value = {
                let node = DeepKey::parse(inner).get_with_rng(self.data, &mut *self.rng)?;
                self.messages.render(inner, node)?
            };
            if !has_placeholders(&value) {
                return Ok(value);
            }
            replace_placeholders(&value, |subkey| {
                if self.in_progress.contains(subkey) {
                    warn!(key = subkey, "recursive placeholder reference");
                    return Ok(recursion_marker(subkey));
                }
                self.in_progress.insert(subkey.to_string());
                self.expand(subkey, depth + 1)
            })
        })
    }
}
