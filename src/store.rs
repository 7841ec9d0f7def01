//! The locale catalog: which message tree answers a query.

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::{options::DEFAULT_LOCALE, tree::Node};

lazy_static! {
    static ref EMPTY_TREE: Node = Node::empty();
}

/// One locale's parsed message tree.
#[derive(Debug, Clone)]
pub struct LocaleResource {
    pub locale: String,
    pub tree: Arc<Node>,
}

/// Locale identifier → message tree, in insertion order, plus the default
/// locale used when a query names none or names one that is absent.
#[derive(Debug, Clone)]
pub struct LocaleStore {
    resources: Vec<LocaleResource>,
    default_locale: String,
}

impl Default for LocaleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocaleStore {
    /// Creates an empty store with the `en_US` default locale.
    pub fn new() -> Self {
        LocaleStore {
            resources: Vec::new(),
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Adds a locale. Adding a locale that is already present replaces its
    /// tree and keeps its original position.
    pub fn add_locale(&mut self, locale: impl Into<String>, tree: impl Into<Arc<Node>>) {
        let locale = locale.into();
        let tree = tree.into();
        match self.resources.iter_mut().find(|res| res.locale == locale) {
            Some(existing) => existing.tree = tree,
            None => self.resources.push(LocaleResource { locale, tree }),
        }
    }

    /// Builder form of [`LocaleStore::add_locale`].
    pub fn with_locale(mut self, locale: impl Into<String>, tree: impl Into<Arc<Node>>) -> Self {
        self.add_locale(locale, tree);
        self
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn set_default_locale(&mut self, locale: impl Into<String>) {
        self.default_locale = locale.into();
    }

    /// Finds the tree for exactly `locale`, if present.
    pub fn get(&self, locale: &str) -> Option<&Arc<Node>> {
        self.resources
            .iter()
            .find(|res| res.locale == locale)
            .map(|res| &res.tree)
    }

    /// Locale identifiers in insertion order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.resources.iter().map(|res| res.locale.as_str())
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Picks the tree to query: the requested locale, then the default
    /// locale, then the first locale added, then an empty tree.
    pub fn select(&self, locale: Option<&str>) -> &Node {
        locale
            .and_then(|locale| self.get(locale))
            .or_else(|| self.get(&self.default_locale))
            .or_else(|| self.resources.first().map(|res| &res.tree))
            .map(|tree| tree.as_ref())
            .unwrap_or(&*EMPTY_TREE)
    }
}
