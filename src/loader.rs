//! Loading a directory of message files into named trees.
//!
//! [`Loader`] owns the parse cache. A file is parsed once per loader; later
//! loads of the same canonical path hand back the same shared tree.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::debug;

use crate::{error::Error, formats::FormatType, tree::Node};

/// Parses message files and caches the results by canonical path.
#[derive(Debug, Default)]
pub struct Loader {
    cache: HashMap<PathBuf, Arc<Node>>,
}

impl Loader {
    /// Creates a loader with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every recognized message file directly inside `dir`.
    ///
    /// Returns `(file stem, tree)` pairs sorted by file name. Files with an
    /// unrecognized extension and subdirectories are skipped. Two files may
    /// share a stem (`en_US.hjson`, `en_US.json`); both are returned and the
    /// later one wins when the pairs are added to a [`crate::LocaleStore`].
    ///
    /// # Errors
    ///
    /// [`Error::DirectoryNotFound`] if `dir` is not an existing directory;
    /// otherwise the first read or parse failure.
    pub fn load_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<Vec<(String, Arc<Node>)>, Error> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if FormatType::from_extension(&path).is_some() {
                files.push(path);
            }
        }
        files.sort();

        let mut loaded = Vec::with_capacity(files.len());
        for path in files {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let tree = self.load_file(&path)?;
            loaded.push((stem, tree));
        }
        Ok(loaded)
    }

    /// Loads a single message file, reusing the cached tree when this path
    /// was loaded before.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Arc<Node>, Error> {
        let path = path.as_ref();
        let canonical = fs::canonicalize(path)?;
        if let Some(tree) = self.cache.get(&canonical) {
            debug!(path = %canonical.display(), "message file cache hit");
            return Ok(Arc::clone(tree));
        }

        let format = FormatType::from_extension(&canonical).ok_or_else(|| {
            Error::UnknownFormat(format!(
                "Cannot infer format from file extension: {:?}",
                path.extension()
            ))
        })?;
        debug!(path = %canonical.display(), %format, "parsing message file");
        let tree = format
            .read_from(&canonical)
            .map_err(|err| match err {
                Error::Io(_) => err,
                other => Error::parse_error(&canonical, format, other),
            })?;

        let tree = Arc::new(tree);
        self.cache.insert(canonical, Arc::clone(&tree));
        Ok(tree)
    }

    /// Number of distinct files parsed so far.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Whether `path` has already been parsed by this loader.
    pub fn is_cached<P: AsRef<Path>>(&self, path: P) -> bool {
        fs::canonicalize(path)
            .map(|canonical| self.cache.contains_key(&canonical))
            .unwrap_or(false)
    }
}
