//! Source loading for `import` and `from ... import`.
//!
//! The interpreter asks a [`SourceLoader`] for a path's text and runs it
//! through the whole pipeline. [`FsLoader`] reads files relative to an
//! import root; [`MemoryLoader`] serves a fixed map and is what embedders
//! and tests use when there is no filesystem.

use std::fmt;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("\"{path}\" is not found")]
    NotFound { path: String },
    #[error("circular import of \"{path}\"")]
    Circular { path: String },
    #[error("\"{name}\" is not defined in \"{path}\"")]
    NotDefined { name: String, path: String },
}

/// Text of an imported program.
#[derive(Clone, Debug)]
pub struct LoadedSource {
    /// Identity of the source, used to detect circular imports.
    pub key: String,
    /// Name shown in error traces.
    pub name: String,
    pub text: String,
}

pub trait SourceLoader {
    fn load(&self, path: &str) -> Result<LoadedSource, ImportError>;
}

/// Reads imports from the filesystem, relative to `root`.
#[derive(Clone, Debug)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsLoader { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for FsLoader {
    fn default() -> Self {
        FsLoader::new(".")
    }
}

impl SourceLoader for FsLoader {
    fn load(&self, path: &str) -> Result<LoadedSource, ImportError> {
        let full = self.root.join(path);
        let text = std::fs::read_to_string(&full).map_err(|err| {
            tracing::debug!(path = %full.display(), %err, "import read failed");
            ImportError::NotFound {
                path: path.to_string(),
            }
        })?;
        let key = std::fs::canonicalize(&full)
            .unwrap_or_else(|_| full.clone())
            .display()
            .to_string();
        Ok(LoadedSource {
            key,
            name: path.to_string(),
            text,
        })
    }
}

/// Serves imports from an in-memory map of path to text.
#[derive(Clone, Default)]
pub struct MemoryLoader {
    files: FxHashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        MemoryLoader::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(path.into(), text.into());
        self
    }
}

impl fmt::Debug for MemoryLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<&str> = self.files.keys().map(String::as_str).collect();
        paths.sort_unstable();
        f.debug_struct("MemoryLoader").field("files", &paths).finish()
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &str) -> Result<LoadedSource, ImportError> {
        let text = self.files.get(path).ok_or_else(|| ImportError::NotFound {
            path: path.to_string(),
        })?;
        Ok(LoadedSource {
            key: path.to_string(),
            name: path.to_string(),
            text: text.clone(),
        })
    }
}
