//! Named byte stores.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

/// Errors raised by a [`ByteStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// No resource with this name exists.
    #[error("resource `{name}` not found")]
    NotFound {
        /// The requested name.
        name: String,
    },
    /// A resource with this name already exists and would be overwritten.
    #[error("resource `{name}` already exists")]
    Collision {
        /// The conflicting name.
        name: String,
    },
    /// The name cannot be used by this store.
    #[error("invalid resource name `{name}`")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
    /// The underlying read or write failed.
    #[error("i/o error on `{name}`: {source}")]
    Io {
        /// The resource being accessed.
        name: String,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

/// A place bytes can be read from and written to by name.
pub trait ByteStore {
    /// Reads the whole resource.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when nothing is stored under `name`.
    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError>;

    /// Writes the whole resource, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` when the write fails.
    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Whether a resource is stored under `name`.
    fn exists(&self, name: &str) -> bool;

    /// Writes a new resource, refusing to replace an existing one.
    ///
    /// The default checks [`exists`](Self::exists) and then writes; stores
    /// that can do both in one step override it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Collision` when `name` is already taken, or the
    /// error of the write.
    fn create(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        if self.exists(name) {
            return Err(StoreError::Collision {
                name: name.to_string(),
            });
        }
        self.write(name, bytes)
    }
}

impl<T: ByteStore + ?Sized> ByteStore for &T {
    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        (**self).read(name)
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).write(name, bytes)
    }

    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }

    fn create(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).create(name, bytes)
    }
}

impl<T: ByteStore + ?Sized> ByteStore for Arc<T> {
    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        (**self).read(name)
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).write(name, bytes)
    }

    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }

    fn create(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).create(name, bytes)
    }
}

/// A store backed by files under a root directory.
///
/// Names are relative paths; absolute names and names containing `..` are
/// rejected. Missing parent directories are created on write.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(name);
        let valid = !name.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if valid {
            Ok(self.root.join(relative))
        } else {
            Err(StoreError::InvalidName {
                name: name.to_string(),
            })
        }
    }
}

impl ByteStore for FileStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.resolve(name)?;
        fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound {
                name: name.to_string(),
            },
            _ => StoreError::Io {
                name: name.to_string(),
                source,
            },
        })
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.resolve(name)?;
        let io_error = |source| StoreError::Io {
            name: name.to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&path, bytes).map_err(io_error)
    }

    fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_ok_and(|path| path.is_file())
    }

    fn create(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.resolve(name)?;
        let io_error = |source: io::Error| match source.kind() {
            io::ErrorKind::AlreadyExists => StoreError::Collision {
                name: name.to_string(),
            },
            _ => StoreError::Io {
                name: name.to_string(),
                source,
            },
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(io_error)?;
        file.write_all(bytes).map_err(io_error)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: BTreeMap<String, Vec<u8>>,
    writes: Vec<String>,
}

/// An in-process store that records every write.
///
/// Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a resource without recording it as a write.
    #[must_use]
    pub fn with_entry(self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    /// Stores a resource without recording it as a write.
    pub fn insert(&self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.state.lock().entries.insert(name.into(), bytes.into());
    }

    /// Names passed to [`ByteStore::write`], in call order.
    #[must_use]
    pub fn writes(&self) -> Vec<String> {
        self.state.lock().writes.clone()
    }

    /// Names of all stored resources, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.state.lock().entries.keys().cloned().collect()
    }
}

impl ByteStore for MemoryStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        self.state
            .lock()
            .entries
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        state.writes.push(name.to_string());
        state.entries.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.state.lock().entries.contains_key(name)
    }

    fn create(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        if state.entries.contains_key(name) {
            return Err(StoreError::Collision {
                name: name.to_string(),
            });
        }
        state.writes.push(name.to_string());
        state.entries.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }
}

static_assertions::assert_impl_all!(FileStore: Send, Sync);
static_assertions::assert_impl_all!(MemoryStore: Send, Sync);
