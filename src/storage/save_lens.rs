//! An optic whose write side persists bytes under a fresh name.
//!
//! [`SaveFileLens`] focuses from a resource name to the bytes stored under it.
//! Reading loads the resource. Writing stores the new bytes under a derived
//! name `<stem>_<millis>_<token>.<ext>` and returns that name as the updated
//! source, so the original resource is never overwritten.
//!
//! ```
//! use focal::optics::{Optic, json_bytes, prop};
//! use focal::storage::{ByteStore, MemoryStore, SaveFileLens};
//! use serde_json::json;
//!
//! let store = MemoryStore::new().with_entry("savedgame.json", r#"{"level":1}"#);
//! let saves = SaveFileLens::with_sources(store.clone(), || 1_000_i64, || "abc123".to_string());
//!
//! let level = saves.compose(json_bytes()).compose(prop("level"));
//! let saved_as = level.set("savedgame.json".to_string(), json!(2));
//!
//! assert_eq!(saved_as, "savedgame_1000_abc123.json");
//! assert_eq!(store.read(&saved_as).unwrap(), br#"{"level":2}"#);
//! assert_eq!(store.writes(), vec![saved_as]);
//! ```

use tracing::{info, warn};

use super::naming::{Clock, SystemClock, TokenSource, UuidTokens};
use super::store::{ByteStore, FileStore, StoreError};
use crate::config::SaveConfig;
use crate::optics::{Optic, file_name};

/// Side-effecting optic from a resource name to the bytes stored under it.
#[derive(Debug, Clone)]
pub struct SaveFileLens<B, C = SystemClock, T = UuidTokens> {
    store: B,
    clock: C,
    tokens: T,
}

impl<B: ByteStore> SaveFileLens<B> {
    /// Uses the wall clock and six-character UUID tokens.
    pub fn new(store: B) -> Self {
        Self::with_sources(store, SystemClock, UuidTokens::default())
    }
}

impl SaveFileLens<FileStore> {
    /// A file-backed lens configured from [`SaveConfig`].
    #[must_use]
    pub fn from_config(config: &SaveConfig) -> Self {
        Self::with_sources(
            FileStore::new(config.save_dir.clone()),
            SystemClock,
            UuidTokens::new(config.token_length),
        )
    }
}

impl<B, C, T> SaveFileLens<B, C, T>
where
    B: ByteStore,
    C: Clock,
    T: TokenSource,
{
    /// Uses explicit time and token sources.
    pub const fn with_sources(store: B, clock: C, tokens: T) -> Self {
        Self {
            store,
            clock,
            tokens,
        }
    }

    /// The backing store.
    pub const fn store(&self) -> &B {
        &self.store
    }

    /// Derives the name the next save of `name` would use.
    ///
    /// Draws a fresh token, so repeated calls give different names.
    pub fn derived_name(&self, name: &str) -> String {
        let suffix = format!(
            "_{}_{}",
            self.clock.now_millis(),
            self.tokens.next_token()
        );
        file_name().modify(name.to_string(), |parts| parts.with_stem_suffix(&suffix))
    }

    /// Reads the bytes stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the resource cannot be read.
    pub fn load(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        self.store.read(name)
    }

    /// Stores `bytes` under a name derived from `name` and returns it.
    ///
    /// The store is written exactly once. `name` itself is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Collision` when the derived name is already taken,
    /// or the store's error when the write fails.
    pub fn save(&self, name: &str, bytes: &[u8]) -> Result<String, StoreError> {
        let target = self.derived_name(name);
        self.store.create(&target, bytes)?;
        info!(source = name, saved_as = %target, size = bytes.len(), "saved resource");
        Ok(target)
    }
}

impl<B, C, T> Optic<String, Vec<u8>> for SaveFileLens<B, C, T>
where
    B: ByteStore,
    C: Clock,
    T: TokenSource,
{
    fn preview(&self, source: &String) -> Option<Vec<u8>> {
        self.load(source)
            .inspect_err(|error| warn!(%error, name = %source, "could not load resource"))
            .ok()
    }

    fn set(&self, source: String, value: Vec<u8>) -> String {
        match self.save(&source, &value) {
            Ok(target) => target,
            Err(error) => {
                warn!(%error, name = %source, "could not save resource; keeping original name");
                source
            }
        }
    }
}
