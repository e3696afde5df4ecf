//! Key-value persistence
//!
//! Every persistent area of a repository (objects, branches, staging sets, single-slot
//! records and the working tree itself) is a flat namespace of keys mapped to bytes.
//! The [`Storage`] trait captures that, so the areas can run against the file system
//! ([`DiskStorage`]) or entirely in memory ([`MemoryStorage`]).

use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A flat, byte-addressable key-value store.
pub trait Storage: std::fmt::Debug {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> anyhow::Result<Option<Bytes>>;

    /// Store `data` under `key`, replacing any previous value.
    fn write(&self, key: &str, data: Bytes) -> anyhow::Result<()>;

    /// Remove `key`. Returns whether it was present.
    fn remove(&self, key: &str) -> anyhow::Result<bool>;

    fn contains(&self, key: &str) -> anyhow::Result<bool> {
        Ok(self.read(key)?.is_some())
    }

    /// All keys, sorted.
    fn keys(&self) -> anyhow::Result<Vec<String>>;

    fn is_empty(&self) -> anyhow::Result<bool> {
        Ok(self.keys()?.is_empty())
    }
}

const TEMP_PREFIX: &str = ".tmp-";

/// Whether `name` can be used as a key: a single path component on one line, not `.`
/// or `..`, and outside the temp-file namespace.
pub fn is_plain_file_name(name: &str) -> bool {
    !(name.is_empty()
        || name == "."
        || name == ".."
        || name.starts_with(TEMP_PREFIX)
        || name.contains(['/', '\\', '\0', '\n', '\r']))
}

/// Storage backed by plain files inside a single directory.
#[derive(Debug)]
pub struct DiskStorage {
    path: Box<Path>,
}

impl DiskStorage {
    pub fn new(path: Box<Path>) -> Self {
        DiskStorage { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing directory (and its parents) if missing.
    pub fn create(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.path)
            .with_context(|| format!("Unable to create directory {}", self.path.display()))
    }

    /// Path backing `key`; `None` when the key is not a plain file name.
    fn key_path(&self, key: &str) -> Option<PathBuf> {
        is_plain_file_name(key).then(|| self.path.join(key))
    }

    fn write_temp_file(temp_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(temp_path)
            .with_context(|| format!("Unable to open file {}", temp_path.display()))?;

        file.write_all(data)
            .with_context(|| format!("Unable to write file {}", temp_path.display()))
    }

    fn generate_temp_name() -> String {
        format!("{}{}", TEMP_PREFIX, rand::random::<u32>())
    }
}

impl Storage for DiskStorage {
    fn read(&self, key: &str) -> anyhow::Result<Option<Bytes>> {
        let Some(path) = self.key_path(key) else {
            return Ok(None);
        };

        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read(&path)
            .with_context(|| format!("Unable to read file {}", path.display()))?;

        Ok(Some(content.into()))
    }

    fn write(&self, key: &str, data: Bytes) -> anyhow::Result<()> {
        let path = self
            .key_path(key)
            .with_context(|| format!("invalid storage key: {:?}", key))?;
        if !self.path.is_dir() {
            self.create()?;
        }
        let temp_path = self.path.join(Self::generate_temp_name());

        let written = Self::write_temp_file(&temp_path, &data).and_then(|()| {
            // rename the temp file over the target to make the write atomic
            std::fs::rename(&temp_path, &path)
                .with_context(|| format!("Unable to rename file to {}", path.display()))
        });

        if written.is_err() && temp_path.exists() {
            if let Err(error) = std::fs::remove_file(&temp_path) {
                tracing::warn!(path = %temp_path.display(), %error, "unable to remove temp file");
            }
        }

        written
    }

    fn remove(&self, key: &str) -> anyhow::Result<bool> {
        let Some(path) = self.key_path(key) else {
            return Ok(false);
        };

        if !path.is_file() {
            return Ok(false);
        }

        std::fs::remove_file(&path)
            .with_context(|| format!("Unable to remove file {}", path.display()))?;

        Ok(true)
    }

    fn contains(&self, key: &str) -> anyhow::Result<bool> {
        Ok(self.key_path(key).is_some_and(|path| path.is_file()))
    }

    fn keys(&self) -> anyhow::Result<Vec<String>> {
        if !self.path.is_dir() {
            return Ok(Vec::new());
        }

        let mut keys = WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| is_plain_file_name(name))
            .collect::<Vec<_>>();
        keys.sort();

        Ok(keys)
    }
}

/// Storage kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<BTreeMap<String, Bytes>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> anyhow::Result<Option<Bytes>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, data: Bytes) -> anyhow::Result<()> {
        anyhow::ensure!(is_plain_file_name(key), "invalid storage key: {:?}", key);
        self.entries.borrow_mut().insert(key.to_string(), data);
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<bool> {
        Ok(self.entries.borrow_mut().remove(key).is_some())
    }

    fn keys(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}
