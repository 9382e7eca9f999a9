//! SnowStore
//!
//! Filesystem-backed record store addressed by (parent, key).

use std::fs::{self, DirBuilder, File};
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec;
use crate::config::{Config, WriteMode};
use crate::error::{Result, StoreError};

use super::RecordIterator;

/// Sequence for unique staging file names within this process
static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// The record store
///
/// Every call performs blocking filesystem I/O and holds no state between
/// calls beyond the configuration, so a `SnowStore` is cheap to clone and
/// share. Nothing here serializes concurrent writers.
#[derive(Debug, Clone)]
pub struct SnowStore {
    /// Store configuration
    config: Config,

    /// `{base_dir}/data`, parent of every namespace directory
    data_dir: PathBuf,

    /// `{base_dir}/staging`, temp files for `WriteMode::Atomic`
    staging_dir: PathBuf,
}

impl SnowStore {
    // =========================================================================
    // Internal Path Constants
    // =========================================================================
    const DATA_DIR: &'static str = "data";
    const STAGING_DIR: &'static str = "staging";

    /// Create a store over the configured base directory
    ///
    /// No directory is created here; namespace directories appear on the
    /// first write or listing that needs them.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let data_dir = config.base_dir.join(Self::DATA_DIR);
        let staging_dir = config.base_dir.join(Self::STAGING_DIR);

        tracing::debug!("Opened store at {}", config.base_dir.display());

        Ok(Self {
            config,
            data_dir,
            staging_dir,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified base directory
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder().base_dir(path.as_ref()).build();
        Self::open(config)
    }

    // =========================================================================
    // Single-record Operations
    // =========================================================================

    /// Read and decode the record at (parent, key)
    ///
    /// A missing file and a permission-denied open both return
    /// `StoreError::EntryNotFound`. Decode failures are returned as-is.
    pub fn get<T: DeserializeOwned>(&self, parent: &str, key: &str) -> Result<T> {
        let path = self.record_path(parent, key)?;
        tracing::trace!("Get {}", path.display());

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::EntryNotFound);
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                tracing::warn!("Permission denied reading {}", path.display());
                return Err(StoreError::EntryNotFound);
            }
            Err(e) => return Err(e.into()),
        };

        codec::decode_record(&bytes)
    }

    /// Encode `value` and write it to (parent, key), replacing any prior record
    ///
    /// With `WriteMode::Direct` the target is truncated before the write, so
    /// a crash can leave a partial record behind.
    pub fn set<T: Serialize + ?Sized>(&self, parent: &str, key: &str, value: &T) -> Result<()> {
        let path = self.record_path(parent, key)?;
        if let Some(dir) = path.parent() {
            self.create_dir_all(dir)?;
        }

        let bytes = codec::encode_record(value)?;

        match self.config.write_mode {
            WriteMode::Direct => self.write_file(&path, &bytes)?,
            WriteMode::Atomic => self.write_file_atomic(&path, &bytes)?,
        }

        tracing::debug!("Set {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    /// Remove the record at (parent, key)
    ///
    /// Returns `StoreError::EntryNotFound` if there is no such record.
    pub fn delete(&self, parent: &str, key: &str) -> Result<()> {
        let path = self.record_path(parent, key)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Deleted {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::EntryNotFound),
            Err(e) => Err(e.into()),
        }
    }

    // =========================================================================
    // Namespace Operations
    // =========================================================================

    /// List the records under `parent` and return an iterator over them
    ///
    /// The namespace directory is created if absent, so an unknown parent
    /// yields an empty iterator. Subdirectories are skipped. Order follows
    /// the directory listing and is not insertion order. A parent that
    /// resolves to the root namespace (`""`, `"/"`) is rejected.
    pub fn get_by_parent<T: DeserializeOwned>(&self, parent: &str) -> Result<RecordIterator<T>> {
        let dir = self.namespace_dir(parent)?;
        self.create_dir_all(&dir)?;

        let mut paths = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            paths.push(entry.path());
        }

        tracing::debug!("Listed {} records under {}", paths.len(), dir.display());
        Ok(RecordIterator::new(paths))
    }

    /// Remove the namespace directory of `parent` and everything in it
    ///
    /// Succeeds if the namespace does not exist.
    pub fn delete_by_parent(&self, parent: &str) -> Result<()> {
        let dir = self.namespace_dir(parent)?;
        match fs::remove_dir_all(&dir) {
            Ok(()) => {
                tracing::debug!("Deleted namespace {}", dir.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the data directory path (`{base_dir}/data`)
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory holding the records of `parent`
    ///
    /// The empty parent is the data directory itself. Leading `/`, `.` and
    /// drive prefixes are dropped so the result always lies under
    /// `data_dir()`; a `..` component is rejected with `InvalidPath`.
    pub fn parent_dir(&self, parent: &str) -> Result<PathBuf> {
        let mut dir = self.data_dir.clone();
        Self::push_segment(&mut dir, parent)?;
        Ok(dir)
    }

    /// File holding the record at (parent, key)
    ///
    /// A key with no file name component (`""`, `"/"`, `"."`) is rejected.
    pub fn record_path(&self, parent: &str, key: &str) -> Result<PathBuf> {
        let dir = self.parent_dir(parent)?;
        let mut path = dir.clone();
        Self::push_segment(&mut path, key)?;

        if path == dir {
            return Err(StoreError::InvalidPath(format!("empty key {:?}", key)));
        }
        Ok(path)
    }

    /// Directory for a namespace operation; anything resolving to the root is rejected
    fn namespace_dir(&self, parent: &str) -> Result<PathBuf> {
        if parent.is_empty() {
            return Err(StoreError::RootParentSpecified);
        }

        let dir = self.parent_dir(parent)?;
        if dir == self.data_dir {
            return Err(StoreError::RootParentSpecified);
        }
        Ok(dir)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Append the normal components of `segment` to `path`
    fn push_segment(path: &mut PathBuf, segment: &str) -> Result<()> {
        for component in Path::new(segment).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
                Component::ParentDir => {
                    return Err(StoreError::InvalidPath(format!(
                        "'..' not allowed in {:?}",
                        segment
                    )));
                }
            }
        }
        Ok(())
    }

    /// Recursive mkdir applying `dir_mode` on unix
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut builder = DirBuilder::new();
        builder.recursive(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(self.config.dir_mode);
        }

        builder.create(path)?;
        Ok(())
    }

    /// Create/truncate `path` and write `bytes` into it
    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(bytes)?;

        if self.config.sync_writes {
            file.sync_all()?;
        }
        Ok(())
    }

    /// Write to a staging file, then rename it over `path`
    fn write_file_atomic(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        self.create_dir_all(&self.staging_dir)?;

        let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
        let staging = self
            .staging_dir
            .join(format!("{}-{}.tmp", std::process::id(), seq));

        let result = self
            .write_file(&staging, bytes)
            .and_then(|()| fs::rename(&staging, path).map_err(StoreError::from));

        if result.is_err() {
            // Best-effort cleanup
            let _ = fs::remove_file(&staging);
        }
        result
    }
}
