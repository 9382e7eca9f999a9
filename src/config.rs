//! Configuration for SnowStore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, StoreError};

/// Main configuration for a SnowStore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Base directory for all store files
    /// Internal structure:
    ///   {base_dir}/
    ///     ├── data/            (namespace directories and record files)
    ///     └── staging/         (temp files for atomic writes)
    pub base_dir: PathBuf,

    /// Permission bits applied to directories the store creates (unix only)
    pub dir_mode: u32,

    // -------------------------------------------------------------------------
    // Write Configuration
    // -------------------------------------------------------------------------
    /// How record files are replaced on `set`
    pub write_mode: WriteMode,

    /// fsync each record file before `set` returns
    pub sync_writes: bool,
}

/// Write strategy for record files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create/truncate the target and write in place.
    /// A crash mid-write can leave a truncated record.
    Direct,

    /// Write to a staging file, then rename over the target.
    Atomic,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("./snowstore"),
            dir_mode: 0o774,
            write_mode: WriteMode::Direct,
            sync_writes: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the config before a store is opened with it
    pub fn validate(&self) -> Result<()> {
        if self.base_dir.as_os_str().is_empty() {
            return Err(StoreError::Config("base_dir must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the base directory (root for all storage)
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.base_dir = path.into();
        self
    }

    /// Set the permission bits for created directories
    pub fn dir_mode(mut self, mode: u32) -> Self {
        self.config.dir_mode = mode;
        self
    }

    /// Set the write mode
    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.config.write_mode = mode;
        self
    }

    /// Enable or disable fsync after each write
    pub fn sync_writes(mut self, sync: bool) -> Self {
        self.config.sync_writes = sync;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
