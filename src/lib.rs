//! # SnowStore
//!
//! A minimal filesystem-backed key-value store with:
//! - An optional two-level namespace (parent / key)
//! - One bincode-encoded, checksummed file per record
//! - Namespace enumeration by directory listing
//! - No caching, no index, no locking
//!
//! ## On-Disk Layout
//!
//! ```text
//! {base_dir}/
//!   ├── data/
//!   │   ├── {key}                (root namespace, parent = "")
//!   │   └── {parent}/
//!   │       ├── {key}
//!   │       └── {key}
//!   └── staging/                 (only used with WriteMode::Atomic)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//! use snowstore::SnowStore;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Person {
//!     id: u32,
//!     name: String,
//! }
//!
//! let store = SnowStore::open_path("./snowstore").unwrap();
//! store.set("42", "1", &Person { id: 1, name: "Mike".into() }).unwrap();
//!
//! let person: Person = store.get("42", "1").unwrap();
//! assert_eq!(person.name, "Mike");
//!
//! for record in store.get_by_parent::<Person>("42").unwrap() {
//!     println!("{}", record.unwrap().name);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StoreError, Result};
pub use config::{Config, WriteMode};
pub use store::{RecordIterator, SnowStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SnowStore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
