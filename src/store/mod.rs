//! Store Module
//!
//! Maps logical (parent, key) addresses onto the filesystem.
//!
//! ## Responsibilities
//! - Compose record paths: `{base_dir}/data/{parent}/{key}`
//! - Create namespace directories on demand
//! - Read, write and remove record files
//! - Enumerate a namespace by listing its directory
//!
//! ## Guarantees (and lack thereof)
//! - No locking: concurrent writers to the same address race, last write wins
//! - No cross-key transactions
//! - Namespace iteration order is whatever the directory listing yields
//! - An iterator is a snapshot of the listing, not of the records

mod iterator;
mod snow_store;

pub use iterator::RecordIterator;
pub use snow_store::SnowStore;
