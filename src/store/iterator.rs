//! Record Iterator
//!
//! One-shot traversal over the record files of a namespace.

use std::fs;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::codec;
use crate::error::{Result, StoreError};

/// Iterator over the records of one namespace, decoded as `T`
///
/// The list of paths is captured when the iterator is created. Records
/// written afterwards are not seen; records removed afterwards fail to
/// read when reached. The cursor advances on every `next()`, including
/// one that returns an error, unlike a cursor that only moves on success
/// and would loop forever on an unreadable record.
#[derive(Debug)]
pub struct RecordIterator<T> {
    /// Record file paths, in directory listing order
    paths: Vec<PathBuf>,
    /// Position of the next path to read
    index: usize,
    _record: PhantomData<fn() -> T>,
}

impl<T> RecordIterator<T> {
    pub(super) fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            index: 0,
            _record: PhantomData,
        }
    }

    /// True while an unconsumed path remains
    pub fn has_next(&self) -> bool {
        self.index < self.paths.len()
    }

    /// Number of records not yet read
    pub fn remaining(&self) -> usize {
        self.paths.len() - self.index
    }

    /// Path the next call to `next()` will read
    pub fn peek_path(&self) -> Option<&Path> {
        self.paths.get(self.index).map(PathBuf::as_path)
    }

    /// All paths captured at listing time
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl<T: DeserializeOwned> Iterator for RecordIterator<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.paths.get(self.index)?;
        self.index += 1;

        tracing::trace!("Reading record {}", path.display());

        let record = fs::read(path)
            .map_err(StoreError::from)
            .and_then(|bytes| codec::decode_record(&bytes));
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T: DeserializeOwned> ExactSizeIterator for RecordIterator<T> {}

impl<T: DeserializeOwned> FusedIterator for RecordIterator<T> {}
