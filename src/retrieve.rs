//! Fetch the records stored under a read name.

use crate::Result;
use crate::index::{IndexEntry, ReadIndex};
use crate::source::RecordFetch;
use std::slice;

/// Pairs a loaded index with the reader for the file it was built from.
///
/// The retriever holds the reader mutably, so two fetches can never
/// interleave their seeks on the same cursor. Callers wanting concurrent
/// lookups open one reader each and share the [`ReadIndex`].
pub struct Retriever<'a, F> {
    index: &'a ReadIndex,
    fetcher: &'a mut F,
}

impl<'a, F: RecordFetch> Retriever<'a, F> {
    pub fn new(index: &'a ReadIndex, fetcher: &'a mut F) -> Self {
        Self { index, fetcher }
    }

    /// Lazily decode every record named `key`, in index order.
    ///
    /// An unknown name yields nothing. Each call runs a fresh range query.
    pub fn fetch(&mut self, key: &[u8]) -> Fetch<'_, F> {
        let entries = self.index.entries_for(key);
        if entries.is_empty() {
            tracing::debug!(read = %String::from_utf8_lossy(key), "read name not in index");
        }
        Fetch {
            entries: entries.iter(),
            fetcher: &mut *self.fetcher,
        }
    }
}

/// Iterator returned by [`Retriever::fetch`].
pub struct Fetch<'r, F> {
    entries: slice::Iter<'r, IndexEntry>,
    fetcher: &'r mut F,
}

impl<F: RecordFetch> Iterator for Fetch<'_, F> {
    type Item = Result<F::Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        let offset = entry.file_offset();
        Some(
            self.fetcher
                .seek(offset)
                .and_then(|()| self.fetcher.decode_one()),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<F: RecordFetch> ExactSizeIterator for Fetch<'_, F> {}
