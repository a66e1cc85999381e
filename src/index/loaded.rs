use super::codec::{ENTRY_LEN, FORMAT_VERSION};
use crate::types::IndexSummary;
use crate::{Error, Result};
use bytes::Buf;

/// Location of a read name inside the loaded key segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeySpan {
    start: usize,
    len: usize,
}

/// An entry of a loaded index, its read name already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    key: KeySpan,
    file_offset: u64,
}

impl IndexEntry {
    /// BGZF virtual position of the record in the indexed file.
    pub fn file_offset(&self) -> u64 {
        self.file_offset
    }
}

/// A loaded, read-only index.
///
/// Entries are sorted by read name, and each distinct name appears once in
/// the key segment. Nothing mutates a `ReadIndex` after load, so it can be
/// shared across threads that each hold their own record reader.
#[derive(Debug)]
pub struct ReadIndex {
    keys: Box<[u8]>,
    entries: Box<[IndexEntry]>,
}

impl ReadIndex {
    /// Turn raw on-disk entries into resolved ones.
    ///
    /// `raw_entries` must be a whole number of encoded entries.
    pub(crate) fn resolve(keys: Vec<u8>, raw_entries: &[u8]) -> Result<Self> {
        debug_assert_eq!(raw_entries.len() % ENTRY_LEN, 0);

        let count = raw_entries.len() / ENTRY_LEN;
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(count)
            .map_err(|_| Error::AllocationFailure(count * std::mem::size_of::<IndexEntry>()))?;

        // consecutive entries for the same name share one disk offset
        let mut last: Option<(u64, KeySpan)> = None;
        for mut chunk in raw_entries.chunks_exact(ENTRY_LEN) {
            let disk_offset = chunk.get_u64_le();
            let file_offset = chunk.get_u64_le();

            let key = match last {
                Some((offset, span)) if offset == disk_offset => span,
                _ => {
                    let span = resolve_span(&keys, disk_offset)?;
                    last = Some((disk_offset, span));
                    span
                }
            };
            entries.push(IndexEntry { key, file_offset });
        }

        Ok(Self {
            keys: keys.into_boxed_slice(),
            entries: entries.into_boxed_slice(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, sorted by read name.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Read name of `entry`, without its terminator.
    pub fn key(&self, entry: &IndexEntry) -> &[u8] {
        let KeySpan { start, len } = entry.key;
        &self.keys[start..start + len]
    }

    /// The deduplicated key segment exactly as stored on disk.
    pub fn key_segment(&self) -> &[u8] {
        &self.keys
    }

    /// Number of distinct read names.
    pub fn distinct_keys(&self) -> usize {
        self.keys.iter().filter(|&&b| b == 0).count()
    }

    pub fn summary(&self) -> IndexSummary {
        IndexSummary {
            version: FORMAT_VERSION,
            entries: self.len() as u64,
            distinct_keys: self.distinct_keys() as u64,
            key_bytes: self.keys.len() as u64,
        }
    }
}

fn resolve_span(keys: &[u8], disk_offset: u64) -> Result<KeySpan> {
    let start = usize::try_from(disk_offset)
        .ok()
        .filter(|&start| start < keys.len())
        .ok_or_else(|| {
            Error::CorruptIndex(format!(
                "key offset {} outside key segment of {} bytes",
                disk_offset,
                keys.len()
            ))
        })?;

    let len = keys[start..]
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::CorruptIndex(format!("unterminated key at offset {}", start)))?;

    Ok(KeySpan { start, len })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BufMut;

    fn raw(entries: &[(u64, u64)]) -> Vec<u8> {
        let mut buf = Vec::new();
        for (disk_offset, file_offset) in entries {
            buf.put_u64_le(*disk_offset);
            buf.put_u64_le(*file_offset);
        }
        buf
    }

    #[test]
    fn test_resolve() {
        let keys = b"readA\0readB\0".to_vec();
        let index = ReadIndex::resolve(keys, &raw(&[(0, 100), (0, 300), (6, 200)])).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.distinct_keys(), 2);

        let resolved: Vec<(&[u8], u64)> = index
            .entries()
            .iter()
            .map(|e| (index.key(e), e.file_offset()))
            .collect();
        assert_eq!(
            resolved,
            vec![
                (&b"readA"[..], 100),
                (&b"readA"[..], 300),
                (&b"readB"[..], 200)
            ]
        );
        assert_eq!(index.entries()[0].key, index.entries()[1].key);
    }

    #[test]
    fn test_resolve_offset_out_of_bounds() {
        let keys = b"readA\0".to_vec();
        let err = ReadIndex::resolve(keys, &raw(&[(6, 100)])).unwrap_err();
        assert!(matches!(err, Error::CorruptIndex(_)));
    }

    #[test]
    fn test_resolve_unterminated_key() {
        let keys = b"readA".to_vec();
        let err = ReadIndex::resolve(keys, &raw(&[(0, 100)])).unwrap_err();
        assert!(matches!(err, Error::CorruptIndex(ref m) if m.contains("unterminated")));
    }

    #[test]
    fn test_summary() {
        let keys = b"a\0bb\0".to_vec();
        let index = ReadIndex::resolve(keys, &raw(&[(0, 1), (2, 2), (2, 3)])).unwrap();
        let summary = index.summary();
        assert_eq!(summary.version, 1);
        assert_eq!(summary.entries, 3);
        assert_eq!(summary.distinct_keys, 2);
        assert_eq!(summary.key_bytes, 5);
    }
}
