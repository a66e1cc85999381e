use super::{BuildEntry, KeyArena, RecordTable};
use crate::Result;
use crate::source::RecordScan;

const PROGRESS_INTERVAL: usize = 10_000;

/// Accumulates one entry per scanned record, duplicates included.
///
/// Entries stay in arrival order until the builder is handed to
/// [`codec::write`](super::codec::write), which sorts them.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    arena: KeyArena,
    table: RecordTable,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with non-default starting capacities, mostly useful to
    /// exercise growth in tests.
    pub fn with_capacities(arena_bytes: usize, entries: usize) -> Self {
        Self {
            arena: KeyArena::with_initial_capacity(arena_bytes),
            table: RecordTable::with_initial_capacity(entries),
        }
    }

    /// Record that a record named `key` starts at `offset`.
    pub fn add(&mut self, key: &[u8], offset: u64) -> Result<()> {
        let key_offset = self.arena.append(key)?;
        self.table.push(BuildEntry {
            key_offset,
            file_offset: offset,
        })
    }

    /// Add every remaining record of `source`, in file order. Returns the
    /// number of records added.
    pub fn scan<S: RecordScan>(&mut self, source: &mut S) -> Result<usize> {
        let mut added = 0;
        while let Some(record) = source.next_record()? {
            self.add(record.key, record.offset)?;
            added += 1;

            if added % PROGRESS_INTERVAL == 0 {
                tracing::debug!(
                    records = added,
                    offset = record.offset,
                    name_bytes = self.arena.len(),
                    read = %String::from_utf8_lossy(record.key),
                    "indexing"
                );
            }
        }
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Entries in arrival order.
    pub fn entries(&self) -> &[BuildEntry] {
        self.table.as_slice()
    }

    pub fn key(&self, entry: &BuildEntry) -> &[u8] {
        self.arena.get(entry.key_offset)
    }

    pub fn arena(&self) -> &KeyArena {
        &self.arena
    }

    pub(crate) fn into_parts(self) -> (KeyArena, Vec<BuildEntry>) {
        (self.arena, self.table.into_vec())
    }
}
