use super::growth;
use crate::Result;

/// Initial number of entries the table allocates room for.
pub const DEFAULT_TABLE_CAPACITY: usize = 1024;

/// One scanned record: where its read name sits in the [`KeyArena`] and
/// where the record starts in the BAM file.
///
/// [`KeyArena`]: super::KeyArena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildEntry {
    pub key_offset: u64,
    pub file_offset: u64,
}

/// Growable, arrival-ordered sequence of [`BuildEntry`] values.
#[derive(Debug)]
pub struct RecordTable {
    entries: Vec<BuildEntry>,
    capacity: usize,
    initial_capacity: usize,
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordTable {
    pub fn new() -> Self {
        Self::with_initial_capacity(DEFAULT_TABLE_CAPACITY)
    }

    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: 0,
            initial_capacity,
        }
    }

    pub fn push(&mut self, entry: BuildEntry) -> Result<()> {
        if self.entries.len() == self.capacity {
            let grown = growth::next_capacity(self.capacity, self.initial_capacity);
            growth::reserve_to(&mut self.entries, grown)?;
            self.capacity = grown;
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[BuildEntry] {
        &self.entries
    }

    pub(crate) fn into_vec(self) -> Vec<BuildEntry> {
        self.entries
    }
}
