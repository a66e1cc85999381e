use super::growth;
use crate::{Error, Result};

/// Initial arena capacity: 1 MiB of read names.
pub const DEFAULT_ARENA_CAPACITY: usize = 1024 * 1024;

/// Append-only block of NUL-terminated read names.
///
/// Offsets handed out by [`KeyArena::append`] stay valid for the arena's
/// whole lifetime. The logical capacity starts at the configured initial size
/// and doubles whenever the next key would not fit.
#[derive(Debug)]
pub struct KeyArena {
    bytes: Vec<u8>,
    capacity: usize,
    initial_capacity: usize,
}

impl Default for KeyArena {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyArena {
    pub fn new() -> Self {
        Self::with_initial_capacity(DEFAULT_ARENA_CAPACITY)
    }

    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self {
            bytes: Vec::new(),
            capacity: 0,
            initial_capacity,
        }
    }

    /// Copy `key` and its terminator into the arena, returning the offset of
    /// its first byte.
    pub fn append(&mut self, key: &[u8]) -> Result<u64> {
        if key.contains(&0) {
            return Err(Error::InvalidKey(format!(
                "read name contains a NUL byte: {:?}",
                String::from_utf8_lossy(key)
            )));
        }

        let len = key.len() + 1;
        let required = self
            .bytes
            .len()
            .checked_add(len)
            .ok_or(Error::OversizedKey {
                len,
                capacity: self.capacity,
            })?;

        if required > self.capacity {
            let grown = growth::next_capacity(self.capacity, self.initial_capacity);
            // one doubling must be enough for any single name
            if grown < required {
                return Err(Error::OversizedKey {
                    len,
                    capacity: grown,
                });
            }
            tracing::trace!(capacity = grown, "growing key arena");
            growth::reserve_to(&mut self.bytes, grown)?;
            self.capacity = grown;
        }

        let offset = self.bytes.len() as u64;
        self.bytes.extend_from_slice(key);
        self.bytes.push(0);
        Ok(offset)
    }

    /// Key stored at `offset`, without its terminator.
    ///
    /// # Panics
    ///
    /// Panics if `offset` lies past the end of the arena. Offsets returned by
    /// [`KeyArena::append`] never do.
    pub fn get(&self, offset: u64) -> &[u8] {
        let tail = &self.bytes[offset as usize..];
        let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        &tail[..end]
    }

    /// Bytes in use, terminators included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
