use super::{KeyedRecord, RecordFetch, RecordScan, ScannedRecord};
use crate::{Error, Result};
use std::io;

/// In-memory record file used to exercise the index without BAM data.
pub(crate) struct MemorySource {
    records: Vec<MemoryRecord>,
    cursor: usize,
    position: Option<u64>,
    pub(crate) seeks: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MemoryRecord {
    pub(crate) key: Vec<u8>,
    pub(crate) offset: u64,
}

impl MemorySource {
    pub(crate) fn new(records: &[(&str, u64)]) -> Self {
        Self {
            records: records
                .iter()
                .map(|(key, offset)| MemoryRecord {
                    key: key.as_bytes().to_vec(),
                    offset: *offset,
                })
                .collect(),
            cursor: 0,
            position: None,
            seeks: 0,
        }
    }
}

impl RecordScan for MemorySource {
    fn next_record(&mut self) -> Result<Option<ScannedRecord<'_>>> {
        let Some(record) = self.records.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;
        Ok(Some(ScannedRecord {
            key: &record.key,
            offset: record.offset,
        }))
    }
}

impl RecordFetch for MemorySource {
    type Record = MemoryRecord;

    fn seek(&mut self, offset: u64) -> Result<()> {
        self.seeks += 1;
        if !self.records.iter().any(|r| r.offset == offset) {
            return Err(Error::Seek {
                offset,
                source: io::Error::new(io::ErrorKind::InvalidInput, "no record at offset"),
            });
        }
        self.position = Some(offset);
        Ok(())
    }

    fn decode_one(&mut self) -> Result<MemoryRecord> {
        let offset = self
            .position
            .take()
            .ok_or_else(|| Error::Decode("decode without seek".to_string()))?;
        self.records
            .iter()
            .find(|r| r.offset == offset)
            .cloned()
            .ok_or_else(|| Error::Decode(format!("no record at {}", offset)))
    }
}

impl KeyedRecord for MemoryRecord {
    fn key(&self) -> &[u8] {
        &self.key
    }
}
