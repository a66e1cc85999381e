//! Access to the record file the index points into.
//!
//! The index only needs two things from a record file:
//!
//! - [`RecordScan`] walks the file from its first record, yielding each
//!   record's read name and the offset it starts at.
//! - [`RecordFetch`] seeks to a stored offset and decodes exactly one record.
//!
//! [`BamSource`] implements both for BGZF-compressed BAM files using noodles.

mod bam;
#[cfg(test)]
pub(crate) mod memory;

pub use bam::BamSource;

use crate::Result;

/// A record seen during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedRecord<'a> {
    pub key: &'a [u8],
    pub offset: u64,
}

/// Sequential iteration over a record file, in file order.
pub trait RecordScan {
    /// Next record, or `None` at end of file.
    fn next_record(&mut self) -> Result<Option<ScannedRecord<'_>>>;
}

/// Random access to single records by stored offset.
///
/// A fetcher holds one cursor, so a seek must be followed by its decode with
/// no other seek in between.
pub trait RecordFetch {
    type Record;

    fn seek(&mut self, offset: u64) -> Result<()>;

    /// Decode the record starting at the current position.
    fn decode_one(&mut self) -> Result<Self::Record>;
}

/// Records that carry the read name they were indexed under.
pub trait KeyedRecord {
    fn key(&self) -> &[u8];
}
