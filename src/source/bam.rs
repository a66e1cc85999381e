use super::{KeyedRecord, RecordFetch, RecordScan, ScannedRecord};
use crate::{Error, Result};
use noodles::bam;
use noodles::bgzf;
use noodles::sam;
use std::fs::File;
use std::path::Path;

/// Read name BAM uses for records without one.
const MISSING_NAME: &[u8] = b"*";

/// A BAM file opened for scanning and random access.
///
/// Offsets are BGZF virtual positions taken just before each record, so they
/// can be handed straight back to [`RecordFetch::seek`].
pub struct BamSource {
    // bam::io::Reader::new wraps the file in a BGZF reader internally
    reader: bam::io::Reader<bgzf::Reader<File>>,
    header: sam::Header,
    record: bam::Record,
}

impl BamSource {
    /// Open `path` and consume its header.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::SourceOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let mut reader = bam::io::Reader::new(file);
        let header = reader
            .read_header()
            .map_err(|e| Error::Decode(format!("failed to read BAM header: {}", e)))?;

        Ok(Self {
            reader,
            header,
            record: bam::Record::default(),
        })
    }

    pub fn header(&self) -> &sam::Header {
        &self.header
    }

    fn virtual_position(&self) -> u64 {
        u64::from(self.reader.get_ref().virtual_position())
    }
}

impl RecordScan for BamSource {
    fn next_record(&mut self) -> Result<Option<ScannedRecord<'_>>> {
        let offset = self.virtual_position();

        let n = self.reader.read_record(&mut self.record).map_err(|e| {
            Error::Decode(format!("failed to read BAM record at {}: {}", offset, e))
        })?;
        if n == 0 {
            return Ok(None);
        }

        Ok(Some(ScannedRecord {
            key: self.record.key(),
            offset,
        }))
    }
}

impl RecordFetch for BamSource {
    type Record = bam::Record;

    fn seek(&mut self, offset: u64) -> Result<()> {
        // virtual-position seeks live on the inner BGZF reader
        self.reader
            .get_mut()
            .seek(bgzf::VirtualPosition::from(offset))
            .map_err(|source| Error::Seek { offset, source })?;
        Ok(())
    }

    fn decode_one(&mut self) -> Result<bam::Record> {
        let mut record = bam::Record::default();
        let n = self
            .reader
            .read_record(&mut record)
            .map_err(|e| Error::Decode(format!("failed to read BAM record: {}", e)))?;
        if n == 0 {
            return Err(Error::Decode(
                "unexpected end of file at indexed offset".to_string(),
            ));
        }
        Ok(record)
    }
}

impl KeyedRecord for bam::Record {
    fn key(&self) -> &[u8] {
        match self.name() {
            Some(name) => name,
            None => MISSING_NAME,
        }
    }
}
