use crate::index::{ReadIndex, codec};
use crate::retrieve::Retriever;
use crate::source::{BamSource, KeyedRecord, RecordFetch};
use crate::types::VerifyReport;
use crate::{Error, Result};
use std::path::Path;

/// Check the index for `input` against the file itself.
pub fn run(input: &Path, index_path: &Path) -> Result<VerifyReport> {
    let index = codec::load(index_path)?;
    let mut source = BamSource::open(input)?;
    verify(&index, &mut source)
}

/// Look up every distinct read name, decode each record the lookup returns,
/// and check it carries that name. Fails unless every entry is reached
/// exactly through the lookup of its own name.
pub fn verify<F>(index: &ReadIndex, fetcher: &mut F) -> Result<VerifyReport>
where
    F: RecordFetch,
    F::Record: KeyedRecord,
{
    let mut seen = vec![false; index.len()];
    let mut retriever = Retriever::new(index, fetcher);
    let mut distinct_keys = 0;
    let mut records_checked = 0;

    let mut start = 0;
    while start < index.len() {
        let key = index.key(&index.entries()[start]);
        let name = String::from_utf8_lossy(key);

        let range = index
            .find_range(key)
            .ok_or_else(|| Error::VerifyFailed(format!("lookup for {} found nothing", name)))?;
        if range.start != start {
            return Err(Error::VerifyFailed(format!(
                "lookup for {} starts at entry {}, expected {}",
                name, range.start, start
            )));
        }

        for (i, record) in range.clone().zip(retriever.fetch(key)) {
            let record = record?;
            if record.key() != key {
                return Err(Error::VerifyFailed(format!(
                    "entry {} for {} decoded a record named {}",
                    i,
                    name,
                    String::from_utf8_lossy(record.key())
                )));
            }
            tracing::debug!(read = %name, entry = i, "verified");
            seen[i] = true;
            records_checked += 1;
        }

        distinct_keys += 1;
        start = range.end;
    }

    if let Some(missed) = seen.iter().position(|&s| !s) {
        return Err(Error::VerifyFailed(format!(
            "entry {} was never retrieved",
            missed
        )));
    }

    Ok(VerifyReport {
        entries: index.len() as u64,
        distinct_keys,
        records_checked,
    })
}
