use crate::Result;
use crate::index::codec;
use crate::retrieve::Retriever;
use crate::source::BamSource;
use noodles::sam;
use noodles::sam::alignment::io::Write as _;
use std::io::Write;
use std::path::Path;

/// Write every record named `readname` to `out` as SAM, without a header.
/// Returns the number of records written.
pub fn run<W: Write>(input: &Path, index_path: &Path, readname: &[u8], out: W) -> Result<usize> {
    let index = codec::load(index_path)?;
    let mut source = BamSource::open(input)?;
    let header = source.header().clone();

    let mut writer = sam::io::Writer::new(out);
    let mut retriever = Retriever::new(&index, &mut source);

    let mut written = 0;
    for record in retriever.fetch(readname) {
        let record = record?;
        writer.write_alignment_record(&header, &record)?;
        written += 1;
    }
    writer.get_mut().flush()?;

    tracing::debug!(
        read = %String::from_utf8_lossy(readname),
        records = written,
        "get finished"
    );
    Ok(written)
}
