use crate::Result;
use crate::index::codec;
use std::io::{self, Write};
use std::path::Path;

/// Print the read name of every entry in `index_path`, one per line, in
/// index order. With `summary`, print index statistics as JSON instead.
pub fn run<W: Write>(index_path: &Path, summary: bool, mut out: W) -> Result<()> {
    let index = codec::load(index_path)?;

    if summary {
        serde_json::to_writer_pretty(&mut out, &index.summary()).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        for entry in index.entries() {
            out.write_all(index.key(entry))?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(())
}
