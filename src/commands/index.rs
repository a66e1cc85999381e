use crate::Result;
use crate::index::{IndexBuilder, codec};
use crate::source::BamSource;
use crate::types::WriteSummary;
use std::path::Path;

/// Scan `input` and write its read-name index to `index_path`.
pub fn run(input: &Path, index_path: &Path) -> Result<WriteSummary> {
    tracing::info!(input = %input.display(), "indexing");

    let mut source = BamSource::open(input)?;
    let mut builder = IndexBuilder::new();
    let records = builder.scan(&mut source)?;

    let summary = codec::save(builder, index_path)?;
    tracing::info!(
        records,
        distinct_keys = summary.distinct_keys,
        index = %index_path.display(),
        "index written"
    );
    Ok(summary)
}
