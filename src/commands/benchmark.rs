use crate::Result;
use crate::index::{ReadIndex, codec};
use crate::retrieve::Retriever;
use crate::source::{BamSource, RecordFetch};
use crate::types::BenchmarkTrial;
use noodles::bam;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct Options {
    pub trials: usize,
    pub lookups: usize,
    pub seed: Option<u64>,
}

/// Time `options.trials` rounds of `options.lookups` lookups, each decoding
/// every record for a randomly chosen read name.
///
/// One progress line per round goes to `out`; the CLI passes stderr so the
/// timings never mix with record output.
pub fn run<W: Write>(
    input: &Path,
    index_path: &Path,
    options: &Options,
    out: W,
) -> Result<Vec<BenchmarkTrial>> {
    let index = codec::load(index_path)?;
    let mut source = BamSource::open(input)?;
    let names = sample_names(&index, options);

    trials(
        &index,
        &mut source,
        &names,
        options.trials,
        out,
        |record: &bam::Record| record.sequence().len() as u64,
    )
}

/// Read names to look up: drawn from the index entries, so names with many
/// records are proportionally more likely.
fn sample_names<'a>(index: &'a ReadIndex, options: &Options) -> Vec<&'a [u8]> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut names: Vec<&[u8]> = index.entries().iter().map(|e| index.key(e)).collect();
    names.shuffle(&mut rng);
    names.truncate(options.lookups);
    names
}

fn trials<F, W>(
    index: &ReadIndex,
    fetcher: &mut F,
    names: &[&[u8]],
    count: usize,
    mut out: W,
    bases: impl Fn(&F::Record) -> u64,
) -> Result<Vec<BenchmarkTrial>>
where
    F: RecordFetch,
    W: Write,
{
    let mut retriever = Retriever::new(index, fetcher);
    let mut results = Vec::with_capacity(count);

    for trial in 0..count {
        let started = Instant::now();
        let mut records = 0;
        let mut base_count = 0;

        for name in names {
            for record in retriever.fetch(name) {
                base_count += bases(&record?);
                records += 1;
            }
        }

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        writeln!(out, "bases read: {} time: {:.2}ms", base_count, elapsed_ms)?;
        results.push(BenchmarkTrial {
            trial,
            lookups: names.len(),
            records,
            bases: base_count,
            elapsed_ms,
        });
    }
    out.flush()?;

    Ok(results)
}
