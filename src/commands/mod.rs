//! Subcommands of the `bri` binary.
//!
//! Each subcommand returns a typed error; `main` reports it and exits.

pub mod benchmark;
pub mod get;
pub mod index;
pub mod show;
pub mod verify;

use crate::Result;
use crate::config::{Command, Config};
use std::io::{self, BufWriter};

pub fn run(config: &Config) -> Result<()> {
    match &config.command {
        Command::Index { input } => {
            index::run(input, &config.index_path(input))?;
        }
        Command::Get { input, readname } => {
            let stdout = BufWriter::new(io::stdout().lock());
            get::run(input, &config.index_path(input), readname.as_bytes(), stdout)?;
        }
        Command::Show { index, summary } => {
            let stdout = BufWriter::new(io::stdout().lock());
            show::run(index, *summary, stdout)?;
        }
        Command::Test { input } => {
            let report = verify::run(input, &config.index_path(input))?;
            tracing::info!(
                entries = report.entries,
                distinct_keys = report.distinct_keys,
                "all indexed records retrieved"
            );
        }
        Command::Benchmark {
            input,
            trials,
            lookups,
            seed,
        } => {
            let options = benchmark::Options {
                trials: *trials,
                lookups: *lookups,
                seed: *seed,
            };
            let index_path = config.index_path(input);
            benchmark::run(input, &index_path, &options, io::stderr().lock())?;
        }
        Command::Version => {
            println!("bri {}", env!("CARGO_PKG_VERSION"));
        }
    }
    Ok(())
}
