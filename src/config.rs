use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "bri")]
#[command(about = "Random access to BAM records by read name")]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Extension appended to a BAM path to name its index
    #[arg(long, env = "BRI_INDEX_EXT", default_value = "bri", global = true)]
    pub index_extension: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Build the read-name index for a BAM file
    Index {
        /// BAM file to index
        input: PathBuf,
    },

    /// Write every record with the given read name to stdout as SAM
    Get {
        /// Indexed BAM file
        input: PathBuf,
        /// Read name to look up
        readname: String,
    },

    /// Print the read name of every entry in an index file
    Show {
        /// Index file (e.g. reads.bam.bri)
        index: PathBuf,
        /// Print index statistics as JSON instead of read names
        #[arg(long)]
        summary: bool,
    },

    /// Check that every indexed record can be retrieved by its read name
    Test {
        /// Indexed BAM file
        input: PathBuf,
    },

    /// Time random read-name lookups against an indexed BAM file
    Benchmark {
        /// Indexed BAM file
        input: PathBuf,
        /// Number of timed rounds
        #[arg(long, default_value = "100")]
        trials: usize,
        /// Lookups per round
        #[arg(long, default_value = "100")]
        lookups: usize,
        /// Seed for choosing read names; random if unset
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the version
    Version,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Index { .. } => "index",
            Command::Get { .. } => "get",
            Command::Show { .. } => "show",
            Command::Test { .. } => "test",
            Command::Benchmark { .. } => "benchmark",
            Command::Version => "version",
        }
    }
}

impl Config {
    /// Index file belonging to `input`.
    pub fn index_path(&self, input: &Path) -> PathBuf {
        index_path_for(input, &self.index_extension)
    }
}

/// `<source>.<extension>`, e.g. `reads.bam` -> `reads.bam.bri`.
pub fn index_path_for(source: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(source.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(index_extension: &str) -> Config {
        Config {
            log_level: "warn".to_string(),
            index_extension: index_extension.to_string(),
            command: Command::Version,
        }
    }

    #[test]
    fn test_index_path_default() {
        let config = config("bri");
        assert_eq!(
            config.index_path(Path::new("data/reads.bam")),
            PathBuf::from("data/reads.bam.bri")
        );
    }

    #[test]
    fn test_index_path_custom_extension() {
        let config = config("names");
        assert_eq!(
            config.index_path(Path::new("/tmp/sample.bam")),
            PathBuf::from("/tmp/sample.bam.names")
        );
    }

    #[test]
    fn test_parse_get() {
        let config = Config::try_parse_from(["bri", "get", "reads.bam", "read:1/2"]).unwrap();
        assert_eq!(config.index_extension, "bri");
        match config.command {
            Command::Get { input, readname } => {
                assert_eq!(input, PathBuf::from("reads.bam"));
                assert_eq!(readname, "read:1/2");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flag_after_subcommand() {
        let config =
            Config::try_parse_from(["bri", "index", "reads.bam", "--index-extension", "idx"])
                .unwrap();
        assert_eq!(config.index_extension, "idx");
        assert_eq!(config.command.name(), "index");
    }

    #[test]
    fn test_parse_requires_arguments() {
        assert!(Config::try_parse_from(["bri", "get", "reads.bam"]).is_err());
        assert!(Config::try_parse_from(["bri"]).is_err());
    }
}
