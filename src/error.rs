use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to allocate {0} bytes")]
    AllocationFailure(usize),

    #[error("key of {len} bytes does not fit in an arena of {capacity} bytes")]
    OversizedKey { len: usize, capacity: usize },

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("failed to open {}: {source}", path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("index file not found: {}", .0.display())]
    IndexNotFound(PathBuf),

    #[error("truncated index: {0}")]
    TruncatedIndex(String),

    #[error("unsupported index version: {0}")]
    UnsupportedVersion(u64),

    #[error("corrupt index: {0}")]
    CorruptIndex(String),

    #[error("seek to offset {offset} failed: {source}")]
    Seek {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode record: {0}")]
    Decode(String),

    #[error("verification failed: {0}")]
    VerifyFailed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Maps an unexpected EOF into [`Error::TruncatedIndex`], leaving other
    /// I/O failures as they are.
    pub(crate) fn from_index_read(e: std::io::Error, what: &str) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::TruncatedIndex(format!("unexpected end of file while reading {}", what))
        } else {
            Error::Io(e)
        }
    }
}
