pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod retrieve;
pub mod source;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use index::{IndexBuilder, ReadIndex};
pub use retrieve::Retriever;
