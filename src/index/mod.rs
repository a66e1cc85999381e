//! Read-name index over a BGZF-compressed BAM file.
//!
//! The index is built in two phases that never share a representation:
//!
//! - [`IndexBuilder`] accumulates one [`BuildEntry`] per scanned record. Each
//!   entry refers to its read name by offset into a [`KeyArena`].
//! - [`ReadIndex`] is what [`codec::read`] produces from disk. Its entries
//!   hold resolved spans into a deduplicated, sorted key segment and are
//!   immutable.
//!
//! # On-disk layout (version 1)
//!
//! ```text
//! 0    u64 version
//! 8    u64 key segment length (bytes)
//! 16   u64 entry count
//! 24   key segment: NUL-terminated read names, sorted, each stored once
//! 24+L entries: { u64 key offset in segment; u64 BGZF virtual position }
//! ```
//!
//! All integers are little-endian.

pub mod arena;
pub mod builder;
pub mod codec;
mod growth;
pub mod loaded;
mod query;
pub mod table;

pub use arena::KeyArena;
pub use builder::IndexBuilder;
pub use loaded::{IndexEntry, ReadIndex};
pub use table::{BuildEntry, RecordTable};
