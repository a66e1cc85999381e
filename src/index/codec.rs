//! Reading and writing index files.

use super::{IndexBuilder, ReadIndex};
use crate::types::WriteSummary;
use crate::{Error, Result};
use bytes::{Buf, BufMut, BytesMut};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub const FORMAT_VERSION: u64 = 1;

/// Header size: version, key segment length, entry count.
pub const HEADER_LEN: usize = 24;

/// Encoded entry size: key offset, file offset.
pub const ENTRY_LEN: usize = 16;

/// Byte position of the key segment length within the header.
const KEY_LENGTH_POSITION: u64 = 8;

/// Entries encoded per write call.
const ENTRY_CHUNK: usize = 4096;

/// Sort the builder's entries by read name and write them to `writer`.
///
/// Each distinct name is written once. Entries refer to it by its offset in
/// the key segment, which is why names go out first and entries second. The
/// key segment length is only known at the end and is patched into the
/// header last.
pub fn write<W: Write + Seek>(builder: IndexBuilder, writer: &mut W) -> Result<WriteSummary> {
    let (arena, mut entries) = builder.into_parts();

    // stable: equal names keep their scan order
    entries.sort_by(|a, b| arena.get(a.key_offset).cmp(arena.get(b.key_offset)));

    let start = writer.stream_position()?;
    writer.write_all(&encode_header(FORMAT_VERSION, 0, entries.len() as u64))?;

    // Pass 1: names, each once, remembering where every entry's name landed
    let mut disk_offsets: Vec<u64> = Vec::new();
    disk_offsets
        .try_reserve_exact(entries.len())
        .map_err(|_| Error::AllocationFailure(entries.len() * 8))?;

    let mut key_bytes: u64 = 0;
    let mut distinct_keys: u64 = 0;
    let mut current: u64 = 0;
    let mut previous: Option<&[u8]> = None;

    for entry in &entries {
        let key = arena.get(entry.key_offset);
        if previous != Some(key) {
            debug_assert!(
                previous.is_none_or(|prev| prev < key),
                "entries not sorted by read name"
            );
            current = key_bytes;
            writer.write_all(key)?;
            writer.write_all(&[0])?;
            key_bytes += key.len() as u64 + 1;
            distinct_keys += 1;
            previous = Some(key);
        }
        disk_offsets.push(current);
    }

    // Pass 2: entries, pointing at the segment rather than the arena
    let mut buf = BytesMut::with_capacity(ENTRY_LEN * ENTRY_CHUNK);
    for (entry, disk_offset) in entries.iter().zip(&disk_offsets) {
        buf.put_u64_le(*disk_offset);
        buf.put_u64_le(entry.file_offset);
        if buf.len() >= ENTRY_LEN * ENTRY_CHUNK {
            writer.write_all(&buf)?;
            buf.clear();
        }
    }
    writer.write_all(&buf)?;

    let end = writer.stream_position()?;
    writer.seek(SeekFrom::Start(start + KEY_LENGTH_POSITION))?;
    writer.write_all(&key_bytes.to_le_bytes())?;
    writer.seek(SeekFrom::Start(end))?;
    writer.flush()?;

    Ok(WriteSummary {
        entries: entries.len() as u64,
        distinct_keys,
        key_bytes,
    })
}

/// Write the index to `path`.
///
/// The file is written next to `path` under a temporary name, synced, and
/// renamed into place, so `path` never holds a partial index. On failure the
/// temporary file is removed.
pub fn save<P: AsRef<Path>>(builder: IndexBuilder, path: P) -> Result<WriteSummary> {
    let path = path.as_ref();
    let tmp_path = temporary_path(path);

    let result = write_synced(builder, &tmp_path).and_then(|summary| {
        fs::rename(&tmp_path, path)?;
        Ok(summary)
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    let summary = result?;

    tracing::debug!(
        path = %path.display(),
        entries = summary.entries,
        distinct_keys = summary.distinct_keys,
        key_bytes = summary.key_bytes,
        "saved index"
    );

    Ok(summary)
}

fn write_synced(builder: IndexBuilder, path: &Path) -> Result<WriteSummary> {
    let file = File::create(path).map_err(|source| Error::SourceOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let summary = write(builder, &mut writer)?;

    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(summary)
}

/// Read an index previously produced by [`write`].
pub fn read<R: Read>(reader: &mut R) -> Result<ReadIndex> {
    let mut header = [0u8; HEADER_LEN];
    reader
        .read_exact(&mut header)
        .map_err(|e| Error::from_index_read(e, "header"))?;

    let mut buf = &header[..];
    let version = buf.get_u64_le();
    let key_len = buf.get_u64_le();
    let entry_count = buf.get_u64_le();

    if version != FORMAT_VERSION {
        return Err(Error::UnsupportedVersion(version));
    }

    let key_len = usize::try_from(key_len)
        .map_err(|_| Error::CorruptIndex(format!("key segment of {} bytes", key_len)))?;
    let entry_len = usize::try_from(entry_count)
        .ok()
        .and_then(|n| n.checked_mul(ENTRY_LEN))
        .ok_or_else(|| Error::CorruptIndex(format!("entry count {}", entry_count)))?;

    let keys = read_segment(reader, key_len, "key segment")?;
    let raw_entries = read_segment(reader, entry_len, "entries")?;

    ReadIndex::resolve(keys, &raw_entries)
}

/// Load the index file at `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<ReadIndex> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::IndexNotFound(path.to_path_buf()),
        _ => Error::SourceOpen {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let index = read(&mut BufReader::new(file))?;
    tracing::debug!(path = %path.display(), entries = index.len(), "loaded index");
    Ok(index)
}

fn encode_header(version: u64, key_len: u64, entry_count: u64) -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];
    let mut buf = &mut header[..];
    buf.put_u64_le(version);
    buf.put_u64_le(key_len);
    buf.put_u64_le(entry_count);
    header
}

/// Read exactly `len` bytes. The buffer grows with the data actually read, so
/// a corrupt length in the header cannot force a huge allocation up front.
fn read_segment<R: Read>(reader: &mut R, len: usize, what: &str) -> Result<Vec<u8>> {
    const MAX_PREALLOCATION: usize = 64 * 1024 * 1024;

    let mut buf = Vec::new();
    let reserve = len.min(MAX_PREALLOCATION);
    buf.try_reserve_exact(reserve)
        .map_err(|_| Error::AllocationFailure(reserve))?;

    reader
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut buf)
        .map_err(|e| Error::from_index_read(e, what))?;

    if buf.len() < len {
        return Err(Error::TruncatedIndex(format!(
            "{} has {} bytes, header promises {}",
            what,
            buf.len(),
            len
        )));
    }
    Ok(buf)
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
