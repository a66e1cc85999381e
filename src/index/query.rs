use super::{IndexEntry, ReadIndex};
use std::ops::Range;

impl ReadIndex {
    /// Range of entries whose read name is exactly `key`, or `None` when no
    /// entry has it.
    ///
    /// Binary search lands on an arbitrary member of the run of equal names;
    /// the run is then widened in both directions. Cost is O(log n + m) for
    /// m matching entries.
    pub fn find_range(&self, key: &[u8]) -> Option<Range<usize>> {
        let entries = self.entries();
        let hit = entries.binary_search_by(|e| self.key(e).cmp(key)).ok()?;

        let mut start = hit;
        while start > 0 && self.key(&entries[start - 1]) == key {
            start -= 1;
        }

        let mut end = hit + 1;
        while end < entries.len() && self.key(&entries[end]) == key {
            end += 1;
        }

        Some(start..end)
    }

    /// Entries for `key`; empty if the name is not indexed.
    pub fn entries_for(&self, key: &[u8]) -> &[IndexEntry] {
        match self.find_range(key) {
            Some(range) => &self.entries()[range],
            None => &[],
        }
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.find_range(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use crate::index::{IndexBuilder, ReadIndex, codec};
    use std::collections::BTreeMap;
    use std::io::Cursor;

    fn round_trip(pairs: &[(&str, u64)]) -> ReadIndex {
        let mut builder = IndexBuilder::new();
        for (key, offset) in pairs {
            builder.add(key.as_bytes(), *offset).unwrap();
        }
        let mut buf = Cursor::new(Vec::new());
        codec::write(builder, &mut buf).unwrap();
        buf.set_position(0);
        codec::read(&mut buf).unwrap()
    }

    fn sample() -> Vec<(String, u64)> {
        // multi-mapped names repeat, scattered across the file
        let mut pairs = Vec::new();
        for i in 0..500u64 {
            let name = format!("read{:03}", (i * 7919) % 173);
            pairs.push((name, i * 64));
        }
        pairs
    }

    #[test]
    fn test_scenario() {
        let index = round_trip(&[("readA", 100), ("readB", 200), ("readA", 300)]);

        let a = index.find_range(b"readA").unwrap();
        assert_eq!(a.len(), 2);
        let mut offsets: Vec<u64> = index.entries()[a].iter().map(|e| e.file_offset()).collect();
        offsets.sort();
        assert_eq!(offsets, vec![100, 300]);

        let b = index.find_range(b"readB").unwrap();
        assert_eq!(b.len(), 1);
        assert_eq!(index.entries()[b][0].file_offset(), 200);

        assert_eq!(index.find_range(b"readC"), None);
        assert_eq!(index.key_segment(), b"readA\0readB\0");
    }

    #[test]
    fn test_range_is_maximal() {
        let pairs = sample();
        let refs: Vec<(&str, u64)> = pairs.iter().map(|(k, o)| (k.as_str(), *o)).collect();
        let index = round_trip(&refs);

        let mut expected: BTreeMap<&str, Vec<u64>> = BTreeMap::new();
        for (key, offset) in &refs {
            expected.entry(*key).or_default().push(*offset);
        }

        for (key, offsets) in &expected {
            let key = key.as_bytes();
            let range = index.find_range(key).unwrap();

            for entry in &index.entries()[range.clone()] {
                assert_eq!(index.key(entry), key);
            }
            if range.start > 0 {
                assert_ne!(index.key(&index.entries()[range.start - 1]), key);
            }
            if range.end < index.len() {
                assert_ne!(index.key(&index.entries()[range.end]), key);
            }

            let mut found: Vec<u64> = index
                .entries_for(key)
                .iter()
                .map(|e| e.file_offset())
                .collect();
            found.sort();
            let mut offsets = offsets.clone();
            offsets.sort();
            assert_eq!(found, offsets);
        }
    }

    #[test]
    fn test_absent_keys() {
        let index = round_trip(&[("b", 1), ("d", 2), ("d", 3), ("f", 4)]);

        let absent: [&[u8]; 7] = [b"a", b"c", b"e", b"g", b"", b"D", b"dd"];
        for key in absent {
            assert_eq!(index.find_range(key), None);
            assert!(index.entries_for(key).is_empty());
            assert!(!index.contains(key));
        }
    }

    #[test]
    fn test_run_at_both_ends() {
        let index = round_trip(&[("a", 1), ("a", 2), ("m", 3), ("z", 4), ("z", 5), ("z", 6)]);
        assert_eq!(index.find_range(b"a"), Some(0..2));
        assert_eq!(index.find_range(b"m"), Some(2..3));
        assert_eq!(index.find_range(b"z"), Some(3..6));
    }

    #[test]
    fn test_single_key_index() {
        let index = round_trip(&[("only", 1), ("only", 2), ("only", 3)]);
        assert_eq!(index.find_range(b"only"), Some(0..3));
    }

    #[test]
    fn test_empty_index() {
        let index = round_trip(&[]);
        assert!(index.is_empty());
        assert_eq!(index.find_range(b"readA"), None);
    }

    #[test]
    fn test_query_is_idempotent() {
        let index = round_trip(&[("x", 1), ("y", 2), ("x", 3)]);
        let first = index.find_range(b"x");
        let second = index.find_range(b"x");
        assert_eq!(first, second);
        assert_eq!(first, Some(0..2));
    }

    #[test]
    fn test_case_sensitive() {
        let index = round_trip(&[("Read1", 1), ("read1", 2)]);
        assert_eq!(index.entries_for(b"Read1")[0].file_offset(), 1);
        assert_eq!(index.entries_for(b"read1")[0].file_offset(), 2);
        assert_eq!(index.find_range(b"READ1"), None);
    }
}
