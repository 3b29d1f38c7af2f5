//! String interning into a dedicated segment.

use indexmap::IndexMap;

use crate::segment::{Locator, Segment, SegmentId};

/// Deduplicating table of NUL-terminated strings.
///
/// Each distinct content is stored once; offsets are stable for the session.
#[derive(Debug, Default)]
pub(crate) struct StringTable {
    /// Created on first intern so string-free blobs carry no string segment.
    segment: Option<Segment>,
    offsets: IndexMap<String, u64>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locator of `s`, appending it if unseen.
    pub fn intern(&mut self, s: &str) -> Locator {
        if let Some(&offset) = self.offsets.get(s) {
            return Locator::new(SegmentId::Strings, offset);
        }

        let segment = self.segment.get_or_insert_with(Segment::new);
        let offset = segment.len() as u64;
        segment.write_bytes(s.as_bytes());
        segment.write_bytes(&[0]);
        self.offsets.insert(s.to_owned(), offset);
        tracing::trace!(offset, len = s.len(), "interned string");

        Locator::new(SegmentId::Strings, offset)
    }

    /// Number of distinct strings.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Interned strings with their offsets, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.offsets.iter().map(|(s, &offset)| (s.as_str(), offset))
    }

    /// The string segment and each interned string's offset and byte length.
    pub fn into_parts(self) -> (Option<Segment>, Vec<(u64, usize)>) {
        let entries = self
            .offsets
            .iter()
            .map(|(s, &offset)| (offset, s.len()))
            .collect();
        (self.segment, entries)
    }
}
