//! Segment store: growable byte buffers in creation order.
//!
//! The root object is written into segment 0. Each pointer target gets a fresh
//! segment, so a child never interleaves with the parent still being written.
//! The store keeps the path of open parents to return to.

use std::fmt;

use blobct_core::{Endian, is_power_of_two, padding_for};

use crate::{BlobError, Result};

/// Identifies a segment in the final layout.
///
/// Object segments are laid out in creation order, then the string segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentId {
    /// Object segment by creation index; 0 is the root.
    Object(usize),
    /// Interned strings.
    Strings,
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentId::Object(index) => write!(f, "G{index}"),
            SegmentId::Strings => f.write_str("S"),
        }
    }
}

/// A (segment, offset) pair, resolved to an absolute offset at output time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Locator {
    pub segment: SegmentId,
    pub offset: u64,
}

impl Locator {
    pub fn new(segment: SegmentId, offset: u64) -> Self {
        Self { segment, offset }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.segment, self.offset)
    }
}

/// Growable byte buffer with the strictest alignment ever requested of it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Segment {
    bytes: Vec<u8>,
    /// 0 until the first alignment request.
    align: usize,
}

impl Segment {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Placement alignment; 0 means unconstrained.
    #[inline]
    pub fn align(&self) -> usize {
        self.align
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Pad to a multiple of `n` (a power of two) and require `n` at placement.
    pub(crate) fn pad_to(&mut self, n: usize, padding: u8) {
        self.align = self.align.max(n);
        let gap = padding_for(self.bytes.len(), n);
        self.bytes.resize(self.bytes.len() + gap, padding);
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub(crate) fn put_uint(&mut self, endian: Endian, value: u64, width: usize) {
        endian.put_uint(&mut self.bytes, value, width);
    }
}

/// Object segments with a cursor on the one being written.
#[derive(Debug)]
pub struct SegmentStore {
    segments: Vec<Segment>,
    current: usize,
    /// Segments to return to, innermost last.
    parents: Vec<usize>,
    padding: u8,
}

impl SegmentStore {
    /// Store holding only the root segment, which is current.
    pub fn new(padding: u8) -> Self {
        Self {
            segments: vec![Segment::new()],
            current: 0,
            parents: Vec::new(),
            padding,
        }
    }

    /// Allocate a segment after all existing ones and make it current.
    pub fn push_child_segment(&mut self) {
        self.parents.push(self.current);
        self.current = self.segments.len();
        self.segments.push(Segment::new());
        tracing::trace!(
            index = self.current,
            depth = self.parents.len(),
            "allocated segment"
        );
    }

    /// Make the segment that was current before the matching push current again.
    ///
    /// # Panics
    /// Panics when the root segment is current.
    pub fn pop_to_parent_segment(&mut self) {
        let parent = self.parents.pop();
        self.current = self.ensure_parent(parent);
    }

    #[inline]
    pub fn current_segment(&self) -> SegmentId {
        SegmentId::Object(self.current)
    }

    /// Nesting depth of the current segment; the root is 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.parents.len()
    }

    /// Position of the next byte written.
    pub fn current_position(&self) -> Locator {
        Locator::new(self.current_segment(), self.active().len() as u64)
    }

    /// Pad the current segment to a multiple of `n` with the padding byte.
    pub fn align(&mut self, n: usize) -> Result<()> {
        if !is_power_of_two(n) {
            return Err(BlobError::InvalidAlignment(n));
        }
        let padding = self.padding;
        self.active_mut().pad_to(n, padding);
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.active_mut().write_bytes(bytes);
    }

    /// Append `count` zero bytes.
    pub fn write_zeros(&mut self, count: usize) {
        let active = self.active_mut();
        active.bytes.resize(active.bytes.len() + count, 0);
    }

    pub(crate) fn put_uint(&mut self, endian: Endian, value: u64, width: usize) {
        self.active_mut().put_uint(endian, value, width);
    }

    /// Number of segments allocated so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    fn active(&self) -> &Segment {
        &self.segments[self.current]
    }

    fn active_mut(&mut self) -> &mut Segment {
        &mut self.segments[self.current]
    }
}
