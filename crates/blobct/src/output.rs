//! Output generation: segment placement and relocation patching.
//!
//! Object segments are placed in creation order, then the string segment. Each
//! segment starts at a multiple of its alignment. Every recorded pointer field
//! is then patched with the signed delta from the field to its target.

use std::io::{self, Write};

use blobct_core::{Config, Endian, fits_signed, padding_for};
use tracing::debug;

use crate::segment::{Segment, SegmentId};
use crate::strings::StringTable;
use crate::tracker::Tracker;
use crate::{BlobError, Result};

/// Where a segment landed in the data image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub segment: SegmentId,
    /// Absolute offset of the segment's first byte.
    pub offset: u64,
    pub len: usize,
    pub align: usize,
}

impl Placement {
    /// Absolute offset just past the segment.
    pub fn end(&self) -> u64 {
        self.offset + self.len as u64
    }
}

/// A finished blob: the data image and its relocation table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    data: Vec<u8>,
    relocations: Vec<u32>,
    placements: Vec<Placement>,
    /// Absolute offset and byte length of each interned string.
    strings: Vec<(u64, usize)>,
    endian: Endian,
    pointer_size: u8,
}

impl Blob {
    /// The data image.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Absolute offsets of patched pointer fields, in recording order.
    pub fn relocations(&self) -> &[u32] {
        &self.relocations
    }

    /// Relocation table bytes: one 32-bit offset per entry, in blob byte order.
    pub fn relocation_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.relocations.len() * 4);
        for &offset in &self.relocations {
            self.endian.put_uint(&mut out, offset as u64, 4);
        }
        out
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placement(&self, segment: SegmentId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.segment == segment)
    }

    /// Interned strings in insertion order: absolute offset and content bytes,
    /// without the terminating NUL.
    pub fn strings(&self) -> impl Iterator<Item = (u64, &[u8])> {
        self.strings.iter().map(|&(offset, len)| {
            let start = offset as usize;
            (offset, &self.data[start..start + len])
        })
    }

    #[inline]
    pub fn endian(&self) -> Endian {
        self.endian
    }

    #[inline]
    pub fn pointer_size(&self) -> u8 {
        self.pointer_size
    }

    /// The signed delta stored in the pointer field at `offset`.
    pub fn read_delta(&self, offset: u32) -> Option<i64> {
        let start = offset as usize;
        let field = self.data.get(start..start + self.pointer_size as usize)?;
        Some(self.endian.read_int(field))
    }

    /// Write the data image and the relocation table to separate sinks.
    pub fn write_to<D: Write, R: Write>(&self, data: &mut D, relocs: &mut R) -> io::Result<()> {
        data.write_all(&self.data)?;
        relocs.write_all(&self.relocation_bytes())?;
        data.flush()?;
        relocs.flush()
    }

    /// Data image and relocation table bytes.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        let relocs = self.relocation_bytes();
        (self.data, relocs)
    }
}

pub(crate) fn generate(
    config: &Config,
    objects: Vec<Segment>,
    strings: StringTable,
    tracker: &Tracker,
) -> Result<Blob> {
    let (strings, entries) = strings.into_parts();
    let mut data = Vec::new();
    let mut placements = Vec::with_capacity(objects.len() + 1);

    let segments = objects
        .into_iter()
        .enumerate()
        .map(|(index, segment)| (SegmentId::Object(index), segment))
        .chain(strings.map(|segment| (SegmentId::Strings, segment)));
    for (id, segment) in segments {
        placements.push(place(&mut data, id, segment, config.padding_byte));
    }

    let base = |segment: SegmentId| -> u64 {
        let placement = match segment {
            SegmentId::Object(index) => placements.get(index),
            SegmentId::Strings => placements.last(),
        };
        placement.map_or(0, |p| p.offset)
    };

    let width = config.pointer_size as usize;
    let mut relocations = Vec::with_capacity(tracker.relocations().len());
    for reloc in tracker.relocations() {
        let target = tracker.resolve(reloc.target)?;
        let source = base(reloc.source.segment) + reloc.source.offset;
        let destination = base(target.segment) + target.offset;
        let delta = destination as i64 - source as i64;
        if !fits_signed(delta, width) {
            return Err(BlobError::RelocationOverflow {
                offset: source,
                delta,
                width: config.pointer_size,
            });
        }

        let start = source as usize;
        config
            .endian
            .patch_uint(&mut data[start..start + width], delta as u64);
        relocations.push(u32::try_from(source).map_err(|_| BlobError::OffsetOverflow(source))?);
    }

    let string_base = base(SegmentId::Strings);
    let strings = entries
        .into_iter()
        .map(|(offset, len)| (string_base + offset, len))
        .collect();

    debug!(
        segments = placements.len(),
        bytes = data.len(),
        relocations = relocations.len(),
        "generated blob"
    );

    Ok(Blob {
        data,
        relocations,
        placements,
        strings,
        endian: config.endian,
        pointer_size: config.pointer_size,
    })
}

fn place(out: &mut Vec<u8>, id: SegmentId, segment: Segment, padding: u8) -> Placement {
    let align = segment.align();
    if align > 1 {
        out.resize(out.len() + padding_for(out.len(), align), padding);
    }
    let offset = out.len() as u64;
    let bytes = segment.into_bytes();
    let len = bytes.len();
    out.extend_from_slice(&bytes);
    Placement {
        segment: id,
        offset,
        len,
        align,
    }
}
