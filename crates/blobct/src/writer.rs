//! Blob construction session.

use std::io::Write;

use blobct_core::Config;
use tracing::trace;

use crate::arena::{Arena, TargetId};
use crate::descriptor::{BlobType, Descriptor, Registry};
use crate::output::{self, Blob};
use crate::pointer::Pointer;
use crate::segment::{Locator, SegmentStore};
use crate::strings::StringTable;
use crate::tracker::{RelocTarget, Tracker};
use crate::{BlobError, Result};

/// One blob construction session.
///
/// Write the root value with [`write`](Self::write), then call
/// [`finish`](Self::finish). Pointer targets are read from the borrowed arena
/// and written at most once each, the first time a pointer reaches them.
pub struct BlobWriter<'a> {
    config: Config,
    arena: &'a Arena,
    registry: Registry,
    segments: SegmentStore,
    strings: StringTable,
    tracker: Tracker,
}

impl<'a> BlobWriter<'a> {
    pub fn new(config: Config, arena: &'a Arena) -> Result<Self> {
        config.validate()?;
        let segments = SegmentStore::new(config.padding_byte);
        Ok(Self {
            config,
            arena,
            registry: Registry::new(),
            segments,
            strings: StringTable::new(),
            tracker: Tracker::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn arena(&self) -> &'a Arena {
        self.arena
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Use `descriptor` for every later value of `T` in this session.
    pub fn register_descriptor<T: 'static>(&mut self, descriptor: Descriptor<T>) {
        self.registry.register(descriptor);
    }

    pub fn descriptor<T: BlobType>(&mut self) -> Result<Descriptor<T>> {
        self.registry.get::<T>()
    }

    /// Align for and write `value` at the current position.
    pub fn write<T: BlobType>(&mut self, value: &T) -> Result<()> {
        let descriptor = self.descriptor::<T>()?;
        descriptor.align(self, value)?;
        descriptor.write_value(self, value)
    }

    /// Pad the current segment to a multiple of `n`.
    pub fn align(&mut self, n: usize) -> Result<()> {
        self.segments.align(n)
    }

    pub fn current_position(&self) -> Locator {
        self.segments.current_position()
    }

    /// Append raw bytes without alignment.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.segments.write_bytes(bytes);
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.segments.write_bytes(&[value]);
        Ok(())
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_u8(value as u8)
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.put_aligned(self.config.short_align, value as u64, 2)
    }

    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_u16(value as u16)
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.put_aligned(self.config.int_align, value as u64, 4)
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_u32(value as u32)
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.put_aligned(self.config.float_align, value.to_bits() as u64, 4)
    }

    /// Write a pointer field, materializing its target on first reference.
    ///
    /// Null pointers are written as zero and get no relocation.
    pub fn write_pointer<T: BlobType>(&mut self, pointer: &Pointer<T>) -> Result<()> {
        self.align(self.config.pointer_align)?;
        let Some(id) = pointer.target() else {
            self.write_placeholder();
            return Ok(());
        };

        if !self.tracker.is_materialized(id) {
            self.materialize::<T>(id)?;
        }

        let source = self.current_position();
        self.tracker.record(
            source,
            RelocTarget::Element {
                id,
                index: pointer.offset(),
            },
        );
        self.write_placeholder();
        Ok(())
    }

    /// Write a pointer to an interned copy of `s`, or null for `None`.
    pub fn write_string_pointer(&mut self, s: Option<&str>) -> Result<()> {
        self.align(self.config.pointer_align)?;
        if let Some(s) = s {
            let target = self.strings.intern(s);
            let source = self.current_position();
            self.tracker.record(source, RelocTarget::Located(target));
        }
        self.write_placeholder();
        Ok(())
    }

    /// Number of object segments allocated so far.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Number of distinct strings interned so far.
    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    /// Interned strings with their offsets in the string segment.
    pub fn strings(&self) -> impl Iterator<Item = (&str, u64)> {
        self.strings.iter()
    }

    /// Number of pointer fields recorded for patching.
    pub fn relocation_count(&self) -> usize {
        self.tracker.relocations().len()
    }

    /// Number of distinct pointer targets written.
    pub fn target_count(&self) -> usize {
        self.tracker.target_count()
    }

    /// Lay out all segments and patch every recorded pointer field.
    pub fn finish(self) -> Result<Blob> {
        let Self {
            config,
            segments,
            strings,
            tracker,
            ..
        } = self;
        output::generate(
            &config,
            segments.into_segments(),
            strings,
            &tracker,
        )
    }

    /// Finish and write the data image and the relocation table.
    pub fn generate_output<D: Write, R: Write>(self, mut data: D, mut relocs: R) -> Result<()> {
        let blob = self.finish()?;
        blob.write_to(&mut data, &mut relocs)?;
        Ok(())
    }

    /// Write target `id` into the child segment.
    fn materialize<T: BlobType>(&mut self, id: TargetId) -> Result<()> {
        let arena = self.arena;
        let target = arena
            .target::<T>(id)
            .ok_or(BlobError::UnknownTarget(id))?;
        let descriptor = self.descriptor::<T>()?;

        self.segments.push_child_segment();
        let start = self.current_position();
        self.tracker.reserve(id, start);

        let mut starts = Vec::with_capacity(target.len());
        for elem in (0..target.len()).map_while(|index| target.element(index)) {
            descriptor.align(self, elem)?;
            starts.push(self.current_position().offset);
            descriptor.write_value(self, elem)?;
        }
        let end = self.current_position().offset;
        let elements = starts.len();
        self.tracker.complete(id, starts, end);
        self.segments.pop_to_parent_segment();

        trace!(id = %id, segment = %start.segment, elements, "materialized pointer target");
        Ok(())
    }

    fn put_aligned(&mut self, align: usize, value: u64, width: usize) -> Result<()> {
        self.align(align)?;
        self.segments.put_uint(self.config.endian, value, width);
        Ok(())
    }

    fn write_placeholder(&mut self) {
        self.segments.write_zeros(self.config.pointer_size as usize);
    }
}

impl std::fmt::Debug for BlobWriter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobWriter")
            .field("config", &self.config)
            .field("position", &self.current_position())
            .field("segments", &self.segments.len())
            .field("strings", &self.strings.len())
            .field("relocations", &self.tracker.relocations().len())
            .finish()
    }
}
