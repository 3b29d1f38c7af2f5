//! User-defined records.

use std::marker::PhantomData;

use super::{BlobType, Descriptor, Registry, TypeDescriptor};
use crate::arena::PointerTarget;
use crate::writer::BlobWriter;
use crate::{BlobError, Result};

/// A user record that lays out its own fields.
///
/// `write` typically calls [`BlobWriter::write`] once per field, in layout
/// order. `align` pads for the record's first field.
///
/// ```ignore
/// struct Node { value: u32, next: Pointer<Node> }
///
/// impl Composite for Node {
///     type Elem = Self;
///     fn align(&self, w: &mut BlobWriter<'_>) -> Result<()> {
///         w.align(w.config().int_align)
///     }
///     fn write(&self, w: &mut BlobWriter<'_>) -> Result<()> {
///         w.write(&self.value)?;
///         w.write(&self.next)
///     }
/// }
/// ```
pub trait Composite: 'static {
    /// The type pointers into this record address. Must be `Self`; any other
    /// type makes the descriptor lookup fail with `CapabilityMismatch`.
    type Elem: 'static;

    fn align(&self, w: &mut BlobWriter<'_>) -> Result<()>;

    fn write(&self, w: &mut BlobWriter<'_>) -> Result<()>;

    /// Check a pointer offset into this record: 0 addresses it, 1 is its end.
    fn validate_offset(&self, offset: usize) -> Result<()> {
        if offset > 1 {
            return Err(BlobError::BoundsViolation {
                index: offset,
                len: 1,
            });
        }
        Ok(())
    }
}

pub(crate) struct CompositeDescriptor<T>(PhantomData<fn(&T)>);

impl<T> CompositeDescriptor<T> {
    pub(crate) fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Composite> TypeDescriptor<T> for CompositeDescriptor<T> {
    fn align(&self, w: &mut BlobWriter<'_>, value: &T) -> Result<()> {
        value.align(w)
    }

    fn write_value(&self, w: &mut BlobWriter<'_>, value: &T) -> Result<()> {
        value.write(w)
    }
}

impl<T: Composite> BlobType for T {
    fn descriptor(registry: &mut Registry) -> Result<Descriptor<Self>> {
        registry.composite::<T>()
    }
}

impl<T: Composite<Elem = T>> PointerTarget for T {
    type Elem = T;

    fn len(&self) -> usize {
        1
    }

    fn element(&self, index: usize) -> Option<&T> {
        (index == 0).then_some(self)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut T> {
        (index == 0).then_some(self)
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        self.validate_offset(offset)
    }
}
