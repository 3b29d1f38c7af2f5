//! Descriptors for inline arrays and pointer fields.

use std::marker::PhantomData;
use std::rc::Rc;

use super::{BlobType, Descriptor, Registry, TypeDescriptor};
use crate::Result;
use crate::array::Array;
use crate::pointer::Pointer;
use crate::writer::BlobWriter;

/// Writes an array's elements contiguously at the current position.
pub(crate) struct ArrayDescriptor<T> {
    elem: Descriptor<T>,
}

impl<T: 'static> TypeDescriptor<Array<T>> for ArrayDescriptor<T> {
    /// Arrays align as their first element; empty arrays do not align.
    fn align(&self, w: &mut BlobWriter<'_>, value: &Array<T>) -> Result<()> {
        match value.first() {
            Some(first) => self.elem.align(w, first),
            None => Ok(()),
        }
    }

    fn write_value(&self, w: &mut BlobWriter<'_>, value: &Array<T>) -> Result<()> {
        self.elem.write_sequence(w, value.as_slice())
    }
}

impl<T: BlobType> BlobType for Array<T> {
    fn descriptor(registry: &mut Registry) -> Result<Descriptor<Self>> {
        let elem = registry.get::<T>()?;
        Ok(Rc::new(ArrayDescriptor { elem }))
    }
}

/// Writes a pointer-sized relocation placeholder.
pub(crate) struct PointerDescriptor<T>(PhantomData<fn(T)>);

impl<T: BlobType> TypeDescriptor<Pointer<T>> for PointerDescriptor<T> {
    fn align(&self, w: &mut BlobWriter<'_>, _value: &Pointer<T>) -> Result<()> {
        let align = w.config().pointer_align;
        w.align(align)
    }

    fn write_value(&self, w: &mut BlobWriter<'_>, value: &Pointer<T>) -> Result<()> {
        w.write_pointer(value)
    }
}

impl<T: BlobType> BlobType for Pointer<T> {
    fn descriptor(_registry: &mut Registry) -> Result<Descriptor<Self>> {
        Ok(Rc::new(PointerDescriptor(PhantomData)))
    }
}
