//! String fields: a pointer into the interned string segment.

use std::rc::Rc;

use super::{BlobType, Descriptor, Registry, TypeDescriptor};
use crate::Result;
use crate::writer::BlobWriter;

pub(crate) struct StringDescriptor;

impl TypeDescriptor<String> for StringDescriptor {
    fn align(&self, w: &mut BlobWriter<'_>, _value: &String) -> Result<()> {
        let align = w.config().pointer_align;
        w.align(align)
    }

    fn write_value(&self, w: &mut BlobWriter<'_>, value: &String) -> Result<()> {
        w.write_string_pointer(Some(value))
    }
}

/// `None` is written as a null pointer.
impl TypeDescriptor<Option<String>> for StringDescriptor {
    fn align(&self, w: &mut BlobWriter<'_>, _value: &Option<String>) -> Result<()> {
        let align = w.config().pointer_align;
        w.align(align)
    }

    fn write_value(&self, w: &mut BlobWriter<'_>, value: &Option<String>) -> Result<()> {
        w.write_string_pointer(value.as_deref())
    }
}

impl BlobType for String {
    fn descriptor(_registry: &mut Registry) -> Result<Descriptor<Self>> {
        Ok(Rc::new(StringDescriptor))
    }
}

impl BlobType for Option<String> {
    fn descriptor(_registry: &mut Registry) -> Result<Descriptor<Self>> {
        Ok(Rc::new(StringDescriptor))
    }
}
