//! Fixed-width scalar descriptors.

use std::marker::PhantomData;
use std::rc::Rc;

use blobct_core::Config;

use super::{BlobType, Descriptor, Registry, TypeDescriptor};
use crate::Result;
use crate::writer::BlobWriter;

/// A scalar with a writer primitive and a configured alignment.
pub(crate) trait Scalar: Copy + 'static {
    /// `None` for byte-sized scalars, which never align.
    fn alignment(config: &Config) -> Option<usize>;

    /// Write through the writer primitive, which aligns on its own.
    fn put(self, w: &mut BlobWriter<'_>) -> Result<()>;
}

pub(crate) struct ScalarDescriptor<T>(PhantomData<fn(T)>);

impl<T> ScalarDescriptor<T> {
    pub(crate) fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Scalar> TypeDescriptor<T> for ScalarDescriptor<T> {
    fn align(&self, w: &mut BlobWriter<'_>, _value: &T) -> Result<()> {
        match T::alignment(w.config()) {
            Some(n) => w.align(n),
            None => Ok(()),
        }
    }

    fn write_value(&self, w: &mut BlobWriter<'_>, value: &T) -> Result<()> {
        value.put(w)
    }

    fn write_sequence(&self, w: &mut BlobWriter<'_>, values: &[T]) -> Result<()> {
        for &value in values {
            value.put(w)?;
        }
        Ok(())
    }
}

macro_rules! scalar {
    ($($ty:ty => $align:expr, $put:ident;)*) => {$(
        impl Scalar for $ty {
            fn alignment(config: &Config) -> Option<usize> {
                let align: fn(&Config) -> Option<usize> = $align;
                align(config)
            }

            fn put(self, w: &mut BlobWriter<'_>) -> Result<()> {
                w.$put(self)
            }
        }

        impl BlobType for $ty {
            fn descriptor(_registry: &mut Registry) -> Result<Descriptor<Self>> {
                Ok(Rc::new(ScalarDescriptor::<$ty>::new()))
            }
        }
    )*};
}

scalar! {
    u8 => |_| None, write_u8;
    i8 => |_| None, write_i8;
    u16 => |c| Some(c.short_align), write_u16;
    i16 => |c| Some(c.short_align), write_i16;
    u32 => |c| Some(c.int_align), write_u32;
    i32 => |c| Some(c.int_align), write_i32;
    f32 => |c| Some(c.float_align), write_f32;
}
