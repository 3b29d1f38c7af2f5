//! Type descriptors: per-type alignment and write strategies.
//!
//! Every value written into a blob goes through the [`TypeDescriptor`] of its
//! type. Descriptors for built-in types come from [`BlobType`] impls; user
//! composites get theirs from [`Composite`]; any type can have its descriptor
//! replaced through [`Registry::register`].

mod composite;
mod container;
mod registry;
mod scalar;
mod string;


use std::rc::Rc;

use crate::writer::BlobWriter;
use crate::{BlobError, Result};

pub use composite::Composite;
pub use registry::Registry;

/// Alignment and write strategy for values of `T`.
pub trait TypeDescriptor<T> {
    /// Pad the current segment to the alignment `value` requires.
    fn align(&self, w: &mut BlobWriter<'_>, value: &T) -> Result<()>;

    /// Write `value` at the current position. Alignment is already done.
    fn write_value(&self, w: &mut BlobWriter<'_>, value: &T) -> Result<()>;

    /// Write consecutive values, each aligned.
    fn write_sequence(&self, w: &mut BlobWriter<'_>, values: &[T]) -> Result<()> {
        for value in values {
            self.align(w, value)?;
            self.write_value(w, value)?;
        }
        Ok(())
    }
}

/// Shared handle to a descriptor, as cached by the [`Registry`].
pub type Descriptor<T> = Rc<dyn TypeDescriptor<T>>;

/// A type that can appear in a blob.
///
/// `descriptor` builds the type's default descriptor. Types without a layout
/// keep the provided method, which reports `UnsupportedType`; writing them
/// needs a descriptor registered on the session first.
pub trait BlobType: Sized + 'static {
    fn descriptor(_registry: &mut Registry) -> Result<Descriptor<Self>> {
        Err(BlobError::UnsupportedType(std::any::type_name::<Self>()))
    }
}

// 8-byte scalars and booleans have no portable layout.
impl BlobType for u64 {}
impl BlobType for i64 {}
impl BlobType for f64 {}
impl BlobType for bool {}
