//! Session descriptor cache.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::composite::CompositeDescriptor;
use super::{BlobType, Composite, Descriptor};
use crate::{BlobError, Result};

/// Maps each type to its descriptor for one session.
///
/// Descriptors are built on first use and cached. Registered descriptors take
/// precedence over built-in ones.
#[derive(Default)]
pub struct Registry {
    /// Each value is a `Descriptor<T>` keyed by `TypeId::of::<T>()`.
    descriptors: HashMap<TypeId, Rc<dyn Any>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor for `T`, building and caching the default one on first use.
    pub fn get<T: BlobType>(&mut self) -> Result<Descriptor<T>> {
        if let Some(descriptor) = self.lookup::<T>() {
            return Ok(descriptor);
        }
        let descriptor = T::descriptor(self)?;
        self.insert(descriptor.clone());
        Ok(descriptor)
    }

    /// Use `descriptor` for every later value of `T`.
    pub fn register<T: 'static>(&mut self, descriptor: Descriptor<T>) {
        self.insert(descriptor);
    }

    /// Cached descriptor for `T`, if any.
    pub fn lookup<T: 'static>(&self) -> Option<Descriptor<T>> {
        self.descriptors
            .get(&TypeId::of::<T>())?
            .downcast_ref::<Descriptor<T>>()
            .cloned()
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.descriptors.contains_key(&TypeId::of::<T>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptor for a user composite.
    ///
    /// Pointers into a composite address the composite itself, so its
    /// declared element type must be `T`.
    pub fn composite<T: Composite>(&mut self) -> Result<Descriptor<T>> {
        if TypeId::of::<T::Elem>() != TypeId::of::<T>() {
            return Err(BlobError::CapabilityMismatch {
                ty: type_name::<T>(),
                declared: type_name::<T::Elem>(),
            });
        }
        Ok(Rc::new(CompositeDescriptor::<T>::new()))
    }

    fn insert<T: 'static>(&mut self, descriptor: Descriptor<T>) {
        self.descriptors
            .insert(TypeId::of::<T>(), Rc::new(descriptor));
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("len", &self.descriptors.len())
            .finish()
    }
}
