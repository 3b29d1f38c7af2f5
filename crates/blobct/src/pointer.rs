//! Nullable reference into an arena target.

use std::fmt;
use std::marker::PhantomData;

use crate::arena::{Arena, Handle, PointerTarget, TargetId};
use crate::{BlobError, Result};

/// Reference to element `offset` of an arena target, or null.
///
/// Pointers compare by identity: two pointers are equal when they address the
/// same element of the same target, regardless of the values stored there.
/// In the blob a pointer becomes a signed delta from the pointer field to the
/// addressed element.
pub struct Pointer<T> {
    target: Option<TargetId>,
    offset: usize,
    _elem: PhantomData<fn() -> T>,
}

impl<T> Pointer<T> {
    pub const fn null() -> Self {
        Self {
            target: None,
            offset: 0,
            _elem: PhantomData,
        }
    }

    pub(crate) fn from_parts(target: TargetId, offset: usize) -> Self {
        Self {
            target: Some(target),
            offset,
            _elem: PhantomData,
        }
    }

    /// Pointer to the first element of a target.
    pub fn to<A: PointerTarget<Elem = T>>(handle: Handle<A>) -> Self {
        Self::from_parts(handle.id(), 0)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.target.is_none()
    }

    #[inline]
    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    /// Element offset within the target.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<T: 'static> Pointer<T> {
    /// Pointer `count` elements further into the same target.
    ///
    /// The result may address one past the last element.
    pub fn add(&self, arena: &Arena, count: usize) -> Result<Self> {
        let target = self.resolve(arena)?;
        let offset = self.position(count, target.len())?;
        target.check_offset(offset)?;
        Ok(Self::from_parts(self.require_target()?, offset))
    }

    /// Element `index` positions past the addressed one.
    pub fn get<'a>(&self, arena: &'a Arena, index: usize) -> Result<&'a T> {
        let target = self.resolve(arena)?;
        let position = self.position(index, target.len())?;
        target.element(position).ok_or(BlobError::BoundsViolation {
            index: position,
            len: target.len(),
        })
    }

    pub fn get_mut<'a>(&self, arena: &'a mut Arena, index: usize) -> Result<&'a mut T> {
        let id = self.require_target()?;
        let target = arena
            .target_mut::<T>(id)
            .ok_or(BlobError::UnknownTarget(id))?;
        let len = target.len();
        let position = self.position(index, len)?;
        target
            .element_mut(position)
            .ok_or(BlobError::BoundsViolation {
                index: position,
                len,
            })
    }

    pub fn set(&self, arena: &mut Arena, index: usize, value: T) -> Result<()> {
        *self.get_mut(arena, index)? = value;
        Ok(())
    }

    /// Element offset `count` past this one; overflow is out of bounds.
    fn position(&self, count: usize, len: usize) -> Result<usize> {
        self.offset
            .checked_add(count)
            .ok_or(BlobError::BoundsViolation { index: usize::MAX, len })
    }

    fn require_target(&self) -> Result<TargetId> {
        self.target.ok_or(BlobError::NullDereference)
    }

    fn resolve<'a>(&self, arena: &'a Arena) -> Result<&'a (dyn PointerTarget<Elem = T> + 'static)> {
        let id = self.require_target()?;
        arena.target::<T>(id).ok_or(BlobError::UnknownTarget(id))
    }
}

impl<T> Clone for Pointer<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Pointer<T> {}

impl<T> Default for Pointer<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> PartialEq for Pointer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target && self.offset == other.offset
    }
}

impl<T> Eq for Pointer<T> {}

impl<T> std::hash::Hash for Pointer<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.target.hash(state);
        self.offset.hash(state);
    }
}

impl<T> fmt::Debug for Pointer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            None => f.write_str("Pointer(null)"),
            Some(id) => write!(f, "Pointer({id}+{})", self.offset),
        }
    }
}
