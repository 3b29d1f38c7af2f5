//! Ownership of pointer targets.
//!
//! Every object a [`Pointer`] can address lives in an [`Arena`]. Pointers hold
//! copyable [`TargetId`]s instead of references, so one object can be shared by
//! any number of pointers and the writer can key its memo table by identity.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::pointer::Pointer;
use crate::{BlobError, Result};

static NEXT_ARENA: AtomicU32 = AtomicU32::new(0);

/// Identity of a pointer target: the owning arena and the slot within it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TargetId {
    arena: u32,
    slot: u32,
}

impl TargetId {
    /// Slot index inside the owning arena.
    #[inline]
    pub fn slot(self) -> u32 {
        self.slot
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.arena, self.slot)
    }
}

/// Typed handle to a target allocated in an [`Arena`].
pub struct Handle<A> {
    id: TargetId,
    _target: PhantomData<fn() -> A>,
}

impl<A> Handle<A> {
    fn new(id: TargetId) -> Self {
        Self {
            id,
            _target: PhantomData,
        }
    }

    #[inline]
    pub fn id(self) -> TargetId {
        self.id
    }
}

impl<A> Clone for Handle<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Handle<A> {}

impl<A> PartialEq for Handle<A> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<A> Eq for Handle<A> {}

impl<A> std::hash::Hash for Handle<A> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<A> fmt::Debug for Handle<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.id)
    }
}

/// Upcast to `Any` for typed access through erased targets.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// An indexable run of elements that pointers can address.
///
/// [`Array`](crate::Array) is a target of `len()` elements; every
/// [`Composite`](crate::Composite) whose element type is itself is a target of
/// exactly one element. The writer materializes a target by writing its
/// elements in index order through the element type's descriptor.
pub trait PointerTarget: AsAny {
    type Elem: 'static;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn element(&self, index: usize) -> Option<&Self::Elem>;

    fn element_mut(&mut self, index: usize) -> Option<&mut Self::Elem>;

    /// Check a pointer offset into this target.
    ///
    /// One past the last element is accepted: it is the end marker.
    fn check_offset(&self, offset: usize) -> Result<()> {
        let len = self.len();
        if offset > len {
            return Err(BlobError::BoundsViolation { index: offset, len });
        }
        Ok(())
    }
}

/// Type-erased storage for one target with element type `E`.
type Slot<E> = Box<dyn PointerTarget<Elem = E>>;

/// Owner of all pointer targets of an object graph.
pub struct Arena {
    id: u32,
    /// Each entry is a `Slot<E>` for the target's element type.
    slots: Vec<Box<dyn Any>>,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            id: NEXT_ARENA.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
        }
    }

    /// Move a target into the arena.
    pub fn alloc<A: PointerTarget>(&mut self, target: A) -> Handle<A> {
        let id = TargetId {
            arena: self.id,
            slot: self.slots.len() as u32,
        };
        let slot: Slot<A::Elem> = Box::new(target);
        self.slots.push(Box::new(slot));
        Handle::new(id)
    }

    pub fn get<A: PointerTarget>(&self, handle: Handle<A>) -> Option<&A> {
        self.target::<A::Elem>(handle.id)?
            .as_any()
            .downcast_ref::<A>()
    }

    pub fn get_mut<A: PointerTarget>(&mut self, handle: Handle<A>) -> Option<&mut A> {
        self.target_mut::<A::Elem>(handle.id)?
            .as_any_mut()
            .downcast_mut::<A>()
    }

    /// Whether `id` names a target allocated here.
    pub fn contains(&self, id: TargetId) -> bool {
        id.arena == self.id && (id.slot as usize) < self.slots.len()
    }

    /// Number of allocated targets.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Pointer to element `index` of a target. The index must address an element.
    pub fn elem_pointer<A: PointerTarget>(
        &self,
        handle: Handle<A>,
        index: usize,
    ) -> Result<Pointer<A::Elem>> {
        let len = self.ensure_target(handle).len();
        if index >= len {
            return Err(BlobError::BoundsViolation { index, len });
        }
        Ok(Pointer::from_parts(handle.id, index))
    }

    /// Pointer one past the last element of a target.
    pub fn end_pointer<A: PointerTarget>(&self, handle: Handle<A>) -> Pointer<A::Elem> {
        let len = self.ensure_target(handle).len();
        Pointer::from_parts(handle.id, len)
    }

    pub(crate) fn target<E: 'static>(
        &self,
        id: TargetId,
    ) -> Option<&(dyn PointerTarget<Elem = E> + 'static)> {
        if id.arena != self.id {
            return None;
        }
        self.slots
            .get(id.slot as usize)?
            .downcast_ref::<Slot<E>>()
            .map(|slot| slot.as_ref())
    }

    pub(crate) fn target_mut<E: 'static>(
        &mut self,
        id: TargetId,
    ) -> Option<&mut (dyn PointerTarget<Elem = E> + 'static)> {
        if id.arena != self.id {
            return None;
        }
        self.slots
            .get_mut(id.slot as usize)?
            .downcast_mut::<Slot<E>>()
            .map(|slot| slot.as_mut())
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("len", &self.slots.len())
            .finish()
    }
}

impl<A: PointerTarget> Index<Handle<A>> for Arena {
    type Output = A;

    /// # Panics
    /// Panics if the handle was not allocated by this arena.
    fn index(&self, handle: Handle<A>) -> &A {
        self.ensure_target(handle)
    }
}

impl<A: PointerTarget> IndexMut<Handle<A>> for Arena {
    fn index_mut(&mut self, handle: Handle<A>) -> &mut A {
        self.ensure_target_mut(handle)
    }
}
