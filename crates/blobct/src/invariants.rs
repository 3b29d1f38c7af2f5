//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::arena::{Arena, Handle, PointerTarget};
use crate::segment::SegmentStore;

impl Arena {
    pub(crate) fn ensure_target<A: PointerTarget>(&self, handle: Handle<A>) -> &A {
        self.get(handle).unwrap_or_else(|| {
            panic!(
                "Arena: handle {} not found \
                 (handles are only valid in the arena that allocated them)",
                handle.id()
            )
        })
    }

    pub(crate) fn ensure_target_mut<A: PointerTarget>(&mut self, handle: Handle<A>) -> &mut A {
        self.get_mut(handle).unwrap_or_else(|| {
            panic!(
                "Arena: handle {} not found \
                 (handles are only valid in the arena that allocated them)",
                handle.id()
            )
        })
    }
}

impl SegmentStore {
    pub(crate) fn ensure_parent(&self, parent: Option<usize>) -> usize {
        parent.unwrap_or_else(|| {
            panic!(
                "SegmentStore: cannot pop the root segment \
                 (push_child_segment/pop_to_parent_segment calls must balance)"
            )
        })
    }
}
