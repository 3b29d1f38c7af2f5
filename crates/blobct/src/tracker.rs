//! Pointer tracking: the memo table of materialized targets and the pending
//! relocation list.

use std::collections::HashMap;

use crate::arena::TargetId;
use crate::segment::{Locator, SegmentId};
use crate::{BlobError, Result};

/// Where a materialized target's elements landed.
#[derive(Clone, Debug)]
pub(crate) struct TargetLayout {
    segment: SegmentId,
    /// Start of each element, in segment offsets.
    starts: Vec<u64>,
    /// Offset just past the last element.
    end: u64,
}

impl TargetLayout {
    fn reserved(segment: SegmentId, start: u64) -> Self {
        Self {
            segment,
            starts: Vec::new(),
            end: start,
        }
    }

    /// Locator of element `index`; `index == len()` is the end position.
    pub fn locate(&self, index: usize) -> Option<Locator> {
        let offset = match index.cmp(&self.starts.len()) {
            std::cmp::Ordering::Less => self.starts[index],
            std::cmp::Ordering::Equal => self.end,
            std::cmp::Ordering::Greater => return None,
        };
        Some(Locator::new(self.segment, offset))
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }
}

/// What a relocation's pointer field must address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RelocTarget {
    /// A fixed position, such as an interned string.
    Located(Locator),
    /// An element of a materialized target. Resolved once every target has
    /// its final layout, so pointers may close cycles.
    Element { id: TargetId, index: usize },
}

/// A pointer field to patch at output time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Relocation {
    pub source: Locator,
    pub target: RelocTarget,
}

#[derive(Debug, Default)]
pub(crate) struct Tracker {
    layouts: HashMap<TargetId, TargetLayout>,
    relocations: Vec<Relocation>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_materialized(&self, id: TargetId) -> bool {
        self.layouts.contains_key(&id)
    }

    /// Claim `id` before its elements are written.
    ///
    /// Pointers reaching `id` while it is being written resolve against the
    /// layout completed later.
    pub fn reserve(&mut self, id: TargetId, start: Locator) {
        self.layouts
            .insert(id, TargetLayout::reserved(start.segment, start.offset));
    }

    pub fn complete(&mut self, id: TargetId, starts: Vec<u64>, end: u64) {
        if let Some(layout) = self.layouts.get_mut(&id) {
            layout.starts = starts;
            layout.end = end;
        }
    }

    pub fn record(&mut self, source: Locator, target: RelocTarget) {
        self.relocations.push(Relocation { source, target });
    }

    pub fn relocations(&self) -> &[Relocation] {
        &self.relocations
    }

    /// Number of distinct targets materialized.
    pub fn target_count(&self) -> usize {
        self.layouts.len()
    }

    pub fn resolve(&self, target: RelocTarget) -> Result<Locator> {
        match target {
            RelocTarget::Located(locator) => Ok(locator),
            RelocTarget::Element { id, index } => {
                let layout = self
                    .layouts
                    .get(&id)
                    .ok_or(BlobError::UnknownTarget(id))?;
                layout.locate(index).ok_or(BlobError::BoundsViolation {
                    index,
                    len: layout.len(),
                })
            }
        }
    }
}
