#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Relocatable blob construction.
//!
//! Builds a flat byte buffer from an in-memory object graph, plus a list of
//! offsets whose pointer fields hold signed deltas a loader resolves at load
//! time. The pipeline:
//! - [`Arena`] owns every pointer target; [`Pointer`] and [`Array`] are the
//!   graph's containers
//! - [`BlobWriter`] is one construction session: descriptor dispatch, segment
//!   layout, pointer tracking and string interning
//! - [`BlobWriter::finish`] lays segments out and patches relocations
//! - [`dump`] renders a [`Blob`] for debugging

pub mod arena;
pub mod array;
pub mod descriptor;
pub mod dump;
mod error;
mod invariants;
pub mod output;
pub mod pointer;
pub mod segment;
mod strings;
mod tracker;
pub mod writer;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod pointer_tests;
#[cfg(test)]
mod segment_tests;

pub use arena::{Arena, Handle, PointerTarget, TargetId};
pub use array::Array;
pub use blobct_core::{Colors, Config, ConfigError, Endian};
pub use descriptor::{BlobType, Composite, Descriptor, Registry, TypeDescriptor};
pub use dump::dump;
pub use error::BlobError;
pub use output::{Blob, Placement};
pub use pointer::Pointer;
pub use segment::{Locator, Segment, SegmentId, SegmentStore};
pub use writer::BlobWriter;

/// Result type for blob construction.
pub type Result<T> = std::result::Result<T, BlobError>;
