//! Error types for blob construction.

use blobct_core::ConfigError;

use crate::arena::TargetId;

/// Errors that abort a blob construction session.
///
/// None of these are recoverable: a writer that returned one must be dropped
/// and the session restarted.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// The type has no layout and no descriptor was registered for it.
    #[error("unsupported type {0}")]
    UnsupportedType(&'static str),

    /// A composite declares pointers into it address some other type.
    #[error("{ty} should declare itself as its pointer element type, but declares {declared}")]
    CapabilityMismatch {
        ty: &'static str,
        declared: &'static str,
    },

    #[error("cannot dereference null pointer")]
    NullDereference,

    #[error("index {index} out of bounds for target of length {len}")]
    BoundsViolation { index: usize, len: usize },

    #[error("alignment {0} is not a power of two")]
    InvalidAlignment(usize),

    /// The pointer was created from another arena's handle.
    #[error("pointer target {0} does not belong to this arena")]
    UnknownTarget(TargetId),

    #[error("relocation at {offset:#x} needs delta {delta}, which does not fit in {width} bytes")]
    RelocationOverflow { offset: u64, delta: i64, width: u8 },

    #[error("blob offset {0:#x} does not fit in a 32-bit relocation entry")]
    OffsetOverflow(u64),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
