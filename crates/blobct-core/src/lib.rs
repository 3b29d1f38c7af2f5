#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Configuration and encoding primitives shared by the blobct engine.
//!
//! - [`Config`]: session-wide layout parameters (byte order, pointer width,
//!   per-width alignments, padding byte)
//! - [`Endian`]: byte order with width-generic integer encoding
//! - [`Colors`]: ANSI palette for the diagnostic dump

mod colors;
mod config;
mod encoding;

#[cfg(test)]
mod encoding_tests;

pub use colors::Colors;
pub use config::{Config, ConfigError, Endian};
pub use encoding::{align_up, fits_signed, is_power_of_two, padding_for};
