//! Session-wide layout configuration.

use serde::{Deserialize, Serialize};

use crate::encoding::is_power_of_two;

/// Byte order for multi-byte scalars, pointer deltas and relocation entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endian {
    /// Most-significant byte first.
    #[default]
    Big,
    /// Least-significant byte first.
    Little,
}

/// Invalid or unparsable configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("pointer size must be between 1 and 8 bytes, got {0}")]
    InvalidPointerSize(u8),

    #[error("{field} must be a power of two, got {value}")]
    InvalidAlignment { field: &'static str, value: usize },

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Layout parameters for one blob construction session.
///
/// Defaults match a 32-bit big-endian target: 4-byte pointers aligned to 4,
/// shorts aligned to 2, ints and floats aligned to 4, zero padding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Byte written into alignment gaps.
    pub padding_byte: u8,
    pub endian: Endian,
    /// Width of pointer fields in bytes (1 to 8).
    pub pointer_size: u8,
    pub pointer_align: usize,
    /// Alignment of 2-byte scalars.
    pub short_align: usize,
    /// Alignment of 4-byte integers.
    pub int_align: usize,
    pub float_align: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            padding_byte: 0x00,
            endian: Endian::Big,
            pointer_size: 4,
            pointer_align: 4,
            short_align: 2,
            int_align: 4,
            float_align: 4,
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the byte used to fill alignment gaps.
    pub fn padding_byte(mut self, value: u8) -> Self {
        self.padding_byte = value;
        self
    }

    /// Set the byte order.
    pub fn endian(mut self, value: Endian) -> Self {
        self.endian = value;
        self
    }

    /// Set the width of pointer fields in bytes.
    pub fn pointer_size(mut self, value: u8) -> Self {
        self.pointer_size = value;
        self
    }

    /// Set the alignment of pointer and string-pointer fields.
    pub fn pointer_align(mut self, value: usize) -> Self {
        self.pointer_align = value;
        self
    }

    /// Set the alignment of 2-byte scalars.
    pub fn short_align(mut self, value: usize) -> Self {
        self.short_align = value;
        self
    }

    /// Set the alignment of 4-byte integers.
    pub fn int_align(mut self, value: usize) -> Self {
        self.int_align = value;
        self
    }

    /// Set the alignment of 4-byte floats.
    pub fn float_align(mut self, value: usize) -> Self {
        self.float_align = value;
        self
    }

    /// Check pointer width and alignments.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=8).contains(&self.pointer_size) {
            return Err(ConfigError::InvalidPointerSize(self.pointer_size));
        }

        let alignments = [
            ("pointer_align", self.pointer_align),
            ("short_align", self.short_align),
            ("int_align", self.int_align),
            ("float_align", self.float_align),
        ];
        for (field, value) in alignments {
            if !is_power_of_two(value) {
                return Err(ConfigError::InvalidAlignment { field, value });
            }
        }
        Ok(())
    }
}
