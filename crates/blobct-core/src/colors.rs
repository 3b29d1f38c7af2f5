//! ANSI styling for the blob dump.
//!
//! Each role marks one kind of blob content:
//! - `address`: absolute offsets and segment names
//! - `pointer`: bytes of patched pointer fields and relocation targets
//! - `padding`: bytes between segments that no segment owns
//! - `string`: interned string contents
//! - `header`: section headers

/// ANSI palette for dump output, one escape sequence per role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub address: &'static str,
    pub pointer: &'static str,
    pub padding: &'static str,
    pub string: &'static str,
    pub header: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        address: "\x1b[34m",
        pointer: "\x1b[32m",
        padding: "\x1b[2m",
        string: "\x1b[33m",
        header: "\x1b[1m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        address: "",
        pointer: "",
        padding: "",
        string: "",
        header: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }

    /// `text` wrapped in `style`, or unchanged when `style` is empty.
    pub fn paint(&self, style: &str, text: impl std::fmt::Display) -> String {
        if style.is_empty() {
            text.to_string()
        } else {
            format!("{style}{text}{}", self.reset)
        }
    }
}
