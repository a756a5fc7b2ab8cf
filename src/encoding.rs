//! YAML encoding strategies and legacy escape handling.
//!
//! Textual column values are written by a [`TextEncoder`]; the codec picks
//! one when it is built. Everything else is written by [`StandardEncoder`].

pub mod compact;
pub mod hex_literal;
pub mod standard;

pub use compact::CompactEncoder;
pub use hex_literal::{expand_hex_literals, expand_hex_literals_with};
pub use standard::StandardEncoder;

use crate::config::EncoderKind;
use crate::errors::Error;

/// Encodes a single string as a complete YAML document.
pub trait TextEncoder: core::fmt::Debug + Send + Sync {
    /// Returns the YAML document representing `text`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] if the underlying emitter fails.
    fn encode_text(&self, text: &str) -> Result<String, Error>;
}

impl EncoderKind {
    /// Returns the encoder implementing this strategy.
    #[must_use]
    pub fn text_encoder(self) -> &'static dyn TextEncoder {
        match self {
            EncoderKind::Compact => &CompactEncoder,
            EncoderKind::Standard => &StandardEncoder,
        }
    }
}

/// Whether `c` must be written as an escape inside a double-quoted scalar.
///
/// Covers the C0/C1 control ranges, the byte order mark, the Unicode line
/// and paragraph separators, and the two noncharacters YAML excludes.
pub(crate) fn needs_escape(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{2028}' | '\u{2029}' | '\u{FEFF}' | '\u{FFFE}' | '\u{FFFF}'
        )
}
