//! Codec configuration.
//!
//! The encoder strategy and the UTF-8 policy are fixed when the codec is
//! built. [`CodecConfig`] derives `Deserialize`, so it can live in an
//! application's own configuration file:
//!
//! ```
//! use unobtrusive_yaml_column::{CodecConfig, EncoderKind, Utf8Policy};
//!
//! let config: CodecConfig = serde_yaml::from_str("encoder: standard\n").unwrap();
//! assert_eq!(config.encoder, EncoderKind::Standard);
//! assert_eq!(config.utf8, Utf8Policy::Strict);
//! ```

use serde::{Deserialize, Serialize};

/// Which encoder is used for textual column values.
///
/// Non-textual values always go through the standard encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderKind {
    /// Light, syck-compatible markup (see [`CompactEncoder`](crate::CompactEncoder)).
    #[default]
    Compact,
    /// Plain `serde_yaml` output (see [`StandardEncoder`](crate::StandardEncoder)).
    Standard,
}

/// What to do when expanded `\xHH` literals do not form valid UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Utf8Policy {
    /// Fail with [`Error::InvalidUtf8`](crate::Error::InvalidUtf8).
    #[default]
    Strict,
    /// Replace invalid sequences with U+FFFD and carry on.
    Lossy,
}

/// Configuration of a [`TextColumnCodec`](crate::TextColumnCodec).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Encoder used for textual values.
    pub encoder: EncoderKind,
    /// Validation applied after hex literal expansion.
    pub utf8: Utf8Policy,
}
