#![doc = include_str!("../README.md")]
#![deny(clippy::mod_module_files)]

pub mod codec;
pub mod config;
pub mod encoding;
pub mod errors;
#[cfg(feature = "testing")]
pub mod testing;

pub use codec::TextColumnCodec;
pub use config::{CodecConfig, EncoderKind, Utf8Policy};
pub use encoding::{
    CompactEncoder, StandardEncoder, TextEncoder, expand_hex_literals, expand_hex_literals_with,
};
pub use errors::Error;
pub use serde_yaml::Value;
