//! Submodule defining the errors used across the crate.

/// Errors that can occur while encoding or decoding a YAML column.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The YAML library failed to emit or parse the column text.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    /// Expanding `\xHH` literals produced a byte sequence that is not UTF-8.
    #[error("Expanded hex literals are not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 {
        /// Length of the longest valid UTF-8 prefix of the expanded bytes.
        valid_up_to: usize,
    },
    /// The decoded YAML could not be converted into the requested type.
    #[error("Decoded YAML is not a valid `{expected}`: {source}")]
    TypeMismatch {
        /// Name of the type the caller asked for.
        expected: &'static str,
        /// Underlying conversion failure.
        source: serde_yaml::Error,
    },
}
