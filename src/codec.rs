//! The YAML column codec.
//!
//! [`TextColumnCodec`] sits between a database column and the application:
//! [`encode`](TextColumnCodec::encode) runs right before the column is
//! written, [`decode`](TextColumnCodec::decode) right after it is read.
//!
//! Both directions expand legacy `\xHH` byte escapes, so characters end up
//! in the column as themselves instead of as their UTF-8 bytes.
//!
//! # Example
//!
//! ```
//! use unobtrusive_yaml_column::{TextColumnCodec, Value};
//!
//! let codec = TextColumnCodec::new();
//!
//! // Text written by an older engine is stored with the literal character.
//! let stored = codec.encode(&Value::from(r"Caf\xC3\xA9")).unwrap();
//! assert_eq!(stored, "--- Café\n");
//!
//! // Rows that still hold escapes are repaired when read.
//! let decoded = codec.decode(Some("--- \"Caf\\xC3\\xA9\"\n")).unwrap();
//! assert_eq!(decoded, Value::from("Café"));
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use tracing::trace;

use crate::config::{CodecConfig, EncoderKind, Utf8Policy};
use crate::encoding::{StandardEncoder, TextEncoder, expand_hex_literals_with};
use crate::errors::Error;

/// Converts column values to and from YAML text.
#[derive(Debug, Clone, Copy)]
pub struct TextColumnCodec {
    config: CodecConfig,
    text_encoder: &'static dyn TextEncoder,
}

impl Default for TextColumnCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl From<CodecConfig> for TextColumnCodec {
    fn from(config: CodecConfig) -> Self {
        Self {
            config,
            text_encoder: config.encoder.text_encoder(),
        }
    }
}

impl TextColumnCodec {
    /// Create a codec with the compact encoder and strict UTF-8 validation.
    #[must_use]
    pub fn new() -> Self {
        Self::from(CodecConfig::default())
    }

    /// Select the encoder used for textual values.
    #[must_use]
    pub fn with_encoder(self, encoder: EncoderKind) -> Self {
        Self::from(CodecConfig {
            encoder,
            ..self.config
        })
    }

    /// Select how invalid UTF-8 produced by hex literal expansion is handled.
    #[must_use]
    pub fn with_utf8_policy(self, utf8: Utf8Policy) -> Self {
        Self::from(CodecConfig { utf8, ..self.config })
    }

    /// Returns the configuration this codec was built from.
    #[must_use]
    pub fn config(&self) -> CodecConfig {
        self.config
    }

    /// Encode a value for storage.
    ///
    /// Strings have their `\xHH` literals expanded and are written by the
    /// configured text encoder. Any other value goes to the
    /// [`StandardEncoder`] untouched; escapes nested inside a mapping or
    /// sequence are not expanded on this path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUtf8`] if a string's literals do not expand to
    /// UTF-8 under [`Utf8Policy::Strict`], or [`Error::Yaml`] if emitting
    /// fails.
    pub fn encode(&self, value: &Value) -> Result<String, Error> {
        let Value::String(text) = value else {
            trace!("encoding non-textual value with the standard encoder");
            return StandardEncoder::encode_value(value);
        };
        let expanded = expand_hex_literals_with(text, self.config.utf8)?;
        trace!(encoder = ?self.config.encoder, "encoding text");
        self.text_encoder.encode_text(&expanded)
    }

    /// Encode any serializable value for storage.
    ///
    /// The value is first converted to a [`Value`], so a `String` or `&str`
    /// takes the textual path of [`encode`](Self::encode).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] if the value cannot be represented as YAML,
    /// plus everything [`encode`](Self::encode) returns.
    pub fn encode_serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, Error> {
        self.encode(&serde_yaml::to_value(value)?)
    }

    /// Decode a stored column value.
    ///
    /// A `NULL` column decodes to [`Value::Null`]. Text has its `\xHH`
    /// literals expanded first; text without any line starting with `---` was
    /// never serialized and is returned as a plain string, everything else is
    /// parsed as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUtf8`] if the literals do not expand to UTF-8
    /// under [`Utf8Policy::Strict`], or [`Error::Yaml`] if parsing fails.
    pub fn decode(&self, stored: Option<&str>) -> Result<Value, Error> {
        let Some(text) = stored else {
            trace!("decoding NULL column");
            return Ok(Value::Null);
        };
        let expanded = expand_hex_literals_with(text, self.config.utf8)?;
        if !is_yaml_document(&expanded) {
            trace!("column holds unserialized text");
            return Ok(Value::String(expanded.into_owned()));
        }
        Ok(serde_yaml::from_str(&expanded)?)
    }

    /// Decode a stored column value into `T`.
    ///
    /// A `NULL` column, or a document that loads as null, yields
    /// `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the decoded YAML does not fit `T`,
    /// plus everything [`decode`](Self::decode) returns.
    pub fn decode_as<T: DeserializeOwned + Default>(&self, stored: Option<&str>) -> Result<T, Error> {
        let value = self.decode(stored)?;
        if value.is_null() {
            return Ok(T::default());
        }
        serde_yaml::from_value(value).map_err(|source| Error::TypeMismatch {
            expected: core::any::type_name::<T>(),
            source,
        })
    }
}

fn is_yaml_document(text: &str) -> bool {
    text.lines().any(|line| line.starts_with("---"))
}
