//! Standard YAML dump backed by `serde_yaml`.
//!
//! The emitter writes control bytes as `\xHH` escapes inside double-quoted
//! scalars. Decoding expands every `\xHH` before parsing, so those escapes
//! are widened to `\u00HH` here.

use std::sync::OnceLock;

use regex::Regex;
use serde_yaml::Value;
use tracing::debug;

use super::TextEncoder;
use crate::errors::Error;

fn control_escape_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\\x(?:[01][0-9A-Fa-f]|7[Ff]|[89][0-9A-Fa-f])").unwrap())
}

/// Encoder writing `serde_yaml`'s own output behind a `---` document marker.
///
/// Used for every non-textual value, and for text when the codec is
/// configured with [`EncoderKind::Standard`](crate::EncoderKind::Standard).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardEncoder;

impl StandardEncoder {
    /// Dump any YAML value as a complete document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] if `serde_yaml` cannot emit the value.
    pub fn encode_value(value: &Value) -> Result<String, Error> {
        let body = serde_yaml::to_string(value)?;
        let yaml = with_document_marker(&body, opens_block_collection(value));
        Ok(widen_control_escapes(yaml, |parsed| parsed == value))
    }
}

impl TextEncoder for StandardEncoder {
    fn encode_text(&self, text: &str) -> Result<String, Error> {
        let body = serde_yaml::to_string(text)?;
        let yaml = with_document_marker(&body, false);
        Ok(widen_control_escapes(yaml, |parsed| {
            matches!(parsed, Value::String(parsed_text) if parsed_text == text)
        }))
    }
}

/// Non-empty mappings and sequences start on the line after the marker.
fn opens_block_collection(value: &Value) -> bool {
    match value {
        Value::Mapping(mapping) => !mapping.is_empty(),
        Value::Sequence(sequence) => !sequence.is_empty(),
        Value::Tagged(tagged) => opens_block_collection(&tagged.value),
        _ => false,
    }
}

/// Rewrite `\xHH` control escapes as `\u00HH`.
///
/// An escape preceded by an odd run of backslashes is escaped text, not an
/// escape. The rewrite is kept only if the document still `reads_back` as
/// the emitted value; otherwise a matching `\xHH` sat in a plain or
/// single-quoted scalar and the emitter's output is returned as is.
fn widen_control_escapes(yaml: String, reads_back: impl Fn(&Value) -> bool) -> String {
    let mut widened = String::with_capacity(yaml.len() + 8);
    let mut last = 0;
    for escape in control_escape_regex().find_iter(&yaml) {
        let backslashes = yaml[..escape.start()]
            .bytes()
            .rev()
            .take_while(|&b| b == b'\\')
            .count();
        if backslashes % 2 == 1 {
            continue;
        }
        widened.push_str(&yaml[last..escape.start()]);
        widened.push_str("\\u00");
        widened.push_str(&escape.as_str()[2..]);
        last = escape.end();
    }
    if last == 0 {
        return yaml;
    }
    widened.push_str(&yaml[last..]);

    match serde_yaml::from_str::<Value>(&widened) {
        Ok(parsed) if reads_back(&parsed) => widened,
        _ => {
            debug!("keeping emitter escapes, widened document reads back differently");
            yaml
        }
    }
}

fn with_document_marker(body: &str, own_line: bool) -> String {
    let separator = if own_line { '\n' } else { ' ' };
    let mut out = String::with_capacity(body.len() + 4);
    out.push_str("---");
    out.push(separator);
    out.push_str(body);
    out
}
