//! Expansion of legacy `\xHH` byte escapes.
//!
//! Older YAML engines wrote every byte of a non-ASCII character as its own
//! escape, so `é` ended up in the database as `\xC3\xA9`. Turning each escape
//! back into its raw byte and reading the result as UTF-8 restores the
//! character.
//!
//! Only uppercase hex digits are recognised: `\xc3\xa9` is left untouched.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::bytes::Regex;
use tracing::{debug, warn};

use crate::config::Utf8Policy;
use crate::errors::Error;

fn hex_literal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\\x[0-9A-F]{2}").unwrap())
}

/// Expand `\xHH` literals in `text`, rejecting results that are not UTF-8.
///
/// Returns the input unchanged (borrowed) when it holds no literal.
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] if the expanded bytes are not valid UTF-8.
///
/// # Example
///
/// ```
/// use unobtrusive_yaml_column::expand_hex_literals;
///
/// assert_eq!(expand_hex_literals(r"Caf\xC3\xA9").unwrap(), "Café");
/// assert_eq!(expand_hex_literals(r"Caf\xc3\xa9").unwrap(), r"Caf\xc3\xa9");
/// ```
pub fn expand_hex_literals(text: &str) -> Result<Cow<'_, str>, Error> {
    expand_hex_literals_with(text, Utf8Policy::Strict)
}

/// Expand `\xHH` literals in `text` using the given UTF-8 policy.
///
/// With [`Utf8Policy::Lossy`], invalid sequences become U+FFFD instead of
/// failing.
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] under [`Utf8Policy::Strict`] if the
/// expanded bytes are not valid UTF-8.
pub fn expand_hex_literals_with(text: &str, policy: Utf8Policy) -> Result<Cow<'_, str>, Error> {
    let regex = hex_literal_regex();
    let haystack = text.as_bytes();
    if !regex.is_match(haystack) {
        return Ok(Cow::Borrowed(text));
    }

    let mut expanded = Vec::with_capacity(haystack.len());
    let mut last = 0;
    let mut count = 0usize;
    for literal in regex.find_iter(haystack) {
        expanded.extend_from_slice(&haystack[last..literal.start()]);
        let mut byte = [0u8; 1];
        match hex::decode_to_slice(&literal.as_bytes()[2..], &mut byte) {
            Ok(()) => {
                expanded.push(byte[0]);
                count += 1;
            }
            Err(_) => expanded.extend_from_slice(literal.as_bytes()),
        }
        last = literal.end();
    }
    expanded.extend_from_slice(&haystack[last..]);
    debug!(count, "expanded hex literals");

    match String::from_utf8(expanded) {
        Ok(expanded) => Ok(Cow::Owned(expanded)),
        Err(err) => {
            let valid_up_to = err.utf8_error().valid_up_to();
            match policy {
                Utf8Policy::Strict => Err(Error::InvalidUtf8 { valid_up_to }),
                Utf8Policy::Lossy => {
                    warn!(valid_up_to, "hex literals expanded to invalid UTF-8, replacing");
                    Ok(Cow::Owned(
                        String::from_utf8_lossy(err.as_bytes()).into_owned(),
                    ))
                }
            }
        }
    }
}
