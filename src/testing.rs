//! Testing utilities for exercising the codec against a real SQLite column.
//!
//! This module is gated behind the `testing` feature.
//!
//! # Provided helpers
//!
//! - [`open_column_table`]: open an in-memory database with a TEXT column
//! - [`store_and_load`]: encode, write, read back and decode a value
//! - [`load_raw`]: write raw column text (or `NULL`) and decode it
//! - [`test_decode`] and [`test_roundtrip`]: fuzz entry points

use rusqlite::{Connection, params};

use crate::codec::TextColumnCodec;
use crate::config::EncoderKind;
use crate::encoding::expand_hex_literals;
use crate::errors::Error;
use serde_yaml::Value;

/// Schema of the table used by the helpers.
pub const COLUMN_TABLE: &str =
    "CREATE TABLE translations (id INTEGER PRIMARY KEY, text TEXT)";

/// Open an in-memory database containing the `translations` table.
///
/// # Panics
///
/// Panics if SQLite cannot open the database or create the table.
#[must_use]
pub fn open_column_table() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute(COLUMN_TABLE, []).unwrap();
    conn
}

fn write_and_read(conn: &Connection, column: Option<&str>) -> Option<String> {
    conn.execute("INSERT INTO translations (text) VALUES (?1)", params![column])
        .unwrap();
    let id = conn.last_insert_rowid();
    conn.query_row(
        "SELECT text FROM translations WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )
    .unwrap()
}

/// Encode `value`, store it in a new row, read the row back and decode it.
///
/// # Errors
///
/// Returns any codec error raised while encoding or decoding.
///
/// # Panics
///
/// Panics if the SQLite statements fail.
pub fn store_and_load(
    conn: &Connection,
    codec: &TextColumnCodec,
    value: &Value,
) -> Result<Value, Error> {
    let encoded = codec.encode(value)?;
    let stored = write_and_read(conn, Some(&encoded));
    codec.decode(stored.as_deref())
}

/// Store `column` verbatim (`None` as `NULL`), read it back and decode it.
///
/// # Errors
///
/// Returns any codec error raised while decoding.
///
/// # Panics
///
/// Panics if the SQLite statements fail.
pub fn load_raw(
    conn: &Connection,
    codec: &TextColumnCodec,
    column: Option<&str>,
) -> Result<Value, Error> {
    let stored = write_and_read(conn, column);
    codec.decode(stored.as_deref())
}

/// Decode arbitrary bytes. Errors are fine, panics are not.
pub fn test_decode(data: &[u8]) {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let _ = TextColumnCodec::new().decode(Some(text));
}

/// Encode arbitrary text with both encoders and check it decodes back.
///
/// Inputs whose expansion still spells a `\xHH` literal are skipped, since
/// decoding expands them a second time.
///
/// # Panics
///
/// Panics if a value does not survive the round trip.
pub fn test_roundtrip(data: &[u8]) {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(expanded) = expand_hex_literals(text) else {
        return;
    };
    if !expand_hex_literals(&expanded).is_ok_and(|again| again == expanded) {
        return;
    }

    let expected = Value::String(expanded.into_owned());
    for encoder in [EncoderKind::Compact, EncoderKind::Standard] {
        let codec = TextColumnCodec::new().with_encoder(encoder);
        let encoded = codec.encode(&Value::from(text)).unwrap();
        let decoded = codec.decode(Some(&encoded)).unwrap();
        assert_eq!(decoded, expected, "{encoder:?} failed for {text:?}");
    }
}
