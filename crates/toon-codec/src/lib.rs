//! Encoder and decoder for TOON (Token-Oriented Object Notation), a compact
//! indentation-based data format.
//!
//! TOON carries the same value model as JSON — null, booleans, numbers,
//! strings, ordered mappings, sequences — but spends far fewer characters on
//! structure. Mappings are `key: value` lines grouped by indentation; arrays
//! declare their length up front and pick the densest of three layouts:
//!
//! ```text
//! tags[3]: a,b,c              # inline: all elements primitive
//! users[2]{id,name}:          # tabular: uniform mappings, one row each
//!   1,alice
//!   2,bob
//! mixed[2]:                   # expanded: anything else
//!   - 42
//!   - nested: true
//! ```
//!
//! # Examples
//!
//! ```
//! use toon_codec::{decode, encode};
//!
//! let doc = "name: toon\nversion: 2";
//! let value = decode(doc)?;
//! assert_eq!(value.as_mapping().unwrap()["version"].as_i64(), Some(2));
//!
//! // Encoding is the exact inverse.
//! assert_eq!(encode(&value)?, doc);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Strictness, indentation width, the field delimiter, and non-finite float
//! handling are configured through [`DecodeOptions`] and [`EncodeOptions`].

mod decoder;
mod encoder;
pub mod error;
pub mod header;
pub mod options;
pub mod reader;
pub mod scan;
pub mod value;

use std::io;

pub use error::{DecodeError, DecodeErrorKind, EncodeError, Location, StreamError};
pub use options::{DecodeOptions, Delimiter, EncodeOptions, NonFinite};
pub use value::{Map, Number, Value};

/// Decode a document with default options (lenient, two-space indent).
pub fn decode(doc: &str) -> Result<Value, DecodeError> {
    decoder::decode_document(doc, &DecodeOptions::default())
}

/// Decode a document with explicit options.
pub fn decode_with_options(doc: &str, options: DecodeOptions) -> Result<Value, DecodeError> {
    decoder::decode_document(doc, &options)
}

/// Encode a value with default options (two-space indent, comma delimiter,
/// non-finite floats rejected).
pub fn encode(value: &Value) -> Result<String, EncodeError> {
    encoder::encode_document(value, &EncodeOptions::default())
}

/// Encode a value with explicit options.
pub fn encode_with_options(value: &Value, options: EncodeOptions) -> Result<String, EncodeError> {
    encoder::encode_document(value, &options)
}

/// Read a whole document from `reader` and decode it.
pub fn from_reader<R: io::Read>(reader: R) -> Result<Value, StreamError> {
    from_reader_with_options(reader, DecodeOptions::default())
}

/// Read a whole document from `reader` and decode it with explicit options.
pub fn from_reader_with_options<R: io::Read>(
    mut reader: R,
    options: DecodeOptions,
) -> Result<Value, StreamError> {
    let mut doc = String::new();
    reader.read_to_string(&mut doc)?;
    Ok(decode_with_options(&doc, options)?)
}

/// Encode `value` and write the text to `writer`.
pub fn to_writer<W: io::Write>(writer: W, value: &Value) -> Result<(), StreamError> {
    to_writer_with_options(writer, value, EncodeOptions::default())
}

/// Encode `value` with explicit options and write the text to `writer`.
pub fn to_writer_with_options<W: io::Write>(
    mut writer: W,
    value: &Value,
    options: EncodeOptions,
) -> Result<(), StreamError> {
    let text = encode_with_options(value, options)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}
