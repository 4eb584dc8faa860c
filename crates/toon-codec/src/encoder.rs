//! Encoder with representation selection.
//!
//! For every sequence the encoder picks the densest representation the
//! elements allow: inline when all elements are primitive, tabular when they
//! are mappings with one shared key order and primitive cells, expanded
//! `- ` items otherwise. Output lines are newline-separated with no trailing
//! newline and no trailing spaces.

use crate::error::EncodeError;
use crate::header::ArrayHeader;
use crate::options::{EncodeOptions, NonFinite};
use crate::scan;
use crate::value::{Map, Number, Value};

/// Encode a [`Value`] into its textual form.
pub(crate) fn encode_document(
    value: &Value,
    options: &EncodeOptions,
) -> Result<String, EncodeError> {
    let mut encoder = Encoder {
        options: *options,
        out: String::new(),
    };
    encoder.encode_root(value)?;
    Ok(encoder.out)
}

struct Encoder {
    options: EncodeOptions,
    out: String,
}

impl Encoder {
    fn encode_root(&mut self, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Mapping(map) => {
                for (key, field) in map {
                    self.encode_field(key, field, 0)?;
                }
            }
            Value::Sequence(items) => {
                self.push_line(0, "");
                self.append_array(None, items, 0)?;
            }
            primitive => {
                let token = self.format_primitive(primitive)?;
                self.push_line(0, &token);
            }
        }
        Ok(())
    }

    /// One `key: value` field of a mapping block at `depth`.
    fn encode_field(&mut self, key: &str, value: &Value, depth: usize) -> Result<(), EncodeError> {
        match value {
            Value::Mapping(map) => {
                let line = format!("{}:", scan::format_key(key));
                self.push_line(depth, &line);
                for (k, v) in map {
                    self.encode_field(k, v, depth + 1)?;
                }
            }
            Value::Sequence(items) => {
                self.push_line(depth, "");
                self.append_array(Some(key), items, depth)?;
            }
            primitive => {
                let token = self.format_primitive(primitive)?;
                self.push_line(depth, &format!("{}: {}", scan::format_key(key), token));
            }
        }
        Ok(())
    }

    /// Append an array header to the current line and emit its body one
    /// level deeper.
    fn append_array(
        &mut self,
        key: Option<&str>,
        items: &[Value],
        depth: usize,
    ) -> Result<(), EncodeError> {
        let delimiter = self.options.delimiter;

        if items.iter().all(Value::is_primitive) {
            let header = ArrayHeader {
                key: key.map(str::to_string),
                len: items.len(),
                delimiter,
                fields: None,
            };
            self.out.push_str(&header.render());
            if !items.is_empty() {
                let cells = items
                    .iter()
                    .map(|item| self.format_primitive(item))
                    .collect::<Result<Vec<_>, _>>()?;
                self.out.push(' ');
                self.out.push_str(&cells.join(&delimiter.as_char().to_string()));
            }
            return Ok(());
        }

        if let Some(fields) = tabular_fields(items) {
            let header = ArrayHeader {
                key: key.map(str::to_string),
                len: items.len(),
                delimiter,
                fields: Some(fields.clone()),
            };
            self.out.push_str(&header.render());
            for item in items {
                let Value::Mapping(map) = item else { continue };
                let cells = fields
                    .iter()
                    .map(|f| self.format_primitive(map.get(f).unwrap_or(&Value::Null)))
                    .collect::<Result<Vec<_>, _>>()?;
                let row = cells.join(&delimiter.as_char().to_string());
                self.push_line(depth + 1, &row);
            }
            return Ok(());
        }

        let header = ArrayHeader {
            key: key.map(str::to_string),
            len: items.len(),
            delimiter,
            fields: None,
        };
        self.out.push_str(&header.render());
        for item in items {
            self.encode_list_item(item, depth + 1)?;
        }
        Ok(())
    }

    /// One `- ` item of an expanded array, marker at `depth`.
    fn encode_list_item(&mut self, item: &Value, depth: usize) -> Result<(), EncodeError> {
        match item {
            Value::Mapping(map) => {
                let mut fields = map.iter();
                let Some((first_key, first_value)) = fields.next() else {
                    return Err(EncodeError::EmptyMappingItem);
                };
                self.push_line(depth, "- ");
                self.encode_item_field(first_key, first_value, depth)?;
                for (k, v) in fields {
                    self.encode_field(k, v, depth + 1)?;
                }
            }
            Value::Sequence(items) => {
                self.push_line(depth, "- ");
                self.append_array(None, items, depth)?;
            }
            primitive => {
                let token = self.format_primitive(primitive)?;
                self.push_line(depth, &format!("- {token}"));
            }
        }
        Ok(())
    }

    /// The first field of a mapping item, appended to its `- ` marker line.
    /// Nested blocks of that field land two levels below the marker, the
    /// same column its siblings use.
    fn encode_item_field(
        &mut self,
        key: &str,
        value: &Value,
        depth: usize,
    ) -> Result<(), EncodeError> {
        match value {
            Value::Mapping(map) => {
                self.out.push_str(&scan::format_key(key));
                self.out.push(':');
                for (k, v) in map {
                    self.encode_field(k, v, depth + 2)?;
                }
            }
            Value::Sequence(items) => {
                self.append_array(Some(key), items, depth + 1)?;
            }
            primitive => {
                let token = self.format_primitive(primitive)?;
                self.out.push_str(&scan::format_key(key));
                self.out.push_str(": ");
                self.out.push_str(&token);
            }
        }
        Ok(())
    }

    /// Start a new output line at `depth`.
    fn push_line(&mut self, depth: usize, text: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        for _ in 0..depth * self.options.indent_unit.max(1) {
            self.out.push(' ');
        }
        self.out.push_str(text);
    }

    fn format_primitive(&self, value: &Value) -> Result<String, EncodeError> {
        match value {
            Value::Null => Ok("null".to_string()),
            Value::Bool(true) => Ok("true".to_string()),
            Value::Bool(false) => Ok("false".to_string()),
            Value::Number(n) => self.format_number(*n),
            Value::String(s) => {
                if scan::string_needs_quoting(s, self.options.delimiter.as_char()) {
                    Ok(scan::escape_and_quote(s))
                } else {
                    Ok(s.clone())
                }
            }
            // Containers never reach here; representation selection routes
            // them before token formatting.
            Value::Mapping(_) | Value::Sequence(_) => Ok("null".to_string()),
        }
    }

    fn format_number(&self, n: Number) -> Result<String, EncodeError> {
        match n {
            Number::Integer(i) => Ok(i.to_string()),
            Number::Float(f) => {
                if !f.is_finite() {
                    return match self.options.non_finite {
                        NonFinite::Error => Err(EncodeError::NonFinite { value: f }),
                        NonFinite::Null => Ok("null".to_string()),
                    };
                }
                // A forced `.0` keeps whole floats distinct from integers.
                if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    Ok(format!("{}.0", f as i64))
                } else {
                    Ok(format!("{f}"))
                }
            }
        }
    }
}

/// The shared column set of a tabular array, or `None` when the elements do
/// not qualify: every element must be a non-empty mapping with the same keys
/// in the same order and primitive values only.
fn tabular_fields(items: &[Value]) -> Option<Vec<String>> {
    let first = match items.first()? {
        Value::Mapping(map) if !map.is_empty() => map,
        _ => return None,
    };
    let fields: Vec<&String> = first.keys().collect();

    for item in items {
        let map: &Map = match item {
            Value::Mapping(map) => map,
            _ => return None,
        };
        if map.len() != fields.len() {
            return None;
        }
        if !map.keys().zip(&fields).all(|(k, f)| k == *f) {
            return None;
        }
        if !map.values().all(Value::is_primitive) {
            return None;
        }
    }
    Some(fields.into_iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, Value)]) -> Value {
        Value::Mapping(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn tabular_detection() {
        let uniform = [
            map(&[("id", 1i64.into()), ("name", "a".into())]),
            map(&[("id", 2i64.into()), ("name", "b".into())]),
        ];
        assert_eq!(
            tabular_fields(&uniform),
            Some(vec!["id".to_string(), "name".to_string()])
        );

        // Key order matters.
        let reordered = [
            map(&[("id", 1i64.into()), ("name", "a".into())]),
            map(&[("name", "b".into()), ("id", 2i64.into())]),
        ];
        assert_eq!(tabular_fields(&reordered), None);

        // Nested values disqualify.
        let nested = [map(&[("id", map(&[]))])];
        assert_eq!(tabular_fields(&nested), None);

        assert_eq!(tabular_fields(&[]), None);
        assert_eq!(tabular_fields(&[map(&[])]), None);
        assert_eq!(tabular_fields(&[Value::from(1i64)]), None);
    }

    #[test]
    fn number_formatting() {
        let enc = Encoder {
            options: EncodeOptions::default(),
            out: String::new(),
        };
        assert_eq!(enc.format_number(Number::Integer(-7)).unwrap(), "-7");
        assert_eq!(enc.format_number(Number::Float(42.0)).unwrap(), "42.0");
        assert_eq!(enc.format_number(Number::Float(-0.5)).unwrap(), "-0.5");
        assert_eq!(enc.format_number(Number::Float(3.25)).unwrap(), "3.25");
        assert!(enc.format_number(Number::Float(f64::NAN)).is_err());
        assert!(enc.format_number(Number::Float(f64::INFINITY)).is_err());

        let lossy = Encoder {
            options: EncodeOptions::default().with_non_finite(NonFinite::Null),
            out: String::new(),
        };
        assert_eq!(lossy.format_number(Number::Float(f64::NAN)).unwrap(), "null");
    }
}
