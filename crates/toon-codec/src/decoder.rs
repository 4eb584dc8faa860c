//! Recursive-descent decoder over logical lines.
//!
//! The grammar is line-oriented: each call site knows which indent level it
//! expects, peeks the next line, and either consumes it, recurses one level
//! deeper, or returns to its caller. A line more than one level deeper than
//! its parent allows is always an error.

use crate::error::{DecodeError, DecodeErrorKind};
use crate::header::{ArrayHeader, HeaderParse};
use crate::options::DecodeOptions;
use crate::reader::LineReader;
use crate::scan;
use crate::value::{Map, Number, Value};

/// Decode a whole document into a [`Value`].
pub(crate) fn decode_document(doc: &str, options: &DecodeOptions) -> Result<Value, DecodeError> {
    let decoder = Decoder {
        strict: options.strict,
    };
    let mut reader = LineReader::new(doc, options.indent_unit);
    decoder.parse_root(&mut reader)
}

struct Decoder {
    strict: bool,
}

impl Decoder {
    fn parse_root(&self, reader: &mut LineReader) -> Result<Value, DecodeError> {
        let Some(first) = reader.peek().cloned() else {
            return Ok(Value::Mapping(Map::new()));
        };

        // A bare `[N]:` header at the top opens a root sequence.
        if first.level == 0 {
            if let HeaderParse::Header(header, inline) = ArrayHeader::parse(&first.content) {
                if header.key.is_none() {
                    reader.advance();
                    return self.parse_array_body(reader, 0, &header, &inline, first.offset);
                }
            }
        }

        // A single line with no key/value separator is a root primitive.
        if reader.len() == 1 && scan::find_unquoted(&first.content, ':').is_none() {
            reader.advance();
            return self.parse_primitive(&first.content, first.offset);
        }

        Ok(Value::Mapping(self.parse_mapping(reader, 0)?))
    }

    /// Consume all sibling `key: value` lines at exactly `level`.
    fn parse_mapping(&self, reader: &mut LineReader, level: usize) -> Result<Map, DecodeError> {
        let mut map = Map::new();
        while let Some(next) = reader.peek() {
            if next.level < level {
                break;
            }
            if next.level > level {
                return Err(DecodeError::new(
                    DecodeErrorKind::UnexpectedIndentation,
                    next.offset,
                ));
            }
            let Some(line) = reader.advance() else { break };

            // A key portion matching the header grammar wins over key:value.
            match ArrayHeader::parse(&line.content) {
                HeaderParse::Header(header, inline) => {
                    let key = header.key.clone().unwrap_or_default();
                    let value =
                        self.parse_array_body(reader, level, &header, &inline, line.offset)?;
                    map.insert(key, value);
                    continue;
                }
                HeaderParse::Malformed => {
                    return Err(DecodeError::new(
                        DecodeErrorKind::MalformedHeader,
                        line.offset,
                    ));
                }
                HeaderParse::None => {}
            }

            let colon = scan::find_unquoted(&line.content, ':').ok_or_else(|| {
                DecodeError::new(DecodeErrorKind::MissingColon, line.offset)
            })?;
            let key = scan::decode_key(line.content[..colon].trim());
            let value_part = line.content[colon + 1..].trim().to_string();
            let value = self.parse_field_value(reader, level, &value_part, line.offset + colon + 1)?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// The value side of a `key:` line: inline primitive, nested mapping
    /// block one level deeper, or an empty mapping when neither is present.
    fn parse_field_value(
        &self,
        reader: &mut LineReader,
        level: usize,
        value_part: &str,
        offset: usize,
    ) -> Result<Value, DecodeError> {
        if !value_part.is_empty() {
            return self.parse_primitive(value_part, offset);
        }
        match reader.peek() {
            Some(next) if next.level > level => {
                Ok(Value::Mapping(self.parse_mapping(reader, level + 1)?))
            }
            _ => Ok(Value::Mapping(Map::new())),
        }
    }

    /// The body of an array whose header line sits at `level`: inline values
    /// after the colon, tabular rows, or `- ` items one level deeper.
    fn parse_array_body(
        &self,
        reader: &mut LineReader,
        level: usize,
        header: &ArrayHeader,
        inline: &str,
        offset: usize,
    ) -> Result<Value, DecodeError> {
        // Inline values take precedence: a field list on the same line is
        // ignored once the colon carries data.
        let items = if !inline.is_empty() {
            scan::split_delimited(inline, header.delimiter.as_char())
                .iter()
                .map(|cell| self.parse_primitive(cell, offset))
                .collect::<Result<Vec<_>, _>>()?
        } else if let Some(fields) = &header.fields {
            self.parse_tabular_rows(reader, level + 1, header, fields)?
        } else {
            self.parse_list_items(reader, level + 1)?
        };

        if self.strict && items.len() != header.len {
            return Err(DecodeError::new(
                DecodeErrorKind::LengthMismatch {
                    declared: header.len,
                    found: items.len(),
                },
                offset,
            ));
        }
        Ok(Value::Sequence(items))
    }

    /// Delimited rows at exactly `level`, one mapping per row.
    ///
    /// Outside strict mode a short row fills the missing trailing cells with
    /// empty strings and a long row drops the extras.
    fn parse_tabular_rows(
        &self,
        reader: &mut LineReader,
        level: usize,
        header: &ArrayHeader,
        fields: &[String],
    ) -> Result<Vec<Value>, DecodeError> {
        let mut rows = Vec::new();
        while let Some(next) = reader.peek() {
            if next.level < level {
                break;
            }
            if next.level > level {
                return Err(DecodeError::new(
                    DecodeErrorKind::UnexpectedIndentation,
                    next.offset,
                ));
            }
            let Some(line) = reader.advance() else { break };

            let cells = scan::split_delimited(&line.content, header.delimiter.as_char());
            if self.strict && cells.len() != fields.len() {
                return Err(DecodeError::new(
                    DecodeErrorKind::RowLengthMismatch {
                        expected: fields.len(),
                        found: cells.len(),
                    },
                    line.offset,
                ));
            }
            let mut row = Map::new();
            for (i, field) in fields.iter().enumerate() {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                row.insert(field.clone(), self.parse_primitive(cell, line.offset)?);
            }
            rows.push(Value::Mapping(row));
        }
        Ok(rows)
    }

    /// `- ` items at exactly `level`. A non-marker line at that level ends
    /// the list (it belongs to an enclosing mapping).
    fn parse_list_items(
        &self,
        reader: &mut LineReader,
        level: usize,
    ) -> Result<Vec<Value>, DecodeError> {
        let mut items = Vec::new();
        while let Some(next) = reader.peek() {
            if next.level < level {
                break;
            }
            if next.level > level {
                return Err(DecodeError::new(
                    DecodeErrorKind::UnexpectedIndentation,
                    next.offset,
                ));
            }
            if !next.content.starts_with("- ") {
                break;
            }
            let Some(line) = reader.advance() else { break };
            let item_text = line.content[2..].trim().to_string();
            let item_offset = line.offset + 2;

            match ArrayHeader::parse(&item_text) {
                HeaderParse::Header(header, inline) if header.key.is_none() => {
                    // Anonymous nested array: its body sits below the marker.
                    items.push(self.parse_array_body(
                        reader,
                        level,
                        &header,
                        &inline,
                        item_offset,
                    )?);
                    continue;
                }
                HeaderParse::Malformed => {
                    return Err(DecodeError::new(
                        DecodeErrorKind::MalformedHeader,
                        item_offset,
                    ));
                }
                _ => {}
            }
            if scan::find_unquoted(&item_text, ':').is_some() {
                items.push(self.parse_object_item(reader, level, &item_text, item_offset)?);
            } else {
                items.push(self.parse_primitive(&item_text, item_offset)?);
            }
        }
        Ok(items)
    }

    /// A mapping item: the first field rides the `- ` marker line, the
    /// remaining fields follow one level deeper.
    fn parse_object_item(
        &self,
        reader: &mut LineReader,
        level: usize,
        text: &str,
        offset: usize,
    ) -> Result<Value, DecodeError> {
        let mut map = Map::new();

        match ArrayHeader::parse(text) {
            HeaderParse::Header(header, inline) => {
                let key = header.key.clone().unwrap_or_default();
                let value = self.parse_array_body(reader, level + 1, &header, &inline, offset)?;
                map.insert(key, value);
            }
            HeaderParse::Malformed => {
                return Err(DecodeError::new(DecodeErrorKind::MalformedHeader, offset));
            }
            HeaderParse::None => {
                let colon = scan::find_unquoted(text, ':')
                    .ok_or_else(|| DecodeError::new(DecodeErrorKind::MissingColon, offset))?;
                let key = scan::decode_key(text[..colon].trim());
                let value_part = text[colon + 1..].trim().to_string();
                let value = self.parse_field_value(reader, level + 1, &value_part, offset)?;
                map.insert(key, value);
            }
        }

        // Sibling fields, one level below the marker; later keys overwrite.
        for (k, v) in self.parse_mapping(reader, level + 1)? {
            map.insert(k, v);
        }
        Ok(Value::Mapping(map))
    }

    /// A leaf token: quoted string, keyword, number, or bare string.
    fn parse_primitive(&self, text: &str, offset: usize) -> Result<Value, DecodeError> {
        let text = text.trim();

        if let Some(rest) = text.strip_prefix('"') {
            if !rest.is_empty() && rest.ends_with('"') {
                return Ok(Value::String(scan::unescape(&rest[..rest.len() - 1])));
            }
            return Err(DecodeError::new(
                DecodeErrorKind::UnterminatedString,
                offset,
            ));
        }

        match text {
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            "null" => return Ok(Value::Null),
            _ => {}
        }

        if scan::is_numeric_token(text) {
            // `0123`-style tokens stay strings; the encoder quotes them.
            if scan::has_ambiguous_leading_zero(text) {
                return Ok(Value::String(text.to_string()));
            }
            if text.contains(['.', 'e', 'E']) {
                if let Ok(f) = text.parse::<f64>() {
                    return Ok(Value::Number(Number::Float(f)));
                }
            } else if let Ok(i) = text.parse::<i64>() {
                return Ok(Value::Number(Number::Integer(i)));
            } else if let Ok(f) = text.parse::<f64>() {
                // Integer literal beyond i64 range.
                return Ok(Value::Number(Number::Float(f)));
            }
        }

        Ok(Value::String(text.to_string()))
    }
}
