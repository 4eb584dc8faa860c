//! The array-header grammar, shared by the decoder and the encoder.
//!
//! A header line looks like `key[N]:`, `key[N]{f1,f2}:`, or anonymously
//! `[N]:`; a tab or pipe as the last character inside the bracket selects
//! that delimiter for the array body (`[3|]`, `[3\t]{a,b}`).

use crate::options::Delimiter;
use crate::scan;

/// A parsed or to-be-rendered array header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayHeader {
    /// `None` for anonymous headers (list items, bare roots).
    pub key: Option<String>,
    /// Declared element count. Advisory unless decoding in strict mode.
    pub len: usize,
    pub delimiter: Delimiter,
    /// Field names of the tabular form, in column order.
    pub fields: Option<Vec<String>>,
}

/// Outcome of classifying a line against the header grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderParse {
    /// No header shape at all; the caller treats the line as an ordinary
    /// key/value or primitive instead.
    None,
    /// A valid header plus the inline remainder (text after the colon,
    /// trimmed).
    Header(ArrayHeader, String),
    /// The line committed to header syntax (a valid `[N]` bracket) but the
    /// section between `]` and `:` is invalid.
    Malformed,
}

impl ArrayHeader {
    /// Try to read `text` as a header line.
    pub fn parse(text: &str) -> HeaderParse {
        let Some(colon) = scan::find_unquoted(text, ':') else {
            return HeaderParse::None;
        };
        let candidate = text[..colon].trim();
        let inline = text[colon + 1..].trim().to_string();

        let (Some(open), Some(close)) = (
            scan::find_unquoted(candidate, '['),
            scan::find_unquoted(candidate, ']'),
        ) else {
            return HeaderParse::None;
        };
        if close < open {
            return HeaderParse::None;
        }

        let bracket = &candidate[open + 1..close];
        if bracket.is_empty() {
            return HeaderParse::None;
        }
        let (digits, delimiter) = match bracket.chars().last().and_then(Delimiter::from_suffix) {
            Some(d) => (&bracket[..bracket.len() - 1], d),
            None => (bracket, Delimiter::Comma),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return HeaderParse::None;
        }
        // An all-digit length commits the line to header syntax; anything
        // wrong past this point is malformed rather than a fallback.
        let Ok(len) = digits.parse::<usize>() else {
            return HeaderParse::Malformed;
        };

        let after = candidate[close + 1..].trim();
        let fields = if after.is_empty() {
            None
        } else if after.starts_with('{') && after.ends_with('}') && after.len() >= 2 {
            let interior = after[1..after.len() - 1].trim();
            if interior.is_empty() {
                None
            } else {
                Some(
                    scan::split_delimited(interior, delimiter.as_char())
                        .into_iter()
                        .map(|f| scan::decode_key(&f))
                        .collect(),
                )
            }
        } else {
            return HeaderParse::Malformed;
        };

        let key_part = candidate[..open].trim();
        let key = if key_part.is_empty() {
            None
        } else {
            Some(scan::decode_key(key_part))
        };

        HeaderParse::Header(
            ArrayHeader {
                key,
                len,
                delimiter,
                fields,
            },
            inline,
        )
    }

    /// Render this header, without the trailing space or body.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(key) = &self.key {
            out.push_str(&scan::format_key(key));
        }
        out.push('[');
        out.push_str(&self.len.to_string());
        if let Some(suffix) = self.delimiter.suffix() {
            out.push(suffix);
        }
        out.push(']');
        if let Some(fields) = &self.fields {
            out.push('{');
            let rendered: Vec<String> = fields.iter().map(|f| scan::format_key(f)).collect();
            out.push_str(&rendered.join(&self.delimiter.as_char().to_string()));
            out.push('}');
        }
        out.push(':');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Option<(ArrayHeader, String)> {
        match ArrayHeader::parse(text) {
            HeaderParse::Header(header, inline) => Some((header, inline)),
            HeaderParse::None | HeaderParse::Malformed => None,
        }
    }

    #[test]
    fn keyed_header_with_inline_values() {
        let (h, inline) = parse("tags[3]: a,b,c").unwrap();
        assert_eq!(h.key.as_deref(), Some("tags"));
        assert_eq!(h.len, 3);
        assert_eq!(h.delimiter, Delimiter::Comma);
        assert_eq!(h.fields, None);
        assert_eq!(inline, "a,b,c");
    }

    #[test]
    fn anonymous_header() {
        let (h, inline) = parse("[2]:").unwrap();
        assert_eq!(h.key, None);
        assert_eq!(h.len, 2);
        assert_eq!(inline, "");
    }

    #[test]
    fn tabular_header_with_fields() {
        let (h, _) = parse("users[2]{id,name}:").unwrap();
        assert_eq!(h.fields.as_deref(), Some(&["id".to_string(), "name".to_string()][..]));
    }

    #[test]
    fn delimiter_suffixes() {
        let (h, _) = parse("xs[3|]:").unwrap();
        assert_eq!(h.delimiter, Delimiter::Pipe);
        let (h, _) = parse("xs[3\t]{a\tb}:").unwrap();
        assert_eq!(h.delimiter, Delimiter::Tab);
        assert_eq!(h.fields.as_deref(), Some(&["a".to_string(), "b".to_string()][..]));
    }

    #[test]
    fn quoted_keys_and_fields_are_decoded() {
        let (h, _) = parse("\"odd key\"[1]{\"f 1\",plain}:").unwrap();
        assert_eq!(h.key.as_deref(), Some("odd key"));
        assert_eq!(
            h.fields.as_deref(),
            Some(&["f 1".to_string(), "plain".to_string()][..])
        );
    }

    #[test]
    fn non_headers_fall_through() {
        assert_eq!(ArrayHeader::parse("key: value"), HeaderParse::None);
        assert_eq!(ArrayHeader::parse("key[]: x"), HeaderParse::None);
        assert_eq!(ArrayHeader::parse("key[abc]: x"), HeaderParse::None);
        assert_eq!(ArrayHeader::parse("no colon at all"), HeaderParse::None);
        assert_eq!(ArrayHeader::parse("\"a[3]:\""), HeaderParse::None);
        // Empty field braces mean no fields, not a malformed header.
        let (h, _) = parse("xs[0]{}:").unwrap();
        assert_eq!(h.fields, None);
    }

    #[test]
    fn committed_brackets_with_bad_tails_are_malformed() {
        // A valid `[N]` bracket commits the line to header syntax, so junk
        // before the colon is an error rather than a plain-field fallback.
        assert_eq!(ArrayHeader::parse("key[3] junk: x"), HeaderParse::Malformed);
        assert_eq!(ArrayHeader::parse("key[3] {a,b: x"), HeaderParse::Malformed);
        // All-digit lengths beyond usize are malformed, not a fallback.
        assert_eq!(
            ArrayHeader::parse("key[99999999999999999999999999]: x"),
            HeaderParse::Malformed
        );
    }

    #[test]
    fn render_inverts_parse() {
        for text in ["tags[3]:", "[2]:", "users[2]{id,name}:", "xs[3|]:", "m[1|]{a|b}:"] {
            let (h, _) = parse(text).unwrap();
            assert_eq!(h.render(), text);
        }
        let quoted = "\"a b\"[1]{\"c d\"}:";
        let (h, _) = parse(quoted).unwrap();
        assert_eq!(h.render(), quoted);
    }
}
