//! Quote-aware tokenizer primitives shared by the decoder and the encoder.
//!
//! Everything that decides "is this token a number / a keyword / a bare key"
//! lives here, in one place. The decoder's coercion rules and the encoder's
//! quoting rules consult the same predicates, so the two directions cannot
//! drift apart.

/// Find the first occurrence of `target` that is not inside a quoted span.
///
/// Quote state toggles on a `"` preceded by an even number of consecutive
/// backslashes; the backslash run resets after every other character.
pub fn find_unquoted(text: &str, target: char) -> Option<usize> {
    let mut in_quote = false;
    let mut backslash = false;
    for (i, c) in text.char_indices() {
        if c == '\\' {
            backslash = !backslash;
            continue;
        }
        if c == '"' && !backslash {
            in_quote = !in_quote;
        }
        backslash = false;
        if c == target && !in_quote {
            return Some(i);
        }
    }
    None
}

/// Split `text` on unquoted occurrences of `delim`, trimming each field.
///
/// Always yields at least one field: splitting an empty or delimiter-free
/// string produces a single field.
pub fn split_delimited(text: &str, delim: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut backslash = false;

    for c in text.chars() {
        if c == '\\' {
            backslash = !backslash;
            current.push(c);
            continue;
        }
        if c == '"' && !backslash {
            in_quote = !in_quote;
            current.push(c);
            backslash = false;
            continue;
        }
        backslash = false;

        if c == delim && !in_quote {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Unescape the inner content of a quoted literal.
///
/// Recognized pairs: `\\`, `\"`, `\n`, `\r`, `\t`. Any other `\X` passes
/// through literally, as does a trailing lone backslash.
pub fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Wrap `text` in quotes, escaping the exact inverse of [`unescape`].
///
/// Control characters other than newline, carriage return, and tab pass
/// through unchanged.
pub fn escape_and_quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Decode a key token: quoted keys are unescaped, everything else is verbatim.
pub fn decode_key(text: &str) -> String {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        unescape(&text[1..text.len() - 1])
    } else {
        text.to_string()
    }
}

/// Render a key token: verbatim when it matches the bare-key grammar,
/// quoted and escaped otherwise.
pub fn format_key(key: &str) -> String {
    if is_unquoted_key(key) {
        key.to_string()
    } else {
        escape_and_quote(key)
    }
}

/// Bare-key grammar: `[A-Za-z_][A-Za-z0-9_.]*`.
pub fn is_unquoted_key(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Generic numeric token: `-?digits(.digits)?([eE][+-]?digits)?`.
pub fn is_numeric_token(s: &str) -> bool {
    let rest = s.strip_prefix('-').unwrap_or(s);
    let bytes = rest.as_bytes();
    let mut i = 0;

    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == 0 {
        return false;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == frac_start {
            return false;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

/// Integer token with a superfluous leading zero: `-?0digits+`.
pub fn is_leading_zero_token(s: &str) -> bool {
    let rest = s.strip_prefix('-').unwrap_or(s);
    rest.len() > 1 && rest.starts_with('0') && rest.as_bytes()[1..].iter().all(u8::is_ascii_digit)
}

/// Numeric-looking tokens the decoder nonetheless keeps as strings: a leading
/// zero followed by anything but the decimal point (`0123`, `00.5`, `0e3`).
///
/// Every such token also satisfies [`is_numeric_token`], so the encoder
/// already quotes the corresponding strings.
pub fn has_ambiguous_leading_zero(s: &str) -> bool {
    let rest = s.strip_prefix('-').unwrap_or(s);
    rest.len() > 1 && rest.starts_with('0') && rest.as_bytes()[1] != b'.'
}

/// Decide whether a string value must be quoted to survive the round trip.
///
/// `delim` is the active delimiter of the enclosing context (comma unless the
/// document was configured for tab or pipe).
pub fn string_needs_quoting(s: &str, delim: char) -> bool {
    if s.is_empty() {
        return true;
    }
    // The decoder trims value tokens, so any trimmable edge must be quoted.
    if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
        return true;
    }
    if s.starts_with('-') {
        return true;
    }
    if matches!(s, "true" | "false" | "null") {
        return true;
    }
    if is_numeric_token(s) || is_leading_zero_token(s) {
        return true;
    }
    if s.contains([':', '"', '\\', '{', '}', '[', ']']) {
        return true;
    }
    if s.contains(['\n', '\r', '\t']) {
        return true;
    }
    s.contains(delim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_unquoted_skips_quoted_spans() {
        assert_eq!(find_unquoted("a: b", ':'), Some(1));
        assert_eq!(find_unquoted("\"a:b\": c", ':'), Some(5));
        assert_eq!(find_unquoted("\"a:b\"", ':'), None);
        assert_eq!(find_unquoted("no colon", ':'), None);
    }

    #[test]
    fn find_unquoted_honors_escaped_quotes() {
        // The \" does not close the quote, so the colon stays inside it.
        assert_eq!(find_unquoted(r#""a\":b""#, ':'), None);
        // The \\ before the quote is a literal backslash; the quote closes.
        assert_eq!(find_unquoted(r#""a\\":b"#, ':'), Some(5));
    }

    #[test]
    fn split_delimited_trims_and_respects_quotes() {
        assert_eq!(split_delimited("a, b ,c", ','), vec!["a", "b", "c"]);
        assert_eq!(split_delimited("\"a,b\",c", ','), vec!["\"a,b\"", "c"]);
        assert_eq!(split_delimited("", ','), vec![""]);
        assert_eq!(split_delimited("solo", ','), vec!["solo"]);
        assert_eq!(split_delimited("a|b", '|'), vec!["a", "b"]);
    }

    #[test]
    fn unescape_handles_known_and_unknown_pairs() {
        assert_eq!(unescape(r"a\nb"), "a\nb");
        assert_eq!(unescape(r"a\tb\r"), "a\tb\r");
        assert_eq!(unescape(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(unescape(r"c:\\temp"), r"c:\temp");
        assert_eq!(unescape(r"\q"), r"\q");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn escape_and_quote_inverts_unescape() {
        for s in ["", "plain", "a\nb", "tab\there", "q\"q", "back\\slash"] {
            let quoted = escape_and_quote(s);
            assert!(quoted.starts_with('"') && quoted.ends_with('"'));
            assert_eq!(unescape(&quoted[1..quoted.len() - 1]), s);
        }
    }

    #[test]
    fn numeric_token_shapes() {
        for s in ["0", "42", "-7", "3.14", "-0.5", "1e9", "2.5E-3", "05"] {
            assert!(is_numeric_token(s), "{s} should be numeric");
        }
        for s in ["", "-", ".5", "1.", "1e", "1e+", "a1", "1a", "1.2.3"] {
            assert!(!is_numeric_token(s), "{s} should not be numeric");
        }
    }

    #[test]
    fn leading_zero_detection() {
        assert!(is_leading_zero_token("0123"));
        assert!(is_leading_zero_token("-0123"));
        assert!(!is_leading_zero_token("0"));
        assert!(!is_leading_zero_token("0.5"));
        assert!(has_ambiguous_leading_zero("00.5"));
        assert!(has_ambiguous_leading_zero("0e3"));
        assert!(!has_ambiguous_leading_zero("0.5"));
        assert!(!has_ambiguous_leading_zero("0"));
    }

    #[test]
    fn quoting_rules_cover_the_ambiguous_cases() {
        for s in [
            "", " x", "x ", "-x", "true", "false", "null", "123", "0123", "3.14", "a:b", "a\"b",
            "a\\b", "a{b", "a]b", "line\nbreak", "tab\tstop", "a,b",
        ] {
            assert!(string_needs_quoting(s, ','), "{s:?} must be quoted");
        }
        for s in ["hello", "hello world", "a|b", "x.y", "v1.2.3x"] {
            assert!(!string_needs_quoting(s, ','), "{s:?} must stay bare");
        }
        // The active delimiter switches which separator forces quoting.
        assert!(string_needs_quoting("a|b", '|'));
        assert!(!string_needs_quoting("a,b", '|'));
    }

    #[test]
    fn key_round_trip() {
        assert_eq!(format_key("plain_key.v2"), "plain_key.v2");
        assert_eq!(format_key("has space"), "\"has space\"");
        assert_eq!(format_key(""), "\"\"");
        assert_eq!(decode_key("\"has space\""), "has space");
        assert_eq!(decode_key("plain"), "plain");
    }
}
