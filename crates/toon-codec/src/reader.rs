//! Logical-line reader: splits a document into indent-levelled lines.
//!
//! Blank and whitespace-only lines vanish here, so the decoder never sees
//! them. Each leading space or tab counts as one column; the column count
//! integer-divided by the indent unit gives the level.

/// One logical line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Indentation level (indent columns / indent unit).
    pub level: usize,
    /// Line content with indentation and the trailing newline removed.
    pub content: String,
    /// Byte offset of the content start in the original document.
    pub offset: usize,
}

/// A peekable cursor over the logical lines of a document.
#[derive(Debug)]
pub struct LineReader {
    lines: Vec<Line>,
    pos: usize,
}

impl LineReader {
    pub fn new(doc: &str, indent_unit: usize) -> Self {
        let unit = indent_unit.max(1);
        let mut lines = Vec::new();
        let mut offset = 0;

        for raw in doc.split_inclusive('\n') {
            let line = raw.trim_end_matches(['\n', '\r']);
            let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
            let content = &line[indent..];
            if !content.is_empty() {
                lines.push(Line {
                    level: indent / unit,
                    content: content.to_string(),
                    offset: offset + indent,
                });
            }
            offset += raw.len();
        }

        LineReader { lines, pos: 0 }
    }

    /// Look at the next line without consuming it.
    pub fn peek(&self) -> Option<&Line> {
        self.lines.get(self.pos)
    }

    /// Consume and return the next line.
    pub fn advance(&mut self) -> Option<Line> {
        let line = self.lines.get(self.pos).cloned();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    /// Total number of logical lines in the document.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_and_offsets() {
        let doc = "a: 1\n  b: 2\n    c: 3\n";
        let mut r = LineReader::new(doc, 2);
        assert_eq!(r.len(), 3);

        let l = r.advance().unwrap();
        assert_eq!((l.level, l.content.as_str(), l.offset), (0, "a: 1", 0));
        let l = r.advance().unwrap();
        assert_eq!((l.level, l.content.as_str(), l.offset), (1, "b: 2", 7));
        let l = r.advance().unwrap();
        assert_eq!((l.level, l.content.as_str(), l.offset), (2, "c: 3", 17));
        assert_eq!(r.advance(), None);
    }

    #[test]
    fn blank_lines_are_dropped() {
        let doc = "a: 1\n\n   \n  b: 2";
        let r = LineReader::new(doc, 2);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn tabs_count_as_one_column() {
        let doc = "a:\n\t\tb: 1";
        let mut r = LineReader::new(doc, 2);
        r.advance();
        assert_eq!(r.advance().unwrap().level, 1);
    }

    #[test]
    fn partial_indent_rounds_down() {
        let doc = "a:\n   b: 1";
        let mut r = LineReader::new(doc, 2);
        r.advance();
        assert_eq!(r.advance().unwrap().level, 1);
    }

    #[test]
    fn zero_indent_unit_is_treated_as_one() {
        let doc = "  a: 1";
        let r = LineReader::new(doc, 0);
        assert_eq!(r.peek().unwrap().level, 2);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut r = LineReader::new("x: 1", 2);
        assert_eq!(r.peek().unwrap().content, "x: 1");
        assert_eq!(r.peek().unwrap().content, "x: 1");
        assert!(r.advance().is_some());
        assert!(r.peek().is_none());
    }

    #[test]
    fn crlf_endings() {
        let doc = "a: 1\r\n  b: 2\r\n";
        let mut r = LineReader::new(doc, 2);
        assert_eq!(r.advance().unwrap().content, "a: 1");
        let l = r.advance().unwrap();
        assert_eq!(l.content, "b: 2");
        assert_eq!(l.level, 1);
    }
}
