//! Configuration for the two directions of the codec.

/// Field separator used in inline arrays and tabular rows.
///
/// Comma is the default and carries no marker in array headers; tab and pipe
/// are announced by a suffix character inside the bracket (`[3|]`, `[3\t]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// The character that separates fields.
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// The marker written inside the header bracket, if any.
    pub fn suffix(self) -> Option<char> {
        match self {
            Delimiter::Comma => None,
            Delimiter::Tab => Some('\t'),
            Delimiter::Pipe => Some('|'),
        }
    }

    /// Recognize a bracket-suffix character.
    pub fn from_suffix(c: char) -> Option<Delimiter> {
        match c {
            '\t' => Some(Delimiter::Tab),
            '|' => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

/// Encoder policy for NaN and the infinities, which have no token in the
/// text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonFinite {
    /// Refuse to encode, returning [`EncodeError::NonFinite`].
    ///
    /// [`EncodeError::NonFinite`]: crate::error::EncodeError::NonFinite
    #[default]
    Error,
    /// Emit the `null` token. Lossy: the value decodes as `Value::Null`.
    Null,
}

/// Options for [`decode_with_options`](crate::decode_with_options).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Enforce declared array lengths and exact tabular row widths.
    pub strict: bool,
    /// Columns per indentation level. Zero is treated as one.
    pub indent_unit: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            strict: false,
            indent_unit: 2,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_indent_unit(mut self, indent_unit: usize) -> Self {
        self.indent_unit = indent_unit;
        self
    }
}

/// Options for [`encode_with_options`](crate::encode_with_options).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Spaces emitted per indentation level.
    pub indent_unit: usize,
    /// Field separator for inline arrays and tabular rows.
    pub delimiter: Delimiter,
    /// Handling of NaN and the infinities.
    pub non_finite: NonFinite,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent_unit: 2,
            delimiter: Delimiter::Comma,
            non_finite: NonFinite::Error,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_unit(mut self, indent_unit: usize) -> Self {
        self.indent_unit = indent_unit;
        self
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_non_finite(mut self, non_finite: NonFinite) -> Self {
        self.non_finite = non_finite;
        self
    }
}
