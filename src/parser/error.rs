/// Low level reason a dice expression could not be read.
///
/// Always reported inside [`ParserError::MalformedSyntax`], which adds the
/// offending input and the position the parser stopped at.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Input string is empty")]
    Empty,

    #[error("Invalid token: {0}")]
    Token(char),

    #[error("Invalid number: {0}")]
    Number(#[from] std::num::ParseIntError),

    #[error("Invalid identifier: {0}")]
    Identifier(String),

    #[error("Expected {expected}, got {found}")]
    Expected {
        expected: &'static str,
        found: String
    }
}


/// Error returned by [`crate::parse`].
///
/// Every variant keeps the text that was handed to the parser so a caller can
/// echo it back to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParserError {
    /// The input does not match `<count>DX[<critical>][+|-<modifier>][@<critical>]`.
    #[error("Malformed dice expression `{text}` at position {position} - {detail}")]
    MalformedSyntax {
        /// Text handed to the parser.
        text: String,
        /// Char offset where reading stopped.
        position: usize,
        /// What was wrong at that position.
        detail: SyntaxError
    },

    /// The pool size was zero.
    #[error("Dice count must be at least 1 in `{0}`")]
    ZeroDice(String),

    /// The critical value is outside the range a ten-sided die can explode on.
    #[error("Critical value {value} is out of range 2..=10 in `{text}`")]
    CriticalOutOfRange {
        /// Text handed to the parser.
        text: String,
        /// Critical value as written.
        value: u32
    }
}

impl ParserError {
    pub(crate) fn malformed(text: &str, position: usize, detail: SyntaxError) -> Self {
        ParserError::MalformedSyntax { text: text.into(), position, detail }
    }

    /// The text the parser was given.
    pub fn source_text(&self) -> &str {
        match self {
            ParserError::MalformedSyntax { text, .. }
            | ParserError::ZeroDice(text)
            | ParserError::CriticalOutOfRange { text, .. } => text
        }
    }

    /// Position of a syntax error, `None` for errors found after reading.
    pub fn pos(&self) -> Option<&usize> {
        match self {
            ParserError::MalformedSyntax { position, .. } => Some(position),
            _ => None
        }
    }

    /// The underlying [`SyntaxError`] of a [`ParserError::MalformedSyntax`].
    pub fn detail(&self) -> Option<&SyntaxError> {
        match self {
            ParserError::MalformedSyntax { detail, .. } => Some(detail),
            _ => None
        }
    }
}

pub(crate) type Result<T, E = SyntaxError> = std::result::Result<T, E>;
