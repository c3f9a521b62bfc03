use crate::{Error, RollRequest};
use crate::parser::error::*;
use crate::parser::{Lexer, Token};


/// Numbers read from an expression before any range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Notation {
    count: u32,
    inline_critical: Option<u32>,
    modifier: i32,
    at_critical: Option<u32>
}

impl Notation {
    /// The `@` form wins over the inline form; neither means the default.
    fn critical(&self) -> Option<u32> {
        self.at_critical.or(self.inline_critical)
    }
}


/// Reads one `NDX` expression.
///
/// The grammar is `<count>DX[<critical>][+|-<modifier>][@<critical>]`,
/// case-insensitive on `DX`, with optional whitespace around the expression
/// but none inside it. The parser keeps one token of lookahead and never
/// backtracks.
#[derive(Debug)]
pub struct Parser {
    text: String,
    lexer: Lexer,
    current: Token,
    start: usize
}

impl Parser {
    /// Creates a `Parser` for `input` and reads its first token.
    ///
    /// # Errors
    /// Returns [`ParserError::MalformedSyntax`] when the input is blank or
    /// starts with a character the grammar does not know.
    ///
    /// # Examples
    /// ```
    /// use dx_rocks::{Parser, SyntaxError};
    ///
    /// assert!(Parser::new("7DX8+3").is_ok());
    ///
    /// let err = Parser::new("   ").unwrap_err();
    /// assert_eq!(err.detail(), Some(&SyntaxError::Empty));
    /// ```
    pub fn new(input: &str) -> Result<Self, ParserError> {
        let mut lexer = Lexer::new(input);
        let start = lexer.position;

        let current = lexer.next_token()
            .map_err(|err| ParserError::malformed(input, start, err))?;

        if current == Token::Eof {
            return Err(ParserError::malformed(input, start, SyntaxError::Empty));
        }

        Ok(Self { text: input.into(), lexer, current, start })
    }

    /// Parses the whole input into a [`RollRequest`].
    ///
    /// # Errors
    /// - [`ParserError::MalformedSyntax`] if the input does not match the grammar.
    ///   [`ParserError::pos()`] gives the char offset of the offending token.
    /// - [`ParserError::ZeroDice`] if the count is 0.
    /// - [`ParserError::CriticalOutOfRange`] if the chosen critical value is not in `2..=10`.
    ///
    /// # Examples
    /// ```
    /// use dx_rocks::{Parser, ParserError};
    ///
    /// let request = Parser::new("7DX8+3@9").unwrap().parse().unwrap();
    /// assert_eq!(request.critical_threshold(), 9);
    ///
    /// let err = Parser::new("7DX8+").unwrap().parse().unwrap_err();
    /// assert!(matches!(err, ParserError::MalformedSyntax { position: 5, .. }));
    /// ```
    pub fn parse(mut self) -> Result<RollRequest, ParserError> {
        let notation = self.parse_tokens()
            .map_err(|err| ParserError::malformed(&self.text, self.start, err))?;

        tracing::trace!(text = %self.text, ?notation, "parsed dice expression");
        self.build(notation)
    }

    fn next_token(&mut self) -> Result<()> {
        self.start = self.lexer.position;
        self.current = self.lexer.next_token()?;

        Ok(())
    }

    fn parse_tokens(&mut self) -> Result<Notation> {
        let count = match self.current {
            Token::Number(n) => n,
            other => return Err(expected("dice count", other))
        };
        self.next_token()?;

        if self.current != Token::Dx {
            return Err(expected("`DX`", self.current));
        }
        self.next_token()?;

        let inline_critical = self.parse_optional_number()?;
        let modifier = self.parse_modifier()?;
        let at_critical = self.parse_at_critical()?;

        if self.current != Token::Eof {
            return Err(expected("end of input", self.current));
        }

        Ok(Notation { count, inline_critical, modifier, at_critical })
    }

    fn parse_optional_number(&mut self) -> Result<Option<u32>> {
        match self.current {
            Token::Number(n) => {
                self.next_token()?;
                Ok(Some(n))
            },
            _ => Ok(None)
        }
    }

    fn parse_modifier(&mut self) -> Result<i32> {
        let negative = match self.current {
            Token::Plus => false,
            Token::Minus => true,
            _ => return Ok(0)
        };
        self.next_token()?;

        let value = match self.current {
            Token::Number(n) => i64::from(n),
            other => return Err(expected("modifier value", other))
        };

        let value = if negative { -value } else { value };
        let modifier = i32::try_from(value)
            .map_err(|_| SyntaxError::Expected {
                expected: "modifier within 32-bit range",
                found: value.to_string()
            })?;

        self.next_token()?;
        Ok(modifier)
    }

    fn parse_at_critical(&mut self) -> Result<Option<u32>> {
        if self.current != Token::At {
            return Ok(None);
        }
        self.next_token()?;

        match self.parse_optional_number()? {
            Some(n) => Ok(Some(n)),
            None => Err(expected("critical value after `@`", self.current))
        }
    }

    fn build(self, notation: Notation) -> Result<RollRequest, ParserError> {
        let critical = notation.critical().unwrap_or(crate::DEFAULT_CRITICAL.into());
        let out_of_range = || ParserError::CriticalOutOfRange {
            text: self.text.clone(),
            value: critical
        };

        let threshold = u8::try_from(critical).map_err(|_| out_of_range())?;

        RollRequest::builder(notation.count)
            .critical(threshold)
            .modifier(notation.modifier)
            .source_text(self.text.clone())
            .build()
            .map_err(|err| match err {
                Error::ZeroValue => ParserError::ZeroDice(self.text.clone()),
                _ => out_of_range()
            })
    }
}


fn expected(expected: &'static str, found: Token) -> SyntaxError {
    let found = match found {
        Token::Eof => "end of input".into(),
        other => format!("{other:?}")
    };

    SyntaxError::Expected { expected, found }
}


/// Parses a dice expression such as `8DX+5`, `7DX8+3` or `7DX+3@8` into a
/// [`RollRequest`].
///
/// Any chat prefix (`!dx`) must already be stripped; see [`crate::Command`].
/// This is a pure function: it never panics and every failure is reported in
/// the returned error.
///
/// # Errors
/// See [`Parser::parse()`]. A blank input is reported as
/// [`ParserError::MalformedSyntax`] with [`SyntaxError::Empty`].
///
/// # Examples
/// ```
/// use dx_rocks::parse;
///
/// let request = parse("7DX8+3").unwrap();
/// assert_eq!(request.pool_size(), 7);
/// assert_eq!(request.critical_threshold(), 8);
/// assert_eq!(request.modifier(), 3);
///
/// assert!(parse("8D+5").is_err());
/// ```
pub fn parse(input: &str) -> Result<RollRequest, ParserError> {
    Parser::new(input)?.parse()
}
