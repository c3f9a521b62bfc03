use crate::parser::error::*;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Number(u32),
    Dx,
    Plus,
    Minus,
    At,
    Eof,
}


/// Splits a dice expression into tokens.
///
/// Whitespace is only allowed around the expression: leading whitespace is
/// skipped on construction and a run of trailing whitespace reads as [`Token::Eof`].
#[derive(Debug)]
pub(crate) struct Lexer {
    input: Vec<char>,
    pub position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let input: Vec<char> = input.chars().collect();
        let position = input.iter()
            .take_while(|c| c.is_whitespace())
            .count();

        Self { input, position }
    }

    pub fn next_token(&mut self) -> Result<Token> {
        if self.at_end() {
            self.position = self.input.len();
            return Ok(Token::Eof);
        }

        let ch = self.input[self.position];

        match ch {
            '+' => {
                self.position += 1;
                Ok(Token::Plus)
            }
            '-' => {
                self.position += 1;
                Ok(Token::Minus)
            }
            '@' => {
                self.position += 1;
                Ok(Token::At)
            }
            '0'..='9' => self.read_number(),
            'a'..='z' | 'A'..='Z' => self.read_identifier(),
            _ => Err(SyntaxError::Token(ch))
        }
    }

    fn at_end(&self) -> bool {
        self.input[self.position..].iter().all(|c| c.is_whitespace())
    }

    fn read_number(&mut self) -> Result<Token> {
        let start = self.position;
        while self.position < self.input.len() && self.input[self.position].is_ascii_digit() {
            self.position += 1;
        }

        let number_str: String = self.input[start..self.position].iter().collect();
        let number: u32 = number_str.parse()?;

        Ok(Token::Number(number))
    }

    fn read_identifier(&mut self) -> Result<Token> {
        let start = self.position;
        while self.position < self.input.len() && self.input[self.position].is_ascii_alphabetic() {
            self.position += 1;
        }

        let identifier: String = self.input[start..self.position].iter().collect();
        if identifier.eq_ignore_ascii_case("dx") {
            Ok(Token::Dx)
        } else {
            Err(SyntaxError::Identifier(identifier))
        }
    }
}
