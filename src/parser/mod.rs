mod error;
mod lexer;
mod parse;

#[cfg(test)]
pub(crate) mod str_test_strategies;

pub use error::{ParserError, SyntaxError};
pub(crate) use lexer::{Lexer, Token};
pub use parse::{Parser, parse};
