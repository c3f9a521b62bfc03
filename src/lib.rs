//! Parser and resolver for Double Cross style `NDX` dice rolls.
//!
//! A roll such as `7DX8+3` throws seven ten-sided dice. Every die showing the
//! critical value (8 here) or more is thrown again in a new round, and the
//! cascade continues until a round has no criticals. The result is the highest
//! die of that last round, plus 10 for every round that exploded, plus the
//! modifier.
//!
//! ```
//! use dx_rocks::{parse, Engine, ScriptedSource};
//!
//! let request = parse("3DX+2").unwrap();
//! let mut dice = ScriptedSource::new([10, 10, 1, 3, 2]);
//! let outcome = Engine::default().resolve(request, &mut dice);
//!
//! assert_eq!(outcome.trace(), "[10,10,1]→[3,2]");
//! assert_eq!(outcome.explosion_count, 1);
//! assert_eq!(outcome.total, 3 + 10 + 2);
//! ```
#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]


#[cfg(test)]
mod request_test_strategies;

mod command;
mod config;
mod engine;
mod error;
mod outcome;
mod parser;
mod request;
mod source;

pub use command::{Command, COMMAND_PREFIX, COMMAND_PREFIX_FULL_WIDTH};
pub use config::{Settings, CONFIG_FILE, ENV_PREFIX};
pub use engine::{Engine, resolve, resolve_parsed, DEFAULT_MAX_POOL, DEFAULT_MAX_ROUNDS, EXPLOSION_BONUS};
pub use error::Error;
pub use outcome::{RollOutcome, Round};
pub use parser::{ParserError, SyntaxError, Parser, parse};
pub use request::{RollRequest, RollRequestBuilder, DEFAULT_CRITICAL, MIN_CRITICAL, DIE_FACES};
pub use source::{RandomSource, ScriptedSource, seeded};
