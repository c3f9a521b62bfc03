//! Routing of raw chat lines.
//!
//! A chat front end hands every message to [`Command::parse`]; only lines
//! addressed to the roller produce a command.

/// Prefix of a roll command, `!dx 8DX+5`.
pub const COMMAND_PREFIX: &str = "!dx";

/// Full-width variant of [`COMMAND_PREFIX`], as typed with a Japanese IME.
pub const COMMAND_PREFIX_FULL_WIDTH: &str = "！dx";

const HELP_COMMAND: &str = "/dxhelp";
const INFO_COMMAND: &str = "/dxinfo";

const USAGE: &str = "\
Usage: !dx <count>DX[<critical>][+|-<modifier>][@<critical>]

Examples:
  !dx 8DX+5     8 dice, modifier +5
  !dx 7DX8+3    7 dice, critical 8, modifier +3
  !dx 10DX+0@7  10 dice, critical 7, no modifier

count     number of dice thrown in the first round
critical  lowest face that explodes, 2 to 10 (default 10)
modifier  added once to the final value

Every die at or above the critical is thrown again; each exploding round adds 10.
The result is the highest die of the last round, plus 10 per explosion, plus the modifier.

Other commands: /dxhelp, /dxinfo";


/// What a chat line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Roll the dice expression, prefix already stripped.
    Roll(String),
    /// Show [`Command::usage()`].
    Help,
    /// Show [`Command::about()`].
    Info
}

impl Command {
    /// Routes `line`, returning `None` when it is not meant for the roller.
    ///
    /// The prefix is stripped when whitespace follows it. A line such as
    /// `!dx8DX` is routed unchanged, so rolling it reports a malformed
    /// expression. `!dx` alone, `!dx help` and `/dxhelp` ask for help,
    /// `!dx info` and `/dxinfo` for the bot info.
    ///
    /// # Examples
    /// ```
    /// use dx_rocks::Command;
    ///
    /// assert_eq!(Command::parse("!dx 8DX+5"), Some(Command::Roll("8DX+5".into())));
    /// assert_eq!(Command::parse("！DX 7dx8"), Some(Command::Roll("7dx8".into())));
    /// assert_eq!(Command::parse("/dxhelp"), Some(Command::Help));
    /// assert_eq!(Command::parse("good roll!"), None);
    /// ```
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();

        if line.eq_ignore_ascii_case(HELP_COMMAND) {
            return Some(Command::Help);
        }
        if line.eq_ignore_ascii_case(INFO_COMMAND) {
            return Some(Command::Info);
        }

        let rest = [COMMAND_PREFIX, COMMAND_PREFIX_FULL_WIDTH]
            .into_iter()
            .find_map(|prefix| strip_prefix_ignore_case(line, prefix))?;

        let command = if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            // glued to the prefix, so the whole line is what fails to parse
            Command::Roll(line.into())
        } else {
            let rest = rest.trim();
            if rest.is_empty() || rest.eq_ignore_ascii_case("help") {
                Command::Help
            } else if rest.eq_ignore_ascii_case("info") {
                Command::Info
            } else {
                Command::Roll(rest.into())
            }
        };

        tracing::trace!(line, ?command, "routed chat line");
        Some(command)
    }

    /// Help text describing the roll syntax.
    pub fn usage() -> &'static str {
        USAGE
    }

    /// Short description of the roller and its version.
    pub fn about() -> String {
        format!(
            "{} {}\n{}\nCommand prefixes: {COMMAND_PREFIX}, {COMMAND_PREFIX_FULL_WIDTH}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_DESCRIPTION")
        )
    }
}


fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &line[prefix.len()..])
}
