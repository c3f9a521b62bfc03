use std::{fmt::Display, ops::Deref};
use crate::engine::EXPLOSION_BONUS;


/// Faces rolled in one round of a cascade, in the order they were drawn.
///
/// Dereferences to `[u8]`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Round(Vec<u8>);

impl Round {
    /// Wraps the faces of a round.
    pub fn new(values: Vec<u8>) -> Self {
        Self(values)
    }

    /// Number of dice at or above `threshold`, i.e. the dice thrown next round.
    ///
    /// # Examples
    /// ```
    /// use dx_rocks::Round;
    ///
    /// assert_eq!(Round::new(vec![9, 1, 8, 10]).hits(8), 3);
    /// ```
    pub fn hits(&self, threshold: u8) -> usize {
        self.iter().filter(|&&v| v >= threshold).count()
    }

    /// Highest face of the round, `None` for an empty round.
    pub fn peak(&self) -> Option<u8> {
        self.iter().copied().max()
    }
}

impl Deref for Round {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<u8> for Round {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Display for Round {
    /// `[9,1,3]`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}


/// Result of resolving a [`crate::RollRequest`].
///
/// An outcome is either valid, with every round the cascade produced, or
/// invalid, with zeroed numbers and an [`RollOutcome::error`] message. Both kinds
/// are returned as values so a caller can render them the same way.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RollOutcome {
    /// Text of the request, echoed back.
    pub command: String,
    /// Round 0 is the initial pool; round `k` re-rolls the dice of round `k - 1` that hit.
    pub rounds: Vec<Round>,
    /// Every face in roll order, across all rounds.
    pub all_values: Vec<u8>,
    /// Number of rounds after round 0.
    pub explosion_count: u32,
    /// Peak of the last round, plus 10 per explosion, plus the modifier.
    pub total: i64,
    /// The request's modifier.
    pub modifier_applied: i32,
    /// `false` when the request could not be resolved.
    pub valid: bool,
    /// Why the outcome is invalid.
    pub error: Option<String>,
    /// The round cap stopped the cascade before a round without criticals.
    pub capped: bool
}

impl RollOutcome {
    /// Message used by [`RollOutcome::invalid()`] callers that have nothing better to say.
    pub const DEFAULT_ERROR: &'static str = "Malformed dice command, e.g. 8DX+5 or 7DX8+3";

    /// Builds an outcome from the rounds of a finished cascade.
    ///
    /// `rounds` must hold at least one non-empty round.
    pub(crate) fn from_rounds(command: String, rounds: Vec<Round>, modifier: i32, capped: bool) -> Self {
        let explosion_count = rounds.len().saturating_sub(1) as u32;
        let peak = rounds.last()
            .and_then(Round::peak)
            .unwrap_or_default();

        let total = i64::from(peak)
            + i64::from(explosion_count) * EXPLOSION_BONUS
            + i64::from(modifier);

        let all_values = rounds.iter()
            .flat_map(|round| round.iter().copied())
            .collect();

        Self {
            command,
            rounds,
            all_values,
            explosion_count,
            total,
            modifier_applied: modifier,
            valid: true,
            error: None,
            capped
        }
    }

    /// An invalid outcome carrying `message`.
    ///
    /// # Examples
    /// ```
    /// use dx_rocks::RollOutcome;
    ///
    /// let outcome = RollOutcome::invalid("8D+5", RollOutcome::DEFAULT_ERROR);
    /// assert!(!outcome.valid);
    /// assert_eq!(outcome.total, 0);
    /// assert!(outcome.rounds.is_empty());
    /// ```
    pub fn invalid(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            rounds: Vec::new(),
            all_values: Vec::new(),
            explosion_count: 0,
            total: 0,
            modifier_applied: 0,
            valid: false,
            error: Some(message.into()),
            capped: false
        }
    }

    /// Highest face of the round that ended the cascade.
    pub fn peak(&self) -> Option<u8> {
        self.rounds.last().and_then(Round::peak)
    }

    /// Part of the total contributed by explosions.
    pub fn critical_bonus(&self) -> i64 {
        i64::from(self.explosion_count) * EXPLOSION_BONUS
    }

    /// Rounds in notation form, joined by arrows: `[9,1,3]→[10,7]`.
    pub fn trace(&self) -> String {
        self.rounds.iter()
            .map(Round::to_string)
            .collect::<Vec<_>>()
            .join("→")
    }
}

impl Display for RollOutcome {
    /// One line of plain text.
    ///
    /// # Examples
    /// ```
    /// use dx_rocks::{parse, resolve, ScriptedSource};
    ///
    /// let outcome = resolve(parse("3DX+5").unwrap(), &mut ScriptedSource::new([9, 1, 3]));
    /// assert_eq!(outcome.to_string(), "3DX+5 > [9,1,3] +5 = 14");
    ///
    /// let outcome = resolve(parse("2DX").unwrap(), &mut ScriptedSource::new([10, 4, 6]));
    /// assert_eq!(outcome.to_string(), "2DX > [10,4]→[6] = 16 (1 critical, +10)");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.valid {
            let message = self.error.as_deref().unwrap_or(Self::DEFAULT_ERROR);
            return write!(f, "{} > error: {message}", self.command);
        }

        write!(f, "{} > {}", self.command, self.trace())?;

        if self.modifier_applied != 0 {
            write!(f, " {:+}", self.modifier_applied)?;
        }

        write!(f, " = {}", self.total)?;

        match self.explosion_count {
            0 => {},
            1 => write!(f, " (1 critical, +{})", self.critical_bonus())?,
            n => write!(f, " ({n} criticals, +{})", self.critical_bonus())?
        }

        if self.capped {
            write!(f, " [round cap reached]")?;
        }

        Ok(())
    }
}
