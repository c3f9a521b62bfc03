use std::{fmt::Display, str::FromStr};
use crate::{Error, ParserError};


/// Number of faces on every die this crate rolls.
pub const DIE_FACES: u8 = 10;

/// Critical value used when the notation does not give one.
pub const DEFAULT_CRITICAL: u8 = 10;

/// Lowest critical value accepted. A critical of 1 would explode every die forever.
pub const MIN_CRITICAL: u8 = 2;


/// A validated `NDX` roll: how many dice, what explodes, and what to add.
///
/// Requests are normally produced by [`crate::parse`], or assembled by hand
/// with [`RollRequest::builder()`]. They are plain values: resolving one
/// consumes it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RollRequest {
    pool_size: u32,
    critical_threshold: u8,
    modifier: i32,
    source_text: String
}

impl RollRequest {
    /// Creates a [`RollRequestBuilder`] for a pool of `pool_size` dice.
    ///
    /// # Examples
    /// ```
    /// use dx_rocks::RollRequest;
    ///
    /// let request = RollRequest::builder(7)
    ///     .critical(8)
    ///     .modifier(3)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(request.to_string(), "7DX8+3");
    /// ```
    pub fn builder(pool_size: u32) -> RollRequestBuilder {
        RollRequestBuilder::new(pool_size)
    }

    /// Number of dice thrown in the first round.
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Lowest face that makes a die explode.
    pub const fn critical_threshold(&self) -> u8 {
        self.critical_threshold
    }

    /// Flat value added once to the total.
    pub const fn modifier(&self) -> i32 {
        self.modifier
    }

    /// The text this request was parsed from, or its canonical notation when
    /// it was built by hand.
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Re-checks the invariants the builder enforces.
    ///
    /// Only needed for requests that did not come through the builder, such as
    /// deserialized ones.
    ///
    /// # Errors
    /// - [`Error::ZeroValue`] if the pool is empty.
    /// - [`Error::CriticalOutOfRange`] if the critical value is not in `2..=10`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.pool_size == 0 {
            return Err(Error::ZeroValue);
        }

        if !(MIN_CRITICAL..=DIE_FACES).contains(&self.critical_threshold) {
            return Err(Error::CriticalOutOfRange(self.critical_threshold.into()));
        }

        Ok(())
    }
}

impl Display for RollRequest {
    /// Formats the request in canonical notation.
    ///
    /// The critical value is only written when it differs from the default,
    /// and a zero modifier is omitted.
    ///
    /// # Examples
    /// ```
    /// use dx_rocks::parse;
    ///
    /// assert_eq!(parse("8dx+5").unwrap().to_string(), "8DX+5");
    /// assert_eq!(parse("7DX+3@8").unwrap().to_string(), "7DX8+3");
    /// assert_eq!(parse("4DX10-2").unwrap().to_string(), "4DX-2");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}DX", self.pool_size)?;

        if self.critical_threshold != DEFAULT_CRITICAL {
            write!(f, "{}", self.critical_threshold)?;
        }

        match self.modifier {
            0 => Ok(()),
            m => write!(f, "{m:+}")
        }
    }
}

impl FromStr for RollRequest {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}


/// Fluent builder for [`RollRequest`].
///
/// Start with [`RollRequest::builder()`], chain [`RollRequestBuilder::critical()`]
/// and [`RollRequestBuilder::modifier()`], then [`RollRequestBuilder::build()`].
#[derive(Debug, Clone)]
pub struct RollRequestBuilder {
    pool_size: u32,
    critical_threshold: u8,
    modifier: i32,
    source_text: Option<String>
}

impl RollRequestBuilder {
    fn new(pool_size: u32) -> Self {
        Self {
            pool_size,
            critical_threshold: DEFAULT_CRITICAL,
            modifier: 0,
            source_text: None
        }
    }

    /// Sets the critical value. Defaults to [`DEFAULT_CRITICAL`].
    pub fn critical(mut self, threshold: u8) -> Self {
        self.critical_threshold = threshold;
        self
    }

    /// Sets the modifier. Defaults to 0.
    pub fn modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    /// Records the text the request came from.
    pub fn source_text(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Finalizes the request.
    ///
    /// Without an explicit source text the canonical notation is used.
    ///
    /// # Errors
    /// - [`Error::ZeroValue`] if the pool size is 0.
    /// - [`Error::CriticalOutOfRange`] if the critical value is not in `2..=10`.
    ///
    /// # Examples
    /// ```
    /// use dx_rocks::{RollRequest, Error};
    ///
    /// assert!(RollRequest::builder(3).build().is_ok());
    /// assert!(matches!(RollRequest::builder(0).build(), Err(Error::ZeroValue)));
    /// assert!(matches!(
    ///     RollRequest::builder(3).critical(1).build(),
    ///     Err(Error::CriticalOutOfRange(1))
    /// ));
    /// ```
    pub fn build(self) -> Result<RollRequest, Error> {
        let mut request = RollRequest {
            pool_size: self.pool_size,
            critical_threshold: self.critical_threshold,
            modifier: self.modifier,
            source_text: self.source_text.unwrap_or_default()
        };

        request.validate()?;

        if request.source_text.is_empty() {
            request.source_text = request.to_string();
        }

        Ok(request)
    }
}
