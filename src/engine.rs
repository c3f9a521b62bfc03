use std::num::NonZeroU32;
use tracing::{debug, warn};
use crate::{Error, ParserError, RandomSource, RollOutcome, RollRequest, Round};


/// Added to the total for every round that exploded.
pub const EXPLOSION_BONUS: i64 = 10;

/// Round cap used by [`Engine::default()`].
///
/// With honest dice and a critical of 2, reaching this many rounds has a
/// probability around `0.9^1000`.
pub const DEFAULT_MAX_ROUNDS: NonZeroU32 = match NonZeroU32::new(1000) {
    Some(n) => n,
    None => unreachable!()
};

/// Pool ceiling used by [`Engine::default()`].
pub const DEFAULT_MAX_POOL: NonZeroU32 = match NonZeroU32::new(1000) {
    Some(n) => n,
    None => unreachable!()
};

/// Resolves [`RollRequest`]s by running the critical cascade.
///
/// The engine holds no state besides its limits, so one value can serve any
/// number of callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
    max_rounds: Option<NonZeroU32>,
    max_pool: NonZeroU32
}

impl Default for Engine {
    fn default() -> Self {
        Self { max_rounds: Some(DEFAULT_MAX_ROUNDS), max_pool: DEFAULT_MAX_POOL }
    }
}

impl Engine {
    /// An engine that stops a cascade after `max_rounds` rounds.
    pub const fn with_max_rounds(max_rounds: NonZeroU32) -> Self {
        Self { max_rounds: Some(max_rounds), max_pool: DEFAULT_MAX_POOL }
    }

    /// An engine without a round cap. A source that always rolls criticals
    /// will keep it looping.
    pub const fn uncapped() -> Self {
        Self { max_rounds: None, max_pool: DEFAULT_MAX_POOL }
    }

    /// Replaces the pool ceiling. Requests with more dice than this are
    /// refused before any die is drawn.
    pub const fn max_pool(self, max_pool: NonZeroU32) -> Self {
        Self { max_pool, ..self }
    }

    /// The round cap, if any.
    pub const fn max_rounds(&self) -> Option<NonZeroU32> {
        self.max_rounds
    }

    /// The largest pool this engine will roll.
    pub const fn pool_limit(&self) -> NonZeroU32 {
        self.max_pool
    }

    /// Rolls `request` with dice from `rng`.
    ///
    /// Round 0 throws the whole pool. Each die at or above the critical value
    /// is thrown again in the next round, until a round has no criticals.
    /// The total is the highest die of that last round, plus
    /// [`EXPLOSION_BONUS`] for every round after the first, plus the modifier.
    ///
    /// If the round cap is reached first the cascade stops there: the
    /// outcome stays valid, is flagged [`RollOutcome::capped`], and its
    /// total uses the last round that was rolled.
    ///
    /// A request that fails [`RollRequest::validate()`], or asks for more dice
    /// than [`Engine::pool_limit()`], yields an invalid outcome without drawing
    /// any dice.
    ///
    /// # Examples
    /// ```
    /// use dx_rocks::{parse, Engine, ScriptedSource};
    ///
    /// let mut dice = ScriptedSource::new([10, 10, 1, 3, 2]);
    /// let outcome = Engine::default().resolve(parse("3DX").unwrap(), &mut dice);
    ///
    /// assert_eq!(outcome.rounds.len(), 2);
    /// assert_eq!(outcome.explosion_count, 1);
    /// assert_eq!(outcome.total, 3 + 10);
    /// ```
    pub fn resolve(&self, request: RollRequest, rng: &mut dyn RandomSource) -> RollOutcome {
        if let Err(err) = self.check(&request) {
            warn!(command = request.source_text(), %err, "refusing to resolve invalid request");
            return RollOutcome::invalid(request.source_text(), err.to_string());
        }

        let threshold = request.critical_threshold();
        let mut pool = request.pool_size() as usize;
        let mut rounds: Vec<Round> = Vec::new();
        let mut capped = false;

        while pool > 0 {
            let round: Round = (0..pool).map(|_| rng.next_die()).collect();
            let hits = round.hits(threshold);

            debug!(round = rounds.len(), dice = %round, hits, "rolled round");
            rounds.push(round);

            if hits == 0 {
                break;
            }

            if self.cap_reached(rounds.len()) {
                warn!(
                    command = request.source_text(),
                    rounds = rounds.len(),
                    "round cap reached, stopping cascade"
                );
                capped = true;
                break;
            }

            pool = hits;
        }

        let outcome = RollOutcome::from_rounds(
            request.source_text().into(),
            rounds,
            request.modifier(),
            capped
        );

        debug!(
            command = %outcome.command,
            explosions = outcome.explosion_count,
            total = outcome.total,
            "resolved roll"
        );

        outcome
    }

    fn check(&self, request: &RollRequest) -> Result<(), Error> {
        request.validate()?;

        let max = self.max_pool.get();
        if request.pool_size() > max {
            return Err(Error::PoolTooLarge { pool: request.pool_size(), max });
        }

        Ok(())
    }

    fn cap_reached(&self, rounds: usize) -> bool {
        self.max_rounds
            .is_some_and(|max| rounds >= max.get() as usize)
    }
}


/// Resolves `request` with [`Engine::default()`].
///
/// # Examples
/// ```
/// use dx_rocks::{parse, resolve};
///
/// let outcome = resolve(parse("8DX+5").unwrap(), &mut rand::rng());
/// assert!(outcome.valid);
/// assert!(outcome.total >= 1 + 5);
/// ```
pub fn resolve(request: RollRequest, rng: &mut dyn RandomSource) -> RollOutcome {
    Engine::default().resolve(request, rng)
}


/// Resolves the output of [`crate::parse`], turning a parse error into an
/// invalid outcome so that callers have a single result type to render.
///
/// # Examples
/// ```
/// use dx_rocks::{parse, resolve_parsed};
///
/// let outcome = resolve_parsed(parse("8D+5"), &mut rand::rng());
/// assert!(!outcome.valid);
/// assert_eq!(outcome.command, "8D+5");
/// ```
pub fn resolve_parsed(parsed: Result<RollRequest, ParserError>, rng: &mut dyn RandomSource) -> RollOutcome {
    match parsed {
        Ok(request) => resolve(request, rng),
        Err(err) => RollOutcome::invalid(err.source_text(), err.to_string())
    }
}


#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use super::*;
    use crate::{parse, seeded, ScriptedSource};
    use crate::request_test_strategies::request_strategy;


    fn scripted(expr: &str, script: &[u8]) -> RollOutcome {
        let mut source = ScriptedSource::new(script.iter().copied());
        resolve(parse(expr).unwrap(), &mut source)
    }

    fn values(outcome: &RollOutcome) -> Vec<Vec<u8>> {
        outcome.rounds.iter().map(|round| round.to_vec()).collect()
    }

    proptest! {
        #[test]
        fn test_cascade_invariants(request in request_strategy(), seed: u64) {
            let threshold = request.critical_threshold();
            let pool = request.pool_size() as usize;
            let modifier = request.modifier();
            let outcome = resolve(request, &mut seeded(seed));

            prop_assert!(outcome.valid);
            prop_assert!(!outcome.capped);
            prop_assert_eq!(outcome.rounds.len(), outcome.explosion_count as usize + 1);
            prop_assert_eq!(outcome.rounds[0].len(), pool);

            for pair in outcome.rounds.windows(2) {
                prop_assert!(!pair[1].is_empty());
                prop_assert_eq!(pair[1].len(), pair[0].hits(threshold));
            }

            let last = outcome.rounds.last().unwrap();
            prop_assert_eq!(last.hits(threshold), 0);

            let flattened: Vec<u8> = outcome.rounds.iter().flat_map(|r| r.iter().copied()).collect();
            prop_assert_eq!(&outcome.all_values, &flattened);

            let peak = last.peak().unwrap();
            prop_assert_eq!(
                outcome.total,
                i64::from(peak) + 10 * i64::from(outcome.explosion_count) + i64::from(modifier)
            );
            prop_assert_eq!(outcome.modifier_applied, modifier);
        }

        #[test]
        fn test_no_explosion(faces in prop::collection::vec(1..=9u8, 5), modifier in -50i32..=50) {
            let request = crate::RollRequest::builder(5).modifier(modifier).build().unwrap();
            let outcome = resolve(request, &mut ScriptedSource::new(faces.clone()));

            prop_assert_eq!(outcome.explosion_count, 0);
            prop_assert_eq!(outcome.rounds.len(), 1);
            prop_assert_eq!(
                outcome.total,
                i64::from(*faces.iter().max().unwrap()) + i64::from(modifier)
            );
        }

        #[test]
        fn test_same_seed_same_outcome(request in request_strategy(), seed: u64) {
            let first = resolve(request.clone(), &mut seeded(seed));
            let second = resolve(request, &mut seeded(seed));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_cap_limits_rounds(cap in 1u32..=20, pool in 1u32..=5) {
            let request = crate::RollRequest::builder(pool).critical(2).build().unwrap();
            let engine = Engine::with_max_rounds(NonZeroU32::new(cap).unwrap());
            let outcome = engine.resolve(request, &mut ScriptedSource::new([10]));

            prop_assert!(outcome.valid);
            prop_assert!(outcome.capped);
            prop_assert_eq!(outcome.rounds.len(), cap as usize);
            prop_assert_eq!(outcome.explosion_count, cap - 1);
            prop_assert_eq!(outcome.total, 10 + 10 * i64::from(cap - 1));
        }
    }

    #[test]
    fn test_pool_above_limit_draws_nothing() {
        let mut source = ScriptedSource::new([10]);
        let outcome = resolve(parse("4294967295DX").unwrap(), &mut source);

        assert!(!outcome.valid);
        assert_eq!(outcome.command, "4294967295DX");
        assert_eq!(
            outcome.error.as_deref(),
            Some("Dice count 4294967295 is above the limit of 1000")
        );
        assert!(outcome.rounds.is_empty());
        assert_eq!(source.drawn(), 0);
    }

    #[test]
    fn test_pool_limit_is_inclusive() {
        let engine = Engine::default().max_pool(NonZeroU32::new(4).unwrap());
        assert_eq!(engine.max_rounds(), Some(DEFAULT_MAX_ROUNDS));

        let outcome = engine.resolve(parse("4DX").unwrap(), &mut ScriptedSource::new([3]));
        assert!(outcome.valid);
        assert_eq!(outcome.rounds[0].len(), 4);

        let outcome = engine.resolve(parse("5DX").unwrap(), &mut ScriptedSource::new([3]));
        assert!(!outcome.valid);

        let engine = Engine::uncapped().max_pool(NonZeroU32::new(2).unwrap());
        assert_eq!(engine.pool_limit().get(), 2);
        assert_eq!(engine.max_rounds(), None);
    }

    #[test]
    fn test_two_explosions_then_stop() {
        let outcome = scripted("3DX+4", &[10, 10, 1, 3, 2]);

        assert_eq!(values(&outcome), vec![vec![10, 10, 1], vec![3, 2]]);
        assert_eq!(outcome.explosion_count, 1);
        assert_eq!(outcome.total, 3 + 10 + 4);
    }

    #[test]
    fn test_chained_explosions() {
        let outcome = scripted("3DX", &[10, 10, 1, 10, 2, 7]);

        assert_eq!(values(&outcome), vec![vec![10, 10, 1], vec![10, 2], vec![7]]);
        assert_eq!(outcome.explosion_count, 2);
        assert_eq!(outcome.peak(), Some(7));
        assert_eq!(outcome.total, 7 + 20);
        assert_eq!(outcome.all_values, vec![10, 10, 1, 10, 2, 7]);
    }

    #[test]
    fn test_lower_critical() {
        let outcome = scripted("4DX8-1", &[8, 9, 2, 3, 1, 8, 5]);

        assert_eq!(values(&outcome), vec![vec![8, 9, 2, 3], vec![1, 8], vec![5]]);
        assert_eq!(outcome.explosion_count, 2);
        assert_eq!(outcome.total, 5 + 20 - 1);
    }

    #[test]
    fn test_peak_is_max_not_sum() {
        let outcome = scripted("4DX", &[9, 9, 9, 9]);
        assert_eq!(outcome.total, 9);
    }

    #[test]
    fn test_negative_total() {
        let outcome = scripted("1DX-20", &[3]);
        assert_eq!(outcome.total, -17);
    }

    #[test]
    fn test_uncapped_honest_dice_terminate() {
        let request = parse("20DX2").unwrap();
        let outcome = Engine::uncapped().resolve(request, &mut seeded(7));

        assert!(outcome.valid);
        assert!(!outcome.capped);
        assert_eq!(Engine::uncapped().max_rounds(), None);
    }

    #[test]
    fn test_invalid_request_draws_nothing() {
        let request: crate::RollRequest = serde_json::from_str(
            r#"{"pool_size":0,"critical_threshold":10,"modifier":5,"source_text":"0DX+5"}"#
        ).unwrap();

        let mut source = ScriptedSource::new([10]);
        let outcome = resolve(request, &mut source);

        assert!(!outcome.valid);
        assert_eq!(outcome.command, "0DX+5");
        assert!(outcome.error.is_some());
        assert_eq!(outcome.total, 0);
        assert_eq!(outcome.modifier_applied, 0);
        assert!(outcome.rounds.is_empty());
        assert_eq!(source.drawn(), 0);
    }

    #[test]
    fn test_resolve_parsed_error() {
        let outcome = resolve_parsed(parse("7DX+"), &mut ScriptedSource::new([10]));

        assert!(!outcome.valid);
        assert_eq!(outcome.command, "7DX+");
        assert_eq!(outcome.explosion_count, 0);
        assert!(outcome.all_values.is_empty());
    }

    #[test]
    fn test_resolve_parsed_ok() {
        let outcome = resolve_parsed(parse("2DX"), &mut ScriptedSource::new([4, 6]));
        assert!(outcome.valid);
        assert_eq!(outcome.total, 6);
    }
}
