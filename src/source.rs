use rand::{Rng, RngCore, SeedableRng, rngs::StdRng};
use crate::DIE_FACES;


/// Supplies die faces to the engine.
///
/// Implementations must return values in `1..=10`, one call per die. Every
/// [`rand::RngCore`] already is a `RandomSource`, so `rand::rng()` or a seeded
/// [`StdRng`] can be passed straight to [`crate::resolve`].
pub trait RandomSource {
    /// Rolls one ten-sided die.
    fn next_die(&mut self) -> u8;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_die(&mut self) -> u8 {
        self.random_range(1..=DIE_FACES)
    }
}


/// A reproducible source for a given seed.
///
/// # Examples
/// ```
/// use dx_rocks::{parse, resolve, seeded};
///
/// let first = resolve(parse("10DX7").unwrap(), &mut seeded(42));
/// let second = resolve(parse("10DX7").unwrap(), &mut seeded(42));
/// assert_eq!(first, second);
/// ```
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}


/// Replays a fixed list of die faces, starting over when it runs out.
///
/// Meant for tests and for replaying a roll that was logged. Values outside
/// `1..=10` are clamped into that range.
///
/// # Examples
/// ```
/// use dx_rocks::{RandomSource, ScriptedSource};
///
/// let mut dice = ScriptedSource::new([10, 3]);
/// assert_eq!(dice.next_die(), 10);
/// assert_eq!(dice.next_die(), 3);
/// assert_eq!(dice.next_die(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedSource {
    script: Vec<u8>,
    cursor: usize
}

impl ScriptedSource {
    /// Creates a source that yields `script` in order.
    ///
    /// An empty script yields 1 forever.
    pub fn new(script: impl IntoIterator<Item = u8>) -> Self {
        Self {
            script: script.into_iter().collect(),
            cursor: 0
        }
    }

    /// Number of faces handed out so far.
    pub const fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_die(&mut self) -> u8 {
        if self.script.is_empty() {
            return 1;
        }

        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;

        value.clamp(1, DIE_FACES)
    }
}


#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use super::*;


    proptest! {
        #[test]
        fn test_rng_faces_in_range(seed: u64) {
            let mut rng = seeded(seed);

            for _ in 0..100 {
                let face = rng.next_die();
                prop_assert!((1..=10).contains(&face));
            }
        }

        #[test]
        fn test_script_replays_and_cycles(script in prop::collection::vec(1..=10u8, 1..20)) {
            let mut source = ScriptedSource::new(script.clone());

            let drawn: Vec<u8> = (0..script.len() * 2)
                .map(|_| source.next_die())
                .collect();

            prop_assert_eq!(&drawn[..script.len()], script.as_slice());
            prop_assert_eq!(&drawn[script.len()..], script.as_slice());
            prop_assert_eq!(source.drawn(), script.len() * 2);
        }

        #[test]
        fn test_script_clamps(value: u8) {
            let mut source = ScriptedSource::new([value]);
            prop_assert!((1..=10).contains(&source.next_die()));
        }
    }

    #[test]
    fn test_empty_script() {
        let mut source = ScriptedSource::new([]);
        assert_eq!(source.next_die(), 1);
        assert_eq!(source.drawn(), 0);
    }

    #[test]
    fn test_thread_rng_is_a_source() {
        let source: &mut dyn RandomSource = &mut rand::rng();
        let face = source.next_die();
        assert!((1..=10).contains(&face));
    }
}
