use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::GenerationError;

pub const OPTION_COUNT: usize = 4;
pub const MAX_ATTEMPTS: u32 = 1000;

/// Builds the answer buttons for a question: the correct answer plus three
/// distractors drawn at a random offset of at most `spread` from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionGenerator {
    spread: u32,
}

impl OptionGenerator {
    pub fn new(spread: u32) -> Result<Self, GenerationError> {
        // An answer of 1 only has distractors above it, so three of them need a spread of 3.
        if spread < (OPTION_COUNT as u32 - 1) {
            return Err(GenerationError::SpreadTooNarrow { spread });
        }
        Ok(Self { spread })
    }

    /// Returns four distinct positive options containing `answer` once, in random order.
    pub fn generate<R: Rng>(&self, answer: u32, rng: &mut R) -> Result<Vec<u32>, GenerationError> {
        let mut options = Vec::with_capacity(OPTION_COUNT);
        options.push(answer);

        let spread = i64::from(self.spread);
        let mut attempts = 0;
        while options.len() < OPTION_COUNT {
            if attempts == MAX_ATTEMPTS {
                return Err(GenerationError::Exhausted {
                    answer,
                    spread: self.spread,
                    attempts,
                });
            }
            attempts += 1;

            let candidate = i64::from(answer) + rng.gen_range(-spread..=spread);
            if candidate <= 0 {
                continue;
            }
            let Ok(candidate) = u32::try_from(candidate) else {
                continue;
            };
            if !options.contains(&candidate) {
                options.push(candidate);
            }
        }

        // We shuffle the options so the correct one isn't always the first one
        options.shuffle(rng);
        Ok(options)
    }
}
