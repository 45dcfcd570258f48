#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;

use playlearn::Question;

pub fn init_logging() {
    let _ = pretty_env_logger::try_init();
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Any option that is not the answer.
pub fn distractor(question: &Question) -> u32 {
    question
        .options
        .iter()
        .copied()
        .find(|&option| option != question.answer)
        .expect("a question always has distractors")
}
