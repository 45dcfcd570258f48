use rand::Rng;

use crate::error::GenerationError;
use crate::quiz::options::OptionGenerator;
use crate::quiz::{AgeTier, Operation, Question, Variant};

/// Builds arithmetic questions for an age tier.
///
/// The bank only holds the quiz distractor policy; every call draws fresh
/// numbers from the caller's random source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionBank {
    quiz_options: OptionGenerator,
}

impl QuestionBank {
    pub fn new(quiz_option_spread: u32) -> Result<Self, GenerationError> {
        Ok(Self {
            quiz_options: OptionGenerator::new(quiz_option_spread)?,
        })
    }

    /// Generates one question.
    ///
    /// `hint` picks the operation when it belongs to the tier's family and is
    /// ignored otherwise; without it the operation is drawn uniformly.
    pub fn generate<R: Rng>(
        &self,
        tier: AgeTier,
        variant: Variant,
        hint: Option<Operation>,
        rng: &mut R,
    ) -> Result<Question, GenerationError> {
        let family = tier.operations();
        let operation = match hint {
            Some(op) if family.contains(&op) => op,
            _ => family[rng.gen_range(0..family.len())],
        };

        let (left, right, answer) = draw_operands(operation, tier, variant, rng);
        let options = match variant {
            Variant::Quiz => self.quiz_options.generate(answer, rng)?,
            Variant::Maze => OptionGenerator::new(maze_spread(tier))?.generate(answer, rng)?,
        };

        let prompt = format!("{} {} {} = ?", left, operation.symbol(), right);
        log::debug!("generated {:?} question for {}: {}", variant, tier, prompt);

        Ok(Question::new(
            prompt,
            answer,
            options,
            Some(explain(operation, tier, left, right, answer)),
        ))
    }
}

/// Distractor spread for maze questions, scaled with the size of the answers.
fn maze_spread(tier: AgeTier) -> u32 {
    match tier {
        AgeTier::FiveToSix => 3,
        AgeTier::SevenToEight => 5,
        AgeTier::NineToTen => 10,
        AgeTier::ElevenToTwelve => 15,
    }
}

/// Returns `(left, right, answer)`. Subtraction and division pick the answer
/// first so the result is always a positive integer.
fn draw_operands<R: Rng>(
    operation: Operation,
    tier: AgeTier,
    variant: Variant,
    rng: &mut R,
) -> (u32, u32, u32) {
    let quiz = variant == Variant::Quiz;
    match operation {
        Operation::Addition => {
            let max = match (tier, quiz) {
                (AgeTier::FiveToSix, true) => 10,
                (AgeTier::FiveToSix, false) => 5,
                (_, true) => 20,
                (_, false) => 10,
            };
            let a = rng.gen_range(1..=max);
            let b = rng.gen_range(1..=max);
            (a, b, a + b)
        }
        Operation::Subtraction => {
            let (answer_max, gap_max) = if quiz { (20, 10) } else { (10, 5) };
            let answer = rng.gen_range(1..=answer_max);
            let minuend = answer + rng.gen_range(1..=gap_max);
            (minuend, minuend - answer, answer)
        }
        Operation::Multiplication => {
            let (min, max) = match (tier, quiz) {
                (AgeTier::NineToTen, true) => (1, 12),
                (AgeTier::NineToTen, false) => (2, 9),
                (_, true) => (1, 15),
                (_, false) => (2, 12),
            };
            let a = rng.gen_range(min..=max);
            let b = rng.gen_range(min..=max);
            (a, b, a * b)
        }
        Operation::Division => {
            let (quotient_min, divisor_max) = if quiz { (1, 12) } else { (2, 9) };
            let answer = rng.gen_range(quotient_min..=12);
            let divisor = rng.gen_range(quotient_min..=divisor_max);
            (answer * divisor, divisor, answer)
        }
    }
}

fn explain(operation: Operation, tier: AgeTier, left: u32, right: u32, answer: u32) -> String {
    match (operation, tier) {
        (Operation::Addition, AgeTier::FiveToSix) => format!(
            "When we add {} + {}, we count {} first, then count {} more. That gives us {}!",
            left, right, left, right, answer
        ),
        (Operation::Addition, _) => format!(
            "{} + {} = {}. We add the numbers together!",
            left, right, answer
        ),
        (Operation::Subtraction, _) => format!(
            "{} - {} = {}. We subtract to find the difference!",
            left, right, answer
        ),
        (Operation::Multiplication, AgeTier::NineToTen) => format!(
            "{} × {} means we add {} together {} times, which equals {}!",
            left, right, left, right, answer
        ),
        (Operation::Multiplication, _) => format!(
            "{} × {} = {}. Multiplication is repeated addition!",
            left, right, answer
        ),
        (Operation::Division, _) => format!(
            "{} ÷ {} = {}. Division is the opposite of multiplication!",
            left, right, answer
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;
    use std::collections::HashSet;

    fn bank() -> QuestionBank {
        QuestionBank::new(10).unwrap()
    }

    /// Splits "a op b = ?" back into its parts.
    fn parse_prompt(prompt: &str) -> (u32, Operation, u32) {
        let parts: Vec<&str> = prompt.split_whitespace().collect();
        assert_eq!(parts.len(), 5, "unexpected prompt {:?}", prompt);
        assert_eq!(&parts[3..], &["=", "?"]);
        let op = match parts[1] {
            "+" => Operation::Addition,
            "-" => Operation::Subtraction,
            "×" => Operation::Multiplication,
            "÷" => Operation::Division,
            other => panic!("unknown operator {}", other),
        };
        (parts[0].parse().unwrap(), op, parts[2].parse().unwrap())
    }

    #[rstest]
    fn prompts_agree_with_answers(
        #[values(
            AgeTier::FiveToSix,
            AgeTier::SevenToEight,
            AgeTier::NineToTen,
            AgeTier::ElevenToTwelve
        )]
        tier: AgeTier,
        #[values(Variant::Quiz, Variant::Maze)] variant: Variant,
    ) {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..300 {
            let question = bank.generate(tier, variant, None, &mut rng).unwrap();
            let (left, op, right) = parse_prompt(&question.prompt);
            assert!(tier.operations().contains(&op));
            assert!(left > 0 && right > 0);
            assert_eq!(op.apply(left, right), Some(question.answer));

            let distinct: HashSet<u32> = question.options.iter().copied().collect();
            assert_eq!(distinct.len(), 4);
            assert!(question.options.iter().all(|&o| o > 0));
            assert_eq!(
                question.options.iter().filter(|&&o| o == question.answer).count(),
                1
            );
            assert!(question.explanation.is_some());
        }
    }

    #[rstest]
    #[case(AgeTier::FiveToSix, Variant::Quiz, 1, 10)]
    #[case(AgeTier::FiveToSix, Variant::Maze, 1, 5)]
    #[case(AgeTier::NineToTen, Variant::Quiz, 1, 12)]
    #[case(AgeTier::NineToTen, Variant::Maze, 2, 9)]
    fn operands_respect_tier_ranges(
        #[case] tier: AgeTier,
        #[case] variant: Variant,
        #[case] min: u32,
        #[case] max: u32,
    ) {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..300 {
            let question = bank.generate(tier, variant, None, &mut rng).unwrap();
            let (left, _, right) = parse_prompt(&question.prompt);
            assert!((min..=max).contains(&left), "{}", question.prompt);
            assert!((min..=max).contains(&right), "{}", question.prompt);
        }
    }

    #[test]
    fn subtraction_never_goes_negative() {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let question = bank
                .generate(
                    AgeTier::SevenToEight,
                    Variant::Quiz,
                    Some(Operation::Subtraction),
                    &mut rng,
                )
                .unwrap();
            let (left, op, right) = parse_prompt(&question.prompt);
            assert_eq!(op, Operation::Subtraction);
            assert!(left >= right);
            assert!((1..=20).contains(&question.answer));
        }
    }

    #[test]
    fn division_always_divides_evenly() {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..500 {
            let question = bank
                .generate(
                    AgeTier::ElevenToTwelve,
                    Variant::Quiz,
                    Some(Operation::Division),
                    &mut rng,
                )
                .unwrap();
            let (left, op, right) = parse_prompt(&question.prompt);
            assert_eq!(op, Operation::Division);
            assert_eq!(left % right, 0);
            assert_eq!(left / right, question.answer);
            assert!((1..=12).contains(&question.answer));
        }
    }

    #[test]
    fn hint_outside_family_is_ignored() {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let question = bank
                .generate(AgeTier::FiveToSix, Variant::Quiz, Some(Operation::Division), &mut rng)
                .unwrap();
            assert_eq!(parse_prompt(&question.prompt).1, Operation::Addition);
        }
    }

    #[test]
    fn both_operations_of_a_family_show_up() {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(4);
        let seen: HashSet<Operation> = (0..100)
            .map(|_| {
                let question = bank
                    .generate(AgeTier::SevenToEight, Variant::Quiz, None, &mut rng)
                    .unwrap();
                parse_prompt(&question.prompt).1
            })
            .collect();
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn young_tier_explanation_counts_on() {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(5);
        let question = bank
            .generate(AgeTier::FiveToSix, Variant::Quiz, None, &mut rng)
            .unwrap();
        let explanation = question.explanation.unwrap();
        assert!(explanation.starts_with("When we add"));
        assert!(explanation.ends_with(&format!("That gives us {}!", question.answer)));
    }
}
