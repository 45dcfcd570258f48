pub mod arithmetic;
pub mod options;

use std::fmt;

pub use arithmetic::QuestionBank;
pub use options::OptionGenerator;

/// One multiple-choice arithmetic question.
///
/// `options` always holds four distinct positive values, one of which is `answer`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub prompt: String,
    pub answer: u32,
    pub options: Vec<u32>,
    pub explanation: Option<String>,
}

impl Question {
    pub fn new(
        prompt: String,
        answer: u32,
        options: Vec<u32>,
        explanation: Option<String>,
    ) -> Self {
        Self {
            prompt,
            answer,
            options,
            explanation,
        }
    }

    pub fn is_correct(&self, choice: u32) -> bool {
        choice == self.answer
    }

    /// The explanation to show after repeated misses, falling back to a generic one.
    pub fn explanation_or_default(&self) -> String {
        match &self.explanation {
            Some(text) => text.clone(),
            None => format!(
                "The answer is {}. Let's break it down step by step!",
                self.answer
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Addition => "+",
            Operation::Subtraction => "-",
            Operation::Multiplication => "×",
            Operation::Division => "÷",
        }
    }

    /// Applies the operation. `None` for negative or non-integer results.
    pub fn apply(&self, left: u32, right: u32) -> Option<u32> {
        match self {
            Operation::Addition => left.checked_add(right),
            Operation::Subtraction => left.checked_sub(right),
            Operation::Multiplication => left.checked_mul(right),
            Operation::Division => {
                if right == 0 || left % right != 0 {
                    None
                } else {
                    Some(left / right)
                }
            }
        }
    }
}

/// Age band chosen by the player. Fixes the operation family and number ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AgeTier {
    #[serde(rename = "5-6")]
    FiveToSix,
    #[serde(rename = "7-8")]
    SevenToEight,
    #[serde(rename = "9-10")]
    NineToTen,
    #[serde(rename = "11-12")]
    ElevenToTwelve,
}

impl AgeTier {
    pub const ALL: [AgeTier; 4] = [
        AgeTier::FiveToSix,
        AgeTier::SevenToEight,
        AgeTier::NineToTen,
        AgeTier::ElevenToTwelve,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeTier::FiveToSix => "5-6",
            AgeTier::SevenToEight => "7-8",
            AgeTier::NineToTen => "9-10",
            AgeTier::ElevenToTwelve => "11-12",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.label() == label)
    }

    /// Operations a question for this tier may use.
    pub fn operations(&self) -> &'static [Operation] {
        match self {
            AgeTier::FiveToSix => &[Operation::Addition],
            AgeTier::SevenToEight => &[Operation::Addition, Operation::Subtraction],
            AgeTier::NineToTen => &[Operation::Multiplication],
            AgeTier::ElevenToTwelve => &[Operation::Multiplication, Operation::Division],
        }
    }
}

impl fmt::Display for AgeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which game a question is for. The maze uses smaller numbers and wider distractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Variant {
    Quiz,
    Maze,
}
