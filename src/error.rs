//! Error types for question generation and configuration.
//!
//! Caller mistakes (answering in the wrong phase, walking into a wall) are not
//! errors; sessions absorb them and report an ignored outcome instead. What is
//! left here are defects in numeric policy and bad configuration.

use thiserror::Error;

/// Raised when a question cannot be built with the configured numeric ranges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The option generator ran out of draws before finding enough distractors.
    #[error(
        "could not find distinct options for answer {answer} with spread {spread} after {attempts} draws"
    )]
    Exhausted {
        answer: u32,
        spread: u32,
        attempts: u32,
    },

    /// A spread below 3 cannot produce three positive distractors for an answer of 1.
    #[error("option spread {spread} is too narrow to produce distractors")]
    SpreadTooNarrow { spread: u32 },
}

/// Raised when an environment override cannot be applied to `GameConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
