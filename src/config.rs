//! Tunable game constants.
//!
//! Defaults match the shipped games. Any of them can be overridden through
//! `PLAYLEARN_*` environment variables, optionally read from a `.env` file.

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_STARTING_LIVES: u32 = 3;
pub const DEFAULT_POINTS_PER_CORRECT: u32 = 10;
pub const DEFAULT_EXPLANATION_THRESHOLD: u32 = 3;
pub const DEFAULT_QUIZ_FEEDBACK_MS: u64 = 2000;
pub const DEFAULT_MAZE_FEEDBACK_MS: u64 = 1500;
pub const DEFAULT_MATCH_FEEDBACK_MS: u64 = 1500;
pub const DEFAULT_QUIZ_OPTION_SPREAD: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameConfig {
    pub starting_lives: u32,
    pub points_per_correct: u32,
    /// Consecutive misses in the quiz before the explanation is shown.
    pub explanation_threshold: u32,
    pub quiz_feedback_delay: Duration,
    pub maze_feedback_delay: Duration,
    pub match_feedback_delay: Duration,
    /// Half-width of the offset range used for quiz distractors.
    pub quiz_option_spread: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_lives: DEFAULT_STARTING_LIVES,
            points_per_correct: DEFAULT_POINTS_PER_CORRECT,
            explanation_threshold: DEFAULT_EXPLANATION_THRESHOLD,
            quiz_feedback_delay: Duration::from_millis(DEFAULT_QUIZ_FEEDBACK_MS),
            maze_feedback_delay: Duration::from_millis(DEFAULT_MAZE_FEEDBACK_MS),
            match_feedback_delay: Duration::from_millis(DEFAULT_MATCH_FEEDBACK_MS),
            quiz_option_spread: DEFAULT_QUIZ_OPTION_SPREAD,
        }
    }
}

impl GameConfig {
    /// Loads `.env` if one exists, then applies `PLAYLEARN_*` overrides to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenv::dotenv() {
            log::debug!("no .env file loaded: {}", err);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but reads values through `lookup`, which keeps tests
    /// away from the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(lives) = parse_var::<u32, _>(&lookup, "PLAYLEARN_STARTING_LIVES")? {
            config.starting_lives = lives;
        }
        if let Some(points) = parse_var::<u32, _>(&lookup, "PLAYLEARN_POINTS_PER_CORRECT")? {
            config.points_per_correct = points;
        }
        if let Some(threshold) = parse_var::<u32, _>(&lookup, "PLAYLEARN_EXPLANATION_THRESHOLD")? {
            config.explanation_threshold = threshold;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "PLAYLEARN_QUIZ_FEEDBACK_MS")? {
            config.quiz_feedback_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "PLAYLEARN_MAZE_FEEDBACK_MS")? {
            config.maze_feedback_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "PLAYLEARN_MATCH_FEEDBACK_MS")? {
            config.match_feedback_delay = Duration::from_millis(ms);
        }
        if let Some(spread) = parse_var::<u32, _>(&lookup, "PLAYLEARN_QUIZ_OPTION_SPREAD")? {
            config.quiz_option_spread = spread;
        }

        config.validate()?;
        log::debug!("loaded game config: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_lives == 0 {
            return Err(invalid(
                "PLAYLEARN_STARTING_LIVES",
                &self.starting_lives,
                "a game needs at least one life",
            ));
        }
        if self.explanation_threshold == 0 {
            return Err(invalid(
                "PLAYLEARN_EXPLANATION_THRESHOLD",
                &self.explanation_threshold,
                "the threshold must be at least one miss",
            ));
        }
        if self.quiz_option_spread < 3 {
            return Err(invalid(
                "PLAYLEARN_QUIZ_OPTION_SPREAD",
                &self.quiz_option_spread,
                "the spread must be at least 3",
            ));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| invalid(key, &raw, &err.to_string())),
    }
}

fn invalid(key: &'static str, value: &dyn std::fmt::Display, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
