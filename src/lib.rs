//! Core of a children's learning-game shell.
//!
//! Three mini-games share one question generator:
//! - [`QuizSession`]: arithmetic questions with lives, streaks and explanations.
//! - [`MazeSession`]: a 4×4 maze whose path cells unlock on a correct answer.
//! - [`MatchSession`]: pair each word with its picture.
//!
//! Rendering, navigation and timing belong to the caller. Sessions return
//! [`Continuation`]s for their display delays; [`DisplayTimer`] can run them
//! on tokio.

pub mod config;
pub mod error;
pub mod game;
pub mod quiz;

pub use config::GameConfig;
pub use error::{ConfigError, GenerationError};
pub use game::matching::{MatchPhase, MatchSession, MatchVerdict, SelectOutcome, WordPair};
pub use game::maze::{
    CellRole, Direction, MazeAnswerOutcome, MazeCell, MazeSession, MoveOutcome, Position,
};
pub use game::quiz_session::{QuizPhase, QuizSession, SubmitOutcome};
pub use game::timer::DisplayTimer;
pub use game::{Continuation, Resumable, Tally, Ticket, TicketBook, Verdict};
pub use quiz::{AgeTier, Operation, OptionGenerator, Question, QuestionBank, Variant};
