//! The arithmetic quiz: one question at a time, three lives, and a worked
//! explanation after a run of misses.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::error::GenerationError;
use crate::game::{Continuation, Resumable, Tally, Ticket, TicketBook, Verdict};
use crate::quiz::{AgeTier, Question, QuestionBank, Variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum QuizPhase {
    /// Waiting for an answer to the current question.
    Playing,
    /// Showing whether the last answer was right; the next question follows after a delay.
    Feedback(Verdict),
    /// Showing the explanation until the player acknowledges it.
    Explanation(Verdict),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not in `Playing`, or the game is over.
    Ignored,
    /// `continuation` is `None` when the explanation is up or no lives are left.
    Answered {
        verdict: Verdict,
        continuation: Option<Continuation>,
    },
}

pub struct QuizSession<R: Rng = StdRng> {
    tier: AgeTier,
    config: GameConfig,
    bank: QuestionBank,
    rng: R,
    phase: QuizPhase,
    tally: Tally,
    streak: u32,
    wrong_streak: u32,
    question: Question,
    tickets: TicketBook,
}

impl QuizSession<StdRng> {
    pub fn new(tier: AgeTier, config: GameConfig) -> Result<Self, GenerationError> {
        Self::with_rng(tier, config, StdRng::from_entropy())
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn with_rng(
        tier: AgeTier,
        config: GameConfig,
        mut rng: R,
    ) -> Result<Self, GenerationError> {
        let bank = QuestionBank::new(config.quiz_option_spread)?;
        let question = bank.generate(tier, Variant::Quiz, None, &mut rng)?;
        log::info!("starting quiz for ages {}", tier);
        Ok(Self {
            tier,
            tally: Tally::new(config.starting_lives, config.points_per_correct),
            config,
            bank,
            rng,
            phase: QuizPhase::Playing,
            streak: 0,
            wrong_streak: 0,
            question,
            tickets: TicketBook::new(),
        })
    }

    pub fn submit_answer(&mut self, choice: u32) -> SubmitOutcome {
        if self.phase != QuizPhase::Playing || self.tally.is_out_of_lives() {
            log::debug!("ignoring answer {} in phase {:?}", choice, self.phase);
            return SubmitOutcome::Ignored;
        }

        let verdict = Verdict {
            choice,
            correct: self.question.is_correct(choice),
        };

        let mut continuation = None;
        if verdict.correct {
            self.tally.reward();
            self.streak += 1;
            self.wrong_streak = 0;
            self.phase = QuizPhase::Feedback(verdict);
            continuation = Some(self.tickets.issue(self.config.quiz_feedback_delay));
        } else {
            self.tally.penalize();
            self.streak = 0;
            self.wrong_streak += 1;
            if self.wrong_streak >= self.config.explanation_threshold {
                log::debug!("{} misses in a row, showing explanation", self.wrong_streak);
                self.wrong_streak = 0;
                self.phase = QuizPhase::Explanation(verdict);
            } else {
                self.phase = QuizPhase::Feedback(verdict);
                continuation = Some(self.tickets.issue(self.config.quiz_feedback_delay));
            }
        }

        if self.tally.is_out_of_lives() {
            log::info!("quiz over with score {}", self.tally.score);
            self.tickets.revoke();
            continuation = None;
        }

        SubmitOutcome::Answered {
            verdict,
            continuation,
        }
    }

    /// Leaves the explanation and moves on. Returns `false` if no explanation is showing.
    pub fn acknowledge(&mut self) -> Result<bool, GenerationError> {
        match self.phase {
            QuizPhase::Explanation(_) if !self.tally.is_out_of_lives() => {
                self.next_question()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Resets counters and draws a fresh question. Pending continuations become stale.
    pub fn restart(&mut self) -> Result<(), GenerationError> {
        self.tickets.invalidate();
        self.tally = Tally::new(self.config.starting_lives, self.config.points_per_correct);
        self.streak = 0;
        self.wrong_streak = 0;
        self.next_question()?;
        log::info!("restarted quiz for ages {}", self.tier);
        Ok(())
    }

    fn next_question(&mut self) -> Result<(), GenerationError> {
        self.question = self
            .bank
            .generate(self.tier, Variant::Quiz, None, &mut self.rng)?;
        self.phase = QuizPhase::Playing;
        Ok(())
    }

    pub fn tier(&self) -> AgeTier {
        self.tier
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// The explanation text, only while the explanation phase is showing.
    pub fn explanation(&self) -> Option<String> {
        match self.phase {
            QuizPhase::Explanation(_) => Some(self.question.explanation_or_default()),
            _ => None,
        }
    }

    pub fn score(&self) -> u32 {
        self.tally.score
    }

    pub fn lives(&self) -> u32 {
        self.tally.lives
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn wrong_streak(&self) -> u32 {
        self.wrong_streak
    }

    pub fn is_over(&self) -> bool {
        self.tally.is_out_of_lives()
    }

    pub fn pending_ticket(&self) -> Option<Ticket> {
        self.tickets.outstanding()
    }

    #[cfg(test)]
    pub(crate) fn set_question(&mut self, question: Question) {
        self.question = question;
    }
}

impl<R: Rng> Resumable for QuizSession<R> {
    fn resume(&mut self, ticket: Ticket) -> Result<bool, GenerationError> {
        if !self.tickets.redeem(ticket) {
            log::debug!("dropping stale quiz continuation {:?}", ticket);
            return Ok(false);
        }
        match self.phase {
            QuizPhase::Feedback(_) => {
                self.next_question()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
