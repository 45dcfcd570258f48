//! Game sessions and the plumbing they share.
//!
//! Sessions are plain synchronous state machines. Anything that has to happen
//! "a little later" (hiding feedback, moving on to the next question) is handed
//! back to the caller as a [`Continuation`]. The caller waits out the delay and
//! passes the ticket back through [`Resumable::resume`]; tickets from before a
//! restart, or ones already redeemed, are ignored.

pub mod matching;
pub mod maze;
pub mod quiz_session;
pub mod timer;

use std::time::Duration;

use crate::error::GenerationError;

/// Identifies one scheduled continuation of one session incarnation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Ticket {
    generation: u64,
    serial: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A delayed step the caller must schedule: after `delay`, call `resume(ticket)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Continuation {
    pub ticket: Ticket,
    pub delay: Duration,
}

/// Issues tickets and remembers the single one that is still valid.
#[derive(Debug, Clone, Default)]
pub struct TicketBook {
    generation: u64,
    next_serial: u64,
    outstanding: Option<Ticket>,
}

impl TicketBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new ticket, superseding any outstanding one.
    pub fn issue(&mut self, delay: Duration) -> Continuation {
        let ticket = Ticket {
            generation: self.generation,
            serial: self.next_serial,
        };
        self.next_serial += 1;
        self.outstanding = Some(ticket);
        Continuation { ticket, delay }
    }

    /// Consumes `ticket` if it is the outstanding one.
    pub fn redeem(&mut self, ticket: Ticket) -> bool {
        if self.outstanding == Some(ticket) {
            self.outstanding = None;
            true
        } else {
            false
        }
    }

    /// Drops the outstanding ticket without moving to a new generation.
    pub fn revoke(&mut self) -> Option<Ticket> {
        self.outstanding.take()
    }

    /// Starts a new generation; every earlier ticket becomes stale.
    pub fn invalidate(&mut self) -> Option<Ticket> {
        self.generation += 1;
        self.outstanding.take()
    }

    pub fn outstanding(&self) -> Option<Ticket> {
        self.outstanding
    }
}

/// Result of checking one answer, kept around so the shell can colour buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Verdict {
    pub choice: u32,
    pub correct: bool,
}

/// Score and lives, shared by all three games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tally {
    pub score: u32,
    pub lives: u32,
    points_per_correct: u32,
}

impl Tally {
    pub fn new(lives: u32, points_per_correct: u32) -> Self {
        Self {
            score: 0,
            lives,
            points_per_correct,
        }
    }

    pub fn reward(&mut self) {
        self.score = self.score.saturating_add(self.points_per_correct);
    }

    pub fn penalize(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }
}

/// Implemented by every session so a timer can drive any of them.
pub trait Resumable {
    /// Runs the continuation for `ticket`. Returns `Ok(false)` if the ticket is stale.
    fn resume(&mut self, ticket: Ticket) -> Result<bool, GenerationError>;
}
