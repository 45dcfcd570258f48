//! Word/picture matching: pick a word and a picture, score when they belong together.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::error::GenerationError;
use crate::game::{Continuation, Resumable, Tally, Ticket, TicketBook};
use crate::quiz::AgeTier;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WordPair {
    pub word: String,
    pub picture: String,
    pub matched: bool,
}

/// The fixed word list for a tier, as `(word, picture)`.
pub fn pairs_for(tier: AgeTier) -> &'static [(&'static str, &'static str)] {
    match tier {
        AgeTier::FiveToSix => &[
            ("CAT", "🐱"),
            ("DOG", "🐶"),
            ("SUN", "☀️"),
            ("BALL", "⚽"),
        ],
        AgeTier::SevenToEight => &[
            ("APPLE", "🍎"),
            ("HOUSE", "🏠"),
            ("TREE", "🌳"),
            ("BOOK", "📚"),
            ("CAR", "🚗"),
        ],
        AgeTier::NineToTen => &[
            ("ELEPHANT", "🐘"),
            ("BUTTERFLY", "🦋"),
            ("RAINBOW", "🌈"),
            ("FLOWER", "🌸"),
            ("MOUNTAIN", "⛰️"),
            ("OCEAN", "🌊"),
        ],
        AgeTier::ElevenToTwelve => &[
            ("TELESCOPE", "🔭"),
            ("MICROSCOPE", "🔬"),
            ("LABORATORY", "🧪"),
            ("CALCULATOR", "📱"),
            ("GEOMETRY", "📐"),
            ("ENCYCLOPEDIA", "📖"),
        ],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchVerdict {
    pub word: usize,
    pub picture: usize,
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MatchPhase {
    Selecting,
    /// Both halves are picked and judged; selections clear when the continuation fires.
    Reviewing(MatchVerdict),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Unknown, already matched, already selected, or the board is locked.
    Ignored,
    /// Waiting for the other half.
    Selected,
    Evaluated {
        verdict: MatchVerdict,
        complete: bool,
        continuation: Option<Continuation>,
    },
}

pub struct MatchSession<R: Rng = StdRng> {
    tier: AgeTier,
    config: GameConfig,
    rng: R,
    pairs: Vec<WordPair>,
    word_order: Vec<usize>,
    picture_order: Vec<usize>,
    selected_word: Option<usize>,
    selected_picture: Option<usize>,
    phase: MatchPhase,
    tally: Tally,
    complete: bool,
    tickets: TicketBook,
}

impl MatchSession<StdRng> {
    pub fn new(tier: AgeTier, config: GameConfig) -> Self {
        Self::with_rng(tier, config, StdRng::from_entropy())
    }
}

impl<R: Rng> MatchSession<R> {
    pub fn with_rng(tier: AgeTier, config: GameConfig, rng: R) -> Self {
        let mut session = Self {
            tier,
            tally: Tally::new(config.starting_lives, config.points_per_correct),
            config,
            rng,
            pairs: Vec::new(),
            word_order: Vec::new(),
            picture_order: Vec::new(),
            selected_word: None,
            selected_picture: None,
            phase: MatchPhase::Selecting,
            complete: false,
            tickets: TicketBook::new(),
        };
        session.deal();
        log::info!("starting word match for ages {} with {} pairs", tier, session.pairs.len());
        session
    }

    pub fn select_word(&mut self, word: &str) -> SelectOutcome {
        let Some(index) = self.pairs.iter().position(|p| p.word == word) else {
            return SelectOutcome::Ignored;
        };
        if !self.accepts(index) || self.selected_word == Some(index) {
            return SelectOutcome::Ignored;
        }
        self.selected_word = Some(index);
        self.evaluate()
    }

    pub fn select_picture(&mut self, picture: &str) -> SelectOutcome {
        let Some(index) = self.pairs.iter().position(|p| p.picture == picture) else {
            return SelectOutcome::Ignored;
        };
        if !self.accepts(index) || self.selected_picture == Some(index) {
            return SelectOutcome::Ignored;
        }
        self.selected_picture = Some(index);
        self.evaluate()
    }

    fn accepts(&self, index: usize) -> bool {
        self.phase == MatchPhase::Selecting && !self.is_finished() && !self.pairs[index].matched
    }

    fn evaluate(&mut self) -> SelectOutcome {
        let (Some(word), Some(picture)) = (self.selected_word, self.selected_picture) else {
            return SelectOutcome::Selected;
        };

        let verdict = MatchVerdict {
            word,
            picture,
            correct: word == picture,
        };
        if verdict.correct {
            self.tally.reward();
            self.pairs[word].matched = true;
            if self.pairs.iter().all(|p| p.matched) {
                self.complete = true;
                log::info!("all pairs matched with score {}", self.tally.score);
            }
        } else {
            self.tally.penalize();
            if self.tally.is_out_of_lives() {
                log::info!("word match lost with score {}", self.tally.score);
            }
        }

        self.phase = MatchPhase::Reviewing(verdict);
        let continuation = if self.tally.is_out_of_lives() {
            None
        } else {
            Some(self.tickets.issue(self.config.match_feedback_delay))
        };
        SelectOutcome::Evaluated {
            verdict,
            complete: self.complete,
            continuation,
        }
    }

    /// Reshuffles the board and resets score and lives.
    pub fn restart(&mut self) {
        self.tickets.invalidate();
        self.tally = Tally::new(self.config.starting_lives, self.config.points_per_correct);
        self.deal();
        log::info!("restarted word match for ages {}", self.tier);
    }

    fn deal(&mut self) {
        self.pairs = pairs_for(self.tier)
            .iter()
            .map(|(word, picture)| WordPair {
                word: word.to_string(),
                picture: picture.to_string(),
                matched: false,
            })
            .collect();
        self.word_order = (0..self.pairs.len()).collect();
        self.word_order.shuffle(&mut self.rng);
        self.picture_order = (0..self.pairs.len()).collect();
        self.picture_order.shuffle(&mut self.rng);
        self.clear_selection();
        self.complete = false;
    }

    fn clear_selection(&mut self) {
        self.selected_word = None;
        self.selected_picture = None;
        self.phase = MatchPhase::Selecting;
    }

    fn is_finished(&self) -> bool {
        self.complete || self.tally.is_out_of_lives()
    }

    pub fn tier(&self) -> AgeTier {
        self.tier
    }

    pub fn pairs(&self) -> &[WordPair] {
        &self.pairs
    }

    /// Words in display order.
    pub fn words(&self) -> Vec<&str> {
        self.word_order
            .iter()
            .map(|&i| self.pairs[i].word.as_str())
            .collect()
    }

    /// Pictures in display order, shuffled independently of the words.
    pub fn pictures(&self) -> Vec<&str> {
        self.picture_order
            .iter()
            .map(|&i| self.pairs[i].picture.as_str())
            .collect()
    }

    pub fn selected_word(&self) -> Option<&str> {
        self.selected_word.map(|i| self.pairs[i].word.as_str())
    }

    pub fn selected_picture(&self) -> Option<&str> {
        self.selected_picture.map(|i| self.pairs[i].picture.as_str())
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.tally.score
    }

    pub fn lives(&self) -> u32 {
        self.tally.lives
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_over(&self) -> bool {
        self.tally.is_out_of_lives()
    }
}

impl<R: Rng> Resumable for MatchSession<R> {
    fn resume(&mut self, ticket: Ticket) -> Result<bool, GenerationError> {
        if !self.tickets.redeem(ticket) {
            log::debug!("dropping stale match continuation {:?}", ticket);
            return Ok(false);
        }
        self.clear_selection();
        Ok(true)
    }
}
