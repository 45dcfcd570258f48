//! The math maze: a 4×4 grid where every step onto a new path cell has to be
//! earned by answering that cell's question.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::error::GenerationError;
use crate::game::{Continuation, Resumable, Tally, Ticket, TicketBook, Verdict};
use crate::quiz::{AgeTier, Question, QuestionBank, Variant};

pub const MAZE_SIZE: usize = 4;

/// The route from the top-left start to the bottom-right end. Every other cell is a wall.
pub const PATH_TEMPLATE: [Position; 7] = [
    Position::new(0, 0),
    Position::new(0, 1),
    Position::new(1, 1),
    Position::new(1, 2),
    Position::new(2, 2),
    Position::new(3, 2),
    Position::new(3, 3),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring position, clamped to the grid.
    pub fn step(self, direction: Direction) -> Self {
        let last = MAZE_SIZE - 1;
        match direction {
            Direction::Up => Self::new(self.row.saturating_sub(1), self.col),
            Direction::Down => Self::new((self.row + 1).min(last), self.col),
            Direction::Left => Self::new(self.row, self.col.saturating_sub(1)),
            Direction::Right => Self::new(self.row, (self.col + 1).min(last)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CellRole {
    Start,
    End,
    Path,
    Wall,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MazeCell {
    question: Question,
    role: CellRole,
    visited: bool,
}

impl MazeCell {
    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn role(&self) -> CellRole {
        self.role
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    /// Start and end count as path; only walls are impassable.
    pub fn is_path(&self) -> bool {
        self.role != CellRole::Wall
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game is finished or a question is still waiting for an answer.
    Ignored,
    /// A wall or the edge of the grid.
    Blocked,
    Moved { to: Position, complete: bool },
    /// The target is locked; answer its question to step onto it.
    Challenge { at: Position },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeAnswerOutcome {
    /// No cell is waiting for an answer, or the game is finished.
    Ignored,
    Unlocked {
        at: Position,
        complete: bool,
        continuation: Continuation,
    },
    /// `continuation` is `None` once the last life is gone.
    Missed {
        lives: u32,
        continuation: Option<Continuation>,
    },
}

pub struct MazeSession<R: Rng = StdRng> {
    tier: AgeTier,
    config: GameConfig,
    bank: QuestionBank,
    rng: R,
    grid: Vec<Vec<MazeCell>>,
    player: Position,
    pending: Option<Position>,
    feedback: Option<Verdict>,
    tally: Tally,
    complete: bool,
    tickets: TicketBook,
}

impl MazeSession<StdRng> {
    pub fn new(tier: AgeTier, config: GameConfig) -> Result<Self, GenerationError> {
        Self::with_rng(tier, config, StdRng::from_entropy())
    }
}

impl<R: Rng> MazeSession<R> {
    pub fn with_rng(
        tier: AgeTier,
        config: GameConfig,
        mut rng: R,
    ) -> Result<Self, GenerationError> {
        let bank = QuestionBank::new(config.quiz_option_spread)?;
        let grid = build_grid(&bank, tier, &mut rng)?;
        log::info!("starting maze for ages {}", tier);
        Ok(Self {
            tier,
            tally: Tally::new(config.starting_lives, config.points_per_correct),
            config,
            bank,
            rng,
            grid,
            player: start_position(),
            pending: None,
            feedback: None,
            complete: false,
            tickets: TicketBook::new(),
        })
    }

    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        if self.is_finished() || self.pending.is_some() {
            log::debug!("ignoring move {:?}", direction);
            return MoveOutcome::Ignored;
        }

        // A new move replaces whatever feedback was still on screen.
        self.feedback = None;
        self.tickets.revoke();

        let target = self.player.step(direction);
        let cell = &self.grid[target.row][target.col];
        if target == self.player || !cell.is_path() {
            log::debug!("move {:?} from {:?} blocked", direction, self.player);
            return MoveOutcome::Blocked;
        }

        if cell.visited {
            self.player = target;
            if cell.role == CellRole::End {
                self.win();
            }
            MoveOutcome::Moved {
                to: target,
                complete: self.complete,
            }
        } else {
            self.pending = Some(target);
            MoveOutcome::Challenge { at: target }
        }
    }

    pub fn submit_answer(&mut self, choice: u32) -> MazeAnswerOutcome {
        if self.is_finished() {
            return MazeAnswerOutcome::Ignored;
        }
        let Some(at) = self.pending.take() else {
            log::debug!("ignoring answer {} with no locked cell selected", choice);
            return MazeAnswerOutcome::Ignored;
        };

        let cell = &mut self.grid[at.row][at.col];
        let verdict = Verdict {
            choice,
            correct: cell.question.is_correct(choice),
        };
        self.feedback = Some(verdict);

        if verdict.correct {
            cell.visited = true;
            let reached_end = cell.role == CellRole::End;
            self.tally.reward();
            self.player = at;
            if reached_end {
                self.win();
            }
            MazeAnswerOutcome::Unlocked {
                at,
                complete: self.complete,
                continuation: self.tickets.issue(self.config.maze_feedback_delay),
            }
        } else {
            self.tally.penalize();
            let continuation = if self.tally.is_out_of_lives() {
                log::info!("maze lost with score {}", self.tally.score);
                self.tickets.revoke();
                None
            } else {
                Some(self.tickets.issue(self.config.maze_feedback_delay))
            };
            MazeAnswerOutcome::Missed {
                lives: self.tally.lives,
                continuation,
            }
        }
    }

    /// Builds a fresh maze with new questions and resets score and lives.
    pub fn restart(&mut self) -> Result<(), GenerationError> {
        self.tickets.invalidate();
        self.grid = build_grid(&self.bank, self.tier, &mut self.rng)?;
        self.player = start_position();
        self.pending = None;
        self.feedback = None;
        self.tally = Tally::new(self.config.starting_lives, self.config.points_per_correct);
        self.complete = false;
        log::info!("restarted maze for ages {}", self.tier);
        Ok(())
    }

    fn win(&mut self) {
        self.complete = true;
        log::info!("maze solved with score {}", self.tally.score);
    }

    fn is_finished(&self) -> bool {
        self.complete || self.tally.is_out_of_lives()
    }

    pub fn tier(&self) -> AgeTier {
        self.tier
    }

    pub fn grid(&self) -> &[Vec<MazeCell>] {
        &self.grid
    }

    pub fn cell(&self, at: Position) -> Option<&MazeCell> {
        self.grid.get(at.row).and_then(|row| row.get(at.col))
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn pending(&self) -> Option<Position> {
        self.pending
    }

    /// The question of the cell the player is trying to unlock.
    pub fn pending_question(&self) -> Option<&Question> {
        self.pending
            .and_then(|at| self.cell(at))
            .map(|cell| &cell.question)
    }

    /// The last answer's result, until its display delay runs out or the player moves.
    pub fn feedback(&self) -> Option<Verdict> {
        self.feedback
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

impl<R: Rng> Resumable for MazeSession<R> {
    fn resume(&mut self, ticket: Ticket) -> Result<bool, GenerationError> {
        if !self.tickets.redeem(ticket) {
            log::debug!("dropping stale maze continuation {:?}", ticket);
            return Ok(false);
        }
        self.feedback = None;
        Ok(true)
    }
}

pub fn start_position() -> Position {
    PATH_TEMPLATE[0]
}

pub fn end_position() -> Position {
    PATH_TEMPLATE[PATH_TEMPLATE.len() - 1]
}

fn role_at(at: Position) -> CellRole {
    if at == start_position() {
        CellRole::Start
    } else if at == end_position() {
        CellRole::End
    } else if PATH_TEMPLATE.contains(&at) {
        CellRole::Path
    } else {
        CellRole::Wall
    }
}

/// Every cell gets a question, walls included, so the layout never hints at the route.
fn build_grid<R: Rng>(
    bank: &QuestionBank,
    tier: AgeTier,
    rng: &mut R,
) -> Result<Vec<Vec<MazeCell>>, GenerationError> {
    let mut grid = Vec::with_capacity(MAZE_SIZE);
    for row in 0..MAZE_SIZE {
        let mut cells = Vec::with_capacity(MAZE_SIZE);
        for col in 0..MAZE_SIZE {
            let role = role_at(Position::new(row, col));
            cells.push(MazeCell {
                question: bank.generate(tier, Variant::Maze, None, rng)?,
                role,
                visited: role == CellRole::Start,
            });
        }
        grid.push(cells);
    }
    Ok(grid)
}
