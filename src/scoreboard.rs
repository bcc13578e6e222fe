use std::cell::Cell;
use std::fmt;

use crate::events::{Event, Observer};
use crate::game::Engine;
use crate::types::Turn;

/// Turn and score display kept in sync purely from engine events.
#[derive(Debug)]
pub struct Scoreboard {
    turn: Cell<Turn>,
    black_score: Cell<u32>,
    white_score: Cell<u32>,
    is_game_over: Cell<bool>,
}

impl Scoreboard {
    /// Seeds the display by polling `engine` once; events keep it current
    /// after the scoreboard is registered as an observer.
    pub fn for_engine(engine: &Engine) -> Self {
        Self {
            turn: Cell::new(engine.turn()),
            black_score: Cell::new(engine.black_score()),
            white_score: Cell::new(engine.white_score()),
            is_game_over: Cell::new(engine.is_game_over()),
        }
    }

    pub fn turn(&self) -> Turn {
        self.turn.get()
    }

    pub fn black_score(&self) -> u32 {
        self.black_score.get()
    }

    pub fn white_score(&self) -> u32 {
        self.white_score.get()
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over.get()
    }
}

impl Observer for Scoreboard {
    fn notify(&self, event: &Event) {
        match *event {
            Event::BlackScoreChanged { new, .. } => self.black_score.set(new),
            Event::WhiteScoreChanged { new, .. } => self.white_score.set(new),
            Event::TurnChanged { new, .. } => self.turn.set(new),
            Event::GameOver { new, .. } => self.is_game_over.set(new),
            Event::CursorMoved { .. } | Event::CellChanged { .. } => {}
        }
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_game_over() {
            f.write_str("Game over")?;
        } else {
            write!(f, "Turn: {}", self.turn())?;
        }
        write!(f, " | W {} : {} B", self.white_score(), self.black_score())
    }
}
