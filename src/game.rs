use std::rc::Rc;

use tracing::{debug, instrument, trace, warn};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::{ConfigError, GameOver, OutOfBounds};
use crate::events::{Event, Notifier, Observer};
use crate::types::{
    CellState, CursorOverlay, Direction, GameResult, GameState, Input, Position, Tile, Turn,
};

/// Why a commit input was turned down. Rejections change nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Occupied,
    NoCapture,
}

/// An accepted play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Play {
    pub position: Position,
    pub flipped: Vec<Position>,
    /// Side to move after the play.
    pub turn: Turn,
    /// The opponent had no reply and the mover goes again.
    pub passed: bool,
    pub game_over: bool,
}

/// What a single update call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Unrecognized input.
    Idle,
    CursorMoved(Position),
    /// Cursor is already against the edge in that direction.
    CursorBlocked,
    Played(Play),
    Rejected(Rejection),
}

/// Cells of `board` that `color` would flip by playing at `pos`.
///
/// Each capturing ray contributes its run walked back from the far end
/// towards `pos`, rays in [`Direction::RAYS`] order. Returns an empty list
/// when `pos` is occupied or nothing is captured.
pub fn captured_cells(
    board: &Board,
    color: CellState,
    pos: Position,
) -> Result<Vec<Position>, OutOfBounds> {
    board.get(pos.x, pos.y)?;
    Ok(flips_at(board, color, pos))
}

fn flips_at(board: &Board, color: CellState, pos: Position) -> Vec<Position> {
    let mut flips = Vec::new();
    if color == CellState::Empty || board.at(pos) != CellState::Empty {
        return flips;
    }

    for dir in Direction::RAYS {
        let run = capturing_run(board, color, pos, dir);
        flips.extend(run.iter().rev());
    }

    flips
}

fn capturing_run(board: &Board, color: CellState, pos: Position, dir: Direction) -> Vec<Position> {
    let opponent = color.opposite();
    let mut run = Vec::new();
    let mut cursor = pos.step(dir, board.width(), board.height());

    while let Some(square) = cursor {
        let cell = board.at(square);
        if cell == opponent {
            run.push(square);
        } else if cell == color && !run.is_empty() {
            return run;
        } else {
            break;
        }
        cursor = square.step(dir, board.width(), board.height());
    }

    Vec::new()
}

fn is_capture(board: &Board, color: CellState, pos: Position) -> bool {
    board.at(pos) == CellState::Empty
        && Direction::RAYS
            .into_iter()
            .any(|dir| !capturing_run(board, color, pos, dir).is_empty())
}

/// Keystroke-driven Reversi engine. All mutation goes through [`Engine::update`].
#[derive(Debug)]
pub struct Engine {
    board: Board,
    turn: Turn,
    cursor: Position,
    black_score: u32,
    white_score: u32,
    is_game_over: bool,
    update_speed_ms: u64,
    notifier: Notifier,
}

impl Engine {
    /// Creates a game with the standard four-piece start. The cursor starts
    /// on the top-left seed square.
    #[instrument(level = "debug")]
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.width % 2 != 0 || config.height % 2 != 0 {
            warn!(
                width = config.width,
                height = config.height,
                "odd board dimension, starting layout is off-centre"
            );
        }

        Ok(Self::opening(config))
    }

    fn opening(config: EngineConfig) -> Self {
        let mut board = Board::new(config.width, config.height);
        let mid_x = config.width / 2 - 1;
        let mid_y = config.height / 2 - 1;
        board.put(Position::new(mid_x, mid_y), CellState::White);
        board.put(Position::new(mid_x + 1, mid_y + 1), CellState::White);
        board.put(Position::new(mid_x + 1, mid_y), CellState::Black);
        board.put(Position::new(mid_x, mid_y + 1), CellState::Black);

        Self::from_parts(
            board,
            Turn::Black,
            Position::new(mid_x, mid_y),
            config.update_speed_ms,
        )
    }

    fn from_parts(board: Board, turn: Turn, cursor: Position, update_speed_ms: u64) -> Self {
        let black_score = board.count(CellState::Black) as u32;
        let white_score = board.count(CellState::White) as u32;
        let mut engine = Self {
            board,
            turn,
            cursor,
            black_score,
            white_score,
            is_game_over: false,
            update_speed_ms,
            notifier: Notifier::new(),
        };

        // Nobody is listening yet, so the opening position is settled silently.
        if !engine.any_legal_move(turn) {
            if engine.any_legal_move(turn.next()) {
                engine.turn = turn.next();
            } else {
                engine.is_game_over = true;
            }
        }

        engine
    }

    /// Registers an observer. Registering the same instance twice is a no-op
    /// and returns `false`.
    pub fn add_observer(&mut self, observer: Rc<dyn Observer>) -> bool {
        self.notifier.add(observer)
    }

    /// Deregisters an observer, returning `false` if it was not registered.
    pub fn remove_observer(&mut self, observer: &Rc<dyn Observer>) -> bool {
        self.notifier.remove(observer)
    }

    /// Processes one input symbol.
    ///
    /// Fails with [`GameOver`] on every call once neither side can move.
    #[instrument(level = "trace", skip(self))]
    pub fn update(&mut self, input: Input) -> Result<Tick, GameOver> {
        if self.is_game_over {
            return Err(self.game_over_error());
        }

        let tick = match input {
            Input::Commit => self.try_play(),
            Input::Other => Tick::Idle,
            Input::Up | Input::Down | Input::Left | Input::Right => {
                self.move_cursor(input.direction())
            }
        };

        Ok(tick)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn black_score(&self) -> u32 {
        self.black_score
    }

    pub fn white_score(&self) -> u32 {
        self.white_score
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Driver tick interval in milliseconds; 0 means never auto-advance.
    pub fn update_speed_ms(&self) -> u64 {
        self.update_speed_ms
    }

    /// Whether `turn` could play at `pos`. Always false on occupied squares.
    pub fn can_capture(&self, turn: Turn, pos: Position) -> Result<bool, OutOfBounds> {
        self.board.get(pos.x, pos.y)?;
        Ok(is_capture(&self.board, turn.color(), pos))
    }

    pub fn any_legal_move(&self, turn: Turn) -> bool {
        self.board
            .cells()
            .any(|(pos, _)| is_capture(&self.board, turn.color(), pos))
    }

    /// Legal squares for the side to move, row-major.
    pub fn legal_moves(&self) -> Vec<Position> {
        if self.is_game_over {
            return Vec::new();
        }
        self.board
            .cells()
            .filter(|&(pos, _)| is_capture(&self.board, self.turn.color(), pos))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Renderer view of one square: cell colour plus cursor decoration.
    pub fn tile(&self, x: usize, y: usize) -> Result<Tile, OutOfBounds> {
        let base = self.board.get(x, y)?;
        let cursor = if Position::new(x, y) != self.cursor {
            CursorOverlay::None
        } else if !self.is_game_over && is_capture(&self.board, self.turn.color(), self.cursor) {
            CursorOverlay::Legal
        } else {
            CursorOverlay::Illegal
        };
        Ok(Tile { base, cursor })
    }

    pub fn to_game_state(&self) -> GameState {
        let cursor_overlay = self
            .tile(self.cursor.x, self.cursor.y)
            .map_or(CursorOverlay::None, |tile| tile.cursor);
        GameState {
            board: self.board.to_vec(),
            width: self.width(),
            height: self.height(),
            cursor: self.cursor,
            cursor_overlay,
            turn: self.turn,
            black_score: self.black_score,
            white_score: self.white_score,
            is_game_over: self.is_game_over,
            legal_moves: self.legal_moves(),
        }
    }

    /// Final standings, available once the game is over.
    pub fn to_game_result(&self) -> Option<GameResult> {
        if !self.is_game_over {
            return None;
        }
        let winner = match self.black_score.cmp(&self.white_score) {
            std::cmp::Ordering::Greater => Some(Turn::Black),
            std::cmp::Ordering::Less => Some(Turn::White),
            std::cmp::Ordering::Equal => None,
        };
        Some(GameResult {
            winner,
            black_score: self.black_score,
            white_score: self.white_score,
            differential: self.differential(),
        })
    }

    fn differential(&self) -> i32 {
        self.black_score as i32 - self.white_score as i32
    }

    fn game_over_error(&self) -> GameOver {
        GameOver {
            differential: self.differential(),
            black_score: self.black_score,
            white_score: self.white_score,
        }
    }

    fn move_cursor(&mut self, dir: Direction) -> Tick {
        let (dx, dy) = dir.delta();
        let next = Position::new(
            clamp_axis(self.cursor.x, dx, self.width()),
            clamp_axis(self.cursor.y, dy, self.height()),
        );
        if next == self.cursor {
            return Tick::CursorBlocked;
        }

        let old = self.cursor;
        self.cursor = next;
        trace!(%old, new = %next, "cursor moved");
        self.notifier.emit(Event::CursorMoved { old, new: next });
        Tick::CursorMoved(next)
    }

    fn try_play(&mut self) -> Tick {
        let pos = self.cursor;
        let mover = self.turn;
        if self.board.at(pos) != CellState::Empty {
            trace!(%pos, "play rejected: occupied");
            return Tick::Rejected(Rejection::Occupied);
        }

        let flipped = self.apply_capture(mover, pos);
        if flipped.is_empty() {
            trace!(%pos, "play rejected: nothing to capture");
            return Tick::Rejected(Rejection::NoCapture);
        }
        debug!(turn = %mover, %pos, flips = flipped.len(), "piece placed");

        let passed = self.advance_turn();
        Tick::Played(Play {
            position: pos,
            flipped,
            turn: self.turn,
            passed,
            game_over: self.is_game_over,
        })
    }

    /// Places `turn`'s piece at `pos` and flips every captured run.
    ///
    /// Does nothing and returns no flips when the square is occupied or the
    /// play captures nothing.
    fn apply_capture(&mut self, turn: Turn, pos: Position) -> Vec<Position> {
        let flipped = flips_at(&self.board, turn.color(), pos);
        if flipped.is_empty() {
            return flipped;
        }

        let old_black = self.black_score;
        let old_white = self.white_score;
        let color = turn.color();

        self.set_cell(pos, color);
        *self.score_mut(turn) += 1;
        for &square in &flipped {
            self.set_cell(square, color);
            *self.score_mut(turn) += 1;
            *self.score_mut(turn.next()) -= 1;
        }

        self.notifier.emit(Event::BlackScoreChanged {
            old: old_black,
            new: self.black_score,
        });
        self.notifier.emit(Event::WhiteScoreChanged {
            old: old_white,
            new: self.white_score,
        });

        flipped
    }

    /// Hands the move to the opponent, passing back if they are stuck.
    /// Returns true when a pass happened.
    fn advance_turn(&mut self) -> bool {
        self.set_turn(self.turn.next());
        if self.any_legal_move(self.turn) {
            return false;
        }

        if !self.any_legal_move(self.turn.next()) {
            self.is_game_over = true;
            debug!(
                black = self.black_score,
                white = self.white_score,
                "game over"
            );
            self.notifier.emit(Event::GameOver {
                old: false,
                new: true,
            });
            return false;
        }

        debug!(turn = %self.turn, "no legal move, passing");
        self.set_turn(self.turn.next());
        true
    }

    fn set_turn(&mut self, turn: Turn) {
        let old = self.turn;
        self.turn = turn;
        self.notifier.emit(Event::TurnChanged { old, new: turn });
    }

    fn set_cell(&mut self, pos: Position, state: CellState) {
        let old = self.board.at(pos);
        self.board.put(pos, state);
        self.notifier.emit(Event::CellChanged {
            pos,
            old,
            new: state,
        });
    }

    fn score_mut(&mut self, turn: Turn) -> &mut u32 {
        match turn {
            Turn::Black => &mut self.black_score,
            Turn::White => &mut self.white_score,
        }
    }

    #[cfg(test)]
    fn with_board_for_test(board: Board, turn: Turn, cursor: Position) -> Self {
        Self::from_parts(board, turn, cursor, 0)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::opening(EngineConfig::default())
    }
}

fn clamp_axis(value: usize, delta: isize, len: usize) -> usize {
    value.saturating_add_signed(delta).min(len - 1)
}
