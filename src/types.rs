use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A board coordinate. `x` grows to the right, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Steps one unit along `dir`, returning `None` when the step would leave
    /// the `width` x `height` grid.
    pub fn step(self, dir: Direction, width: usize, height: usize) -> Option<Self> {
        let (dx, dy) = dir.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < width && y < height).then_some(Self { x, y })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Contents of a single board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Black,
    White,
    #[default]
    Empty,
}

impl CellState {
    /// Swaps Black and White; Empty stays Empty.
    pub fn opposite(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
            Self::Empty => Self::Empty,
        }
    }

    /// Wire encoding used by board snapshots: 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Black => 1,
            Self::White => 2,
        }
    }
}

/// The side whose move is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    Black,
    White,
}

impl Turn {
    pub fn next(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// The piece colour this side places.
    pub fn color(self) -> CellState {
        match self {
            Self::Black => CellState::Black,
            Self::White => CellState::White,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => f.write_str("Black"),
            Self::White => f.write_str("White"),
        }
    }
}

/// Compass rays used for flip scans and cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    North,
    NorthEast,
    None,
}

impl Direction {
    /// The eight scan directions, without the `None` sentinel.
    pub const RAYS: [Direction; 8] = [
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
    ];

    /// Unit `(dx, dy)` vector.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::None => (0, 0),
        }
    }
}

/// One discrete input symbol fed to the engine per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Up,
    Down,
    Left,
    Right,
    Commit,
    Other,
}

static KEY_BINDINGS: Lazy<HashMap<&'static str, Input>> = Lazy::new(|| {
    HashMap::from([
        ("ArrowUp", Input::Up),
        ("ArrowDown", Input::Down),
        ("ArrowLeft", Input::Left),
        ("ArrowRight", Input::Right),
        ("w", Input::Up),
        ("s", Input::Down),
        ("a", Input::Left),
        ("d", Input::Right),
        (" ", Input::Commit),
        ("Space", Input::Commit),
        ("Enter", Input::Commit),
    ])
});

impl Input {
    /// Maps a DOM `KeyboardEvent.key` name to an input. Unknown keys become
    /// [`Input::Other`].
    pub fn from_key(key: &str) -> Self {
        KEY_BINDINGS.get(key).copied().unwrap_or(Self::Other)
    }

    /// Cursor direction for movement inputs, `Direction::None` otherwise.
    pub fn direction(self) -> Direction {
        match self {
            Self::Up => Direction::North,
            Self::Down => Direction::South,
            Self::Left => Direction::West,
            Self::Right => Direction::East,
            Self::Commit | Self::Other => Direction::None,
        }
    }
}

/// Presentation-only marker drawn over the cursor square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorOverlay {
    #[default]
    None,
    /// The side to move could play here.
    Legal,
    /// Cursor is over an occupied or non-capturing square.
    Illegal,
}

/// What a renderer draws for one square: the real cell plus the cursor
/// decoration. Never fed back into game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tile {
    pub base: CellState,
    pub cursor: CursorOverlay,
}

/// Public game state snapshot handed to renderers and the WASM boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major cell codes, see [`CellState::code`].
    pub board: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub cursor: Position,
    pub cursor_overlay: CursorOverlay,
    pub turn: Turn,
    pub black_score: u32,
    pub white_score: u32,
    pub is_game_over: bool,
    pub legal_moves: Vec<Position>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// `None` on a draw.
    pub winner: Option<Turn>,
    pub black_score: u32,
    pub white_score: u32,
    pub differential: i32,
}
