use crate::error::OutOfBounds;
use crate::types::{CellState, Position};

/// Fixed-size grid of cell states, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Board {
    /// Creates an all-empty `width` x `height` board.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellState::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<CellState, OutOfBounds> {
        let idx = self.index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Overwrites a cell unconditionally; legality is the engine's business.
    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<(), OutOfBounds> {
        let idx = self.index(x, y)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Number of cells holding `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Iterates `(position, state)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &cell)| (Position::new(idx % width, idx / width), cell))
    }

    /// Converts the board to row-major codes where 0=empty, 1=black, 2=white.
    pub fn to_vec(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.code()).collect()
    }

    /// Read access for positions the caller already knows are on the board.
    pub(crate) fn at(&self, pos: Position) -> CellState {
        self.cells[pos.y * self.width + pos.x]
    }

    pub(crate) fn put(&mut self, pos: Position, state: CellState) {
        self.cells[pos.y * self.width + pos.x] = state;
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, OutOfBounds> {
        if !self.contains(x, y) {
            return Err(OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }
}
