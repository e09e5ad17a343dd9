//! 2D grid buffers for the world.

use colony_core::{CellKind, Error, Position, Result};
use serde::{Deserialize, Serialize};

/// A fixed-size, row-major 2D grid with clipped (non-wrapping) edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }

    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Get the value at a position; `None` outside the grid.
    pub fn get(&self, pos: Position) -> Option<T> {
        self.contains(pos).then(|| self.cells[self.pos_to_index(pos)])
    }

    /// Set the value at a position. Positions outside the grid are ignored.
    pub fn set(&mut self, pos: Position, value: T) {
        if self.contains(pos) {
            let index = self.pos_to_index(pos);
            self.cells[index] = value;
        }
    }

    /// Overwrite every cell with the contents of `other`.
    ///
    /// Both grids must share dimensions; used to reset a back buffer
    /// without reallocating.
    pub fn copy_from(&mut self, other: &Grid<T>) {
        debug_assert!(self.same_shape(other));
        self.cells.copy_from_slice(&other.cells);
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        pos.row * self.width + pos.col
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        Position::new(index / self.width, index % self.width)
    }

    /// Iterator over all values with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, value)| (self.index_to_pos(i), *value))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.cells.iter()
    }
}

impl Grid<CellKind> {
    /// Build a board from text rows using the `CellKind` symbols
    /// (`.` empty, `M` male, `F` female, `#` continent).
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(Error::Config("board must have at least one cell".to_string()));
        }

        let mut grid = Self::new(width, height);
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != width {
                return Err(Error::Config(format!(
                    "row {row} has {} cells, expected {width}",
                    line.chars().count()
                )));
            }
            for (col, symbol) in line.chars().enumerate() {
                let kind = CellKind::from_symbol(symbol).ok_or_else(|| {
                    Error::Config(format!("unknown cell symbol {symbol:?} at ({row}, {col})"))
                })?;
                grid.set(Position::new(row, col), kind);
            }
        }

        Ok(grid)
    }

    /// Inverse of [`Grid::from_rows`].
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(CellKind::symbol).collect())
            .collect()
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|cell| **cell == kind).count()
    }
}
