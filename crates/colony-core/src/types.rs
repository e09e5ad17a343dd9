//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What occupies a single grid position.
///
/// Kinds are exclusive: a cell holds at most one organism, and `Continent`
/// is terrain that never changes after initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Empty,
    Male,
    Female,
    Continent,
}

impl CellKind {
    /// Male or Female.
    pub fn is_alive(&self) -> bool {
        matches!(self, CellKind::Male | CellKind::Female)
    }

    pub fn is_continent(&self) -> bool {
        *self == CellKind::Continent
    }

    /// Single-character form used by test fixtures and debug dumps.
    pub fn symbol(&self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Male => 'M',
            CellKind::Female => 'F',
            CellKind::Continent => '#',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(CellKind::Empty),
            'M' => Some(CellKind::Male),
            'F' => Some(CellKind::Female),
            '#' => Some(CellKind::Continent),
            _ => None,
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Grid coordinate, `row` in `[0, height)` and `col` in `[0, width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shift by a signed delta, returning `None` when the result leaves a
    /// `height` x `width` board. Edges clip; there is no wrapping.
    pub fn offset(&self, d_row: isize, d_col: isize, height: usize, width: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row < height && col < width).then_some(Self { row, col })
    }

    /// Chebyshev distance; 1 for every Moore neighbor.
    pub fn chebyshev_distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the eight Moore-neighborhood directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    /// Every direction, in row-major order around the center cell.
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::West,
        Direction::East,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// `(d_row, d_col)` for this direction; north is towards row 0.
    pub const fn to_delta(self) -> (isize, isize) {
        match self {
            Direction::NorthWest => (-1, -1),
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::SouthWest => (1, -1),
            Direction::South => (1, 0),
            Direction::SouthEast => (1, 1),
        }
    }
}

/// Age bookkeeping for a live cell.
///
/// Birth generation and assigned duration are kept apart; a cell dies once
/// `generation - birth_generation >= duration`. Empty and Continent cells
/// carry the zero record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifespan {
    pub birth_generation: u64,
    pub duration: u32,
}

impl Lifespan {
    pub fn new(birth_generation: u64, duration: u32) -> Self {
        Self {
            birth_generation,
            duration,
        }
    }

    pub fn age_at(&self, generation: u64) -> u64 {
        generation.saturating_sub(self.birth_generation)
    }

    pub fn is_expired(&self, generation: u64) -> bool {
        self.age_at(generation) >= u64::from(self.duration)
    }
}
