//! Moore-neighborhood queries.

use crate::state::CellGrid;
use colony_core::{CellKind, Direction, Position};

/// Male/female counts and empty positions around a cell.
///
/// Continent neighbors and positions off the board contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborSummary {
    pub males: u8,
    pub females: u8,
    pub empty: Vec<Position>,
}

impl NeighborSummary {
    pub fn live(&self) -> u8 {
        self.males + self.females
    }

    /// At least one male and one female nearby.
    pub fn is_mixed(&self) -> bool {
        self.males > 0 && self.females > 0
    }
}

/// Positions of the in-bounds Moore neighbors of `pos`.
pub fn neighbor_positions(grid: &CellGrid, pos: Position) -> impl Iterator<Item = Position> {
    let (height, width) = (grid.height(), grid.width());
    Direction::ALL.into_iter().filter_map(move |direction| {
        let (d_row, d_col) = direction.to_delta();
        pos.offset(d_row, d_col, height, width)
    })
}

/// Summarize the eight neighbors of `pos`, skipping positions off the board.
pub fn count_neighbors(grid: &CellGrid, pos: Position) -> NeighborSummary {
    let mut summary = NeighborSummary::default();

    for neighbor in neighbor_positions(grid, pos) {
        match grid.get(neighbor) {
            Some(CellKind::Male) => summary.males += 1,
            Some(CellKind::Female) => summary.females += 1,
            Some(CellKind::Empty) => summary.empty.push(neighbor),
            Some(CellKind::Continent) | None => {}
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn test_counts_interior_cell() {
        let grid = Grid::from_rows(&["MF#", ".M.", "F.."]).unwrap();
        let summary = count_neighbors(&grid, Position::new(1, 1));

        assert_eq!(summary.males, 1);
        assert_eq!(summary.females, 2);
        assert_eq!(summary.live(), 3);
        assert_eq!(
            summary.empty,
            vec![
                Position::new(1, 0),
                Position::new(1, 2),
                Position::new(2, 1),
                Position::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_corner_does_not_wrap() {
        let grid = Grid::from_rows(&["..M", "...", "F.."]).unwrap();
        let summary = count_neighbors(&grid, Position::new(0, 0));

        assert_eq!(summary.males, 0);
        assert_eq!(summary.females, 0);
        assert_eq!(summary.empty.len(), 3);
    }

    #[test]
    fn test_continent_ignored() {
        let grid = Grid::from_rows(&["###", "#.#", "###"]).unwrap();
        let summary = count_neighbors(&grid, Position::new(1, 1));
        assert_eq!(summary, NeighborSummary::default());
    }

    #[test]
    fn test_single_row_board() {
        let grid = Grid::from_rows(&["MMF"]).unwrap();
        let summary = count_neighbors(&grid, Position::new(0, 1));
        assert_eq!(summary.males, 1);
        assert_eq!(summary.females, 1);
        assert!(summary.is_mixed());
        assert!(summary.empty.is_empty());

        assert_eq!(neighbor_positions(&grid, Position::new(0, 0)).count(), 1);
    }
}
