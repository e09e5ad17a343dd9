//! Migration policy for males.
//!
//! Males drift towards empty cells that border a female. Failing that, a male
//! crowded by other males drifts to an empty cell with no other male nearby.
//! Continent is never a destination.

use crate::neighbors::{count_neighbors, NeighborSummary};
use crate::state::CellGrid;
use colony_core::{CellKind, Position};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationReason {
    TowardFemale,
    AwayFromMales,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub destination: Position,
    pub reason: MigrationReason,
}

/// Pick where the male at `origin` moves this generation, if anywhere.
///
/// Neighbor counts are read from the frozen `current` board. A candidate must
/// also still be empty in `next`, so a cell already claimed this generation
/// by another migrant or a birth is skipped. Candidates are tried in a random
/// order and the first that qualifies wins.
pub fn choose_destination<R: Rng + ?Sized>(
    current: &CellGrid,
    next: &CellGrid,
    origin: Position,
    summary: &NeighborSummary,
    rng: &mut R,
) -> Option<Migration> {
    if summary.empty.is_empty() {
        return None;
    }

    let is_open = |pos: Position| {
        current.get(pos) == Some(CellKind::Empty) && next.get(pos) == Some(CellKind::Empty)
    };

    if summary.females > 0 {
        let mut candidates = summary.empty.clone();
        candidates.shuffle(rng);
        let found = candidates
            .into_iter()
            .find(|&pos| is_open(pos) && count_neighbors(current, pos).females > 0);
        if let Some(destination) = found {
            return Some(Migration {
                destination,
                reason: MigrationReason::TowardFemale,
            });
        }
    }

    if summary.males > 0 {
        let mut candidates = summary.empty.clone();
        candidates.shuffle(rng);
        // Every candidate borders the migrant itself; only other males count.
        let found = candidates.into_iter().find(|&pos| {
            is_open(pos) && other_males_near(current, pos, origin) == 0
        });
        if let Some(destination) = found {
            return Some(Migration {
                destination,
                reason: MigrationReason::AwayFromMales,
            });
        }
    }

    None
}

fn other_males_near(current: &CellGrid, pos: Position, origin: Position) -> u8 {
    let males = count_neighbors(current, pos).males;
    if pos.chebyshev_distance(&origin) == 1 && current.get(origin) == Some(CellKind::Male) {
        males.saturating_sub(1)
    } else {
        males
    }
}
