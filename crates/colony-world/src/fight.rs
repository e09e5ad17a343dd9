//! Fight policy for contested males.
//!
//! A male with at least one male and one female neighbor is contested. Each
//! consecutive contested generation increments its fight counter; when the
//! counter reaches the threshold the male dies. Any uncontested generation
//! resets the counter.

use crate::neighbors::NeighborSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightOutcome {
    /// Not contested this generation; counter is back to zero.
    Calm,
    /// Still contested; carries the new counter value.
    Contested(u32),
    /// Counter reached the threshold; the male dies and its counter resets.
    Killed,
}

impl FightOutcome {
    /// Counter value to store for the cell in the next generation.
    pub fn counter(&self) -> u32 {
        match self {
            FightOutcome::Contested(counter) => *counter,
            FightOutcome::Calm | FightOutcome::Killed => 0,
        }
    }
}

/// Advance a male's fight counter against the neighbor counts of the
/// frozen current board.
pub fn resolve_fight(summary: &NeighborSummary, counter: u32, threshold: u32) -> FightOutcome {
    if !summary.is_mixed() {
        return FightOutcome::Calm;
    }

    let counter = counter.saturating_add(1);
    if counter >= threshold {
        FightOutcome::Killed
    } else {
        FightOutcome::Contested(counter)
    }
}
