//! Reproduction and lifespan policy.

use crate::neighbors::NeighborSummary;
use colony_core::{CellKind, Lifespan, WorldConfig};
use rand::Rng;

/// A newborn organism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Birth {
    pub kind: CellKind,
    pub lifespan: Lifespan,
}

/// An empty cell breeds when its live neighbor count sits inside the breeding
/// window and both sexes are present.
pub fn can_reproduce(summary: &NeighborSummary, config: &WorldConfig) -> bool {
    let live = summary.live();
    summary.is_mixed()
        && live >= config.min_breeding_neighbors
        && live <= config.max_breeding_neighbors
}

/// Roll the sex and lifespan of a cell born at `generation`.
pub fn spawn<R: Rng + ?Sized>(generation: u64, config: &WorldConfig, rng: &mut R) -> Birth {
    let kind = if rng.gen_bool(0.5) {
        CellKind::Male
    } else {
        CellKind::Female
    };
    let duration = rng.gen_range(config.min_lifespan..=config.max_lifespan);

    Birth {
        kind,
        lifespan: Lifespan::new(generation, duration),
    }
}

/// A male with two or more male neighbors and a female neighbor holds still
/// for one generation: it neither migrates nor ages out, so it can count as a
/// parent for a neighboring empty cell.
pub fn in_reproduction_stasis(summary: &NeighborSummary) -> bool {
    summary.males >= 2 && summary.females >= 1
}
