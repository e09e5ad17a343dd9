//! The generation step.
//!
//! Every rule reads the frozen current state and writes into a separate next
//! state. The next buffer starts as a copy of the current one; the only reads
//! it serves are occupancy checks so that two organisms never land on the same
//! cell within one generation.

use crate::fight::{resolve_fight, FightOutcome};
use crate::lifecycle::{can_reproduce, in_reproduction_stasis, spawn};
use crate::migration::choose_destination;
use crate::neighbors::count_neighbors;
use crate::state::WorldState;
use colony_core::{CellKind, Lifespan, Position, StepReport, WorldConfig};
use rand::Rng;
use tracing::trace;

/// Advance `current` by one generation into `next`.
///
/// `next` must have the same dimensions as `current`; its previous contents
/// are discarded. Cells are visited in row-major order from the top-left.
pub fn step_into<R: Rng + ?Sized>(
    current: &WorldState,
    next: &mut WorldState,
    generation: u64,
    config: &WorldConfig,
    rng: &mut R,
) -> StepReport {
    next.cells.copy_from(&current.cells);
    next.lifespans.copy_from(&current.lifespans);
    next.fight_counters.copy_from(&current.fight_counters);

    let mut report = StepReport {
        generation,
        ..Default::default()
    };

    for (pos, kind) in current.cells.iter() {
        match kind {
            CellKind::Continent => {}
            CellKind::Male => step_male(current, next, pos, generation, config, rng, &mut report),
            CellKind::Female => {
                let lifespan = current.lifespans.get(pos).unwrap_or_default();
                if lifespan.is_expired(generation) {
                    trace!(%pos, generation, "Female died of age");
                    clear(next, pos);
                    report.age_deaths += 1;
                }
            }
            CellKind::Empty => {
                // A migrant may already have claimed this cell.
                if next.cells.get(pos) != Some(CellKind::Empty) {
                    continue;
                }
                let summary = count_neighbors(&current.cells, pos);
                if can_reproduce(&summary, config) {
                    let birth = spawn(generation, config, rng);
                    trace!(%pos, generation, kind = ?birth.kind, duration = birth.lifespan.duration, "Cell born");
                    next.cells.set(pos, birth.kind);
                    next.lifespans.set(pos, birth.lifespan);
                    next.fight_counters.set(pos, 0);
                    report.births += 1;
                }
            }
        }
    }

    report.census = next.census();
    report
}

/// Allocating form of [`step_into`]: returns a fresh next state.
pub fn step<R: Rng + ?Sized>(
    current: &WorldState,
    generation: u64,
    config: &WorldConfig,
    rng: &mut R,
) -> (WorldState, StepReport) {
    let mut next = current.clone();
    let report = step_into(current, &mut next, generation, config, rng);
    (next, report)
}

fn step_male<R: Rng + ?Sized>(
    current: &WorldState,
    next: &mut WorldState,
    pos: Position,
    generation: u64,
    config: &WorldConfig,
    rng: &mut R,
    report: &mut StepReport,
) {
    let summary = count_neighbors(&current.cells, pos);
    let counter = current.fight_counters.get(pos).unwrap_or(0);

    let outcome = resolve_fight(&summary, counter, config.fight_threshold);
    if outcome == FightOutcome::Killed {
        trace!(%pos, generation, "Male killed in a fight");
        clear(next, pos);
        report.fight_deaths += 1;
        return;
    }
    next.fight_counters.set(pos, outcome.counter());

    if in_reproduction_stasis(&summary) {
        return;
    }

    let mut at = pos;
    if let Some(migration) = choose_destination(&current.cells, &next.cells, pos, &summary, rng) {
        trace!(from = %pos, to = %migration.destination, reason = ?migration.reason, "Male migrated");
        relocate(next, pos, migration.destination);
        at = migration.destination;
        report.migrations += 1;
    }

    let lifespan = next.lifespans.get(at).unwrap_or_default();
    if lifespan.is_expired(generation) {
        trace!(pos = %at, generation, "Male died of age");
        clear(next, at);
        report.age_deaths += 1;
    }
}

/// Move an organism and its bookkeeping within the next buffer.
fn relocate(next: &mut WorldState, from: Position, to: Position) {
    let kind = next.cells.get(from).unwrap_or_default();
    let lifespan = next.lifespans.get(from).unwrap_or_default();
    let counter = next.fight_counters.get(from).unwrap_or(0);

    next.cells.set(to, kind);
    next.lifespans.set(to, lifespan);
    next.fight_counters.set(to, counter);
    clear(next, from);
}

fn clear(next: &mut WorldState, pos: Position) {
    next.cells.set(pos, CellKind::Empty);
    next.lifespans.set(pos, Lifespan::default());
    next.fight_counters.set(pos, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const LONG_LIFE: Lifespan = Lifespan {
        birth_generation: 0,
        duration: 1000,
    };

    fn state(rows: &[&str], lifespan: Lifespan) -> WorldState {
        WorldState::with_uniform_lifespan(Grid::from_rows(rows).unwrap(), lifespan)
    }

    #[test]
    fn test_center_breeds_between_male_and_female() {
        let config = WorldConfig::default();
        for seed in 0..10 {
            let current = state(&[".M.", "...", ".F."], LONG_LIFE);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let (next, report) = step(&current, 0, &config, &mut rng);

            let center = Position::new(1, 1);
            let kind = next.kind(center);
            assert!(kind.is_alive(), "seed {seed}: center is {kind:?}");
            let lifespan = next.lifespans.get(center).unwrap();
            assert_eq!(lifespan.birth_generation, 0);
            assert!((25..=35).contains(&lifespan.duration));
            assert!(report.births >= 1);
        }
    }

    #[test]
    fn test_all_continent_is_fixed_point() {
        let config = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut current = state(&["###", "###", "###"], Lifespan::default());
        let original = current.clone();

        for generation in 0..5 {
            let (next, report) = step(&current, generation, &config, &mut rng);
            assert_eq!(next, original);
            assert_eq!(report.births + report.deaths() + report.migrations, 0);
            current = next;
        }
        assert!(current.is_extinct());
    }

    #[test]
    fn test_dead_board_unchanged() {
        let config = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let current = state(&["#...", "..#.", "...."], Lifespan::default());
        let (next, _) = step(&current, 3, &config, &mut rng);
        assert_eq!(next, current);
    }

    #[test]
    fn test_female_dies_of_age() {
        let config = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let current = state(&["...", ".F.", "..."], Lifespan::new(4, 25));

        let (next, _) = step(&current, 28, &config, &mut rng);
        assert_eq!(next.kind(Position::new(1, 1)), CellKind::Female);

        let (next, report) = step(&current, 29, &config, &mut rng);
        assert_eq!(next.kind(Position::new(1, 1)), CellKind::Empty);
        assert_eq!(next.lifespans.get(Position::new(1, 1)), Some(Lifespan::default()));
        assert_eq!(report.age_deaths, 1);
    }

    #[test]
    fn test_lone_male_wanders_or_stays_but_never_onto_continent() {
        let config = WorldConfig::default();
        for seed in 0..20 {
            let current = state(&["#.#", ".M.", "#.#"], LONG_LIFE);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let (next, _) = step(&current, 0, &config, &mut rng);

            assert_eq!(next.cells.count(CellKind::Male), 1);
            for (pos, kind) in current.cells.iter() {
                if kind == CellKind::Continent {
                    assert_eq!(next.kind(pos), CellKind::Continent);
                }
            }
        }
    }

    #[test]
    fn test_male_dies_after_ten_contested_generations() {
        let config = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        // A 1x3 board leaves no empty cell to move to or breed in.
        let mut current = state(&["MMF"], LONG_LIFE);

        for generation in 0..9 {
            let (next, report) = step(&current, generation, &config, &mut rng);
            assert_eq!(next.cells.to_rows(), ["MMF"]);
            assert_eq!(
                next.fight_counters.get(Position::new(0, 1)),
                Some(generation as u32 + 1)
            );
            assert_eq!(next.fight_counters.get(Position::new(0, 0)), Some(0));
            assert_eq!(report.fight_deaths, 0);
            current = next;
        }

        let (next, report) = step(&current, 9, &config, &mut rng);
        assert_eq!(next.cells.to_rows(), ["M.F"]);
        assert_eq!(next.fight_counters.get(Position::new(0, 1)), Some(0));
        assert_eq!(report.fight_deaths, 1);
    }

    #[test]
    fn test_killed_male_is_not_migrated() {
        let config = WorldConfig::default();
        let contested = Position::new(0, 1);

        // Calm, the contested male walks to (1, 1), the one cell by the female.
        let current = state(&["MMF", "#.#"], LONG_LIFE);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let (next, report) = step(&current, 0, &config, &mut rng);
        assert_eq!(report.migrations, 1);
        assert_eq!(next.kind(Position::new(1, 1)), CellKind::Male);

        // One generation short of the threshold, the same male dies in place.
        let mut current = state(&["MMF", "#.#"], LONG_LIFE);
        current.fight_counters.set(contested, 9);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let (next, report) = step(&current, 0, &config, &mut rng);
        assert_eq!(report.fight_deaths, 1);
        assert_eq!(report.migrations, 0);
        assert_eq!(next.kind(contested), CellKind::Empty);
        assert_eq!(next.fight_counters.get(contested), Some(0));
    }

    #[test]
    fn test_stasis_male_still_dies_fighting() {
        let config = WorldConfig::default();
        let center = Position::new(1, 1);
        let mut current = state(&["M.M", ".M.", "#F#"], LONG_LIFE);
        current.fight_counters.set(center, 9);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let (next, report) = step(&current, 0, &config, &mut rng);
        assert_eq!(report.fight_deaths, 1);
        assert_eq!(next.kind(center), CellKind::Empty);
        assert_eq!(next.fight_counters.get(center), Some(0));
    }

    #[test]
    fn test_stasis_male_skips_aging() {
        let config = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        // Center male has two male neighbors and one female neighbor.
        let cells = Grid::from_rows(&["M.M", ".M.", "#F#"]).unwrap();
        let mut lifespans = Grid::new(3, 3);
        for pos in [Position::new(0, 0), Position::new(0, 2), Position::new(1, 1)] {
            lifespans.set(pos, Lifespan::new(0, 5));
        }
        lifespans.set(Position::new(2, 1), LONG_LIFE);
        let current = WorldState::from_parts(cells, lifespans, Grid::new(3, 3)).unwrap();

        let (next, _) = step(&current, 5, &config, &mut rng);
        // Expired, but held in place by stasis.
        assert_eq!(next.kind(Position::new(1, 1)), CellKind::Male);
        assert_eq!(next.fight_counters.get(Position::new(1, 1)), Some(1));
        // The outer males have no female nearby, so they age out.
        assert_eq!(next.kind(Position::new(0, 0)), CellKind::Empty);
        assert_eq!(next.kind(Position::new(0, 2)), CellKind::Empty);
        assert_eq!(next.kind(Position::new(2, 1)), CellKind::Female);
    }

    #[test]
    fn test_migrant_carries_bookkeeping() {
        let config = WorldConfig::default();
        let lifespan = Lifespan::new(3, 30);
        let current = state(&["##F", "#M.", "###"], lifespan);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let (next, report) = step(&current, 4, &config, &mut rng);

        // (1, 2) is the only empty cell and it borders the female.
        assert_eq!(report.migrations, 1);
        assert_eq!(next.kind(Position::new(1, 1)), CellKind::Empty);
        assert_eq!(next.kind(Position::new(1, 2)), CellKind::Male);
        assert_eq!(next.lifespans.get(Position::new(1, 2)), Some(lifespan));
        assert_eq!(next.lifespans.get(Position::new(1, 1)), Some(Lifespan::default()));
    }

    #[test]
    fn test_step_into_reuses_buffer() {
        let config = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let current = state(&["...", "...", "..."], LONG_LIFE);
        let mut next = state(&["MMM", "FFF", "###"], LONG_LIFE);

        let report = step_into(&current, &mut next, 0, &config, &mut rng);
        assert_eq!(next, current);
        assert!(report.census.is_extinct());
    }
}
