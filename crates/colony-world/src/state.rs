//! The per-generation world state: board, lifespan map and fight counters.

use crate::grid::Grid;
use colony_core::{CellKind, Census, Error, Lifespan, Position, Result, WorldConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub type CellGrid = Grid<CellKind>;
pub type LifespanMap = Grid<Lifespan>;
pub type FightCounterMap = Grid<u32>;

/// Board, lifespan map and fight-counter map for one generation.
///
/// The three layers always share dimensions and are addressed by the same
/// coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    pub cells: CellGrid,
    pub lifespans: LifespanMap,
    pub fight_counters: FightCounterMap,
}

impl WorldState {
    /// An all-empty world.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            cells: Grid::new(width, height),
            lifespans: Grid::new(width, height),
            fight_counters: Grid::new(width, height),
        }
    }

    pub fn from_parts(
        cells: CellGrid,
        lifespans: LifespanMap,
        fight_counters: FightCounterMap,
    ) -> Result<Self> {
        if !cells.same_shape(&lifespans) || !cells.same_shape(&fight_counters) {
            return Err(Error::InvalidState(format!(
                "layer dimensions disagree: cells {}x{}, lifespans {}x{}, fight counters {}x{}",
                cells.width(),
                cells.height(),
                lifespans.width(),
                lifespans.height(),
                fight_counters.width(),
                fight_counters.height()
            )));
        }

        Ok(Self {
            cells,
            lifespans,
            fight_counters,
        })
    }

    /// Wrap a board, giving every live cell the same lifespan record.
    pub fn with_uniform_lifespan(cells: CellGrid, lifespan: Lifespan) -> Self {
        let mut lifespans = Grid::new(cells.width(), cells.height());
        for (pos, kind) in cells.iter() {
            if kind.is_alive() {
                lifespans.set(pos, lifespan);
            }
        }
        let fight_counters = Grid::new(cells.width(), cells.height());

        Self {
            cells,
            lifespans,
            fight_counters,
        }
    }

    /// Randomized initial board.
    ///
    /// Each cell independently becomes Continent, Male or Female with the
    /// configured densities and Empty otherwise. Live cells are born at
    /// generation 0 with a lifespan drawn from the configured range.
    pub fn initialize<R: Rng + ?Sized>(config: &WorldConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let mut state = Self::empty(config.width, config.height);
        let male_cutoff = config.obstacle_density + config.male_density;
        let female_cutoff = male_cutoff + config.female_density;

        for row in 0..config.height {
            for col in 0..config.width {
                let pos = Position::new(row, col);
                let roll = rng.gen::<f64>();

                let kind = if roll < config.obstacle_density {
                    CellKind::Continent
                } else if roll < male_cutoff {
                    CellKind::Male
                } else if roll < female_cutoff {
                    CellKind::Female
                } else {
                    CellKind::Empty
                };

                state.cells.set(pos, kind);
                if kind.is_alive() {
                    let duration = rng.gen_range(config.min_lifespan..=config.max_lifespan);
                    state.lifespans.set(pos, Lifespan::new(0, duration));
                }
            }
        }

        let census = state.census();
        debug!(
            width = config.width,
            height = config.height,
            males = census.males,
            females = census.females,
            continents = state.cells.count(CellKind::Continent),
            "Initialized world"
        );

        Ok(state)
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn kind(&self, pos: Position) -> CellKind {
        self.cells.get(pos).unwrap_or_default()
    }

    /// Male and female counts across the board.
    pub fn census(&self) -> Census {
        self.cells
            .values()
            .fold(Census::default(), |mut census, kind| {
                match kind {
                    CellKind::Male => census.males += 1,
                    CellKind::Female => census.females += 1,
                    CellKind::Empty | CellKind::Continent => {}
                }
                census
            })
    }

    /// True when no Male or Female remains. Continent is terrain, so an
    /// all-Continent board counts as extinct.
    pub fn is_extinct(&self) -> bool {
        !self.cells.values().any(CellKind::is_alive)
    }
}
