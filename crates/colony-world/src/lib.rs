//! World simulation engine.
//!
//! This module implements the bounded 2D board where sexed organisms breed,
//! migrate, fight and age out, one generation at a time.

pub mod grid;
pub mod state;
pub mod neighbors;
pub mod fight;
pub mod migration;
pub mod lifecycle;
pub mod step;
pub mod simulation;

pub use grid::Grid;
pub use state::{CellGrid, FightCounterMap, LifespanMap, WorldState};
pub use neighbors::{count_neighbors, NeighborSummary};
pub use step::{step, step_into};
pub use simulation::Simulation;
