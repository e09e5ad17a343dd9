//! Population and per-generation statistics.

use serde::{Deserialize, Serialize};

/// Live organism counts for a board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub males: usize,
    pub females: usize,
}

impl Census {
    pub fn new(males: usize, females: usize) -> Self {
        Self { males, females }
    }

    pub fn total(&self) -> usize {
        self.males + self.females
    }

    pub fn is_extinct(&self) -> bool {
        self.total() == 0
    }
}

/// What happened during a single generation step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Generation index the step was evaluated at
    pub generation: u64,
    /// Empty cells that became alive
    pub births: u32,
    /// Cells that reached the end of their lifespan
    pub age_deaths: u32,
    /// Males killed by a sustained fight
    pub fight_deaths: u32,
    /// Males that relocated
    pub migrations: u32,
    /// Population of the resulting board
    pub census: Census,
}

impl StepReport {
    pub fn deaths(&self) -> u32 {
        self.age_deaths + self.fight_deaths
    }
}

/// Totals over a headless run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub generations: u64,
    pub extinct: bool,
    pub final_census: Census,
    pub total_births: u64,
    pub total_age_deaths: u64,
    pub total_fight_deaths: u64,
    pub total_migrations: u64,
}

impl RunSummary {
    /// Fold one step into the running totals.
    pub fn record(&mut self, report: &StepReport) {
        self.generations += 1;
        self.total_births += u64::from(report.births);
        self.total_age_deaths += u64::from(report.age_deaths);
        self.total_fight_deaths += u64::from(report.fight_deaths);
        self.total_migrations += u64::from(report.migrations);
        self.final_census = report.census;
        self.extinct = report.census.is_extinct();
    }
}
