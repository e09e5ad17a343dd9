//! Simulation driver owning the seeded RNG and double buffers.

use crate::state::WorldState;
use crate::step::step_into;
use colony_core::{Census, Error, Result, RunSummary, StepReport, WorldConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument};

pub struct Simulation {
    config: WorldConfig,
    seed: u64,
    rng: ChaCha8Rng,
    current: WorldState,
    next: WorldState,
    generation: u64,
}

impl Simulation {
    /// Validate `config` and build a randomized board from `seed`.
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let current = WorldState::initialize(&config, &mut rng)?;
        let next = current.clone();

        Ok(Self {
            config,
            seed,
            rng,
            current,
            next,
            generation: 0,
        })
    }

    /// Start from a prepared board instead of a random one.
    pub fn from_state(config: WorldConfig, state: WorldState, seed: u64) -> Result<Self> {
        config.validate()?;
        if state.width() != config.width || state.height() != config.height {
            return Err(Error::InvalidState(format!(
                "board is {}x{} but config expects {}x{}",
                state.width(),
                state.height(),
                config.width,
                config.height
            )));
        }

        Ok(Self {
            config,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next: state.clone(),
            current: state,
            generation: 0,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generations completed since the last (re)initialization.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &WorldState {
        &self.current
    }

    pub fn census(&self) -> Census {
        self.current.census()
    }

    pub fn is_extinct(&self) -> bool {
        self.current.is_extinct()
    }

    /// Run one generation and swap buffers.
    pub fn advance(&mut self) -> StepReport {
        let report = step_into(
            &self.current,
            &mut self.next,
            self.generation,
            &self.config,
            &mut self.rng,
        );
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;

        debug!(
            generation = report.generation,
            births = report.births,
            age_deaths = report.age_deaths,
            fight_deaths = report.fight_deaths,
            migrations = report.migrations,
            males = report.census.males,
            females = report.census.females,
            "Generation complete"
        );

        report
    }

    /// Throw the board away and draw a fresh one from the same RNG stream.
    pub fn restart(&mut self) -> Result<()> {
        self.current = WorldState::initialize(&self.config, &mut self.rng)?;
        self.next = self.current.clone();
        self.generation = 0;
        info!(seed = self.seed, "Simulation restarted");
        Ok(())
    }

    /// Run headless until extinction or `max_generations` steps.
    #[instrument(skip(self), fields(seed = self.seed))]
    pub fn run(&mut self, max_generations: u64) -> RunSummary {
        info!("Starting simulation for up to {} generations", max_generations);

        let mut summary = RunSummary {
            final_census: self.census(),
            extinct: self.is_extinct(),
            ..Default::default()
        };

        while !summary.extinct && summary.generations < max_generations {
            let report = self.advance();
            summary.record(&report);
        }

        info!(
            event = "run_summary",
            generations = summary.generations,
            extinct = summary.extinct,
            males = summary.final_census.males,
            females = summary.final_census.females,
            total_births = summary.total_births,
            total_age_deaths = summary.total_age_deaths,
            total_fight_deaths = summary.total_fight_deaths,
            total_migrations = summary.total_migrations,
            "Simulation finished"
        );

        summary
    }
}
