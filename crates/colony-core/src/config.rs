//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Largest board, in cells, that a world may allocate.
pub const MAX_CELLS: usize = 1 << 24;

/// Largest rasterized frame, in pixels.
pub const MAX_FRAME_PIXELS: usize = 1 << 26;

/// World configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the world grid (columns)
    pub width: usize,
    /// Height of the world grid (rows)
    pub height: usize,
    /// Continent density (0.0 to 1.0)
    pub obstacle_density: f64,
    /// Initial male density (0.0 to 1.0)
    pub male_density: f64,
    /// Initial female density (0.0 to 1.0)
    pub female_density: f64,
    /// Shortest lifespan handed out at birth, in generations
    pub min_lifespan: u32,
    /// Longest lifespan handed out at birth, inclusive
    pub max_lifespan: u32,
    /// Contested generations after which a male dies
    pub fight_threshold: u32,
    /// Fewest live neighbors an empty cell needs to breed
    pub min_breeding_neighbors: u8,
    /// Most live neighbors an empty cell may have and still breed
    pub max_breeding_neighbors: u8,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            obstacle_density: 0.10,
            male_density: 0.15,
            female_density: 0.15,
            min_lifespan: 25,
            max_lifespan: 35,
            fight_threshold: 10,
            min_breeding_neighbors: 1,
            max_breeding_neighbors: 4,
        }
    }
}

impl WorldConfig {
    /// Probability that an initial cell is empty.
    pub fn empty_density(&self) -> f64 {
        1.0 - self.obstacle_density - self.male_density - self.female_density
    }

    /// Number of cells on the board, or `None` if it overflows `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Reject configurations that would corrupt the initial board.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if !self.cell_count().is_some_and(|cells| cells <= MAX_CELLS) {
            return Err(Error::Config(format!(
                "grid of {}x{} exceeds the limit of {MAX_CELLS} cells",
                self.width, self.height
            )));
        }

        for (name, value) in [
            ("obstacle_density", self.obstacle_density),
            ("male_density", self.male_density),
            ("female_density", self.female_density),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        let occupied = self.obstacle_density + self.male_density + self.female_density;
        if occupied > 1.0 + f64::EPSILON {
            return Err(Error::Config(format!(
                "densities sum to {occupied}, which exceeds 1"
            )));
        }

        if self.min_lifespan == 0 || self.min_lifespan > self.max_lifespan {
            return Err(Error::Config(format!(
                "lifespan range {}..={} is invalid",
                self.min_lifespan, self.max_lifespan
            )));
        }

        if self.fight_threshold == 0 {
            return Err(Error::Config("fight_threshold must be at least 1".to_string()));
        }

        if self.min_breeding_neighbors == 0
            || self.min_breeding_neighbors > self.max_breeding_neighbors
            || self.max_breeding_neighbors > 8
        {
            return Err(Error::Config(format!(
                "breeding window {}..={} is invalid",
                self.min_breeding_neighbors, self.max_breeding_neighbors
            )));
        }

        Ok(())
    }
}

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors used by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgb,
    /// Male with a zero fight counter
    pub calm_male: Rgb,
    /// Male at the fight threshold
    pub hostile_male: Rgb,
    pub female: Rgb,
    pub continent: Rgb,
    pub grid_line: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb(0, 0, 0),
            calm_male: Rgb(0, 0, 255),
            hostile_male: Rgb(255, 0, 0),
            female: Rgb(255, 105, 180),
            continent: Rgb(139, 69, 19),
            grid_line: Rgb(50, 50, 50),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Edge length of one cell in pixels
    pub cell_size: usize,
    /// Draw separator lines between cells
    pub show_grid_lines: bool,
    pub palette: Palette,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_size: 10,
            show_grid_lines: true,
            palette: Palette::default(),
        }
    }
}

/// Which presenter the runner drives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenterKind {
    #[default]
    Terminal,
    Headless,
}

/// Run loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Random seed for reproducibility; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Stop a session after this many generations
    pub max_generations: Option<u64>,
    /// Log a population report every this many generations
    pub report_interval: u64,
    /// Delay between frames (milliseconds)
    pub frame_delay_ms: u64,
    pub presenter: PresenterKind,
    pub world: WorldConfig,
    pub display: DisplayConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_generations: Some(1000),
            report_interval: 10,
            frame_delay_ms: 100,
            presenter: PresenterKind::default(),
            world: WorldConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading run configuration");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;
        if self.report_interval == 0 {
            return Err(Error::Config("report_interval must be at least 1".to_string()));
        }
        if self.display.cell_size == 0 {
            return Err(Error::Config("cell_size must be at least 1".to_string()));
        }

        let size = self.display.cell_size;
        let pixels = self
            .world
            .width
            .checked_mul(size)
            .zip(self.world.height.checked_mul(size))
            .and_then(|(w, h)| w.checked_mul(h));
        match pixels {
            Some(pixels) if pixels <= MAX_FRAME_PIXELS => Ok(()),
            _ => Err(Error::Config(format!(
                "a {}x{} grid at cell_size {size} exceeds the limit of {MAX_FRAME_PIXELS} pixels",
                self.world.width, self.world.height
            ))),
        }
    }
}
