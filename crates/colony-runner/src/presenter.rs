//! Presentation port and its implementations.
//!
//! Presenters only read the world state. Nothing they do flows back into the
//! simulation.

use crate::render::{cell_color, Frame};
use colony_core::{DisplayConfig, PresenterKind, Result, Rgb, RunConfig};
use colony_world::WorldState;
use std::fmt::Write as _;
use std::io::Write;
use tracing::trace;

pub trait PresentationPort {
    /// Show the board as it stands after `generation` steps.
    fn present(&mut self, state: &WorldState, generation: u64) -> Result<()>;
}

/// Build the presenter selected in the run configuration.
pub fn from_config(config: &RunConfig) -> Box<dyn PresentationPort> {
    let threshold = config.world.fight_threshold;
    match config.presenter {
        PresenterKind::Terminal => Box::new(TerminalPresenter::new(
            std::io::stdout(),
            config.display.clone(),
            threshold,
        )),
        PresenterKind::Headless => Box::new(HeadlessPresenter::new(config.display.clone(), threshold)),
    }
}

/// Draws the board with 24-bit ANSI background colors, two columns per cell.
pub struct TerminalPresenter<W: Write> {
    out: W,
    display: DisplayConfig,
    fight_threshold: u32,
    buffer: String,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, display: DisplayConfig, fight_threshold: u32) -> Self {
        Self {
            out,
            display,
            fight_threshold,
            buffer: String::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn compose(&mut self, state: &WorldState, generation: u64) {
        self.buffer.clear();
        // Cursor home, then redraw over the previous frame.
        self.buffer.push_str("\x1b[H");

        let palette = &self.display.palette;
        let mut last: Option<Rgb> = None;
        for (pos, kind) in state.cells.iter() {
            let counter = state.fight_counters.get(pos).unwrap_or(0);
            let color = cell_color(kind, counter, self.fight_threshold, palette);
            if last != Some(color) {
                let Rgb(r, g, b) = color;
                let _ = write!(self.buffer, "\x1b[48;2;{r};{g};{b}m");
                last = Some(color);
            }
            self.buffer.push_str("  ");
            if pos.col + 1 == state.width() {
                self.buffer.push_str("\x1b[0m\n");
                last = None;
            }
        }

        let census = state.census();
        let _ = writeln!(
            self.buffer,
            "\x1b[0mGeneration {generation}  males {}  females {}\x1b[K",
            census.males, census.females
        );
    }
}

impl<W: Write> PresentationPort for TerminalPresenter<W> {
    fn present(&mut self, state: &WorldState, generation: u64) -> Result<()> {
        self.compose(state, generation);
        self.out.write_all(self.buffer.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Rasterizes into an in-memory pixel frame without any display attached.
pub struct HeadlessPresenter {
    display: DisplayConfig,
    fight_threshold: u32,
    last_frame: Option<Frame>,
    frames_presented: u64,
}

impl HeadlessPresenter {
    pub fn new(display: DisplayConfig, fight_threshold: u32) -> Self {
        Self {
            display,
            fight_threshold,
            last_frame: None,
            frames_presented: 0,
        }
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl PresentationPort for HeadlessPresenter {
    fn present(&mut self, state: &WorldState, generation: u64) -> Result<()> {
        let frame = Frame::rasterize(state, &self.display, self.fight_threshold);
        trace!(generation, width = frame.width(), height = frame.height(), "Frame rasterized");
        self.last_frame = Some(frame);
        self.frames_presented += 1;
        Ok(())
    }
}
