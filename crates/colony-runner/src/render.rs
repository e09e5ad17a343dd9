//! Color selection and rasterization of a world state into pixels.

use colony_core::{CellKind, DisplayConfig, Palette, Position, Rgb};
use colony_world::WorldState;

/// Blend from the calm to the hostile male color in proportion to
/// `min(fight_counter, threshold) / threshold`.
pub fn male_color(fight_counter: u32, threshold: u32, palette: &Palette) -> Rgb {
    if fight_counter == 0 || threshold == 0 {
        return palette.calm_male;
    }

    let t = f64::from(fight_counter.min(threshold)) / f64::from(threshold);
    let blend = |calm: u8, hostile: u8| -> u8 {
        let value = f64::from(calm) + (f64::from(hostile) - f64::from(calm)) * t;
        value.clamp(0.0, 255.0) as u8
    };

    let Rgb(cr, cg, cb) = palette.calm_male;
    let Rgb(hr, hg, hb) = palette.hostile_male;
    Rgb(blend(cr, hr), blend(cg, hg), blend(cb, hb))
}

pub fn cell_color(kind: CellKind, fight_counter: u32, threshold: u32, palette: &Palette) -> Rgb {
    match kind {
        CellKind::Empty => palette.background,
        CellKind::Male => male_color(fight_counter, threshold, palette),
        CellKind::Female => palette.female,
        CellKind::Continent => palette.continent,
    }
}

/// Row-major RGB pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Frame {
    pub fn new(width: usize, height: usize, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// Draw every cell as a `cell_size` square, then separator lines along
    /// each multiple of the cell size.
    pub fn rasterize(state: &WorldState, display: &DisplayConfig, threshold: u32) -> Self {
        let size = display.cell_size;
        let palette = &display.palette;
        let mut frame = Self::new(state.width() * size, state.height() * size, palette.background);

        for (pos, kind) in state.cells.iter() {
            let counter = state.fight_counters.get(pos).unwrap_or(0);
            let color = cell_color(kind, counter, threshold, palette);
            if color != palette.background {
                frame.fill_rect(pos.col * size, pos.row * size, size, size, color);
            }
        }

        if display.show_grid_lines {
            for x in (0..frame.width).step_by(size) {
                frame.fill_rect(x, 0, 1, frame.height, palette.grid_line);
            }
            for y in (0..frame.height).step_by(size) {
                frame.fill_rect(0, y, frame.width, 1, palette.grid_line);
            }
        }

        frame
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgb) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for row in y..y_end {
            let start = row * self.width;
            self.pixels[start + x..start + x_end].fill(color);
        }
    }
}

/// Top-left pixel of a cell's interior, past the separator line.
pub fn cell_origin(pos: Position, display: &DisplayConfig) -> (usize, usize) {
    let inset = usize::from(display.show_grid_lines);
    (
        pos.col * display.cell_size + inset,
        pos.row * display.cell_size + inset,
    )
}
