use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// One row of pixels, `true` being lit
pub type Row = [bool; DISPLAY_WIDTH as usize];

/// The monochrome display. Only the clear screen and draw instructions change it, anything that
/// presents it to a user gets a read only view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    rows: [Row; DISPLAY_HEIGHT as usize],
}

impl Framebuffer {
    pub fn new() -> Self {
        Self {
            rows: [[false; DISPLAY_WIDTH as usize]; DISPLAY_HEIGHT as usize],
        }
    }

    /// Turns all the pixels off
    pub fn clear(&mut self) {
        self.rows
            .iter_mut()
            .for_each(|row| *row = [false; DISPLAY_WIDTH as usize]);
    }

    /// XORs an 8 pixel wide sprite onto the display with its top left corner at `(x, y)`.
    /// Every pixel wraps around to the opposite edge on its own.
    ///
    /// Returns whether a lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (sprite_row, byte) in sprite.iter().enumerate() {
            let pixel_row = (y as usize + sprite_row) % DISPLAY_HEIGHT as usize;
            for sprite_column in 0..8 {
                if (*byte >> (7 - sprite_column)) & 1 == 0 {
                    continue;
                }
                let pixel_column = (x as usize + sprite_column) % DISPLAY_WIDTH as usize;
                let pixel = &mut self.rows[pixel_row][pixel_column];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }
        collision
    }

    /// Whether the pixel at column `x` and row `y` is lit, coordinates out of range are unlit
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Yields the `(x, y)` coordinates of every lit pixel
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, lit)| **lit)
                .map(move |(x, _)| (x, y))
        })
    }

    pub fn is_blank(&self) -> bool {
        self.lit_pixels().next().is_none()
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}
