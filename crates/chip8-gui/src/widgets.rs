use macroquad::math::Rect;
use macroquad::shapes::draw_rectangle;
use macroquad::text::draw_text;

use chip8_core::Framebuffer;

use crate::constants::{
    BACKGROUND, ERROR_TEXT, FONT_SIZE, FOREGROUND, SOUND_ON, STATUS_BAR_HEIGHT, STATUS_TEXT,
};

/// Draws *pixels* over a black screen in the native CHIP-8 resolution, scaled to fit the window
/// without distorting them
pub struct Display {
    rows: usize,
    columns: usize,
}

impl Display {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// The largest area with the display's aspect ratio that fits in `bounds`, centered
    pub fn layout(&self, bounds: Rect) -> Rect {
        let scale = (bounds.w / self.columns as f32).min(bounds.h / self.rows as f32);
        let width = scale * self.columns as f32;
        let height = scale * self.rows as f32;
        Rect::new(
            bounds.x + (bounds.w - width) / 2.0,
            bounds.y + (bounds.h - height) / 2.0,
            width,
            height,
        )
    }

    pub fn draw(&self, framebuffer: &Framebuffer, bounds: Rect) {
        let area = self.layout(bounds);
        let cell = area.w / self.columns as f32;

        draw_rectangle(area.x, area.y, area.w, area.h, BACKGROUND);
        for (column, row) in framebuffer.lit_pixels() {
            let x = area.x + column as f32 * cell;
            let y = area.y + row as f32 * cell;
            draw_rectangle(x, y, cell, cell, FOREGROUND);
        }
    }
}

/// What goes into the line below the display
pub enum Status<'a> {
    Running { sound: bool },
    Halted(&'a str),
}

/// The line below the display: a sound indicator while running, the reason when halted
pub fn draw_status_bar(status: Status<'_>, top: f32, width: f32) {
    draw_rectangle(0.0, top, width, STATUS_BAR_HEIGHT, BACKGROUND);
    let baseline = top + STATUS_BAR_HEIGHT - (STATUS_BAR_HEIGHT - FONT_SIZE / 2.0) / 2.0;
    match status {
        Status::Running { sound } => {
            let colour = if sound { SOUND_ON } else { STATUS_TEXT };
            draw_rectangle(8.0, top + 8.0, 12.0, STATUS_BAR_HEIGHT - 16.0, colour);
            draw_text(
                "esc: quit  backspace: restart",
                28.0,
                baseline,
                FONT_SIZE,
                STATUS_TEXT,
            );
        }
        Status::Halted(reason) => {
            draw_text(reason, 8.0, baseline, FONT_SIZE, ERROR_TEXT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_aspect_ratio_in_a_wide_window() {
        let display = Display::new(32, 64);
        let area = display.layout(Rect::new(0.0, 0.0, 1000.0, 320.0));
        assert_eq!(area, Rect::new(180.0, 0.0, 640.0, 320.0));
    }

    #[test]
    fn keeps_the_aspect_ratio_in_a_tall_window() {
        let display = Display::new(32, 64);
        let area = display.layout(Rect::new(0.0, 10.0, 640.0, 1000.0));
        assert_eq!(area, Rect::new(0.0, 350.0, 640.0, 320.0));
    }
}
