use macroquad::color::Color;

pub const APP_NAME: &str = "CHIP-8";
/// Timers count down 60 times a second, so that is also how often a batch of instructions runs
pub const TICK_INTERVAL: f32 = 1.0 / 60.0;
/// How many cycles the machine advances for every tick. This decides how fast programs run
pub const CYCLES_PER_TICK: usize = 10;
/// Never catch up on more ticks than this in a single frame, e.g. after the window was dragged
pub const MAX_TICKS_PER_FRAME: u32 = 4;
/// Size of a single CHIP-8 pixel on screen, before the window gets resized
pub const PIXEL_SIZE: f32 = 12.0;
/// Room below the display for the sound indicator and error messages
pub const STATUS_BAR_HEIGHT: f32 = 28.0;
pub const FONT_SIZE: f32 = 20.0;

pub const BACKGROUND: Color = Color::new(0.0, 0.0, 0.0, 1.0);
pub const FOREGROUND: Color = Color::new(1.0, 1.0, 1.0, 1.0);
pub const STATUS_TEXT: Color = Color::new(0.6, 0.6, 0.6, 1.0);
pub const SOUND_ON: Color = Color::new(1.0, 0.8, 0.0, 1.0);
pub const ERROR_TEXT: Color = Color::new(1.0, 0.3, 0.3, 1.0);
