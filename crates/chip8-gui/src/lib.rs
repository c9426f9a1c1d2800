//! # chip8-gui
//!
//! A window around the chip8-core crate: it presents the display, feeds the keyboard into the
//! keypad, shows when the sound timer runs, and paces the machine.

use std::error::Error;
use std::path::PathBuf;

use log::{error, info, warn};
use macroquad::Window;
use macroquad::input::{KeyCode, is_key_down, is_key_pressed};
use macroquad::math::Rect;
use macroquad::prelude::Conf;
use macroquad::time::get_frame_time;
use macroquad::window::{next_frame, screen_height, screen_width};

use chip8_core::{DISPLAY_HEIGHT, DISPLAY_WIDTH, Machine, MachineError, RomBuffer};

pub mod constants;
use constants::{MAX_TICKS_PER_FRAME, PIXEL_SIZE, STATUS_BAR_HEIGHT, TICK_INTERVAL};
mod keymap;
mod settings;
pub use settings::{Settings, SettingsError, USAGE};
mod widgets;

/// The main application struct, owns the machine and reacts on the keyboard
pub struct Application {
    machine: Machine,
    rom: RomBuffer,
    display: widgets::Display,
    cycles_per_tick: usize,
    /// Set once the machine stopped on an error, it stays stopped until restarted
    halted: Option<String>,
    /// Time that has passed but wasn't turned into ticks yet
    elapsed: f32,
}

impl Application {
    /// Starts the emulator and creates a window with which a user can interact. Without a rom in
    /// the settings a file dialog asks for one
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use chip8_gui::{Application, Settings};
    ///
    /// let _ = Application::run(Settings::default());
    /// ```
    pub fn run(settings: Settings) -> Result<(), Box<dyn Error>> {
        let Some(path) = settings.rom.clone().or_else(pick_rom) else {
            info!("no rom selected");
            return Ok(());
        };
        let rom = RomBuffer::from_file(&path)?;
        info!("running {} ({} bytes)", path.display(), rom.len());
        let application = Application::new(rom, &settings)?;
        info!("unknown opcodes: {:?}", application.machine().config().opcode_policy);

        let conf = Conf {
            window_title: format!("{} - {}", constants::APP_NAME, path.display()),
            window_width: (DISPLAY_WIDTH as f32 * PIXEL_SIZE) as i32,
            window_height: (DISPLAY_HEIGHT as f32 * PIXEL_SIZE + STATUS_BAR_HEIGHT) as i32,
            window_resizable: true,
            ..Default::default()
        };
        Window::from_config(conf, application.main_loop());
        Ok(())
    }

    /// Creates a machine with the rom loaded, without opening a window
    pub fn new(rom: RomBuffer, settings: &Settings) -> Result<Self, MachineError> {
        let mut machine = Machine::new(settings.machine);
        machine.load_rom(&rom)?;
        Ok(Self {
            machine,
            rom,
            display: widgets::Display::new(DISPLAY_HEIGHT.into(), DISPLAY_WIDTH.into()),
            cycles_per_tick: settings.cycles_per_tick,
            halted: None,
            elapsed: 0.0,
        })
    }

    async fn main_loop(mut self) {
        loop {
            if is_key_pressed(KeyCode::Escape) {
                info!("quitting");
                break;
            }
            if is_key_pressed(KeyCode::Backspace) {
                self.restart();
            }
            self.read_keyboard();
            self.advance(get_frame_time());
            self.view();
            next_frame().await;
        }
    }

    /// Mirrors the mapped keys into the keypad
    fn read_keyboard(&mut self) {
        for (keycode, key) in keymap::KEYMAP {
            if let Err(err) = self.machine.set_key(key, is_key_down(keycode)) {
                warn!("{err}");
            }
        }
    }

    /// Turns `frame_time` seconds into ticks, every tick runs a batch of instructions and counts
    /// the timers down once
    pub fn advance(&mut self, frame_time: f32) {
        if self.halted.is_some() {
            return;
        }
        self.elapsed += frame_time;
        let mut ticks = 0;
        while self.elapsed >= TICK_INTERVAL {
            self.elapsed -= TICK_INTERVAL;
            ticks += 1;
            if ticks > MAX_TICKS_PER_FRAME {
                // running behind, drop the rest instead of speeding up
                self.elapsed = 0.0;
                break;
            }
            if let Err(err) = self.machine.run_cycles(self.cycles_per_tick) {
                error!(
                    "machine stopped at {:#05X}: {err}",
                    self.machine.program_counter()
                );
                self.halted = Some(err.to_string());
                return;
            }
            self.machine.tick();
        }
    }

    /// Resets the machine and loads the same rom again
    pub fn restart(&mut self) {
        self.machine.reset();
        self.halted = None;
        self.elapsed = 0.0;
        if let Err(err) = self.machine.load_rom(&self.rom) {
            error!("could not reload the rom: {err}");
            self.halted = Some(err.to_string());
        } else {
            info!("restarted");
        }
    }

    /// Draws the display and the status bar into the window
    fn view(&self) {
        let display_height = screen_height() - STATUS_BAR_HEIGHT;
        let bounds = Rect::new(0.0, 0.0, screen_width(), display_height);
        self.display.draw(self.machine.display_snapshot(), bounds);

        let status = match &self.halted {
            Some(reason) => widgets::Status::Halted(reason),
            None => widgets::Status::Running {
                sound: self.machine.is_sound_active(),
            },
        };
        widgets::draw_status_bar(status, display_height, screen_width());
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn halted(&self) -> Option<&str> {
        self.halted.as_deref()
    }
}

/// Asks the user for a rom with the native file dialog
fn pick_rom() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Chip8 ROM files", &["ch8", "8o"])
        .pick_file()
}
