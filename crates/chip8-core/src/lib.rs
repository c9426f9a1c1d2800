//! # chip8-core
//!
//! The instruction set interpreter: memory, registers, call stack, display buffer and keypad,
//! and the fetch, decode, execute cycle that drives them. Timing, windows, sound and reading
//! the real keyboard are left to whoever embeds the [`Machine`].

///Settings that change how the machine behaves at runtime
mod config;
///This holds all of the constants (written in capital letters in the code)
pub mod constants;
///Handles the fetch, decode, execute cycle
mod cpu;
///Everything that can go wrong while loading or running a program
mod error;
///The monochrome display
mod framebuffer;
///Decoding instruction words into instructions
pub mod instruction;
///The hexadecimal keypad
mod keypad;
///A data structure modeling ram
mod ram;
///The registers and timers
mod registers;
///Holds the data loaded from disk
mod rombuffer;
///The call stack
mod stack;

pub use config::{Config, OpcodePolicy};
pub use constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, NUM_KEYS};
pub use cpu::Machine;
pub use error::{MachineError, Result};
pub use framebuffer::{Framebuffer, Row};
pub use instruction::{Instruction, Opcode};
pub use rombuffer::RomBuffer;
