use std::io;

use thiserror::Error;

/// Everything that can stop the machine. None of these are recoverable by the machine itself, the
/// driver decides whether to quit or reset.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("program is too large ({size} bytes), at most {max_size} bytes fit in memory")]
    ProgramTooLarge { size: usize, max_size: usize },

    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("stack overflow: call to {address:#05X} with a full call stack")]
    StackOverflow { address: u16 },

    #[error("stack underflow: return from a subroutine with an empty call stack")]
    StackUnderflow,

    #[error("unknown opcode {opcode:#06X} at address {address:#05X}")]
    UnknownOpcode { opcode: u16, address: u16 },

    #[error("there is no key {0:#X} on the keypad")]
    InvalidKey(u8),

    #[error("could not read program: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, MachineError>;
