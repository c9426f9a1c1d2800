/// The width of the display in pixels
pub const DISPLAY_WIDTH: u8 = 64;
/// The height of the display in pixels
pub const DISPLAY_HEIGHT: u8 = 32;
/// The size of ram in bytes
pub const RAM_SIZE: u16 = 4096;
/// Programs are loaded here, everything below is reserved for the interpreter
pub const ROM_START_ADDRESS: u16 = 0x200;
/// Where the hexadecimal font glyphs live inside the reserved region
pub const FONT_OFFSET: u16 = 0x050;
/// Every font glyph is five rows tall
pub const FONT_GLYPH_SIZE: u16 = 5;
/// Amount of registers CHIP-8 has
pub const NUM_REGISTERS: u8 = 16;
/// vF doubles as the carry, borrow and collision flag
pub const FLAG_REGISTER: u8 = 0xF;
/// Amount of keys on the hexadecimal keypad
pub const NUM_KEYS: u8 = 16;
/// How many return addresses fit on the call stack
pub const STACK_DEPTH: usize = 16;
/// Only the lowest 12 bits of the index register and of jump targets are significant
pub const ADDRESS_MASK: u16 = 0x0FFF;
