use crate::constants::{FONT_OFFSET, RAM_SIZE};
use crate::error::{MachineError, Result};

/// The hexadecimal font, one glyph of five rows for every digit 0 through F.
///
/// Written out in binary every byte is a row of the glyph, with the ones being lit:
///
/// ```text
/// F0 1111
/// 90 1  1
/// 90 1  1
/// 90 1  1
/// F0 1111
/// ```
const FONTSET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, //0
    0x20, 0x60, 0x20, 0x20, 0x70, //1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, //2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, //3
    0x90, 0x90, 0xF0, 0x10, 0x10, //4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, //5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, //6
    0xF0, 0x10, 0x20, 0x40, 0x40, //7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, //8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, //9
    0xF0, 0x90, 0xF0, 0x90, 0x90, //a
    0xE0, 0x90, 0xE0, 0x90, 0xE0, //b
    0xF0, 0x80, 0x80, 0x80, 0xF0, //c
    0xE0, 0x90, 0x90, 0x90, 0xE0, //d
    0xF0, 0x80, 0xF0, 0x80, 0xF0, //e
    0xF0, 0x80, 0xF0, 0x80, 0x80, //f
];

///The ram of the chip8 machine, big endian, laid out in the following way:
///0x000 start of chip-8 ram, reserved for the interpreter
///0x050 to 0x0a0 the hexadecimal font
///0x200 start of the loaded program
///0xfff end of chip8 ram
#[derive(Debug, Clone)]
pub struct Ram {
    bytes: [u8; RAM_SIZE as usize],
}

impl Ram {
    /// Returns zeroed ram with the fontset already loaded
    pub fn with_fonts() -> Self {
        let mut ram = Self {
            bytes: [0; RAM_SIZE as usize],
        };
        let start = FONT_OFFSET as usize;
        ram.bytes[start..start + FONTSET.len()].copy_from_slice(&FONTSET);
        ram
    }

    /// Returns a single byte from ram
    pub fn get_byte(&self, address: u16) -> Result<u8> {
        self.bytes
            .get(address as usize)
            .copied()
            .ok_or(MachineError::MemoryOutOfBounds {
                address: address as usize,
            })
    }

    pub fn set_byte(&mut self, address: u16, value: u8) -> Result<()> {
        let cell = self
            .bytes
            .get_mut(address as usize)
            .ok_or(MachineError::MemoryOutOfBounds {
                address: address as usize,
            })?;
        *cell = value;
        Ok(())
    }

    /// Returns the two bytes at `address` and `address + 1` as one instruction word, the first
    /// byte being the most significant one
    pub fn get_opcode(&self, address: u16) -> Result<u16> {
        let high = self.get_byte(address)?;
        let low = self
            .get_byte(address.wrapping_add(1))
            .map_err(|_| MachineError::MemoryOutOfBounds {
                address: address as usize + 1,
            })?;
        Ok(u16::from_be_bytes([high, low]))
    }

    /// Returns `len` bytes starting at `address`, failing if any of them lies outside of ram
    pub fn read(&self, address: u16, len: usize) -> Result<&[u8]> {
        let start = address as usize;
        self.bytes
            .get(start..start + len)
            .ok_or(MachineError::MemoryOutOfBounds {
                address: self.bytes.len().max(start),
            })
    }

    /// Copies `data` into ram starting at `address`
    pub fn load(&mut self, address: u16, data: &[u8]) -> Result<()> {
        let start = address as usize;
        let max_size = self.bytes.len().saturating_sub(start);
        if data.len() > max_size {
            return Err(MachineError::ProgramTooLarge {
                size: data.len(),
                max_size,
            });
        }
        self.bytes[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::with_fonts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ROM_START_ADDRESS;

    #[test]
    fn fonts_are_loaded_at_the_font_offset() {
        let ram = Ram::with_fonts();
        assert_eq!(ram.read(FONT_OFFSET, 5).unwrap(), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        // the glyph for F is the last one
        assert_eq!(ram.get_byte(FONT_OFFSET + 79).unwrap(), 0x80);
    }

    #[test]
    fn everything_but_the_font_is_zeroed() {
        let ram = Ram::with_fonts();
        assert!(ram.bytes[..FONT_OFFSET as usize].iter().all(|b| *b == 0));
        assert!(ram.bytes[FONT_OFFSET as usize + 80..].iter().all(|b| *b == 0));
    }

    #[test]
    fn fetches_big_endian_words() {
        let mut ram = Ram::with_fonts();
        ram.load(ROM_START_ADDRESS, &[0xAA, 0xBB]).unwrap();
        assert_eq!(ram.get_opcode(ROM_START_ADDRESS).unwrap(), 0xAABB);
    }

    #[test]
    fn fetching_the_last_byte_fails() {
        let ram = Ram::with_fonts();
        assert!(matches!(
            ram.get_opcode(RAM_SIZE - 1),
            Err(MachineError::MemoryOutOfBounds { address: 0x1000 })
        ));
        assert!(ram.get_opcode(RAM_SIZE - 2).is_ok());
    }

    #[test]
    fn out_of_bounds_accesses_fail() {
        let mut ram = Ram::with_fonts();
        assert!(ram.get_byte(RAM_SIZE).is_err());
        assert!(ram.set_byte(RAM_SIZE, 1).is_err());
        assert!(ram.read(RAM_SIZE - 2, 3).is_err());
        assert!(ram.read(RAM_SIZE - 3, 3).is_ok());
    }

    #[test]
    fn loads_a_program_that_fills_memory() {
        let mut ram = Ram::with_fonts();
        let program = vec![0x12; (RAM_SIZE - ROM_START_ADDRESS) as usize];
        ram.load(ROM_START_ADDRESS, &program).unwrap();
        assert_eq!(ram.get_byte(RAM_SIZE - 1).unwrap(), 0x12);
    }

    #[test]
    fn rejects_a_program_that_is_too_large() {
        let mut ram = Ram::with_fonts();
        let program = vec![0x12; (RAM_SIZE - ROM_START_ADDRESS) as usize + 1];
        match ram.load(ROM_START_ADDRESS, &program) {
            Err(MachineError::ProgramTooLarge { size, max_size }) => {
                assert_eq!(size, 0xE01);
                assert_eq!(max_size, 0xE00);
            }
            other => panic!("expected ProgramTooLarge, got {other:?}"),
        }
        // nothing was written
        assert_eq!(ram.get_byte(ROM_START_ADDRESS).unwrap(), 0);
    }
}
