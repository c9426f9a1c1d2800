use std::fmt;

/// A raw 16 bit instruction word, first byte in memory being the high byte.
///
/// Fields are named after the usual notation:
/// ## nnn
/// a memory address, it's 12 bits long
/// ## kk
/// an immediate byte, 8 bits
/// ## n
/// a "nibble" 4 bits
/// ## x and y
/// register selectors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// The top nibble, selects the instruction family
    pub fn class(self) -> u8 {
        self.nibble(0)
    }
    pub fn x(self) -> u8 {
        self.nibble(1)
    }
    pub fn y(self) -> u8 {
        self.nibble(2)
    }
    pub fn n(self) -> u8 {
        self.nibble(3)
    }
    pub fn kk(self) -> u8 {
        (self.0 & 0xff) as u8
    }
    pub fn nnn(self) -> u16 {
        self.0 & 0xfff
    }

    /// Nibbles are counted from the most significant one
    fn nibble(self, nth: u8) -> u8 {
        ((self.0 >> (12 - 4 * u16::from(nth & 0x3))) & 0xf) as u8
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

/// # Every instruction of the chip8 instruction set
/// Opcodes that share a top nibble are told apart by their last nibble or byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Turns all the pixels off
    ClearScreen, //00e0
    /// Sets the program counter to the address on top of the stack
    ReturnFromSubroutine, //00ee
    /// Sets the program counter to nnn
    Jump { nnn: u16 }, //1nnn
    /// Pushes the program counter and sets it to nnn
    CallSubroutine { nnn: u16 }, //2nnn
    /// Skips the next instruction if register x holds the value kk
    SkipIfXIsKK { x: u8, kk: u8 }, //3xkk
    /// Skips the next instruction if register x does not hold the value kk
    SkipIfXIsNotKK { x: u8, kk: u8 }, //4xkk
    SkipIfXIsY { x: u8, y: u8 }, //5xy0
    /// Set register x to the value kk
    LoadX { x: u8, kk: u8 }, //6xkk
    /// Adds kk to register x, wrapping, vF is left alone
    AddToX { x: u8, kk: u8 }, //7xkk
    LoadYIntoX { x: u8, y: u8 }, //8xy0
    OrYIntoX { x: u8, y: u8 }, //8xy1
    AndYIntoX { x: u8, y: u8 }, //8xy2
    XorYIntoX { x: u8, y: u8 }, //8xy3
    /// vx + vy, vF is the carry
    AddYToX { x: u8, y: u8 }, //8xy4
    /// vx - vy, vF is 1 when there was no borrow
    SubYFromX { x: u8, y: u8 }, //8xy5
    /// vF is the bit shifted out
    ShiftXRight { x: u8 }, //8xy6
    /// vy - vx, vF is 1 when there was no borrow
    SubXFromY { x: u8, y: u8 }, //8xy7
    /// vF is the bit shifted out
    ShiftXLeft { x: u8 }, //8xye
    SkipIfXIsNotY { x: u8, y: u8 }, //9xy0
    SetIndexRegister { nnn: u16 }, //annn
    JumpPlusV0 { nnn: u16 }, //bnnn
    /// Random byte AND kk into register x
    SetXToRandom { x: u8, kk: u8 }, //cxkk
    /// Draws a sprite of n rows from memory at the index register at (vx, vy)
    Draw { x: u8, y: u8, n: u8 }, //dxyn
    SkipIfKeyXPressed { x: u8 }, //ex9e
    SkipIfKeyXNotPressed { x: u8 }, //exa1
    SetXToDelayTimer { x: u8 }, //fx07
    /// Holds the program counter on this instruction until a key is pressed
    WaitForKey { x: u8 }, //fx0a
    SetDelayTimerToX { x: u8 }, //fx15
    SetSoundTimerToX { x: u8 }, //fx18
    AddXToIndex { x: u8 }, //fx1e
    SetIndexToGlyphX { x: u8 }, //fx29
    StoreBcdOfX { x: u8 }, //fx33
    /// Writes v0 through vx to memory starting at the index register
    Store0ThroughX { x: u8 }, //fx55
    /// Reads v0 through vx from memory starting at the index register
    Load0ThroughX { x: u8 }, //fx65
}

impl Instruction {
    /// Decodes an instruction word, `None` if it isn't part of the instruction set. That includes
    /// 0nnn, the call into a native machine routine.
    pub fn decode(opcode: Opcode) -> Option<Self> {
        let (x, y, n, kk, nnn) = (opcode.x(), opcode.y(), opcode.n(), opcode.kk(), opcode.nnn());
        let instruction = match (opcode.class(), n) {
            (0x0, _) => match opcode.0 {
                0x00E0 => Instruction::ClearScreen,
                0x00EE => Instruction::ReturnFromSubroutine,
                _ => return None,
            },
            (0x1, _) => Instruction::Jump { nnn },
            (0x2, _) => Instruction::CallSubroutine { nnn },
            (0x3, _) => Instruction::SkipIfXIsKK { x, kk },
            (0x4, _) => Instruction::SkipIfXIsNotKK { x, kk },
            (0x5, 0x0) => Instruction::SkipIfXIsY { x, y },
            (0x6, _) => Instruction::LoadX { x, kk },
            (0x7, _) => Instruction::AddToX { x, kk },
            (0x8, 0x0) => Instruction::LoadYIntoX { x, y },
            (0x8, 0x1) => Instruction::OrYIntoX { x, y },
            (0x8, 0x2) => Instruction::AndYIntoX { x, y },
            (0x8, 0x3) => Instruction::XorYIntoX { x, y },
            (0x8, 0x4) => Instruction::AddYToX { x, y },
            (0x8, 0x5) => Instruction::SubYFromX { x, y },
            (0x8, 0x6) => Instruction::ShiftXRight { x },
            (0x8, 0x7) => Instruction::SubXFromY { x, y },
            (0x8, 0xE) => Instruction::ShiftXLeft { x },
            (0x9, 0x0) => Instruction::SkipIfXIsNotY { x, y },
            (0xA, _) => Instruction::SetIndexRegister { nnn },
            (0xB, _) => Instruction::JumpPlusV0 { nnn },
            (0xC, _) => Instruction::SetXToRandom { x, kk },
            (0xD, _) => Instruction::Draw { x, y, n },
            (0xE, _) => match kk {
                0x9E => Instruction::SkipIfKeyXPressed { x },
                0xA1 => Instruction::SkipIfKeyXNotPressed { x },
                _ => return None,
            },
            (0xF, _) => match kk {
                0x07 => Instruction::SetXToDelayTimer { x },
                0x0A => Instruction::WaitForKey { x },
                0x15 => Instruction::SetDelayTimerToX { x },
                0x18 => Instruction::SetSoundTimerToX { x },
                0x1E => Instruction::AddXToIndex { x },
                0x29 => Instruction::SetIndexToGlyphX { x },
                0x33 => Instruction::StoreBcdOfX { x },
                0x55 => Instruction::Store0ThroughX { x },
                0x65 => Instruction::Load0ThroughX { x },
                _ => return None,
            },
            _ => return None,
        };
        Some(instruction)
    }
}

/// Prints the conventional assembly mnemonic, handy when tracing a program
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = match *self {
            Instruction::ClearScreen => "CLS".to_string(),
            Instruction::ReturnFromSubroutine => "RET".to_string(),
            Instruction::Jump { nnn } => format!("JP {nnn:#05X}"),
            Instruction::CallSubroutine { nnn } => format!("CALL {nnn:#05X}"),
            Instruction::SkipIfXIsKK { x, kk } => format!("SE V{x:X}, {kk:#04X}"),
            Instruction::SkipIfXIsNotKK { x, kk } => format!("SNE V{x:X}, {kk:#04X}"),
            Instruction::SkipIfXIsY { x, y } => format!("SE V{x:X}, V{y:X}"),
            Instruction::LoadX { x, kk } => format!("LD V{x:X}, {kk:#04X}"),
            Instruction::AddToX { x, kk } => format!("ADD V{x:X}, {kk:#04X}"),
            Instruction::LoadYIntoX { x, y } => format!("LD V{x:X}, V{y:X}"),
            Instruction::OrYIntoX { x, y } => format!("OR V{x:X}, V{y:X}"),
            Instruction::AndYIntoX { x, y } => format!("AND V{x:X}, V{y:X}"),
            Instruction::XorYIntoX { x, y } => format!("XOR V{x:X}, V{y:X}"),
            Instruction::AddYToX { x, y } => format!("ADD V{x:X}, V{y:X}"),
            Instruction::SubYFromX { x, y } => format!("SUB V{x:X}, V{y:X}"),
            Instruction::ShiftXRight { x } => format!("SHR V{x:X}"),
            Instruction::SubXFromY { x, y } => format!("SUBN V{x:X}, V{y:X}"),
            Instruction::ShiftXLeft { x } => format!("SHL V{x:X}"),
            Instruction::SkipIfXIsNotY { x, y } => format!("SNE V{x:X}, V{y:X}"),
            Instruction::SetIndexRegister { nnn } => format!("LD I, {nnn:#05X}"),
            Instruction::JumpPlusV0 { nnn } => format!("JP V0, {nnn:#05X}"),
            Instruction::SetXToRandom { x, kk } => format!("RND V{x:X}, {kk:#04X}"),
            Instruction::Draw { x, y, n } => format!("DRW V{x:X}, V{y:X}, {n}"),
            Instruction::SkipIfKeyXPressed { x } => format!("SKP V{x:X}"),
            Instruction::SkipIfKeyXNotPressed { x } => format!("SKNP V{x:X}"),
            Instruction::SetXToDelayTimer { x } => format!("LD V{x:X}, DT"),
            Instruction::WaitForKey { x } => format!("LD V{x:X}, K"),
            Instruction::SetDelayTimerToX { x } => format!("LD DT, V{x:X}"),
            Instruction::SetSoundTimerToX { x } => format!("LD ST, V{x:X}"),
            Instruction::AddXToIndex { x } => format!("ADD I, V{x:X}"),
            Instruction::SetIndexToGlyphX { x } => format!("LD F, V{x:X}"),
            Instruction::StoreBcdOfX { x } => format!("LD B, V{x:X}"),
            Instruction::Store0ThroughX { x } => format!("LD [I], V{x:X}"),
            Instruction::Load0ThroughX { x } => format!("LD V{x:X}, [I]"),
        };
        // pad so traces can line the mnemonics up in a column
        f.pad(&mnemonic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(word: u16) -> Option<Instruction> {
        Instruction::decode(Opcode(word))
    }

    #[test]
    fn extracts_fields() {
        let opcode = Opcode(0xABCD);
        assert_eq!(opcode.class(), 0xA);
        assert_eq!(opcode.x(), 0xB);
        assert_eq!(opcode.y(), 0xC);
        assert_eq!(opcode.n(), 0xD);
        assert_eq!(opcode.kk(), 0xCD);
        assert_eq!(opcode.nnn(), 0xBCD);
    }

    #[test]
    fn decodes_the_zero_class_by_full_word() {
        assert_eq!(decode(0x00E0), Some(Instruction::ClearScreen));
        assert_eq!(decode(0x00EE), Some(Instruction::ReturnFromSubroutine));
        // native machine routines and the empty word are not supported
        assert_eq!(decode(0x0123), None);
        assert_eq!(decode(0x0000), None);
        assert_eq!(decode(0x01E0), None);
    }

    #[test]
    fn decodes_addresses_and_immediates() {
        assert_eq!(decode(0x1234), Some(Instruction::Jump { nnn: 0x234 }));
        assert_eq!(decode(0x2FFF), Some(Instruction::CallSubroutine { nnn: 0xFFF }));
        assert_eq!(decode(0x3A12), Some(Instruction::SkipIfXIsKK { x: 0xA, kk: 0x12 }));
        assert_eq!(decode(0x7F01), Some(Instruction::AddToX { x: 0xF, kk: 0x01 }));
        assert_eq!(decode(0xA00A), Some(Instruction::SetIndexRegister { nnn: 0x00A }));
        assert_eq!(decode(0xD125), Some(Instruction::Draw { x: 1, y: 2, n: 5 }));
    }

    #[test]
    fn decodes_the_alu_by_last_nibble() {
        assert_eq!(decode(0x8120), Some(Instruction::LoadYIntoX { x: 1, y: 2 }));
        assert_eq!(decode(0x8124), Some(Instruction::AddYToX { x: 1, y: 2 }));
        assert_eq!(decode(0x8127), Some(Instruction::SubXFromY { x: 1, y: 2 }));
        assert_eq!(decode(0x812E), Some(Instruction::ShiftXLeft { x: 1 }));
        for n in [0x8, 0x9, 0xA, 0xB, 0xC, 0xD, 0xF] {
            assert_eq!(decode(0x8120 | n), None);
        }
    }

    #[test]
    fn register_comparisons_need_a_zero_last_nibble() {
        assert_eq!(decode(0x5120), Some(Instruction::SkipIfXIsY { x: 1, y: 2 }));
        assert_eq!(decode(0x5121), None);
        assert_eq!(decode(0x9120), Some(Instruction::SkipIfXIsNotY { x: 1, y: 2 }));
        assert_eq!(decode(0x912F), None);
    }

    #[test]
    fn decodes_the_e_and_f_class_by_last_byte() {
        assert_eq!(decode(0xE39E), Some(Instruction::SkipIfKeyXPressed { x: 3 }));
        assert_eq!(decode(0xE3A1), Some(Instruction::SkipIfKeyXNotPressed { x: 3 }));
        assert_eq!(decode(0xE3FF), None);
        assert_eq!(decode(0xF055), Some(Instruction::Store0ThroughX { x: 0 }));
        assert_eq!(decode(0xFE65), Some(Instruction::Load0ThroughX { x: 0xE }));
        assert_eq!(decode(0xF00A), Some(Instruction::WaitForKey { x: 0 }));
        assert_eq!(decode(0xF0FF), None);
    }

    #[test]
    fn prints_mnemonics() {
        assert_eq!(decode(0xD125).unwrap().to_string(), "DRW V1, V2, 5");
        assert_eq!(decode(0xA00A).unwrap().to_string(), "LD I, 0x00A");
        assert_eq!(decode(0x6FAB).unwrap().to_string(), "LD VF, 0xAB");
        assert_eq!(Opcode(0x00E0).to_string(), "00E0");
    }

    #[test]
    fn mnemonics_respect_width_and_alignment() {
        assert_eq!(format!("{:<6}|", Instruction::ClearScreen), "CLS   |");
        assert_eq!(format!("{:>8}", Instruction::ShiftXLeft { x: 2 }), "  SHL V2");
        assert_eq!(
            format!("{:<16}|", Instruction::Draw { x: 1, y: 2, n: 5 }),
            "DRW V1, V2, 5   |"
        );
    }
}
