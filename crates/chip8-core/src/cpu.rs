use log::{debug, trace, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{Config, OpcodePolicy};
use crate::constants::{
    ADDRESS_MASK, FLAG_REGISTER, FONT_GLYPH_SIZE, FONT_OFFSET, ROM_START_ADDRESS,
};
use crate::error::{MachineError, Result};
use crate::framebuffer::Framebuffer;
use crate::instruction::{Instruction, Opcode};
use crate::keypad::Keypad;
use crate::ram::Ram;
use crate::registers::Registers;
use crate::rombuffer::RomBuffer;
use crate::stack::Stack;

/// The whole machine: memory, registers, call stack, display and keypad.
///
/// Nothing in here keeps time. Whoever drives the machine calls [`Machine::cycle`] as often as
/// instructions should run and [`Machine::tick`] 60 times per second.
pub struct Machine {
    /// Black and white pixels, only changed by the clear screen and draw instructions
    framebuffer: Framebuffer,
    ///Program counter, points at the next instruction to fetch, initialized at 0x200
    program_counter: u16,
    keypad: Keypad,
    memory: Ram,
    /// Seedable so the random instruction can be tested
    rng: ChaCha8Rng,
    config: Config,
    /// Registers 0x0 through 0xF, the index register and both timers
    registers: Registers,
    stack: Stack,
}

impl Machine {
    /// Creates a machine in its initial state, ready for a program to be loaded
    pub fn new(config: Config) -> Self {
        let seed = config.rng_seed.unwrap_or_else(rand::random);
        Self {
            framebuffer: Framebuffer::new(),
            program_counter: ROM_START_ADDRESS,
            keypad: Keypad::default(),
            memory: Ram::with_fonts(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            registers: Registers::default(),
            stack: Stack::default(),
        }
    }

    /// Zeroes memory, registers, timers, stack and display, installs the font and points the
    /// program counter at the load address. The keypad is left alone, it mirrors the keyboard.
    pub fn init(&mut self) {
        self.framebuffer.clear();
        self.program_counter = ROM_START_ADDRESS;
        self.memory = Ram::with_fonts();
        self.registers = Registers::default();
        self.stack = Stack::default();
        if let Some(seed) = self.config.rng_seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }
        debug!("machine initialised, program counter at {ROM_START_ADDRESS:#05X}");
    }

    /// Puts the machine back in its initial state and lets go of every key, for when a user
    /// restarts. The program has to be loaded again afterwards
    pub fn reset(&mut self) {
        self.init();
        self.keypad.release_all();
    }

    /// Copies a program into memory at the load address
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.memory.load(ROM_START_ADDRESS, program)?;
        debug!(
            "loaded {} byte program at {ROM_START_ADDRESS:#05X}",
            program.len()
        );
        Ok(())
    }

    pub fn load_rom(&mut self, rom: &RomBuffer) -> Result<()> {
        self.load_program(rom.contents())
    }

    /// Runs a single fetch, decode, execute step.
    ///
    /// When an error is returned the instruction had no effect and the program counter still
    /// points at it.
    pub fn cycle(&mut self) -> Result<()> {
        let address = self.program_counter;
        let opcode = Opcode(self.memory.get_opcode(address)?);

        let Some(instruction) = Instruction::decode(opcode) else {
            return match self.config.opcode_policy {
                OpcodePolicy::Strict => Err(MachineError::UnknownOpcode {
                    opcode: opcode.0,
                    address,
                }),
                OpcodePolicy::Permissive => {
                    warn!("skipping unknown opcode {opcode} at {address:#05X}");
                    self.program_counter = address.wrapping_add(2);
                    Ok(())
                }
            };
        };
        trace!(
            "{address:03X}: {opcode} {instruction:<16} v{:02X?} i{:03X}",
            self.registers.all(),
            self.registers.get_index_register()
        );

        self.program_counter = address.wrapping_add(2);
        self.execute(instruction).inspect_err(|_| {
            self.program_counter = address;
        })
    }

    /// Runs `cycles` instructions, stopping at the first error
    pub fn run_cycles(&mut self, cycles: usize) -> Result<()> {
        for _ in 0..cycles {
            self.cycle()?;
        }
        Ok(())
    }

    /// Counts the delay and sound timer down by one, supposed to be called at 60hz
    pub fn tick(&mut self) {
        self.registers.decrement_timers();
    }

    ///Execute the instruction, the program counter already points past it. For details on the
    ///instructions, check the instruction enum definition
    fn execute(&mut self, instruction: Instruction) -> Result<()> {
        match instruction {
            //00E0
            Instruction::ClearScreen => self.framebuffer.clear(),
            //00EE
            Instruction::ReturnFromSubroutine => {
                self.program_counter = self.stack.pop()?;
            }
            //1NNN
            Instruction::Jump { nnn } => {
                self.program_counter = nnn;
            }
            //2NNN
            Instruction::CallSubroutine { nnn } => {
                self.stack.push(self.program_counter, nnn)?;
                self.program_counter = nnn;
            }
            //3XKK
            Instruction::SkipIfXIsKK { x, kk } => {
                self.skip_if(self.registers.get_register(x) == kk);
            }
            //4XKK
            Instruction::SkipIfXIsNotKK { x, kk } => {
                self.skip_if(self.registers.get_register(x) != kk);
            }
            //5XY0
            Instruction::SkipIfXIsY { x, y } => {
                self.skip_if(self.registers.get_register(x) == self.registers.get_register(y));
            }
            //6XKK
            Instruction::LoadX { x, kk } => self.registers.set_register(x, kk),
            //7XKK
            Instruction::AddToX { x, kk } => {
                let vx = self.registers.get_register(x);
                self.registers.set_register(x, vx.wrapping_add(kk));
            }
            //8XY0 through 8XYE
            Instruction::LoadYIntoX { x, y } => self.alu(x, y, |_, vy| (vy, None)),
            Instruction::OrYIntoX { x, y } => self.alu(x, y, |vx, vy| (vx | vy, None)),
            Instruction::AndYIntoX { x, y } => self.alu(x, y, |vx, vy| (vx & vy, None)),
            Instruction::XorYIntoX { x, y } => self.alu(x, y, |vx, vy| (vx ^ vy, None)),
            Instruction::AddYToX { x, y } => self.alu(x, y, |vx, vy| {
                let (sum, carry) = vx.overflowing_add(vy);
                (sum, Some(carry))
            }),
            Instruction::SubYFromX { x, y } => self.alu(x, y, |vx, vy| {
                let (difference, borrow) = vx.overflowing_sub(vy);
                (difference, Some(!borrow))
            }),
            Instruction::ShiftXRight { x } => {
                self.alu(x, x, |vx, _| (vx >> 1, Some(vx & 0x01 == 1)))
            }
            Instruction::SubXFromY { x, y } => self.alu(x, y, |vx, vy| {
                let (difference, borrow) = vy.overflowing_sub(vx);
                (difference, Some(!borrow))
            }),
            Instruction::ShiftXLeft { x } => {
                self.alu(x, x, |vx, _| (vx << 1, Some(vx & 0x80 == 0x80)))
            }
            //9XY0
            Instruction::SkipIfXIsNotY { x, y } => {
                self.skip_if(self.registers.get_register(x) != self.registers.get_register(y));
            }
            //ANNN
            Instruction::SetIndexRegister { nnn } => self.registers.set_index_register(nnn),
            //BNNN
            Instruction::JumpPlusV0 { nnn } => {
                let v0 = u16::from(self.registers.get_register(0));
                self.program_counter = (nnn + v0) & ADDRESS_MASK;
            }
            //CXKK
            Instruction::SetXToRandom { x, kk } => {
                let random_byte: u8 = self.rng.random();
                self.registers.set_register(x, random_byte & kk);
            }
            //DXYN
            Instruction::Draw { x, y, n } => {
                let sprite = self
                    .memory
                    .read(self.registers.get_index_register(), n as usize)?;
                let collision = self.framebuffer.draw_sprite(
                    self.registers.get_register(x),
                    self.registers.get_register(y),
                    sprite,
                );
                self.registers.set_flag(collision);
            }
            //EX9E
            Instruction::SkipIfKeyXPressed { x } => {
                self.skip_if(self.keypad.is_pressed(self.registers.get_register(x)));
            }
            //EXA1
            Instruction::SkipIfKeyXNotPressed { x } => {
                self.skip_if(!self.keypad.is_pressed(self.registers.get_register(x)));
            }
            //FX07
            Instruction::SetXToDelayTimer { x } => {
                let delay = self.registers.get_delay_timer();
                self.registers.set_register(x, delay);
            }
            //FX0A
            Instruction::WaitForKey { x } => match self.keypad.first_pressed() {
                Some(key) => self.registers.set_register(x, key),
                // the whole system waits, so run this instruction again next cycle
                None => self.program_counter -= 2,
            },
            //FX15
            Instruction::SetDelayTimerToX { x } => {
                let vx = self.registers.get_register(x);
                self.registers.set_delay_timer(vx);
            }
            //FX18
            Instruction::SetSoundTimerToX { x } => {
                let vx = self.registers.get_register(x);
                self.registers.set_sound_timer(vx);
            }
            //FX1E
            Instruction::AddXToIndex { x } => {
                let vx = u16::from(self.registers.get_register(x));
                let index = self.registers.get_index_register();
                self.registers.set_index_register(index + vx);
            }
            //FX29
            Instruction::SetIndexToGlyphX { x } => {
                let digit = u16::from(self.registers.get_register(x) & 0xF);
                self.registers
                    .set_index_register(FONT_OFFSET + digit * FONT_GLYPH_SIZE);
            }
            //FX33
            Instruction::StoreBcdOfX { x } => {
                let vx = self.registers.get_register(x);
                self.write_at_index(&[vx / 100, (vx / 10) % 10, vx % 10])?;
            }
            //FX55
            Instruction::Store0ThroughX { x } => {
                let values = *self.registers.all();
                self.write_at_index(&values[..=x as usize])?;
            }
            //FX65
            Instruction::Load0ThroughX { x } => {
                let values = self
                    .memory
                    .read(self.registers.get_index_register(), x as usize + 1)?;
                for (register, value) in values.iter().enumerate() {
                    self.registers.set_register(register as u8, *value);
                }
            }
        }
        Ok(())
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter = self.program_counter.wrapping_add(2);
        }
    }

    /// Stores the result of `operation` in vx and then, if there is one, the flag in vF. The flag
    /// goes last so it wins when x is F.
    fn alu(&mut self, x: u8, y: u8, operation: impl Fn(u8, u8) -> (u8, Option<bool>)) {
        let (result, flag) =
            operation(self.registers.get_register(x), self.registers.get_register(y));
        self.registers.set_register(x, result);
        if let Some(flag) = flag {
            self.registers.set_flag(flag);
        }
    }

    /// Writes `values` to memory starting at the index register. Nothing is written if any of it
    /// would land outside of memory
    fn write_at_index(&mut self, values: &[u8]) -> Result<()> {
        let index = self.registers.get_index_register();
        self.memory.read(index, values.len())?;
        for (offset, value) in values.iter().enumerate() {
            self.memory.set_byte(index + offset as u16, *value)?;
        }
        Ok(())
    }

    /// A read only view of the display, for whatever presents it
    pub fn display_snapshot(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// A tone should be playing for as long as this is true
    pub fn is_sound_active(&self) -> bool {
        self.registers.get_sound_timer() > 0
    }

    /// Set key's state
    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<()> {
        self.keypad.set(key, pressed)
    }

    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.keypad.is_pressed(key)
    }

    pub fn release_all_keys(&mut self) {
        self.keypad.release_all();
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn register(&self, register: u8) -> u8 {
        self.registers.get_register(register)
    }

    pub fn flag(&self) -> u8 {
        self.registers.get_register(FLAG_REGISTER)
    }

    pub fn index_register(&self) -> u16 {
        self.registers.get_index_register()
    }

    pub fn delay_timer(&self) -> u8 {
        self.registers.get_delay_timer()
    }

    pub fn sound_timer(&self) -> u8 {
        self.registers.get_sound_timer()
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn memory_byte(&self, address: u16) -> Result<u8> {
        self.memory.get_byte(address)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
