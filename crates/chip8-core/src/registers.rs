use crate::constants::{ADDRESS_MASK, FLAG_REGISTER, NUM_REGISTERS};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
///# Holds all the registers and the sound and delay timers
pub struct Registers {
    /// v0 through vF, vF is also written by arithmetic, shifts and sprite drawing
    register: [u8; NUM_REGISTERS as usize],
    /// Only the lowest 12 bits are kept, it always points somewhere in ram
    vindex: u16,
    /// 0 by default, unless its set to a number then it will just start decrementing by one 60
    /// times per second
    delay_timer: u8,
    /// Also 0, and decremented with 60hz when set to a number like the delay timer. Except the
    /// sound timer causes a beep when its not zero. So: quiet when 0, beeping when not 0
    sound_timer: u8,
}

impl Registers {
    pub fn set_index_register(&mut self, value: u16) {
        self.vindex = value & ADDRESS_MASK;
    }
    pub fn get_index_register(&self) -> u16 {
        self.vindex
    }
    pub fn set_sound_timer(&mut self, value: u8) {
        self.sound_timer = value;
    }
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer
    }
    pub fn set_delay_timer(&mut self, value: u8) {
        self.delay_timer = value;
    }
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer
    }
    /// Counts both timers down by one, neither goes below 0
    pub fn decrement_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    /// Register selectors come from a single nibble, so only the low 4 bits are looked at
    pub fn get_register(&self, register: u8) -> u8 {
        self.register[(register & 0xF) as usize]
    }
    pub fn set_register(&mut self, register: u8, value: u8) {
        self.register[(register & 0xF) as usize] = value;
    }
    pub fn set_flag(&mut self, flag: bool) {
        self.set_register(FLAG_REGISTER, u8::from(flag));
    }
    pub fn all(&self) -> &[u8; NUM_REGISTERS as usize] {
        &self.register
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_register_keeps_12_bits() {
        let mut registers = Registers::default();
        registers.set_index_register(0xFABC);
        assert_eq!(registers.get_index_register(), 0x0ABC);
    }

    #[test]
    fn timers_stop_at_zero() {
        let mut registers = Registers::default();
        registers.set_delay_timer(2);
        registers.set_sound_timer(1);
        registers.decrement_timers();
        assert_eq!(registers.get_delay_timer(), 1);
        assert_eq!(registers.get_sound_timer(), 0);
        registers.decrement_timers();
        registers.decrement_timers();
        assert_eq!(registers.get_delay_timer(), 0);
        assert_eq!(registers.get_sound_timer(), 0);
    }

    #[test]
    fn flag_register_is_vf() {
        let mut registers = Registers::default();
        registers.set_flag(true);
        assert_eq!(registers.get_register(0xF), 1);
        registers.set_flag(false);
        assert_eq!(registers.all()[15], 0);
    }
}
