use crate::constants::NUM_KEYS;
use crate::error::{MachineError, Result};

/// The hexadecimal keypad, 0x0 through 0xF. Whatever polls the real keyboard updates it, the
/// machine only reads it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    /// set to true when pressed, false otherwise
    keys: [bool; NUM_KEYS as usize],
}

impl Keypad {
    pub fn set(&mut self, key: u8, pressed: bool) -> Result<()> {
        let state = self
            .keys
            .get_mut(key as usize)
            .ok_or(MachineError::InvalidKey(key))?;
        *state = pressed;
        Ok(())
    }

    /// Instructions name keys by register value, so only the low nibble counts
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    /// The lowest key that is currently held down
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys
            .iter()
            .position(|pressed| *pressed)
            .map(|key| key as u8)
    }

    pub fn release_all(&mut self) {
        self.keys = [false; NUM_KEYS as usize];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_presses_and_releases() {
        let mut keypad = Keypad::default();
        keypad.set(0xA, true).unwrap();
        assert!(keypad.is_pressed(0xA));
        keypad.set(0xA, false).unwrap();
        assert!(!keypad.is_pressed(0xA));
    }

    #[test]
    fn rejects_keys_past_f() {
        let mut keypad = Keypad::default();
        assert!(matches!(keypad.set(0x10, true), Err(MachineError::InvalidKey(0x10))));
    }

    #[test]
    fn first_pressed_is_the_lowest() {
        let mut keypad = Keypad::default();
        assert_eq!(keypad.first_pressed(), None);
        keypad.set(0xC, true).unwrap();
        keypad.set(0x3, true).unwrap();
        assert_eq!(keypad.first_pressed(), Some(0x3));
        keypad.release_all();
        assert_eq!(keypad.first_pressed(), None);
    }
}
