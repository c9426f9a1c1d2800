use macroquad::input::KeyCode;

/// The left-hand side of a qwerty keyboard, laid out like the COSMAC VIP keypad:
///
/// ```text
/// 1 2 3 C      1 2 3 4
/// 4 5 6 D      Q W E R
/// 7 8 9 E  <-  A S D F
/// A 0 B F      Z X C V
/// ```
pub const KEYMAP: [(KeyCode, u8); 16] = [
    (KeyCode::X, 0x0),
    (KeyCode::Key1, 0x1),
    (KeyCode::Key2, 0x2),
    (KeyCode::Key3, 0x3),
    (KeyCode::Q, 0x4),
    (KeyCode::W, 0x5),
    (KeyCode::E, 0x6),
    (KeyCode::A, 0x7),
    (KeyCode::S, 0x8),
    (KeyCode::D, 0x9),
    (KeyCode::Z, 0xA),
    (KeyCode::C, 0xB),
    (KeyCode::Key4, 0xC),
    (KeyCode::R, 0xD),
    (KeyCode::F, 0xE),
    (KeyCode::V, 0xF),
];

#[cfg(test)]
mod tests {
    use super::*;
    use chip8_core::NUM_KEYS;

    #[test]
    fn every_keypad_key_is_mapped_once() {
        for index in 0..NUM_KEYS {
            let mapped = KEYMAP.iter().filter(|(_, key)| *key == index).count();
            assert_eq!(mapped, 1, "key {index:X}");
        }
    }

    #[test]
    fn maps_the_corners() {
        let key_for = |code: KeyCode| {
            KEYMAP
                .iter()
                .find(|(keycode, _)| *keycode == code)
                .map(|(_, key)| *key)
        };
        assert_eq!(key_for(KeyCode::Key1), Some(0x1));
        assert_eq!(key_for(KeyCode::Key4), Some(0xC));
        assert_eq!(key_for(KeyCode::Z), Some(0xA));
        assert_eq!(key_for(KeyCode::V), Some(0xF));
        assert_eq!(key_for(KeyCode::Escape), None);
    }
}
