#[cfg(test)]
mod tests {
    use crate::{Key, KeyPress, Keyboard, Mouse, MouseButton};

    fn num_lock() -> KeyPress {
        KeyPress::new(Key::Keypad0).locks(true, false, false)
    }

    // ── KeyPress::to_char ───────────────────────

    #[test]
    fn test_letters_follow_shift_xor_caps() {
        assert_eq!(KeyPress::new(Key::A).to_char(), Some('a'));
        assert_eq!(KeyPress::new(Key::A).shift().to_char(), Some('A'));
        let caps = KeyPress::new(Key::Q).locks(false, true, false);
        assert_eq!(caps.to_char(), Some('Q'));
        assert_eq!(caps.shift().to_char(), Some('q'));
        assert_eq!(KeyPress::new(Key::Z).to_char(), Some('z'));
    }

    #[test]
    fn test_number_row_shifted_symbols() {
        assert_eq!(KeyPress::new(Key::Number0).to_char(), Some('0'));
        assert_eq!(KeyPress::new(Key::Number7).to_char(), Some('7'));
        assert_eq!(KeyPress::new(Key::Number2).shift().to_char(), Some('@'));
        assert_eq!(KeyPress::new(Key::Number9).shift().to_char(), Some('('));
    }

    #[test]
    fn test_keypad_digits_need_num_lock() {
        assert_eq!(KeyPress::new(Key::Keypad3).to_char(), None);
        let mut press = num_lock();
        for (i, key) in [Key::Keypad0, Key::Keypad2, Key::Keypad3, Key::Keypad9]
            .into_iter()
            .enumerate()
        {
            press.key = key;
            assert_eq!(press.to_char(), Some(['0', '2', '3', '9'][i]));
        }
        press.key = Key::KeypadDecimal;
        assert_eq!(press.to_char(), Some('.'));
        assert_eq!(KeyPress::new(Key::KeypadDecimal).to_char(), None);
    }

    #[test]
    fn test_keypad_operators_always_map() {
        assert_eq!(KeyPress::new(Key::KeypadPlus).to_char(), Some('+'));
        assert_eq!(KeyPress::new(Key::KeypadMinus).to_char(), Some('-'));
        assert_eq!(KeyPress::new(Key::KeypadMultiply).to_char(), Some('*'));
        assert_eq!(KeyPress::new(Key::KeypadDivide).to_char(), Some('/'));
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(KeyPress::new(Key::Plus).to_char(), Some('='));
        assert_eq!(KeyPress::new(Key::Plus).shift().to_char(), Some('+'));
        assert_eq!(KeyPress::new(Key::Quote).shift().to_char(), Some('"'));
        assert_eq!(KeyPress::new(Key::Grave).shift().to_char(), Some('~'));
        assert_eq!(KeyPress::new(Key::Space).shift().to_char(), Some(' '));
    }

    #[test]
    fn test_non_printing_keys() {
        for key in [Key::Escape, Key::Enter, Key::Up, Key::F5, Key::Delete] {
            assert_eq!(KeyPress::new(key).to_char(), None, "{:?}", key);
        }
    }

    #[test]
    fn test_equality_ignores_locks() {
        let plain = KeyPress::new(Key::Up);
        assert_eq!(plain, KeyPress::new(Key::Up).locks(true, true, true));
        assert_ne!(plain, KeyPress::new(Key::Up).shift());
        assert_ne!(plain, KeyPress::new(Key::Up).repeating());
        assert_ne!(plain, KeyPress::new(Key::Down));
    }

    // ── Keyboard ────────────────────────────────

    #[test]
    fn test_keyboard_take_consumes() {
        let mut keyboard = Keyboard::new();
        assert!(keyboard.take().is_none());
        keyboard.push(KeyPress::new(Key::Left));
        assert_eq!(keyboard.peek().map(|p| p.key), Some(Key::Left));
        assert_eq!(keyboard.take().map(|p| p.key), Some(Key::Left));
        assert!(keyboard.take().is_none());
    }

    #[test]
    fn test_keyboard_keeps_latest_press() {
        let mut keyboard = Keyboard::new();
        keyboard.push(KeyPress::new(Key::Left));
        keyboard.push(KeyPress::new(Key::Right).control());
        let press = keyboard.take().unwrap();
        assert_eq!(press.key, Key::Right);
        assert!(press.control);
    }

    // ── Mouse ───────────────────────────────────

    #[test]
    fn test_mouse_maps_pixels_to_cells() {
        let mut mouse = Mouse::new(8, 12, 1.0);
        mouse.on_move(17.0, 25.0);
        assert_eq!(mouse.position(), (2, 2));
        mouse.on_move(7.9, 11.9);
        assert_eq!(mouse.position(), (0, 0));
    }

    #[test]
    fn test_mouse_calibrate_offset_and_scale() {
        let mut mouse = Mouse::new(8, 8, 1.0);
        mouse.calibrate(8, 8, 20, 30, 2.0);
        mouse.on_move(20.0 + 16.0 * 3.0, 30.0 + 16.0 * 5.0 + 1.0);
        assert_eq!(mouse.position(), (3, 5));
        mouse.on_move(10.0, 10.0);
        assert_eq!(mouse.position(), (-1, -2));
    }

    #[test]
    fn test_mouse_invalid_scale_falls_back() {
        let mut mouse = Mouse::new(8, 8, 0.0);
        mouse.on_move(16.0, 16.0);
        assert_eq!(mouse.position(), (2, 2));
    }

    #[test]
    fn test_mouse_click_latches_once() {
        let mut mouse = Mouse::new(8, 8, 1.0);
        assert!(!mouse.take_left_click());

        mouse.on_press(MouseButton::Left);
        assert!(mouse.left_pressed());
        assert!(!mouse.take_left_click());

        mouse.on_release(MouseButton::Left);
        assert!(!mouse.left_pressed());
        assert!(mouse.take_left_click());
        assert!(!mouse.take_left_click());
    }

    #[test]
    fn test_mouse_press_cancels_pending_click() {
        let mut mouse = Mouse::new(8, 8, 1.0);
        mouse.on_press(MouseButton::Right);
        mouse.on_release(MouseButton::Right);
        mouse.on_press(MouseButton::Right);
        assert!(mouse.right_pressed());
        assert!(!mouse.take_right_click());
        assert!(!mouse.take_left_click());
    }
}
