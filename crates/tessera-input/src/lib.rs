// Decoded keyboard and mouse state.
// Windowing backends translate their own events into `KeyPress` and
// pixel-space mouse calls; the game loop polls the latches once per frame.

mod tests;

// ──────────────────────────────────────────────
// Keys
// ──────────────────────────────────────────────

/// Physical keys, US layout.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Number0, Number1, Number2, Number3, Number4,
    Number5, Number6, Number7, Number8, Number9,
    Keypad0, Keypad1, Keypad2, Keypad3, Keypad4,
    Keypad5, Keypad6, Keypad7, Keypad8, Keypad9,
    KeypadPlus,
    KeypadMinus,
    KeypadMultiply,
    KeypadDivide,
    KeypadDecimal,
    KeypadEnter,
    BackSlash,
    BracketLeft,
    BracketRight,
    Comma,
    Grave,
    Period,
    /// The `=`/`+` key.
    Plus,
    Minus,
    Quote,
    Semicolon,
    Slash,
    #[default]
    Space,
    Enter,
    Escape,
    Tab,
    BackSpace,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
}

#[rustfmt::skip]
const LETTERS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

#[rustfmt::skip]
const NUMBERS: [Key; 10] = [
    Key::Number0, Key::Number1, Key::Number2, Key::Number3, Key::Number4,
    Key::Number5, Key::Number6, Key::Number7, Key::Number8, Key::Number9,
];

#[rustfmt::skip]
const KEYPAD_DIGITS: [Key; 10] = [
    Key::Keypad0, Key::Keypad1, Key::Keypad2, Key::Keypad3, Key::Keypad4,
    Key::Keypad5, Key::Keypad6, Key::Keypad7, Key::Keypad8, Key::Keypad9,
];

/// Shifted symbols on the number row, indexed by digit.
const NUMBER_SHIFTED: [char; 10] = [')', '!', '@', '#', '$', '%', '^', '&', '*', '('];

/// A single key-down event with its modifier and lock state.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyPress {
    pub key: Key,
    pub alt: bool,
    pub shift: bool,
    pub control: bool,
    pub repeating: bool,
    pub num_lock: bool,
    pub caps_lock: bool,
    pub scroll_lock: bool,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            ..Default::default()
        }
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn control(mut self) -> Self {
        self.control = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn repeating(mut self) -> Self {
        self.repeating = true;
        self
    }

    /// Set the lock-key state: (num, caps, scroll).
    pub fn locks(mut self, num_lock: bool, caps_lock: bool, scroll_lock: bool) -> Self {
        self.num_lock = num_lock;
        self.caps_lock = caps_lock;
        self.scroll_lock = scroll_lock;
        self
    }

    /// The character this key press types, if any.
    pub fn to_char(&self) -> Option<char> {
        let key = self.key;
        if let Some(i) = LETTERS.iter().position(|&k| k == key) {
            let c = (b'a' + i as u8) as char;
            return Some(if self.shift ^ self.caps_lock {
                c.to_ascii_uppercase()
            } else {
                c
            });
        }
        if let Some(i) = NUMBERS.iter().position(|&k| k == key) {
            return Some(if self.shift {
                NUMBER_SHIFTED[i]
            } else {
                (b'0' + i as u8) as char
            });
        }
        if let Some(i) = KEYPAD_DIGITS.iter().position(|&k| k == key) {
            return self.num_lock.then(|| (b'0' + i as u8) as char);
        }

        let (plain, shifted) = match key {
            Key::KeypadPlus => return Some('+'),
            Key::KeypadMinus => return Some('-'),
            Key::KeypadMultiply => return Some('*'),
            Key::KeypadDivide => return Some('/'),
            Key::KeypadDecimal => return self.num_lock.then_some('.'),
            Key::BackSlash => ('\\', '|'),
            Key::BracketLeft => ('[', '{'),
            Key::BracketRight => (']', '}'),
            Key::Comma => (',', '<'),
            Key::Grave => ('`', '~'),
            Key::Period => ('.', '>'),
            Key::Plus => ('=', '+'),
            Key::Minus => ('-', '_'),
            Key::Quote => ('\'', '"'),
            Key::Semicolon => (';', ':'),
            Key::Slash => ('/', '?'),
            Key::Space => (' ', ' '),
            _ => return None,
        };
        Some(if self.shift { shifted } else { plain })
    }
}

/// Two presses are the same press regardless of lock-key state.
impl PartialEq for KeyPress {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.alt == other.alt
            && self.shift == other.shift
            && self.control == other.control
            && self.repeating == other.repeating
    }
}

impl Eq for KeyPress {}

// ──────────────────────────────────────────────
// Keyboard
// ──────────────────────────────────────────────

/// Latches the most recent key press until the game loop takes it.
#[derive(Debug, Default)]
pub struct Keyboard {
    pending: Option<KeyPress>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down event. A newer press replaces an untaken one.
    pub fn push(&mut self, press: KeyPress) {
        if self.pending.as_ref() != Some(&press) {
            log::trace!("Key press {:?}", press.key);
        }
        self.pending = Some(press);
    }

    /// Return and clear the latched press.
    pub fn take(&mut self) -> Option<KeyPress> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<&KeyPress> {
        self.pending.as_ref()
    }
}

// ──────────────────────────────────────────────
// Mouse
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Mouse position in cells plus per-button press and click latches.
#[derive(Debug, Clone)]
pub struct Mouse {
    x: i32,
    y: i32,
    left_pressed: bool,
    right_pressed: bool,
    left_click: bool,
    right_click: bool,
    cell_width: f32,
    cell_height: f32,
    offset_x: f32,
    offset_y: f32,
    scale: f32,
}

impl Mouse {
    pub fn new(cell_width: u32, cell_height: u32, scale: f32) -> Self {
        let mut mouse = Self {
            x: 0,
            y: 0,
            left_pressed: false,
            right_pressed: false,
            left_click: false,
            right_click: false,
            cell_width: 1.0,
            cell_height: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        };
        mouse.calibrate(cell_width, cell_height, 0, 0, scale);
        mouse
    }

    /// Update the pixel-to-cell mapping after a resize or atlas reload.
    /// `offset` is where the grid's top-left corner sits in the window.
    pub fn calibrate(&mut self, cell_width: u32, cell_height: u32, offset_x: i32, offset_y: i32, scale: f32) {
        self.cell_width = cell_width.max(1) as f32;
        self.cell_height = cell_height.max(1) as f32;
        self.offset_x = offset_x as f32;
        self.offset_y = offset_y as f32;
        self.scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        log::debug!(
            "Mouse calibrated: cell {}x{} at scale {} offset ({}, {})",
            cell_width,
            cell_height,
            self.scale,
            offset_x,
            offset_y
        );
    }

    /// Cursor moved to window pixel `(px, py)`. Positions left of or above
    /// the grid map to negative cells.
    pub fn on_move(&mut self, px: f32, py: f32) {
        self.x = ((px - self.offset_x) / (self.cell_width * self.scale)).floor() as i32;
        self.y = ((py - self.offset_y) / (self.cell_height * self.scale)).floor() as i32;
    }

    pub fn on_press(&mut self, button: MouseButton) {
        match button {
            MouseButton::Left => {
                self.left_pressed = true;
                self.left_click = false;
            }
            MouseButton::Right => {
                self.right_pressed = true;
                self.right_click = false;
            }
            MouseButton::Middle => {}
        }
    }

    /// A release completes a click.
    pub fn on_release(&mut self, button: MouseButton) {
        match button {
            MouseButton::Left => {
                self.left_pressed = false;
                self.left_click = true;
            }
            MouseButton::Right => {
                self.right_pressed = false;
                self.right_click = true;
            }
            MouseButton::Middle => {}
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn left_pressed(&self) -> bool {
        self.left_pressed
    }

    pub fn right_pressed(&self) -> bool {
        self.right_pressed
    }

    /// True once per completed left click.
    pub fn take_left_click(&mut self) -> bool {
        std::mem::take(&mut self.left_click)
    }

    /// True once per completed right click.
    pub fn take_right_click(&mut self) -> bool {
        std::mem::take(&mut self.right_click)
    }
}
