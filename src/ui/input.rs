//! Keyboard and button state shared between the host's event callbacks and the game loop.
//!
//! Callbacks only flip flags; the game loop reads the whole set once at the start of a tick.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Jump,
}

/// Translate a key as reported by the host (`KeyboardEvent.key` or `.code` in a browser) into a
/// control. `W`, `A`, `S`, `D` move, space jumps.
pub fn key_to_control(key: &str) -> Option<Control> {
    match key {
        "w" | "W" => Some(Control::Up),
        "s" | "S" => Some(Control::Down),
        "a" | "A" => Some(Control::Left),
        "d" | "D" => Some(Control::Right),
        " " | "Space" => Some(Control::Jump),
        _ => None,
    }
}

impl InputFlags {
    /// Flags with every control named in `keys` held down, one key per character.
    pub fn held(keys: &str) -> Self {
        let mut flags = Self::default();
        for c in keys.chars() {
            if let Some(control) = key_to_control(c.encode_utf8(&mut [0; 4])) {
                flags.set(control, true);
            }
        }
        flags
    }

    pub fn set(&mut self, control: Control, is_pressed: bool) {
        match control {
            Control::Up => self.up = is_pressed,
            Control::Down => self.down = is_pressed,
            Control::Left => self.left = is_pressed,
            Control::Right => self.right = is_pressed,
            Control::Jump => self.jump = is_pressed,
        }
    }

    /// Returns `false` if the key is not bound to any control.
    pub fn key_down(&mut self, key: &str) -> bool {
        key_to_control(key).map_or(false, |control| {
            self.set(control, true);
            true
        })
    }

    /// Returns `false` if the key is not bound to any control.
    pub fn key_up(&mut self, key: &str) -> bool {
        key_to_control(key).map_or(false, |control| {
            self.set(control, false);
            true
        })
    }

    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}
