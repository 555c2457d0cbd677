use crate::game::consts;

/// Context hints shown below the main text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    Key,
    DoorLocked,
    DoorUnlocked,
}

impl Hint {
    /// Key into the localization table.
    pub const fn lang_key(self) -> &'static str {
        match self {
            Self::Key => "hint_key",
            Self::DoorLocked => "hint_door_locked",
            Self::DoorUnlocked => "hint_door_unlocked",
        }
    }
}

/// Pick the hint for the player's surroundings. The key hint takes precedence over the door
/// hints; an object that is not in the scene has no distance.
pub fn choose_hint(
    has_key: bool,
    key_distance: Option<f32>,
    door_distance: Option<f32>,
) -> Option<Hint> {
    if !has_key && key_distance.map_or(false, |d| d < consts::KEY_HINT_DISTANCE) {
        return Some(Hint::Key);
    }
    if door_distance.map_or(false, |d| d < consts::DOOR_HINT_DISTANCE) {
        return Some(if has_key {
            Hint::DoorUnlocked
        } else {
            Hint::DoorLocked
        });
    }
    None
}

/// Text overlay: one headline and one hint line. `require_refresh` is raised whenever either
/// changes and lowered by whoever draws the overlay.
#[derive(Debug, Default, Clone)]
pub struct Hud {
    text: String,
    hint: String,
    pub require_refresh: bool,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn set_text<T: Into<String>>(&mut self, text: T) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.require_refresh = true;
        }
    }

    pub fn set_hint<T: Into<String>>(&mut self, hint: T) {
        let hint = hint.into();
        if hint != self.hint {
            self.hint = hint;
            self.require_refresh = true;
        }
    }
}
