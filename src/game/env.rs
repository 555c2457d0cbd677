use crate::game::lang::Language;
use crate::ui::input::InputFlags;

use std::sync::{Mutex, MutexGuard, PoisonError};

lazy_static! {
    static ref GAME_ENV: Mutex<GameEnv> = Mutex::new(GameEnv::new());
}

pub fn env<'a>() -> MutexGuard<'a, GameEnv> {
    GAME_ENV.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Debug, Default)]
pub struct GameEnv {
    /// if true: run cuboid in debug mode
    pub is_debug_mode: bool,
    /// optional tick limit for headless runs
    pub tick_limit: Option<u64>,
    /// language to start in, skipping the menu
    pub language: Option<Language>,
    /// stage file to play instead of the built-in stages
    pub stage_path: Option<String>,
    /// controls held down for the whole run
    pub held: InputFlags,
    /// restore the saved game before the first tick
    pub load_on_start: bool,
    /// store the game after the last tick
    pub save_on_exit: bool,
}

impl GameEnv {
    pub fn new() -> Self {
        GameEnv {
            is_debug_mode: false,
            tick_limit: None,
            language: None,
            stage_path: None,
            held: InputFlags::default(),
            load_on_start: false,
            save_on_exit: false,
        }
    }

    pub fn set_debug_mode(&mut self, debug_mode: bool) {
        self.is_debug_mode = debug_mode;
    }

    pub fn set_tick_limit(&mut self, limit: u64) {
        self.tick_limit = Some(limit);
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = Some(language);
    }

    pub fn set_stage_path<T: Into<String>>(&mut self, path: T) {
        self.stage_path = Some(path.into());
    }

    pub fn set_held(&mut self, held: InputFlags) {
        self.held = held;
    }

    pub fn set_load_on_start(&mut self, load: bool) {
        self.load_on_start = load;
    }

    pub fn set_save_on_exit(&mut self, save: bool) {
        self.save_on_exit = save;
    }
}
