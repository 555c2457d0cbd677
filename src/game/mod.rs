//! The top level representation of the game. Here the scene is built from a stage, the rules are
//! applied and the game loop is executed one tick at a time.

pub mod config;
pub mod consts;
pub mod env;
mod error;
pub mod lang;
pub mod msg;
pub mod save;
mod scene;

pub use config::SceneConfig;
pub use env::env;
pub use error::GameError;
pub use lang::{Language, LanguageManager};
pub use scene::Scene;

use crate::entity::{GameObject, IdAllocator, ObjectId};
use crate::game::msg::{Log, MessageLog, MsgClass};
use crate::game::save::{SaveState, Storage};
use crate::physics::{self, Contact};
use crate::render::{pointer_to_ndc, Camera, Renderer};
use crate::ui::hud::{self, Hud};
use crate::ui::input::InputFlags;
use crate::util::timer::{self, Timer};

use cgmath::{Vector2, Vector3};
use core::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Waiting for the player to choose a language.
    MainMenu,
    Playing,
    Won,
    Lost,
}

impl Display for RunState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MainMenu => write!(f, "MainMenu"),
            Self::Playing => write!(f, "Playing"),
            Self::Won => write!(f, "Won"),
            Self::Lost => write!(f, "Lost"),
        }
    }
}

/// What a click on the scene did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Nothing,
    Key,
    ChestLocked,
    ChestOpened,
}

pub struct Game {
    scene: Scene,
    camera: Camera,
    input: InputFlags,
    lang: LanguageManager,
    hud: Hud,
    log: Log,
    run_state: RunState,
    stages: Vec<SceneConfig>,
    stage: usize,
    has_key: bool,
    camera_offset_x: f32,
    ticks: u64,
    tick_timer: Timer,
    /// Keep track of the time to warn if the game runs too slow.
    slowest_tick: u128,
}

impl Game {
    /// Set up the first of `stages`. The game starts in the main menu.
    pub fn new(stages: Vec<SceneConfig>) -> Result<Self, GameError> {
        let first = stages
            .first()
            .ok_or_else(|| GameError::Config("no stages to play".to_string()))?;
        for stage in &stages {
            stage.validate()?;
        }
        let scene = Scene::from_config(first, IdAllocator::new())?;
        let lang = LanguageManager::new()?;
        let mut hud = Hud::new();
        hud.set_text(lang.get("title"));

        Ok(Game {
            scene,
            camera: Camera::new(consts::VIEWPORT_WIDTH / consts::VIEWPORT_HEIGHT),
            input: InputFlags::default(),
            lang,
            hud,
            log: Log::new(),
            run_state: RunState::MainMenu,
            stages,
            stage: 0,
            has_key: false,
            camera_offset_x: 0.0,
            ticks: 0,
            tick_timer: Timer::new("game loop"),
            slowest_tick: 0,
        })
    }

    /// A game over the stages shipped with the crate.
    pub fn with_builtin_stages() -> Result<Self, GameError> {
        Self::new(config::builtin_stages()?)
    }

    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub const fn input(&self) -> &InputFlags {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputFlags {
        &mut self.input
    }

    pub const fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn hud_mut(&mut self) -> &mut Hud {
        &mut self.hud
    }

    pub const fn log(&self) -> &Log {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut Log {
        &mut self.log
    }

    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    pub const fn stage(&self) -> usize {
        self.stage
    }

    pub const fn has_key(&self) -> bool {
        self.has_key
    }

    pub const fn camera_offset_x(&self) -> f32 {
        self.camera_offset_x
    }

    pub const fn language(&self) -> Language {
        self.lang.language()
    }

    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Slowest tick so far, in nanoseconds.
    pub const fn slowest_tick(&self) -> u128 {
        self.slowest_tick
    }

    /// Localized text for `key` in the current language.
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.lang.get(key)
    }

    /// Leave the main menu in the chosen language. Has no effect once the game is running.
    pub fn start(&mut self, language: Language) {
        if self.run_state != RunState::MainMenu {
            debug!("start ignored in run state {}", self.run_state);
            return;
        }
        self.run_state = RunState::Playing;
        self.set_language(language);
        info!("starting stage {} in {}", self.stage, language);
    }

    pub fn set_language(&mut self, language: Language) {
        self.lang.set_language(language);
        let headline = match self.run_state {
            RunState::MainMenu => "title",
            RunState::Playing => "goal",
            RunState::Won => "won",
            RunState::Lost => "lost",
        };
        self.hud.set_text(self.lang.get(headline));
        self.update_hint();
    }

    /// Returns `false` if the key is not bound to a control.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.key_down(key)
    }

    /// Returns `false` if the key is not bound to a control.
    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.key_up(key)
    }

    /// Central function of the game.
    /// - apply input to the player
    /// - step the physics and apply the rules to the result
    /// - render the scene
    pub fn tick(&mut self, renderer: &mut dyn Renderer) {
        if self.run_state == RunState::Playing {
            self.update();
        }
        renderer.render(&self.scene, &self.camera);
        self.keep_time();
    }

    fn update(&mut self) {
        let input = self.input;
        if let Some(player) = self.scene.player_mut() {
            player.process_input(&input);
        }

        let contacts = self.scene.step(physics::FIXED_STEP);
        self.process_contacts(&contacts);
        self.scene.update_meshes();
        self.ticks += 1;

        if self.is_guarded_object_out_of_bounds() {
            self.lose();
            return;
        }
        self.shift_camera();
        self.update_hint();
    }

    /// Turn the contacts of the last step into ground notifications and open the door if the
    /// player pushes against it with the key.
    fn process_contacts(&mut self, contacts: &[Contact]) {
        let Some(player_id) = self.scene.player_id() else {
            return;
        };
        let door_id = self.scene.id_of(consts::DOOR_NAME);

        let mut is_on_ground = false;
        let mut touches_door = false;
        for contact in contacts {
            if let Some(normal) = contact.normal_towards(player_id) {
                is_on_ground |= normal.y > consts::GROUND_NORMAL_MIN_Y;
                touches_door |= door_id.is_some() && contact.other(player_id) == door_id;
            }
        }

        if is_on_ground {
            if let Some(ctrl) = self.scene.player_mut().and_then(|p| p.player_mut()) {
                ctrl.notify_ground_contact();
            }
        }
        if touches_door && self.has_key {
            self.unlock_door();
        }
    }

    fn unlock_door(&mut self) {
        if let Some(id) = self.scene.id_of(consts::DOOR_NAME) {
            self.scene.remove_game_object(id);
            self.message("door_unlocked", MsgClass::Event);
        }
    }

    fn guarded_ids(&self) -> Vec<ObjectId> {
        self.stages[self.stage]
            .guarded_names()
            .into_iter()
            .filter_map(|name| self.scene.id_of(name))
            .collect()
    }

    fn is_guarded_object_out_of_bounds(&self) -> bool {
        self.guarded_ids()
            .into_iter()
            .filter_map(|id| self.scene.get(id))
            .any(|object| !is_in_bounds(object.position()))
    }

    fn lose(&mut self) {
        self.run_state = RunState::Lost;
        self.hud.set_text(self.lang.get("lost"));
        self.hud.set_hint("");
        info!("game lost after {} ticks", self.ticks);
    }

    fn win(&mut self) {
        self.run_state = RunState::Won;
        let mut ids = self.guarded_ids();
        ids.extend(self.scene.player_id());
        for id in ids {
            if let Some(object) = self.scene.get_mut(id) {
                object.body.halt();
            }
        }
        self.hud.set_text(self.lang.get("won"));
        self.hud.set_hint("");
        self.message("chest_opened", MsgClass::Event);
        info!("game won after {} ticks", self.ticks);
    }

    /// Move the camera by one room whenever the player leaves the current one sideways.
    fn shift_camera(&mut self) {
        let Some(player) = self.scene.player() else {
            return;
        };
        let x = player.position().x;
        if x > self.camera_offset_x + consts::BOUNDS_MAX_X {
            self.camera_offset_x += consts::CAMERA_SHIFT_X;
            debug!("camera moved right to {}", self.camera_offset_x);
        }
        if x < self.camera_offset_x + consts::BOUNDS_MIN_X {
            self.camera_offset_x -= consts::CAMERA_SHIFT_X;
            debug!("camera moved left to {}", self.camera_offset_x);
        }
        self.camera.position.x = self.camera_offset_x;
    }

    fn update_hint(&mut self) {
        let hint = self.scene.player().and_then(|player| {
            let distance_to = |name: &str| {
                self.scene
                    .get_game_object_by_name(name)
                    .map(|object| player.distance_to(object))
            };
            hud::choose_hint(
                self.has_key,
                distance_to(consts::KEY_NAME),
                distance_to(consts::DOOR_NAME),
            )
        });
        let text = hint.map_or("", |hint| self.lang.get(hint.lang_key()));
        self.hud.set_hint(text);
    }

    fn message(&mut self, key: &str, class: MsgClass) {
        let text = self.lang.get(key).to_string();
        info!("{}", text);
        self.log.add(text, class);
    }

    /// Handle a click at normalized device coordinates: pick up the key or try to open the chest.
    pub fn click(&mut self, ndc: Vector2<f32>) -> Result<Pick, GameError> {
        if self.run_state != RunState::Playing {
            return Ok(Pick::Nothing);
        }
        let ray = self.camera.ray_from_pointer(ndc);
        let is_hit = |name: &str| {
            self.scene
                .get_game_object_by_name(name)
                .filter(|object| object.mesh.visible)
                .and_then(|object| object.mesh.intersect(&ray))
                .is_some()
        };

        if is_hit(consts::KEY_NAME) {
            if let Some(id) = self.scene.id_of(consts::KEY_NAME) {
                self.scene.remove_game_object(id);
            }
            self.has_key = true;
            self.message("key_picked", MsgClass::Event);
            self.update_hint();
            return Ok(Pick::Key);
        }

        if is_hit(consts::CHEST_NAME) {
            if !self.has_key {
                self.message("chest_locked", MsgClass::Alert);
                return Ok(Pick::ChestLocked);
            }
            self.complete_stage()?;
            return Ok(Pick::ChestOpened);
        }
        Ok(Pick::Nothing)
    }

    /// Handle a click at pixel coordinates inside a viewport of the given size.
    pub fn click_at(
        &mut self,
        offset_x: f32,
        offset_y: f32,
        width: f32,
        height: f32,
    ) -> Result<Pick, GameError> {
        self.click(pointer_to_ndc(offset_x, offset_y, width, height))
    }

    fn complete_stage(&mut self) -> Result<(), GameError> {
        let next = self.stage + 1;
        if next < self.stages.len() {
            self.load_stage(next)?;
            self.message("stage_complete", MsgClass::Event);
        } else {
            self.win();
        }
        Ok(())
    }

    /// Replace the current scene with a fresh one built from stage `stage`. Ids continue from the
    /// old scene; key, camera and hints are reset.
    pub fn load_stage(&mut self, stage: usize) -> Result<(), GameError> {
        let config = self
            .stages
            .get(stage)
            .ok_or_else(|| GameError::Config(format!("there is no stage {}", stage)))?;

        self.scene.clear_scene();
        let ids = std::mem::take(&mut self.scene).into_ids();
        self.scene = Scene::from_config(config, ids)?;

        self.stage = stage;
        self.has_key = false;
        self.camera_offset_x = 0.0;
        self.camera.position.x = 0.0;
        if self.run_state == RunState::Playing {
            self.hud.set_text(self.lang.get("goal"));
        }
        self.update_hint();
        info!("entered stage {}", stage);
        Ok(())
    }

    /// Snapshot of the progress in the current stage.
    pub fn save_state(&self) -> SaveState {
        let position = |object: Option<&GameObject>| {
            object.map_or([0.0; 3], |o| o.position().into())
        };
        SaveState {
            stage: self.stage,
            player: position(self.scene.player()),
            cubes: self.stages[self.stage]
                .tracked_names()
                .into_iter()
                .map(|name| position(self.scene.get_game_object_by_name(name)))
                .collect(),
            has_key: self.has_key,
            camera_offset_x: self.camera_offset_x,
            language: self.lang.language(),
        }
    }

    pub fn save(&mut self, storage: &mut dyn Storage) -> Result<(), GameError> {
        save::save_game(storage, &self.save_state())?;
        self.message("saved", MsgClass::Info);
        Ok(())
    }

    /// Restore the saved game. Returns `Ok(false)` and leaves the game untouched if nothing has
    /// been saved.
    pub fn load(&mut self, storage: &dyn Storage) -> Result<bool, GameError> {
        match save::load_game(storage)? {
            Some(state) => {
                self.apply_save_state(&state)?;
                self.message("loaded", MsgClass::Info);
                Ok(true)
            }
            None => {
                warn!("no saved game found");
                self.message("no_save", MsgClass::Alert);
                Ok(false)
            }
        }
    }

    /// Rebuild the saved stage and move everything to where it was. The save is checked against
    /// the stage before anything is changed.
    pub fn apply_save_state(&mut self, state: &SaveState) -> Result<(), GameError> {
        let config = self.stages.get(state.stage).ok_or_else(|| {
            GameError::SaveMismatch(format!("there is no stage {}", state.stage))
        })?;
        let tracked = config.tracked_names().len();
        if tracked != state.cubes.len() {
            return Err(GameError::SaveMismatch(format!(
                "{} tracked positions for {} tracked boxes",
                state.cubes.len(),
                tracked
            )));
        }

        self.load_stage(state.stage)?;
        let tracked_ids: Vec<Option<ObjectId>> = self.stages[state.stage]
            .tracked_names()
            .into_iter()
            .map(|name| self.scene.id_of(name))
            .collect();
        for (id, position) in tracked_ids.into_iter().zip(&state.cubes) {
            if let Some(object) = id.and_then(|id| self.scene.get_mut(id)) {
                place(object, *position);
            }
        }
        if let Some(player) = self.scene.player_mut() {
            place(player, state.player);
        }
        if state.has_key {
            if let Some(id) = self.scene.id_of(consts::KEY_NAME) {
                self.scene.remove_game_object(id);
            }
        }
        self.has_key = state.has_key;
        self.camera_offset_x = state.camera_offset_x;
        self.camera.position.x = state.camera_offset_x;
        self.scene.update_meshes();

        self.run_state = RunState::Playing;
        self.set_language(state.language);
        Ok(())
    }

    fn keep_time(&mut self) {
        // keep time and emit warning if a tick takes longer than expected
        let tick_elapsed = self.tick_timer.lap();
        if tick_elapsed > consts::SLOW_TICK_NANOS {
            warn!("game loop running slow: {}", timer::time_from(tick_elapsed));
        }
        self.slowest_tick = self.slowest_tick.max(tick_elapsed);
    }
}

/// Put an object at rest at `position`.
fn place(object: &mut GameObject, position: [f32; 3]) {
    object.body.position = Vector3::from(position);
    object.body.halt();
}

/// Whether a point lies inside the playfield bounds, which do not follow the camera.
fn is_in_bounds(p: Vector3<f32>) -> bool {
    (consts::BOUNDS_MIN_X..=consts::BOUNDS_MAX_X).contains(&p.x)
        && (consts::BOUNDS_MIN_Y..=consts::BOUNDS_MAX_Y).contains(&p.y)
}
