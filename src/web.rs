//! Browser bindings. The page owns the canvas and the event listeners, draws the boxes from
//! [`WebGame::transforms`] and forwards input to [`WebGame`].

use crate::game::save::Storage;
use crate::game::{Game, GameError, Language};
use crate::render::HeadlessRenderer;

use wasm_bindgen::prelude::*;

/// Number of floats per object in [`WebGame::transforms`].
pub const TRANSFORM_STRIDE: usize = 12;

fn js_error(e: &JsValue) -> GameError {
    GameError::Storage(format!("{:?}", e))
}

/// The browser's `window.localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn new() -> Result<Self, GameError> {
        let window =
            web_sys::window().ok_or_else(|| GameError::Storage("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| js_error(&e))?
            .ok_or_else(|| GameError::Storage("local storage is disabled".to_string()))?;
        Ok(LocalStorage { storage })
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, GameError> {
        self.storage.get_item(key).map_err(|e| js_error(&e))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        self.storage.set_item(key, value).map_err(|e| js_error(&e))
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    renderer: HeadlessRenderer,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<WebGame, JsError> {
        let mut game = Game::with_builtin_stages()?;
        game.camera_mut().set_viewport(width, height);
        Ok(WebGame {
            game,
            renderer: HeadlessRenderer::new(),
        })
    }

    /// Start in the language with the given code, `eng`, `ar` or `ch`.
    pub fn start(&mut self, language: &str) -> Result<(), JsError> {
        let language: Language = language.parse()?;
        self.game.start(language);
        Ok(())
    }

    pub fn set_language(&mut self, language: &str) -> Result<(), JsError> {
        let language: Language = language.parse()?;
        self.game.set_language(language);
        Ok(())
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.camera_mut().set_viewport(width, height);
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.game.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.game.key_up(key)
    }

    /// Click at pixel coordinates relative to the canvas. Returns what was clicked.
    pub fn click(
        &mut self,
        offset_x: f32,
        offset_y: f32,
        width: f32,
        height: f32,
    ) -> Result<String, JsError> {
        let pick = self.game.click_at(offset_x, offset_y, width, height)?;
        Ok(format!("{:?}", pick))
    }

    pub fn tick(&mut self) {
        self.game.tick(&mut self.renderer);
    }

    pub fn run_state(&self) -> String {
        self.game.run_state().to_string()
    }

    pub fn ui_text(&self) -> String {
        self.game.hud().text().to_string()
    }

    pub fn hint_text(&self) -> String {
        self.game.hud().hint().to_string()
    }

    /// Whether the overlay texts changed since the last call.
    pub fn take_hud_refresh(&mut self) -> bool {
        std::mem::take(&mut self.game.hud_mut().require_refresh)
    }

    /// Take the messages that arrived since the last call, for alerts and toasts.
    pub fn drain_messages(&mut self) -> Vec<String> {
        self.game
            .log_mut()
            .drain()
            .into_iter()
            .map(|(message, _)| message)
            .collect()
    }

    pub fn camera_x(&self) -> f32 {
        self.game.camera().position.x
    }

    pub fn save(&mut self) -> Result<(), JsError> {
        let mut storage = LocalStorage::new()?;
        self.game.save(&mut storage)?;
        Ok(())
    }

    /// Returns `false` if there is no saved game.
    pub fn load(&mut self) -> Result<bool, JsError> {
        let storage = LocalStorage::new()?;
        Ok(self.game.load(&storage)?)
    }

    /// Visible boxes as a flat list, [`TRANSFORM_STRIDE`] floats each: id, position xyz,
    /// rotation quaternion xyzw, size xyz and the color as `0xrrggbb`.
    pub fn transforms(&self) -> Vec<f32> {
        let scene = self.game.scene();
        let mut out = Vec::with_capacity(scene.len() * TRANSFORM_STRIDE);
        for id in scene.visual_scene().iter() {
            let Some(object) = scene.get(id) else {
                continue;
            };
            let mesh = &object.mesh;
            if !mesh.visible {
                continue;
            }
            let (p, q, s) = (mesh.position, mesh.rotation, mesh.size());
            out.extend_from_slice(&[
                id.value() as f32,
                p.x,
                p.y,
                p.z,
                q.v.x,
                q.v.y,
                q.v.z,
                q.s,
                s.x,
                s.y,
                s.z,
                mesh.color().to_hex() as f32,
            ]);
        }
        out
    }
}
