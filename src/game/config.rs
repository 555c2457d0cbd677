//! Stage descriptions. A stage is one player and a list of boxes, read from JSON.

use crate::game::consts;
use crate::game::GameError;
use crate::render::Color;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const ROOM_JSON: &str = include_str!("../../resources/stages/room.json");
const CELLAR_JSON: &str = include_str!("../../resources/stages/cellar.json");

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub position: [f32; 3],
    pub size: [f32; 3],
    pub color: String,
    pub mass: f32,
    /// Position is part of the save state.
    #[serde(default)]
    pub tracked: bool,
    /// Leaving the playfield bounds loses the game.
    #[serde(default)]
    pub guarded: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub fixed_rotation: bool,
}

impl BoxConfig {
    pub fn position(&self) -> Vector3<f32> {
        self.position.into()
    }

    pub fn size(&self) -> Vector3<f32> {
        self.size.into()
    }

    pub fn color(&self) -> Result<Color, GameError> {
        Ok(self.color.parse()?)
    }

    /// Every extent is finite and positive.
    pub fn has_volume(&self) -> bool {
        self.size.iter().all(|s| s.is_finite() && *s > 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub player: BoxConfig,
    pub boxes: Vec<BoxConfig>,
}

impl SceneConfig {
    /// Parse and validate a stage.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check everything that would otherwise only fail while the stage is being built.
    ///
    /// Tracked boxes need a name to be found again on load, and must not be one of the objects
    /// the rules remove during play.
    pub fn validate(&self) -> Result<(), GameError> {
        self.player.color()?;
        if !self.player.has_volume() {
            return Err(GameError::Config("the player has an empty size".to_string()));
        }
        let mut tracked = HashSet::new();
        for (i, box_config) in self.boxes.iter().enumerate() {
            box_config.color()?;
            if !box_config.has_volume() {
                return Err(GameError::Config(format!("box {} has an empty size", i)));
            }
            if !(box_config.tracked || box_config.guarded) {
                continue;
            }
            let name = box_config.name.as_deref().ok_or_else(|| {
                GameError::Config(format!("tracked or guarded box {} has no name", i))
            })?;
            if box_config.tracked {
                if name == consts::KEY_NAME || name == consts::DOOR_NAME {
                    return Err(GameError::Config(format!("'{}' cannot be tracked", name)));
                }
                if !tracked.insert(name) {
                    return Err(GameError::Config(format!("'{}' is tracked twice", name)));
                }
            }
        }
        Ok(())
    }

    /// Names of the tracked boxes, in configuration order.
    pub fn tracked_names(&self) -> Vec<&str> {
        self.boxes
            .iter()
            .filter(|b| b.tracked)
            .filter_map(|b| b.name.as_deref())
            .collect()
    }

    pub fn guarded_names(&self) -> Vec<&str> {
        self.boxes
            .iter()
            .filter(|b| b.guarded)
            .filter_map(|b| b.name.as_deref())
            .collect()
    }
}

/// The stages shipped with the game, in play order.
pub fn builtin_stages() -> Result<Vec<SceneConfig>, GameError> {
    [ROOM_JSON, CELLAR_JSON]
        .iter()
        .map(|json| SceneConfig::from_json(json))
        .collect()
}
