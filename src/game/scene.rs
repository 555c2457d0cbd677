use crate::entity::{GameObject, IdAllocator, ObjectId};
use crate::game::config::SceneConfig;
use crate::game::consts;
use crate::game::GameError;
use crate::physics::{self, Contact};
use crate::render::VisualScene;

use std::collections::HashMap;

/// The registry of everything that currently exists in a stage.
///
/// A `Scene` owns the physics world, the render graph root and all game objects. Every object in
/// `children` is registered in both the world and the render graph, and every name in
/// `custom_names` refers to an object in `children`. Removing an object unbinds all its names.
#[derive(Debug, Default)]
pub struct Scene {
    world: physics::World,
    visual_scene: VisualScene,
    children: HashMap<ObjectId, GameObject>,
    custom_names: HashMap<String, ObjectId>,
    ids: IdAllocator,
    player: Option<ObjectId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_ids(IdAllocator::new())
    }

    /// Empty scene that continues handing out ids from `ids`.
    pub fn with_ids(ids: IdAllocator) -> Self {
        Scene {
            world: physics::World::new(),
            visual_scene: VisualScene::new(),
            children: HashMap::new(),
            custom_names: HashMap::new(),
            ids,
            player: None,
        }
    }

    /// Build a stage: the player first, then every box in configuration order.
    pub fn from_config(config: &SceneConfig, ids: IdAllocator) -> Result<Self, GameError> {
        let mut scene = Self::with_ids(ids);
        scene.load_scene_config(config)?;
        Ok(scene)
    }

    /// Add the objects of a stage to this scene. Nothing is added if any colour fails to parse.
    pub fn load_scene_config(&mut self, config: &SceneConfig) -> Result<(), GameError> {
        let player_color = config.player.color()?;
        let box_colors = config
            .boxes
            .iter()
            .map(|b| b.color())
            .collect::<Result<Vec<_>, _>>()?;

        let p = &config.player;
        let player = GameObject::new_player(
            &mut self.ids,
            p.size(),
            p.position(),
            player_color,
            p.mass,
            consts::PLAYER_SPEED,
        )
        .visible(p.visible);
        self.add_game_object(player, p.name.as_deref());

        for (b, color) in config.boxes.iter().zip(box_colors) {
            let object = GameObject::new_box(&mut self.ids, b.size(), b.position(), color, b.mass)
                .fixed_rotation(b.fixed_rotation)
                .visible(b.visible);
            self.add_game_object(object, b.name.as_deref());
        }
        debug!("loaded {} objects", self.children.len());
        Ok(())
    }

    /// Allocator for objects that are built outside of a stage configuration.
    pub fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    /// Hand the id allocator on to the next scene.
    pub fn into_ids(self) -> IdAllocator {
        self.ids
    }

    /// Register an object and optionally bind a name to it. A name that is already bound is
    /// rebound to the new object.
    pub fn add_game_object(&mut self, object: GameObject, name: Option<&str>) -> ObjectId {
        let id = object.id();
        object.add_to_game(&mut self.world, &mut self.visual_scene);
        if object.is_player() {
            self.player = Some(id);
        }
        if let Some(name) = name {
            if let Some(previous) = self.custom_names.insert(name.to_string(), id) {
                debug!("name '{}' moved from {} to {}", name, previous, id);
            }
        }
        trace!("added {}", object);
        if self.children.insert(id, object).is_some() {
            warn!("game object {} replaced an object with the same id", id);
        }
        id
    }

    /// Unregister an object from the world, the render graph and all names bound to it.
    pub fn remove_game_object(&mut self, id: ObjectId) -> Option<GameObject> {
        let object = self.children.remove(&id)?;
        self.world.remove_body(id);
        self.visual_scene.remove(id);
        self.custom_names.retain(|_, bound| *bound != id);
        if self.player == Some(id) {
            self.player = None;
        }
        trace!("removed {}", object);
        Some(object)
    }

    pub fn clear_scene(&mut self) {
        let ids: Vec<ObjectId> = self.children.keys().copied().collect();
        for id in ids {
            self.remove_game_object(id);
        }
        self.custom_names.clear();
    }

    pub fn id_of(&self, name: &str) -> Option<ObjectId> {
        self.custom_names.get(name).copied()
    }

    pub fn get_game_object_by_name(&self, name: &str) -> Option<&GameObject> {
        self.id_of(name).and_then(|id| self.children.get(&id))
    }

    pub fn get_game_object_by_name_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        let id = self.id_of(name)?;
        self.children.get_mut(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.children.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.children.get_mut(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.children.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Ids of all objects in ascending order.
    pub fn ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.children.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn objects(&self) -> impl Iterator<Item = &GameObject> {
        self.children.values()
    }

    pub const fn player_id(&self) -> Option<ObjectId> {
        self.player
    }

    pub fn player(&self) -> Option<&GameObject> {
        self.player.and_then(|id| self.children.get(&id))
    }

    pub fn player_mut(&mut self) -> Option<&mut GameObject> {
        let id = self.player?;
        self.children.get_mut(&id)
    }

    pub const fn world(&self) -> &physics::World {
        &self.world
    }

    pub const fn visual_scene(&self) -> &VisualScene {
        &self.visual_scene
    }

    /// Advance the physics by one step and return the contacts of that step.
    pub fn step(&mut self, dt: f32) -> Vec<Contact> {
        self.world.fixed_step(
            dt,
            self.children
                .iter_mut()
                .map(|(id, object)| (*id, &mut object.body)),
        )
    }

    pub fn update_meshes(&mut self) {
        for object in self.children.values_mut() {
            object.update_mesh();
        }
    }
}
