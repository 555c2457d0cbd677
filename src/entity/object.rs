use crate::entity::{Controller, IdAllocator, ObjectId, PlayerCtrl};
use crate::physics::{self, BodyDesc, RigidBody};
use crate::render::{Color, Mesh, VisualScene};
use crate::ui::input::InputFlags;

use cgmath::{InnerSpace, Vector3};
use std::fmt;

/// A `GameObject` is the base structure for everything that lives in a scene. It pairs exactly one
/// physics body with exactly one mesh and carries an identity that is unique for the whole run.
///
/// The mesh never moves on its own. Its transform is copied from the body by
/// [`GameObject::update_mesh`], which the game loop calls once per tick after stepping the world.
///
/// Behaviour beyond physics is attached through the optional _control_ component. A plain box has
/// none, the player has a `Controller::Player`.
#[derive(Debug)]
pub struct GameObject {
    id: ObjectId,
    pub body: RigidBody,
    pub mesh: Mesh,
    pub control: Option<Controller>,
}

impl GameObject {
    /// Bind a body and a mesh under a fresh id.
    pub fn new(ids: &mut IdAllocator, body: RigidBody, mesh: Mesh) -> Self {
        Self {
            id: ids.allocate(),
            body,
            mesh,
            control: None,
        }
    }

    /// Create a box. The collision shape uses half of `size` as half extents, the mesh uses the
    /// full size. A `mass` of zero makes the box static.
    pub fn new_box(
        ids: &mut IdAllocator,
        size: Vector3<f32>,
        position: Vector3<f32>,
        color: Color,
        mass: f32,
    ) -> Self {
        let body = RigidBody::new(BodyDesc {
            linear_damping: 0.9,
            angular_damping: 1.0,
            ..BodyDesc::new(mass, size * 0.5, position)
        });
        let mut mesh = Mesh::new(size, color);
        mesh.position = position;

        Self::new(ids, body, mesh)
    }

    /// Create a player controlled box. The player never tips over.
    pub fn new_player(
        ids: &mut IdAllocator,
        size: Vector3<f32>,
        position: Vector3<f32>,
        color: Color,
        mass: f32,
        speed: f32,
    ) -> Self {
        let mut player = Self::new_box(ids, size, position, color, mass)
            .fixed_rotation(true)
            .control(Controller::Player(PlayerCtrl::new(speed)));
        player.body.angular_damping = 0.7;
        player
    }

    /// Attach a controller. Part of the builder pattern.
    pub fn control(mut self, controller: Controller) -> Self {
        self.control = Some(controller);
        self
    }

    /// Lock the body's orientation. Part of the builder pattern.
    pub fn fixed_rotation(mut self, is_fixed: bool) -> Self {
        self.body.fixed_rotation = is_fixed;
        self
    }

    /// Show or hide the mesh. Hidden objects still collide. Part of the builder pattern.
    pub fn visible(mut self, is_visible: bool) -> Self {
        self.mesh.visible = is_visible;
        self
    }

    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// Register the body with the world and the mesh with the render graph.
    ///
    /// Must be called once per world and graph. A second registration is reported but not
    /// prevented.
    pub fn add_to_game(&self, world: &mut physics::World, visual_scene: &mut VisualScene) {
        let is_new_body = world.add_body(self.id);
        let is_new_mesh = visual_scene.add(self.id);
        if !(is_new_body && is_new_mesh) {
            warn!("game object {} was added to the game more than once", self.id);
        }
    }

    /// Copy position and orientation of the body into the mesh.
    pub fn update_mesh(&mut self) {
        self.mesh.position = self.body.position;
        self.mesh.rotation = self.body.rotation;
    }

    pub const fn position(&self) -> Vector3<f32> {
        self.body.position
    }

    pub fn distance_to(&self, other: &Self) -> f32 {
        (self.body.position - other.body.position).magnitude()
    }

    pub const fn is_player(&self) -> bool {
        matches!(self.control, Some(Controller::Player(_)))
    }

    pub fn player(&self) -> Option<&PlayerCtrl> {
        match &self.control {
            Some(Controller::Player(ctrl)) => Some(ctrl),
            None => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerCtrl> {
        match &mut self.control {
            Some(Controller::Player(ctrl)) => Some(ctrl),
            None => None,
        }
    }

    /// Feed the input flags to the controller, if there is one. Returns `true` if the player
    /// jumped.
    pub fn process_input(&mut self, input: &InputFlags) -> bool {
        match &mut self.control {
            Some(Controller::Player(ctrl)) => ctrl.process_input(&mut self.body, input),
            None => false,
        }
    }
}

impl fmt::Display for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.body.position;
        write!(
            f,
            "{} {} at ({:.2}, {:.2}, {:.2}), mass: {}",
            self.id,
            self.mesh.color(),
            p.x,
            p.y,
            p.z,
            self.body.mass()
        )
    }
}
