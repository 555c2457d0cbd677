//! Visual side of the game: meshes, the scene graph root, the camera and the renderer seam.
//!
//! Drawing itself is left to a `Renderer` implementation. The crate ships a headless one that is
//! used by the native binary, the benchmarks and the tests.

mod camera;
mod mesh;

pub use camera::{pointer_to_ndc, Camera, Ray};
pub use mesh::{Color, Mesh, ParseColorError};

use crate::entity::ObjectId;
use crate::game::Scene;

use std::collections::BTreeSet;

/// Root of the render graph. Holds the ids of all meshes that are currently attached; the meshes
/// themselves stay with their game objects.
#[derive(Debug, Default)]
pub struct VisualScene {
    meshes: BTreeSet<ObjectId>,
}

impl VisualScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a mesh. Returns `false` if it was attached already.
    pub fn add(&mut self, id: ObjectId) -> bool {
        self.meshes.insert(id)
    }

    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.meshes.remove(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.meshes.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.meshes.iter().copied()
    }
}

pub trait Renderer {
    fn render(&mut self, scene: &Scene, camera: &Camera);
}

/// Renderer without output device. Counts frames and traces what would have been drawn.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, scene: &Scene, camera: &Camera) {
        self.frames += 1;
        if !log_enabled!(log::Level::Trace) {
            return;
        }
        trace!(
            "frame {} camera at ({:.2}, {:.2}, {:.2})",
            self.frames,
            camera.position.x,
            camera.position.y,
            camera.position.z
        );
        for id in scene.visual_scene().iter() {
            if let Some(object) = scene.get(id) {
                let mesh = &object.mesh;
                if mesh.visible {
                    trace!(
                        "  mesh {} {} at ({:.2}, {:.2}, {:.2})",
                        id,
                        mesh.color(),
                        mesh.position.x,
                        mesh.position.y,
                        mesh.position.z
                    );
                }
            }
        }
    }
}
