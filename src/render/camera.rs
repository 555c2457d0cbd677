use cgmath::{InnerSpace, Quaternion, Rad, Rotation, Rotation3, Vector2, Vector3};

/// Half-line used for pointer picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector3<f32>,
    /// Unit length.
    pub direction: Vector3<f32>,
}

/// Perspective camera that looks down the negative z axis, tilted by `pitch` around the x axis.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vector3<f32>,
    pub pitch: Rad<f32>,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub aspect: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 6.5),
            pitch: Rad(-0.25),
            fovy: 75.0,
            aspect,
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn rotation(&self) -> Quaternion<f32> {
        Quaternion::from_angle_x(self.pitch)
    }

    /// Cast a ray through the given point in normalized device coordinates, both axes in
    /// `[-1, 1]` with `+y` pointing up.
    pub fn ray_from_pointer(&self, ndc: Vector2<f32>) -> Ray {
        let tan = (self.fovy.to_radians() * 0.5).tan();
        let local = Vector3::new(ndc.x * self.aspect * tan, ndc.y * tan, -1.0).normalize();
        Ray {
            origin: self.position,
            direction: self.rotation().rotate_vector(local),
        }
    }
}

/// Convert a pointer position in pixels (origin top left) into normalized device coordinates.
pub fn pointer_to_ndc(offset_x: f32, offset_y: f32, width: f32, height: f32) -> Vector2<f32> {
    Vector2::new(
        (offset_x / width) * 2.0 - 1.0,
        -(offset_y / height) * 2.0 + 1.0,
    )
}
