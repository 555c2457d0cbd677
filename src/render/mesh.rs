use crate::render::Ray;

use cgmath::{One, Quaternion, Rotation, Vector3, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}'")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    /// Accepts `#rrggbb`, `0xrrggbb` and a handful of CSS color names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let named = match trimmed.to_lowercase().as_str() {
            "black" => Some(0x00_0000),
            "white" => Some(0xff_ffff),
            "red" => Some(0xff_0000),
            "green" => Some(0x00_8000),
            "blue" => Some(0x00_00ff),
            "yellow" => Some(0xff_ff00),
            "purple" => Some(0x80_0080),
            "gray" | "grey" => Some(0x80_8080),
            "brown" => Some(0xa5_2a2a),
            _ => None,
        };
        if let Some(hex) = named {
            return Ok(Self::from_hex(hex));
        }

        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .ok_or_else(|| ParseColorError(s.to_string()))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| ParseColorError(s.to_string()))
    }
}

/// Renderable box. The transform is written by the owning game object, the geometry and color are
/// fixed at construction.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub visible: bool,
    size: Vector3<f32>,
    color: Color,
}

impl Mesh {
    pub fn new(size: Vector3<f32>, color: Color) -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Quaternion::one(),
            visible: true,
            size,
            color,
        }
    }

    pub const fn size(&self) -> Vector3<f32> {
        self.size
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    /// Distance along the ray to the first hit with this box, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        // move the ray into the box's local frame, where the box is axis aligned
        let inverse = self.rotation.invert();
        let origin = inverse.rotate_vector(ray.origin - self.position);
        let direction = inverse.rotate_vector(ray.direction);
        let half = self.size * 0.5;

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let (o, d, h) = (origin[axis], direction[axis], half[axis]);
            if d.abs() < f32::EPSILON {
                if o.abs() > h {
                    return None;
                }
                continue;
            }
            let t1 = (-h - o) / d;
            let t2 = (h - o) / d;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            None
        } else {
            Some(t_min.max(0.0))
        }
    }
}
