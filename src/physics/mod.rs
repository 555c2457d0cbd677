//! A minimal rigid-body world for axis-aligned boxes.
//!
//! Bodies are owned by their game objects; the world only keeps track of which bodies take part
//! in the simulation. Each fixed step integrates every registered dynamic body, then resolves
//! box overlaps with the world's [`ContactMaterial`] and reports one [`Contact`] per touching pair. Collision shapes
//! ignore body orientation, rotation is a purely visual property here.

use crate::entity::ObjectId;

use cgmath::{InnerSpace, One, Quaternion, Vector3, Zero};
use std::collections::BTreeSet;

/// Length of one simulation step in seconds.
pub const FIXED_STEP: f32 = 1.0 / 60.0;
/// Vertical acceleration applied to every dynamic body.
pub const GRAVITY: f32 = -9.82;

/// Parameters used to create a new body.
#[derive(Debug, Clone, Copy)]
pub struct BodyDesc {
    /// `0.0` creates a static body.
    pub mass: f32,
    pub half_extents: Vector3<f32>,
    pub position: Vector3<f32>,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub fixed_rotation: bool,
}

impl BodyDesc {
    pub fn new(mass: f32, half_extents: Vector3<f32>, position: Vector3<f32>) -> Self {
        Self {
            mass,
            half_extents,
            position,
            linear_damping: 0.01,
            angular_damping: 0.01,
            fixed_rotation: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RigidBody {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub velocity: Vector3<f32>,
    pub angular_velocity: Vector3<f32>,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub fixed_rotation: bool,
    mass: f32,
    half_extents: Vector3<f32>,
}

impl RigidBody {
    pub fn new(desc: BodyDesc) -> Self {
        Self {
            position: desc.position,
            rotation: Quaternion::one(),
            velocity: Vector3::zero(),
            angular_velocity: Vector3::zero(),
            linear_damping: desc.linear_damping,
            angular_damping: desc.angular_damping,
            fixed_rotation: desc.fixed_rotation,
            mass: desc.mass.max(0.0),
            half_extents: desc.half_extents,
        }
    }

    pub const fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inv_mass(&self) -> f32 {
        if self.is_static() {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Static bodies have infinite mass and are never moved by the solver.
    pub fn is_static(&self) -> bool {
        self.mass <= 0.0
    }

    pub const fn half_extents(&self) -> Vector3<f32> {
        self.half_extents
    }

    /// Stop all linear and angular motion.
    pub fn halt(&mut self) {
        self.velocity = Vector3::zero();
        self.angular_velocity = Vector3::zero();
    }

    fn integrate(&mut self, gravity: Vector3<f32>, dt: f32) {
        if self.is_static() {
            return;
        }
        self.velocity += gravity * dt;
        self.velocity *= (1.0 - self.linear_damping).powf(dt);
        self.position += self.velocity * dt;

        if self.fixed_rotation {
            self.angular_velocity = Vector3::zero();
            return;
        }
        self.angular_velocity *= (1.0 - self.angular_damping).powf(dt);
        if self.angular_velocity.magnitude2() > 0.0 {
            let spin = Quaternion::from_sv(0.0, self.angular_velocity) * self.rotation;
            self.rotation = (self.rotation + spin * (0.5 * dt)).normalize();
        }
    }
}

/// Surface properties used for every contact in the world.
#[derive(Debug, Clone, Copy)]
pub struct ContactMaterial {
    /// Coulomb coefficient: the tangential impulse of a contact is at most `friction` times its
    /// normal impulse.
    pub friction: f32,
    pub restitution: f32,
}

impl Default for ContactMaterial {
    /// No friction and no bounce, so boxes slide along walls instead of sticking to them.
    fn default() -> Self {
        Self {
            friction: 0.0,
            restitution: 0.0,
        }
    }
}

/// Two bodies touching after a step. `normal` points from `b` towards `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub a: ObjectId,
    pub b: ObjectId,
    pub normal: Vector3<f32>,
}

impl Contact {
    pub fn involves(&self, id: ObjectId) -> bool {
        self.a == id || self.b == id
    }

    /// The body on the other side of the contact, if `id` takes part in it.
    pub fn other(&self, id: ObjectId) -> Option<ObjectId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }

    /// Contact normal oriented from the other body towards `id`.
    pub fn normal_towards(&self, id: ObjectId) -> Option<Vector3<f32>> {
        if self.a == id {
            Some(self.normal)
        } else if self.b == id {
            Some(-self.normal)
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct World {
    pub gravity: Vector3<f32>,
    pub material: ContactMaterial,
    bodies: BTreeSet<ObjectId>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            gravity: Vector3::new(0.0, GRAVITY, 0.0),
            material: ContactMaterial::default(),
            bodies: BTreeSet::new(),
        }
    }

    /// Register a body. Returns `false` if it was registered already.
    pub fn add_body(&mut self, id: ObjectId) -> bool {
        self.bodies.insert(id)
    }

    /// Unregister a body. Returns `false` if it was not registered.
    pub fn remove_body(&mut self, id: ObjectId) -> bool {
        self.bodies.remove(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.bodies.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Advance the simulation by `dt`. Bodies that are not registered with this world are left
    /// untouched. Pairs are resolved in ascending id order, so the outcome only depends on the
    /// input state.
    pub fn fixed_step<'a, I>(&self, dt: f32, bodies: I) -> Vec<Contact>
    where
        I: IntoIterator<Item = (ObjectId, &'a mut RigidBody)>,
    {
        let mut active: Vec<(ObjectId, &'a mut RigidBody)> = bodies
            .into_iter()
            .filter(|(id, _)| self.bodies.contains(id))
            .collect();
        active.sort_by_key(|(id, _)| *id);

        for (_, body) in &mut active {
            body.integrate(self.gravity, dt);
        }

        let mut contacts = Vec::new();
        for j in 1..active.len() {
            let (head, tail) = active.split_at_mut(j);
            let (id_b, body_b) = &mut tail[0];
            for (id_a, body_a) in head.iter_mut() {
                // the higher id is `a`, so the normal points from the lower id towards the higher
                if let Some(normal) = resolve(&mut **body_b, &mut **body_a, &self.material) {
                    contacts.push(Contact {
                        a: *id_b,
                        b: *id_a,
                        normal,
                    });
                }
            }
        }
        contacts
    }
}

/// Separate two overlapping boxes along the axis of least penetration and cancel their
/// approaching velocity, then apply friction against the sliding velocity. Returns the contact
/// normal pointing from `b` towards `a`.
fn resolve(
    a: &mut RigidBody,
    b: &mut RigidBody,
    material: &ContactMaterial,
) -> Option<Vector3<f32>> {
    if a.is_static() && b.is_static() {
        return None;
    }

    let delta = a.position - b.position;
    let reach = a.half_extents + b.half_extents;
    let overlap = Vector3::new(
        reach.x - delta.x.abs(),
        reach.y - delta.y.abs(),
        reach.z - delta.z.abs(),
    );
    if overlap.x <= 0.0 || overlap.y <= 0.0 || overlap.z <= 0.0 {
        return None;
    }

    let (depth, normal) = if overlap.x < overlap.y && overlap.x < overlap.z {
        (overlap.x, Vector3::unit_x() * delta.x.signum())
    } else if overlap.y < overlap.z {
        (overlap.y, Vector3::unit_y() * delta.y.signum())
    } else {
        (overlap.z, Vector3::unit_z() * delta.z.signum())
    };

    let inv_a = a.inv_mass();
    let inv_b = b.inv_mass();
    let inv_total = inv_a + inv_b;

    a.position += normal * (depth * inv_a / inv_total);
    b.position -= normal * (depth * inv_b / inv_total);

    let approach = (a.velocity - b.velocity).dot(normal);
    if approach >= 0.0 {
        return Some(normal);
    }
    let impulse = -(1.0 + material.restitution) * approach / inv_total;
    a.velocity += normal * (impulse * inv_a);
    b.velocity -= normal * (impulse * inv_b);

    let relative = a.velocity - b.velocity;
    let sliding = relative - normal * relative.dot(normal);
    let speed = sliding.magnitude();
    if material.friction > 0.0 && speed > 0.0 {
        let tangent = sliding / speed;
        let friction_impulse = (speed / inv_total).min(material.friction * impulse);
        a.velocity -= tangent * (friction_impulse * inv_a);
        b.velocity += tangent * (friction_impulse * inv_b);
    }

    Some(normal)
}
