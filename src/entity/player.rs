//! Settings and state pertaining to the player.
//! This covers horizontal movement and the jump state machine.

use crate::game::consts;
use crate::physics::RigidBody;
use crate::ui::input::InputFlags;

/// Player controller. Jumping is only possible while grounded; a jump makes the player airborne
/// until the game loop reports the next ground contact via [`PlayerCtrl::notify_ground_contact`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCtrl {
    pub speed: f32,
    is_grounded: bool,
}

impl PlayerCtrl {
    pub const fn new(speed: f32) -> Self {
        Self {
            speed,
            is_grounded: false,
        }
    }

    pub const fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    pub fn notify_ground_contact(&mut self) {
        self.is_grounded = true;
    }

    /// Write the player's velocity from the current input flags.
    ///
    /// Each horizontal axis resolves to `-speed`, `0` or `+speed`. If both directions of an axis
    /// are held, `right` wins over `left` and `up` wins over `down`. `up` moves away from the
    /// camera, i.e. towards negative z.
    ///
    /// Returns `true` if a jump was triggered.
    pub fn process_input(&mut self, body: &mut RigidBody, input: &InputFlags) -> bool {
        body.velocity.x = if input.right {
            self.speed
        } else if input.left {
            -self.speed
        } else {
            0.0
        };

        body.velocity.z = if input.up {
            -self.speed
        } else if input.down {
            self.speed
        } else {
            0.0
        };

        if input.jump && self.is_grounded {
            body.velocity.y = consts::JUMP_VELOCITY;
            self.is_grounded = false;
            trace!("player jumped");
            true
        } else {
            false
        }
    }
}
