// player
pub const PLAYER_SPEED: f32 = 2.0;
pub const JUMP_VELOCITY: f32 = 9.0;
/// Minimum upward component of a contact normal for the contact to count as ground.
pub const GROUND_NORMAL_MIN_Y: f32 = 0.5;

// playfield bounds in world coordinates, independent of the camera offset
pub const BOUNDS_MIN_X: f32 = -9.0;
pub const BOUNDS_MAX_X: f32 = 9.0;
pub const BOUNDS_MIN_Y: f32 = -5.0;
pub const BOUNDS_MAX_Y: f32 = 5.0;
/// The camera moves by one room width whenever the player crosses a horizontal bound.
pub const CAMERA_SHIFT_X: f32 = BOUNDS_MAX_X - BOUNDS_MIN_X;

// hints
pub const KEY_HINT_DISTANCE: f32 = 6.0;
pub const DOOR_HINT_DISTANCE: f32 = 3.0;

// well known object names
pub const KEY_NAME: &str = "key";
pub const CHEST_NAME: &str = "chest";
pub const DOOR_NAME: &str = "door";

// viewport defaults for hosts that do not report a size
pub const VIEWPORT_WIDTH: f32 = 1280.0;
pub const VIEWPORT_HEIGHT: f32 = 720.0;

pub const SAVE_KEY: &str = "cuboid_save";
/// Ticks slower than this are reported, in nanoseconds.
pub const SLOW_TICK_NANOS: u128 = 50_000_000;
