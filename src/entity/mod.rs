pub mod control;
pub mod id;
pub mod object;
pub mod player;

pub use control::Controller;
pub use id::{IdAllocator, ObjectId};
pub use object::GameObject;
pub use player::PlayerCtrl;
