use crate::entity::player::PlayerCtrl;

/// Behaviour attached to a game object on top of plain physics. Objects without a controller are
/// moved by the simulation only.
#[derive(Debug, Clone, PartialEq)]
pub enum Controller {
    Player(PlayerCtrl),
}
