pub mod hud;
pub mod input;
