//! Utilities contain useful functions that are unrelated to any of the main game modules.

pub mod timer;
