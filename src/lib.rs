//! # Cuboid - A physics puzzle platformer
//!
//! Push cubes around a couple of rooms, find the key, unlock the door and open the chest. Every
//! object in the game is a box that pairs a rigid body with a mesh; a scene keeps them registered
//! with the physics world and the render graph.
//!

#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(
    clippy::multiple_crate_versions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::use_self
)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;
extern crate serde;
extern crate serde_json;

pub mod entity;
pub mod game;
pub mod physics;
pub mod render;
pub mod ui;
pub mod util;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::ui::input::InputFlags;
use std::env;

pub const VERSION: &str = "0.1.0";

/// Number of ticks the native binary runs if no limit is given, one minute of game time.
pub const DEFAULT_TICK_LIMIT: u64 = 3600;

/// Read the program arguments into the game environment.
pub fn parse_cmdline_flags() {
    let args: Vec<String> = env::args().collect();
    debug!("args: {:?}", args);
    for idx in 0..args.len() {
        if let Some(arg) = args.get(idx) {
            match arg.as_str() {
                "-d" | "--debug" => game::env().set_debug_mode(true),
                "-t" | "--ticks" => parse_ticks(&args, idx),
                "-l" | "--lang" => parse_language(&args, idx),
                "--stage" => parse_stage(&args, idx),
                "--hold" => parse_held_keys(&args, idx),
                "--load" => game::env().set_load_on_start(true),
                "--save" => game::env().set_save_on_exit(true),
                _ => {}
            }
        }
    }
}

fn parse_ticks(args: &[String], idx: usize) {
    // try get next argument to retrieve the tick count
    if let Some(next_arg) = args.get(idx + 1) {
        match next_arg.parse::<u64>() {
            Ok(limit) => game::env().set_tick_limit(limit),
            Err(_) => warn!("'{}' is not a tick count, ignoring it", next_arg),
        }
    } else {
        warn!("option '-t | --ticks' requires an integer parameter");
    }
}

fn parse_language(args: &[String], idx: usize) {
    if let Some(next_arg) = args.get(idx + 1) {
        match next_arg.parse::<game::Language>() {
            Ok(language) => game::env().set_language(language),
            Err(e) => warn!("{}, falling back to English", e),
        }
    } else {
        warn!("option '-l | --lang' requires one of 'eng', 'ar' or 'ch'");
    }
}

fn parse_stage(args: &[String], idx: usize) {
    if let Some(next_arg) = args.get(idx + 1) {
        game::env().set_stage_path(next_arg.as_str());
    } else {
        warn!("option '--stage' requires a path to a stage file");
    }
}

fn parse_held_keys(args: &[String], idx: usize) {
    if let Some(next_arg) = args.get(idx + 1) {
        game::env().set_held(InputFlags::held(next_arg));
    } else {
        warn!("option '--hold' requires a list of keys, e.g. 'd ' to walk right and jump");
    }
}
