//! # Cuboid - A physics puzzle platformer
//!
//! The native binary runs the game headless for a number of ticks, driven by keys held from the
//! command line, and prints what happened.
//!

#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

#[macro_use]
extern crate log;

// For game testing run with `RUST_LOG=cuboid=trace RUST_BACKTRACE=1 cargo run -- --hold d -t 300`.

#[cfg(not(target_arch = "wasm32"))]
use color_eyre::eyre::Result;

#[cfg(not(target_arch = "wasm32"))]
pub fn main() -> Result<()> {
    use cuboid::game::config::{self, SceneConfig};
    use cuboid::game::save::FileStorage;
    use cuboid::game::{self, Game, RunState};
    use cuboid::render::HeadlessRenderer;
    use cuboid::util::timer::Timer;
    use std::fs;

    color_eyre::install()?;

    println!(
        r#"
                _           _     _
       ___ _   _| |__   ___ (_) __| |
      / __| | | | '_ \ / _ \| |/ _` |
     | (__| |_| | |_) | (_) | | (_| |
      \___|\__,_|_.__/ \___/|_|\__,_|

      v{}
    "#,
        cuboid::VERSION
    );

    // init logger
    pretty_env_logger::init();

    // parse program arguments
    cuboid::parse_cmdline_flags();
    let options = game::env().clone();

    let stages = match &options.stage_path {
        Some(path) => vec![SceneConfig::from_json(&fs::read_to_string(path)?)?],
        None => config::builtin_stages()?,
    };
    let mut game = Game::new(stages)?;
    let mut storage = FileStorage::in_data_dir()?;

    if options.load_on_start {
        game.load(&storage)?;
    }
    game.start(options.language.unwrap_or_default());
    *game.input_mut() = options.held;

    let mut renderer = HeadlessRenderer::new();
    let tick_limit = options.tick_limit.unwrap_or(cuboid::DEFAULT_TICK_LIMIT);
    let mut run_timer = Timer::new("game run");
    while game.ticks() < tick_limit && game.run_state() == RunState::Playing {
        game.tick(&mut renderer);
    }
    run_timer.stop();
    info!(
        "{} ticks, {} frames, slowest tick {}",
        game.ticks(),
        renderer.frames(),
        cuboid::util::timer::time_from(game.slowest_tick())
    );

    if options.save_on_exit {
        game.save(&mut storage)?;
    }

    for (message, class) in game.log_mut().drain() {
        println!("[{:?}] {}", class, message);
    }
    println!("{}", game.hud().text());
    if !game.hud().hint().is_empty() {
        println!("{}", game.hud().hint());
    }
    if options.is_debug_mode {
        for id in game.scene().ids() {
            if let Some(object) = game.scene().get(id) {
                println!("{}", object);
            }
        }
    }
    Ok(())
}

/// The browser build is driven through `cuboid::web::WebGame`, there is nothing to run natively.
#[cfg(target_arch = "wasm32")]
pub fn main() {}
