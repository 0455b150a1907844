//! Headless Arkanoid on the swept collision engine
//!
//! Usage: `arkanoid_demo [config.toml | config.ron] [resolved.toml | resolved.ron]`
//!
//! With a second path the configuration actually used, defaults filled in,
//! is written there before the game starts.

mod config;
mod game;

use std::error::Error;

use swept_engine::core::config::Config;
use swept_engine::foundation::logging;

use crate::config::DemoConfig;
use crate::game::{Arkanoid, Outcome};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => DemoConfig::load_from_file(&path)?,
        None => DemoConfig::default(),
    };

    logging::init_with_level(&config.engine.log_level);
    config.validate()?;

    if let Some(path) = args.next() {
        config.save_to_file(&path)?;
        log::info!("Resolved configuration written to {}", path);
    }

    log::info!("Starting Arkanoid demo...");
    let mut game = Arkanoid::new(config.gameplay, config.physics)?;

    match game.run()? {
        Outcome::Cleared => log::info!("All bricks cleared in {} steps", game.steps()),
        Outcome::Lost => log::info!("Game over with {} bricks left", game.bricks_remaining()),
        Outcome::OutOfTime => log::warn!("Step limit reached with {} bricks left", game.bricks_remaining()),
    }
    log::info!("Final score: {}, lives left: {}", game.score(), game.lives());
    log::debug!(
        "Ball resting at {:?} among {} entities",
        game.ball_position(),
        game.world().len()
    );

    Ok(())
}
