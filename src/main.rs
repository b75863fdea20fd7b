#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use clap::Parser;
use hippo_maze::{
    app::App,
    config::{Args, GameConfig},
    constants::LOOP_TIME,
    platform,
};
use tracing::info;

/// The main entry point of the application.
///
/// Reads the command line, initializes logging, SDL and the game, then runs the frame
/// loop until the game asks to exit.
pub fn main() {
    platform::init_tracing().expect("Could not initialize logging");

    let config = GameConfig::from(Args::parse());
    let mut app = App::new(&config).expect("Could not create app");

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run() {}
    info!("Game loop finished");
}
