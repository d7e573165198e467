use bevy::prelude::*;
use orb_shell::platform::default_platform;

mod board;
pub mod config;
pub mod controller;
pub mod grid;
mod hud;
pub mod matching;
pub mod render;
pub mod scheduler;
pub mod surface;
pub mod tween;

use board::{BoardPlugin, Session};
use config::OrbConfig;
use controller::OrbGame;
use hud::HudPlugin;

pub fn run() {
    let platform = default_platform();
    let mut app = orb_shell::get_default_app(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        platform.as_ref(),
    );

    let config = OrbConfig::default();
    app.insert_resource(Time::<Fixed>::from_hz(config.ticks_per_second))
        .insert_resource(Session(OrbGame::new(config.clone(), platform)))
        .insert_resource(config)
        .add_plugins(BoardPlugin)
        .add_plugins(HudPlugin)
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
