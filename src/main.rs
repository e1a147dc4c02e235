use std::thread;
use std::time::Duration;

use log::{error, info};

mod config;
mod entity;
mod ghost;
mod input_system;
mod map;
mod player;
mod render;
mod session;

use config::GameConfig;
use input_system::{InputEvent, InputSystem, latest_steer};
use map::TileMap;
use session::Session;

const CONFIG_PATH: &str = "assets/config/game.json";

fn main() -> Result<(), String> {
    env_logger::init();

    let config = GameConfig::load_or_default(CONFIG_PATH);
    let map = TileMap::load(&config.map_path, config.map_size).map_err(|e| {
        error!("cannot start session: {e}");
        e.to_string()
    })?;
    let mut session = Session::new(map, &config);

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let window_side = config.tile_size * config.map_size as u32;
    let window = video_subsystem
        .window("Maze Muncher", window_side, window_side)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;
    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    let mut event_pump = sdl_context.event_pump()?;

    let input_system = InputSystem::new();
    let mut rng = rand::thread_rng();

    info!(
        "session started: {0}x{0} maze, {1} ghosts, {2} collectibles",
        config.map_size,
        session.ghosts.len(),
        session.map.remaining_collectibles()
    );

    'running: loop {
        let events = input_system.poll_events(&mut event_pump);
        if events.contains(&InputEvent::Quit) {
            session.request_quit();
            break 'running;
        }
        if let Some(steer) = latest_steer(&events) {
            session.steer(steer);
        }

        session.game_tick(&mut rng);
        render::draw_frame(&mut canvas, &session, config.tile_size)?;

        if session.is_over() {
            break 'running;
        }

        thread::sleep(Duration::from_millis(config.tick_interval_ms));
    }

    info!("session ended: {:?}", session.outcome());
    Ok(())
}
