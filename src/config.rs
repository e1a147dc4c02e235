use log::warn;
use serde::Deserialize;

/// Start-of-session parameters
///
/// Loaded once from JSON before the first tick and never reconfigured at
/// runtime. Any field missing from the file falls back to the reference
/// constants below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pixels per grid cell.
    pub tile_size: u32,
    /// Cells per side of the square maze.
    pub map_size: usize,
    /// Player velocity in cells per tick.
    pub base_velocity: f32,
    /// Player velocity while a speed boost is active.
    pub boost_velocity: f32,
    /// Ghost velocity in cells per tick.
    pub ghost_velocity: f32,
    /// Ticks a consumed effect stays active.
    pub effect_duration: u64,
    /// Wall-clock delay between simulation steps.
    pub tick_interval_ms: u64,
    pub player_spawn: (f32, f32),
    pub ghost_spawns: Vec<(f32, f32)>,
    pub map_path: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tile_size: 32,
            map_size: 16,
            base_velocity: 0.5,
            boost_velocity: 0.8,
            ghost_velocity: 0.4,
            effect_duration: 50,
            tick_interval_ms: 100,
            player_spawn: (5.0, 5.0),
            ghost_spawns: vec![(0.0, 5.0), (10.0, 10.0), (8.0, 8.0), (9.0, 9.0)],
            map_path: "assets/maps/level.txt".to_string(),
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Loads the config file, falling back to defaults when it is absent or
    /// unreadable. A bad file is worth a warning but not a dead session.
    pub fn load_or_default(path: &str) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("using default config, could not load {path}: {e}");
                GameConfig::default()
            }
        }
    }
}
