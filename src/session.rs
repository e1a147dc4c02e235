use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::entity::Direction;
use crate::ghost::Ghost;
use crate::map::TileMap;
use crate::player::Player;

/// Session outcome state machine
///
/// `Running` is the only non-terminal state. Every transition out of it is
/// final; no further ticks run afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Running,
    Lost,
    Won,
    Quit,
}

/// The whole simulation state for one game session
///
/// Owned by the top-level loop and threaded explicitly through ticking and
/// rendering; nothing in the simulation is global.
pub struct Session {
    pub map: TileMap,
    pub player: Player,
    pub ghosts: Vec<Ghost>,
    outcome: Outcome,
}

impl Session {
    pub fn new(map: TileMap, config: &GameConfig) -> Self {
        let (px, py) = config.player_spawn;
        let player = Player::new(
            px,
            py,
            config.base_velocity,
            config.boost_velocity,
            config.effect_duration,
        );
        let ghosts = config
            .ghost_spawns
            .iter()
            .map(|&(x, y)| Ghost::new(x, y, config.ghost_velocity))
            .collect();

        Session {
            map,
            player,
            ghosts,
            outcome: Outcome::Running,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::Running
    }

    /// External quit signal. Terminal, like every other outcome.
    pub fn request_quit(&mut self) {
        if self.outcome == Outcome::Running {
            self.outcome = Outcome::Quit;
        }
    }

    /// Hands the player the most recent steering event of this tick.
    pub fn steer(&mut self, direction: Option<Direction>) {
        self.player.steer(direction);
    }

    /// Runs one simulation step.
    ///
    /// Order: player advances, then every live ghost independently, then
    /// same-cell collisions resolve, then the win condition is checked.
    /// No-op once the session is over.
    pub fn game_tick(&mut self, rng: &mut impl Rng) {
        if self.is_over() {
            return;
        }

        self.player.game_tick(&mut self.map);
        for ghost in &mut self.ghosts {
            ghost.game_tick(&self.map, rng);
        }

        self.resolve_collisions();
        if self.outcome == Outcome::Running && self.map.remaining_collectibles() == 0 {
            info!("maze cleared on tick {}", self.player.body.tick);
            self.outcome = Outcome::Won;
        }
    }

    /// Same-cell check between the player and each live ghost.
    ///
    /// An invulnerable player eats every ghost sharing its cell; otherwise a
    /// single shared cell ends the session.
    fn resolve_collisions(&mut self) {
        let player_cell = self.player.body.grid_pos();

        if self.player.is_invulnerable() {
            let before = self.ghosts.len();
            self.ghosts
                .retain(|ghost| ghost.body.grid_pos() != player_cell);
            let eaten = before - self.ghosts.len();
            if eaten > 0 {
                debug!("ate {eaten} ghost(s) at {player_cell:?}");
            }
        } else if self
            .ghosts
            .iter()
            .any(|ghost| ghost.body.grid_pos() == player_cell)
        {
            info!("caught by a ghost at {player_cell:?}");
            self.outcome = Outcome::Lost;
        }
    }
}
