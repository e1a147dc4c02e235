use crate::entity::{Body, Direction};
use crate::map::{Effect, TileMap};

/// The player-controlled muncher
///
/// Wraps a `Body` with the steering command coming from input and the two
/// timed effects a collectible can grant. Effect expiry stamps default to
/// "never armed" and are cleared once they fire.
pub struct Player {
    pub body: Body,
    base_velocity: f32,
    boost_velocity: f32,
    effect_duration: u64,
    commanded: Option<Direction>,
    speed_expires_at: Option<u64>,
    invulnerable_expires_at: Option<u64>,
}

impl Player {
    pub fn new(
        x: f32,
        y: f32,
        base_velocity: f32,
        boost_velocity: f32,
        effect_duration: u64,
    ) -> Self {
        Player {
            body: Body::new(x, y, base_velocity),
            base_velocity,
            boost_velocity,
            effect_duration,
            commanded: None,
            speed_expires_at: None,
            invulnerable_expires_at: None,
        }
    }

    /// Sets the commanded direction. `None` means hold position.
    ///
    /// The command persists across ticks until input changes it.
    pub fn steer(&mut self, direction: Option<Direction>) {
        self.commanded = direction;
    }

    /// True while an invulnerability window is armed.
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_expires_at.is_some()
    }

    /// Current velocity in cells per tick (boosted or base).
    pub fn velocity(&self) -> f32 {
        self.body.velocity
    }

    /// Advances the player by one simulation step.
    ///
    /// Order within the tick: consume any collectible under the current cell,
    /// expire effects that are due, then attempt the commanded move.
    pub fn game_tick(&mut self, map: &mut TileMap) {
        self.body.begin_tick();
        self.consume_at_current_cell(map);
        self.expire_effects();

        if let Some(direction) = self.commanded {
            let outcome = self.body.step(direction, map);
            if outcome.moved {
                self.body.facing = Some(direction);
            }
        }
    }

    /// Eats the collectible under the truncated position, if any.
    ///
    /// The cell is cleared exactly once; a plain dot grants nothing beyond
    /// its removal.
    fn consume_at_current_cell(&mut self, map: &mut TileMap) {
        let (gx, gy) = self.body.grid_pos();
        let Some(effect) = map.collectible_at(gx, gy) else {
            return;
        };
        match effect {
            Effect::None => {}
            Effect::SpeedBoost => {
                self.body.velocity = self.boost_velocity;
                self.speed_expires_at = Some(self.body.tick + self.effect_duration);
            }
            Effect::Invulnerability => {
                self.invulnerable_expires_at = Some(self.body.tick + self.effect_duration);
            }
        }
        map.remove(gx, gy);
    }

    /// Reverts effects whose expiry tick has been reached.
    ///
    /// Uses `>=` rather than an exact tick match so an effect still expires
    /// if a tick were ever skipped.
    fn expire_effects(&mut self) {
        if self.speed_expires_at.is_some_and(|at| self.body.tick >= at) {
            self.body.velocity = self.base_velocity;
            self.speed_expires_at = None;
        }
        if self
            .invulnerable_expires_at
            .is_some_and(|at| self.body.tick >= at)
        {
            self.invulnerable_expires_at = None;
        }
    }
}
