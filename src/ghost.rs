use rand::Rng;
use rand::seq::SliceRandom;

use crate::entity::{Body, Direction};
use crate::map::TileMap;

/// Ticks between scheduled direction re-rolls.
const REROLL_PERIOD: u64 = 20;

/// A roaming enemy
///
/// Ghosts commit to a direction and keep walking it until a re-roll fires:
/// on a fixed tick schedule, at startup while no direction is committed, or
/// after being clamped at a map boundary. They never read the player or
/// other ghosts.
pub struct Ghost {
    pub body: Body,
    direction: Option<Direction>,
}

impl Ghost {
    pub fn new(x: f32, y: f32, velocity: f32) -> Self {
        Ghost {
            body: Body::new(x, y, velocity),
            direction: None,
        }
    }

    /// Advances the ghost by one simulation step.
    ///
    /// Walls block movement the same way they block the player; a blocked
    /// ghost stays put until the next scheduled re-roll. A boundary clamp
    /// re-rolls immediately, excluding the direction that hit the boundary.
    pub fn game_tick(&mut self, map: &TileMap, rng: &mut impl Rng) {
        self.body.begin_tick();

        if self.body.tick % REROLL_PERIOD == 0 || self.direction.is_none() {
            self.direction = Direction::ALL.choose(rng).copied();
        }
        let Some(direction) = self.direction else {
            return;
        };

        let outcome = self.body.step(direction, map);
        if outcome.moved {
            self.body.facing = Some(direction);
        }
        if outcome.clamped {
            self.direction = Self::reroll_excluding(direction, rng);
        }
    }

    /// Uniform pick over the three directions other than `blocked`.
    fn reroll_excluding(blocked: Direction, rng: &mut impl Rng) -> Option<Direction> {
        let others: Vec<Direction> = Direction::ALL
            .iter()
            .copied()
            .filter(|d| *d != blocked)
            .collect();
        others.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn open_map() -> TileMap {
        TileMap::parse(&vec![" ".repeat(16); 16].join("\n"), 16).unwrap()
    }

    #[test]
    fn test_startup_commits_a_direction() {
        let map = open_map();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ghost = Ghost::new(5.0, 5.0, 0.4);
        assert_eq!(ghost.direction, None);

        ghost.game_tick(&map, &mut rng);
        assert!(ghost.direction.is_some());
    }

    #[test]
    fn test_direction_persists_between_scheduled_rerolls() {
        let map = open_map();
        let mut rng = StdRng::seed_from_u64(2);
        // Center start with zero velocity: no clamp can fire, only the schedule
        let mut ghost = Ghost::new(8.0, 8.0, 0.0);

        ghost.game_tick(&map, &mut rng);
        let committed = ghost.direction;
        for _ in 0..18 {
            ghost.game_tick(&map, &mut rng);
            assert_eq!(ghost.direction, committed);
        }
    }

    #[test]
    fn test_boundary_clamp_rerolls_away_from_edge() {
        let map = open_map();
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ghost = Ghost::new(15.0, 0.0, 0.4);
            // Force the committed direction instead of rolling at startup
            ghost.direction = Some(Direction::Right);
            ghost.body.tick = 0;

            ghost.game_tick(&map, &mut rng);
            assert_eq!((ghost.body.x, ghost.body.y), (15.0, 0.0));
            assert_ne!(ghost.direction, Some(Direction::Right), "seed {seed}");
            assert!(ghost.direction.is_some());
        }
    }

    #[test]
    fn test_wall_blocks_ghost_without_reroll() {
        // Ghost boxed in on the right by an interior wall
        let mut rows = vec![" ".repeat(16); 16];
        rows[5].replace_range(6..7, "#");
        let map = TileMap::parse(&rows.join("\n"), 16).unwrap();

        let mut rng = StdRng::seed_from_u64(3);
        let mut ghost = Ghost::new(5.0, 5.0, 1.0);
        ghost.direction = Some(Direction::Right);

        ghost.game_tick(&map, &mut rng);
        assert_eq!((ghost.body.x, ghost.body.y), (5.0, 5.0));
        // An interior wall is not a boundary clamp; the commitment stands
        assert_eq!(ghost.direction, Some(Direction::Right));
    }

    #[test]
    fn test_position_stays_in_bounds_over_long_walks() {
        let map = open_map();
        let mut rng = StdRng::seed_from_u64(4);
        let mut ghost = Ghost::new(0.0, 5.0, 0.4);

        for _ in 0..1000 {
            ghost.game_tick(&map, &mut rng);
            assert!(ghost.body.x >= 0.0 && ghost.body.x <= 15.0);
            assert!(ghost.body.y >= 0.0 && ghost.body.y <= 15.0);
        }
    }
}
