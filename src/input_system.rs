use sdl2::EventPump;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use crate::entity::Direction;

/// Discrete events the simulation consumes
///
/// This enum decouples raw SDL2 input from the game loop: the event pump is
/// polled once per tick and translated into these high-level intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close or Escape. Ends the session outside the simulation.
    Quit,
    /// Steering intent; `None` releases to neutral (hold position).
    Steer(Option<Direction>),
}

/// Translates SDL2 events into `InputEvent`s
pub struct InputSystem;

impl InputSystem {
    pub fn new() -> Self {
        InputSystem
    }

    /// Polls all pending SDL2 events for this tick.
    ///
    /// Arrow keys steer, Space releases to neutral, Escape and window close
    /// quit. Everything else is ignored.
    pub fn poll_events(&self, event_pump: &mut EventPump) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => {
                    events.push(InputEvent::Quit);
                }
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(steer) = steer_for_key(key) {
                        events.push(steer);
                    }
                }
                _ => {}
            }
        }

        events
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn steer_for_key(key: Keycode) -> Option<InputEvent> {
    match key {
        Keycode::Right => Some(InputEvent::Steer(Some(Direction::Right))),
        Keycode::Down => Some(InputEvent::Steer(Some(Direction::Down))),
        Keycode::Left => Some(InputEvent::Steer(Some(Direction::Left))),
        Keycode::Up => Some(InputEvent::Steer(Some(Direction::Up))),
        Keycode::Space => Some(InputEvent::Steer(None)),
        _ => None,
    }
}

/// Most recent steering event of the tick, if any.
///
/// The simulation consumes at most one steering intent per tick; earlier
/// ones in the same batch are superseded, never queued.
pub fn latest_steer(events: &[InputEvent]) -> Option<Option<Direction>> {
    events.iter().rev().find_map(|event| match event {
        InputEvent::Steer(direction) => Some(*direction),
        InputEvent::Quit => None,
    })
}
