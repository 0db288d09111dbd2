//! Input normalization
//!
//! Keyboard, pointer and touch events all reduce to the same handful of
//! simulation commands. The simulation never sees which device was used.
//! Pointer and touch x coordinates are expected in world units.

use serde::{Deserialize, Serialize};

use crate::settings::{Settings, SwapPolicy, TouchSplit};
use crate::sim::{Command, Direction, GamePhase, GameState};

/// Logical keys (the host maps physical keys onto these)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Arrow left / A
    Left,
    /// Arrow right / D
    Right,
    /// R
    Respawn,
    /// Space
    Confirm,
}

/// Raw device event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerDown { x: f32 },
    PointerMove { x: f32 },
    PointerUp,
    TouchStart { x: f32 },
    TouchMove { x: f32 },
    TouchEnd,
}

/// Direction of `x` relative to `pivot`
#[inline]
fn side_of(x: f32, pivot: f32) -> Direction {
    if x < pivot {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// Turns device events into commands
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    pub settings: Settings,
    pointer_down: bool,
    touch_down: bool,
}

impl InputMapper {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            pointer_down: false,
            touch_down: false,
        }
    }

    /// Map one event against the current state
    pub fn map(&mut self, event: InputEvent, state: &GameState) -> Option<Command> {
        let player = &state.player;
        match event {
            InputEvent::KeyDown(Key::Left) => Self::press(Direction::Left, self.settings.keyboard_swap, state),
            InputEvent::KeyDown(Key::Right) => Self::press(Direction::Right, self.settings.keyboard_swap, state),
            InputEvent::KeyDown(Key::Respawn) => Some(Command::Respawn),
            InputEvent::KeyDown(Key::Confirm) => {
                let restart = state.phase == GamePhase::Victory || self.settings.confirm_restarts_anytime;
                restart.then_some(Command::FullReset)
            }
            InputEvent::KeyUp(Key::Left) => Self::release_if(Direction::Left, state),
            InputEvent::KeyUp(Key::Right) => Self::release_if(Direction::Right, state),
            InputEvent::KeyUp(_) => None,

            InputEvent::PointerDown { x } => {
                self.pointer_down = true;
                Some(Command::BeginCharge(side_of(x, player.center_x())))
            }
            InputEvent::PointerMove { x } => {
                if !self.pointer_down {
                    return None;
                }
                Self::follow(side_of(x, player.center_x()), self.settings.pointer_swap, state)
            }
            InputEvent::PointerUp => {
                self.pointer_down = false;
                player.charging.then_some(Command::ReleaseJump)
            }

            InputEvent::TouchStart { x } => {
                self.touch_down = true;
                Some(Command::BeginCharge(side_of(x, self.touch_pivot(state))))
            }
            InputEvent::TouchMove { x } => {
                if !self.touch_down {
                    return None;
                }
                Self::follow(side_of(x, self.touch_pivot(state)), self.settings.touch_swap, state)
            }
            InputEvent::TouchEnd => {
                self.touch_down = false;
                player.charging.then_some(Command::ReleaseJump)
            }
        }
    }

    /// Map a batch of events in arrival order
    pub fn map_all(
        &mut self,
        events: impl IntoIterator<Item = InputEvent>,
        state: &GameState,
    ) -> Vec<Command> {
        events
            .into_iter()
            .filter_map(|event| self.map(event, state))
            .collect()
    }

    fn touch_pivot(&self, state: &GameState) -> f32 {
        match self.settings.touch_split {
            TouchSplit::ScreenHalves => state.tuning.world_width / 2.0,
            TouchSplit::PlayerCenter => state.player.center_x(),
        }
    }

    fn press(direction: Direction, policy: SwapPolicy, state: &GameState) -> Option<Command> {
        if state.player.charging {
            Self::follow(direction, policy, state)
        } else {
            Some(Command::BeginCharge(direction))
        }
    }

    fn follow(direction: Direction, policy: SwapPolicy, state: &GameState) -> Option<Command> {
        let player = &state.player;
        let swap = policy == SwapPolicy::Follow
            && player.charging
            && player.charge_direction != direction;
        swap.then_some(Command::SwapDirection(direction))
    }

    /// Key release only fires the jump it started
    fn release_if(direction: Direction, state: &GameState) -> Option<Command> {
        let player = &state.player;
        (player.charging && player.charge_direction == direction).then_some(Command::ReleaseJump)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};

    fn grounded() -> GameState {
        let mut state = GameState::junk_pile(0.0);
        tick(&mut state, &TickInput::default());
        state
    }

    fn feed(mapper: &mut InputMapper, state: &mut GameState, event: InputEvent) -> Option<Command> {
        let cmd = mapper.map(event, state);
        if let Some(cmd) = cmd {
            crate::sim::apply_command(state, cmd, 0.0);
        }
        cmd
    }

    #[test]
    fn test_keyboard_charge_and_release() {
        let mut state = grounded();
        let mut mapper = InputMapper::default();

        assert_eq!(
            feed(&mut mapper, &mut state, InputEvent::KeyDown(Key::Right)),
            Some(Command::BeginCharge(Direction::Right))
        );
        // Releasing the other key does nothing
        assert_eq!(feed(&mut mapper, &mut state, InputEvent::KeyUp(Key::Left)), None);
        assert_eq!(
            feed(&mut mapper, &mut state, InputEvent::KeyUp(Key::Right)),
            Some(Command::ReleaseJump)
        );
        assert_eq!(state.player.jump_count, 1);
    }

    #[test]
    fn test_keyboard_locked_ignores_opposite_key() {
        let mut state = grounded();
        let mut mapper = InputMapper::default();
        feed(&mut mapper, &mut state, InputEvent::KeyDown(Key::Left));
        assert_eq!(feed(&mut mapper, &mut state, InputEvent::KeyDown(Key::Right)), None);
        assert_eq!(state.player.charge_direction, Direction::Left);
    }

    #[test]
    fn test_keyboard_follow_swaps() {
        let mut state = grounded();
        let mut mapper = InputMapper::new(Settings::uniform(SwapPolicy::Follow));
        feed(&mut mapper, &mut state, InputEvent::KeyDown(Key::Left));
        state.player.charge_power = 20.0;
        assert_eq!(
            feed(&mut mapper, &mut state, InputEvent::KeyDown(Key::Right)),
            Some(Command::SwapDirection(Direction::Right))
        );
        assert_eq!(state.player.charge_direction, Direction::Right);
        assert_eq!(state.player.charge_power, 20.0);
        // Letting go of the first key no longer releases
        assert_eq!(feed(&mut mapper, &mut state, InputEvent::KeyUp(Key::Left)), None);
    }

    #[test]
    fn test_pointer_direction_and_swap() {
        let mut state = grounded();
        let mut mapper = InputMapper::default();
        let center = state.player.center_x();

        assert_eq!(
            feed(&mut mapper, &mut state, InputEvent::PointerDown { x: center + 100.0 }),
            Some(Command::BeginCharge(Direction::Right))
        );
        assert_eq!(
            feed(&mut mapper, &mut state, InputEvent::PointerMove { x: center - 5.0 }),
            Some(Command::SwapDirection(Direction::Left))
        );
        assert_eq!(
            feed(&mut mapper, &mut state, InputEvent::PointerMove { x: center - 50.0 }),
            None
        );
        assert_eq!(
            feed(&mut mapper, &mut state, InputEvent::PointerUp),
            Some(Command::ReleaseJump)
        );
        // Hover after release does nothing
        assert_eq!(
            feed(&mut mapper, &mut state, InputEvent::PointerMove { x: center + 50.0 }),
            None
        );
    }

    #[test]
    fn test_touch_uses_screen_halves() {
        let mut state = grounded();
        let mut mapper = InputMapper::default();
        // Player sits far left, but the touch is on the left half
        assert_eq!(
            feed(&mut mapper, &mut state, InputEvent::TouchStart { x: 300.0 }),
            Some(Command::BeginCharge(Direction::Left))
        );
        // Locked by default
        assert_eq!(
            feed(&mut mapper, &mut state, InputEvent::TouchMove { x: 700.0 }),
            None
        );
        assert_eq!(
            feed(&mut mapper, &mut state, InputEvent::TouchEnd),
            Some(Command::ReleaseJump)
        );
    }

    #[test]
    fn test_confirm_only_restarts_after_victory() {
        let mut state = grounded();
        let mut mapper = InputMapper::default();
        assert_eq!(mapper.map(InputEvent::KeyDown(Key::Confirm), &state), None);
        state.phase = GamePhase::Victory;
        assert_eq!(
            mapper.map(InputEvent::KeyDown(Key::Confirm), &state),
            Some(Command::FullReset)
        );
        assert_eq!(
            mapper.map(InputEvent::KeyDown(Key::Respawn), &state),
            Some(Command::Respawn)
        );
    }
}
