//! Input sources
//!
//! The device layer is outside the simulation. Whatever drives the game only
//! has to hand over an [`InputState`] once per tick; the input system copies
//! it into the [`Input`](crate::components::Input) components.

use std::collections::VecDeque;

/// Level state of the two movement controls for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    /// Move-left held (A or Left arrow)
    pub left: bool,
    /// Move-right held (D or Right arrow)
    pub right: bool,
}

impl InputState {
    /// Nothing held
    pub const IDLE: Self = Self {
        left: false,
        right: false,
    };

    /// Only left held
    pub const LEFT: Self = Self {
        left: true,
        right: false,
    };

    /// Only right held
    pub const RIGHT: Self = Self {
        left: false,
        right: true,
    };
}

/// Something that can be sampled for input once per tick
pub trait InputSource {
    /// Current level state of the controls
    fn poll(&mut self) -> InputState;
}

/// Replays a fixed sequence of states, then keeps returning the last one
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pending: VecDeque<InputState>,
    last: InputState,
}

impl ScriptedInput {
    /// Script from a sequence of per-tick states
    pub fn new(states: impl IntoIterator<Item = InputState>) -> Self {
        Self {
            pending: states.into_iter().collect(),
            last: InputState::IDLE,
        }
    }

    /// Hold `state` for `ticks` ticks after the already scripted ones
    #[must_use]
    pub fn then_hold(mut self, state: InputState, ticks: usize) -> Self {
        self.pending.extend(std::iter::repeat(state).take(ticks));
        self
    }

    /// Number of scripted states not yet replayed
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputState {
        if let Some(state) = self.pending.pop_front() {
            self.last = state;
        }
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_holds_last_state() {
        let mut input = ScriptedInput::new([InputState::LEFT]).then_hold(InputState::RIGHT, 2);
        assert_eq!(input.remaining(), 3);
        assert_eq!(input.poll(), InputState::LEFT);
        assert_eq!(input.poll(), InputState::RIGHT);
        assert_eq!(input.poll(), InputState::RIGHT);
        assert_eq!(input.poll(), InputState::RIGHT);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_empty_script_is_idle() {
        let mut input = ScriptedInput::default();
        assert_eq!(input.poll(), InputState::IDLE);
    }
}
