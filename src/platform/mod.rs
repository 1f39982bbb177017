//! Platform abstraction layer
//!
//! Input arrives as logical actions, independent of any window or keyboard
//! library. A backend implements [`InputSource`]; the game converts each
//! polled snapshot into a [`TickInput`].

use std::collections::VecDeque;

use crate::sim::TickInput;

/// Logical input actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Thrust,
    TurnLeft,
    TurnRight,
    Fire,
    Dash,
    Hyperspace,
    Confirm,
    Cancel,
    Quit,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::Thrust,
        Action::TurnLeft,
        Action::TurnRight,
        Action::Fire,
        Action::Dash,
        Action::Hyperspace,
        Action::Confirm,
        Action::Cancel,
        Action::Quit,
    ];

    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Compact set of actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet(u16);

impl ActionSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members of `self` missing from `other`
    pub fn difference(&self, other: &ActionSet) -> ActionSet {
        ActionSet(self.0 & !other.0)
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = ActionSet::empty();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

/// Key state for one frame: what is held, and what went down this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub held: ActionSet,
    pub pressed: ActionSet,
}

impl InputSnapshot {
    pub fn quit_requested(&self) -> bool {
        self.pressed.contains(Action::Quit)
    }

    /// Translate to simulation input. The turn keys double as catalog
    /// navigation.
    pub fn to_tick_input(&self, idle_mode: bool) -> TickInput {
        TickInput {
            thrust: self.held.contains(Action::Thrust),
            turn_left: self.held.contains(Action::TurnLeft),
            turn_right: self.held.contains(Action::TurnRight),
            fire: self.pressed.contains(Action::Fire),
            dash: self.pressed.contains(Action::Dash),
            hyperspace: self.pressed.contains(Action::Hyperspace),
            confirm: self.pressed.contains(Action::Confirm),
            left: self.pressed.contains(Action::TurnLeft),
            right: self.pressed.contains(Action::TurnRight),
            cancel: self.pressed.contains(Action::Cancel),
            idle_mode,
        }
    }
}

/// Polled once per frame; never blocks
pub trait InputSource {
    fn poll(&mut self) -> InputSnapshot;
}

/// Derives just-pressed actions for backends that only report held keys
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    previous: ActionSet,
}

impl EdgeDetector {
    pub fn update(&mut self, held: ActionSet) -> InputSnapshot {
        let pressed = held.difference(&self.previous);
        self.previous = held;
        InputSnapshot { held, pressed }
    }
}

/// Replays a fixed list of held-key frames, then reports nothing held
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<ActionSet>,
    edges: EdgeDetector,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = ActionSet>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            edges: EdgeDetector::default(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputSnapshot {
        let held = self.frames.pop_front().unwrap_or_default();
        self.edges.update(held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_set() {
        let set: ActionSet = [Action::Fire, Action::Quit].into_iter().collect();
        assert!(set.contains(Action::Fire));
        assert!(set.contains(Action::Quit));
        assert!(!set.contains(Action::Thrust));
        assert!(ActionSet::empty().is_empty());
        for action in Action::ALL {
            assert_eq!(
                ActionSet::from_iter([action]).difference(&set).is_empty(),
                set.contains(action)
            );
        }
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let fire: ActionSet = [Action::Fire, Action::Thrust].into_iter().collect();
        let mut input = ScriptedInput::new([fire, fire, ActionSet::empty(), fire]);

        let first = input.poll().to_tick_input(false);
        assert!(first.fire && first.thrust);
        let held = input.poll().to_tick_input(false);
        assert!(!held.fire && held.thrust);
        input.poll();
        assert!(input.poll().to_tick_input(false).fire);
        assert_eq!(input.remaining(), 0);
        assert_eq!(input.poll(), InputSnapshot::default());
    }

    #[test]
    fn test_turn_keys_navigate_catalog() {
        let mut edges = EdgeDetector::default();
        let snap = edges.update(ActionSet::from_iter([Action::TurnRight]));
        let tick = snap.to_tick_input(false);
        assert!(tick.right && tick.turn_right && !tick.left);
    }

    #[test]
    fn test_quit() {
        let mut edges = EdgeDetector::default();
        assert!(edges.update(ActionSet::from_iter([Action::Quit])).quit_requested());
    }
}
