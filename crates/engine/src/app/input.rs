#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Quit,
}

const ACTION_COUNT: usize = 5;

/// Held state for every [`InputAction`], indexed by the action itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Quit => 4,
        }
    }
}

/// Edge-triggered key tracker: reports a press once until the key is released.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PressEdge {
    is_down: bool,
    pressed: bool,
}

impl PressEdge {
    pub(crate) fn handle(&mut self, is_pressed: bool) {
        if is_pressed {
            if !self.is_down {
                self.pressed = true;
            }
            self.is_down = true;
        } else {
            self.is_down = false;
        }
    }

    pub(crate) fn take(&mut self) -> bool {
        let was_pressed = self.pressed;
        self.pressed = false;
        was_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_states_track_each_action_independently() {
        let mut states = ActionStates::default();
        states.set(InputAction::MoveLeft, true);
        states.set(InputAction::MoveUp, true);
        states.set(InputAction::MoveUp, false);

        assert!(states.is_down(InputAction::MoveLeft));
        assert!(!states.is_down(InputAction::MoveUp));
        assert!(!states.is_down(InputAction::Quit));
    }

    #[test]
    fn press_edge_fires_once_per_physical_press() {
        let mut edge = PressEdge::default();

        edge.handle(true);
        assert!(edge.take());
        edge.handle(true);
        assert!(!edge.take());
        edge.handle(false);
        edge.handle(true);
        assert!(edge.take());
    }
}
