//=========================================================================
// Player Input Binding
//
// Maps physical keys to game actions and game actions to scene
// commands, producing commands into the queue each tick.
//
// Two delivery modes:
// - Realtime actions (movement) enqueue every tick while the key is
//   held, polled through `InputSource`.
// - One-shot actions fire once on the key's rising edge; a per-key
//   shadow flag suppresses repeats until the key is released.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;

//=== External Dependencies ===============================================

use log::info;
use nalgebra::Vector3;

//=== Internal Modules ====================================================

use crate::core::category::Category;
use crate::core::command::{Command, CommandQueue};
use crate::input::{InputSource, KeyCode};

//=== Constants ===========================================================

/// Player acceleration magnitude per held movement key, units/s².
pub const PLAYER_SPEED: f32 = 10.0;

//=== Action ==============================================================

/// High-level game action a key can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,

    /// Logs the player craft's current position. One-shot.
    PrintPosition,
}

impl Action {
    /// Realtime actions repeat while held; one-shot actions fire on the
    /// rising edge only.
    pub fn is_realtime(self) -> bool {
        matches!(
            self,
            Self::MoveLeft | Self::MoveRight | Self::MoveUp | Self::MoveDown
        )
    }
}

//=== Player ==============================================================

/// Key bindings and command production for the player.
///
/// Holds the key→action and action→command tables plus the per-key
/// pressed flags driving one-shot edge detection.
pub struct Player {
    key_binding: HashMap<KeyCode, Action>,
    action_binding: HashMap<Action, Command>,
    key_flags: HashMap<KeyCode, bool>,
}

impl Player {
    /// Creates a player with the default bindings: W/S/A/D for movement
    /// and X for position logging. One key per action.
    pub fn new() -> Self {
        let mut key_binding = HashMap::new();
        key_binding.insert(KeyCode::KeyW, Action::MoveUp);
        key_binding.insert(KeyCode::KeyS, Action::MoveDown);
        key_binding.insert(KeyCode::KeyA, Action::MoveLeft);
        key_binding.insert(KeyCode::KeyD, Action::MoveRight);
        key_binding.insert(KeyCode::KeyX, Action::PrintPosition);

        let key_flags = key_binding.keys().map(|key| (*key, false)).collect();

        Self {
            key_binding,
            action_binding: Self::initialize_actions(),
            key_flags,
        }
    }

    /// Builds the action→command table.
    fn initialize_actions() -> HashMap<Action, Command> {
        fn accelerate(x: f32, y: f32) -> Command {
            Command::new(Category::PLAYER_AIRCRAFT, move |node, _| {
                node.accelerate(Vector3::new(x, y, 0.0));
            })
        }

        let mut bindings = HashMap::new();
        bindings.insert(Action::MoveLeft, accelerate(-PLAYER_SPEED, 0.0));
        bindings.insert(Action::MoveRight, accelerate(PLAYER_SPEED, 0.0));
        bindings.insert(Action::MoveUp, accelerate(0.0, PLAYER_SPEED));
        bindings.insert(Action::MoveDown, accelerate(0.0, -PLAYER_SPEED));
        bindings.insert(
            Action::PrintPosition,
            Command::new(Category::PLAYER_AIRCRAFT, |node, _| {
                let position = node.position();
                info!(
                    "player position: ({:.2}, {:.2}, {:.2})",
                    position.x, position.y, position.z
                );
            }),
        );
        bindings
    }

    //--- Command Production -----------------------------------------------

    /// Processes one-shot bindings against the current key snapshot.
    ///
    /// A command enqueues on the rising edge only; the shadow flag
    /// clears on release, re-arming the binding.
    pub fn handle_event(&mut self, input: &dyn InputSource, commands: &mut CommandQueue) {
        let Self {
            key_binding,
            action_binding,
            key_flags,
        } = self;

        for (key, action) in key_binding.iter() {
            if action.is_realtime() {
                continue;
            }

            let down = input.is_key_down(*key);
            let flag = key_flags.entry(*key).or_insert(false);
            if down && !*flag {
                *flag = true;
                if let Some(command) = action_binding.get(action) {
                    commands.push(command.clone());
                }
            } else if !down {
                *flag = false;
            }
        }
    }

    /// Enqueues one command per held realtime binding.
    pub fn handle_realtime_input(&self, input: &dyn InputSource, commands: &mut CommandQueue) {
        for (key, action) in self.key_binding.iter() {
            if action.is_realtime() && input.is_key_down(*key) {
                if let Some(command) = self.action_binding.get(action) {
                    commands.push(command.clone());
                }
            }
        }
    }

    //--- Binding Management -----------------------------------------------

    /// Rebinds `action` to `key`, unbinding whatever key previously
    /// triggered the action (one key per action).
    pub fn assign_key(&mut self, action: Action, key: KeyCode) {
        let Self {
            key_binding,
            key_flags,
            ..
        } = self;

        key_binding.retain(|bound_key, bound_action| {
            let keep = *bound_action != action;
            if !keep {
                key_flags.remove(bound_key);
            }
            keep
        });

        key_binding.insert(key, action);
        key_flags.insert(key, false);
    }

    /// Key currently bound to `action`, if any.
    pub fn assigned_key(&self, action: Action) -> Option<KeyCode> {
        self.key_binding
            .iter()
            .find(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::{AircraftType, NodeHandle, SceneNode};
    use crate::input::KeyboardState;
    use crate::time::GameTimer;

    /// Rebinding moves the action to the new key and retires the old.
    #[test]
    fn assign_key_replaces_previous_binding() {
        let mut player = Player::new();
        assert_eq!(player.assigned_key(Action::MoveUp), Some(KeyCode::KeyW));

        player.assign_key(Action::MoveUp, KeyCode::KeyJ);
        assert_eq!(player.assigned_key(Action::MoveUp), Some(KeyCode::KeyJ));

        // The old key produces nothing.
        let mut keyboard = KeyboardState::new();
        keyboard.press(KeyCode::KeyW);
        let mut queue = CommandQueue::new();
        player.handle_realtime_input(&keyboard, &mut queue);
        assert!(queue.is_empty());

        // The new one does.
        keyboard.press(KeyCode::KeyJ);
        player.handle_realtime_input(&keyboard, &mut queue);
        assert_eq!(queue.len(), 1);
    }

    /// Held realtime bindings enqueue every tick and stop on release.
    #[test]
    fn realtime_binding_repeats_while_held() {
        let player = Player::new();
        let mut keyboard = KeyboardState::new();
        let mut queue = CommandQueue::new();

        keyboard.press(KeyCode::KeyD);
        player.handle_realtime_input(&keyboard, &mut queue);
        player.handle_realtime_input(&keyboard, &mut queue);
        assert_eq!(queue.len(), 2);

        keyboard.release(KeyCode::KeyD);
        player.handle_realtime_input(&keyboard, &mut queue);
        assert_eq!(queue.len(), 2);
    }

    /// One-shot bindings fire on the rising edge only, and re-arm after
    /// release.
    #[test]
    fn one_shot_binding_is_edge_triggered() {
        let mut player = Player::new();
        let mut keyboard = KeyboardState::new();
        let mut queue = CommandQueue::new();

        keyboard.press(KeyCode::KeyX);
        player.handle_event(&keyboard, &mut queue);
        player.handle_event(&keyboard, &mut queue);
        assert_eq!(queue.len(), 1);

        keyboard.release(KeyCode::KeyX);
        player.handle_event(&keyboard, &mut queue);
        assert_eq!(queue.len(), 1);

        keyboard.press(KeyCode::KeyX);
        player.handle_event(&keyboard, &mut queue);
        assert_eq!(queue.len(), 2);
    }

    /// Produced movement commands accelerate a player aircraft node.
    #[test]
    fn movement_command_accelerates_player_craft() {
        let player = Player::new();
        let mut keyboard = KeyboardState::new();
        let mut queue = CommandQueue::new();
        keyboard.press(KeyCode::KeyW);
        player.handle_realtime_input(&keyboard, &mut queue);

        let craft = NodeHandle::new(SceneNode::aircraft(AircraftType::Eagle));
        let timer = GameTimer::from_delta(0.016);
        let command = queue.pop();
        craft.on_command(&command, &timer);

        assert_eq!(
            craft.get().velocity(),
            Vector3::new(0.0, PLAYER_SPEED, 0.0)
        );
    }

    /// Movement keys are realtime, the position logger is not.
    #[test]
    fn action_delivery_modes() {
        assert!(Action::MoveLeft.is_realtime());
        assert!(Action::MoveDown.is_realtime());
        assert!(!Action::PrintPosition.is_realtime());
    }
}
