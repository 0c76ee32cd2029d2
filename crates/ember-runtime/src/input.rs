//! Input state tracking and intent sampling

use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Normalized per-tick movement request derived from raw input.
///
/// Recomputed fresh every tick by [`InputState::sample`]; never persisted.
/// `jump` reports held state: the simulation decides whether a held key
/// re-triggers (it does on the ground, matching classic platformer feel).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    /// Requested horizontal direction: -1, 0, or 1. Opposed keys cancel.
    pub move_axis: i8,
    /// Whether the jump action is held this tick
    pub jump: bool,
}

/// Tracks keyboard input state fed by an external backend.
///
/// The backend pushes key transitions in; the simulation only ever sees
/// the [`Intent`] produced by [`sample`](InputState::sample). Actions are
/// rebindable, with platformer defaults (arrows/WASD plus space).
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Keys released this frame
    keys_just_released: HashSet<KeyCode>,

    /// Action map: action name -> list of key bindings
    action_map: HashMap<String, Vec<KeyCode>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            keys_just_released: HashSet::new(),
            action_map: Self::default_action_map(),
        }
    }

    fn default_action_map() -> HashMap<String, Vec<KeyCode>> {
        let mut map = HashMap::new();
        map.insert(
            "move_left".into(),
            vec![KeyCode::ArrowLeft, KeyCode::KeyA],
        );
        map.insert(
            "move_right".into(),
            vec![KeyCode::ArrowRight, KeyCode::KeyD],
        );
        map.insert("jump".into(), vec![KeyCode::Space]);
        map
    }

    /// Bind an action to one or more keys, replacing previous bindings
    pub fn bind_action(&mut self, action: impl Into<String>, keys: Vec<KeyCode>) {
        self.action_map.insert(action.into(), keys);
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_just_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
        self.keys_just_released.insert(key);
    }

    /// Call after all systems have ticked to clear per-frame edge state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
    }

    /// Is a key currently held down?
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Is an action currently held? (any bound key is down)
    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_down.contains(k)))
            .unwrap_or(false)
    }

    /// Was an action just pressed this frame?
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_just_pressed.contains(k)))
            .unwrap_or(false)
    }

    /// Was an action just released this frame?
    pub fn is_action_just_released(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_just_released.contains(k)))
            .unwrap_or(false)
    }

    /// Derive the normalized movement intent from the current key state.
    ///
    /// Pure with respect to the tracked sets: same keys, same intent.
    /// Holding both directions yields a net axis of zero, so the axis is
    /// always in {-1, 0, 1}.
    pub fn sample(&self) -> Intent {
        let mut axis: i8 = 0;
        if self.is_action_pressed("move_left") {
            axis -= 1;
        }
        if self.is_action_pressed("move_right") {
            axis += 1;
        }
        Intent {
            move_axis: axis,
            jump: self.is_action_pressed("jump"),
        }
    }
}
