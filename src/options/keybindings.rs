use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::display::Toggle;
use crate::camera::Movement;
use crate::input::Key;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings.
///
/// ```toml
/// [keybindings.movement]
/// forward = "w"
/// down = "shift_left"
///
/// [keybindings.toggles]
/// grid = "g"
/// ```
///
/// A table given in TOML replaces the corresponding default table as a
/// whole.
pub struct KeybindingOptions {
    /// Maps a held-key movement to its key.
    pub movement: HashMap<Movement, Key>,
    /// Maps a display toggle to the key whose press flips it.
    pub toggles: HashMap<Toggle, Key>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let movement = HashMap::from([
            (Movement::Forward, Key::W),
            (Movement::Backward, Key::S),
            (Movement::Left, Key::A),
            (Movement::Right, Key::D),
            (Movement::SpeedUp, Key::E),
            (Movement::SpeedDown, Key::Q),
            (Movement::Up, Key::Space),
            (Movement::Down, Key::ShiftLeft),
        ]);
        let toggles =
            HashMap::from([(Toggle::Grid, Key::G), (Toggle::Axes, Key::H)]);
        Self { movement, toggles }
    }
}

impl KeybindingOptions {
    /// Bound movements as `(key, movement)` pairs in [`Movement::ALL`]
    /// order. Unbound movements are skipped.
    #[must_use]
    pub fn movement_table(&self) -> Vec<(Key, Movement)> {
        Movement::ALL
            .iter()
            .filter_map(|m| self.movement.get(m).map(|key| (*key, *m)))
            .collect()
    }

    /// Look up the toggle bound to a key press.
    #[must_use]
    pub fn toggle_for(&self, key: Key) -> Option<Toggle> {
        self.toggles
            .iter()
            .find_map(|(toggle, bound)| (*bound == key).then_some(*toggle))
    }
}
