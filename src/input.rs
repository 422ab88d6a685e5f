use hashbrown::HashSet;

/// Keys the demo reacts to, everything else maps to `Other`
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
    Space,
    Return,
    Escape,
    F1,
    Other(i32),
}

/// Platform event fed into the engine once per poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Quit,
    KeyDown(KeyCode),
    KeyUp(KeyCode),
}

/// Manage key state
#[derive(Default, Debug)]
pub struct InputState {
    down: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
    released: HashSet<KeyCode>,
}

impl InputState {
    pub(crate) fn key_down(&mut self, key: KeyCode) {
        // key repeat keeps the key down without a new press
        if self.down.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub(crate) fn key_up(&mut self, key: KeyCode) {
        if self.down.remove(&key) {
            self.released.insert(key);
        }
    }

    /// Key is held
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    /// Key went down this frame
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Key went up this frame
    pub fn just_released(&self, key: KeyCode) -> bool {
        self.released.contains(&key)
    }

    /// Clear per-frame state
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }
}
