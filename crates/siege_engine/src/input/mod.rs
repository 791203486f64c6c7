//! Input management system
//!
//! Tracks keyboard state across frames so gameplay code can distinguish
//! keys held down from keys pressed this frame (edge detection).

use std::collections::HashSet;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// S key
    S,
    /// W key
    W,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Keyboard state with per-frame edge detection
#[derive(Debug, Default)]
pub struct InputState {
    current: HashSet<KeyCode>,
    previous: HashSet<KeyCode>,
}

impl InputState {
    /// Create a new input state with no keys down
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll the current frame's state into the previous frame
    ///
    /// Call once at the start of each frame, before feeding new key events.
    pub fn begin_frame(&mut self) {
        self.previous = self.current.clone();
    }

    /// Record a key transition from the platform layer
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.current.insert(key);
        } else {
            self.current.remove(&key);
        }
    }

    /// Whether the key is currently held down
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.current.contains(&key)
    }

    /// Whether the key went down this frame (down now, up last frame)
    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.current.contains(&key) && !self.previous.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_only_fires_on_edge() {
        let mut input = InputState::new();

        input.begin_frame();
        input.set_key(KeyCode::A, true);
        assert!(input.was_pressed(KeyCode::A));
        assert!(input.is_down(KeyCode::A));

        // Held across the next frame: down but no longer an edge
        input.begin_frame();
        assert!(!input.was_pressed(KeyCode::A));
        assert!(input.is_down(KeyCode::A));
    }

    #[test]
    fn test_release_and_repress() {
        let mut input = InputState::new();

        input.begin_frame();
        input.set_key(KeyCode::Space, true);
        input.begin_frame();
        input.set_key(KeyCode::Space, false);
        assert!(!input.is_down(KeyCode::Space));

        input.begin_frame();
        input.set_key(KeyCode::Space, true);
        assert!(input.was_pressed(KeyCode::Space));
    }
}
