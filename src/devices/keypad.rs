//! Key state for the 16-key hex pad.

use super::Keypad;

/// Number of keys on the pad.
pub const NUM_KEYS: usize = 16;

/// Held/released state of each key, updated by the host's input polling.
///
/// Keys outside `0x0..=0xF` are ignored by [`press`](KeyState::press) and
/// [`release`](KeyState::release) and always read as up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    keys: [bool; NUM_KEYS],
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: u8) {
        if let Some(state) = self.keys.get_mut(key as usize) {
            *state = true;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(state) = self.keys.get_mut(key as usize) {
            *state = false;
        }
    }

    pub fn release_all(&mut self) {
        self.keys = [false; NUM_KEYS];
    }
}

impl Keypad for KeyState {
    fn is_key_down(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }
}
