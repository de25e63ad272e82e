/// Pressed-key snapshot consumed by camera movement
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Left,
    Back,
    Right,
}

impl MoveKey {
    pub fn opposite(self) -> MoveKey {
        match self {
            MoveKey::Forward => MoveKey::Back,
            MoveKey::Back => MoveKey::Forward,
            MoveKey::Left => MoveKey::Right,
            MoveKey::Right => MoveKey::Left,
        }
    }
}

/// Movement keys currently held.
///
/// Pressing a key releases its opposite, so forward/back and left/right are
/// never held together; the most recent press wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub left: bool,
    pub back: bool,
    pub right: bool,
}

impl MovementKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, key: MoveKey) -> bool {
        match key {
            MoveKey::Forward => self.forward,
            MoveKey::Left => self.left,
            MoveKey::Back => self.back,
            MoveKey::Right => self.right,
        }
    }

    pub fn set(&mut self, key: MoveKey, pressed: bool) {
        trace!("{:?} {}", key, if pressed { "pressed" } else { "released" });
        *self.slot(key) = pressed;
        if pressed {
            *self.slot(key.opposite()) = false;
        }
    }

    pub fn press(&mut self, key: MoveKey) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: MoveKey) {
        self.set(key, false);
    }

    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        self.forward || self.left || self.back || self.right
    }

    fn slot(&mut self, key: MoveKey) -> &mut bool {
        match key {
            MoveKey::Forward => &mut self.forward,
            MoveKey::Left => &mut self.left,
            MoveKey::Back => &mut self.back,
            MoveKey::Right => &mut self.right,
        }
    }
}
