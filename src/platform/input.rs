//! Pointer input
//!
//! The simulation only asks four questions of its input source. Press and
//! release are edges: they report true for the single frame in which the
//! event happened, never for a held button.

use glam::Vec2;

/// Abstract query surface over the primary pointer
pub trait InputProvider {
    /// Pressed during this frame
    fn is_primary_pointer_down(&self) -> bool;
    /// Released during this frame
    fn is_primary_pointer_up(&self) -> bool;
    fn pointer_x(&self) -> f32;
    fn pointer_y(&self) -> f32;

    fn pointer(&self) -> Vec2 {
        Vec2::new(self.pointer_x(), self.pointer_y())
    }
}

/// Concrete input provider fed by host events.
///
/// Hosts call [`press`](Self::press), [`release`](Self::release) and
/// [`move_to`](Self::move_to) as events arrive, run a tick, then call
/// [`end_frame`](Self::end_frame) to clear the edges.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    pressed: bool,
    released: bool,
    held: bool,
    pos: Vec2,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, pos: Vec2) {
        self.pos = pos;
        self.pressed = true;
        self.held = true;
    }

    pub fn release(&mut self, pos: Vec2) {
        self.pos = pos;
        self.released = true;
        self.held = false;
    }

    pub fn move_to(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    /// Button currently held down
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Clear this frame's edges
    pub fn end_frame(&mut self) {
        self.pressed = false;
        self.released = false;
    }
}

impl InputProvider for PointerState {
    fn is_primary_pointer_down(&self) -> bool {
        self.pressed
    }

    fn is_primary_pointer_up(&self) -> bool {
        self.released
    }

    fn pointer_x(&self) -> f32 {
        self.pos.x
    }

    fn pointer_y(&self) -> f32 {
        self.pos.y
    }
}
