//! Toolkit-neutral input events and screen/world mapping
//!
//! The host windowing layer translates its native events into [`InputEvent`]
//! values and feeds them to the simulation; nothing in the core depends on a
//! concrete toolkit's event types.

use glam::Vec2;

/// Key codes the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Steer the boat left
    Left,
    /// Steer the boat right
    Right,
}

/// One input event, positions in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    KeyDown(Key),
    KeyUp(Key),
}

/// Screen geometry and the shared pixels-per-meter scale.
///
/// Screen Y grows downward, world Y grows upward; the mapping inverts Y
/// against the viewport height.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixels_per_meter: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixels_per_meter: f32) -> Self {
        Self {
            width,
            height,
            pixels_per_meter,
        }
    }

    /// Map a screen-pixel position to world meters
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.pixels_per_meter,
            (self.height - screen.y) / self.pixels_per_meter,
        )
    }

    /// Map a world position back to screen pixels
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            world.x * self.pixels_per_meter,
            self.height - world.y * self.pixels_per_meter,
        )
    }
}
