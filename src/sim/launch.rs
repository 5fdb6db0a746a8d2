//! Drag-to-launch gesture state machine
//!
//! Idle -> (pointer down) -> Dragging -> (pointer up) -> Idle. While dragging,
//! the previewed launch velocity is `gain * (drag_end - drag_start)`; releasing
//! hands that velocity to the caller. Move/release events while idle are
//! no-ops, so the host never has to filter stray events.

use glam::Vec2;

use crate::consts::LAUNCH_GAIN;

#[derive(Debug, Clone)]
pub struct LaunchController {
    dragging: bool,
    drag_start: Vec2,
    drag_end: Vec2,
    /// Previewed launch velocity, recomputed on every pointer move
    initial_velocity: Vec2,
    /// Throwable position captured at gesture start (preview origin)
    starting_position: Vec2,
    gain: f32,
}

impl Default for LaunchController {
    fn default() -> Self {
        Self::new(LAUNCH_GAIN)
    }
}

impl LaunchController {
    pub fn new(gain: f32) -> Self {
        Self {
            dragging: false,
            drag_start: Vec2::ZERO,
            drag_end: Vec2::ZERO,
            initial_velocity: Vec2::ZERO,
            starting_position: Vec2::ZERO,
            gain,
        }
    }

    /// Begin a gesture at a world-space point, anchored on the throwable's
    /// current position
    pub fn pointer_down(&mut self, world_point: Vec2, body_position: Vec2) {
        self.drag_start = world_point;
        self.drag_end = world_point;
        self.initial_velocity = Vec2::ZERO;
        self.starting_position = body_position;
        self.dragging = true;
    }

    /// Update the previewed velocity; ignored while idle. Does not move the
    /// body.
    pub fn pointer_move(&mut self, world_point: Vec2) {
        if !self.dragging {
            return;
        }
        self.drag_end = world_point;
        self.initial_velocity = self.gain * (self.drag_end - self.drag_start);
    }

    /// End the gesture. Returns the launch velocity to apply, or `None` if no
    /// gesture was in progress.
    pub fn pointer_up(&mut self) -> Option<Vec2> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        let velocity = self.initial_velocity;
        self.drag_start = Vec2::ZERO;
        self.drag_end = Vec2::ZERO;
        Some(velocity)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Last computed launch velocity (live while dragging)
    pub fn initial_velocity(&self) -> Vec2 {
        self.initial_velocity
    }

    /// Preview origin for the trajectory
    pub fn starting_position(&self) -> Vec2 {
        self.starting_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_computes_launch_velocity() {
        let mut ctl = LaunchController::default();
        ctl.pointer_down(Vec2::new(5.0, 5.0), Vec2::new(5.0, 10.0));
        assert!(ctl.is_dragging());
        assert_eq!(ctl.starting_position(), Vec2::new(5.0, 10.0));

        ctl.pointer_move(Vec2::new(6.0, 5.0));
        assert_eq!(ctl.initial_velocity(), Vec2::new(10.0, 0.0));

        let launched = ctl.pointer_up().unwrap();
        assert_eq!(launched, Vec2::new(10.0, 0.0));
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn test_idle_absorbs_move_and_release() {
        let mut ctl = LaunchController::default();
        ctl.pointer_move(Vec2::new(3.0, 3.0));
        assert!(!ctl.is_dragging());
        assert_eq!(ctl.initial_velocity(), Vec2::ZERO);
        assert_eq!(ctl.pointer_up(), None);
    }

    #[test]
    fn test_release_resets_drag_points() {
        let mut ctl = LaunchController::default();
        ctl.pointer_down(Vec2::new(1.0, 1.0), Vec2::ZERO);
        ctl.pointer_move(Vec2::new(4.0, 2.0));
        ctl.pointer_up();
        assert_eq!(ctl.drag_start, Vec2::ZERO);
        assert_eq!(ctl.drag_end, Vec2::ZERO);
    }

    #[test]
    fn test_move_without_drag_after_release_is_ignored() {
        let mut ctl = LaunchController::default();
        ctl.pointer_down(Vec2::ZERO, Vec2::ZERO);
        ctl.pointer_up();
        ctl.pointer_move(Vec2::new(9.0, 9.0));
        assert_eq!(ctl.initial_velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_down_restarts_gesture() {
        let mut ctl = LaunchController::default();
        ctl.pointer_down(Vec2::new(2.0, 2.0), Vec2::ZERO);
        ctl.pointer_move(Vec2::new(5.0, 2.0));
        // A second press re-anchors instead of continuing the old gesture
        ctl.pointer_down(Vec2::new(7.0, 7.0), Vec2::ONE);
        assert_eq!(ctl.initial_velocity(), Vec2::ZERO);
        ctl.pointer_move(Vec2::new(7.0, 8.0));
        assert_eq!(ctl.initial_velocity(), Vec2::new(0.0, 10.0));
    }
}
