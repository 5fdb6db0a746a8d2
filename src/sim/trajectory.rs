//! Ballistic trajectory prediction for the drag preview
//!
//! Closed-form position after `n` fixed semi-implicit Euler steps under
//! constant gravity, matching the engine's integration scheme:
//!
//! ```text
//! v(k+1) = v(k) + g*dt        p(k+1) = p(k) + v(k+1)*dt
//! p(n)   = p0 + n*v0*dt + 0.5*(n^2 + n)*g*dt^2
//! ```
//!
//! Valid only while no damping acts on the body; the preview deliberately
//! ignores water drag, as the simulation is frozen while dragging anyway.

use glam::Vec2;

use crate::consts::{PREVIEW_HORIZON, SIM_DT};

/// Predicted position after `step` fixed ticks. Pure, no side effects.
pub fn predict(start_pos: Vec2, start_vel: Vec2, gravity: Vec2, step: u32) -> Vec2 {
    let t = SIM_DT;
    let step_velocity = start_vel * t;
    let step_gravity = gravity * (t * t);
    let n = step as f32;
    start_pos + n * step_velocity + 0.5 * (n * n + n) * step_gravity
}

/// The full preview point sequence over the fixed horizon (180 ticks ≈ 3 s)
pub fn preview(start_pos: Vec2, start_vel: Vec2, gravity: Vec2) -> Vec<Vec2> {
    (0..PREVIEW_HORIZON)
        .map(|step| predict(start_pos, start_vel, gravity, step))
        .collect()
}
