//! Per-tick environment policies
//!
//! Applied to bodies before each world step: anisotropic water drag, the
//! terminal target-depth clamp, bounded random fish wander with boundary
//! velocity reflection, and the line-follows-boat anchor constraint. Each
//! policy is a free function over the physics world and the relevant scene
//! piece, so they compose per variant and test in isolation.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{WATER_DRAG_ANGULAR, WATER_DRAG_X, WATER_DRAG_Y};
use crate::physics::PhysicsWorld;
use crate::sim::scene::{BoatRig, FishPool, Throwable, WaterState};

/// Water resistance: while the throwable sits at or below the surface, scale
/// its velocity by the per-tick retention factors. Factors are in (0, 1), so
/// damping alone never flips a velocity component's sign.
pub fn apply_water_drag(world: &mut PhysicsWorld, throwable: &Throwable, water: &WaterState) {
    let handle = throwable.handle;
    if !world.is_dynamic(handle) {
        return;
    }
    if world.position(handle).y <= water.level {
        let v = world.linvel(handle);
        world.set_linvel(handle, Vec2::new(v.x * WATER_DRAG_X, v.y * WATER_DRAG_Y));
        world.set_angvel(handle, world.angvel(handle) * WATER_DRAG_ANGULAR);
    }
}

/// Target-depth clamp: once the throwable sinks to the clamp level, zero its
/// velocities and neutralize gravity. Terminal until the next launch; while
/// settled the velocities are re-zeroed every tick so contact jitter cannot
/// move the lure. Returns true on the tick the clamp first engages.
pub fn apply_depth_clamp(
    world: &mut PhysicsWorld,
    throwable: &Throwable,
    water: &mut WaterState,
) -> bool {
    let handle = throwable.handle;
    if water.settled {
        world.set_linvel(handle, Vec2::ZERO);
        world.set_angvel(handle, 0.0);
        return false;
    }
    if world.is_dynamic(handle) && world.position(handle).y <= water.clamp_level() {
        world.set_linvel(handle, Vec2::ZERO);
        world.set_angvel(handle, 0.0);
        world.set_gravity_scale(handle, 0.0);
        water.settled = true;
        return true;
    }
    false
}

/// Fish wander: a bounded uniform random horizontal force each tick, plus
/// velocity reflection once a fish strays outside [bound_min, bound_max].
/// Reflection negates the horizontal velocity instead of repositioning, so a
/// fish may overshoot the bound for a tick before turning back.
pub fn apply_fish_wander(world: &mut PhysicsWorld, pool: &FishPool, rng: &mut Pcg32) {
    for fish in &pool.fish {
        let fx = rng.random_range(-pool.max_force..=pool.max_force);
        world.push_force(fish.handle, Vec2::new(fx, 0.0));

        let x = world.position(fish.handle).x;
        if x < pool.bound_min || x > pool.bound_max {
            let v = world.linvel(fish.handle);
            world.set_linvel(fish.handle, Vec2::new(-v.x, v.y));
        }
    }
}

/// Line anchor constraint: the line's X tracks the boat's X by direct
/// transform override every tick; its Y stays velocity-controlled. At the
/// travel limits any velocity pointing further out is zeroed (hard stop, no
/// bounce), while velocity back into range is left alone.
pub fn apply_line_anchor(world: &mut PhysicsWorld, rig: &BoatRig) {
    let boat_x = world.position(rig.boat).x;
    let line_pos = world.position(rig.line);
    world.set_position(rig.line, Vec2::new(boat_x, line_pos.y));

    let v = world.linvel(rig.line);
    let blocked_low = line_pos.y <= rig.line_lower_limit && v.y < 0.0;
    let blocked_high = line_pos.y >= rig.line_upper_limit && v.y > 0.0;
    if blocked_low || blocked_high {
        world.set_linvel(rig.line, Vec2::new(v.x, 0.0));
    }
}
