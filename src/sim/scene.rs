//! Scene data model
//!
//! Owns the engine handles plus the authoritative plain-data description of
//! every body (endpoints, radii, half-extents), so rendering reads shapes from
//! here instead of downcasting engine colliders. Built fully up front from a
//! [`ScenarioConfig`]; once constructed, every handle the variant promises is
//! guaranteed present.

use glam::Vec2;
use rapier2d::prelude::RigidBodyHandle;

use crate::config::ScenarioConfig;
use crate::physics::{BodyKind, BodyShape, PhysicsWorld};

/// Static ground edge: engine handle plus authoritative endpoints
#[derive(Debug, Clone, Copy)]
pub struct Ground {
    pub handle: RigidBodyHandle,
    pub a: Vec2,
    pub b: Vec2,
}

/// The player-controlled projectile
#[derive(Debug, Clone, Copy)]
pub struct Throwable {
    pub handle: RigidBodyHandle,
    pub radius: f32,
    /// Launch origin recorded at gesture start
    pub starting_position: Vec2,
    /// Last applied launch velocity
    pub initial_velocity: Vec2,
}

/// Water surface, target depth and the derived per-tick flags
#[derive(Debug, Clone, Copy)]
pub struct WaterState {
    /// Y threshold of the surface
    pub level: f32,
    /// Resting depth below the surface
    pub target_depth: f32,
    /// Derived each tick from the throwable's post-step Y
    pub in_water: bool,
    /// Terminal resting sub-state: reached target depth, held until relaunch
    pub settled: bool,
}

impl WaterState {
    /// Y below which the depth clamp engages
    pub fn clamp_level(&self) -> f32 {
        self.level - self.target_depth
    }
}

/// One wandering fish
#[derive(Debug, Clone, Copy)]
pub struct FishState {
    pub handle: RigidBodyHandle,
    pub radius: f32,
}

/// Fish pool plus its shared wander parameters
#[derive(Debug, Clone, Default)]
pub struct FishPool {
    pub fish: Vec<FishState>,
    pub bound_min: f32,
    pub bound_max: f32,
    pub max_force: f32,
}

/// Kinematic boat and its slaved fishing line
#[derive(Debug, Clone, Copy)]
pub struct BoatRig {
    pub boat: RigidBodyHandle,
    pub boat_half_extents: Vec2,
    pub line: RigidBodyHandle,
    pub line_half_extents: Vec2,
    pub speed: f32,
    pub line_speed: f32,
    pub line_lower_limit: f32,
    pub line_upper_limit: f32,
}

/// All scene bodies for one running simulation
#[derive(Debug, Clone, Default)]
pub struct SceneState {
    pub ground: Option<Ground>,
    pub throwable: Option<Throwable>,
    pub water: Option<WaterState>,
    pub fish: FishPool,
    pub boat: Option<BoatRig>,
}

impl SceneState {
    /// Create every body the scenario calls for before the loop starts
    pub fn from_config(config: &ScenarioConfig, world: &mut PhysicsWorld) -> Self {
        let ground = config.ground.map(|g| Ground {
            handle: world.create_static_edge(g.a, g.b),
            a: g.a,
            b: g.b,
        });

        // Kinematic until the first launch, so it holds still while aiming
        let throwable = config.throwable.map(|t| Throwable {
            handle: world.create_ball(
                BodyKind::Kinematic,
                t.start,
                t.radius,
                t.density,
                t.friction,
                t.restitution,
            ),
            radius: t.radius,
            starting_position: t.start,
            initial_velocity: Vec2::ZERO,
        });

        let water = config.water.map(|w| WaterState {
            level: w.level,
            target_depth: w.target_depth,
            in_water: false,
            settled: false,
        });

        let mut fish = FishPool::default();
        if let Some(f) = config.fish {
            fish.bound_min = f.bound_min;
            fish.bound_max = f.bound_max;
            fish.max_force = f.max_force;
            let span = f.bound_max - f.bound_min;
            let band = f.spawn_y_max - f.spawn_y_min;
            for i in 0..f.count {
                // Evenly staggered spawn positions inside the wander box
                let frac = (i + 1) as f32 / (f.count + 1) as f32;
                let pos = Vec2::new(
                    f.bound_min + frac * span,
                    f.spawn_y_min + (frac * 3.0).fract() * band,
                );
                let handle = world.create_ball(BodyKind::Dynamic, pos, f.radius, 1.0, 0.3, 0.2);
                // Fish neither sink nor float: they drift on wander forces only
                world.set_gravity_scale(handle, 0.0);
                fish.fish.push(FishState {
                    handle,
                    radius: f.radius,
                });
            }
        }

        let boat = config.boat.map(|b| {
            let line_half_extents = Vec2::new(0.05, 0.4);
            let line_start = Vec2::new(b.start.x, b.line_upper_limit);
            BoatRig {
                boat: world.create_box(BodyKind::Kinematic, b.start, b.half_extents),
                boat_half_extents: b.half_extents,
                line: world.create_box(BodyKind::Kinematic, line_start, line_half_extents),
                line_half_extents,
                speed: b.speed,
                line_speed: b.line_speed,
                line_lower_limit: b.line_lower_limit,
                line_upper_limit: b.line_upper_limit,
            }
        });

        Self {
            ground,
            throwable,
            water,
            fish,
            boat,
        }
    }

    /// Replace the ground edge. The old static body is destroyed and a fresh
    /// one created, because an attached shape is immutable.
    pub fn set_ground(&mut self, world: &mut PhysicsWorld, a: Vec2, b: Vec2) {
        if let Some(old) = self.ground.take() {
            world.destroy_body(old.handle);
        }
        self.ground = Some(Ground {
            handle: world.create_static_edge(a, b),
            a,
            b,
        });
    }
}

/// A body position paired with its authoritative shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyView {
    pub position: Vec2,
    pub shape: BodyShape,
}

/// Per-frame read-only snapshot handed to the host renderer
#[derive(Debug, Clone, Default)]
pub struct FrameSnapshot {
    pub ground: Option<(Vec2, Vec2)>,
    pub throwable: Option<BodyView>,
    pub fish: Vec<BodyView>,
    pub boat: Option<BodyView>,
    pub line: Option<BodyView>,
    /// Water surface line, when the variant has water
    pub water_level: Option<f32>,
    /// Predicted trajectory points, present only while dragging
    pub preview: Option<Vec<Vec2>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;
    use crate::consts::{SOLVER_ITERS_BASIC, SOLVER_ITERS_BOAT};

    #[test]
    fn test_throw_scene_bodies() {
        let config = ScenarioConfig::throw();
        let mut world = PhysicsWorld::new(config.gravity, SOLVER_ITERS_BASIC.into());
        let scene = SceneState::from_config(&config, &mut world);
        assert!(scene.ground.is_some());
        let throwable = scene.throwable.unwrap();
        assert_eq!(world.position(throwable.handle), Vec2::new(5.0, 10.0));
        assert!(scene.water.is_none());
        assert!(scene.fish.fish.is_empty());
    }

    #[test]
    fn test_boat_scene_bodies() {
        let config = ScenarioConfig::boat();
        let mut world = PhysicsWorld::new(config.gravity, SOLVER_ITERS_BOAT.into());
        let scene = SceneState::from_config(&config, &mut world);
        let rig = scene.boat.unwrap();
        assert_eq!(scene.fish.fish.len(), 5);
        // Line spawns raised, anchored on the boat's X
        assert_eq!(world.position(rig.line).x, world.position(rig.boat).x);
        assert_eq!(world.position(rig.line).y, rig.line_upper_limit);
        // Fish spawn inside the wander bounds with gravity neutralized
        for fish in &scene.fish.fish {
            let x = world.position(fish.handle).x;
            assert!(x >= scene.fish.bound_min && x <= scene.fish.bound_max);
            assert_eq!(world.gravity_scale(fish.handle), 0.0);
        }
    }

    #[test]
    fn test_ground_replacement() {
        let config = ScenarioConfig::throw();
        let mut world = PhysicsWorld::new(config.gravity, SOLVER_ITERS_BASIC.into());
        let mut scene = SceneState::from_config(&config, &mut world);
        let old = scene.ground.unwrap().handle;

        scene.set_ground(&mut world, Vec2::new(-5.0, 1.0), Vec2::new(30.0, 1.0));
        let new = scene.ground.unwrap();
        assert_ne!(new.handle, old);
        assert_eq!(new.a, Vec2::new(-5.0, 1.0));
        assert_eq!(new.b, Vec2::new(30.0, 1.0));
    }
}
