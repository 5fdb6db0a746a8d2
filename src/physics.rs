//! Narrow wrapper around the rapier2d rigid-body engine
//!
//! The simulation core talks to the engine exclusively through this type:
//! create a body, read/write its transform and velocity, accumulate a force
//! for the coming tick, advance one fixed step. Shape descriptions are kept as
//! plain [`BodyShape`] data alongside the engine handles so nothing outside
//! this file ever inspects an engine collider.

use glam::Vec2;
use rapier2d::{geometry::DefaultBroadPhase, prelude::*};
use std::num::NonZeroUsize;

use crate::consts::SIM_DT;

/// Constrained-solver iteration counts, fixed per variant
#[derive(Debug, Clone, Copy)]
pub struct SolverIterations {
    pub velocity: usize,
    pub position: usize,
}

impl From<(usize, usize)> for SolverIterations {
    fn from((velocity, position): (usize, usize)) -> Self {
        Self { velocity, position }
    }
}

/// How a body responds to the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Never moves
    Static,
    /// Velocity set externally, ignores forces and gravity
    Kinematic,
    /// Fully force- and gravity-driven
    Dynamic,
}

/// Authoritative shape description, owned by the scene rather than recovered
/// from engine colliders
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    Circle { radius: f32 },
    Box { half_extents: Vec2 },
    Segment { a: Vec2, b: Vec2 },
}

fn to_na(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

fn to_vec2(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// The wrapped engine world: pipeline, body/collider sets, fixed-step
/// integration parameters.
pub struct PhysicsWorld {
    pipeline: PhysicsPipeline,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2, iterations: SolverIterations) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = SIM_DT;
        integration_parameters.num_solver_iterations =
            NonZeroUsize::new(iterations.velocity.max(1)).unwrap_or(NonZeroUsize::MIN);
        integration_parameters.num_internal_pgs_iterations = iterations.position.max(1);

        Self {
            pipeline: PhysicsPipeline::new(),
            gravity: to_na(gravity),
            integration_parameters,
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Advance the world by exactly one fixed tick
    pub fn step(&mut self) {
        let physics_hooks = ();
        let event_handler = ();
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &physics_hooks,
            &event_handler,
        );
    }

    pub fn gravity(&self) -> Vec2 {
        to_vec2(&self.gravity)
    }

    /// Static edge between two endpoints (ground / boundary)
    pub fn create_static_edge(&mut self, a: Vec2, b: Vec2) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed().build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::segment(point![a.x, a.y], point![b.x, b.y]).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    pub fn create_ball(
        &mut self,
        kind: BodyKind,
        pos: Vec2,
        radius: f32,
        density: f32,
        friction: f32,
        restitution: f32,
    ) -> RigidBodyHandle {
        let builder = match kind {
            BodyKind::Static => RigidBodyBuilder::fixed(),
            BodyKind::Kinematic => RigidBodyBuilder::kinematic_velocity_based(),
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
        };
        let body = builder.translation(to_na(pos)).build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::ball(radius)
            .density(density)
            .friction(friction)
            .restitution(restitution)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    pub fn create_box(&mut self, kind: BodyKind, pos: Vec2, half_extents: Vec2) -> RigidBodyHandle {
        let builder = match kind {
            BodyKind::Static => RigidBodyBuilder::fixed(),
            BodyKind::Kinematic => RigidBodyBuilder::kinematic_velocity_based(),
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
        };
        let body = builder.translation(to_na(pos)).build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Remove a body and everything attached to it (ground replacement path)
    pub fn destroy_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    pub fn position(&self, handle: RigidBodyHandle) -> Vec2 {
        to_vec2(self.bodies[handle].translation())
    }

    pub fn set_position(&mut self, handle: RigidBodyHandle, pos: Vec2) {
        self.bodies[handle].set_translation(to_na(pos), true);
    }

    pub fn linvel(&self, handle: RigidBodyHandle) -> Vec2 {
        to_vec2(self.bodies[handle].linvel())
    }

    pub fn set_linvel(&mut self, handle: RigidBodyHandle, vel: Vec2) {
        self.bodies[handle].set_linvel(to_na(vel), true);
    }

    pub fn angvel(&self, handle: RigidBodyHandle) -> f32 {
        self.bodies[handle].angvel()
    }

    pub fn set_angvel(&mut self, handle: RigidBodyHandle, angvel: f32) {
        self.bodies[handle].set_angvel(angvel, true);
    }

    pub fn gravity_scale(&self, handle: RigidBodyHandle) -> f32 {
        self.bodies[handle].gravity_scale()
    }

    pub fn set_gravity_scale(&mut self, handle: RigidBodyHandle, scale: f32) {
        self.bodies[handle].set_gravity_scale(scale, true);
    }

    /// Switch a kinematic body into the force-driven regime (launch)
    pub fn make_dynamic(&mut self, handle: RigidBodyHandle) {
        self.bodies[handle].set_body_type(RigidBodyType::Dynamic, true);
    }

    pub fn is_dynamic(&self, handle: RigidBodyHandle) -> bool {
        self.bodies[handle].is_dynamic()
    }

    /// Replace the body's accumulated force with `force` for the coming tick
    pub fn push_force(&mut self, handle: RigidBodyHandle, force: Vec2) {
        let body = &mut self.bodies[handle];
        body.reset_forces(true);
        body.add_force(to_na(force), true);
    }
}
