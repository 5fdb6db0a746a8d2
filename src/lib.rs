//! Lurecast - a drag-to-launch 2D physics playground
//!
//! Core modules:
//! - `sim`: Deterministic simulation (launch gesture, trajectory preview, environment forces, tick driver)
//! - `physics`: Narrow wrapper around the rapier2d rigid-body engine
//! - `input`: Toolkit-neutral input events and screen/world mapping
//! - `config`: Data-driven scenario configuration (throw / lure / boat variants)

pub mod config;
pub mod input;
pub mod physics;
pub mod sim;

pub use config::{ScenarioConfig, Variant};
pub use input::{InputEvent, Key, Viewport};
pub use physics::{BodyShape, PhysicsWorld, SolverIterations};
pub use sim::launch::LaunchController;
pub use sim::scene::{FrameSnapshot, SceneState};
pub use sim::tick::{SimEvent, Simulation};

/// Simulation tuning constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Solver iterations for the throw/lure variants (velocity, position)
    pub const SOLVER_ITERS_BASIC: (usize, usize) = (6, 2);
    /// Solver iterations for the boat variant (velocity, position)
    pub const SOLVER_ITERS_BOAT: (usize, usize) = (8, 3);

    /// Screen pixels per world meter for the throw/lure variants
    pub const PIXELS_PER_METER_CAST: f32 = 30.0;
    /// Screen pixels per world meter for the boat variant
    pub const PIXELS_PER_METER_BOAT: f32 = 50.0;

    /// Launch velocity per meter of drag distance
    pub const LAUNCH_GAIN: f32 = 10.0;
    /// Trajectory preview horizon in ticks (3 seconds at 60 Hz)
    pub const PREVIEW_HORIZON: u32 = 180;

    /// Per-tick horizontal velocity retention while submerged
    pub const WATER_DRAG_X: f32 = 0.9;
    /// Per-tick vertical velocity retention while submerged
    pub const WATER_DRAG_Y: f32 = 0.7;
    /// Per-tick angular velocity retention while submerged
    pub const WATER_DRAG_ANGULAR: f32 = 0.8;
}
