//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod forces;
pub mod launch;
pub mod scene;
pub mod tick;
pub mod trajectory;

pub use launch::LaunchController;
pub use scene::{BodyView, FishState, FrameSnapshot, SceneState, WaterState};
pub use tick::{SimEvent, Simulation};
pub use trajectory::{predict, preview};
