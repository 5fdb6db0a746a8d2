//! Scenario configuration
//!
//! Everything the embedder may tune lives here: which variant runs, where the
//! ground sits, where the throwable starts, water parameters, fish bounds,
//! boat/line limits. Loaded from JSON or built from one of the variant presets.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PIXELS_PER_METER_BOAT, PIXELS_PER_METER_CAST};

/// Which of the demo variants to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Throw a ball at the ground, no water
    #[default]
    Throw,
    /// Cast a fishing lure into water (drag + depth clamp)
    Lure,
    /// Drive a boat, drop a line, watch the fish wander
    Boat,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Throw => "throw",
            Variant::Lure => "lure",
            Variant::Boat => "boat",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "throw" | "ball" => Some(Variant::Throw),
            "lure" | "cast" => Some(Variant::Lure),
            "boat" | "fish" => Some(Variant::Boat),
            _ => None,
        }
    }
}

/// Ground: a static edge between two world-space endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GroundConfig {
    pub a: Vec2,
    pub b: Vec2,
}

/// The player-controlled projectile
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThrowableConfig {
    pub start: Vec2,
    pub radius: f32,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for ThrowableConfig {
    fn default() -> Self {
        Self {
            start: Vec2::new(5.0, 10.0),
            radius: 0.5,
            density: 1.0,
            friction: 0.3,
            restitution: 0.5,
        }
    }
}

/// Water surface and cast target depth (lure variant)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WaterConfig {
    /// Y threshold of the water surface
    pub level: f32,
    /// Resting depth below the surface
    pub target_depth: f32,
}

/// Fish pool (boat variant)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FishConfig {
    pub count: usize,
    pub radius: f32,
    /// Horizontal wander range
    pub bound_min: f32,
    pub bound_max: f32,
    /// Magnitude bound of the per-tick random horizontal force
    pub max_force: f32,
    /// Y band the fish spawn across
    pub spawn_y_min: f32,
    pub spawn_y_max: f32,
}

impl Default for FishConfig {
    fn default() -> Self {
        Self {
            count: 5,
            radius: 0.25,
            bound_min: 1.0,
            bound_max: 15.0,
            max_force: 2.0,
            spawn_y_min: 1.0,
            spawn_y_max: 5.0,
        }
    }
}

/// Boat and fishing line (boat variant)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoatConfig {
    pub start: Vec2,
    pub half_extents: Vec2,
    /// Horizontal speed while a steer key is held
    pub speed: f32,
    /// Line drop/raise speed while the pointer drives it
    pub line_speed: f32,
    /// Y travel range of the line weight
    pub line_lower_limit: f32,
    pub line_upper_limit: f32,
}

impl Default for BoatConfig {
    fn default() -> Self {
        Self {
            start: Vec2::new(8.0, 9.0),
            half_extents: Vec2::new(1.0, 0.3),
            speed: 3.0,
            line_speed: 2.0,
            line_lower_limit: 1.0,
            line_upper_limit: 8.5,
        }
    }
}

/// Complete scenario description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub variant: Variant,
    pub gravity: Vec2,
    /// Shared screen-pixels-per-world-meter constant (input mapping and rendering)
    pub pixels_per_meter: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// RNG seed for fish wander reproducibility
    pub seed: u64,
    pub ground: Option<GroundConfig>,
    pub throwable: Option<ThrowableConfig>,
    pub water: Option<WaterConfig>,
    pub fish: Option<FishConfig>,
    pub boat: Option<BoatConfig>,
}

impl ScenarioConfig {
    /// The basic "throw a ball" scene
    pub fn throw() -> Self {
        Self {
            variant: Variant::Throw,
            gravity: Vec2::new(0.0, -10.0),
            pixels_per_meter: PIXELS_PER_METER_CAST,
            viewport_width: 800.0,
            viewport_height: 600.0,
            seed: 0,
            ground: Some(GroundConfig {
                a: Vec2::ZERO,
                b: Vec2::new(25.0, 0.0),
            }),
            throwable: Some(ThrowableConfig::default()),
            water: None,
            fish: None,
            boat: None,
        }
    }

    /// Cast a lure into water: throw scene plus water drag and a target depth
    pub fn lure() -> Self {
        Self {
            variant: Variant::Lure,
            water: Some(WaterConfig {
                level: 7.0,
                target_depth: 3.0,
            }),
            ..Self::throw()
        }
    }

    /// Fishing boat: kinematic boat + line, wandering fish, no throwable
    pub fn boat() -> Self {
        Self {
            variant: Variant::Boat,
            gravity: Vec2::new(0.0, -10.0),
            pixels_per_meter: PIXELS_PER_METER_BOAT,
            viewport_width: 800.0,
            viewport_height: 600.0,
            seed: 0,
            ground: Some(GroundConfig {
                a: Vec2::ZERO,
                b: Vec2::new(16.0, 0.0),
            }),
            throwable: None,
            water: None,
            fish: Some(FishConfig::default()),
            boat: Some(BoatConfig::default()),
        }
    }

    /// Preset for a variant by name
    pub fn preset(variant: Variant) -> Self {
        match variant {
            Variant::Throw => Self::throw(),
            Variant::Lure => Self::lure(),
            Variant::Boat => Self::boat(),
        }
    }

    /// Parse a scenario from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
