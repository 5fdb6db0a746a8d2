//! Fixed timestep simulation driver
//!
//! [`Simulation`] owns the physics world, the scene, the launch controller and
//! the RNG. The host calls `handle_event` for each input event and `tick` at a
//! fixed 60 Hz cadence; each tick applies the variant's environment policies,
//! advances the world by exactly one fixed step, updates derived state and
//! raises the redraw flag. While a drag gesture is in progress the tick is a
//! freeze-frame: the preview updates but simulated time does not advance.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::{ScenarioConfig, Variant};
use crate::consts::{SOLVER_ITERS_BASIC, SOLVER_ITERS_BOAT};
use crate::input::{InputEvent, Key, Viewport};
use crate::physics::{BodyShape, PhysicsWorld};
use crate::sim::launch::LaunchController;
use crate::sim::scene::{BodyView, FrameSnapshot, SceneState};
use crate::sim::{forces, trajectory};

/// Side-channel notifications for the host (logged as well)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// A drag gesture ended and this velocity was applied to the throwable
    Launched { velocity: Vec2 },
    /// The throwable crossed the water surface downward
    EnteredWater,
    /// The throwable crossed the water surface upward
    LeftWater,
    /// The depth clamp engaged; the lure is resting until the next launch
    DepthReached,
}

/// One running simulation: world, scene, interaction state, RNG, event queue
pub struct Simulation {
    variant: Variant,
    world: PhysicsWorld,
    scene: SceneState,
    launcher: LaunchController,
    viewport: Viewport,
    rng: Pcg32,
    events: Vec<SimEvent>,
    time_ticks: u64,
    needs_redraw: bool,
}

impl Simulation {
    /// Build the world and every scene body before the loop starts, so no
    /// handle is ever missing during a tick.
    pub fn new(config: &ScenarioConfig) -> Self {
        let iterations = match config.variant {
            Variant::Boat => SOLVER_ITERS_BOAT,
            Variant::Throw | Variant::Lure => SOLVER_ITERS_BASIC,
        };
        let mut world = PhysicsWorld::new(config.gravity, iterations.into());
        let scene = SceneState::from_config(config, &mut world);
        Self {
            variant: config.variant,
            world,
            scene,
            launcher: LaunchController::default(),
            viewport: Viewport::new(
                config.viewport_width,
                config.viewport_height,
                config.pixels_per_meter,
            ),
            rng: Pcg32::seed_from_u64(config.seed),
            events: Vec::new(),
            time_ticks: 0,
            needs_redraw: true,
        }
    }

    /// Route one host input event. Positions arrive in screen pixels.
    pub fn handle_event(&mut self, event: InputEvent) {
        match self.variant {
            Variant::Throw | Variant::Lure => self.handle_cast_event(event),
            Variant::Boat => self.handle_boat_event(event),
        }
    }

    fn handle_cast_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown(screen) => {
                let Some(throwable) = self.scene.throwable.as_mut() else {
                    return;
                };
                let world_point = self.viewport.screen_to_world(screen);
                let body_position = self.world.position(throwable.handle);
                throwable.starting_position = body_position;
                self.launcher.pointer_down(world_point, body_position);
                self.needs_redraw = true;
            }
            InputEvent::PointerMove(screen) => {
                if self.launcher.is_dragging() {
                    self.launcher
                        .pointer_move(self.viewport.screen_to_world(screen));
                    self.needs_redraw = true;
                }
            }
            InputEvent::PointerUp => {
                if let Some(velocity) = self.launcher.pointer_up() {
                    self.launch(velocity);
                }
            }
            InputEvent::KeyDown(_) | InputEvent::KeyUp(_) => {}
        }
    }

    fn handle_boat_event(&mut self, event: InputEvent) {
        let Some(rig) = self.scene.boat else { return };
        match event {
            InputEvent::KeyDown(Key::Left) => {
                self.world.set_linvel(rig.boat, Vec2::new(-rig.speed, 0.0));
            }
            InputEvent::KeyDown(Key::Right) => {
                self.world.set_linvel(rig.boat, Vec2::new(rig.speed, 0.0));
            }
            InputEvent::KeyUp(_) => {
                self.world.set_linvel(rig.boat, Vec2::ZERO);
            }
            // Pointer drives the line: press lowers, release raises; the
            // anchor constraint stops it at the travel limits
            InputEvent::PointerDown(_) => {
                self.world
                    .set_linvel(rig.line, Vec2::new(0.0, -rig.line_speed));
            }
            InputEvent::PointerUp => {
                self.world
                    .set_linvel(rig.line, Vec2::new(0.0, rig.line_speed));
            }
            InputEvent::PointerMove(_) => {}
        }
    }

    /// Apply the pending launch velocity and enter the dynamic regime
    fn launch(&mut self, velocity: Vec2) {
        let Some(throwable) = self.scene.throwable.as_mut() else {
            return;
        };
        throwable.initial_velocity = velocity;
        self.world.make_dynamic(throwable.handle);
        // A settled lure is woken by the new cast
        self.world.set_gravity_scale(throwable.handle, 1.0);
        self.world.set_linvel(throwable.handle, velocity);
        if let Some(water) = self.scene.water.as_mut() {
            water.settled = false;
        }
        log::debug!("launched with velocity ({:.2}, {:.2})", velocity.x, velocity.y);
        self.events.push(SimEvent::Launched { velocity });
        self.needs_redraw = true;
    }

    /// Advance by one fixed tick. Invoked at 60 Hz by the host; a late call
    /// simply delays the next one, there is no catch-up.
    pub fn tick(&mut self) {
        // Dragging previews a trajectory without advancing real time
        if self.launcher.is_dragging() {
            self.needs_redraw = true;
            return;
        }

        // Environment policies, then exactly one fixed step
        if let Some(throwable) = self.scene.throwable {
            if let Some(water) = self.scene.water.as_mut() {
                forces::apply_water_drag(&mut self.world, &throwable, water);
                if forces::apply_depth_clamp(&mut self.world, &throwable, water) {
                    log::info!("lure reached target depth, resting");
                    self.events.push(SimEvent::DepthReached);
                }
            }
        }
        if !self.scene.fish.fish.is_empty() {
            forces::apply_fish_wander(&mut self.world, &self.scene.fish, &mut self.rng);
        }

        self.world.step();

        // Derived state from post-step positions
        if let Some(rig) = self.scene.boat {
            // Anchor after the step so the rendered line X matches the boat
            // exactly on every frame
            forces::apply_line_anchor(&mut self.world, &rig);
        }
        if let Some(throwable) = self.scene.throwable {
            if let Some(water) = self.scene.water.as_mut() {
                let in_water = self.world.position(throwable.handle).y <= water.level;
                if in_water != water.in_water {
                    water.in_water = in_water;
                    if in_water {
                        log::info!("lure entered the water");
                        self.events.push(SimEvent::EnteredWater);
                    } else {
                        log::info!("lure left the water");
                        self.events.push(SimEvent::LeftWater);
                    }
                }
            }
        }

        self.time_ticks += 1;
        self.needs_redraw = true;
    }

    /// Per-frame snapshot for the host renderer. Read-only; call between
    /// ticks, never during one.
    pub fn snapshot(&self) -> FrameSnapshot {
        let preview = self.launcher.is_dragging().then(|| {
            trajectory::preview(
                self.launcher.starting_position(),
                self.launcher.initial_velocity(),
                self.world.gravity(),
            )
        });

        FrameSnapshot {
            ground: self.scene.ground.map(|g| (g.a, g.b)),
            throwable: self.scene.throwable.map(|t| BodyView {
                position: self.world.position(t.handle),
                shape: BodyShape::Circle { radius: t.radius },
            }),
            fish: self
                .scene
                .fish
                .fish
                .iter()
                .map(|f| BodyView {
                    position: self.world.position(f.handle),
                    shape: BodyShape::Circle { radius: f.radius },
                })
                .collect(),
            boat: self.scene.boat.map(|r| BodyView {
                position: self.world.position(r.boat),
                shape: BodyShape::Box {
                    half_extents: r.boat_half_extents,
                },
            }),
            line: self.scene.boat.map(|r| BodyView {
                position: self.world.position(r.line),
                shape: BodyShape::Box {
                    half_extents: r.line_half_extents,
                },
            }),
            water_level: self.scene.water.map(|w| w.level),
            preview,
        }
    }

    /// Drain pending side-channel notifications
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// True once per change; consumed by the host's redraw scheduling
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Replace the ground edge at runtime
    pub fn set_ground(&mut self, a: Vec2, b: Vec2) {
        self.scene.set_ground(&mut self.world, a, b);
        self.needs_redraw = true;
    }

    /// Reposition the throwable's launch origin (configuration surface)
    pub fn set_throwable_start(&mut self, position: Vec2) {
        if let Some(throwable) = self.scene.throwable.as_mut() {
            throwable.starting_position = position;
            self.world.set_position(throwable.handle, position);
            self.world.set_linvel(throwable.handle, Vec2::ZERO);
            self.needs_redraw = true;
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn is_dragging(&self) -> bool {
        self.launcher.is_dragging()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Screen-space point for a world-space target under the sim's viewport
    fn screen(sim: &Simulation, world: Vec2) -> Vec2 {
        sim.viewport().world_to_screen(world)
    }

    fn cast(sim: &mut Simulation, from: Vec2, to: Vec2) {
        let down = screen(sim, from);
        let up = screen(sim, to);
        sim.handle_event(InputEvent::PointerDown(down));
        sim.handle_event(InputEvent::PointerMove(up));
        sim.handle_event(InputEvent::PointerUp);
    }

    #[test]
    fn test_drag_freezes_simulation() {
        let mut sim = Simulation::new(&ScenarioConfig::throw());
        sim.handle_event(InputEvent::PointerDown(Vec2::new(100.0, 100.0)));
        assert!(sim.is_dragging());

        let before = sim.world.position(sim.scene.throwable.unwrap().handle);
        for _ in 0..30 {
            sim.tick();
        }
        assert_eq!(sim.time_ticks(), 0);
        let after = sim.world.position(sim.scene.throwable.unwrap().handle);
        assert_eq!(before, after);
    }

    #[test]
    fn test_throwable_holds_still_before_first_launch() {
        let mut sim = Simulation::new(&ScenarioConfig::throw());
        for _ in 0..60 {
            sim.tick();
        }
        let pos = sim.world.position(sim.scene.throwable.unwrap().handle);
        assert!((pos - Vec2::new(5.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn test_cast_applies_gain_times_drag() {
        // Press at (5,5), move to (6,5), release: velocity (10, 0)
        let mut sim = Simulation::new(&ScenarioConfig::throw());
        cast(&mut sim, Vec2::new(5.0, 5.0), Vec2::new(6.0, 5.0));

        assert!(!sim.is_dragging());
        let throwable = sim.scene.throwable.unwrap();
        assert!((throwable.initial_velocity - Vec2::new(10.0, 0.0)).length() < 1e-3);
        let vel = sim.world.linvel(throwable.handle);
        assert!((vel - Vec2::new(10.0, 0.0)).length() < 1e-3);
        assert!(sim.world.is_dynamic(throwable.handle));

        let events = sim.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, SimEvent::Launched { .. })));
    }

    #[test]
    fn test_idle_pointer_events_are_noops() {
        let mut sim = Simulation::new(&ScenarioConfig::throw());
        sim.handle_event(InputEvent::PointerMove(Vec2::new(50.0, 50.0)));
        sim.handle_event(InputEvent::PointerUp);
        assert!(!sim.is_dragging());
        assert!(sim.drain_events().is_empty());

        let throwable = sim.scene.throwable.unwrap();
        assert!(!sim.world.is_dynamic(throwable.handle));
    }

    #[test]
    fn test_snapshot_preview_only_while_dragging() {
        let mut sim = Simulation::new(&ScenarioConfig::throw());
        assert!(sim.snapshot().preview.is_none());

        sim.handle_event(InputEvent::PointerDown(Vec2::new(150.0, 450.0)));
        let snap = sim.snapshot();
        let preview = snap.preview.unwrap();
        assert_eq!(preview.len(), crate::consts::PREVIEW_HORIZON as usize);
        // Preview starts at the throwable, not at the pointer
        assert!((preview[0] - Vec2::new(5.0, 10.0)).length() < 1e-4);

        sim.handle_event(InputEvent::PointerUp);
        assert!(sim.snapshot().preview.is_none());
    }

    #[test]
    fn test_water_entry_then_depth_clamp() {
        // Lure dropped from Y=8 over water at 7 with target depth 3
        let mut config = ScenarioConfig::lure();
        config.throwable.as_mut().unwrap().start = Vec2::new(5.0, 8.0);
        let mut sim = Simulation::new(&config);

        // Zero-distance cast: enter the dynamic regime and free-fall
        cast(&mut sim, Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0));

        let mut entered = 0;
        let mut depth_reached = 0;
        for _ in 0..1200 {
            sim.tick();
            for event in sim.drain_events() {
                match event {
                    SimEvent::EnteredWater => entered += 1,
                    SimEvent::DepthReached => depth_reached += 1,
                    _ => {}
                }
            }
        }
        assert_eq!(entered, 1, "water entry must be reported exactly once");
        assert_eq!(depth_reached, 1);

        let throwable = sim.scene.throwable.unwrap();
        let water = sim.scene.water.unwrap();
        assert!(water.in_water);
        assert!(water.settled);
        assert_eq!(sim.world.linvel(throwable.handle), Vec2::ZERO);
        assert_eq!(sim.world.gravity_scale(throwable.handle), 0.0);
        let resting_y = sim.world.position(throwable.handle).y;
        assert!(resting_y <= water.clamp_level() + 0.1);

        // Terminal until relaunched
        for _ in 0..120 {
            sim.tick();
        }
        assert_eq!(sim.world.linvel(throwable.handle), Vec2::ZERO);
        assert!((sim.world.position(throwable.handle).y - resting_y).abs() < 1e-3);

        // A fresh cast wakes it
        cast(&mut sim, Vec2::new(5.0, 5.0), Vec2::new(5.0, 6.0));
        assert!(!sim.scene.water.unwrap().settled);
        assert_eq!(sim.world.gravity_scale(throwable.handle), 1.0);
        assert!(sim.world.linvel(throwable.handle).y > 0.0);
    }

    #[test]
    fn test_line_tracks_boat_every_tick() {
        let mut sim = Simulation::new(&ScenarioConfig::boat());
        sim.handle_event(InputEvent::KeyDown(Key::Right));
        // Line moving on its own axis at the same time
        sim.handle_event(InputEvent::PointerDown(Vec2::ZERO));

        let rig = sim.scene.boat.unwrap();
        let start_x = sim.world.position(rig.boat).x;
        for _ in 0..120 {
            sim.tick();
            let boat_x = sim.world.position(rig.boat).x;
            let line_x = sim.world.position(rig.line).x;
            assert!((boat_x - line_x).abs() < 1e-5);
        }
        assert!(sim.world.position(rig.boat).x > start_x);

        sim.handle_event(InputEvent::KeyUp(Key::Right));
        sim.tick();
        let held_x = sim.world.position(rig.boat).x;
        sim.tick();
        assert!((sim.world.position(rig.boat).x - held_x).abs() < 1e-5);
    }

    #[test]
    fn test_line_stops_at_lower_limit() {
        let mut sim = Simulation::new(&ScenarioConfig::boat());
        sim.handle_event(InputEvent::PointerDown(Vec2::ZERO));

        let rig = sim.scene.boat.unwrap();
        // Long enough to traverse the whole travel range
        for _ in 0..1200 {
            sim.tick();
        }
        let y = sim.world.position(rig.line).y;
        assert!(y <= rig.line_lower_limit + 0.1);
        assert_eq!(sim.world.linvel(rig.line).y, 0.0);

        // Release raises it back toward the upper limit
        sim.handle_event(InputEvent::PointerUp);
        for _ in 0..1200 {
            sim.tick();
        }
        let y = sim.world.position(rig.line).y;
        assert!(y >= rig.line_upper_limit - 0.1);
    }

    #[test]
    fn test_boat_run_is_deterministic() {
        let config = ScenarioConfig::boat();
        let mut a = Simulation::new(&config);
        let mut b = Simulation::new(&config);
        a.handle_event(InputEvent::KeyDown(Key::Left));
        b.handle_event(InputEvent::KeyDown(Key::Left));
        for _ in 0..300 {
            a.tick();
            b.tick();
        }
        for (fa, fb) in a.scene.fish.fish.iter().zip(&b.scene.fish.fish) {
            assert_eq!(a.world.position(fa.handle), b.world.position(fb.handle));
        }
    }

    #[test]
    fn test_redraw_flag_is_consumed() {
        let mut sim = Simulation::new(&ScenarioConfig::throw());
        assert!(sim.take_redraw());
        assert!(!sim.take_redraw());
        sim.tick();
        assert!(sim.take_redraw());
    }

    #[test]
    fn test_set_ground_updates_snapshot() {
        let mut sim = Simulation::new(&ScenarioConfig::throw());
        sim.set_ground(Vec2::new(-2.0, 1.0), Vec2::new(30.0, 1.0));
        let snap = sim.snapshot();
        assert_eq!(snap.ground, Some((Vec2::new(-2.0, 1.0), Vec2::new(30.0, 1.0))));
    }
}
