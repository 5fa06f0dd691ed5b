//! # Player Module
//!
//! Player movement state and its per-tick update.
//!
//! Movement here is vertical only: gravity pulls an airborne player down and a jump
//! launches a grounded one. Only `Survival` mode obeys physics; `Creative` and
//! `Menger` fly freely and the tick leaves them untouched.
//!
//! ## Tick
//! 1. Outside `Survival`, nothing happens (`grounded` keeps its last value).
//! 2. When airborne, gravity is integrated into the vertical velocity and the eye
//!    moves by that velocity.
//! 3. Colliding blocks are detected. They are only reported, never resolved.
//! 4. `grounded` is recomputed.

use cgmath::{Point3, Rad, Vector3};
use log::{debug, trace};
use serde::Deserialize;
use winit::{event::ElementState, keyboard::KeyCode};

use super::camera_state::Camera;
use super::physics::{block_position, CollisionResolver, EYE_HEIGHT};
use super::voxels::world::VoxelField;

/// Simulation rate the gravity constant is tuned for.
pub const TICKS_PER_SECOND: f32 = 60.0;
/// Vertical velocity lost per second of free fall, in blocks per tick.
pub const GRAVITY: f32 = 0.5;
/// Vertical velocity lost per tick of free fall.
pub const GRAVITY_PER_TICK: f32 = GRAVITY / TICKS_PER_SECOND;
/// Vertical velocity set by a jump, in blocks per tick.
pub const JUMP_VELOCITY: f32 = 0.2;

/// Releasing this key toggles between `Creative` and `Survival`.
pub const MODE_TOGGLE_KEY: KeyCode = KeyCode::KeyF;
/// Pressing this key while grounded jumps.
pub const JUMP_KEY: KeyCode = KeyCode::Space;

/// Movement mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Gravity, jumping and ground detection apply.
    Survival,
    /// Free flight.
    #[default]
    Creative,
    /// Free flight through the Menger-sponge view.
    Menger,
}

impl Mode {
    /// `true` only for the mode that runs gravity and collision.
    pub fn obeys_physics(self) -> bool {
        matches!(self, Mode::Survival)
    }

    /// The mode entered when the toggle key is released.
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Creative => Mode::Survival,
            Mode::Survival => Mode::Creative,
            Mode::Menger => Mode::Creative,
        }
    }
}

/// The player: an eye point, a vertical velocity and a movement mode.
#[derive(Debug, Clone)]
pub struct Player {
    /// Camera whose position is the player's eye.
    pub camera: Camera,
    grounded: bool,
    velocity_y: f32,
    mode: Mode,
    resolver: CollisionResolver,
}

impl Player {
    /// Creates an airborne, motionless player with its eye at `eye`.
    pub fn new(eye: Point3<f32>, mode: Mode) -> Self {
        Player {
            camera: Camera::new(eye, Rad(0.0), Rad(0.0)),
            grounded: false,
            velocity_y: 0.0,
            mode,
            resolver: CollisionResolver::default(),
        }
    }

    /// The eye point.
    pub fn eye(&self) -> Point3<f32> {
        self.camera.eye()
    }

    /// The point `EYE_HEIGHT` below the eye.
    pub fn feet(&self) -> Point3<f32> {
        self.eye() - Vector3::new(0.0, EYE_HEIGHT, 0.0)
    }

    /// The block containing the eye.
    pub fn block_position(&self) -> Point3<i32> {
        block_position(self.eye())
    }

    /// Current vertical velocity in blocks per tick.
    pub fn velocity(&self) -> f32 {
        self.velocity_y
    }

    /// Result of the last ground check.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Current movement mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Advances the player by one fixed 1/60 s step.
    pub fn tick(&mut self, field: &VoxelField) {
        if !self.mode.obeys_physics() {
            return;
        }

        if !self.grounded {
            self.velocity_y -= GRAVITY_PER_TICK;
            self.camera.translate(Vector3::new(0.0, self.velocity_y, 0.0));
        }

        // Collision response is not implemented: intersecting blocks are only reported.
        let collisions = self.resolver.find_collisions(field, self.eye());
        if !collisions.is_empty() {
            trace!("Player at {:?} intersects {} blocks", self.eye(), collisions.len());
        }

        self.grounded = self.resolver.is_grounded(field, self.eye());
    }

    /// Applies one discrete key event.
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        match (key, state) {
            (MODE_TOGGLE_KEY, ElementState::Released) => {
                let next = self.mode.toggled();
                if next == Mode::Creative {
                    self.velocity_y = 0.0;
                }
                debug!("Mode {:?} -> {:?}", self.mode, next);
                self.mode = next;
            }
            (JUMP_KEY, ElementState::Pressed) if self.grounded => {
                self.grounded = false;
                self.velocity_y = JUMP_VELOCITY;
                debug!("Jump from {:?}", self.eye());
            }
            _ => {}
        }
    }
}
