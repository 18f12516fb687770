//! Multiverse Drift - a multiverse-hopping gravity arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, universe rules)
//! - `renderer`: Scene description + Canvas 2D back end
//! - `settings`: Player preferences persisted to LocalStorage

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, frame-count based)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Base physics (per frame, before universe multipliers)
    pub const FRICTION: f32 = 0.99;
    pub const BASE_MAX_SPEED: f32 = 8.0;
    pub const BASE_ACCELERATION: f32 = 0.4;
    pub const BASE_THRUST: f32 = 0.4;
    pub const ROTATION_SPEED: f32 = 0.08;
    pub const BASE_GRAVITATIONAL_CONSTANT: f32 = 0.5;

    /// Black holes pull only within this distance of the player
    pub const GRAVITY_ACTIVATION_RADIUS: f32 = 200.0;
    /// Coincident-center guard for the inverse-square law
    pub const MIN_GRAVITY_DISTANCE: f32 = 1e-3;
    /// Cosmetic accretion-ring spin per frame
    pub const BLACK_HOLE_SPIN: f32 = 0.02;

    /// Player ship
    pub const PLAYER_RADIUS: f32 = 20.0;

    /// World population per universe
    pub const BLACK_HOLE_COUNT: usize = 3;
    pub const PLANET_COUNT: usize = 5;
    pub const TIME_WARP_ZONE_COUNT: usize = 1;
    pub const STAR_COUNT: usize = 200;
    pub const WORMHOLE_PAIR_COUNT: usize = 2;

    /// Entity sizes and spawn margins (margin keeps entities fully on-screen)
    pub const BLACK_HOLE_RADIUS: f32 = 30.0;
    pub const BLACK_HOLE_STRENGTH: f32 = 2.0;
    pub const BLACK_HOLE_MARGIN: f32 = 50.0;
    pub const EXTRA_BLACK_HOLE_RADIUS: f32 = 25.0;
    pub const EXTRA_BLACK_HOLE_STRENGTH: f32 = 2.5;
    pub const PLANET_RADIUS: f32 = 15.0;
    pub const PLANET_MARGIN: f32 = 30.0;
    pub const WORMHOLE_RADIUS: f32 = 40.0;
    pub const WORMHOLE_MARGIN: f32 = 100.0;
    pub const TIME_WARP_RADIUS: f32 = 100.0;
    pub const TIME_WARP_SCALE: f32 = 0.5;

    /// Wormhole visuals and transit
    pub const WORMHOLE_PULSE_SPEED: f32 = 0.05;
    pub const WORMHOLE_PULSE_SIZE: f32 = 5.0;
    pub const WORMHOLE_EXIT_BOOST: f32 = 1.2;

    /// Orbital motion (black holes use these, planets scale them)
    pub const ORBIT_SPEED: f32 = 0.001;
    pub const WOBBLE_SPEED: f32 = 0.02;
    pub const WOBBLE_AMOUNT: f32 = 30.0;
    pub const PLANET_ORBIT_FACTOR: f32 = 1.5;
    pub const PLANET_WOBBLE_SPEED_FACTOR: f32 = 1.2;
    pub const PLANET_WOBBLE_AMOUNT_FACTOR: f32 = 0.7;

    /// Life system
    pub const MAX_LIFE: f32 = 200.0;
    pub const LIFE_DRAIN_RATE: f32 = 0.05;
    pub const COLLECT_BONUS: f32 = 30.0;
    pub const WORMHOLE_CONSUMPTION: f32 = 10.0;

    /// Scoring
    pub const PLANET_SCORE: u64 = 100;

    /// Universe-4 chaos rule: teleport roll every 3 s of play
    pub const TELEPORT_INTERVAL_TICKS: u32 = 180;
    pub const TELEPORT_CHANCE: f32 = 0.1;
}

/// Toroidal wrap of a single coordinate: exit one edge, appear at the other.
#[inline]
pub fn wrap_coord(v: f32, max: f32) -> f32 {
    if v < 0.0 {
        max
    } else if v > max {
        0.0
    } else {
        v
    }
}

/// Toroidal wrap of a position against surface bounds (velocity untouched).
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_coord(pos.x, width), wrap_coord(pos.y, height))
}

/// Unit vector pointing along `angle` radians
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
