//! Per-universe property table and derived physics
//!
//! The session progresses through five preset universes. Each universe bakes
//! its multipliers into derived physics once, at universe start; the step
//! never re-reads the table mid-universe.

use crate::consts::*;

/// Number of parallel universes in a session
pub const MAX_UNIVERSES: u32 = 5;

/// Static per-universe multipliers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniverseProps {
    pub gravity_strength: f32,
    pub player_speed: f32,
    /// Carried as contract data; the step does not consume it
    pub time_warp_effect: f32,
}

/// Signature player colors, universe 1..=5 (CSS hex)
pub const UNIVERSE_COLORS: [&str; MAX_UNIVERSES as usize] =
    ["#00ff00", "#00ffff", "#ff00ff", "#ffff00", "#ff0000"];

/// Look up the property row for a universe index (1-based; unknown
/// indices get the baseline row)
pub fn universe_props(universe: u32) -> UniverseProps {
    match universe {
        2 => UniverseProps {
            gravity_strength: 2.0,
            player_speed: 1.2,
            time_warp_effect: 1.2,
        },
        3 => UniverseProps {
            gravity_strength: 0.8,
            player_speed: 1.5,
            time_warp_effect: 1.5,
        },
        4 => UniverseProps {
            gravity_strength: 1.5,
            player_speed: 1.3,
            time_warp_effect: 2.0,
        },
        5 => UniverseProps {
            gravity_strength: 1.2,
            player_speed: 1.4,
            time_warp_effect: 1.8,
        },
        _ => UniverseProps {
            gravity_strength: 1.0,
            player_speed: 1.0,
            time_warp_effect: 1.0,
        },
    }
}

/// Signature player color for a universe index (1-based)
pub fn universe_color(universe: u32) -> &'static str {
    let idx = (universe.clamp(1, MAX_UNIVERSES) - 1) as usize;
    UNIVERSE_COLORS[idx]
}

/// Physics parameters derived from a universe's property row.
///
/// Units are per-frame: velocities in px/frame, accelerations in
/// px/frame^2, angles in radians/frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    pub friction: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub rotation_speed: f32,
    pub thrust: f32,
    pub gravitational_constant: f32,
}

impl PhysicsParams {
    /// Bake a universe's multipliers into concrete constants
    pub fn for_universe(universe: u32) -> Self {
        let props = universe_props(universe);
        Self {
            friction: FRICTION,
            max_speed: BASE_MAX_SPEED * props.player_speed,
            acceleration: BASE_ACCELERATION * props.player_speed,
            rotation_speed: ROTATION_SPEED,
            thrust: BASE_THRUST * props.player_speed,
            gravitational_constant: BASE_GRAVITATIONAL_CONSTANT * props.gravity_strength,
        }
    }
}
