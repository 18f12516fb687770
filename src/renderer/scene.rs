//! Platform-free scene description
//!
//! Everything a back end needs to paint a frame, computed from `GameState`
//! alone: CSS colors, pulse radii, glyph geometry, draw ordering. No
//! gameplay logic and no platform calls, so it tests on the native target.

use std::f32::consts::TAU;

use crate::consts::WORMHOLE_PULSE_SIZE;
use crate::sim::{Star, Wormhole};

/// Canvas clear color
pub const BACKGROUND: &str = "#000000";
/// Radius of the gravity-lens gradient around each black hole (visual only)
pub const GRAVITY_LENS_RADIUS: f64 = 150.0;
/// Accretion ring sits this far outside the event horizon
pub const ACCRETION_RING_OFFSET: f64 = 10.0;
pub const ACCRETION_RING_COLOR: &str = "#4400ff";
pub const TIME_WARP_FILL: &str = "rgba(0, 255, 255, 0.2)";
pub const TIME_WARP_STROKE: &str = "rgba(0, 255, 255, 0.5)";
pub const THRUST_FLAME_COLOR: &str = "#ff4400";
pub const WORMHOLE_SPOKE_COLOR: &str = "rgba(255, 255, 255, 0.5)";

/// Number of energy spokes inside each wormhole vortex
pub const WORMHOLE_SPOKES: usize = 8;

/// Ship glyph, local coordinates (nose on +x, rotated by player heading)
pub const PLAYER_GLYPH: [(f64, f64); 3] = [(20.0, 0.0), (-10.0, -10.0), (-10.0, 10.0)];
/// Thrust flame behind the ship, drawn only while thrusting
pub const THRUST_FLAME: [(f64, f64); 3] = [(-10.0, 0.0), (-20.0, -5.0), (-20.0, 5.0)];
/// Ambient glow radius around the ship
pub const PLAYER_GLOW_RADIUS: f64 = 30.0;

/// CSS color for an entity hue (planets, wormholes)
pub fn hsl(hue: f32) -> String {
    format!("hsl({:.0}, 70%, 50%)", hue)
}

/// Star fill with per-star brightness
pub fn star_fill(star: &Star) -> String {
    format!("rgba(255, 255, 255, {:.2})", star.brightness)
}

/// White particle fill fading with remaining life
pub fn particle_fill(life: f32) -> String {
    format!("rgba(255, 255, 255, {:.2})", life.clamp(0.0, 1.0))
}

/// Pulsating outer-ring radius of a wormhole
pub fn wormhole_ring_radius(wormhole: &Wormhole) -> f32 {
    wormhole.radius + wormhole.phase.sin() * WORMHOLE_PULSE_SIZE
}

/// Angles of the rotating energy spokes inside a wormhole vortex
pub fn wormhole_spoke_angles(wormhole: &Wormhole) -> [f32; WORMHOLE_SPOKES] {
    let mut angles = [0.0; WORMHOLE_SPOKES];
    for (i, angle) in angles.iter_mut().enumerate() {
        *angle = (wormhole.phase + TAU / WORMHOLE_SPOKES as f32 * i as f32) % TAU;
    }
    angles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::WORMHOLE_RADIUS;
    use glam::Vec2;

    fn wormhole(phase: f32) -> Wormhole {
        Wormhole {
            pos: Vec2::new(100.0, 100.0),
            radius: WORMHOLE_RADIUS,
            phase,
            hue: 210.0,
            pair: 1,
        }
    }

    #[test]
    fn test_hsl_formats_whole_hue() {
        assert_eq!(hsl(210.4), "hsl(210, 70%, 50%)");
        assert_eq!(hsl(0.0), "hsl(0, 70%, 50%)");
    }

    #[test]
    fn test_ring_radius_stays_within_pulse_band() {
        for i in 0..100 {
            let w = wormhole(i as f32 * 0.1);
            let r = wormhole_ring_radius(&w);
            assert!(r >= WORMHOLE_RADIUS - WORMHOLE_PULSE_SIZE);
            assert!(r <= WORMHOLE_RADIUS + WORMHOLE_PULSE_SIZE);
        }
    }

    #[test]
    fn test_spokes_are_evenly_spaced() {
        let angles = wormhole_spoke_angles(&wormhole(0.0));
        let step = TAU / WORMHOLE_SPOKES as f32;
        for pair in angles.windows(2) {
            assert!((pair[1] - pair[0] - step).abs() < 1e-5);
        }
    }

    #[test]
    fn test_particle_fill_clamps_life() {
        assert_eq!(particle_fill(-0.5), "rgba(255, 255, 255, 0.00)");
        assert_eq!(particle_fill(2.0), "rgba(255, 255, 255, 1.00)");
    }
}
