//! Procedural world generation
//!
//! Every universe instance gets a fresh world: black holes, collectible
//! planets, wormhole pairs, a time-warp zone and a starfield, all placed
//! uniformly at random within margins that keep them fully on-screen.
//! Universe-specific rules are applied once, right after base generation.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{BlackHole, MotionParams, Planet, Star, SurfaceSize, TimeWarpZone, Wormhole};
use crate::consts::*;

/// All entities belonging to one universe instance
#[derive(Debug, Clone)]
pub struct World {
    pub black_holes: Vec<BlackHole>,
    pub planets: Vec<Planet>,
    pub wormholes: Vec<Wormhole>,
    pub time_warp_zones: Vec<TimeWarpZone>,
    pub stars: Vec<Star>,
    pub motion: MotionParams,
    /// Universe-4 chaos rule: ticks until the next teleport roll.
    /// `None` in every other universe, so the trigger dies with the world.
    pub teleport_countdown: Option<u32>,
}

/// Uniform position with `margin` clearance from every edge. A degenerate
/// surface (smaller than twice the margin) collapses to edge-hugging spots.
fn random_pos(rng: &mut Pcg32, surface: SurfaceSize, margin: f32) -> Vec2 {
    let span_x = (surface.width - 2.0 * margin).max(0.0);
    let span_y = (surface.height - 2.0 * margin).max(0.0);
    Vec2::new(
        margin + rng.random::<f32>() * span_x,
        margin + rng.random::<f32>() * span_y,
    )
}

fn random_phase(rng: &mut Pcg32) -> f32 {
    rng.random::<f32>() * TAU
}

fn make_black_hole(rng: &mut Pcg32, surface: SurfaceSize, radius: f32, strength: f32) -> BlackHole {
    let pos = random_pos(rng, surface, BLACK_HOLE_MARGIN);
    BlackHole {
        pos,
        center: pos,
        radius,
        strength,
        rotation_angle: 0.0,
        orbit_angle: random_phase(rng),
        wobble_phase: random_phase(rng),
    }
}

impl World {
    /// Generate a fresh world for `universe` (1-based), rule table applied.
    pub fn generate(universe: u32, surface: SurfaceSize, rng: &mut Pcg32) -> Self {
        let black_holes = (0..BLACK_HOLE_COUNT)
            .map(|_| make_black_hole(rng, surface, BLACK_HOLE_RADIUS, BLACK_HOLE_STRENGTH))
            .collect();

        let planets = (0..PLANET_COUNT)
            .map(|_| {
                let pos = random_pos(rng, surface, PLANET_MARGIN);
                Planet {
                    pos,
                    center: pos,
                    radius: PLANET_RADIUS,
                    hue: rng.random::<f32>() * 360.0,
                    collected: false,
                    orbit_angle: random_phase(rng),
                    wobble_phase: random_phase(rng),
                    entangled_with: None,
                }
            })
            .collect();

        let mut wormholes = Vec::with_capacity(WORMHOLE_PAIR_COUNT * 2);
        for i in 0..WORMHOLE_PAIR_COUNT {
            let hue = rng.random::<f32>() * 360.0;
            let entrance_idx = i * 2;
            // Entrance and exit reference each other by index and share a
            // hue; anti-phase so the rings pulse out of sync.
            wormholes.push(Wormhole {
                pos: random_pos(rng, surface, WORMHOLE_MARGIN),
                radius: WORMHOLE_RADIUS,
                phase: 0.0,
                hue,
                pair: entrance_idx + 1,
            });
            wormholes.push(Wormhole {
                pos: random_pos(rng, surface, WORMHOLE_MARGIN),
                radius: WORMHOLE_RADIUS,
                phase: PI,
                hue,
                pair: entrance_idx,
            });
        }

        let time_warp_zones = (0..TIME_WARP_ZONE_COUNT)
            .map(|_| TimeWarpZone {
                pos: random_pos(rng, surface, TIME_WARP_RADIUS),
                radius: TIME_WARP_RADIUS,
                time_scale: TIME_WARP_SCALE,
            })
            .collect();

        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: random_pos(rng, surface, 0.0),
                size: 1.0 + rng.random::<f32>() * 2.0,
                brightness: rng.random::<f32>(),
            })
            .collect();

        let mut world = Self {
            black_holes,
            planets,
            wormholes,
            time_warp_zones,
            stars,
            motion: MotionParams::default(),
            teleport_countdown: None,
        };
        world.apply_universe_rule(universe, surface, rng);
        world
    }

    /// Universe-specific augmentation, applied once per world instance
    fn apply_universe_rule(&mut self, universe: u32, surface: SurfaceSize, rng: &mut Pcg32) {
        match universe {
            // High-gravity universe: two extra, denser black holes
            2 => {
                for _ in 0..2 {
                    self.black_holes.push(make_black_hole(
                        rng,
                        surface,
                        EXTRA_BLACK_HOLE_RADIUS,
                        EXTRA_BLACK_HOLE_STRENGTH,
                    ));
                }
            }
            // Fast universe: orbits and wobbles run half again as fast
            3 => {
                self.motion.orbit_speed *= 1.5;
                self.motion.wobble_speed *= 1.5;
            }
            // Chaos universe: arm the recurring planet-teleport trigger
            4 => {
                self.teleport_countdown = Some(TELEPORT_INTERVAL_TICKS);
            }
            // Quantum universe: entangle planets pairwise (even i with i+1)
            5 => {
                for i in (0..self.planets.len().saturating_sub(1)).step_by(2) {
                    self.planets[i].entangled_with = Some(i + 1);
                    self.planets[i + 1].entangled_with = Some(i);
                }
            }
            _ => {}
        }
    }

    /// Planets still collectible in this world
    pub fn uncollected_planets(&self) -> impl Iterator<Item = &Planet> {
        self.planets.iter().filter(|p| !p.collected)
    }
}
