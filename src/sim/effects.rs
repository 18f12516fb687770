//! Short-lived particle effect jobs
//!
//! Wormhole transits and universe transitions spawn a burst of particles.
//! Each burst is an independent job owned by the session: the controller
//! advances it once per frame until no particle has life left, then drops
//! it. Jobs never read or mutate core game state.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::SurfaceSize;

/// A single effect particle. `life` runs 1.0 -> 0.0.
#[derive(Debug, Clone, Copy)]
pub struct EffectParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub life: f32,
}

/// What spawned the burst (renderers pick glyph/color from this)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    WormholeTransit,
    UniverseTransition,
}

/// Life lost per frame; every burst is gone after 50 frames
const LIFE_DECAY: f32 = 0.02;

/// One fire-and-forget particle burst
#[derive(Debug, Clone)]
pub struct EffectJob {
    pub kind: EffectKind,
    pub particles: Vec<EffectParticle>,
}

impl EffectJob {
    /// Ring of particles expanding outward from a wormhole exit
    pub fn wormhole_transit(center: Vec2, radius: f32) -> Self {
        const COUNT: usize = 20;
        let particles = (0..COUNT)
            .map(|i| {
                let angle = TAU / COUNT as f32 * i as f32;
                let dir = Vec2::new(angle.cos(), angle.sin());
                EffectParticle {
                    pos: center + dir * radius,
                    vel: dir * 2.0,
                    size: 2.0,
                    life: 1.0,
                }
            })
            .collect();
        Self {
            kind: EffectKind::WormholeTransit,
            particles,
        }
    }

    /// Full-surface scatter burst for entering a new universe
    pub fn universe_transition(surface: SurfaceSize, rng: &mut Pcg32) -> Self {
        const COUNT: usize = 100;
        let particles = (0..COUNT)
            .map(|_| EffectParticle {
                pos: Vec2::new(
                    rng.random::<f32>() * surface.width,
                    rng.random::<f32>() * surface.height,
                ),
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * 10.0,
                    (rng.random::<f32>() - 0.5) * 10.0,
                ),
                size: 1.0 + rng.random::<f32>() * 3.0,
                life: 1.0,
            })
            .collect();
        Self {
            kind: EffectKind::UniverseTransition,
            particles,
        }
    }

    /// Advance all particles by one frame
    pub fn advance(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.life -= LIFE_DECAY;
        }
    }

    /// Liveness predicate; a job is dropped once this is false
    pub fn alive(&self) -> bool {
        self.particles.iter().any(|p| p.life > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_wormhole_burst_starts_on_ring() {
        let center = Vec2::new(100.0, 100.0);
        let job = EffectJob::wormhole_transit(center, 40.0);
        assert_eq!(job.kind, EffectKind::WormholeTransit);
        assert_eq!(job.particles.len(), 20);
        for particle in &job.particles {
            assert!((particle.pos.distance(center) - 40.0).abs() < 1e-3);
        }
        assert!(job.alive());
    }

    #[test]
    fn test_job_terminates_after_life_runs_out() {
        let mut job = EffectJob::wormhole_transit(Vec2::ZERO, 10.0);
        // 1.0 / 0.02 = 50 frames to drain a full life bar
        for _ in 0..50 {
            job.advance();
        }
        assert!(!job.alive());
    }

    #[test]
    fn test_transition_burst_covers_surface() {
        let mut rng = Pcg32::seed_from_u64(7);
        let surface = SurfaceSize::new(800.0, 600.0);
        let job = EffectJob::universe_transition(surface, &mut rng);
        assert_eq!(job.kind, EffectKind::UniverseTransition);
        assert_eq!(job.particles.len(), 100);
        for particle in &job.particles {
            assert!(particle.pos.x >= 0.0 && particle.pos.x <= 800.0);
            assert!(particle.pos.y >= 0.0 && particle.pos.y <= 600.0);
        }
    }
}
